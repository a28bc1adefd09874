use std::fmt;
use std::io;

use macaddr::MacAddr6;

/// Outcome of one non-blocking receive attempt on a channel.
///
/// "No data queued" is an expected steady-state result, not an error, so it
/// gets its own variant instead of being folded into `Failed`.
#[derive(Debug)]
pub enum RecvOutcome {
    /// One complete link-layer frame, exactly as captured.
    Frame(Vec<u8>),
    /// Nothing queued on the channel right now.
    NoData,
    /// An OS-level error other than "would block".
    Failed(io::Error),
}

/// Raw send/receive capability bound to one network interface.
///
/// Implemented by the platform packet socket in production and by an
/// in-memory mock in tests, so the poll loop never needs to know the
/// concrete channel type.
pub trait FrameChannel {
    /// Send a raw frame verbatim. Non-blocking; no partial-send retry.
    fn transmit(&mut self, frame: &[u8]) -> io::Result<usize>;

    /// Attempt one non-blocking receive. Must never block the caller.
    fn receive(&mut self) -> RecvOutcome;
}

/// One usable network interface: its name, hardware address, and the raw
/// channel that owns the underlying OS resource.
pub struct NetDevice {
    name: String,
    hardware_address: MacAddr6,
    channel: Box<dyn FrameChannel>,
}

impl NetDevice {
    pub fn new(name: String, hardware_address: MacAddr6, channel: Box<dyn FrameChannel>) -> Self {
        NetDevice {
            name,
            hardware_address,
            channel,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hardware_address(&self) -> MacAddr6 {
        self.hardware_address
    }

    /// Send a raw frame out of this device's interface.
    pub fn transmit(&mut self, frame: &[u8]) -> io::Result<usize> {
        self.channel.transmit(frame)
    }

    /// Poll this device's channel once, without blocking.
    pub fn receive(&mut self) -> RecvOutcome {
        self.channel.receive()
    }
}

impl fmt::Debug for NetDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetDevice")
            .field("name", &self.name)
            .field("hardware_address", &self.hardware_address)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// In-memory channel for exercising poll and transmit logic without
    /// raw-socket privileges.
    pub struct MockChannel {
        incoming: VecDeque<RecvOutcome>,
        pub sent: Rc<RefCell<Vec<Vec<u8>>>>,
    }

    impl MockChannel {
        pub fn new() -> Self {
            MockChannel {
                incoming: VecDeque::new(),
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }

        pub fn queue_frame(&mut self, bytes: &[u8]) {
            self.incoming.push_back(RecvOutcome::Frame(bytes.to_vec()));
        }

        pub fn queue_failure(&mut self) {
            self.incoming.push_back(RecvOutcome::Failed(io::Error::new(
                io::ErrorKind::Other,
                "simulated channel failure",
            )));
        }
    }

    impl FrameChannel for MockChannel {
        fn transmit(&mut self, frame: &[u8]) -> io::Result<usize> {
            self.sent.borrow_mut().push(frame.to_vec());
            Ok(frame.len())
        }

        fn receive(&mut self) -> RecvOutcome {
            self.incoming.pop_front().unwrap_or(RecvOutcome::NoData)
        }
    }

    pub fn mock_device(name: &str, channel: MockChannel) -> NetDevice {
        NetDevice::new(
            name.to_string(),
            MacAddr6::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01),
            Box::new(channel),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{mock_device, MockChannel};
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_receive_returns_queued_frame_unaltered() {
        let mut channel = MockChannel::new();
        let payload: Vec<u8> = (0..64).map(|i| i as u8).collect();
        channel.queue_frame(&payload);
        let mut device = mock_device("eth0", channel);

        match device.receive() {
            RecvOutcome::Frame(frame) => {
                assert_eq!(frame.len(), 64);
                assert_eq!(frame, payload);
            }
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn test_receive_without_traffic_reports_no_data_repeatedly() {
        let mut device = mock_device("eth0", MockChannel::new());
        for _ in 0..3 {
            assert!(matches!(device.receive(), RecvOutcome::NoData));
        }
    }

    #[test]
    fn test_transmit_passes_buffer_verbatim() {
        let channel = MockChannel::new();
        let sent = Rc::clone(&channel.sent);
        let mut device = mock_device("eth0", channel);

        let frame = [0xde, 0xad, 0xbe, 0xef];
        let n = device.transmit(&frame).unwrap();
        assert_eq!(n, frame.len());
        assert_eq!(sent.borrow().as_slice(), &[frame.to_vec()]);
    }

    #[test]
    fn test_device_metadata_accessors() {
        let device = mock_device("wlan0", MockChannel::new());
        assert_eq!(device.name(), "wlan0");
        assert_eq!(device.hardware_address().as_bytes().len(), 6);
    }
}
