//! The steady-state poll loop: drain frames from every device, forever.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info};

use crate::netdev::device::RecvOutcome;
use crate::netdev::registry::DeviceRegistry;

/// What one full pass over the registry produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub frames: usize,
    pub errors: usize,
}

/// Poll every registered device until the stop flag is raised.
///
/// Single-threaded by design: each receive attempt is one non-blocking call,
/// so a pass never stalls and every device gets another chance next pass.
pub fn run(registry: &mut DeviceRegistry, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        poll_once(registry);
    }
    info!("poll loop stopped");
}

/// One pass: exactly one receive attempt per device.
pub fn poll_once(registry: &mut DeviceRegistry) -> PassStats {
    let mut stats = PassStats::default();
    for device in registry.iter_mut() {
        match device.receive() {
            RecvOutcome::Frame(frame) => {
                info!(
                    "{}: received {} bytes: {}",
                    device.name(),
                    frame.len(),
                    format_frame(&frame)
                );
                stats.frames += 1;
            }
            RecvOutcome::NoData => {}
            RecvOutcome::Failed(err) => {
                // The device stays registered; raw-socket errors are rare
                // and re-attempting next pass is cheap.
                error!("{}: receive failed: {}", device.name(), err);
                stats.errors += 1;
            }
        }
    }
    stats
}

/// Render a frame as contiguous lowercase hex, one byte per pair.
fn format_frame(frame: &[u8]) -> String {
    frame.iter().map(|byte| format!("{:02x}", byte)).collect()
}
