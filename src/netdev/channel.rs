//! Linux AF_PACKET channel: the platform implementation of `FrameChannel`.

use std::ffi::CString;
use std::io;
use std::mem;
use std::os::fd::RawFd;

use macaddr::MacAddr6;

use crate::common::globals::{FRAME_BUFFER_SIZE, HWADDR_LEN};
use crate::netdev::device::{FrameChannel, RecvOutcome};

/// A raw packet socket receiving all protocols on one interface.
///
/// The descriptor is exclusively owned and closed on drop.
pub struct PacketSocket {
    fd: RawFd,
}

impl PacketSocket {
    /// Open an unbound raw socket for all link-layer protocols.
    pub fn open() -> io::Result<Self> {
        let protocol = i32::from((libc::ETH_P_ALL as u16).to_be());
        let fd = unsafe { libc::socket(libc::PF_PACKET, libc::SOCK_RAW, protocol) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(PacketSocket { fd })
    }

    pub fn raw_fd(&self) -> RawFd {
        self.fd
    }

    /// Scope reception and transmission to a single interface index.
    pub fn bind_to(&self, ifindex: u32) -> io::Result<()> {
        let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
        addr.sll_family = libc::AF_PACKET as u16;
        addr.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
        addr.sll_ifindex = ifindex as i32;

        let rc = unsafe {
            libc::bind(
                self.fd,
                &addr as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Switch the socket to non-blocking mode so a receive attempt with no
    /// queued data returns immediately instead of suspending the poll loop.
    pub fn set_nonblocking(&self) -> io::Result<()> {
        let flags = unsafe { libc::fcntl(self.fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        let rc = unsafe { libc::fcntl(self.fd, libc::F_SETFL, flags | libc::O_NONBLOCK) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Fetch the interface's hardware (MAC) address via SIOCGIFHWADDR.
    pub fn hardware_address(&self, name: &str) -> io::Result<MacAddr6> {
        let mut req: libc::ifreq = unsafe { mem::zeroed() };
        let bytes = name.as_bytes();
        if bytes.len() >= req.ifr_name.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "interface name too long",
            ));
        }
        for (dst, src) in req.ifr_name.iter_mut().zip(bytes) {
            *dst = *src as libc::c_char;
        }

        let rc = unsafe { libc::ioctl(self.fd, libc::SIOCGIFHWADDR, &mut req) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }

        let raw = unsafe { req.ifr_ifru.ifru_hwaddr.sa_data };
        let mut mac = [0u8; HWADDR_LEN];
        for (dst, src) in mac.iter_mut().zip(raw.iter()) {
            *dst = *src as u8;
        }
        Ok(MacAddr6::from(mac))
    }
}

impl FrameChannel for PacketSocket {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::send(self.fd, frame.as_ptr() as *const libc::c_void, frame.len(), 0) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }

    fn receive(&mut self) -> RecvOutcome {
        let mut buf = [0u8; FRAME_BUFFER_SIZE];
        let n = unsafe { libc::recv(self.fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len(), 0) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return RecvOutcome::NoData;
            }
            return RecvOutcome::Failed(err);
        }
        // A packet socket never returns an empty frame; 0 here means there
        // is nothing to hand upward, same as EAGAIN.
        if n == 0 {
            return RecvOutcome::NoData;
        }
        RecvOutcome::Frame(buf[..n as usize].to_vec())
    }
}

impl Drop for PacketSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

/// Resolve an interface name to its numeric index.
pub fn interface_index(name: &str) -> io::Result<u32> {
    let cname = CString::new(name)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "interface name contains NUL"))?;
    match unsafe { libc::if_nametoindex(cname.as_ptr()) } {
        0 => Err(io::Error::last_os_error()),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_index_resolves_loopback() {
        // "lo" always exists on Linux and needs no privileges to look up.
        let index = interface_index("lo").unwrap();
        assert!(index >= 1);
    }

    #[test]
    fn test_interface_index_rejects_unknown_name() {
        assert!(interface_index("no-such-interface0").is_err());
    }

    #[test]
    fn test_interface_index_rejects_embedded_nul() {
        let err = interface_index("eth\0garbage").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
