//! Interface discovery: turn the host's reported interfaces into devices.

use std::io;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use macaddr::MacAddr6;
use nix::ifaddrs::getifaddrs;

use crate::common::globals::IGNORE_INTERFACES;
use crate::netdev::channel::{interface_index, PacketSocket};
use crate::netdev::device::{FrameChannel, NetDevice};
use crate::netdev::registry::DeviceRegistry;

/// What the per-interface channel setup sequence produced.
///
/// Fatal failures (socket open, index resolution, bind) surface as `Err`
/// from the setup function itself; a missing hardware address is not fatal
/// for discovery as a whole, so it gets its own variant.
enum Setup {
    Ready {
        channel: Box<dyn FrameChannel>,
        hwaddr: MacAddr6,
        descriptor: i32,
    },
    NoHardwareAddress(io::Error),
}

/// Enumerate the host's link-layer interfaces and register a device for each
/// usable one.
///
/// Socket, index, and bind failures abort discovery entirely: they mean raw
/// capture itself is broken, so no later interface can be trusted either. A
/// missing hardware address only disqualifies that one interface.
pub fn discover(registry: &mut DeviceRegistry, extra_ignores: &[String]) -> Result<()> {
    let addrs = getifaddrs().context("failed to enumerate network interfaces")?;

    // Only the link-layer (AF_PACKET) entry for each interface matters
    // here; the same name also shows up with AF_INET/AF_INET6 entries.
    let names = addrs.filter_map(|ifaddr| {
        ifaddr
            .address
            .as_ref()
            .and_then(|addr| addr.as_link_addr())
            .is_some()
            .then_some(ifaddr.interface_name)
    });

    register_interfaces(registry, names, extra_ignores, &mut open_channel)
}

/// Apply the ignore and duplicate policies, run the setup sequence for each
/// surviving interface, and register the resulting devices.
fn register_interfaces<I>(
    registry: &mut DeviceRegistry,
    interfaces: I,
    extra_ignores: &[String],
    setup: &mut dyn FnMut(&str) -> Result<Setup>,
) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    for name in interfaces {
        if is_ignored(&name, extra_ignores) {
            info!("skipping ignored interface {}", name);
            continue;
        }
        if registry.contains(&name) {
            warn!("duplicate interface entry for {}, keeping the first", name);
            continue;
        }

        match setup(&name)? {
            Setup::Ready {
                channel,
                hwaddr,
                descriptor,
            } => {
                info!(
                    "registered device {} (fd {}, hwaddr {})",
                    name, descriptor, hwaddr
                );
                registry.insert(NetDevice::new(name, hwaddr, channel));
            }
            Setup::NoHardwareAddress(err) => {
                // No resolvable hardware address means the interface cannot
                // do link-layer send/receive. The channel is already gone;
                // move on to the next interface.
                warn!("no hardware address for {} ({}), skipping", name, err);
            }
        }
    }

    Ok(())
}

/// The production setup sequence: open, resolve index, bind, fetch the
/// hardware address, switch to non-blocking.
fn open_channel(name: &str) -> Result<Setup> {
    let socket = PacketSocket::open()
        .with_context(|| format!("failed to open raw socket for {}", name))?;
    let index = interface_index(name)
        .with_context(|| format!("failed to resolve index of {}", name))?;
    debug!("{}: interface index {}", name, index);
    socket
        .bind_to(index)
        .with_context(|| format!("failed to bind raw socket to {}", name))?;

    // Dropping the socket here closes it before any device is constructed.
    let hwaddr = match socket.hardware_address(name) {
        Ok(hwaddr) => hwaddr,
        Err(err) => return Ok(Setup::NoHardwareAddress(err)),
    };

    socket
        .set_nonblocking()
        .with_context(|| format!("failed to set {} non-blocking", name))?;

    let descriptor = socket.raw_fd();
    Ok(Setup::Ready {
        channel: Box::new(socket),
        hwaddr,
        descriptor,
    })
}

/// Exact-match check against the built-in ignore set plus any CLI extras.
fn is_ignored(name: &str, extra_ignores: &[String]) -> bool {
    IGNORE_INTERFACES.contains(&name) || extra_ignores.iter().any(|ignored| ignored == name)
}
