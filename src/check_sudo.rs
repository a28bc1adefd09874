use nix::unistd::Uid;

/// Check if the current process is running as root
/// Raw packet sockets require root (or CAP_NET_RAW), so this gates startup.
pub fn is_root() -> bool {
    Uid::effective().is_root()
}
