// Application metadata
pub const APP_NAME: &str = "linkmgr";

// Network settings
pub const FRAME_BUFFER_SIZE: usize = 1550; // Large enough for a full Ethernet frame
pub const HWADDR_LEN: usize = 6; // Link-layer (MAC) address length in bytes

// Interfaces that lack usable hardware addressing or otherwise break raw
// capture. Matched exactly against the OS-reported interface name.
pub const IGNORE_INTERFACES: &[&str] = &["lo", "bond0", "dummy0", "tunl0", "sit0"];

// Error messages
pub const ERROR_PERMISSION_DENIED: &str =
    "Permission denied. Raw packet sockets require root (CAP_NET_RAW).";
pub const ERROR_NO_DEVICE: &str = "No usable network interface found.";
