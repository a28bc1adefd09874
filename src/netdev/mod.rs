//! Link-layer device management for linkmgr
//!
//! This module is the lowest layer of the stack and handles:
//! - The device data model and channel operations (`device`)
//! - The Linux AF_PACKET channel implementation (`channel`)
//! - Interface discovery and the ignore policy (`discovery`)
//! - The device registry (`registry`)
//! - The non-blocking poll loop (`poll`)
//!
//! Key types and functions are re-exported here for easier access.

// Declare submodules
pub mod channel;
pub mod device;
pub mod discovery;
pub mod poll;
pub mod registry;

// Re-export key components for convenience.
pub use device::{FrameChannel, NetDevice, RecvOutcome};
pub use discovery::discover;
pub use registry::DeviceRegistry;
