use crate::netdev::device::NetDevice;

/// Owns every registered device.
///
/// Insertion puts the newest device at the traversal head; order carries no
/// meaning beyond being stable, the poll loop only needs full coverage.
/// Devices are never removed while the process runs.
pub struct DeviceRegistry {
    devices: Vec<NetDevice>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        DeviceRegistry {
            devices: Vec::new(),
        }
    }

    /// Register a device. Returns false (and drops the device, closing its
    /// channel) if a device with the same name already exists; the first
    /// registration wins.
    pub fn insert(&mut self, device: NetDevice) -> bool {
        if self.contains(device.name()) {
            return false;
        }
        self.devices.insert(0, device);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.devices.iter().any(|dev| dev.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetDevice> {
        self.devices.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NetDevice> {
        self.devices.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
