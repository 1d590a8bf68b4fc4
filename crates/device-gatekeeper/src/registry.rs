use crate::device::{DeviceContext, DeviceHandle};
use std::collections::BTreeMap;
use tracing::{event, Level};

/// Arena of device contexts, keyed by device handle.
///
/// Only affected devices ever get a context registered; contexts are
/// exclusively owned per device and removed when the device goes away.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
  devices: BTreeMap<DeviceHandle, DeviceContext>,
}

impl DeviceRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn insert(&mut self, handle: DeviceHandle, context: DeviceContext) {
    event!(
      target: "device-gatekeeper",
      Level::DEBUG,
      device.handle = %handle,
      device.hardware_id = %context.hardware_id(),
      "device registered for interception"
    );

    self.devices.insert(handle, context);
  }

  pub(crate) fn remove(&mut self, handle: DeviceHandle) -> Option<DeviceContext> {
    let context = self.devices.remove(&handle);

    if let Some(context) = &context {
      event!(
        target: "device-gatekeeper",
        Level::DEBUG,
        device.handle = %handle,
        device.hardware_id = %context.hardware_id(),
        "device removed from interception registry"
      );
    }

    context
  }

  pub fn get(&self, handle: DeviceHandle) -> Option<&DeviceContext> {
    self.devices.get(&handle)
  }

  pub fn handles(&self) -> Vec<DeviceHandle> {
    self.devices.keys().copied().collect()
  }

  pub fn len(&self) -> usize {
    self.devices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.devices.is_empty()
  }
}
