//! Seams towards the hosting device-stack machinery.
//!
//! Device-object creation, interface publication, the property store and the
//! request-forwarding queue all live outside this crate. The gatekeeper only
//! drives them through these traits, which is also what makes the attach flow
//! testable without a real device stack.

use crate::{config::HardwareId, device::DeviceHandle};
use std::fmt;
use thiserror::Error;

/// Interface class identifier published for every device this filter attaches
/// to, so user-mode software can enumerate filtered device paths. Publication
/// is independent of the affected verdict: denial happens at open time, not
/// at enumeration time.
pub const DEVICE_INTERFACE_CLASS: InterfaceClass =
  InterfaceClass::new("0a5cf306-7bba-47b6-9e6a-2a7a9c9be245");

/// A well-known device interface class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceClass(&'static str);

impl InterfaceClass {
  pub const fn new(guid: &'static str) -> Self {
    InterfaceClass(guid)
  }

  pub fn as_str(&self) -> &'static str {
    self.0
  }
}

impl fmt::Display for InterfaceClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.0)
  }
}

/// Failure reported by a host collaborator.
#[derive(Debug, Error)]
pub enum HostError {
  #[error("host object is no longer available")]
  Unavailable,

  #[error("device property {property:?} is not present in the property store")]
  PropertyMissing { property: &'static str },

  #[error("device property {property:?} is not a valid string")]
  InvalidPropertyValue { property: &'static str },

  #[error("host reported failure status {status:#010x}")]
  Status { status: u32 },
}

/// One-shot token for a pending device-stack attach.
///
/// Consumed by [`crate::lifecycle::DeviceLifecycleManager::attach_device`];
/// there is no retry, a failed step fails the whole attach.
pub trait DeviceInit {
  type Device: DeviceNode;

  /// Registers this filter in the device stack. Registration is
  /// non-exclusive: other filters may sit above or below in the same stack.
  fn register_filter(&mut self) -> Result<(), HostError>;

  /// Creates the device object this filter operates as.
  fn create_device(self) -> Result<Self::Device, HostError>;
}

/// The created device object and its host-side services.
pub trait DeviceNode {
  fn handle(&self) -> DeviceHandle;

  /// Publishes a device interface of the given class.
  fn publish_interface(&mut self, class: InterfaceClass) -> Result<(), HostError>;

  /// Queries the device's hardware identifier from its property store. The
  /// returned identifier stays valid for the device context's lifetime.
  fn hardware_id(&self) -> Result<HardwareId, HostError>;

  /// Initializes the queue that forwards non-open I/O down the stack.
  fn init_forward_queue(&mut self) -> Result<(), HostError>;
}
