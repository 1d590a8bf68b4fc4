use crate::{checker::Verdict, config::HardwareId};
use std::{fmt, sync::Arc};

/// Opaque identity of one device-stack attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceHandle(u64);

impl DeviceHandle {
  pub const fn new(raw: u64) -> Self {
    DeviceHandle(raw)
  }

  pub const fn raw(self) -> u64 {
    self.0
  }
}

impl fmt::Display for DeviceHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:#x}", self.0)
  }
}

#[derive(Debug)]
struct Inner {
  hardware_id: HardwareId,
  verdict: Verdict,
}

/// Per-device record created during attach.
///
/// The verdict is computed exactly once, before the attach outcome is
/// reported, and the context is immutable from then on. Clones share the
/// same frozen record, which is what makes concurrent open-attempt checks
/// safe without locking.
#[derive(Clone)]
pub struct DeviceContext(Arc<Inner>);

impl DeviceContext {
  pub(crate) fn new(hardware_id: HardwareId, verdict: Verdict) -> Self {
    DeviceContext(Arc::new(Inner {
      hardware_id,
      verdict,
    }))
  }

  pub fn hardware_id(&self) -> HardwareId {
    self.0.hardware_id
  }

  pub fn verdict(&self) -> Verdict {
    self.0.verdict
  }

  pub fn is_affected(&self) -> bool {
    self.0.verdict.is_affected()
  }
}

impl fmt::Debug for DeviceContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.0, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_share_the_same_verdict() {
    let context = DeviceContext::new(HardwareId::new("VID_1234&PID_0001"), Verdict::Affected);
    let clone = context.clone();

    assert!(clone.is_affected());
    assert_eq!(clone.hardware_id(), context.hardware_id());
  }

  #[test]
  fn handle_display_is_hex() {
    assert_eq!(DeviceHandle::new(0x2a).to_string(), "0x2a");
  }
}
