use crate::device::DeviceContext;
use thiserror::Error;
use tracing::{event, Level};

/// Completion status handed to every open attempt against an affected device.
///
/// Denial is synchronous and final: no partial success, no retry hint, and
/// the caller cannot cancel it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("access denied")]
pub struct AccessDenied;

/// What to do with a pending open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenDisposition {
  /// Complete the request with [`AccessDenied`].
  Deny,
}

/// Catches open-handle attempts against affected devices.
///
/// Only wired for devices whose attach outcome was `Attached`; the filter is
/// gone from every other stack, so there is nothing to consult for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenInterceptor;

impl OpenInterceptor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Denies the open attempt without inspecting any part of the request.
  ///
  /// Reads only the frozen device context, so concurrent invocations from
  /// unrelated callers need no synchronization, and every repeated attempt
  /// independently gets the same answer.
  pub fn on_open_attempt(&self, context: &DeviceContext) -> OpenDisposition {
    event!(
      target: "device-gatekeeper",
      Level::DEBUG,
      device.hardware_id = %context.hardware_id(),
      "open attempt blocked"
    );

    OpenDisposition::Deny
  }
}
