use crate::{
  checker::{self, Verdict},
  config::{ConfigError, ConfigStore, HardwareId},
  device::{DeviceContext, DeviceHandle},
  host::{DeviceInit, DeviceNode, HostError, DEVICE_INTERFACE_CLASS},
  interceptor::{AccessDenied, OpenDisposition, OpenInterceptor},
  registry::DeviceRegistry,
};
use thiserror::Error;
use tracing::{event, Level};

/// Why an attach failed before a verdict could be produced.
///
/// Each variant maps to one hard-dependency step of the attach sequence; the
/// step's own error is propagated verbatim and the host decides whether to
/// rebuild the stack. A config failure is deliberately distinct from a
/// `NotAffected` verdict: a broken list must not mean "let everything
/// through".
#[derive(Debug, Error)]
pub enum AttachError {
  #[error("failed to register as a device stack filter")]
  RegisterFilter(#[source] HostError),

  #[error("failed to create the device object")]
  CreateDevice(#[source] HostError),

  #[error("failed to publish the device interface")]
  PublishInterface(#[source] HostError),

  #[error("failed to query the device hardware identifier")]
  QueryHardwareId(#[source] HostError),

  #[error("failed to initialize the request forwarding queue")]
  QueueInit(#[source] HostError),

  #[error("failed to read the affected device list")]
  Config(#[from] ConfigError),
}

/// Result of a structurally successful attach.
#[derive(Debug)]
pub enum AttachOutcome {
  /// The device matched the affected list. The filter stays in the stack and
  /// every open attempt against the device is denied from now on.
  Attached(DeviceContext),

  /// The device is not affected. The caller should drop the device node,
  /// detaching the filter and leaving the device fully unmediated.
  Rejected { hardware_id: HardwareId },
}

impl AttachOutcome {
  pub fn is_attached(&self) -> bool {
    matches!(self, AttachOutcome::Attached(_))
  }
}

/// Orchestrates per-device attach and routes open attempts.
///
/// Attach runs once per device and is never re-entered for the same device;
/// open attempts may arrive concurrently and only read frozen state.
pub struct DeviceLifecycleManager<S> {
  store: S,
  registry: DeviceRegistry,
  interceptor: OpenInterceptor,
}

impl<S: ConfigStore> DeviceLifecycleManager<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      registry: DeviceRegistry::new(),
      interceptor: OpenInterceptor::new(),
    }
  }

  pub fn registry(&self) -> &DeviceRegistry {
    &self.registry
  }

  /// Attaches this filter to one device stack.
  ///
  /// Runs the structural steps in order, each a hard dependency: filter
  /// registration, device creation, interface publication, hardware
  /// identifier query, forwarding queue setup. Any of them failing aborts
  /// the attach with that step's error and leaves no context behind.
  ///
  /// The affected verdict is then computed exactly once from a fresh config
  /// snapshot. Later changes to the store do not alter the verdict of an
  /// already attached device; it keeps enforcing (or staying detached) until
  /// the device is re-enumerated.
  pub async fn attach_device<I: DeviceInit>(
    &mut self,
    mut init: I,
  ) -> Result<AttachOutcome, AttachError> {
    init.register_filter().map_err(AttachError::RegisterFilter)?;

    let mut device = init.create_device().map_err(AttachError::CreateDevice)?;
    let handle = device.handle();

    // Published regardless of the verdict so the device path stays
    // enumerable; denial happens at open time.
    device
      .publish_interface(DEVICE_INTERFACE_CLASS)
      .map_err(AttachError::PublishInterface)?;

    let hardware_id = device.hardware_id().map_err(AttachError::QueryHardwareId)?;
    event!(
      target: "device-gatekeeper",
      Level::DEBUG,
      device.handle = %handle,
      device.hardware_id = %hardware_id,
      "queried device hardware identifier"
    );

    device
      .init_forward_queue()
      .map_err(AttachError::QueueInit)?;

    // The snapshot only lives for this one evaluation.
    let config = self.store.read().await?;
    let verdict = checker::evaluate(hardware_id, config.affected_devices());
    drop(config);

    match verdict {
      Verdict::Affected => {
        let context = DeviceContext::new(hardware_id, verdict);
        self.registry.insert(handle, context.clone());

        event!(
          target: "device-gatekeeper",
          Level::INFO,
          device.handle = %handle,
          device.hardware_id = %hardware_id,
          "device is affected, open requests will be denied"
        );

        Ok(AttachOutcome::Attached(context))
      }

      Verdict::NotAffected => {
        event!(
          target: "device-gatekeeper",
          Level::INFO,
          device.handle = %handle,
          device.hardware_id = %hardware_id,
          "device is not affected, detaching from its stack"
        );

        Ok(AttachOutcome::Rejected { hardware_id })
      }
    }
  }

  /// Drops the context of a removed device. Returns it if one was attached.
  pub fn detach_device(&mut self, handle: DeviceHandle) -> Option<DeviceContext> {
    self.registry.remove(handle)
  }

  /// Routes an open-handle attempt for the given device.
  ///
  /// Handles present in the registry belong to affected devices and are
  /// denied. Unknown handles belong to stacks this filter detached from, so
  /// the attempt passes through untouched.
  pub fn on_open_attempt(&self, handle: DeviceHandle) -> Result<(), AccessDenied> {
    match self.registry.get(handle) {
      Some(context) => match self.interceptor.on_open_attempt(context) {
        OpenDisposition::Deny => Err(AccessDenied),
      },
      None => Ok(()),
    }
  }
}
