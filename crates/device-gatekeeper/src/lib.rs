//! Device-access gatekeeper.
//!
//! A filter that decides, once per device at attach time, whether the device
//! is on the operator's affected list, and if so denies every attempt to open
//! a handle to it. Devices that are not affected cause the filter to reject
//! its own attachment, leaving them completely unmediated.
//!
//! The decision is never revisited: an attached device keeps its verdict
//! until it is removed and re-enumerated, even if the configured list changes
//! in the meantime.

pub mod app;
pub mod checker;
pub mod config;
pub mod device;
pub mod host;
pub mod interceptor;
pub mod lifecycle;
pub mod registry;
