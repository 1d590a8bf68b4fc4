mod hardware_id;
mod parse;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::{
  fmt,
  path::{Path, PathBuf},
  sync::Arc,
};

pub use hardware_id::HardwareId;
pub use parse::{ConfigError, ConfigFormat, FormatError};

/// Ordered list of hardware identifiers subject to interception.
///
/// Operator configs are typically a handful of entries, so the list is kept
/// inline.
pub type AffectedList = SmallVec<[HardwareId; 4]>;

mod inner {
  use super::*;

  #[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
  #[serde(rename_all = "camelCase")]
  pub(super) struct Config {
    /// A missing key is the same as an empty list: nothing is affected.
    #[serde(default)]
    pub(super) affected_devices: AffectedList,
  }
}

#[derive(Clone, PartialEq)]
pub struct Config {
  inner: Arc<inner::Config>,
}

impl Config {
  /// Hardware identifiers whose devices get their open requests denied.
  pub fn affected_devices(&self) -> &[HardwareId] {
    &self.inner.affected_devices
  }

  /// Builds a config snapshot from an in-memory list.
  pub fn from_affected<I>(ids: I) -> Config
  where
    I: IntoIterator,
    I::Item: Into<HardwareId>,
  {
    inner::Config {
      affected_devices: ids.into_iter().map(Into::into).collect(),
    }
    .into()
  }
}

impl From<inner::Config> for Config {
  fn from(inner: inner::Config) -> Self {
    Self {
      inner: Arc::new(inner),
    }
  }
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.inner, f)
  }
}

impl Serialize for Config {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    Serialize::serialize(&*self.inner, serializer)
  }
}

impl<'de> Deserialize<'de> for Config {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    <inner::Config as Deserialize>::deserialize(deserializer).map(Self::from)
  }
}

impl Config {
  pub async fn read(file: impl AsRef<Path>, format: ConfigFormat) -> Result<Config, ConfigError> {
    parse::read_config(file, format).await
  }
}

/// Read access to the operator's affected-device configuration.
///
/// The gatekeeper reads the list exactly once per device attach; the returned
/// snapshot is scoped to that one evaluation. A read failure is surfaced as a
/// [`ConfigError`] and must never be collapsed into "nothing is affected".
#[async_trait]
pub trait ConfigStore: Send + Sync {
  async fn read(&self) -> Result<Config, ConfigError>;
}

/// [`ConfigStore`] backed by a config file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
  file: PathBuf,
  format: ConfigFormat,
}

impl FileConfigStore {
  pub fn new(file: impl Into<PathBuf>, format: ConfigFormat) -> Self {
    Self {
      file: file.into(),
      format,
    }
  }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
  async fn read(&self) -> Result<Config, ConfigError> {
    Config::read(&self.file, self.format).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_key_means_empty_list() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert!(config.affected_devices().is_empty());
  }

  #[test]
  fn entries_keep_their_configured_order() {
    let config: Config = serde_json::from_str(
      r#"{ "affectedDevices": ["VID_1234&PID_0001", "VID_5678&PID_0002"] }"#,
    )
    .unwrap();

    assert_eq!(config.affected_devices().len(), 2);
    assert_eq!(config.affected_devices()[0], "VID_1234&PID_0001");
    assert_eq!(config.affected_devices()[1], "VID_5678&PID_0002");
  }

  #[test]
  fn from_affected_round_trips() {
    let config = Config::from_affected(vec!["a", "b"]);
    assert_eq!(config.affected_devices().len(), 2);
    assert_eq!(config.affected_devices()[0], "a");
  }
}
