use std::path::Path;

use super::Config;
use thiserror::Error;
use tokio::{fs, io};
use tracing::{event, Level};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ConfigFormat {
  Json,
  Yaml,
  Toml,
  Auto,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Invalid config file extension when using auto format: {0}")]
  InvalidExtension(String),

  #[error("Config file does not have a file extension, and format is set to auto")]
  MissingExtension,

  #[error("Failed to parse config file")]
  ParseError(#[from] FormatError),

  #[error(transparent)]
  Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum FormatError {
  #[error(transparent)]
  JsonError(#[from] serde_json::Error),

  #[error(transparent)]
  YamlError(#[from] serde_yaml::Error),

  #[error(transparent)]
  TomlError(#[from] toml::de::Error),
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum ResolvedFormat {
  Json,
  Yaml,
  Toml,
}

impl ConfigFormat {
  fn resolve(self, file: &Path) -> Result<ResolvedFormat, ConfigError> {
    match self {
      ConfigFormat::Json => Ok(ResolvedFormat::Json),
      ConfigFormat::Yaml => Ok(ResolvedFormat::Yaml),
      ConfigFormat::Toml => Ok(ResolvedFormat::Toml),
      ConfigFormat::Auto => match file.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(ResolvedFormat::Json),
        Some("yaml") | Some("yml") => Ok(ResolvedFormat::Yaml),
        Some("toml") => Ok(ResolvedFormat::Toml),
        Some(other) => Err(ConfigError::InvalidExtension(other.into())),
        None => Err(ConfigError::MissingExtension),
      },
    }
  }
}

impl ResolvedFormat {
  fn parse(self, content: &[u8]) -> Result<Config, FormatError> {
    match self {
      ResolvedFormat::Json => Ok(serde_json::from_slice(content)?),
      ResolvedFormat::Yaml => Ok(serde_yaml::from_slice(content)?),
      ResolvedFormat::Toml => Ok(toml::from_slice(content)?),
    }
  }
}

pub(super) async fn read_config(
  file: impl AsRef<Path>,
  format: ConfigFormat,
) -> Result<Config, ConfigError> {
  let file = file.as_ref();

  let result = match format.resolve(file) {
    Ok(resolved) => match fs::read(file).await {
      Ok(content) => resolved.parse(&content).map_err(ConfigError::from),
      Err(error) => Err(error.into()),
    },
    Err(error) => Err(error),
  };

  match result {
    Ok(config) => {
      event!(
        target: "device-gatekeeper",
        Level::INFO,
        affected.len = config.affected_devices().len(),
        "Loaded affected device list"
      );
      Ok(config)
    }
    Err(error) => {
      event!(target: "device-gatekeeper", Level::ERROR, ?error, "Failed to read config file");
      Err(error)
    }
  }
}
