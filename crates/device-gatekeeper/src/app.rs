mod args;

use self::args::{Args, LogFormat};
use crate::{
  checker::{self, Verdict},
  config::{Config, HardwareId},
};
use anyhow::Result;
use clap::Clap;
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

pub async fn run() -> Result<()> {
  let args = Args::parse();
  let filter = EnvFilter::from_default_env()
    // Set the base level when not matched by other directives to INFO.
    .add_directive(tracing::Level::INFO.into());

  match args.log_format {
    LogFormat::Pretty => {
      tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    LogFormat::Json => {
      tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_span_list(false)
        .init();
    }
  }

  let config = Config::read(&args.config_file, args.config_format.into()).await?;

  for id in &args.hardware_ids {
    let id = HardwareId::new(id);

    match checker::evaluate(id, config.affected_devices()) {
      Verdict::Affected => {
        event!(
          target: "device-gatekeeper",
          Level::INFO,
          hardware_id = %id,
          "affected: open requests to devices with this identifier will be denied"
        );
      }
      Verdict::NotAffected => {
        event!(
          target: "device-gatekeeper",
          Level::INFO,
          hardware_id = %id,
          "not affected: the filter will detach from devices with this identifier"
        );
      }
    }
  }

  Ok(())
}
