use thiserror::Error;

pub mod cli;
pub mod config;
pub mod logging;
pub mod runner;
pub mod telephony;

use crate::cli::{APP_NAME, CliArgs};
use crate::config::{ConfigError, load_config};
use crate::logging::Logger;
use crate::telephony::{CallPlacer, CallSid, Credentials, TelephonyError, TwilioClient};

/// Exit code when the config file cannot be loaded.
pub const EXIT_CONFIG: i32 = 1;
/// Exit code when the provider could not place the call.
pub const EXIT_TELEPHONY: i32 = 3;

#[derive(Debug, Error)]
pub enum AlertError {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("failed to place alert call: {0}")]
  Telephony(#[from] TelephonyError),
}

impl AlertError {
  #[must_use]
  pub fn exit_code(&self) -> i32 {
    match self {
      AlertError::Config(_) => EXIT_CONFIG,
      AlertError::Telephony(_) => EXIT_TELEPHONY,
    }
  }
}

/// Parse the command line, set up logging and place the alert call.
pub fn run() -> Result<CallSid, AlertError> {
  let args = cli::parse();
  let log = Logger::configure(&args);
  let result = run_with(&args, &log, TwilioClient::new);
  log.flush();
  result
}

/// Run the alert flow with an explicit logger and telephony connector.
pub fn run_with<C, F>(args: &CliArgs, log: &Logger, connect: F) -> Result<CallSid, AlertError>
where
  C: CallPlacer,
  F: FnOnce(Credentials) -> Result<C, TelephonyError>,
{
  let cfg = load_config(&args.config, log)?;
  crate::log_info!(log, "{} version {}", APP_NAME, env!("CARGO_PKG_VERSION"));

  let result = runner::place_alert_call(&cfg, log, connect);
  if let Err(AlertError::Telephony(err)) = &result {
    crate::log_error!(log, "Alert call failed: {}", err);
  }
  result
}
