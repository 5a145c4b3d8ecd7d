use std::path::PathBuf;

use clap::Parser;

pub const APP_NAME: &str = "Twilio Alert Script";
pub const DEFAULT_CONFIG_FILE: &str = "/usr/local/etc/alert.json";
pub const DEFAULT_LOG_FILE: &str = "/var/log/alert.log";

/// Twilio Alert Script - place a phone call to alert an operator.
#[derive(Debug, Clone, Parser)]
#[command(
  version,
  about = APP_NAME,
  long_about = None,
  after_help = concat!("Version ", env!("CARGO_PKG_VERSION"))
)]
pub struct CliArgs {
  /// Path to config file
  #[arg(short = 'c', value_name = "CONFIGFILE", default_value = DEFAULT_CONFIG_FILE)]
  pub config: PathBuf,

  /// Path to log file
  #[arg(long = "log", value_name = "LOGFILE", default_value = DEFAULT_LOG_FILE)]
  pub log: PathBuf,

  /// Enable debugging of this script
  #[arg(long)]
  pub debug: bool,
}

#[must_use]
pub fn parse() -> CliArgs {
  CliArgs::parse()
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::error::ErrorKind;

  #[test]
  fn defaults_point_at_system_paths() {
    let args = CliArgs::try_parse_from(["alert"]).expect("parse defaults");
    assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    assert_eq!(args.log, PathBuf::from(DEFAULT_LOG_FILE));
    assert!(!args.debug);
  }

  #[test]
  fn explicit_paths_and_debug_flag() {
    let args = CliArgs::try_parse_from([
      "alert",
      "-c",
      "/tmp/alert.json",
      "--log",
      "/tmp/alert.log",
      "--debug",
    ])
    .expect("parse explicit args");
    assert_eq!(args.config, PathBuf::from("/tmp/alert.json"));
    assert_eq!(args.log, PathBuf::from("/tmp/alert.log"));
    assert!(args.debug);
  }

  #[test]
  fn unknown_flag_is_rejected() {
    let err = CliArgs::try_parse_from(["alert", "--bogus"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
  }

  #[test]
  fn missing_option_value_is_rejected() {
    let err = CliArgs::try_parse_from(["alert", "-c"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
  }

  #[test]
  fn version_and_help_short_circuit() {
    let err = CliArgs::try_parse_from(["alert", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    assert_eq!(err.exit_code(), 0);

    let err = CliArgs::try_parse_from(["alert", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert_eq!(err.exit_code(), 0);
  }
}
