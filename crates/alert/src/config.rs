use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::logging::Logger;
use crate::telephony::{CallRequest, Credentials};

/// Twilio REST endpoint used when the config does not set `api_base`.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Keys every alert config must provide.
pub const REQUIRED_KEYS: &[&str] = &["account_sid", "auth_token", "callto", "callfrom", "url"];

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {}", .path.display())]
  NotFound { path: PathBuf },
  #[error("permission denied reading {}", .path.display())]
  PermissionDenied { path: PathBuf },
  #[error("failed to read {}: {source}", .path.display())]
  Read { path: PathBuf, source: io::Error },
  #[error("invalid JSON in {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },
  #[error("config in {} is not a JSON object", .path.display())]
  NotAnObject { path: PathBuf },
  #[error("missing config key '{0}'")]
  MissingKey(String),
  #[error("config key '{0}' must be a string")]
  NotAString(String),
}

impl ConfigError {
  /// Short label for the failure, used in the log line.
  #[must_use]
  pub fn kind(&self) -> &'static str {
    match self {
      ConfigError::NotFound { .. } => "NotFound",
      ConfigError::PermissionDenied { .. } => "PermissionDenied",
      ConfigError::Read { .. } => "ReadError",
      ConfigError::Parse { .. } => "ParseError",
      ConfigError::NotAnObject { .. } => "NotAnObject",
      ConfigError::MissingKey(_) => "MissingKey",
      ConfigError::NotAString(_) => "NotAString",
    }
  }
}

/// Alert settings exactly as written in the JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
  values: Map<String, Value>,
}

impl AlertConfig {
  /// Parse a config from JSON text. `origin` only feeds error messages.
  pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
    let value: Value = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
      path: origin.to_path_buf(),
      source,
    })?;
    match value {
      Value::Object(values) => Ok(Self { values }),
      _ => Err(ConfigError::NotAnObject {
        path: origin.to_path_buf(),
      }),
    }
  }

  #[must_use]
  pub fn values(&self) -> &Map<String, Value> {
    &self.values
  }

  /// Return the string stored under `key`.
  pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
    match self.values.get(key) {
      Some(Value::String(s)) => Ok(s),
      Some(_) => Err(ConfigError::NotAString(key.to_string())),
      None => Err(ConfigError::MissingKey(key.to_string())),
    }
  }

  /// Check that every key in [`REQUIRED_KEYS`] is present and holds a string.
  pub fn check_required(&self) -> Result<(), ConfigError> {
    for key in REQUIRED_KEYS {
      self.get_str(key)?;
    }
    Ok(())
  }

  /// Provider base URL, falling back to [`DEFAULT_API_BASE`].
  pub fn api_base(&self) -> Result<&str, ConfigError> {
    match self.get_str("api_base") {
      Ok(base) => Ok(base),
      Err(ConfigError::MissingKey(_)) => Ok(DEFAULT_API_BASE),
      Err(err) => Err(err),
    }
  }

  pub fn credentials(&self) -> Result<Credentials, ConfigError> {
    Ok(Credentials {
      account_sid: self.get_str("account_sid")?.to_string(),
      auth_token: self.get_str("auth_token")?.to_string(),
      api_base: self.api_base()?.trim_end_matches('/').to_string(),
    })
  }

  pub fn call_request(&self) -> Result<CallRequest, ConfigError> {
    Ok(CallRequest {
      to: self.get_str("callto")?.to_string(),
      from: self.get_str("callfrom")?.to_string(),
      url: self.get_str("url")?.to_string(),
    })
  }
}

/// Read and parse the JSON config at `path`.
///
/// Any failure is logged at error level before being returned; callers treat
/// it as fatal. In debug mode the parsed config is echoed.
///
/// # Errors
/// Returns a [`ConfigError`] describing why the file could not be read or parsed.
pub fn load_config(path: &Path, log: &Logger) -> Result<AlertConfig, ConfigError> {
  let result = read_config(path);
  match &result {
    Ok(cfg) => crate::log_debug!(log, "config={:?}", cfg.values()),
    Err(err) => crate::log_error!(log, "Error reading config file. {}: {}", err.kind(), err),
  }
  result
}

fn read_config(path: &Path) -> Result<AlertConfig, ConfigError> {
  let text = fs::read_to_string(path).map_err(|source| match source.kind() {
    io::ErrorKind::NotFound => ConfigError::NotFound {
      path: path.to_path_buf(),
    },
    io::ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
      path: path.to_path_buf(),
    },
    _ => ConfigError::Read {
      path: path.to_path_buf(),
      source,
    },
  })?;
  AlertConfig::from_json(&text, path)
}
