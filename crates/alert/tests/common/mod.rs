#![allow(dead_code)]
use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

pub const CALL_SID: &str = "CA0123456789abcdef0123456789abcdef";

#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("alert-test-")
      .tempdir()
      .expect("temp dir");
    Self { temp }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn config_path(&self) -> PathBuf {
    self.path().join("alert.json")
  }

  pub fn log_path(&self) -> PathBuf {
    self.path().join("alert.log")
  }

  pub fn write_config(&self, contents: &str) -> Result<()> {
    std::fs::write(self.config_path(), contents).context("write test config")
  }

  /// Write a complete config whose provider base URL points at `api_base`.
  pub fn write_valid_config(&self, api_base: &str) -> Result<()> {
    let cfg = json!({
      "account_sid": "ACtest",
      "auth_token": "secret",
      "callto": "+15551234567",
      "callfrom": "+15557654321",
      "url": "http://demo.twilio.com/docs/voice.xml",
      "api_base": api_base,
    });
    self.write_config(&cfg.to_string())
  }

  pub fn read_log(&self) -> Result<String> {
    std::fs::read_to_string(self.log_path()).context("read log file")
  }

  /// `alert` with `-c` and `--log` pointing into the sandbox.
  pub fn alert(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("alert")?;
    cmd.current_dir(self.path());
    cmd.arg("-c").arg(self.config_path());
    cmd.arg("--log").arg(self.log_path());
    Ok(cmd)
  }

  /// `alert` without any arguments added.
  pub fn bare_alert(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("alert")?;
    cmd.current_dir(self.path());
    Ok(cmd)
  }
}
