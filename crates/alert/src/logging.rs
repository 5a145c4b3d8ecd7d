//! Logging context for a single alert run.
//!
//! The logger is built once from the parsed arguments and passed by reference
//! to every component. It is never installed as the global `log` backend, so
//! the only lines written are the ones emitted through this context.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use env_logger::{Target, WriteStyle};
pub use log::Level;
use log::{LevelFilter, Log, Record};

use crate::cli::CliArgs;

/// Name shown in every formatted line.
pub const LOGGER_NAME: &str = "alert";

/// Fans each formatted line out to the console and, when available, the log file.
struct Sinks {
  console: Box<dyn Write + Send>,
  file: Option<File>,
}

impl Write for Sinks {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    // Each sink is written independently; a broken one never starves the other
    let console = self.console.write_all(buf);
    if let Some(file) = self.file.as_mut() {
      let _ = file.write_all(buf);
    }
    console.map(|()| buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    let console = self.console.flush();
    if let Some(file) = self.file.as_mut() {
      let _ = file.flush();
    }
    console
  }
}

pub struct Logger {
  inner: env_logger::Logger,
  level: LevelFilter,
  file_path: Option<PathBuf>,
}

impl std::fmt::Debug for Logger {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Logger")
      .field("name", &LOGGER_NAME)
      .field("level", &self.level)
      .field("file_path", &self.file_path)
      .finish()
  }
}

impl Logger {
  /// Configure console and file sinks from the command line.
  ///
  /// Failing to open the log file is not fatal: the error is reported on the
  /// console and the run continues with the console sink only.
  #[must_use]
  pub fn configure(args: &CliArgs) -> Self {
    Self::configure_with_console(args, Box::new(io::stderr()))
  }

  /// Same as [`Logger::configure`] but writes console lines to `console`.
  #[must_use]
  pub fn configure_with_console(args: &CliArgs, console: Box<dyn Write + Send>) -> Self {
    let level = if args.debug {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    };

    let (file, open_err) = match open_log_file(&args.log) {
      Ok(file) => (Some(file), None),
      Err(err) => (None, Some(err)),
    };
    let file_path = file.as_ref().map(|_| args.log.clone());

    let logger = Self {
      inner: build_inner(level, Sinks { console, file }),
      level,
      file_path,
    };

    if let Some(err) = open_err {
      crate::log_error!(
        logger,
        "Unable to open log file: {}, reason = {:?}: {}",
        args.log.display(),
        err.kind(),
        err
      );
    }
    if args.debug {
      crate::log_debug!(logger, "DEBUG enabled");
      crate::log_debug!(logger, "args={:?}", args);
    }
    logger
  }

  /// Path of the attached file sink, `None` when running console-only.
  #[must_use]
  pub fn file_path(&self) -> Option<&Path> {
    self.file_path.as_deref()
  }

  pub fn emit(&self, level: Level, args: std::fmt::Arguments<'_>) {
    self.inner.log(
      &Record::builder()
        .args(args)
        .level(level)
        .target(LOGGER_NAME)
        .build(),
    );
  }

  pub fn flush(&self) {
    self.inner.flush();
  }
}

fn open_log_file(path: &Path) -> io::Result<File> {
  OpenOptions::new().create(true).append(true).open(path)
}

fn build_inner(level: LevelFilter, sinks: Sinks) -> env_logger::Logger {
  env_logger::Builder::new()
    .filter_level(level)
    .write_style(WriteStyle::Never)
    .target(Target::Pipe(Box::new(sinks)))
    .format(|buf, record| {
      let ts = buf.timestamp_millis();
      writeln!(
        buf,
        "{} - {}:{} - {} - {}",
        ts,
        record.target(),
        std::process::id(),
        record.level(),
        record.args()
      )
    })
    .build()
}

// Leveled macros taking the logger explicitly: `log_info!(logger, "fmt", args..)`.

#[macro_export]
macro_rules! log_debug {
  ($logger:expr, $fmt:literal $(, $args:expr )* $(,)?) => {{
    $logger.emit($crate::logging::Level::Debug, format_args!($fmt $(, $args )*));
  }};
}

#[macro_export]
macro_rules! log_info {
  ($logger:expr, $fmt:literal $(, $args:expr )* $(,)?) => {{
    $logger.emit($crate::logging::Level::Info, format_args!($fmt $(, $args )*));
  }};
}

#[macro_export]
macro_rules! log_error {
  ($logger:expr, $fmt:literal $(, $args:expr )* $(,)?) => {{
    $logger.emit($crate::logging::Level::Error, format_args!($fmt $(, $args )*));
  }};
}
