fn main() {
  // Failures are already on the console and in the log file; only the code is left to report
  if let Err(err) = alert::run() {
    std::process::exit(err.exit_code());
  }
}
