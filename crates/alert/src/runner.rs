use crate::AlertError;
use crate::config::AlertConfig;
use crate::logging::Logger;
use crate::telephony::{CallPlacer, CallSid, Credentials, TelephonyError};

/// Construct a client from the config credentials and place a single call.
///
/// Config values are read before the client is built, so a missing key never
/// results in a request.
pub fn place_alert_call<C, F>(
  cfg: &AlertConfig,
  log: &Logger,
  connect: F,
) -> Result<CallSid, AlertError>
where
  C: CallPlacer,
  F: FnOnce(Credentials) -> Result<C, TelephonyError>,
{
  let extracted = cfg
    .check_required()
    .and_then(|()| Ok((cfg.credentials()?, cfg.call_request()?)));
  let (credentials, request) = match extracted {
    Ok(pair) => pair,
    Err(err) => {
      crate::log_error!(log, "Error reading config file. {}: {}", err.kind(), err);
      return Err(err.into());
    }
  };

  let client = connect(credentials)?;
  crate::log_debug!(log, "client={:?}", client);

  let call = client.place_call(&request)?;
  crate::log_debug!(log, "call={:?}", call);
  crate::log_info!(log, "Call placed, sid = {}", call.sid);
  Ok(call.sid)
}
