//! Outbound calls through the Twilio REST API.
//!
//! Each invocation sends exactly one request: there is no retry loop and no
//! request timeout.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

/// Twilio's identifier for a placed call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CallSid(pub String);

impl std::fmt::Display for CallSid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Clone)]
pub struct Credentials {
  pub account_sid: String,
  pub auth_token: String,
  pub api_base: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("account_sid", &self.account_sid)
      .field("auth_token", &"<redacted>")
      .field("api_base", &self.api_base)
      .finish()
  }
}

/// Who to call, who is calling, and where Twilio fetches the call instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
  pub to: String,
  pub from: String,
  pub url: String,
}

/// Call resource returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Call {
  pub sid: CallSid,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub to: Option<String>,
  #[serde(default)]
  pub from: Option<String>,
}

#[derive(Debug, Error)]
pub enum TelephonyError {
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error("Twilio API error (status {status}){}: {message}", .code.map(|c| format!(" code {c}")).unwrap_or_default())]
  Api {
    status: StatusCode,
    code: Option<u32>,
    message: String,
  },
}

/// Places outbound calls. The production implementation is [`TwilioClient`].
pub trait CallPlacer: std::fmt::Debug {
  fn place_call(&self, request: &CallRequest) -> Result<Call, TelephonyError>;
}

/// Error body Twilio sends with non-2xx responses.
#[derive(Deserialize)]
struct ApiErrorBody {
  code: Option<u32>,
  message: Option<String>,
}

pub struct TwilioClient {
  client: Client,
  credentials: Credentials,
}

impl std::fmt::Debug for TwilioClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TwilioClient")
      .field("credentials", &self.credentials)
      .finish_non_exhaustive()
  }
}

impl TwilioClient {
  /// Build a client for the given account.
  ///
  /// # Errors
  /// Fails when the underlying HTTP client cannot be initialised.
  pub fn new(credentials: Credentials) -> Result<Self, TelephonyError> {
    let client = Client::builder()
      .user_agent(concat!("alert/", env!("CARGO_PKG_VERSION")))
      .timeout(None)
      .build()?;
    Ok(Self {
      client,
      credentials,
    })
  }

  fn calls_url(&self) -> String {
    format!(
      "{}/2010-04-01/Accounts/{}/Calls.json",
      self.credentials.api_base, self.credentials.account_sid
    )
  }
}

impl CallPlacer for TwilioClient {
  fn place_call(&self, request: &CallRequest) -> Result<Call, TelephonyError> {
    let response = self
      .client
      .post(self.calls_url())
      .basic_auth(
        &self.credentials.account_sid,
        Some(&self.credentials.auth_token),
      )
      .form(&[
        ("To", request.to.as_str()),
        ("From", request.from.as_str()),
        ("Url", request.url.as_str()),
      ])
      .send()?;

    if !response.status().is_success() {
      let status = response.status();
      let text = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
      let (code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => (body.code, body.message.unwrap_or(text)),
        Err(_) => (None, text),
      };
      return Err(TelephonyError::Api {
        status,
        code,
        message,
      });
    }

    Ok(response.json()?)
  }
}
