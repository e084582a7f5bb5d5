//! Core domain types and collaborator traits for the Gotify alert action.
//!
//! This module defines the data that flows through a single alert
//! invocation and the trait contracts that decouple the pipeline from the
//! invoking host and from the HTTP transport.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw per-alert parameters, before global-settings resolution.
///
/// In hosted mode these come from the host's parameter lookup
/// ([`AlertParams::from_host`]); in standalone mode they are deserialized
/// from the `configuration` object of the alert document on stdin.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertParams {
    /// Base URL of the Gotify server, overriding the global setting.
    pub url: Option<String>,
    /// Application token, overriding the global setting.
    pub token: Option<String>,
    /// Notification body text.
    pub message: Option<String>,
    /// Notification title.
    pub title: Option<String>,
    /// Textual integer priority. Alert documents may carry this as a JSON
    /// number; it is normalized to its decimal string form.
    #[serde(deserialize_with = "priority_from_text_or_number")]
    pub priority: Option<String>,
    /// TLS certificate verification flag, as a string or a boolean.
    pub ssl_verify: Option<SslVerify>,
}

impl AlertParams {
    /// Collects the per-alert parameters from a host's parameter lookup.
    pub fn from_host(host: &dyn AlertHost) -> Self {
        Self {
            url: host.param("url"),
            token: host.param("token"),
            message: host.param("message"),
            title: host.param("title"),
            priority: host.param("priority"),
            ssl_verify: host.param("ssl_verify").map(SslVerify::Text),
        }
    }
}

/// The two shapes the SSL verification setting can arrive in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SslVerify {
    Bool(bool),
    Text(String),
}

fn priority_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// A fully resolved alert configuration.
///
/// Produced by validation; `endpoint_url` and `app_token` are guaranteed
/// non-empty by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// Base URL of the Gotify server.
    pub endpoint_url: String,
    /// Application token sent in the `X-Gotify-Key` header.
    pub app_token: String,
    /// Notification body text.
    pub message: String,
    /// Notification title; `None` or empty means omit from the payload.
    pub title: Option<String>,
    /// Textual integer priority, converted at payload-build time.
    pub priority: String,
    /// Raw TLS verification flag, normalized later.
    pub ssl_verify: Option<SslVerify>,
}

/// The JSON body POSTed to the Gotify `/message` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPayload {
    pub message: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Everything the dispatcher needs for one outbound POST.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    /// Full target URL, already suffixed with `/message`.
    pub endpoint: String,
    /// Application token for the `X-Gotify-Key` header.
    pub token: String,
    /// Whether to verify the server's TLS certificate.
    pub verify_tls: bool,
    pub payload: NotificationPayload,
}

/// The classified result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The server answered HTTP 200.
    Delivered,
    /// The server answered with any other status; never retried.
    RejectedByServer { status: u16, body: String },
    /// The request never produced a server response.
    TransportFailure {
        kind: TransportErrorKind,
        detail: String,
    },
}

/// Why a dispatch attempt failed below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// TLS certificate verification failed.
    Tls,
    /// Connection refused, timeout, DNS failure, and similar.
    Network,
    /// Anything else, including client construction failures.
    Unexpected,
}

/// The integer result-code contract with the invoking host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    DeliveryFailed,
    InvalidParams,
    IntegrationError,
    UnexpectedError,
}

impl ActionStatus {
    /// The process exit code reported to the host.
    pub fn code(self) -> i32 {
        match self {
            ActionStatus::Success => 0,
            ActionStatus::DeliveryFailed => 1,
            ActionStatus::InvalidParams => 3,
            ActionStatus::IntegrationError => 4,
            ActionStatus::UnexpectedError => 5,
        }
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// The invoking host's side of the contract: parameter and global-setting
/// lookups plus the logging sink. All user-visible output of the pipeline
/// goes through `log_info`/`log_error`.
pub trait AlertHost {
    /// Returns a per-alert parameter, if the host has one.
    fn param(&self, key: &str) -> Option<String>;
    /// Returns a global setting, if the host has one.
    fn global_setting(&self, key: &str) -> Option<String>;
    fn log_info(&self, message: &str);
    fn log_error(&self, message: &str);
}

/// Delivers one notification and classifies the outcome.
pub trait NotificationSender {
    fn send(&self, request: &DispatchRequest) -> DispatchOutcome;
}
