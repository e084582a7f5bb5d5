//! Parameter resolution and validation.
//!
//! Merges per-alert parameters with global settings, checks the mandatory
//! fields before any network activity, and normalizes the loosely-typed
//! SSL verification flag.

use crate::core::{AlertConfig, AlertHost, AlertParams, SslVerify};
use thiserror::Error;

/// String values that disable TLS verification. Everything else enables it;
/// the UI only offers true/false, the extra spellings support legacy
/// stanza-file overrides.
const SSL_VERIFY_DENY_LIST: [&str; 7] = ["0", "false", "False", "FALSE", "no", "No", "NO"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message is a mandatory parameter, but no value was provided")]
    MissingMessage,

    #[error("priority is a mandatory parameter, but no value was provided")]
    MissingPriority,

    #[error("Gotify server URL must be specified either in the alert configuration or in global settings")]
    MissingUrl,

    #[error("Gotify app token must be specified either in the alert configuration or in global settings")]
    MissingToken,
}

/// Fills in `url` and `token` from the host's global settings when the
/// per-alert values are absent or empty. The global lookup is not consulted
/// when a per-alert value is present.
pub fn resolve(mut params: AlertParams, host: &dyn AlertHost) -> AlertParams {
    if is_blank(&params.url) {
        params.url = host.global_setting("gotify_url");
        host.log_info("Using global Gotify URL setting");
    }

    if is_blank(&params.token) {
        params.token = host.global_setting("gotify_token");
        host.log_info("Using global Gotify token setting");
    }

    params
}

/// Checks the mandatory fields and produces the resolved configuration.
///
/// Checks run in a fixed order (message, priority, URL, token) and stop at
/// the first failure, so exactly one reason is reported even when several
/// fields are missing.
pub fn validate(params: AlertParams) -> Result<AlertConfig, ValidationError> {
    let message = present(params.message).ok_or(ValidationError::MissingMessage)?;
    let priority = present(params.priority).ok_or(ValidationError::MissingPriority)?;
    let endpoint_url = present(params.url).ok_or(ValidationError::MissingUrl)?;
    let app_token = present(params.token).ok_or(ValidationError::MissingToken)?;

    Ok(AlertConfig {
        endpoint_url,
        app_token,
        message,
        title: params.title,
        priority,
        ssl_verify: params.ssl_verify,
    })
}

/// Normalizes the SSL verification setting to a definite boolean.
///
/// Absent and empty both mean verification stays enabled. A boolean value is
/// taken as-is. A string disables verification only when it matches the
/// deny-list; any other string, `"1"` and `"true"` included, enables it.
pub fn parse_ssl_verify(raw: Option<&SslVerify>) -> bool {
    match raw {
        None => true,
        Some(SslVerify::Bool(value)) => *value,
        Some(SslVerify::Text(text)) if text.is_empty() => true,
        Some(SslVerify::Text(text)) => !SSL_VERIFY_DENY_LIST.contains(&text.as_str()),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
