//! Builds the outbound message body and its target endpoint.

use crate::core::{AlertConfig, NotificationPayload};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("priority {0:?} is not a base-10 integer")]
    InvalidPriority(String),
}

/// Constructs the target URL: at most one trailing `/` is stripped from the
/// base URL before the fixed `/message` suffix is appended.
pub fn message_endpoint(base_url: &str) -> String {
    let trimmed = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{trimmed}/message")
}

/// Assembles the JSON payload. The title is included only when non-empty.
pub fn build_payload(config: &AlertConfig) -> Result<NotificationPayload, PayloadError> {
    let priority = config
        .priority
        .trim()
        .parse::<i64>()
        .map_err(|_| PayloadError::InvalidPriority(config.priority.clone()))?;

    let title = config
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .map(str::to_owned);

    Ok(NotificationPayload {
        message: config.message.clone(),
        priority,
        title,
    })
}
