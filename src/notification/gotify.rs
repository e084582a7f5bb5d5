//! A client for delivering a notification to a Gotify server.

use crate::core::{DispatchOutcome, DispatchRequest, NotificationSender, TransportErrorKind};
use std::time::Duration;
use tracing::debug;

/// Sends a single message over blocking HTTP and classifies the result.
///
/// Without an explicit timeout the underlying client's default applies.
pub struct GotifyClient {
    timeout: Option<Duration>,
}

impl GotifyClient {
    /// Creates a new `GotifyClient`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn build_client(&self, verify_tls: bool) -> reqwest::Result<reqwest::blocking::Client> {
        let mut builder =
            reqwest::blocking::Client::builder().danger_accept_invalid_certs(!verify_tls);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl NotificationSender for GotifyClient {
    fn send(&self, request: &DispatchRequest) -> DispatchOutcome {
        let client = match self.build_client(request.verify_tls) {
            Ok(client) => client,
            Err(e) => {
                return DispatchOutcome::TransportFailure {
                    kind: TransportErrorKind::Unexpected,
                    detail: e.to_string(),
                }
            }
        };

        debug!(endpoint = %request.endpoint, "Posting Gotify message");
        let response = client
            .post(request.endpoint.as_str())
            .header("X-Gotify-Key", &request.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request.payload)
            .send();

        match response {
            Ok(res) if res.status() == reqwest::StatusCode::OK => DispatchOutcome::Delivered,
            Ok(res) => {
                let status = res.status().as_u16();
                let body = res.text().unwrap_or_default();
                DispatchOutcome::RejectedByServer { status, body }
            }
            Err(e) => DispatchOutcome::TransportFailure {
                kind: classify(&e),
                detail: e.to_string(),
            },
        }
    }
}

fn classify(err: &reqwest::Error) -> TransportErrorKind {
    if is_tls_failure(err) {
        TransportErrorKind::Tls
    } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_redirect() {
        TransportErrorKind::Network
    } else {
        TransportErrorKind::Unexpected
    }
}

/// `reqwest` surfaces certificate problems as connect errors; the TLS cause
/// is only visible in the error source chain.
fn is_tls_failure(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if text.contains("certificate") || text.contains("SSL") || text.contains("TLS") {
            return true;
        }
        source = cause.source();
    }
    false
}
