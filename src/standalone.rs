//! The standalone invocation mode.
//!
//! Reads a JSON alert document from standard input, runs the action
//! pipeline against it, and reports the status code to the invoking
//! process. Global settings and the logging sink come from the
//! [`Settings`]-backed [`StandaloneHost`] instead of an embedding host.
//!
//! Nothing escapes this boundary: malformed input is an integration error
//! and a panic in the pipeline is caught and reported as unexpected.

use crate::action;
use crate::config::Settings;
use crate::core::{ActionStatus, AlertHost, AlertParams};
use crate::notification::GotifyClient;
use serde::Deserialize;
use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info};

/// The document an invoking process writes to standard input.
#[derive(Debug, Deserialize)]
pub struct AlertDocument {
    pub configuration: AlertParams,
}

/// Host implementation for the standalone process.
///
/// Per-alert parameters arrive in the alert document rather than through
/// the parameter lookup, so `param` always answers `None`. Global settings
/// are served from the settings layer and log lines go to the tracing
/// subscriber on stderr.
pub struct StandaloneHost {
    settings: Settings,
}

impl StandaloneHost {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl AlertHost for StandaloneHost {
    fn param(&self, _key: &str) -> Option<String> {
        None
    }

    fn global_setting(&self, key: &str) -> Option<String> {
        match key {
            "gotify_url" => self.settings.gotify_url.clone(),
            "gotify_token" => self.settings.gotify_token.clone(),
            _ => None,
        }
    }

    fn log_info(&self, message: &str) {
        info!("{message}");
    }

    fn log_error(&self, message: &str) {
        error!("{message}");
    }
}

/// Runs the alert action against a JSON alert document.
///
/// Returns the status code for the process exit; never panics and never
/// returns an error.
pub fn execute(input: impl Read, settings: &Settings) -> ActionStatus {
    let document: AlertDocument = match serde_json::from_reader(input) {
        Ok(document) => document,
        Err(e) => {
            error!("Invalid alert document on standard input: {e}");
            return ActionStatus::IntegrationError;
        }
    };

    let host = StandaloneHost::new(settings.clone());
    let sender = GotifyClient::new(settings.request_timeout());

    match panic::catch_unwind(AssertUnwindSafe(|| {
        action::run(document.configuration, &host, &sender)
    })) {
        Ok(status) => status,
        Err(payload) => {
            host.log_error(&format!("Unexpected error: {}", panic_detail(&payload)));
            ActionStatus::UnexpectedError
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "panic with non-string payload"
    }
}
