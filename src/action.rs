//! The alert action pipeline.
//!
//! Drives one invocation end to end: resolution, validation, flag
//! normalization, payload construction, dispatch, and translation of the
//! outcome into the host-facing status code. Validation always completes
//! before any network activity.

use crate::core::{
    ActionStatus, AlertHost, AlertParams, DispatchOutcome, DispatchRequest, NotificationSender,
    TransportErrorKind,
};
use crate::params::{parse_ssl_verify, resolve, validate};
use crate::payload::{build_payload, message_endpoint};

/// Runs the alert action for one invocation and returns its status code.
pub fn run(
    params: AlertParams,
    host: &dyn AlertHost,
    sender: &dyn NotificationSender,
) -> ActionStatus {
    host.log_info("Gotify alert action started");

    let params = resolve(params, host);
    let config = match validate(params) {
        Ok(config) => config,
        Err(e) => {
            host.log_error(&e.to_string());
            return ActionStatus::InvalidParams;
        }
    };

    let verify_tls = parse_ssl_verify(config.ssl_verify.as_ref());

    let payload = match build_payload(&config) {
        Ok(payload) => payload,
        Err(e) => {
            host.log_error(&format!("Error sending Gotify message: {e}"));
            return ActionStatus::DeliveryFailed;
        }
    };

    host.log_info(&format!(
        "Sending message to Gotify server: {}",
        config.endpoint_url
    ));

    let request = DispatchRequest {
        endpoint: message_endpoint(&config.endpoint_url),
        token: config.app_token,
        verify_tls,
        payload,
    };

    translate(sender.send(&request), host)
}

/// Maps a dispatch outcome to the status code, emitting the host-facing
/// log lines along the way.
fn translate(outcome: DispatchOutcome, host: &dyn AlertHost) -> ActionStatus {
    match outcome {
        DispatchOutcome::Delivered => {
            host.log_info("Successfully sent Gotify message (200 OK)");
            ActionStatus::Success
        }
        DispatchOutcome::RejectedByServer { status, body } => {
            host.log_error(&format!(
                "Failed to send Gotify message. Status code: {status}, Response: {body}"
            ));
            ActionStatus::DeliveryFailed
        }
        DispatchOutcome::TransportFailure {
            kind: TransportErrorKind::Tls,
            detail,
        } => {
            host.log_error(&format!("SSL verification failed: {detail}"));
            host.log_error(
                "Try setting 'Verify SSL Certificate' to false if using self-signed certificates",
            );
            ActionStatus::DeliveryFailed
        }
        DispatchOutcome::TransportFailure {
            kind: TransportErrorKind::Network,
            detail,
        } => {
            host.log_error(&format!("Request error sending Gotify message: {detail}"));
            ActionStatus::DeliveryFailed
        }
        DispatchOutcome::TransportFailure {
            kind: TransportErrorKind::Unexpected,
            detail,
        } => {
            host.log_error(&format!("Error sending Gotify message: {detail}"));
            ActionStatus::DeliveryFailed
        }
    }
}
