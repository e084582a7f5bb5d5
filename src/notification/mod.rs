//! Delivery of notifications to the Gotify server.
//!
//! The dispatcher behind [`crate::core::NotificationSender`] lives here. It
//! performs exactly one HTTP POST per invocation and classifies the result
//! into a tagged outcome; result-code translation happens in the action
//! pipeline, not here.
pub mod gotify;

pub use gotify::GotifyClient;
