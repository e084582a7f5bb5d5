//! Settings for the standalone alert action.
//!
//! Holds the global defaults an invoking host would otherwise provide
//! (server URL and app token) plus ambient knobs. Sources are layered with
//! `figment`: built-in defaults, then a `gotify-alert.toml` file, then
//! `GOTIFY_ALERT_`-prefixed environment variables, then command-line
//! overrides.

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default settings file looked up in the working directory.
const SETTINGS_FILE: &str = "gotify-alert.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// The logging level for the standalone process.
    pub log_level: String,
    /// Global Gotify server URL, used when an alert does not carry one.
    pub gotify_url: Option<String>,
    /// Global Gotify app token, used when an alert does not carry one.
    pub gotify_token: Option<String>,
    /// Request timeout in seconds. Unset means the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            gotify_url: None,
            gotify_token: None,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads the settings by layering sources: defaults, file, environment,
    /// and CLI overrides. A `--config` path that does not exist is an error;
    /// the default file is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        let figment = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Settings file not found at specified path: {}", path.display());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(SETTINGS_FILE)),
        };

        let settings = figment
            .merge(Env::prefixed("GOTIFY_ALERT_"))
            .merge(cli.clone())
            .extract()?;
        Ok(settings)
    }

    /// The configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
