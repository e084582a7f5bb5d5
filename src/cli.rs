//! Command-Line Interface (CLI) argument parsing.
//!
//! Defines the command-line arguments for the standalone alert action using
//! the `clap` crate. The parsed arguments are merged as the top layer of the
//! settings via the `figment::Provider` implementation below.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends a single Gotify notification for a triggered alert.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run the alert action, reading the alert document from standard input.
    #[arg(long)]
    pub execute: bool,

    /// Path to the TOML settings file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level override (e.g. "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.as_str()));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
