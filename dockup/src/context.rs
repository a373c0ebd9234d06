//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! `DOCKUP_HOST` and `DOCKUP_CONFIG` arrive through clap, so steps 3 and 4
//! are resolved before `build` is called.
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::config;
use crate::format::{self, ColorChoice, OutputFormatter};
use libdockup::{Config, DockupError};
use std::path::PathBuf;

/// How much diagnostic output to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Normal,
    /// Provisioning steps (`-v`)
    Verbose,
    /// Everything, including engine progress (`-vv`)
    Trace,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Tracing filter directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    /// Where the configuration file lives (whether or not it exists)
    pub config_path: PathBuf,
    pub color: ColorChoice,
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn build(
        color: ColorChoice,
        verbosity: VerbosityLevel,
        config_path: Option<PathBuf>,
        host: Option<String>,
    ) -> Result<Self, DockupError> {
        // An explicitly given file must exist; the default location is optional
        let (config_path, required) = match config_path {
            Some(path) => (path, true),
            None => (config::default_config_path(), false),
        };

        let mut config = if required || config_path.exists() {
            Config::load(Some(config_path.as_path()))?
        } else {
            Config::default()
        };

        if let Some(host) = host {
            config.engine.host = Some(host);
        }

        Ok(Self {
            config,
            config_path,
            color,
            verbosity,
        })
    }

    /// Spinners only run at normal verbosity; debug logs on stderr would tear them
    pub fn shows_progress(&self) -> bool {
        self.verbosity == VerbosityLevel::Normal
    }

    /// Formatter honoring the resolved color choice
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        format::create_formatter(self.color)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
