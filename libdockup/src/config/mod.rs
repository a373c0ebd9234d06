//! Application configuration.
//!
//! This module manages configuration with sensible defaults, loaded from a
//! YAML file on top of the built-in values.

use crate::error::{DockupError, Result};
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;


/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// How to reach the container engine.
    #[serde(default)]
    pub engine: Engine,
    /// Pull behavior.
    #[serde(default)]
    pub pull: Pull,
    /// Images `dockup ensure` provisions when none are given on the command line.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&Config::default())?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config` from an optional file path.
    ///
    /// Without a path the built-in defaults are returned. A path that does
    /// not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder().add_source(ConfigRs::try_from(&Config::default())?);

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml).required(true));
        }

        Self::from_builder(builder, path)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DockupError::config_with_source("Failed to serialize configuration", None, e)
        })
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                DockupError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.map(|p| p.display().to_string()),
                    e,
                )
            })
    }
}

/// Container engine connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Engine {
    /// Engine address (`unix:///var/run/docker.sock`, `tcp://host:2375`).
    /// When unset, `DOCKER_HOST` or the platform default socket is used.
    #[serde(default)]
    pub host: Option<String>,

    /// API request timeout in seconds.
    #[serde(default = "default_engine_timeout")]
    pub timeout: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            host: None,
            timeout: default_engine_timeout(),
        }
    }
}

fn default_engine_timeout() -> u64 {
    120
}

/// Pull settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pull {
    /// Upper bound in seconds on the wait for each individual pull.
    #[serde(default = "default_pull_timeout")]
    pub timeout: u64,
}

impl Pull {
    /// The per-pull wait bound as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Pull {
    fn default() -> Self {
        Self {
            timeout: default_pull_timeout(),
        }
    }
}

fn default_pull_timeout() -> u64 {
    300
}
