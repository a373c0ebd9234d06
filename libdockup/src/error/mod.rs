//! Error types for Dockup
//!
//! Engine failures are carried as they were produced by the engine
//! implementation; the provisioner never rewrites them.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for Dockup operations
#[derive(Error, Debug)]
pub enum DockupError {
    /// Errors reported by the container engine (list, pull, inspect)
    #[error("Engine error (status: {status_code:?}): {message}")]
    Engine {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The engine client could not be constructed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Waiting on a pull was cancelled by the caller
    #[error("Interrupted while waiting for image pulls")]
    Interrupted,

    /// Configuration errors (invalid config file, missing settings)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for Dockup operations
pub type Result<T> = std::result::Result<T, DockupError>;

impl DockupError {
    /// Creates a new engine error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libdockup::error::DockupError;
    ///
    /// let err = DockupError::engine("no such image", Some(404));
    /// assert!(err.is_not_found());
    /// ```
    pub fn engine<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::Engine {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Creates a new engine error with a source error.
    pub fn engine_with_source<S, E>(message: S, status_code: Option<u16>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine {
            message: message.into(),
            status_code,
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new connection error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libdockup::error::DockupError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "no socket");
    /// let err = DockupError::connection_with_source("cannot reach engine", io_err);
    /// assert!(matches!(err, DockupError::Connection { .. }));
    /// ```
    pub fn connection_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libdockup::error::DockupError;
    ///
    /// let err = DockupError::config("invalid config file", Some("/path/to/config.yaml"));
    /// assert!(matches!(err, DockupError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if the engine reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Engine {
                status_code: Some(404),
                ..
            }
        )
    }
}

impl From<config::ConfigError> for DockupError {
    fn from(e: config::ConfigError) -> Self {
        DockupError::config_with_source("Failed to build configuration", None, e)
    }
}
