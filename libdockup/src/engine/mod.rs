//! The container-engine seam.
//!
//! [`ImageEngine`] is the set of capabilities the provisioner consumes from a
//! container engine: listing local images, starting a pull, and inspecting
//! an image. [`crate::docker::DockerEngine`] implements it over bollard;
//! tests provide in-memory implementations.

use crate::error::{DockupError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;


/// An image stored by the engine, as seen by the list call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalImage {
    /// Repository tags attached to the image. Empty when the engine reports none.
    pub repo_tags: Vec<String>,
}

impl LocalImage {
    /// Creates an image record carrying `repo_tags`.
    pub fn new<I, S>(repo_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            repo_tags: repo_tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Image configuration section of an inspect response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageConfig {
    /// Image labels; empty when none are set.
    pub labels: HashMap<String, String>,
    /// Environment entries in image order.
    pub env: Vec<String>,
}

/// The engine's inspect response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectedImage {
    /// Engine-assigned id, usually `sha256:...`.
    pub id: String,
    /// Repository tags attached to the image.
    pub repo_tags: Vec<String>,
    /// Creation timestamp as reported by the engine.
    pub created: Option<String>,
    /// CPU architecture.
    pub architecture: Option<String>,
    /// Operating system.
    pub os: Option<String>,
    /// Size in bytes.
    pub size: Option<i64>,
    /// Labels and environment; empty when the engine sent no config.
    pub config: ImageConfig,
}

/// Capabilities of a container engine used to provision images.
#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Lists the images currently stored by the engine.
    async fn list_images(&self) -> Result<Vec<LocalImage>>;

    /// Starts pulling `name` and returns without waiting for the transfer.
    fn pull_image(&self, name: &str) -> Result<PullHandle>;

    /// Returns the engine's metadata for `name`.
    async fn inspect_image(&self, name: &str) -> Result<InspectedImage>;
}

/// An in-flight pull that can be awaited with a deadline.
///
/// The pull runs as its own tokio task; timing out a wait or dropping the
/// handle leaves the task running.
#[derive(Debug)]
pub struct PullHandle {
    task: JoinHandle<Result<()>>,
    finished: bool,
    error: Option<DockupError>,
}

impl PullHandle {
    /// Spawns `pull` on the current tokio runtime.
    pub fn spawn<F>(pull: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(pull),
            finished: false,
            error: None,
        }
    }

    /// Waits up to `timeout` for the pull to finish.
    ///
    /// Returns `true` if the pull finished within the bound, whether it
    /// succeeded or not. Once finished, further calls return `true`
    /// immediately.
    pub async fn wait(&mut self, timeout: Duration) -> bool {
        if self.finished {
            return true;
        }

        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(joined) => {
                self.finished = true;
                let outcome = joined.unwrap_or_else(|e| {
                    Err(DockupError::engine_with_source("pull task failed", None, e))
                });
                self.error = outcome.err();
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` once a wait has observed the pull finishing.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Takes the error of a finished, failed pull.
    pub fn take_error(&mut self) -> Option<DockupError> {
        self.error.take()
    }
}
