//! [`ImageEngine`] implementation for Docker-compatible engines.
//!
//! Built on the bollard client. Pulls run as spawned tasks that drain the
//! engine's `create_image` progress stream.

use crate::config::Engine as EngineConfig;
use crate::engine::{ImageConfig, ImageEngine, InspectedImage, LocalImage, PullHandle};
use crate::error::{DockupError, Result};
use async_trait::async_trait;
use bollard::Docker;
use bollard::errors::Error as BollardError;
use bollard::image::{CreateImageOptions, ListImagesOptions};
use bollard::models::ImageInspect;
use futures::StreamExt;
use std::time::Duration;
use tracing::trace;

#[cfg(test)]
mod tests;

/// A Docker engine reached through bollard.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Connects according to `config`.
    ///
    /// Without a host, `DOCKER_HOST` or the platform's default socket is
    /// used. `unix://` and `npipe://` hosts go through the local socket,
    /// anything else (`tcp://`, `http://`) over HTTP. No request is sent
    /// yet, but a `unix://` socket path must already exist.
    ///
    /// # Errors
    ///
    /// [`DockupError::Connection`] if the client cannot be set up, for
    /// example when the socket file is missing.
    pub fn connect(config: &EngineConfig) -> Result<Self> {
        let docker = match config.host.as_deref() {
            None => Docker::connect_with_local_defaults()
                .map(|d| d.with_timeout(Duration::from_secs(config.timeout))),
            Some(host) if host.starts_with("unix://") || host.starts_with("npipe://") => {
                Docker::connect_with_socket(host, config.timeout, bollard::API_DEFAULT_VERSION)
            }
            Some(host) => {
                Docker::connect_with_http(host, config.timeout, bollard::API_DEFAULT_VERSION)
            }
        }
        .map_err(|e| {
            DockupError::connection_with_source(
                format!(
                    "failed to set up engine client for {}",
                    config.host.as_deref().unwrap_or("local defaults")
                ),
                e,
            )
        })?;

        Ok(Self { docker })
    }

    /// Wraps an existing bollard client.
    pub fn from_client(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ImageEngine for DockerEngine {
    async fn list_images(&self) -> Result<Vec<LocalImage>> {
        let options = ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        };

        let summaries = self
            .docker
            .list_images(Some(options))
            .await
            .map_err(engine_error)?;

        Ok(summaries
            .into_iter()
            .map(|summary| LocalImage {
                repo_tags: summary.repo_tags,
            })
            .collect())
    }

    fn pull_image(&self, name: &str) -> Result<PullHandle> {
        let docker = self.docker.clone();
        let name = name.to_string();

        Ok(PullHandle::spawn(async move {
            let options = CreateImageOptions {
                from_image: name.clone(),
                ..Default::default()
            };

            let mut stream = Box::pin(docker.create_image(Some(options), None, None));
            while let Some(item) = stream.next().await {
                let info = item.map_err(engine_error)?;
                if let Some(error) = info.error {
                    return Err(DockupError::engine(error, None));
                }
                trace!(
                    image = %name,
                    status = ?info.status,
                    progress = ?info.progress,
                    "pull progress"
                );
            }
            Ok(())
        }))
    }

    async fn inspect_image(&self, name: &str) -> Result<InspectedImage> {
        let inspect = self.docker.inspect_image(name).await.map_err(engine_error)?;
        Ok(inspected_from(inspect))
    }
}

fn inspected_from(inspect: ImageInspect) -> InspectedImage {
    let config = inspect.config.unwrap_or_default();

    InspectedImage {
        id: inspect.id.unwrap_or_default(),
        repo_tags: inspect.repo_tags.unwrap_or_default(),
        created: inspect.created,
        architecture: inspect.architecture,
        os: inspect.os,
        size: inspect.size,
        config: ImageConfig {
            labels: config.labels.unwrap_or_default(),
            env: config.env.unwrap_or_default(),
        },
    }
}

/// Converts a bollard error, keeping the engine's HTTP status when it sent one.
fn engine_error(e: BollardError) -> DockupError {
    let status_code = match &e {
        BollardError::DockerResponseServerError { status_code, .. } => Some(*status_code),
        _ => None,
    };
    DockupError::engine_with_source(e.to_string(), status_code, e)
}
