//! Image provisioning over an injected container engine.
//!
//! The [`Provisioner`] makes sure a set of images is present locally and
//! extracts the metadata callers care about from an inspect response. It
//! holds no state between calls; the engine does the actual work.

use crate::engine::{ImageEngine, InspectedImage, PullHandle};
use crate::error::{DockupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, warn};


/// Metadata record produced by [`Provisioner::inspect_image`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Engine-assigned image id.
    pub id: String,
    /// Image labels.
    pub labels: HashMap<String, String>,
    /// Environment entries, usually `KEY=VALUE`, in image order.
    pub env: Vec<String>,
}

impl From<InspectedImage> for ImageInfo {
    fn from(inspected: InspectedImage) -> Self {
        Self {
            id: inspected.id,
            labels: inspected.config.labels,
            env: inspected.config.env,
        }
    }
}

/// Pulls missing images and inspects images through an [`ImageEngine`].
///
/// # Examples
///
/// ```no_run
/// use libdockup::{Config, DockerEngine, Provisioner};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let engine = DockerEngine::connect(&Config::default().engine)?;
///     let provisioner = Provisioner::new(engine);
///
///     provisioner
///         .ensure_images_present(["alpine:3.18", "busybox:latest"], Duration::from_secs(300))
///         .await?;
///
///     let info = provisioner.inspect_image("alpine:3.18").await?;
///     println!("{} has {} env entries", info.id, info.env.len());
///     Ok(())
/// }
/// ```
pub struct Provisioner<E> {
    engine: E,
    span: Span,
    cancel: CancellationToken,
}

impl<E: ImageEngine> Provisioner<E> {
    /// Creates a provisioner over `engine`.
    ///
    /// Events are recorded under a `dockup.provisioner` span unless another
    /// span is supplied with [`Provisioner::with_span`].
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            span: tracing::debug_span!("dockup.provisioner"),
            cancel: CancellationToken::new(),
        }
    }

    /// Records this provisioner's events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Aborts pending pull waits with [`DockupError::Interrupted`] once
    /// `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Makes sure every image in `names` is known to the engine, pulling the
    /// ones that are missing.
    ///
    /// A name counts as present only if it equals one of the repository tags
    /// of a local image exactly; `alpine` does not match `alpine:latest`.
    /// All pulls are started before the first one is awaited. Each wait is
    /// bounded by `timeout`; a wait that runs out is logged and skipped, and
    /// so is a pull that fails. Neither makes this call fail.
    ///
    /// # Errors
    ///
    /// - [`DockupError::Interrupted`] if the cancellation token fires while
    ///   waiting. Pulls already started keep running on the engine.
    /// - Engine errors from listing images or starting a pull, unchanged.
    pub async fn ensure_images_present<I, S>(&self, names: I, timeout: Duration) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested: BTreeSet<String> = names.into_iter().map(Into::into).collect();

        async {
            let missing = self.missing_images(&requested).await?;
            if missing.is_empty() {
                debug!(images = ?requested, "nothing to pull, all images are known");
                return Ok(());
            }

            let mut pulls = Vec::with_capacity(missing.len());
            for name in missing {
                debug!(image = %name, "pulling");
                let handle = self.engine.pull_image(&name)?;
                pulls.push((name, handle));
            }

            for (name, mut handle) in pulls {
                self.await_pull(&name, &mut handle, timeout).await?;
            }

            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    /// Returns the id, labels and environment of `name`.
    ///
    /// # Errors
    ///
    /// Whatever the engine reports for an unknown or malformed reference,
    /// unchanged.
    pub async fn inspect_image(&self, name: &str) -> Result<ImageInfo> {
        async {
            let inspected = self.engine.inspect_image(name).await?;
            debug!(image = %name, id = %inspected.id, "inspected");
            Ok(ImageInfo::from(inspected))
        }
        .instrument(self.span.clone())
        .await
    }

    /// Returns the names in `requested` that no local image is tagged with.
    async fn missing_images(&self, requested: &BTreeSet<String>) -> Result<BTreeSet<String>> {
        let mut missing = requested.clone();
        for image in self.engine.list_images().await? {
            for tag in &image.repo_tags {
                missing.remove(tag);
            }
        }
        Ok(missing)
    }

    async fn await_pull(
        &self,
        name: &str,
        handle: &mut PullHandle,
        timeout: Duration,
    ) -> Result<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!(image = %name, "interrupted while waiting for pull");
                Err(DockupError::Interrupted)
            }
            finished = handle.wait(timeout) => {
                if !finished {
                    // Still pulling; the caller cannot tell this apart from success.
                    warn!(
                        image = %name,
                        timeout_secs = timeout.as_secs(),
                        "pull did not finish in time"
                    );
                } else if let Some(e) = handle.take_error() {
                    warn!(image = %name, error = %e, "pull failed");
                } else {
                    debug!(image = %name, "pulled");
                }
                Ok(())
            }
        }
    }
}
