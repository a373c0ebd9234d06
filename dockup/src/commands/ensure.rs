use super::{connect, fail};
use crate::context::AppContext;
use indicatif::ProgressBar;
use libdockup::{Config, DockupError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Images to provision: the command line wins, otherwise the config list
pub fn resolve_images(requested: &[String], config: &Config) -> Vec<String> {
    if requested.is_empty() {
        config.images.clone()
    } else {
        requested.to_vec()
    }
}

/// Per-pull wait bound: `--timeout` wins, otherwise `pull.timeout`
pub fn resolve_timeout(requested: Option<u64>, config: &Config) -> Duration {
    requested
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.pull.timeout())
}

/// Handle the ensure command
pub async fn handle_ensure(ctx: &AppContext, requested: &[String], timeout: Option<u64>) {
    let images = resolve_images(requested, &ctx.config);
    if images.is_empty() {
        fail(
            ctx,
            &DockupError::config(
                "No images given and none listed under 'images' in the config file".to_string(),
                Some(ctx.config_path.display().to_string()),
            ),
        );
    }
    let timeout = resolve_timeout(timeout, &ctx.config);
    debug!(
        images = ?images,
        timeout_secs = timeout.as_secs(),
        host = ?ctx.config.engine.host,
        "ensuring images"
    );

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let provisioner = connect(ctx).with_cancellation(token);
    let formatter = ctx.formatter();
    let spinner = if ctx.shows_progress() {
        formatter.spinner(&format!("Ensuring {} image(s)...", images.len()))
    } else {
        ProgressBar::hidden()
    };

    match provisioner.ensure_images_present(images.iter(), timeout).await {
        Ok(()) => formatter.finish_progress(
            spinner,
            &format!("Ensured {} image(s): {}", images.len(), images.join(", ")),
        ),
        Err(e) => {
            spinner.finish_and_clear();
            fail(ctx, &e);
        }
    }
}

#[cfg(test)]
#[path = "ensure_tests.rs"]
mod tests;
