//! Diagnostic logging setup.
//!
//! Events go to stderr so they never mix with command output. `DOCKUP_LOG`
//! takes an `EnvFilter` directive and wins over `-v`.

use crate::context::VerbosityLevel;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "DOCKUP_LOG";

pub fn filter_for(verbosity: VerbosityLevel, env_directive: Option<&str>) -> EnvFilter {
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.directive()))
}

pub fn init(verbosity: VerbosityLevel) {
    let env_directive = std::env::var(LOG_ENV).ok();

    tracing_subscriber::registry()
        .with(filter_for(verbosity, env_directive.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
