//! Dockup - Image provisioning for container engines
//!
//! Dockup makes sure the images a workload needs are present in a local
//! container engine and reads back the metadata a launcher usually wants
//! from them: the image id, its labels and its environment.
//!
//! # Quick Start
//!
//! ```no_run
//! use libdockup::{Config, DockerEngine, Provisioner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let provisioner = Provisioner::new(DockerEngine::connect(&config.engine)?);
//!
//!     // Pull whatever is not already present
//!     provisioner
//!         .ensure_images_present(["alpine:3.18"], config.pull.timeout())
//!         .await?;
//!
//!     let info = provisioner.inspect_image("alpine:3.18").await?;
//!     for entry in &info.env {
//!         println!("{}", entry);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Provisioner`] - Ensures images are present and inspects them
//! - [`ImageEngine`] - The engine capabilities the provisioner consumes
//! - [`DockerEngine`] - `ImageEngine` over a Docker-compatible engine
//! - [`ImageInfo`] - Id, labels and environment of an image
//! - [`Config`] - Engine and pull settings

#![warn(clippy::all)]

/// Returns the libdockup crate version.
///
/// # Examples
///
/// ```
/// let version = libdockup::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use config::Config;
pub use docker::DockerEngine;
pub use engine::{ImageEngine, InspectedImage, LocalImage, PullHandle};
pub use error::{DockupError, Result};
pub use provisioner::{ImageInfo, Provisioner};

pub mod config;
pub mod docker;
pub mod engine;
pub mod error;
pub mod provisioner;
