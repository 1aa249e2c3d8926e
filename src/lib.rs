//! # Package Releaser
//!
//! A reliable tool for building and publishing dual-format npm packages in CI.
//! This library provides functionality to clean build artifacts, compile a
//! package for several module formats, and version-bump and publish it to the
//! registry as one sequenced pipeline.
//!
//! ## Features
//!
//! - Glob-based artifact cleanup that never touches manifests
//! - Multi-target compilation into per-format output directories
//! - Best-effort commit and push that cannot block a release
//! - Version bumping and registry publishing with public access
//! - Professional error handling and logging
//!
//! ## Example
//!
//! ```no_run
//! use package_releaser::{config::Config, core::PackageReleaser};
//!
//! let config = Config::default();
//! let releaser = PackageReleaser::new(config);
//! releaser.build()?;
//! # Ok::<(), package_releaser::error::ReleaseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
