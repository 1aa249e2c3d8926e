//! Command implementations for the CLI

use crate::{
    cli::Command,
    config::Config,
    core::{manifest::Level, release::PackageReleaser},
};
use anyhow::Context;
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Build => execute_build_command(config),
        Command::Compile => execute_compile_command(config),
        Command::Clean => execute_clean_command(config),
        Command::PublishPatch => execute_publish_command(config, Level::Patch),
        Command::PublishMinor => execute_publish_command(config, Level::Minor),
        Command::PublishMajor => execute_publish_command(config, Level::Major),
    }
}

/// Execute the build command
#[instrument(skip(config))]
fn execute_build_command(config: &Config) -> anyhow::Result<()> {
    info!("Building package...");

    let releaser = PackageReleaser::new(config.clone());
    releaser.build().context("Failed to build package")?;

    info!("Build completed successfully");
    Ok(())
}

/// Execute the compile command
#[instrument(skip(config))]
fn execute_compile_command(config: &Config) -> anyhow::Result<()> {
    info!("Compiling targets...");

    let releaser = PackageReleaser::new(config.clone());
    releaser.compile().context("Failed to compile targets")?;

    info!(
        "Compilation completed successfully for {} target(s)",
        config.targets.len()
    );
    Ok(())
}

/// Execute the clean command
#[instrument(skip(config))]
fn execute_clean_command(config: &Config) -> anyhow::Result<()> {
    info!("Cleaning source tree...");

    let releaser = PackageReleaser::new(config.clone());
    releaser.clean().context("Failed to clean source tree")?;

    info!("Clean completed successfully");
    Ok(())
}

/// Execute a publish command at the given version bump level
#[instrument(skip(config))]
fn execute_publish_command(config: &Config, level: Level) -> anyhow::Result<()> {
    info!("Publishing package with a {level} version bump...");

    let releaser = PackageReleaser::new(config.clone());
    releaser
        .publish(level)
        .with_context(|| format!("Failed to publish package ({level})"))?;

    info!("Publish completed successfully");
    Ok(())
}
