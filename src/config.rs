//! Configuration management for the package releaser
//!
//! Centralizes path, build-target, and tool settings and provides validation.
//! Everything is computed once at startup and passed into the release tasks
//! explicitly; there is no module-level shared state.

use crate::{cli::Args, error::ReleaseError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Project root containing the manifest and build-configuration files
    pub project_dir: PathBuf,
    /// Path layout relative to the project root
    pub paths: PathsConfig,
    /// Compile targets, one per module format
    pub targets: Vec<TargetConfig>,
    /// External tool commands
    pub tools: ToolsConfig,
    /// Version-control settings
    pub vcs: VcsConfig,
}

/// Path layout, resolved against the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Source directory
    pub input_dir: PathBuf,
    /// Build output directory
    pub output_dir: PathBuf,
    /// Package manifest file name
    pub manifest: PathBuf,
}

/// One compile target: a build-configuration file plus a dedicated
/// output sub-directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Target name used in logs ("esm", "cjs")
    pub name: String,
    /// Compiler configuration file, relative to the project root
    pub build_config: PathBuf,
    /// Sub-directory of the output directory this target compiles into
    pub output_subdir: PathBuf,
}

/// Commands for the external collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Source compiler command
    pub compiler: String,
    /// Version-control client command
    pub vcs: String,
    /// Package-registry client command
    pub registry: String,
}

/// Version-control behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsConfig {
    /// Message used for the release commit
    pub commit_message: String,
    /// Remote that receives the push
    pub remote: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            project_dir: PathBuf::from("."),
            paths: PathsConfig::default(),
            targets: TargetConfig::default_targets(),
            tools: ToolsConfig::default(),
            vcs: VcsConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("src"),
            output_dir: PathBuf::from("dist"),
            manifest: PathBuf::from("package.json"),
        }
    }
}

impl TargetConfig {
    /// The standard dual-format target pair
    pub fn default_targets() -> Vec<Self> {
        vec![
            Self {
                name: "esm".to_string(),
                build_config: PathBuf::from("tsconfig.esm.json"),
                output_subdir: PathBuf::from("esm"),
            },
            Self {
                name: "cjs".to_string(),
                build_config: PathBuf::from("tsconfig.cjs.json"),
                output_subdir: PathBuf::from("cjs"),
            },
        ]
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            compiler: "tsc".to_string(),
            vcs: "git".to_string(),
            registry: "npm".to_string(),
        }
    }
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            commit_message: "auto commit".to_string(),
            remote: "origin".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ReleaseError> {
        let project_dir = std::fs::canonicalize(&args.project_dir).map_err(|e| {
            ReleaseError::config(format!(
                "Project directory not found: {} ({e})",
                args.project_dir.display()
            ))
        })?;

        let config = Self {
            debug: args.debug,
            project_dir,
            ..Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ReleaseError> {
        if !self.manifest_path().is_file() {
            return Err(ReleaseError::validation(format!(
                "Manifest file not found: {}",
                self.manifest_path().display()
            )));
        }

        if self.targets.is_empty() {
            return Err(ReleaseError::validation(
                "At least one compile target must be configured",
            ));
        }

        for target in &self.targets {
            let build_config = self.target_build_config(target);
            if !build_config.is_file() {
                return Err(ReleaseError::validation(format!(
                    "Build configuration for target '{}' not found: {}",
                    target.name,
                    build_config.display()
                )));
            }
        }

        for (i, target) in self.targets.iter().enumerate() {
            for other in &self.targets[i + 1..] {
                if target.output_subdir == other.output_subdir {
                    return Err(ReleaseError::validation(format!(
                        "Targets '{}' and '{}' share the output sub-directory {}",
                        target.name,
                        other.name,
                        target.output_subdir.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Source directory, resolved against the project root
    pub fn input_dir(&self) -> PathBuf {
        self.project_dir.join(&self.paths.input_dir)
    }

    /// Output directory, resolved against the project root
    pub fn output_dir(&self) -> PathBuf {
        self.project_dir.join(&self.paths.output_dir)
    }

    /// Manifest file path, resolved against the project root
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(&self.paths.manifest)
    }

    /// Build-configuration file for a target, resolved against the project root
    pub fn target_build_config(&self, target: &TargetConfig) -> PathBuf {
        self.project_dir.join(&target.build_config)
    }

    /// Output directory for a target, resolved against the output root
    pub fn target_output_dir(&self, target: &TargetConfig) -> PathBuf {
        self.output_dir().join(&target.output_subdir)
    }
}
