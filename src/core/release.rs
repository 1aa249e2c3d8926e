//! Release task sequencing
//!
//! `PackageReleaser` wires the external tools together into the named
//! release tasks: clean, compile, build, and publish. Every step is waited
//! to completion before the next one starts. Steps come in two tiers:
//! version-control steps are best-effort and report a [`StepOutcome`],
//! everything else is fatal and aborts the remaining sequence.

use crate::{
    config::{Config, TargetConfig},
    core::manifest::{Level, Manifest},
    error::{ReleaseError, Result},
    utils::fs::{CopyOptions, FileSet, RemoveOptions},
    utils::process::ProcessRunner,
};
use tracing::{info, instrument, warn};

/// Outcome of a step that is allowed to fail without blocking the release
#[derive(Debug)]
pub enum StepOutcome {
    /// The step ran to completion
    Completed,
    /// The step failed; the failure was logged and discarded
    Skipped(ReleaseError),
}

impl StepOutcome {
    /// Record a best-effort step's result, logging a discarded failure
    fn observe(step: &str, result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(e) => {
                match &e {
                    ReleaseError::Process { stderr, .. } if !stderr.trim().is_empty() => {
                        warn!("Step '{}' failed and was skipped: {}", step, stderr.trim());
                    }
                    _ => warn!("Step '{}' failed and was skipped: {}", step, e),
                }
                Self::Skipped(e)
            }
        }
    }

    /// Whether the step ran to completion
    #[must_use]
    pub const fn completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Sequences file operations and external tool invocations into the
/// release tasks
pub struct PackageReleaser {
    config: Config,
    runner: ProcessRunner,
}

impl PackageReleaser {
    /// Create a new releaser with the given configuration
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            runner: ProcessRunner::new(config.debug),
            config,
        }
    }

    /// Remove the dependency cache and compiled artifacts from the source tree
    #[instrument(skip(self))]
    pub fn clean(&self) -> Result<()> {
        let input = self.config.input_dir();
        info!("Cleaning source tree: {}", input.display());

        // Dependency cache and lockfile go first, best-effort.
        FileSet::new([
            format!("{}/node_modules", input.display()),
            format!("{}/package-lock.json", input.display()),
        ])?
        .remove(&RemoveOptions { force: true })?;

        // Compiled artifacts; manifests and cache contents stay untouched.
        let removed = FileSet::new([
            format!("{}/**/*.js", input.display()),
            format!("{}/**/*.d.ts", input.display()),
            format!("{}/**/*.js.map", input.display()),
            format!("{}/**/*.d.ts.map", input.display()),
            format!("!{}/**/package.json", input.display()),
            format!("!{}/**/node_modules/**/*", input.display()),
        ])?
        .remove(&RemoveOptions::default())?;

        info!("Removed {} compiled artifact(s)", removed.len());
        Ok(())
    }

    /// Compile every configured target into its dedicated output sub-directory
    #[instrument(skip(self))]
    pub fn compile(&self) -> Result<()> {
        for target in &self.config.targets {
            self.compile_target(target)?;
        }
        Ok(())
    }

    fn compile_target(&self, target: &TargetConfig) -> Result<()> {
        let build_config = self.config.target_build_config(target).display().to_string();
        let output_dir = self.config.target_output_dir(target).display().to_string();
        info!("Compiling target '{}' -> {}", target.name, output_dir);

        self.runner.run(
            &self.config.project_dir,
            &self.config.tools.compiler,
            &["--project", &build_config, "--outDir", &output_dir],
        )
    }

    /// Copy the package manifest into the build output root
    #[instrument(skip(self))]
    pub fn copy_manifest(&self) -> Result<()> {
        let manifest = self.config.manifest_path();
        let output = self.config.output_dir();
        info!("Copying {} -> {}", manifest.display(), output.display());

        FileSet::new([manifest.display().to_string()])?
            .copy_to(&output, &CopyOptions::default())?;
        Ok(())
    }

    /// Fresh build: replace the output directory with newly compiled
    /// targets plus a manifest copy
    #[instrument(skip(self))]
    pub fn build(&self) -> Result<()> {
        let output = self.config.output_dir();
        info!("Building into {}", output.display());

        FileSet::new([output.display().to_string()])?
            .remove(&RemoveOptions { force: true })?;

        self.compile()?;
        self.copy_manifest()
    }

    /// Commit all working-tree changes; failure never blocks the release.
    /// A clean working tree makes the commit fail, which is routine here.
    #[instrument(skip(self))]
    pub fn commit(&self) -> StepOutcome {
        info!("Committing working-tree changes");
        let result = self
            .runner
            .run_captured(
                &self.config.project_dir,
                &self.config.tools.vcs,
                &["commit", "-a", "-m", &self.config.vcs.commit_message],
            )
            .map(|_| ());
        StepOutcome::observe("commit", result)
    }

    /// Push all branches to the configured remote; failure never blocks
    /// the release
    #[instrument(skip(self))]
    pub fn push(&self) -> StepOutcome {
        info!("Pushing all branches to {}", self.config.vcs.remote);
        let result = self
            .runner
            .run_captured(
                &self.config.project_dir,
                &self.config.tools.vcs,
                &["push", "--all", &self.config.vcs.remote],
            )
            .map(|_| ());
        StepOutcome::observe("push", result)
    }

    /// Build, commit, push, bump the manifest version, and publish the
    /// output directory to the registry
    #[instrument(skip(self))]
    pub fn publish(&self, level: Level) -> Result<()> {
        let manifest = Manifest::load(self.config.manifest_path())?;
        info!(
            "Releasing {} with a {} bump (next version {})",
            manifest,
            level,
            level.apply(&manifest.version)
        );

        self.build()?;
        self.commit();
        self.push();

        self.bump_version(level)?;
        self.copy_manifest()?;
        self.publish_output()?;

        let released = Manifest::load(self.config.manifest_path())?;
        info!("Published {}", released);
        Ok(())
    }

    fn bump_version(&self, level: Level) -> Result<()> {
        let project_dir = self.config.project_dir.display().to_string();
        self.runner.run(
            &self.config.project_dir,
            &self.config.tools.registry,
            &["--prefix", &project_dir, "version", level.as_str()],
        )
    }

    fn publish_output(&self) -> Result<()> {
        let output = self.config.output_dir().display().to_string();
        self.runner.run(
            &self.config.project_dir,
            &self.config.tools.registry,
            &["--prefix", &output, "--access", "public", "publish", &output],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn create_test_project(temp_dir: &TempDir) -> PathBuf {
        let root = temp_dir.path().join("project");
        write(
            &root.join("package.json"),
            r#"{ "name": "fixture", "version": "1.2.3" }"#,
        );
        write(&root.join("tsconfig.esm.json"), "{}");
        write(&root.join("tsconfig.cjs.json"), "{}");
        write(&root.join("src/index.ts"), "export {};");
        root
    }

    fn create_test_config(root: PathBuf) -> Config {
        Config {
            project_dir: root,
            ..Config::default()
        }
    }

    #[test]
    fn test_clean_removes_artifacts_and_cache() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);
        write(&root.join("src/index.js"), "x");
        write(&root.join("src/index.d.ts"), "x");
        write(&root.join("src/index.js.map"), "x");
        write(&root.join("src/index.d.ts.map"), "x");
        write(&root.join("src/sub/helper.js"), "x");
        write(&root.join("src/package.json"), "{}");
        write(&root.join("src/sub/package.json"), "{}");
        write(&root.join("src/package-lock.json"), "{}");
        write(&root.join("src/node_modules/dep/index.js"), "x");

        let releaser = PackageReleaser::new(create_test_config(root.clone()));
        releaser.clean().unwrap();

        assert!(!root.join("src/index.js").exists());
        assert!(!root.join("src/index.d.ts").exists());
        assert!(!root.join("src/index.js.map").exists());
        assert!(!root.join("src/index.d.ts.map").exists());
        assert!(!root.join("src/sub/helper.js").exists());
        assert!(!root.join("src/node_modules").exists());
        assert!(!root.join("src/package-lock.json").exists());

        // Sources and manifests survive.
        assert!(root.join("src/index.ts").exists());
        assert!(root.join("src/package.json").exists());
        assert!(root.join("src/sub/package.json").exists());
    }

    #[test]
    fn test_clean_without_artifacts_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);

        let releaser = PackageReleaser::new(create_test_config(root.clone()));
        releaser.clean().unwrap();

        assert!(root.join("src/index.ts").exists());
    }

    #[test]
    fn test_build_replaces_output_and_copies_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);
        write(&root.join("dist/stale.txt"), "old");

        let mut config = create_test_config(root.clone());
        // With a no-op compiler, dist holds only what build() itself writes.
        config.tools.compiler = "true".to_string();

        let releaser = PackageReleaser::new(config);
        releaser.build().unwrap();

        assert!(!root.join("dist/stale.txt").exists());
        assert!(root.join("dist/package.json").is_file());
    }

    #[test]
    fn test_commit_is_best_effort() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);

        let mut config = create_test_config(root.clone());
        config.tools.vcs = "false".to_string();
        let releaser = PackageReleaser::new(config);
        assert!(matches!(releaser.commit(), StepOutcome::Skipped(_)));

        let mut config = create_test_config(root);
        config.tools.vcs = "true".to_string();
        let releaser = PackageReleaser::new(config);
        assert!(releaser.commit().completed());
    }

    #[test]
    fn test_push_is_best_effort() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);

        let mut config = create_test_config(root);
        config.tools.vcs = "false".to_string();
        let releaser = PackageReleaser::new(config);

        let outcome = releaser.push();
        assert!(!outcome.completed());
        match outcome {
            StepOutcome::Skipped(ReleaseError::Process { exit_code, .. }) => {
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("Expected skipped process error, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_project(&temp_dir);

        let mut config = create_test_config(root);
        config.tools.compiler = "false".to_string();
        let releaser = PackageReleaser::new(config);

        assert!(matches!(
            releaser.compile(),
            Err(ReleaseError::Process { .. })
        ));
    }
}
