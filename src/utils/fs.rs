//! Glob-driven file set operations
//!
//! A [`FileSet`] describes a group of filesystem entries with glob patterns.
//! Patterns prefixed with `!` are negations: an entry matching any negated
//! pattern is excluded even when it matches a positive one. File sets back
//! the delete and copy steps of the release tasks.

use crate::error::{ReleaseError, Result};
use glob::Pattern;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Options for [`FileSet::remove`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Log and skip per-entry I/O failures instead of propagating them
    pub force: bool,
}

/// Options for [`FileSet::copy_to`]
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Succeed when no files match
    pub allow_empty: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self { allow_empty: true }
    }
}

/// A set of filesystem entries described by glob patterns
#[derive(Debug)]
pub struct FileSet {
    includes: Vec<String>,
    excludes: Vec<Pattern>,
}

impl FileSet {
    /// Build a file set from patterns; `!`-prefixed entries become negations
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if let Some(negated) = pattern.strip_prefix('!') {
                let compiled = Pattern::new(negated).map_err(|e| {
                    ReleaseError::pattern_with_source("Invalid negated pattern", negated, e)
                })?;
                excludes.push(compiled);
            } else {
                includes.push(pattern.to_string());
            }
        }

        Ok(Self { includes, excludes })
    }

    /// Resolve the set to the matching paths, sorted and de-duplicated
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        let mut matched = BTreeSet::new();

        for include in &self.includes {
            for entry in glob_pattern(include)? {
                match entry {
                    Ok(path) => {
                        if !self.is_excluded(&path) {
                            matched.insert(path);
                        }
                    }
                    Err(e) => warn!("Skipping unreadable path for pattern {}: {}", include, e),
                }
            }
        }

        Ok(matched.into_iter().collect())
    }

    /// Remove every matching entry; directories are removed recursively.
    ///
    /// An entry that is already gone by removal time counts as removed.
    /// With `force`, any other per-entry failure is logged and skipped;
    /// without it, the first failure aborts the operation.
    #[instrument(skip(self, options))]
    pub fn remove(&self, options: &RemoveOptions) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for path in self.resolve()? {
            match remove_entry(&path) {
                Ok(true) => {
                    debug!("Removed {}", path.display());
                    removed.push(path);
                }
                Ok(false) => debug!("Already absent: {}", path.display()),
                Err(e) if options.force => {
                    warn!("Could not remove {}: {}", path.display(), e);
                }
                Err(e) => return Err(ReleaseError::file_system("remove", path, e)),
            }
        }

        Ok(removed)
    }

    /// Copy every matching file into `destination`, preserving each path
    /// relative to its pattern's non-wildcard base
    #[instrument(skip(self, options))]
    pub fn copy_to(&self, destination: &Path, options: &CopyOptions) -> Result<Vec<PathBuf>> {
        let mut entries: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();

        for include in &self.includes {
            let base = pattern_base(include);
            for entry in glob_pattern(include)? {
                match entry {
                    Ok(path) => {
                        if self.is_excluded(&path) || !path.is_file() {
                            continue;
                        }
                        let relative = match path.strip_prefix(&base) {
                            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
                            _ => PathBuf::from(path.file_name().unwrap_or(path.as_os_str())),
                        };
                        entries.insert(path, destination.join(relative));
                    }
                    Err(e) => warn!("Skipping unreadable path for pattern {}: {}", include, e),
                }
            }
        }

        if entries.is_empty() {
            if options.allow_empty {
                debug!("No files matched {:?}", self.includes);
                return Ok(Vec::new());
            }
            return Err(ReleaseError::pattern(
                "No files matched a pattern that disallows empty matches",
                self.includes.join(", "),
            ));
        }

        let mut copied = Vec::with_capacity(entries.len());
        for (source, dest) in entries {
            copy_file(&source, &dest)
                .map_err(|e| ReleaseError::file_system("copy", source.clone(), e))?;
            debug!("Copied {} -> {}", source.display(), dest.display());
            copied.push(dest);
        }

        Ok(copied)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.iter().any(|p| p.matches_path(path))
    }
}

fn glob_pattern(include: &str) -> Result<glob::Paths> {
    glob::glob(include)
        .map_err(|e| ReleaseError::pattern_with_source("Invalid glob pattern", include, e))
}

/// Remove one entry, reporting whether anything was there to remove
fn remove_entry(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Copy a file, creating parent directories and preserving permissions
fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    let bytes_copied = fs::copy(src, dst)?;

    let metadata = fs::metadata(src)?;
    fs::set_permissions(dst, metadata.permissions())?;

    Ok(bytes_copied)
}

/// The literal directory prefix of a pattern, i.e. everything before the
/// first wildcard component. Copies preserve structure relative to this.
fn pattern_base(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut base = PathBuf::new();

    for component in path.components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[']) {
            return base;
        }
        base.push(component);
    }

    // A fully literal pattern names one entry; its base is the parent directory.
    base.pop();
    base
}
