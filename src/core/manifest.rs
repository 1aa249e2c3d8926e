//! Package manifest handling
//!
//! Reads the package metadata file (name, version) that gets copied into
//! the build output and mutated by the registry client's version command.

use crate::error::{ReleaseError, Result};
use semver::Version;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument};

/// Information extracted from a package manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Package name
    pub name: String,
    /// Package version
    pub version: Version,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: String,
    version: String,
}

impl Manifest {
    /// Load and validate a manifest file
    #[instrument]
    pub fn load<P: AsRef<Path> + fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading manifest: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| ReleaseError::file_system("read", path.to_path_buf(), e))?;

        let raw: RawManifest = serde_json::from_str(&content).map_err(|e| {
            ReleaseError::manifest_with_source("Failed to parse manifest JSON", path, e)
        })?;

        if raw.name.is_empty() {
            return Err(ReleaseError::manifest("Package name is empty", path));
        }

        let version = Version::parse(&raw.version).map_err(|e| {
            ReleaseError::manifest_with_source(
                format!("Invalid package version '{}'", raw.version),
                path,
                e,
            )
        })?;

        debug!("Parsed manifest: {}@{}", raw.name, version);
        Ok(Self {
            name: raw.name,
            version,
        })
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Semantic-version segment incremented on publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// x.y.Z
    Patch,
    /// x.Y.0
    Minor,
    /// X.0.0
    Major,
}

impl Level {
    /// The argument the registry client's version command expects
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }

    /// Compute the version this bump level yields
    #[must_use]
    pub fn apply(self, version: &Version) -> Version {
        match self {
            Self::Patch => Version::new(version.major, version.minor, version.patch + 1),
            Self::Minor => Version::new(version.major, version.minor + 1, 0),
            Self::Major => Version::new(version.major + 1, 0, 0),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
