//! Core functionality for building and releasing packages
//!
//! Contains the main logic for reading package manifests, sequencing
//! release steps, and driving the external build and registry tools.

pub mod manifest;
pub mod release;

pub use manifest::{Level, Manifest};
pub use release::{PackageReleaser, StepOutcome};
