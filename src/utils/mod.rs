//! Utility modules for common functionality
//!
//! Provides reusable utilities for glob-based file operations and
//! process execution.

pub mod fs;
pub mod process;

pub use fs::FileSet;
pub use process::ProcessRunner;
