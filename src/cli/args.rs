//! Command-line argument parsing and validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Package Releaser - A reliable tool for building and publishing npm packages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "releaser")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Project directory containing the package manifest
    #[arg(short = 'C', long = "project-dir", global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild the output directory from scratch and copy the manifest into it
    Build,

    /// Compile all configured targets without touching existing output
    Compile,

    /// Remove compiled artifacts and the dependency cache from the source tree
    Clean,

    /// Release with a patch version bump
    #[command(name = "publish:patch", visible_alias = "publish")]
    PublishPatch,

    /// Release with a minor version bump
    #[command(name = "publish:minor")]
    PublishMinor,

    /// Release with a major version bump
    #[command(name = "publish:major")]
    PublishMajor,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_args() {
        let args = Args::try_parse_from(["releaser", "build"]).unwrap();
        assert!(!args.debug);
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert!(matches!(args.command, Command::Build));
    }

    #[test]
    fn test_parse_debug_flag() {
        let args = Args::try_parse_from(["releaser", "--debug", "clean"]).unwrap();
        assert!(args.debug);
        assert!(matches!(args.command, Command::Clean));
    }

    #[test]
    fn test_parse_project_dir() {
        let args =
            Args::try_parse_from(["releaser", "-C", "/tmp/widget", "compile"]).unwrap();
        assert_eq!(args.project_dir, PathBuf::from("/tmp/widget"));
        assert!(matches!(args.command, Command::Compile));
    }

    #[test]
    fn test_parse_publish_levels() {
        let args = Args::try_parse_from(["releaser", "publish:patch"]).unwrap();
        assert!(matches!(args.command, Command::PublishPatch));

        let args = Args::try_parse_from(["releaser", "publish:minor"]).unwrap();
        assert!(matches!(args.command, Command::PublishMinor));

        let args = Args::try_parse_from(["releaser", "publish:major"]).unwrap();
        assert!(matches!(args.command, Command::PublishMajor));
    }

    #[test]
    fn test_publish_is_an_alias_for_patch() {
        let args = Args::try_parse_from(["releaser", "publish"]).unwrap();
        assert!(matches!(args.command, Command::PublishPatch));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["releaser", "build", "--debug"]).unwrap();
        assert!(args.debug);
    }
}
