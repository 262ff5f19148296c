//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Packages a compiled application tree into a platform-native artifact
#[derive(Parser, Debug)]
#[command(
    name = "distpack",
    version,
    about = "Packages a compiled application tree into a platform-native artifact",
    long_about = "Stages a project's installable files into a scratch tree, merges its \
compiled classes with the shared support library's into one archive, and writes the \
host platform's package metadata (Debian control + md5sums, SunOS pkginfo + prototype, \
Mac Info.plist + launcher script).

Run from the project root:
  distpack Evergreen evergreen ../salma-hayek"
)]
pub struct Args {
    /// Human-readable project name ("Evergreen")
    pub human_name: String,

    /// Machine-readable package name ("evergreen")
    pub machine_name: String,

    /// Path to the shared support library root
    pub support_root: PathBuf,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.human_name.is_empty() {
            return Err("Human project name cannot be empty".to_string());
        }
        if self.machine_name.is_empty() {
            return Err("Machine project name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_positional_arguments_parse() {
        let args = Args::try_parse_from(["distpack", "Evergreen", "evergreen", "../salma-hayek"])
            .expect("parse");
        assert_eq!(args.human_name, "Evergreen");
        assert_eq!(args.machine_name, "evergreen");
        assert_eq!(args.support_root, PathBuf::from("../salma-hayek"));
    }

    #[test]
    fn missing_arguments_fail_to_parse() {
        assert!(Args::try_parse_from(["distpack", "Evergreen"]).is_err());
    }

    #[test]
    fn extra_arguments_fail_to_parse() {
        assert!(Args::try_parse_from(["distpack", "a", "b", "c", "d"]).is_err());
    }
}
