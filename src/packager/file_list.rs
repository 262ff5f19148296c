//! Installer file list provider.
//!
//! The build system knows which files a project installs; asking it directly
//! keeps this program from guessing. `make installer-file-list` prints one
//! `Including <path>...` line per installable file, interleaved with whatever
//! other output the build feels like producing.

use crate::packager::{command, error::Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Enumerates the relative paths the project installs, in build-system order.
pub async fn installer_files(project_root: &Path) -> Result<Vec<PathBuf>> {
    let make = std::env::var("MAKE").unwrap_or_else(|_| "make".to_string());
    let output = command::run(
        &make,
        [
            "--no-print-directory",
            "-C",
            &project_root.to_string_lossy(),
            "-f",
            "make/universal.make",
            "installer-file-list",
        ],
        None,
    )
    .await?;

    parse_file_list(&output)
}

/// Parses `Including <path>...` lines out of build output.
///
/// Lines that don't match are echoed; the build sometimes prints the
/// commands it ran to regenerate its own include files.
pub fn parse_file_list(output: &str) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(r"^Including (.+)\.\.\.$")?;
    let mut files = Vec::new();
    for line in output.lines() {
        match pattern.captures(line) {
            Some(captures) => files.push(PathBuf::from(&captures[1])),
            None => log::info!("{}", line),
        }
    }
    Ok(files)
}
