//! Class tree merging.
//!
//! A single archive has to contain both the project's unique classes and all
//! the classes from the shared support library. Doing it in one pass risks a
//! "duplicate entry" failure from jar(1) when both trees share a package
//! prefix, so the merge is strictly two sequential passes: create from the
//! primary tree, then update from the secondary tree. The ordering is a
//! correctness requirement, not an optimization.

use crate::packager::{command, error::Result, utils::fs};
use std::{ffi::OsStr, path::Path};

/// Merges two compiled-output trees into one archive at `output`.
///
/// Each tree's files enter the archive with their paths relative to that
/// tree's root; `jar` runs with the tree root as its working directory
/// rather than by chdir-ing this process. A nonzero exit from either pass is
/// fatal; no partial archive is left usable.
pub async fn merge(
    jar_tool: &Path,
    primary_root: &Path,
    secondary_root: &Path,
    output: &Path,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent, false).await?;
    }

    command::run(
        jar_tool,
        [OsStr::new("cf"), output.as_os_str(), OsStr::new(".")],
        Some(primary_root),
    )
    .await?;

    command::run(
        jar_tool,
        [OsStr::new("uf"), output.as_os_str(), OsStr::new(".")],
        Some(secondary_root),
    )
    .await?;

    Ok(())
}
