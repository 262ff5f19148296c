//! File system utilities for staging.
//!
//! Provides file operations with automatic parent directory creation. Every
//! operation takes explicit paths; nothing here touches the process working
//! directory.

use crate::bail;
use crate::packager::error::Result;
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if
/// specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    Ok(fs::create_dir_all(path).await?)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist. Listed
/// installable files are only validated upstream up to existence, so a
/// missing source here is an abort-worthy error.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{from:?} does not exist");
    }
    if !from.is_file() {
        bail!("{from:?} is not a file");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

/// Copies a file if the source exists, silently skipping it otherwise.
///
/// Documentation and dependency-declaration inputs are optional; their
/// absence is never escalated.
pub async fn maybe_copy_file(from: &Path, to: &Path) -> Result<()> {
    if from.is_file() {
        copy_file(from, to).await?;
    }
    Ok(())
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
pub fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}
