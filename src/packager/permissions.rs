//! Staging tree permission sanitization.
//!
//! Files are installed with the permissions they had when packaged, so the
//! tree has to be scrubbed after it is otherwise final. You're not allowed to
//! create .deb packages with setgid content, and Mac OS won't copy such files
//! out of a disk image; group/other write access is a policy warning for
//! several formats. Setuid is left alone: if it shows up it's likely a real
//! mistake that needs investigating.

use crate::packager::error::Result;
use std::path::Path;

/// Sanitizes the staging tree: clears the setgid bit everywhere, then
/// removes group/other write permission everywhere.
///
/// Both passes run over the final tree; they are independent of each other.
pub async fn sanitize(staging_root: &Path) -> Result<()> {
    clear_mode_bits(staging_root, 0o2000).await?;
    clear_mode_bits(staging_root, 0o022).await?;
    Ok(())
}

#[cfg(unix)]
async fn clear_mode_bits(root: &Path, bits: u32) -> Result<()> {
    use crate::packager::error::Error;
    use std::os::unix::fs::PermissionsExt;

    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&root) {
            let entry = entry?;
            // Entry-point links dangle until install time, and chmod would
            // follow a link that does resolve. Links carry no mode of their
            // own worth scrubbing.
            if entry.file_type().is_symlink() {
                continue;
            }
            let metadata = entry.metadata()?;
            let mode = metadata.permissions().mode();
            if mode & bits != 0 {
                std::fs::set_permissions(
                    entry.path(),
                    std::fs::Permissions::from_mode(mode & !bits),
                )?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("permission pass task failed: {}", e)))?
}

#[cfg(not(unix))]
async fn clear_mode_bits(_root: &Path, _bits: u32) -> Result<()> {
    // Mode bits don't exist here; Cygwin trees are delivered as-is.
    Ok(())
}
