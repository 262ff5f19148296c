//! Revision token provider.
//!
//! Packaging needs a constrained form of version number. The build writes
//! `.generated/build-revision.txt` with a timestamp line followed by the
//! working-copy revision; we read it back rather than interrogating version
//! control ourselves. A tree without the file (an end-user building from a
//! source tarball, maybe) packages as revision "0".

use crate::packager::error::Result;
use std::path::Path;

const BUILD_REVISION_FILE: &str = ".generated/build-revision.txt";

/// Returns the opaque revision token for the project at `project_root`.
pub async fn revision_token(project_root: &Path) -> Result<String> {
    let path = project_root.join(BUILD_REVISION_FILE);
    if !path.is_file() {
        return Ok("0".to_string());
    }

    let contents = tokio::fs::read_to_string(&path).await?;
    // First line is the build timestamp, second the revision.
    let revision = contents.lines().nth(1).unwrap_or("0").trim();
    Ok(if revision.is_empty() {
        "0".to_string()
    } else {
        revision.to_string()
    })
}
