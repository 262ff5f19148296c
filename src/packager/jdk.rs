//! JDK root discovery.
//!
//! The archiving tool lives under the JDK's `bin/` directory, and users have
//! `java` on the path far more often than `jar`. We follow the compiler from
//! `$PATH` through any symbolic links (systems using /etc/alternatives are
//! especially likely to be set up that way) and take the directory above its
//! `bin/` as the JDK root.

use crate::packager::error::{Error, Result};
use std::path::PathBuf;

/// Returns the top-level directory of the JDK installation, if one can be
/// found via `javac` on the path.
pub fn find_jdk_root() -> Option<PathBuf> {
    let javac_on_path = which::which("javac").ok()?;

    // Follow links to the actual installation; it's the support files
    // alongside it we're really looking for.
    let javac_in_actual_location = javac_on_path.canonicalize().ok()?;

    let jdk_bin = javac_in_actual_location.parent()?;
    Some(jdk_bin.parent()?.to_path_buf())
}

/// Locates the archiving tool.
///
/// Prefers `<jdk-root>/bin/jar`; falls back to whatever `jar` is on the
/// path. Failing both is fatal because the class trees cannot be merged
/// without it.
pub fn locate_jar_tool() -> Result<PathBuf> {
    if let Some(jdk_root) = find_jdk_root() {
        let jar = jdk_root.join("bin/jar");
        if jar.is_file() {
            return Ok(jar);
        }
    }

    which::which("jar").map_err(|_| {
        Error::GenericError("couldn't find a JDK containing jar(1) on the path".to_string())
    })
}
