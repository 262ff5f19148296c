//! Platform profiles and per-platform metadata generation.
//!
//! The four supported platforms form a closed set. All per-platform branching
//! dispatches over [`PlatformKind`]; no stage of the pipeline compares host-OS
//! strings itself.

mod common;
pub mod cygwin;
pub mod darwin;
pub mod linux;
pub mod sunos;

use crate::packager::{
    error::{Error, Result},
    settings::Settings,
    staging::StagingTree,
};

/// The packaging strategies this program knows how to execute.
///
/// Resolved once at startup from the host environment and never changed
/// during a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlatformKind {
    /// Debian filesystem tree with `DEBIAN/control` and `DEBIAN/md5sums`.
    Linux,

    /// SunOS package tree with `pkginfo` and `prototype`.
    SunOS,

    /// Mac `.app` bundle with `Info.plist`, `PkgInfo`, and a launcher script.
    Darwin,

    /// Plain installation tree; the staged files are the deliverable.
    Cygwin,
}

impl PlatformKind {
    /// Maps a host-OS identifier to a packaging strategy.
    ///
    /// Accepts both `uname -s` spellings ("Linux", "Darwin", "SunOS",
    /// "CYGWIN_NT-...") and the values of `std::env::consts::OS`. Anything
    /// else fails fatally, naming the unsupported OS; this is a deliberate
    /// early abort, not a retryable condition.
    pub fn resolve(host_os: &str) -> Result<Self> {
        match host_os {
            "Linux" | "linux" => Ok(Self::Linux),
            "SunOS" | "solaris" | "illumos" => Ok(Self::SunOS),
            "Darwin" | "macos" => Ok(Self::Darwin),
            "Cygwin" | "windows" => Ok(Self::Cygwin),
            other if other.starts_with("CYGWIN") => Ok(Self::Cygwin),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Resolves the packaging strategy for the machine we are running on.
    pub fn detect() -> Result<Self> {
        Self::resolve(std::env::consts::OS)
    }

    /// Directory name under `.generated/native/` for this platform's
    /// staging trees.
    pub fn directory_name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::SunOS => "sunos",
            Self::Darwin => "darwin",
            Self::Cygwin => "cygwin",
        }
    }

    /// Human description of the deliverable, used in progress output.
    pub fn native_artifact_name(&self) -> &'static str {
        match self {
            Self::Linux => "Debian file system tree",
            Self::SunOS => "SunOS package tree",
            Self::Darwin => ".app bundle",
            Self::Cygwin => "installation tree",
        }
    }
}

/// Runs this platform's metadata generation over a fully populated staging
/// tree.
///
/// Called after the class archive has been merged into place, because several
/// metadata fields (installed size, checksums) derive from the tree's final
/// contents.
pub async fn generate_metadata(
    platform: PlatformKind,
    settings: &Settings,
    staging: &StagingTree,
) -> Result<()> {
    match platform {
        PlatformKind::Linux => linux::generate(settings, staging).await,
        PlatformKind::SunOS => sunos::generate(settings, staging).await,
        PlatformKind::Darwin => darwin::generate(settings, staging).await,
        PlatformKind::Cygwin => cygwin::generate(settings, staging).await,
    }
}
