//! Platform-native packaging library.
//!
//! Turns a compiled application tree into an installable artifact:
//! - Linux: a Debian filesystem tree with `DEBIAN/control` and `DEBIAN/md5sums`
//! - SunOS: a package tree with `pkginfo` and `prototype`
//! - Darwin: a `.app` bundle with `Info.plist`, `PkgInfo`, and a launcher script
//! - Cygwin: the staged installation tree itself
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, DistpackError, Result};
