//! Platform-native packaging for a compiled application tree.
//!
//! The pipeline is strictly sequential: every stage depends on the filesystem
//! state produced by the previous one, and any failure aborts the run. The
//! staging directory is deleted and recreated at the start of each run, so a
//! failed run leaves nothing the next run has to care about.
//!
//! | Platform | Deliverable | Metadata |
//! |----------|-------------|----------|
//! | Linux | Debian file system tree | `DEBIAN/control`, `DEBIAN/md5sums` |
//! | SunOS | SunOS package tree | `pkginfo`, `prototype` |
//! | Darwin | `.app` bundle | `Info.plist`, `PkgInfo`, launcher script |
//! | Cygwin | installation tree | none |

pub mod archive;
pub mod command;
pub mod description;
pub mod driver;
mod error;
pub mod file_list;
pub mod jdk;
pub mod permissions;
pub mod platform;
pub mod settings;
pub mod staging;
mod utils;
pub mod version;

// Public re-exports
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::PlatformKind;
pub use settings::{ProjectSettings, Settings, SettingsBuilder};
pub use staging::StagingTree;
