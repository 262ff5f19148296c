//! Command line interface for distpack.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::packager::{ProjectSettings, SettingsBuilder, driver, version};
use clap::Parser;

/// Main CLI entry point.
///
/// Returns the process exit code: 0 on success, 1 for usage errors. Other
/// fatal conditions propagate as errors and are reported by `main`.
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap routes --help/--version to stdout; real usage errors
            // belong on stderr with a nonzero exit.
            let is_usage_error = e.use_stderr();
            e.print()?;
            return Ok(if is_usage_error { 1 } else { 0 });
        }
    };
    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    // The project being packaged is the one we're run from.
    let project_root = std::env::current_dir()?;
    let version = version::revision_token(&project_root).await?;

    let settings = SettingsBuilder::new()
        .project(ProjectSettings {
            human_name: args.human_name,
            machine_name: args.machine_name,
            version,
        })
        .project_root(&project_root)
        .support_root(&args.support_root)
        .build()?;

    driver::run(&settings).await?;
    Ok(0)
}
