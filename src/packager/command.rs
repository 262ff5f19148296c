//! External tool execution.
//!
//! All external tools go through [`run`], so the failure policy is uniform:
//! failure to spawn or a nonzero exit status is fatal and surfaces
//! synchronously. There are no retries and no timeouts anywhere; a transient
//! failure fails the whole run.

use crate::packager::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    path::Path,
};

/// Runs an external command to completion and returns its captured stdout.
///
/// The invocation is echoed to stdout before spawning so a packaging run can
/// be audited. When `cwd` is given the child runs there; the parent process
/// never changes its own working directory.
pub async fn run(
    program: impl AsRef<OsStr>,
    args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    cwd: Option<&Path>,
) -> Result<String> {
    let program = program.as_ref().to_os_string();
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();

    let display = command_line(&program, &args);
    log::info!("{}", display);

    let mut command = tokio::process::Command::new(&program);
    command.args(&args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().await.map_err(|error| Error::CommandFailed {
        command: display.clone(),
        error,
    })?;

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("status {}", code),
            None => "signal".to_string(),
        };
        return Err(Error::CommandStatus {
            command: display,
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn command_line(program: &OsStr, args: &[OsString]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
