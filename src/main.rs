//! distpack - platform-native packaging for a compiled application tree.
//!
//! This binary stages a project's installable files into a scratch tree and
//! produces the platform's native deliverable: a Debian filesystem tree, a
//! SunOS package tree, a Mac .app bundle, or a Cygwin installation tree.

mod cli;
mod error;
mod packager;

use std::process;

#[tokio::main]
async fn main() {
    // Progress and external tool invocations belong on stdout; only
    // diagnostics for fatal errors go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
