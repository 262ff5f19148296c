//! Top-level packaging orchestration.
//!
//! Stages run in a fixed, platform-dependent order; any failure is fatal and
//! nothing is rolled back. A failed run may leave the staging directory in an
//! inconsistent state, which the next run's delete-and-recreate step clears.
//! Turning a Linux or SunOS tree into the final binary package file requires
//! privilege escalation and is deferred to an external wrapper.

use crate::packager::{
    archive, file_list, jdk,
    error::Result,
    permissions, platform,
    platform::PlatformKind,
    settings::Settings,
    staging,
};

/// Packages the project for the platform we are running on.
pub async fn run(settings: &Settings) -> Result<()> {
    let platform = PlatformKind::detect()?;
    run_for_platform(settings, platform).await
}

/// Packages the project for an explicit platform.
pub async fn run_for_platform(settings: &Settings, platform: PlatformKind) -> Result<()> {
    log::info!(
        "Building {} for {}...",
        platform.native_artifact_name(),
        settings.human_name()
    );

    let installable = file_list::installer_files(settings.project_root()).await?;
    let staging = staging::build(settings, platform, &installable).await?;

    // The archive path must be absolute because jar runs from inside each
    // class tree.
    let jar_tool = jdk::locate_jar_tool()?;
    let classes_jar = staging
        .project_resources()
        .canonicalize()?
        .join(".generated/classes.jar");
    archive::merge(
        &jar_tool,
        &settings.project_root().join(".generated/classes"),
        &settings.support_root().join(".generated/classes"),
        &classes_jar,
    )
    .await?;

    platform::generate_metadata(platform, settings, &staging).await?;

    permissions::sanitize(staging.root()).await?;

    Ok(())
}
