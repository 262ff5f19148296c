//! Staging tree construction.
//!
//! The staging tree is a scratch directory mirroring the install-time
//! filesystem layout. It is deleted and recreated for every run, populated
//! incrementally by the rest of the pipeline, and never reused.

use crate::bail;
use crate::packager::{
    error::{ErrorExt, Result},
    platform::{PlatformKind, darwin},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// A freshly built staging tree and the notable directories inside it.
#[derive(Debug)]
pub struct StagingTree {
    /// Root of the scratch tree.
    root: PathBuf,

    /// Platform-specific directory holding the installed payload.
    app_dir: PathBuf,

    /// `Resources/` directory under the app directory.
    resources_dir: PathBuf,

    /// `Resources/<machine-name>/`, the project's own payload.
    project_resources: PathBuf,
}

impl StagingTree {
    /// Returns the root of the staging tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the platform-specific application directory.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Returns the `Resources/` directory.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Returns the project's payload directory under `Resources/`.
    pub fn project_resources(&self) -> &Path {
        &self.project_resources
    }
}

/// Builds the staging tree for the given platform and copies the project's
/// installable files into it.
///
/// `installable` comes from the installer-file-list collaborator; each entry
/// is resolved against the project root and copied under
/// `Resources/<machine-name>/`, creating intermediate directories as needed.
/// A listed file that is missing on disk aborts the run.
///
/// Deleting and recreating the tree makes this idempotent: two runs with
/// identical inputs produce byte-identical trees.
pub async fn build(
    settings: &Settings,
    platform: PlatformKind,
    installable: &[PathBuf],
) -> Result<StagingTree> {
    let root = settings.staging_dir(platform);
    fs::create_dir_all(&root, true).await?;

    let app_dir = app_directory(&root, settings, platform);
    fs::create_dir_all(&app_dir, false).await?;

    if platform == PlatformKind::Darwin {
        // Skeleton .app bundle: MacOS/ for the launcher, a PkgInfo stub,
        // and the property list.
        fs::create_dir_all(&app_dir.join("MacOS"), false).await?;
        let pkg_info = app_dir.join("PkgInfo");
        tokio::fs::write(&pkg_info, "APPL????")
            .await
            .fs_context("writing PkgInfo", &pkg_info)?;
        darwin::write_info_plist(&app_dir, settings).await?;
    }

    let resources_dir = app_dir.join("Resources");
    fs::create_dir_all(&resources_dir, false).await?;

    let project_resources = resources_dir.join(settings.machine_name());
    fs::create_dir_all(&project_resources, false).await?;
    for relative in installable {
        let src = settings.project_root().join(relative);
        let dst = project_resources.join(relative);
        log::info!("about to copy {} to {}", src.display(), dst.display());
        if !src.is_file() {
            bail!("installable file {} does not exist", src.display());
        }
        fs::copy_file(&src, &dst).await?;
    }

    Ok(StagingTree {
        root,
        app_dir,
        resources_dir,
        project_resources,
    })
}

/// Shape of the application directory inside the staging tree.
fn app_directory(root: &Path, settings: &Settings, platform: PlatformKind) -> PathBuf {
    match platform {
        PlatformKind::Linux => root.join("usr/share").join(settings.machine_name()),
        PlatformKind::SunOS => root.join("root/usr/share").join(settings.machine_name()),
        PlatformKind::Darwin => root
            .join(format!("{}.app", settings.human_name()))
            .join("Contents"),
        PlatformKind::Cygwin => root.to_path_buf(),
    }
}
