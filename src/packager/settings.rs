//! Configuration for a packaging run.

use crate::packager::platform::PlatformKind;
use std::path::{Path, PathBuf};

/// Project identity, immutable once constructed from CLI input.
#[derive(Debug, Clone, Default)]
pub struct ProjectSettings {
    /// Human-readable project name, shown to users ("Evergreen").
    pub human_name: String,

    /// Machine-readable project name, safe for package managers ("evergreen").
    pub machine_name: String,

    /// Opaque revision token from the version provider ("1427", "0").
    pub version: String,
}

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`]. Paths are always explicit; no stage
/// of the pipeline relies on the process working directory.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project identity.
    project: ProjectSettings,

    /// Root of the project being packaged.
    project_root: PathBuf,

    /// Root of the shared support library whose classes are merged into the
    /// project's archive.
    support_root: PathBuf,
}

impl Settings {
    /// Returns the human-readable project name.
    pub fn human_name(&self) -> &str {
        &self.project.human_name
    }

    /// Returns the machine-readable project name.
    pub fn machine_name(&self) -> &str {
        &self.project.machine_name
    }

    /// Returns the revision token.
    pub fn version_string(&self) -> &str {
        &self.project.version
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the shared support library root.
    pub fn support_root(&self) -> &Path {
        &self.support_root
    }

    /// Returns the deterministic staging directory for this project on the
    /// given platform.
    ///
    /// The directory is deleted and recreated at the start of every run, so
    /// two runs with identical inputs produce byte-identical trees.
    pub fn staging_dir(&self, platform: PlatformKind) -> PathBuf {
        self.project_root
            .join(".generated/native")
            .join(platform.directory_name())
            .join(&self.project.machine_name)
    }

    pub(super) fn new(
        project: ProjectSettings,
        project_root: PathBuf,
        support_root: PathBuf,
    ) -> Self {
        Self {
            project,
            project_root,
            support_root,
        }
    }
}

/// Builder for constructing [`Settings`].
#[derive(Default)]
pub struct SettingsBuilder {
    project: Option<ProjectSettings>,
    project_root: Option<PathBuf>,
    support_root: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project identity.
    ///
    /// Required for building.
    pub fn project(mut self, project: ProjectSettings) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the project root directory.
    ///
    /// Required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the shared support library root.
    ///
    /// Required for building.
    pub fn support_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.support_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing.
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        Ok(Settings::new(
            self.project.context("project is required")?,
            self.project_root.context("project_root is required")?,
            self.support_root.context("support_root is required")?,
        ))
    }
}
