//! Debian filesystem tree metadata.
//!
//! Lays out documentation, desktop entries, manual pages, terminfo files,
//! and relative entry-point links under the staging tree, then writes the
//! `DEBIAN/md5sums` manifest and the `DEBIAN/control` record.

use super::common;
use crate::packager::{
    command, description,
    error::{Error, ErrorExt, Result},
    settings::Settings,
    staging::StagingTree,
    utils::fs,
};
use flate2::{Compression, write::GzEncoder};
use regex::Regex;
use std::{
    fs::{self as std_fs, File},
    io::{self, Write},
    path::Path,
};
use walkdir::WalkDir;

/// Every program needs a Ruby-based launcher at run time.
const BASE_DEPENDS: &str = "ruby (>= 1.8)";

const MAINTAINER: &str = "Alex Graveley <alex@beatniksoftware.com>";

/// Generates all Debian metadata over a populated staging tree.
pub async fn generate(settings: &Settings, staging: &StagingTree) -> Result<()> {
    // Validity is checked before anything is written under DEBIAN/.
    let package_name = debian_package_name(settings.machine_name())?;

    let root = staging.root();
    let doc_root = root.join("usr/share/doc").join(&package_name);
    common::copy_doc_tree(settings.project_root(), &doc_root).await?;

    common::copy_desktop_files(
        staging.project_resources(),
        &root.join("usr/share/applications"),
    )
    .await?;

    compress_man_pages(settings.project_root(), &root.join("usr/share/man/man1")).await?;

    common::copy_terminfo(settings.project_root(), &root.join("usr/share/terminfo")).await?;

    common::install_bin_links(
        staging.project_resources(),
        root,
        &root.join("usr/bin"),
        true,
    )
    .await?;

    // Size and checksums describe the payload, so both are computed before
    // the metadata directory exists.
    let installed_size = common::installed_size_kb(root).await?;
    let md5sums = compute_md5_manifest(root).await?;

    let debian_dir = root.join("DEBIAN");
    fs::create_dir_all(&debian_dir, false).await?;
    let md5sums_path = debian_dir.join("md5sums");
    tokio::fs::write(&md5sums_path, md5sums)
        .await
        .fs_context("writing md5sums manifest", &md5sums_path)?;

    let arch = command::run("dpkg-architecture", ["-qDEB_HOST_ARCH"], None).await?;
    write_control_file(
        settings,
        staging,
        &package_name,
        arch.trim(),
        installed_size,
    )
    .await?;

    Ok(())
}

/// Validates the machine name as a Debian package name.
pub fn debian_package_name(machine_name: &str) -> Result<String> {
    let pattern = Regex::new(r"^[a-z][a-z0-9+.-]+$")?;
    if !pattern.is_match(machine_name) {
        return Err(Error::InvalidPackageName(machine_name.to_string()));
    }
    Ok(machine_name.to_string())
}

/// Copies section-1 manual pages into the staged manual tree,
/// gzip-compressed at maximum level as Debian policy asks.
async fn compress_man_pages(project_root: &Path, man1_dir: &Path) -> Result<()> {
    fs::create_dir_all(man1_dir, false).await?;
    let src_dir = project_root.join("man/1");
    if !src_dir.is_dir() {
        return Ok(());
    }

    let src_dir = src_dir.to_path_buf();
    let man1_dir = man1_dir.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in std_fs::read_dir(&src_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("1") || !path.is_file() {
                continue;
            }
            let mut dest_name = entry.file_name();
            dest_name.push(".gz");
            let dest = man1_dir.join(dest_name);

            let mut src = File::open(&path).fs_context("opening manual page", &path)?;
            let dest_file = File::create(&dest).fs_context("creating compressed page", &dest)?;
            let mut encoder = GzEncoder::new(dest_file, Compression::new(9));
            io::copy(&mut src, &mut encoder)?;
            let mut finished = encoder.finish()?;
            finished.flush()?;
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("man page compression task failed: {}", e)))?
}

/// Computes the MD5 manifest over every regular file in the staging tree,
/// one `<hash>  <relative-path>` line per file, for the benefit of
/// debsums(1).
async fn compute_md5_manifest(root: &Path) -> Result<String> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<String> {
        let mut manifest = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let mut src = File::open(entry.path())
                .fs_context("opening file for checksum", entry.path())?;
            let mut context = md5::Context::new();
            io::copy(&mut src, &mut context)?;
            let digest = context.finalize();

            for byte in digest.iter() {
                write!(manifest, "{:02x}", byte)?;
            }
            let rel_path = entry.path().strip_prefix(&root)?;
            writeln!(manifest, "  {}", rel_path.display())?;
        }
        Ok(String::from_utf8_lossy(&manifest).into_owned())
    })
    .await
    .map_err(|e| Error::GenericError(format!("checksum task failed: {}", e)))?
}

/// Reads an optional comma-joinable dependency declaration, one entry per
/// line. Absence yields an empty string.
async fn read_dependency_list(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Ok(String::new());
    }
    let contents = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading dependency file", path)?;
    Ok(contents.lines().collect::<Vec<_>>().join(", "))
}

/// Writes `DEBIAN/control` with its fields in the conventional order.
async fn write_control_file(
    settings: &Settings,
    staging: &StagingTree,
    package_name: &str,
    arch: &str,
    installed_size: u64,
) -> Result<()> {
    let mut depends = BASE_DEPENDS.to_string();
    // Some programs work much better if other tools are available; a project
    // may list extra runtime dependencies, one per line.
    let extra_depends =
        read_dependency_list(&staging.project_resources().join("lib/DEBIAN-control-Depends.txt"))
            .await?;
    if !extra_depends.is_empty() {
        depends.push_str(", ");
        depends.push_str(&extra_depends);
    }

    let recommends = read_dependency_list(
        &staging
            .project_resources()
            .join("lib/DEBIAN-control-Recommends.txt"),
    )
    .await?;

    // Build dependencies come from the shared support library; unlike the
    // per-project extras, this declaration is mandatory.
    let build_depends_path = settings
        .support_root()
        .join("lib/DEBIAN-control-Build-Depends.txt");
    let build_depends = tokio::fs::read_to_string(&build_depends_path)
        .await
        .fs_context("reading build dependency file", &build_depends_path)?
        .lines()
        .collect::<Vec<_>>()
        .join(", ");

    let description = description::debian_description(settings.project_root(), settings.human_name())?;

    let control_path = staging.root().join("DEBIAN/control");
    let package = package_name.to_string();
    let version = settings.version_string().to_string();
    let arch = arch.to_string();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut file = File::create(&control_path)
            .fs_context("creating control file", &control_path)?;

        writeln!(file, "Package: {}", package)?;
        writeln!(file, "Version: {}", version)?;
        writeln!(file, "Priority: optional")?;
        writeln!(file, "Architecture: {}", arch)?;
        writeln!(file, "Depends: {}", depends)?;
        writeln!(file, "Recommends: {}", recommends)?;
        writeln!(file, "Build-Depends: {}", build_depends)?;
        writeln!(file, "Installed-Size: {}", installed_size)?;
        writeln!(file, "Maintainer: {}", MAINTAINER)?;
        writeln!(file, "Description: {}", description)?;

        file.flush()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("control file task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::platform::PlatformKind;
    use crate::packager::settings::{ProjectSettings, SettingsBuilder};
    use crate::packager::staging;
    use std::path::PathBuf;

    #[test]
    fn lowercase_names_are_valid() {
        assert_eq!(debian_package_name("evergreen").expect("valid"), "evergreen");
        assert_eq!(debian_package_name("foo-bar.2+x").expect("valid"), "foo-bar.2+x");
    }

    #[test]
    fn uppercase_and_short_names_are_rejected() {
        assert!(matches!(
            debian_package_name("Foo"),
            Err(Error::InvalidPackageName(_))
        ));
        assert!(debian_package_name("f").is_err());
        assert!(debian_package_name("foo bar").is_err());
        assert!(debian_package_name("2foo").is_err());
    }

    fn settings(project_root: &Path, support_root: &Path) -> Settings {
        SettingsBuilder::new()
            .project(ProjectSettings {
                human_name: "Foo".into(),
                machine_name: "foo".into(),
                version: "123".into(),
            })
            .project_root(project_root)
            .support_root(support_root)
            .build()
            .expect("settings")
    }

    #[tokio::test]
    async fn md5_manifest_covers_every_regular_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("sub")).expect("mkdir");
        std::fs::write(tmp.path().join("sub/greeting"), b"hello\n").expect("write");

        let manifest = compute_md5_manifest(tmp.path()).await.expect("manifest");
        assert_eq!(
            manifest,
            "b1946ac92492d2347c6235b4d2611184  sub/greeting\n"
        );
    }

    #[tokio::test]
    async fn control_file_baseline_fields() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let project_root = tmp.path().join("foo");
        let support_root = tmp.path().join("support");
        std::fs::create_dir_all(project_root.join("bin")).expect("mkdir");
        std::fs::write(project_root.join("bin/foo"), b"#!/bin/sh\n").expect("write");
        std::fs::create_dir_all(support_root.join("lib")).expect("mkdir");
        std::fs::write(
            support_root.join("lib/DEBIAN-control-Build-Depends.txt"),
            "build-essential\nruby\n",
        )
        .expect("write");

        let settings = settings(&project_root, &support_root);
        let staging = staging::build(&settings, PlatformKind::Linux, &[PathBuf::from("bin/foo")])
            .await
            .expect("staging");
        std::fs::create_dir_all(staging.root().join("DEBIAN")).expect("mkdir");

        let size = common::installed_size_kb(staging.root()).await.expect("size");
        write_control_file(&settings, &staging, "foo", "amd64", size)
            .await
            .expect("control");

        let control =
            std::fs::read_to_string(staging.root().join("DEBIAN/control")).expect("read");
        assert!(control.starts_with("Package: foo\nVersion: 123\nPriority: optional\n"));
        assert!(control.contains("Architecture: amd64\n"));
        assert!(control.contains("Depends: ruby (>= 1.8)\n"));
        assert!(control.contains("Recommends: \n"));
        assert!(control.contains("Build-Depends: build-essential, ruby\n"));
        assert!(control.contains(&format!("Installed-Size: {}\n", size)));
        assert!(control.contains("Description: beatniksoftware.com's Foo\n"));
    }

    #[tokio::test]
    async fn missing_build_depends_file_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let project_root = tmp.path().join("foo");
        std::fs::create_dir_all(&project_root).expect("mkdir");

        let settings = settings(&project_root, &tmp.path().join("absent-support"));
        let staging = staging::build(&settings, PlatformKind::Linux, &[])
            .await
            .expect("staging");
        std::fs::create_dir_all(staging.root().join("DEBIAN")).expect("mkdir");

        let result = write_control_file(&settings, &staging, "foo", "amd64", 0).await;
        assert!(matches!(result, Err(Error::Fs { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn entry_points_become_relative_links() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let project_root = tmp.path().join("foo");
        std::fs::create_dir_all(project_root.join("bin")).expect("mkdir");
        std::fs::write(project_root.join("bin/foo"), b"#!/bin/sh\n").expect("write");

        let settings = settings(&project_root, &tmp.path().join("support"));
        let staging = staging::build(&settings, PlatformKind::Linux, &[PathBuf::from("bin/foo")])
            .await
            .expect("staging");

        common::install_bin_links(
            staging.project_resources(),
            staging.root(),
            &staging.root().join("usr/bin"),
            true,
        )
        .await
        .expect("links");

        let link = staging.root().join("usr/bin/foo");
        let target = std::fs::read_link(&link).expect("readlink");
        assert_eq!(target, Path::new("../share/foo/bin/foo"));
    }
}
