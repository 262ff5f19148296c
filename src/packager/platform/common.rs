//! Tree-population helpers shared by the platform generators.

use crate::packager::{
    error::{ErrorExt, Result},
    utils::fs,
};
use std::path::Path;

/// Copies documentation into a Debian/SunOS-style `usr/share/doc/<name>/`
/// directory. The HTML is left out because the program itself reads that on
/// the web. Absent files are skipped.
pub(super) async fn copy_doc_tree(project_root: &Path, doc_root: &Path) -> Result<()> {
    fs::create_dir_all(doc_root, false).await?;
    fs::maybe_copy_file(&project_root.join("COPYING"), &doc_root.join("copyright")).await?;
    fs::maybe_copy_file(&project_root.join("README"), &doc_root.join("README")).await?;
    fs::maybe_copy_file(&project_root.join("TODO"), &doc_root.join("TODO")).await?;
    Ok(())
}

/// Copies documentation as `.txt` files at the deliverable root, the form
/// Darwin and Cygwin users expect. Absent files are skipped.
pub(super) async fn copy_doc_texts(project_root: &Path, dest_root: &Path) -> Result<()> {
    fs::maybe_copy_file(&project_root.join("COPYING"), &dest_root.join("COPYING.txt")).await?;
    fs::maybe_copy_file(&project_root.join("README"), &dest_root.join("README.txt")).await?;
    fs::maybe_copy_file(&project_root.join("TODO"), &dest_root.join("TODO.txt")).await?;
    Ok(())
}

/// Copies any `.desktop` files from the payload's `lib/` into the
/// applications directory. GNOME ignores symbolic links, so these are real
/// copies.
pub(super) async fn copy_desktop_files(
    project_resources: &Path,
    applications_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(applications_dir, false).await?;
    let lib_dir = project_resources.join("lib");
    if !lib_dir.is_dir() {
        return Ok(());
    }

    let mut entries = tokio::fs::read_dir(&lib_dir)
        .await
        .fs_context("reading payload lib directory", &lib_dir)?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("desktop") && path.is_file() {
            if let Some(name) = path.file_name() {
                fs::copy_file(&path, &applications_dir.join(name)).await?;
            }
        }
    }
    Ok(())
}

/// Copies compiled terminal-capability files into the platform's terminfo
/// tree. The compiled layout is one single-character directory per first
/// letter (`.generated/terminfo/x/xterm-foo`); a project without terminfo
/// files is skipped.
pub(super) async fn copy_terminfo(project_root: &Path, terminfo_dir: &Path) -> Result<()> {
    let generated_root = project_root.join(".generated/terminfo");
    if !generated_root.is_dir() {
        return Ok(());
    }

    let mut letters = tokio::fs::read_dir(&generated_root)
        .await
        .fs_context("reading terminfo directory", &generated_root)?;
    while let Some(letter) = letters.next_entry().await? {
        if !letter.file_type().await?.is_dir() || letter.file_name().len() != 1 {
            continue;
        }
        let dest_letter = terminfo_dir.join(letter.file_name());
        let mut files = tokio::fs::read_dir(letter.path()).await?;
        while let Some(file) = files.next_entry().await? {
            if file.file_type().await?.is_file() {
                fs::copy_file(&file.path(), &dest_letter.join(file.file_name())).await?;
            }
        }
    }
    Ok(())
}

/// Installs the payload's `bin/` entry points into `usr/bin` as symbolic
/// links pointing at their install-time locations.
///
/// `install_root` is the staging directory that corresponds to `/` at
/// install time. When `relocatable` is set the links are made relative
/// (Debian wants relative links so users can relocate packages).
pub(super) async fn install_bin_links(
    project_resources: &Path,
    install_root: &Path,
    usr_bin: &Path,
    relocatable: bool,
) -> Result<()> {
    let bin_dir = project_resources.join("bin");
    if !bin_dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(usr_bin, false).await?;

    let mut entries = tokio::fs::read_dir(&bin_dir)
        .await
        .fs_context("reading payload bin directory", &bin_dir)?;
    while let Some(entry) = entries.next_entry().await? {
        // The link target is where the file will end up at install time, so
        // the link dangles until the package is installed.
        let install_path = format!(
            "/{}",
            entry.path().strip_prefix(install_root)?.display()
        );
        let target = if relocatable {
            relocatable_link_target(&install_path)
        } else {
            install_path
        };

        #[cfg(unix)]
        fs::symlink_file(Path::new(&target), &usr_bin.join(entry.file_name()))?;
        #[cfg(not(unix))]
        let _ = target;
    }
    Ok(())
}

/// Rewrites an absolute `/usr/...` install path as a link source relative to
/// `usr/bin`.
pub(super) fn relocatable_link_target(install_path: &str) -> String {
    match install_path.strip_prefix("/usr/") {
        Some(rest) => format!("../{}", rest),
        None => install_path.to_string(),
    }
}

/// Total size of the staged payload in kilobytes, as reported to package
/// managers that display it pre-install.
pub(super) async fn installed_size_kb(root: &Path) -> Result<u64> {
    use crate::packager::error::Error;

    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<u64> {
        let mut total = 0u64;
        for entry in walkdir::WalkDir::new(&root) {
            let entry = entry?;
            if entry.file_type().is_file() {
                total += entry.metadata()?.len();
            }
        }
        Ok(total / 1024)
    })
    .await
    .map_err(|e| Error::GenericError(format!("size calculation task failed: {}", e)))?
}
