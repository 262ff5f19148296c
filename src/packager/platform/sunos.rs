//! SunOS package tree metadata.
//!
//! Mirrors the Debian tree population under a `root/` staging prefix, then
//! writes the `pkginfo` key-value file and the `prototype` manifest. The
//! manifest body comes from pkgproto(1) run against the staged root,
//! post-processed to install as `root bin` and to correct the paths under
//! `/usr`.

use super::common;
use crate::packager::{
    command, description,
    error::{Error, ErrorExt, Result},
    settings::Settings,
    staging::StagingTree,
    utils::fs,
};
use regex::Regex;

/// SunOS package names carry a vendor prefix.
const PACKAGE_PREFIX: &str = "SJO";

const VENDOR_URL: &str = "http://beatniksoftware.com/";
const VENDOR_EMAIL: &str = "alex@beatniksoftware.com";

/// Maintainer scripts pkgadd(1) understands, in prototype order.
const INSTALL_SCRIPTS: [&str; 4] = ["preinstall", "preremove", "postinstall", "postremove"];

/// Generates all SunOS metadata over a populated staging tree.
pub async fn generate(settings: &Settings, staging: &StagingTree) -> Result<()> {
    let package_name = sunos_package_name(settings.machine_name())?;

    let root = staging.root();
    let install_root = root.join("root");

    let doc_root = install_root.join("usr/share/doc").join(&package_name);
    common::copy_doc_tree(settings.project_root(), &doc_root).await?;

    common::copy_desktop_files(
        staging.project_resources(),
        &install_root.join("usr/share/applications"),
    )
    .await?;

    common::copy_terminfo(
        settings.project_root(),
        &install_root.join("usr/share/lib/terminfo"),
    )
    .await?;

    common::install_bin_links(
        staging.project_resources(),
        &install_root,
        &install_root.join("usr/bin"),
        false,
    )
    .await?;

    let description = description::description_from_html(settings.project_root())?;
    let pkginfo = render_pkginfo(
        &package_name,
        settings.human_name(),
        settings.version_string(),
        &description,
    );
    let pkginfo_path = root.join("pkginfo");
    tokio::fs::write(&pkginfo_path, pkginfo)
        .await
        .fs_context("writing pkginfo", &pkginfo_path)?;

    fs::maybe_copy_file(&settings.project_root().join("COPYING"), &root.join("copyright")).await?;

    let mut prototype = String::from("i pkginfo\ni copyright\n");
    for script in INSTALL_SCRIPTS {
        let src = staging.project_resources().join("lib/SunOS").join(script);
        if src.is_file() {
            fs::copy_file(&src, &root.join(script)).await?;
            prototype.push_str(&format!("i {}\n", script));
        }
    }

    // pkgproto reports files as owned by whoever ran it; packages install as
    // root bin.
    let (user, group) = current_user_and_group()?;
    let proto_output = command::run("pkgproto", ["."], Some(&install_root)).await?;
    for line in proto_output.lines() {
        prototype.push_str(&rewrite_prototype_line(line, &user, &group));
        prototype.push('\n');
    }

    let prototype_path = root.join("prototype");
    tokio::fs::write(&prototype_path, prototype)
        .await
        .fs_context("writing prototype", &prototype_path)?;

    Ok(())
}

/// Prefixes the machine name and validates it as a SunOS package name.
pub fn sunos_package_name(machine_name: &str) -> Result<String> {
    let package_name = format!("{}{}", PACKAGE_PREFIX, machine_name);
    let pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-+]+$")?;
    if !pattern.is_match(&package_name) {
        return Err(Error::InvalidPackageName(package_name));
    }
    Ok(package_name)
}

/// Renders the `pkginfo` key-value file.
fn render_pkginfo(package_name: &str, human_name: &str, version: &str, desc: &str) -> String {
    let mut pkginfo = String::new();
    pkginfo.push_str(&format!("PKG={}\n", package_name));
    pkginfo.push_str(&format!(
        "NAME={} - {}\n",
        human_name,
        description::generic_description(human_name)
    ));
    pkginfo.push_str(&format!("DESC={}\n", desc));
    pkginfo.push_str(&format!("VERSION={}\n", version));
    pkginfo.push_str("CATEGORY=application\n");
    pkginfo.push_str(&format!("VENDOR={}\n", VENDOR_URL));
    pkginfo.push_str(&format!("EMAIL={}\n", VENDOR_EMAIL));
    pkginfo
}

/// Rewrites one pkgproto(1) output line: the run-as user and group become
/// `root bin`, and the bare `usr` paths become `/usr`.
fn rewrite_prototype_line(line: &str, user: &str, group: &str) -> String {
    let run_as = format!(" {} {}", user, group);
    let line = match line.strip_suffix(run_as.as_str()) {
        Some(rest) => format!("{} root bin", rest),
        None => line.to_string(),
    };
    line.replacen("none usr", "none /usr", 1)
}

#[cfg(unix)]
fn current_user_and_group() -> Result<(String, String)> {
    let user = users::get_current_username()
        .ok_or_else(|| Error::GenericError("couldn't determine the current user name".into()))?;
    let group = users::get_current_groupname()
        .ok_or_else(|| Error::GenericError("couldn't determine the current group name".into()))?;
    Ok((
        user.to_string_lossy().into_owned(),
        group.to_string_lossy().into_owned(),
    ))
}

#[cfg(not(unix))]
fn current_user_and_group() -> Result<(String, String)> {
    Err(Error::GenericError(
        "SunOS packaging needs a Unix host".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_name_gets_the_vendor_prefix() {
        assert_eq!(sunos_package_name("bar").expect("valid"), "SJObar");
    }

    #[test]
    fn names_with_spaces_are_rejected() {
        assert!(matches!(
            sunos_package_name("foo bar"),
            Err(Error::InvalidPackageName(_))
        ));
    }

    #[test]
    fn pkginfo_has_the_conventional_fields() {
        let pkginfo = render_pkginfo("SJObar", "Bar", "123", "A bar of foos.");
        assert!(pkginfo.starts_with("PKG=SJObar\n"));
        assert!(pkginfo.contains("NAME=Bar - beatniksoftware.com's Bar\n"));
        assert!(pkginfo.contains("DESC=A bar of foos.\n"));
        assert!(pkginfo.contains("VERSION=123\n"));
        assert!(pkginfo.contains("CATEGORY=application\n"));
        assert!(pkginfo.ends_with("EMAIL=alex@beatniksoftware.com\n"));
    }

    #[test]
    fn prototype_lines_install_as_root_bin() {
        let line = "f none usr/share/bar/bin/bar 0755 fred staff";
        assert_eq!(
            rewrite_prototype_line(line, "fred", "staff"),
            "f none /usr/share/bar/bin/bar 0755 root bin"
        );
    }

    #[test]
    fn prototype_lines_for_other_owners_are_untouched() {
        let line = "d none /opt/bar 0755 alice users";
        assert_eq!(rewrite_prototype_line(line, "fred", "staff"), line);
    }
}
