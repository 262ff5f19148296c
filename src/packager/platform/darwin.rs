//! Mac `.app` bundle metadata.
//!
//! The property list and `PkgInfo` stub are written while the bundle
//! skeleton is staged; after the payload and class archive are in place this
//! module positions the icon and generates the launcher script.

use super::common;
use crate::packager::{
    error::{ErrorExt, Result},
    settings::Settings,
    staging::StagingTree,
    utils::fs,
};
use std::path::Path;

const BUNDLE_IDENTIFIER_PREFIX: &str = "com.beatniksoftware";

/// Finishes the bundle over a populated staging tree: icon, launcher
/// script, and root-level documentation.
pub async fn generate(settings: &Settings, staging: &StagingTree) -> Result<()> {
    // Apple doesn't let you give a path to a .icns file, and doesn't seem to
    // always follow symbolic links, so the icon is copied into position.
    let icon_name = format!("{}.icns", settings.human_name());
    fs::copy_file(
        &staging.project_resources().join("lib").join(&icon_name),
        &staging.resources_dir().join(&icon_name),
    )
    .await?;

    write_launcher_script(settings, staging.app_dir()).await?;

    common::copy_doc_texts(settings.project_root(), staging.root()).await?;

    Ok(())
}

/// Writes a minimal `Info.plist` into the bundle's `Contents/` directory.
///
/// Contrary to the documentation, `CFBundleIconFile` must end ".icns".
pub async fn write_info_plist(app_contents_dir: &Path, settings: &Settings) -> Result<()> {
    let plist_path = app_contents_dir.join("Info.plist");
    let plist = render_info_plist(settings.human_name(), settings.version_string());
    tokio::fs::write(&plist_path, plist)
        .await
        .fs_context("writing Info.plist", &plist_path)
}

fn render_info_plist(human_name: &str, version: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
 <dict>
  <key>CFBundleIconFile</key>
  <string>{human_name}.icns</string>
  <key>CFBundleIdentifier</key>
  <string>{BUNDLE_IDENTIFIER_PREFIX}.{human_name}</string>
  <key>CFBundleName</key>
  <string>{human_name}</string>
  <key>CFBundlePackageType</key>
  <string>APPL</string>
  <key>CFBundleSignature</key>
  <string>????</string>
  <key>CFBundleVersion</key>
  <string>{version}</string>
 </dict>
</plist>
"#
    )
}

/// Writes the login-shell launcher into `Contents/MacOS/` and marks it
/// executable.
async fn write_launcher_script(settings: &Settings, app_dir: &Path) -> Result<()> {
    let script_path = app_dir.join("MacOS").join(settings.human_name());
    let script = render_launcher_script(settings.machine_name());
    tokio::fs::write(&script_path, script)
        .await
        .fs_context("writing launcher script", &script_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("marking launcher executable", &script_path)?;
    }

    Ok(())
}

fn render_launcher_script(machine_name: &str) -> String {
    let mut script = String::from("#!/bin/bash --login\n");
    script.push_str("# Find our Resources/ directory.\n");
    script.push_str(
        "resources=`ruby -rpathname -e 'puts(Pathname.new(ARGV[0]).realpath().dirname().dirname() + \"Resources\")' \"$0\"`\n",
    );
    script.push_str("# We started Bash as a login shell so that our application has access to the user's expected path.\n");
    script.push_str("# Finder seems to start applications in /.\n");
    script.push_str("# Most users will be more comfortable in their home directory.\n");
    script.push_str("cd\n");
    script.push_str("# Applications started with a double-click have useless (to us) arguments specifying process serial number.\n");
    script.push_str("# Strip leading examples of such before they interfere.\n");
    script.push_str("while [[ \"${1:0:5}\" = \"-psn_\" ]]; do shift; done\n");
    script.push_str(&format!(
        "\"$resources/lib/ensure-suitable-mac-os-version.rb\" && exec \"$resources/{machine_name}/bin/{machine_name}\" \"$@\"\n",
    ));
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::platform::PlatformKind;
    use crate::packager::settings::{ProjectSettings, SettingsBuilder};
    use crate::packager::staging;
    use std::path::PathBuf;

    #[test]
    fn icon_file_always_ends_in_icns() {
        for human_name in ["Foo", "Terminator", "A Name With Spaces"] {
            let plist = render_info_plist(human_name, "1");
            assert!(plist.contains(&format!("<string>{}.icns</string>", human_name)));
        }
    }

    #[test]
    fn plist_declares_an_application_bundle() {
        let plist = render_info_plist("Foo", "123");
        assert!(plist.contains("<string>APPL</string>"));
        assert!(plist.contains("<string>????</string>"));
        assert!(plist.contains("<string>com.beatniksoftware.Foo</string>"));
        assert!(plist.contains("<string>123</string>"));
    }

    #[test]
    fn launcher_is_a_login_shell_that_strips_psn_arguments() {
        let script = render_launcher_script("foo");
        assert!(script.starts_with("#!/bin/bash --login\n"));
        assert!(script.contains("-psn_"));
        assert!(script.contains("cd\n"));
        assert!(script.contains("exec \"$resources/foo/bin/foo\" \"$@\""));
    }

    #[tokio::test]
    async fn generate_positions_icon_and_launcher() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let project_root = tmp.path().join("foo");
        std::fs::create_dir_all(project_root.join("lib")).expect("mkdir");
        std::fs::write(project_root.join("lib/Foo.icns"), b"icns").expect("write");
        std::fs::write(project_root.join("COPYING"), b"GPL\n").expect("write");

        let settings = SettingsBuilder::new()
            .project(ProjectSettings {
                human_name: "Foo".into(),
                machine_name: "foo".into(),
                version: "123".into(),
            })
            .project_root(&project_root)
            .support_root(tmp.path().join("support"))
            .build()
            .expect("settings");

        let staging = staging::build(
            &settings,
            PlatformKind::Darwin,
            &[PathBuf::from("lib/Foo.icns")],
        )
        .await
        .expect("staging");

        generate(&settings, &staging).await.expect("generate");

        assert!(staging.resources_dir().join("Foo.icns").is_file());
        assert!(staging.root().join("COPYING.txt").is_file());

        let launcher = staging.app_dir().join("MacOS/Foo");
        assert!(launcher.is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&launcher).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }
}
