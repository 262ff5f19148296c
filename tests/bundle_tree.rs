//! End-to-end staging and metadata generation for the platforms that need
//! no external packaging tools.

use distpack::packager::{
    PlatformKind, ProjectSettings, SettingsBuilder, permissions, platform, staging,
};
use std::path::{Path, PathBuf};

fn seed_project(root: &Path) -> Vec<PathBuf> {
    std::fs::create_dir_all(root.join("bin")).expect("mkdir bin");
    std::fs::create_dir_all(root.join("lib")).expect("mkdir lib");
    std::fs::write(root.join("bin/foo"), b"#!/bin/sh\nexec foo\n").expect("write bin");
    std::fs::write(root.join("lib/Foo.icns"), b"icns").expect("write icns");
    std::fs::write(root.join("lib/foo.desktop"), b"[Desktop Entry]\n").expect("write desktop");
    std::fs::write(root.join("COPYING"), b"license text\n").expect("write COPYING");
    std::fs::write(root.join("README"), b"read me\n").expect("write README");
    vec![
        PathBuf::from("bin/foo"),
        PathBuf::from("lib/Foo.icns"),
        PathBuf::from("lib/foo.desktop"),
    ]
}

fn settings(project_root: &Path, support_root: &Path) -> distpack::packager::Settings {
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
async fn darwin_bundle_has_plist_pkginfo_and_launcher() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let project_root = tmp.path().join("foo");
    let files = seed_project(&project_root);
    let settings = settings(&project_root, &tmp.path().join("support"));

    let staging = staging::build(&settings, PlatformKind::Darwin, &files)
        .await
        .expect("staging");
    platform::generate_metadata(PlatformKind::Darwin, &settings, &staging)
        .await
        .expect("metadata");
    permissions::sanitize(staging.root()).await.expect("sanitize");

    let contents = staging.root().join("Foo.app/Contents");
    let plist = std::fs::read_to_string(contents.join("Info.plist")).expect("plist");
    assert!(plist.contains("<string>Foo.icns</string>"));
    assert!(plist.contains("<string>123</string>"));
    assert_eq!(std::fs::read(contents.join("PkgInfo")).expect("PkgInfo"), b"APPL????");
    assert!(contents.join("MacOS/Foo").is_file());
    assert!(contents.join("Resources/Foo.icns").is_file());
    assert!(contents.join("Resources/foo/bin/foo").is_file());
    assert!(staging.root().join("COPYING.txt").is_file());
    assert!(staging.root().join("README.txt").is_file());
}

#[cfg(unix)]
#[tokio::test]
async fn sanitized_cygwin_tree_has_no_group_writable_entries() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("tempdir");
    let project_root = tmp.path().join("foo");
    let files = seed_project(&project_root);
    std::fs::set_permissions(
        project_root.join("bin/foo"),
        std::fs::Permissions::from_mode(0o777),
    )
    .expect("chmod");
    let settings = settings(&project_root, &tmp.path().join("support"));

    let staging = staging::build(&settings, PlatformKind::Cygwin, &files)
        .await
        .expect("staging");
    platform::generate_metadata(PlatformKind::Cygwin, &settings, &staging)
        .await
        .expect("metadata");
    permissions::sanitize(staging.root()).await.expect("sanitize");

    for entry in walkdir::WalkDir::new(staging.root()) {
        let entry = entry.expect("walk");
        let mode = entry.metadata().expect("metadata").permissions().mode();
        assert_eq!(mode & 0o2000, 0, "setgid left on {:?}", entry.path());
        assert_eq!(mode & 0o022, 0, "writable left on {:?}", entry.path());
    }
}
