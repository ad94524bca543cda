// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CONTAINER_NAME, DEFAULT_IMAGE_URL, DEFAULT_REPO_FOLDER, GitPlugin};
use crate::error::FlagError;
use crate::plugin::{InitPlugin, PluginClients};

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

fn create(raw: &[&str], base_dir: &str) -> GitPlugin {
    GitPlugin::create(PluginClients::default(), &tokens(raw), base_dir)
}

#[test]
fn test_git_plugin_name() {
    let plugin = create(&[], "/work");
    assert_eq!(plugin.name(), "git");
    assert_eq!(GitPlugin::NAME, "git");

    let broken = create(&["-nope"], "/work");
    assert_eq!(broken.name(), "git");
}

#[test]
fn test_repo_folder_defaults_to_data() {
    for raw in [
        &["-repourl", "https://example.com/r.git"][..],
        &[][..],
        &["-repofolder", ""][..],
        &["-repofolder="][..],
    ] {
        let plugin = create(raw, "/work");
        assert_eq!(plugin.repo_folder(), DEFAULT_REPO_FOLDER, "{raw:?}");
    }
}

#[test]
fn test_repo_folder_from_parameters() {
    for folder in ["src", "my-repo", "nested/dir"] {
        let plugin = create(&["-repofolder", folder], "/work");
        assert_eq!(plugin.repo_folder(), folder);
    }
}

#[test]
fn test_image_defaults_and_override() {
    let mut plugin = create(&["-repourl", "https://x/y.git"], "/work");
    assert_eq!(plugin.image_url(), DEFAULT_IMAGE_URL);

    plugin.set_default_image("custom:v1");
    plugin.set_default_image("custom:v2");
    assert_eq!(plugin.image_url(), "custom:v2");
    assert_eq!(
        plugin.init_container().image.as_deref(),
        Some("custom:v2")
    );
}

#[test]
fn test_parse_error_is_not_fatal() {
    let plugin = create(
        &["-repourl", "https://x/y.git", "-branch", "main", "-repofolder", "src"],
        "/work",
    );
    assert_eq!(
        plugin.parse_error(),
        Some(&FlagError::Undefined("branch".to_string()))
    );
    assert_eq!(plugin.repo_url(), "https://x/y.git");
    // Parsing stopped at -branch, so the folder falls back to the default
    assert_eq!(plugin.repo_folder(), DEFAULT_REPO_FOLDER);
    assert_eq!(plugin.image_url(), DEFAULT_IMAGE_URL);
    assert_eq!(plugin.base_directory(), "/work");
}

#[test]
fn test_missing_value_is_not_fatal() {
    let plugin = create(&["-repourl"], "/work");
    assert_eq!(
        plugin.parse_error(),
        Some(&FlagError::MissingValue("repourl".to_string()))
    );
    assert_eq!(plugin.repo_url(), "");
    assert!(plugin.init_container().command.is_some());
}

#[test]
fn test_clean_parse_has_no_error() {
    let plugin = create(&["-repourl=https://x/y.git"], "/work");
    assert_eq!(plugin.parse_error(), None);
    assert_eq!(plugin.parameters(), ["-repourl=https://x/y.git"]);
}

#[test]
fn test_init_container_example() {
    let plugin = create(&["-repourl", "https://example.com/r.git"], "/work");
    let container = plugin.init_container();

    assert_eq!(container.name, CONTAINER_NAME);
    assert_eq!(container.image.as_deref(), Some("alpine/git:1.0.8"));
    assert_eq!(container.image_pull_policy.as_deref(), Some("IfNotPresent"));

    let command = container.command.unwrap();
    assert_eq!(command[..2], ["sh", "-c"]);
    assert_eq!(command.len(), 3);
    insta::assert_snapshot!("default_clone_script", &command[2]);
}

#[test]
fn test_init_container_serializes_as_kubernetes_container() {
    let plugin = create(&["-repourl", "https://x/y.git", "-repofolder", "src"], "/work");
    let value = serde_json::to_value(plugin.init_container()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "init-git-clone",
            "image": "alpine/git:1.0.8",
            "imagePullPolicy": "IfNotPresent",
            "command": [
                "sh",
                "-c",
                "cd /work && if [ ! -d ./src ]; then git clone -- https://x/y.git src; fi"
            ],
        })
    );
}

#[test]
fn test_override_image_scenario() {
    let mut plugin = create(&["-repourl", "https://x/y.git", "-repofolder", "src"], "/work");
    plugin.set_default_image("custom:v2");
    let container = plugin.init_container();

    assert_eq!(container.image.as_deref(), Some("custom:v2"));
    let command = container.command.unwrap();
    let script = &command[2];
    assert!(script.contains("[ ! -d ./src ]"), "{script}");
    assert!(script.contains("git clone -- https://x/y.git src"), "{script}");
}

#[test]
fn test_override_working_dir() {
    let mut plugin = create(&["-repourl", "https://x/y.git"], "/work");
    plugin.set_working_dir("/home/coder/project");
    assert_eq!(plugin.base_directory(), "/home/coder/project");
    assert!(
        plugin
            .clone_script()
            .starts_with("cd /home/coder/project && ")
    );
}

#[test]
fn test_init_container_is_idempotent() {
    let plugin = create(&["-repourl", "https://x/y.git"], "/work");
    assert_eq!(plugin.init_container(), plugin.init_container());
}

#[test]
fn test_script_quotes_unsafe_values() {
    let plugin = create(&["-repofolder", "my repo"], "/home/coder/it's here");
    insta::assert_snapshot!("quoted_clone_script", plugin.clone_script());
}

#[test]
fn test_empty_repo_url_still_produces_script() {
    let plugin = create(&[], "/work");
    assert_eq!(
        plugin.clone_script(),
        "cd /work && if [ ! -d ./data ]; then git clone -- '' data; fi"
    );
}

/// Runs the generated script against a fake `git` that records its calls.
#[cfg(unix)]
mod script {
    use std::os::unix::fs::PermissionsExt as _;
    use std::path::Path;
    use std::process::{Command, ExitStatus};

    use super::create;

    const FAKE_GIT: &str = "#!/bin/sh\n\
                            echo \"$@\" >> \"$GIT_CALLS\"\n\
                            mkdir -p -- \"$4\"\n";

    fn install_fake_git(bin: &Path) {
        std::fs::create_dir_all(bin).unwrap();
        let git = bin.join("git");
        std::fs::write(&git, FAKE_GIT).unwrap();
        std::fs::set_permissions(&git, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn run(sh: &Path, script: &str, bin: &Path, calls: &Path) -> ExitStatus {
        let path = std::env::var("PATH").unwrap_or_default();
        Command::new(sh)
            .arg("-c")
            .arg(script)
            .env("PATH", format!("{}:{path}", bin.display()))
            .env("GIT_CALLS", calls)
            .status()
            .unwrap()
    }

    fn read_calls(calls: &Path) -> Vec<String> {
        std::fs::read_to_string(calls)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_clones_once_across_restarts() {
        let Ok(sh) = which::which("sh") else {
            return;
        };
        let scratch = tempfile::tempdir().unwrap();
        let bin = scratch.path().join("bin");
        let work = scratch.path().join("work");
        let calls = scratch.path().join("calls.txt");
        install_fake_git(&bin);
        std::fs::create_dir_all(&work).unwrap();

        let plugin = create(
            &["-repourl", "https://example.com/r.git"],
            work.to_str().unwrap(),
        );
        let script = plugin.clone_script();

        assert!(run(&sh, &script, &bin, &calls).success());
        assert!(work.join("data").is_dir());
        assert_eq!(read_calls(&calls), ["clone -- https://example.com/r.git data"]);

        // Second start of the pod: destination exists, nothing to clone
        assert!(run(&sh, &script, &bin, &calls).success());
        assert_eq!(read_calls(&calls).len(), 1);
    }

    #[test]
    fn test_existing_destination_skips_clone() {
        let Ok(sh) = which::which("sh") else {
            return;
        };
        let scratch = tempfile::tempdir().unwrap();
        let bin = scratch.path().join("bin");
        let work = scratch.path().join("work");
        let calls = scratch.path().join("calls.txt");
        install_fake_git(&bin);
        std::fs::create_dir_all(work.join("src")).unwrap();

        let plugin = create(
            &["-repourl", "https://x/y.git", "-repofolder", "src"],
            work.to_str().unwrap(),
        );

        assert!(run(&sh, &plugin.clone_script(), &bin, &calls).success());
        assert!(read_calls(&calls).is_empty());
    }

    #[test]
    fn test_checks_destination_not_source() {
        let Ok(sh) = which::which("sh") else {
            return;
        };
        let scratch = tempfile::tempdir().unwrap();
        let bin = scratch.path().join("bin");
        let work = scratch.path().join("work");
        let calls = scratch.path().join("calls.txt");
        install_fake_git(&bin);
        // A directory named like the source must not suppress the clone
        std::fs::create_dir_all(work.join("upstream")).unwrap();

        let plugin = create(
            &["-repourl", "upstream", "-repofolder", "checkout"],
            work.to_str().unwrap(),
        );

        assert!(run(&sh, &plugin.clone_script(), &bin, &calls).success());
        assert_eq!(read_calls(&calls), ["clone -- upstream checkout"]);
    }

    #[test]
    fn test_dash_leading_values_stay_operands() {
        let Ok(sh) = which::which("sh") else {
            return;
        };
        let scratch = tempfile::tempdir().unwrap();
        let bin = scratch.path().join("bin");
        let work = scratch.path().join("work");
        let calls = scratch.path().join("calls.txt");
        install_fake_git(&bin);
        std::fs::create_dir_all(&work).unwrap();

        let plugin = create(
            &["-repourl=--upload-pack=touch pwned;:", "-repofolder=-checkout"],
            work.to_str().unwrap(),
        );

        assert!(run(&sh, &plugin.clone_script(), &bin, &calls).success());
        assert_eq!(
            read_calls(&calls),
            ["clone -- --upload-pack=touch pwned;: -checkout"]
        );
        assert!(work.join("-checkout").is_dir());
        assert!(!work.join("pwned").exists());
    }
}
