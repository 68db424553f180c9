//! End-to-end runs of the `acrship` binary against stub `az` / `docker`
//! scripts that record their argv instead of touching Azure or Docker.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STUB: &str = r#"#!/bin/sh
call="${0##*/} $*"
echo "$call" >> "$STUB_LOG"
if [ "$call" = "$STUB_FAIL" ]; then
    exit 1
fi
exit 0
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        for tool in ["az", "docker"] {
            let path = bin.join(tool);
            std::fs::write(&path, STUB).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn log_path(&self) -> PathBuf {
        self.root().join("calls.log")
    }

    fn calls(&self) -> Vec<String> {
        match std::fs::read_to_string(self.log_path()) {
            Ok(content) => content.lines().map(str::to_owned).collect(),
            Err(_) => vec![],
        }
    }

    fn acrship(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("acrship");
        cmd.current_dir(self.root())
            .env("PATH", self.root().join("bin"))
            .env("STUB_LOG", self.log_path())
            .env("STUB_FAIL", "")
            .env_remove("RUST_LOG");
        cmd
    }
}

// ── Success ──

#[test]
fn defaults_run_every_stage_and_confirm() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployment completed successfully."))
        .stdout(predicate::str::contains(
            "acrsydingdevkfpqjli23em5m.azurecr.io/hr-ui:dev-uat",
        ));

    assert_eq!(
        sandbox.calls(),
        vec![
            "az login --use-device-code",
            "az acr login --name acrsydingdevkfpqjli23em5m",
            "docker buildx create --use",
            "docker buildx build --platform linux/amd64 -f Dockerfile -t hr-ui:dev-uat --load .",
            "docker tag hr-ui:dev-uat acrsydingdevkfpqjli23em5m.azurecr.io/hr-ui:dev-uat",
            "docker push acrsydingdevkfpqjli23em5m.azurecr.io/hr-ui:dev-uat",
        ]
    );
}

#[test]
fn acr_and_image_overrides_set_push_target() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .args(["--acr-name", "myregistry", "--image-name", "app:v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("myregistry.azurecr.io/app:v1"));

    let calls = sandbox.calls();
    assert_eq!(
        calls.last().map(String::as_str),
        Some("docker push myregistry.azurecr.io/app:v1")
    );
    assert!(calls.contains(&"az acr login --name myregistry".to_owned()));
}

#[test]
fn settings_file_supplies_base_values_and_tenant() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.root().join("acrship.toml"),
        "[deployment]\nacr_name = \"fromfile\"\ndockerfile_path = \"web.Dockerfile\"\n\n[azure]\ntenant_id = \"tenant-1\"\n",
    )
    .unwrap();

    sandbox
        .acrship()
        .args(["--image-name", "web:1"])
        .assert()
        .success();

    let calls = sandbox.calls();
    assert_eq!(calls[0], "az login --use-device-code --tenant tenant-1");
    assert!(calls.contains(
        &"docker buildx build --platform linux/amd64 -f web.Dockerfile -t web:1 --load .".to_owned()
    ));
    assert_eq!(
        calls.last().map(String::as_str),
        Some("docker push fromfile.azurecr.io/web:1")
    );
}

// ── Config errors ──

#[test]
fn unknown_parameter_fails_before_any_stage() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .args(["--foo", "bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown parameter: --foo"));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn equals_form_is_an_unknown_parameter() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .arg("--acr-name=myregistry")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unknown parameter: --acr-name=myregistry",
        ));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn non_utf8_argument_exits_with_one() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .arg("--dockerfile-path")
        .arg(OsString::from_vec(b"Docker\xfffile".to_vec()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown parameter: Docker"));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn malformed_settings_file_fails_before_any_stage() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.root().join("acrship.toml"), "[deployment\n").unwrap();

    sandbox
        .acrship()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse config"));

    assert!(sandbox.calls().is_empty());
}

// ── Stage failures ──

#[test]
fn cloud_login_failure_stops_after_first_stage() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .acrship()
        .env("STUB_FAIL", "az login --use-device-code")
        .assert()
        .code(1)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Azure login failed").count(), 1, "{stderr}");
    assert_eq!(sandbox.calls(), vec!["az login --use-device-code"]);
}

#[test]
fn build_failure_skips_tag_and_push() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .args(["--image-name", "app:v1"])
        .env(
            "STUB_FAIL",
            "docker buildx build --platform linux/amd64 -f Dockerfile -t app:v1 --load .",
        )
        .assert()
        .code(1)
        .stderr(predicate::str::contains("docker build failed for app:v1"));

    let calls = sandbox.calls();
    assert_eq!(calls.len(), 4);
    assert!(!calls.iter().any(|c| c.starts_with("docker push")));
}

#[test]
fn push_failure_exits_with_one() {
    let sandbox = Sandbox::new();

    sandbox
        .acrship()
        .args(["--acr-name", "myregistry", "--image-name", "app:v1"])
        .env("STUB_FAIL", "docker push myregistry.azurecr.io/app:v1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "failed to push myregistry.azurecr.io/app:v1",
        ))
        .stdout(predicate::str::contains("Deployment completed successfully.").not());
}

#[test]
fn missing_az_binary_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::remove_file(sandbox.root().join("bin/az")).unwrap();

    sandbox
        .acrship()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("az CLI not found"));

    assert!(sandbox.calls().is_empty());
}
