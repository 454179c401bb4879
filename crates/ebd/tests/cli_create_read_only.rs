use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn ebd_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ebd"))
}

fn write_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config");
    fs::write(
        &path,
        "[production]\n\
         aws_access_key_id = k1\n\
         aws_secret_access_key = s1\n\
         bucket = prod-builds\n\
         [staging]\n\
         aws_access_key_id = k2\n\
         aws_secret_access_key = s2\n",
    )
    .unwrap();
    path
}

#[test]
fn read_only_create_prints_payload_without_uploading() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let bundle = tmp.path().join("bundle.zip");
    fs::write(&bundle, b"not a real zip").unwrap();

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--read-only")
        .args(["create", "webapp:1.2.3", "-s"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload source bundle for webapp:1.2.3"))
        .stdout(predicate::str::contains("Bucket: prod-builds"))
        .stdout(predicate::str::contains("Key: webapp/webapp-1.2.3.zip"))
        .stdout(predicate::str::contains("[READ ONLY] put"))
        .stdout(predicate::str::contains("[READ ONLY] create application version:"))
        .stdout(predicate::str::contains("application_name => webapp"))
        .stdout(predicate::str::contains("version_label => 1.2.3"));
}

#[test]
fn read_only_create_uploads_once_but_registers_per_profile() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);
    let bundle = tmp.path().join("bundle.zip");
    fs::write(&bundle, b"not a real zip").unwrap();

    let assert = ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--read-only", "-a", "create", "webapp:1.0", "-s"])
        .arg(&bundle)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("[READ ONLY] put").count(), 1);
    assert_eq!(
        stdout
            .matches("[READ ONLY] create application version:")
            .count(),
        2
    );
    assert!(stdout.contains("[profile:production]"));
    assert!(stdout.contains("[profile:staging]"));
}

#[test]
fn create_without_bundle_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .current_dir(tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--read-only", "create", "webapp:1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source bundle not found"));
}

#[test]
fn read_only_deploy_prints_payload() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--read-only", "-p", "staging", "deploy", "webapp:1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[READ ONLY] update environment:"))
        .stdout(predicate::str::contains("environment_name => webapp"))
        .stdout(predicate::str::contains("version_label => 1.0"));
}
