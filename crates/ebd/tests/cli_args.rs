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
        "[one]\n\
         aws_access_key_id = k1\n\
         aws_secret_access_key = s1\n\
         [two]\n\
         aws_access_key_id = k2\n\
         aws_secret_access_key = s2\n",
    )
    .unwrap();
    path
}

#[test]
fn unknown_profile_is_fatal_before_any_network_call() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["-p", "nope", "list", "webapp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile not found: nope"));
}

#[test]
fn profile_and_all_profiles_are_mutually_exclusive() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["-p", "one", "-a", "profiles"])
        .assert()
        .failure();
}

#[test]
fn deploy_to_all_profiles_is_refused() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["-a", "deploy", "webapp:1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to deploy to all profiles"));
}

#[test]
fn deploy_without_app_is_an_argument_error() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("app[:version] is required"));
}

#[test]
fn malformed_app_version_token_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .args(["list", "a:b:c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed app:version token"));
}

#[test]
fn env_without_app_is_an_argument_error() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp);

    ebd_cmd()
        .arg("--config")
        .arg(&config)
        .arg("env")
        .assert()
        .failure()
        .stderr(predicate::str::contains("app name is required"));
}
