use assert_cmd::Command;
use predicates::prelude::*;

fn aisync() -> Command {
    let mut cmd = Command::cargo_bin("aisync_cli").expect("bin");
    cmd.env_remove("AI_GRAPHQL_ENDPOINT")
        .env_remove("AI_REST_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package_versions() {
    aisync()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("aisync_core"));
}

#[test]
fn probe_without_endpoints_fails() {
    aisync()
        .arg("probe")
        .assert()
        .failure()
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn probe_unreachable_endpoint_fails() {
    aisync()
        .args([
            "probe",
            "--graphql-endpoint",
            "http://127.0.0.1:1/graphql",
            "--rest-endpoint",
            "http://127.0.0.1:1/api",
            "--timeout-secs",
            "5",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unreachable"));
}

#[test]
fn unknown_command_is_rejected() {
    aisync().arg("frobnicate").assert().failure();
}
