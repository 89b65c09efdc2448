//! Command-line behaviour that never reaches the report store

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `civic` with no ambient token, endpoint or config file
fn civic(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("civic").unwrap();
    cmd.env_remove("CIVIC_ADMIN_TOKEN")
        .env_remove("CIVIC_ENDPOINT")
        .env_remove("CIVIC_CONFIG")
        // nothing listens on port 9
        .arg("--endpoint")
        .arg("http://127.0.0.1:9")
        .arg("--config")
        .arg(dir.path().join("missing.toml"));
    cmd
}

fn photo(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"\xff\xd8\xff").unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("civic")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_short_address_is_refused_locally() {
    let dir = TempDir::new().unwrap();
    let photo = photo(&dir, "bache.jpg");

    civic(&dir)
        .args(["report", "create", "--address", "Av"])
        .args(["--comment", "Bache profundo en la calle"])
        .arg("--photo")
        .arg(&photo)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The address must be at least 5 characters",
        ));
}

#[test]
fn test_oversized_photo_is_refused_before_upload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.jpg");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(5 * 1024 * 1024 + 1).unwrap();

    civic(&dir)
        .args(["report", "create", "--address", "Av. Siempre Viva 742"])
        .args(["--comment", "Bache profundo en la calle"])
        .arg("--photo")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("The photo must not exceed 5MB"));
}

#[test]
fn test_missing_photo_file_is_a_missing_photo() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["report", "create", "--address", "Av. Siempre Viva 742"])
        .args(["-m", "Bache profundo en la calle"])
        .arg("--photo")
        .arg(dir.path().join("nope.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("A photo is required"));
}

#[test]
fn test_address_is_checked_before_photo() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.jpg");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(5 * 1024 * 1024 + 1).unwrap();

    civic(&dir)
        .args(["report", "create", "--address", "Av", "--comment", "corto"])
        .arg("--photo")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The address must be at least 5 characters",
        ))
        .stderr(predicate::str::contains("photo").not());
}

#[test]
fn test_comment_is_checked_before_missing_photo() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["report", "create", "--address", "Av. Siempre Viva 742"])
        .args(["--comment", "corto"])
        .arg("--photo")
        .arg(dir.path().join("nope.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The comment must be at least 10 characters",
        ));
}

#[test]
fn test_status_change_requires_admin_token() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["report", "status", "1", "resolved", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Only administrators can change report status",
        ));
}

#[test]
fn test_dashboard_requires_admin_token() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--admin-token"));
}

#[test]
fn test_unknown_filter_is_invalid_input() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["report", "list", "--status", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_unknown_target_status_is_invalid_input() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["--admin-token", "admin-secret"])
        .args(["report", "status", "1", "closed", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_unreachable_store_reports_connectivity() {
    let dir = TempDir::new().unwrap();

    civic(&dir)
        .args(["report", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not connect to the server"));
}
