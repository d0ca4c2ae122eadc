//! Integration tests for the Strait CLI.
//!
//! These invoke the `strait` binary as a subprocess and check exit
//! codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use strait_validator::table::{Table, TableEntry, PARM_APE, PARM_BAT};
use tempfile::TempDir;

#[allow(deprecated)]
fn strait() -> Command {
    Command::cargo_bin("strait").unwrap()
}

/// Write a table image into `dir` and return its path.
fn write_image(dir: &TempDir, name: &str, entries: [TableEntry; 4]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, Table { entries }.to_image()).unwrap();
    path
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    strait()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: strait"));
}

#[test]
fn help_flag_exits_0() {
    strait()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    strait()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Validate ----

#[test]
fn validate_without_file_exits_1() {
    strait()
        .arg("validate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires an image file"));
}

#[test]
fn validate_missing_file_exits_1() {
    strait()
        .args(["validate", "/no/such/image.tbl"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn validate_wrong_sized_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.tbl");
    fs::write(&path, [0u8; 32]).unwrap();

    strait()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exactly 48"));
}

#[test]
fn validate_valid_image_exits_0() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "empty.tbl", [TableEntry::unused(); 4]);

    strait()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "INFO 0x0008: Table image entries: 0 valid, 0 invalid, 4 unused",
        ));
}

#[test]
fn validate_invalid_image_exits_2() {
    let dir = TempDir::new().unwrap();
    let path = write_image(
        &dir,
        "extra.tbl",
        [
            TableEntry::in_use(PARM_BAT, 0x10, 0x1000),
            TableEntry::unused(),
            TableEntry::unused(),
            TableEntry::in_use(PARM_APE, 0x10, 0x1000),
        ],
    );

    strait()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stdout(
            predicate::str::contains("ERROR 0x2040: Table entry 4 parm Ape follows an unused entry")
                .and(predicate::str::contains("1 valid, 1 invalid, 2 unused")),
        );
}

#[test]
fn validate_native_agrees_with_hosted() {
    let dir = TempDir::new().unwrap();
    let path = write_image(
        &dir,
        "order.tbl",
        [
            TableEntry::in_use(PARM_APE, 0x1000, 0x10),
            TableEntry::unused(),
            TableEntry::unused(),
            TableEntry::unused(),
        ],
    );

    let hosted = strait()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
    let native = strait()
        .args(["validate", path.to_str().unwrap(), "--native"])
        .assert()
        .failure()
        .code(2);

    assert_eq!(
        hosted.get_output().stdout,
        native.get_output().stdout,
        "renditions printed different events"
    );
}

#[test]
fn validate_unknown_flag_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "empty.tbl", [TableEntry::unused(); 4]);

    strait()
        .args(["validate", path.to_str().unwrap(), "--fast"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown flag"));
}

// ---- Program ----

#[test]
fn program_prints_listing_and_strings() {
    strait()
        .arg("program")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("HALT")
                .and(predicate::str::contains("CALL"))
                .and(predicate::str::contains("\"Table entry \""))
                .and(predicate::str::contains("strings")),
        );
}

#[test]
fn program_with_arguments_exits_1() {
    strait()
        .args(["program", "extra"])
        .assert()
        .failure()
        .code(1);
}
