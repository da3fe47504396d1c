//! Integration tests for the `payroc-wire` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, decode
//! and probe subcommands through the actual binary, including stdin piping,
//! file I/O, exit codes and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn cli() -> Command {
    Command::cargo_bin("payroc-wire").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_passes_when_actual_satisfies_expected() {
    cli()
        .args([
            "check",
            "--expected",
            &fixture("expected_ready.json"),
            "--actual",
            &fixture("bank_transfer_payment.json"),
        ])
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn check_reads_actual_from_stdin() {
    cli()
        .args(["check", "--expected", &fixture("expected_ready.json")])
        .write_stdin(std::fs::read_to_string(fixture("bank_transfer_payment.json")).unwrap())
        .assert()
        .success();
}

#[test]
fn check_fails_with_mismatch_path() {
    cli()
        .args([
            "check",
            "--expected",
            &fixture("expected_complete.json"),
            "--actual",
            &fixture("bank_transfer_payment.json"),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("/transactionResult/status"))
        .stdout(predicate::str::contains("\"complete\""));
}

#[test]
fn check_is_not_symmetric() {
    cli()
        .args([
            "check",
            "--expected",
            &fixture("bank_transfer_payment.json"),
            "--actual",
            &fixture("expected_ready.json"),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing key"));
}

#[test]
fn check_rejects_malformed_json() {
    cli()
        .args(["check", "--expected", &fixture("expected_ready.json")])
        .write_stdin(r#"{"order":"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse actual as JSON"));
}

#[test]
fn check_missing_file_is_an_error() {
    cli()
        .args(["check", "--expected", "/nonexistent/expected.json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_request_prints_canonical_field_order() {
    let output = cli()
        .args([
            "decode",
            "--model",
            "bank-transfer-payment-request",
            "-i",
            &fixture("bank_transfer_request.json"),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let terminal = stdout.find("processingTerminalId").unwrap();
    let order = stdout.find("\"order\"").unwrap();
    let method = stdout.find("paymentMethod").unwrap();
    assert!(terminal < order && order < method, "{stdout}");

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["paymentMethod"]["type"], "ach");
    assert_eq!(value["order"]["amount"], 4999);
}

#[test]
fn decode_response_from_stdin() {
    cli()
        .args(["decode", "--model", "bank-transfer-payment"])
        .write_stdin(std::fs::read_to_string(fixture("bank_transfer_payment.json")).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"paymentId\": \"M2MJOG6O2Y\""));
}

#[test]
fn decode_to_file() {
    let output_path = std::env::temp_dir().join("payroc-wire-cli-decode-output.json");
    let _ = std::fs::remove_file(&output_path);

    cli()
        .args([
            "decode",
            "--model",
            "patch",
            "-i",
            &fixture("patch.json"),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"path": "path", "op": "remove"},
            {"path": "path", "op": "remove"},
            {"path": "path", "op": "remove"}
        ])
    );
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn decode_reports_missing_required_field() {
    cli()
        .args(["decode", "--model", "bank-transfer-payment"])
        .write_stdin(r#"{"processingTerminalId":"1234001"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `paymentId`"));
}

#[test]
fn decode_reports_unknown_variant() {
    cli()
        .args(["decode", "--model", "contact"])
        .write_stdin(
            r#"{"type":"manager","firstName":"Jane","lastName":"Doe","identifiers":[],
                "contactMethods":[{"type":"pager","value":"1"}]}"#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("pager"));
}

#[test]
fn decode_rejects_unknown_model_name() {
    cli()
        .args(["decode", "--model", "invoice"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'invoice'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// probe
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn probe_prints_field_and_tag() {
    cli()
        .arg("probe")
        .write_stdin(r#"{"accountNumber":"1234567890","type":"ach"}"#)
        .assert()
        .success()
        .stdout("type: ach\n");
}

#[test]
fn probe_follows_priority_order() {
    cli()
        .arg("probe")
        .write_stdin(r#"{"kind":"webhook","_type":"percentage"}"#)
        .assert()
        .success()
        .stdout("_type: percentage\n");
}

#[test]
fn probe_without_discriminator_fails() {
    cli()
        .arg("probe")
        .write_stdin(r#"{"op":"remove","path":"/a"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No discriminator found"));
}

#[test]
fn probe_reads_named_field_outside_default_set() {
    cli()
        .args(["probe", "--field", "op"])
        .write_stdin(r#"{"op":"remove","path":"/a"}"#)
        .assert()
        .success()
        .stdout("op: remove\n");

    cli()
        .args(["probe", "--field", "entryMethod"])
        .write_stdin(r#"{"entryMethod":"keyed","keyedData":{"cardNumber":"4111"}}"#)
        .assert()
        .success()
        .stdout("entryMethod: keyed\n");
}

#[test]
fn probe_with_named_field_missing_fails() {
    cli()
        .args(["probe", "--field", "op"])
        .write_stdin(r#"{"type":"ach"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("looked for op"));
}

#[test]
fn probe_help_mentions_field_option() {
    cli()
        .args(["probe", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--field"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("probe"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    cli().assert().failure().code(2);
}
