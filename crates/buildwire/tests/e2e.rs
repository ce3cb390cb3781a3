// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the `buildwire` binary against manifests on disk.
//!
//! Each test runs inside its own harness directory with the environment
//! cleared of toolchain overrides, so tests are independent.

use std::process::{Command, Output};

use buildwire_test_utils::{INVENTAPP_MANIFEST, ManifestBuilder, ManifestHarness};

fn buildwire(harness: &ManifestHarness, args: &[&str]) -> Output {
    let dir = harness.manifest_path().parent().unwrap();
    let mut command = Command::new(env!("CARGO_BIN_EXE_buildwire"));
    command.current_dir(dir).args(args).env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("BUILDWIRE_") {
            command.env_remove(key);
        }
    }
    command.output().unwrap()
}

fn inventapp() -> ManifestHarness {
    ManifestHarness::builder()
        .with_manifest(INVENTAPP_MANIFEST)
        .build()
        .unwrap()
}

// ---- load ----

#[test]
fn load_json_prints_the_configuration() {
    let harness = inventapp();
    let output = buildwire(&harness, &["load", "build.toml", "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["application_id"], "com.example.inventapp");
    assert_eq!(json["version_code"], 1);
    assert_eq!(json["version_name"], "1.0.0");
    assert_eq!(json["variants"].as_array().unwrap().len(), 2);
    assert_eq!(json["dependencies"].as_array().unwrap().len(), 7);
}

#[test]
fn load_summary_is_plain_when_piped() {
    let harness = inventapp();
    let output = buildwire(&harness, &["--plain", "load", "build.toml"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Namespace:  com.example.inventapp"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn toolchain_flag_overrides_defaults() {
    let harness = ManifestHarness::builder()
        .with_manifest(INVENTAPP_MANIFEST)
        .with_toolchain("compile_sdk = 34\ntarget_sdk = 34\n")
        .build()
        .unwrap();
    let output = buildwire(
        &harness,
        &["load", "build.toml", "--json", "--toolchain", "buildwire-toolchain.toml"],
    );
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sdk"]["compile_sdk"], 34);
    assert_eq!(json["sdk"]["min_sdk"], 21);
}

#[test]
fn missing_explicit_toolchain_fails() {
    let harness = inventapp();
    let output = buildwire(&harness, &["load", "build.toml", "--toolchain", "absent.toml"]);
    assert_eq!(output.status.code(), Some(1));
}

// ---- check ----

#[test]
fn check_passes_with_warnings() {
    let harness = inventapp();
    let output = buildwire(&harness, &["check", "build.toml", "--plain"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[OK]   Manifest"));
    assert!(stdout.contains("[WARN] Release signing"));
    assert!(stdout.contains("1 issue found."));
}

#[test]
fn check_fails_on_unresolved_signing() {
    let manifest = ManifestBuilder::new().build_type("release", "debgu").render();
    let harness = ManifestHarness::builder()
        .with_manifest(manifest)
        .build()
        .unwrap();
    let output = buildwire(&harness, &["check", "build.toml", "--plain"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[FAIL] Signing"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("debgu"), "stderr: {stderr}");
}

// ---- deps ----

#[test]
fn deps_lists_declarations_in_order() {
    let harness = inventapp();
    let output = buildwire(&harness, &["deps", "build.toml"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[0],
        r#"implementation(platform("com.google.firebase:firebase-bom:33.0.0"))"#
    );
    assert!(lines[5].starts_with(r#"implementation("androidx.core:core-ktx:1.12.0")"#));
}

#[test]
fn missing_application_id_exits_nonzero() {
    let manifest = ManifestBuilder::new().without_application_id().render();
    let harness = ManifestHarness::builder()
        .with_manifest(manifest)
        .build()
        .unwrap();
    let output = buildwire(&harness, &["deps", "build.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("application_id"), "stderr: {stderr}");
}
