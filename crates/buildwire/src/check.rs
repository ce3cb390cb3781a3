// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `buildwire check` command implementation.
//!
//! Runs the toolchain and manifest through the loader and reports each stage
//! as a pass/warn/fail line, followed by the full diagnostics for anything
//! that failed.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use buildwire_core::{
    BuildConfiguration, BuildwireError, DEBUG_SIGNING_CONFIG, SigningRegistry, ToolchainDescriptor,
};
use buildwire_manifest::{ErrorKind, ManifestError};

/// Status of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Outcome of running every check: the per-stage results and the
/// diagnostics behind any failures.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
    pub errors: Vec<ManifestError>,
}

impl CheckReport {
    pub fn fail_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Run the `buildwire check` command.
///
/// Exits with an error when any check fails; warnings alone pass.
pub fn run_check(
    manifest: &Path,
    toolchain: Option<&Path>,
    plain: bool,
) -> Result<(), BuildwireError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let report = collect_checks(manifest, toolchain, &SigningRegistry::with_debug_default());

    print!("{}", format_report(&report, use_color));

    if !report.errors.is_empty() {
        buildwire_manifest::render_errors(&report.errors);
    }

    if report.fail_count() > 0 {
        return Err(BuildwireError::ManifestRejected {
            count: report.errors.len(),
        });
    }
    Ok(())
}

/// Run every check without printing.
pub fn collect_checks(
    manifest: &Path,
    toolchain: Option<&Path>,
    registry: &SigningRegistry,
) -> CheckReport {
    let mut report = CheckReport::default();

    let start = Instant::now();
    let descriptor = match buildwire_manifest::load_toolchain_validated(toolchain) {
        Ok(descriptor) => {
            report.results.push(CheckResult::new(
                "Toolchain",
                CheckStatus::Pass,
                format!(
                    "compile {} / min {} / target {}",
                    descriptor.compile_sdk, descriptor.min_sdk, descriptor.target_sdk
                ),
                start,
            ));
            descriptor
        }
        Err(errors) => {
            report.results.push(CheckResult::new(
                "Toolchain",
                CheckStatus::Fail,
                format!("{} error(s)", errors.len()),
                start,
            ));
            report.results.push(CheckResult::new(
                "Manifest",
                CheckStatus::Warn,
                "skipped until the toolchain loads",
                start,
            ));
            report.errors = errors;
            return report;
        }
    };

    if let Some(config) = check_manifest(manifest, &descriptor, registry, &mut report) {
        report.results.push(check_bom_imports(&config));
        report.results.push(check_release_signing(&config));
    }

    report
}

fn check_manifest(
    manifest: &Path,
    toolchain: &ToolchainDescriptor,
    registry: &SigningRegistry,
    report: &mut CheckReport,
) -> Option<BuildConfiguration> {
    let start = Instant::now();
    match buildwire_manifest::load_manifest_from_path(manifest, toolchain, registry) {
        Ok(config) => {
            report.results.push(CheckResult::new(
                "Manifest",
                CheckStatus::Pass,
                format!(
                    "{} ({} variant(s), {} dependency(ies))",
                    config.application_id,
                    config.variants.len(),
                    config.dependencies.len()
                ),
                start,
            ));
            report.results.push(CheckResult::new(
                "Signing",
                CheckStatus::Pass,
                "all references resolved",
                start,
            ));
            Some(config)
        }
        Err(errors) => {
            let malformed = errors
                .iter()
                .filter(|e| e.kind() == ErrorKind::MalformedManifest)
                .count();
            let unresolved = errors.len() - malformed;

            report.results.push(if malformed > 0 {
                CheckResult::new(
                    "Manifest",
                    CheckStatus::Fail,
                    format!("{malformed} error(s)"),
                    start,
                )
            } else {
                CheckResult::new("Manifest", CheckStatus::Pass, "well-formed", start)
            });
            report.results.push(if unresolved > 0 {
                CheckResult::new(
                    "Signing",
                    CheckStatus::Fail,
                    format!("{unresolved} unresolved reference(s)"),
                    start,
                )
            } else {
                CheckResult::new("Signing", CheckStatus::Pass, "all references resolved", start)
            });
            report.errors.extend(errors);
            None
        }
    }
}

/// Warn when version-less dependencies have no platform to manage them.
fn check_bom_imports(config: &BuildConfiguration) -> CheckResult {
    let start = Instant::now();
    let managed: Vec<String> = config.bom_managed().map(|d| d.notation()).collect();

    if managed.is_empty() || config.boms().next().is_some() {
        CheckResult::new("BOM imports", CheckStatus::Pass, "ok", start)
    } else {
        CheckResult::new(
            "BOM imports",
            CheckStatus::Warn,
            format!("no platform import manages {}", managed.join(", ")),
            start,
        )
    }
}

/// Warn when the release variant ships with the debug keystore.
fn check_release_signing(config: &BuildConfiguration) -> CheckResult {
    let start = Instant::now();
    match config.variant("release") {
        Some(release) if release.signing.name == DEBUG_SIGNING_CONFIG => CheckResult::new(
            "Release signing",
            CheckStatus::Warn,
            "release is signed with the debug keystore",
            start,
        ),
        Some(release) => CheckResult::new(
            "Release signing",
            CheckStatus::Pass,
            format!("signed with `{}`", release.signing.name),
            start,
        ),
        None => CheckResult::new("Release signing", CheckStatus::Pass, "no release variant", start),
    }
}

/// Format the report as the check table plus a summary line.
pub fn format_report(report: &CheckReport, use_color: bool) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push('\n');
    out.push_str("  buildwire check\n");
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    for result in &report.results {
        let duration_ms = result.duration.as_millis();
        let line = match (&result.status, use_color) {
            (CheckStatus::Pass, true) => format!(
                "    {} {:<20} {} ({duration_ms}ms)",
                "✓".green(),
                result.name,
                result.message
            ),
            (CheckStatus::Warn, true) => format!(
                "    {} {:<20} {} ({duration_ms}ms)",
                "!".yellow(),
                result.name,
                result.message.yellow()
            ),
            (CheckStatus::Fail, true) => format!(
                "    {} {:<20} {} ({duration_ms}ms)",
                "✗".red(),
                result.name,
                result.message.red()
            ),
            (CheckStatus::Pass, false) => format!(
                "    [OK]   {:<20} {} ({duration_ms}ms)",
                result.name, result.message
            ),
            (CheckStatus::Warn, false) => format!(
                "    [WARN] {:<20} {} ({duration_ms}ms)",
                result.name, result.message
            ),
            (CheckStatus::Fail, false) => format!(
                "    [FAIL] {:<20} {} ({duration_ms}ms)",
                result.name, result.message
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out.push('\n');
    let issues = report.fail_count() + report.warn_count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        out.push_str(&format!("  {issues} {issue_word} found.\n"));
    } else {
        out.push_str("  All checks passed.\n");
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildwire_test_utils::{
        INVENTAPP_MANIFEST, ManifestBuilder, ManifestHarness, upload_signing_config,
    };

    fn statuses(report: &CheckReport) -> Vec<(&str, CheckStatus)> {
        report
            .results
            .iter()
            .map(|r| (r.name.as_str(), r.status.clone()))
            .collect()
    }

    fn run(harness: &ManifestHarness) -> CheckReport {
        collect_checks(
            harness.manifest_path(),
            harness.toolchain_path(),
            &harness.registry,
        )
    }

    #[test]
    fn inventapp_warns_about_debug_release_signing() {
        let harness = ManifestHarness::builder()
            .with_manifest(INVENTAPP_MANIFEST)
            .build()
            .unwrap();
        let report = run(&harness);
        assert_eq!(
            statuses(&report),
            vec![
                ("Toolchain", CheckStatus::Pass),
                ("Manifest", CheckStatus::Pass),
                ("Signing", CheckStatus::Pass),
                ("BOM imports", CheckStatus::Pass),
                ("Release signing", CheckStatus::Warn),
            ]
        );
        assert_eq!(report.fail_count(), 0);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn managed_dependency_without_platform_warns() {
        let manifest = ManifestBuilder::new()
            .build_type("release", "upload")
            .dependency("com.google.firebase:firebase-analytics")
            .render();
        let harness = ManifestHarness::builder()
            .with_manifest(manifest)
            .with_signing(upload_signing_config())
            .build()
            .unwrap();
        let report = run(&harness);
        let bom = &report.results[3];
        assert_eq!(bom.status, CheckStatus::Warn);
        assert!(bom.message.contains("com.google.firebase:firebase-analytics"));
        assert_eq!(report.results[4].status, CheckStatus::Pass);
    }

    #[test]
    fn failures_are_split_by_kind() {
        let manifest = ManifestBuilder::new()
            .plugin("kotlin-android")
            .plugin("kotlin-android")
            .build_type("release", "upload")
            .render();
        let harness = ManifestHarness::builder()
            .with_manifest(manifest)
            .build()
            .unwrap();
        let report = run(&harness);
        assert_eq!(
            statuses(&report),
            vec![
                ("Toolchain", CheckStatus::Pass),
                ("Manifest", CheckStatus::Fail),
                ("Signing", CheckStatus::Fail),
            ]
        );
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn broken_toolchain_skips_manifest() {
        let harness = ManifestHarness::builder()
            .with_manifest(INVENTAPP_MANIFEST)
            .with_toolchain("compile_sdkk = 34\n")
            .build()
            .unwrap();
        let report = run(&harness);
        assert_eq!(
            statuses(&report),
            vec![
                ("Toolchain", CheckStatus::Fail),
                ("Manifest", CheckStatus::Warn),
            ]
        );
    }

    #[test]
    fn plain_report_uses_bracket_markers() {
        let report = CheckReport {
            results: vec![
                CheckResult {
                    name: "Manifest".to_string(),
                    status: CheckStatus::Pass,
                    message: "ok".to_string(),
                    duration: Duration::from_millis(2),
                },
                CheckResult {
                    name: "Release signing".to_string(),
                    status: CheckStatus::Warn,
                    message: "debug keystore".to_string(),
                    duration: Duration::from_millis(0),
                },
            ],
            errors: Vec::new(),
        };
        let text = format_report(&report, false);
        assert!(text.contains("[OK]   Manifest"));
        assert!(text.contains("[WARN] Release signing"));
        assert!(text.contains("1 issue found."));
    }

    #[test]
    fn empty_report_passes() {
        let text = format_report(&CheckReport::default(), false);
        assert!(text.contains("All checks passed."));
    }
}
