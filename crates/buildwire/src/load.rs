// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `buildwire load` command implementation.
//!
//! Loads a manifest and prints the resolved configuration, either as a
//! human-readable summary or, with `--json`, as structured JSON for the
//! external build tool.

use std::io::IsTerminal;
use std::path::Path;

use buildwire_core::{BuildConfiguration, BuildwireError, SigningRegistry, ToolchainDescriptor};
use buildwire_manifest::ManifestError;

/// Load the toolchain and manifest, rendering diagnostics on failure.
pub fn load_or_report(
    manifest: &Path,
    toolchain: Option<&Path>,
) -> Result<BuildConfiguration, BuildwireError> {
    let toolchain = load_toolchain_or_report(toolchain)?;
    let registry = SigningRegistry::with_debug_default();

    buildwire_manifest::load_manifest_from_path(manifest, &toolchain, &registry)
        .map_err(report)
}

fn load_toolchain_or_report(
    toolchain: Option<&Path>,
) -> Result<ToolchainDescriptor, BuildwireError> {
    buildwire_manifest::load_toolchain_validated(toolchain).map_err(report)
}

fn report(errors: Vec<ManifestError>) -> BuildwireError {
    buildwire_manifest::render_errors(&errors);
    BuildwireError::ManifestRejected {
        count: errors.len(),
    }
}

/// Run the `buildwire load` command.
pub fn run_load(
    manifest: &Path,
    toolchain: Option<&Path>,
    json: bool,
    plain: bool,
) -> Result<(), BuildwireError> {
    let config = load_or_report(manifest, toolchain)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print!("{}", format_summary(&config, use_color));
    }

    Ok(())
}

/// Format the configuration as an indented summary block.
pub fn format_summary(config: &BuildConfiguration, use_color: bool) -> String {
    use colored::Colorize;

    let heading = |text: &str| {
        if use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    let sdk = &config.sdk;
    let opts = &config.compile_options;
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("  {}\n", heading(&config.application_id)));
    out.push_str(&format!("  {}\n", "-".repeat(50)));
    out.push_str(&format!("    Namespace:  {}\n", config.namespace));
    out.push_str(&format!(
        "    Version:    {} ({})\n",
        config.version_name, config.version_code
    ));
    out.push_str(&format!(
        "    SDK:        compile {} / min {} / target {} (NDK {})\n",
        sdk.compile_sdk, sdk.min_sdk, sdk.target_sdk, sdk.ndk_version
    ));
    out.push_str(&format!(
        "    Java:       source {} / target {} / jvm {}\n",
        opts.source_compatibility, opts.target_compatibility, opts.jvm_target
    ));
    out.push_str(&format!(
        "    MultiDex:   {}\n",
        if config.multidex_enabled { "enabled" } else { "disabled" }
    ));
    if let Some(source) = &config.flutter_source {
        out.push_str(&format!("    Flutter:    {source}\n"));
    }

    out.push('\n');
    out.push_str(&format!("  {}\n", heading("Plugins")));
    for plugin in &config.plugins {
        out.push_str(&format!("    {plugin}\n"));
    }

    out.push('\n');
    out.push_str(&format!("  {}\n", heading("Build types")));
    for variant in &config.variants {
        let mut flags = Vec::new();
        if variant.minify_enabled {
            flags.push("minify");
        }
        if variant.shrink_resources {
            flags.push("shrink");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        out.push_str(&format!(
            "    {:<12} signed with `{}`{flags}\n",
            variant.name, variant.signing.name
        ));
    }

    out.push('\n');
    out.push_str(&format!("  {}\n", heading("Dependencies")));
    for dep in &config.dependencies {
        out.push_str(&format!("    {dep}\n"));
    }
    out.push('\n');

    out
}
