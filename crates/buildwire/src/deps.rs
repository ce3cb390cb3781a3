// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `buildwire deps` command implementation.

use std::path::Path;

use buildwire_core::{BuildConfiguration, BuildwireError, DependencyVersion};

use crate::load::load_or_report;

/// Run the `buildwire deps` command.
///
/// Prints one dependency per line, in declaration order.
pub fn run_deps(manifest: &Path, toolchain: Option<&Path>) -> Result<(), BuildwireError> {
    let config = load_or_report(manifest, toolchain)?;
    for line in dependency_lines(&config) {
        println!("{line}");
    }
    Ok(())
}

/// Render each dependency as a Gradle-style declaration, marking
/// BOM-managed coordinates.
pub fn dependency_lines(config: &BuildConfiguration) -> Vec<String> {
    config
        .dependencies
        .iter()
        .map(|dep| match dep.version {
            DependencyVersion::Managed => format!("{dep}  // managed by BOM"),
            _ => dep.to_string(),
        })
        .collect()
}
