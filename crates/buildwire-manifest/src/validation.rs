// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks the constraints serde attributes cannot express: uniqueness,
//! non-empty identifiers, and cross-field rules. Both entry points collect
//! every error rather than stopping at the first.

use std::collections::HashSet;

use buildwire_core::BuildConfiguration;

use crate::diagnostic::ManifestError;
use crate::model::ManifestDocument;

/// Validate a deserialized manifest document before resolution.
pub fn validate_document(doc: &ManifestDocument) -> Result<(), Vec<ManifestError>> {
    let mut errors = Vec::new();
    let android = &doc.android;
    let default_config = &android.default_config;

    let application_id = default_config.application_id.trim();
    if application_id.is_empty() {
        errors.push(ManifestError::validation(
            "android.default_config.application_id must not be empty",
        ));
    } else if !is_valid_package_name(application_id) {
        errors.push(ManifestError::validation(format!(
            "android.default_config.application_id `{application_id}` must have at least two \
             dot-separated segments, each starting with a letter and containing only \
             letters, digits, or underscores"
        )));
    }

    if let Some(namespace) = &android.namespace
        && !is_valid_package_name(namespace.trim())
    {
        errors.push(ManifestError::validation(format!(
            "android.namespace `{namespace}` is not a valid package name"
        )));
    }

    let mut seen_plugins = HashSet::new();
    for (i, plugin) in doc.plugins.iter().enumerate() {
        if plugin.trim().is_empty() {
            errors.push(ManifestError::validation(format!(
                "plugins[{i}] must not be empty"
            )));
        } else if !seen_plugins.insert(plugin.trim()) {
            errors.push(ManifestError::validation(format!(
                "plugin `{plugin}` is applied more than once"
            )));
        }
    }

    if default_config.version_code == Some(0) {
        errors.push(ManifestError::validation(
            "android.default_config.version_code must be a positive integer",
        ));
    }

    if let Some(name) = &default_config.version_name
        && name.trim().is_empty()
    {
        errors.push(ManifestError::validation(
            "android.default_config.version_name must not be empty",
        ));
    }

    if let Some(ndk) = &android.ndk_version
        && ndk.trim().is_empty()
    {
        errors.push(ManifestError::validation(
            "android.ndk_version must not be empty",
        ));
    }

    let mut seen_signing = HashSet::new();
    for (i, signing) in android.signing_configs.iter().enumerate() {
        if signing.name.trim().is_empty() {
            errors.push(ManifestError::validation(format!(
                "android.signing_configs[{i}].name must not be empty"
            )));
        } else if !seen_signing.insert(signing.name.as_str()) {
            errors.push(ManifestError::validation(format!(
                "duplicate signing config `{}` in [[android.signing_configs]]",
                signing.name
            )));
        }
        if signing.store_file.trim().is_empty() {
            errors.push(ManifestError::validation(format!(
                "android.signing_configs[{i}].store_file must not be empty"
            )));
        }
    }

    let mut seen_build_types = HashSet::new();
    for (i, build_type) in android.build_types.iter().enumerate() {
        if build_type.name.trim().is_empty() {
            errors.push(ManifestError::validation(format!(
                "android.build_types[{i}].name must not be empty"
            )));
        } else if !seen_build_types.insert(build_type.name.as_str()) {
            errors.push(ManifestError::validation(format!(
                "duplicate build type `{}` in [[android.build_types]]",
                build_type.name
            )));
        }

        // Android refuses to shrink resources without code shrinking.
        if build_type.shrink_resources && !build_type.minify_enabled {
            errors.push(ManifestError::validation(format!(
                "build type `{}` sets shrink_resources without minify_enabled",
                build_type.name
            )));
        }
    }

    if let Some(flutter) = &doc.flutter
        && flutter.source.trim().is_empty()
    {
        errors.push(ManifestError::validation("flutter.source must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a resolved configuration, where toolchain values are in play.
pub fn validate_configuration(config: &BuildConfiguration) -> Result<(), Vec<ManifestError>> {
    let mut errors = Vec::new();
    let sdk = &config.sdk;

    if sdk.min_sdk > sdk.target_sdk {
        errors.push(ManifestError::validation(format!(
            "min_sdk ({}) must not exceed target_sdk ({})",
            sdk.min_sdk, sdk.target_sdk
        )));
    }

    if sdk.target_sdk > sdk.compile_sdk {
        errors.push(ManifestError::validation(format!(
            "target_sdk ({}) must not exceed compile_sdk ({})",
            sdk.target_sdk, sdk.compile_sdk
        )));
    }

    if config.version_code == 0 {
        errors.push(ManifestError::validation(
            "version_code resolved to 0; it must be a positive integer",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Java-style package name with at least two segments, as Android requires
/// for application ids and namespaces.
fn is_valid_package_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2
        && segments.iter().all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
