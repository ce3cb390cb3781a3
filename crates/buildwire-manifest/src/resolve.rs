// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a manifest document into a [`BuildConfiguration`].
//!
//! Manifest literals win, toolchain values fill the gaps, and the literal
//! fallbacks (`version_code = 1`, `version_name = "1.0.0"`) apply last.
//! Signing references resolve against the environment's registry plus any
//! configurations the manifest declares.

use std::path::PathBuf;

use buildwire_core::{
    BuildConfiguration, BuildVariant, CompileOptions, DEFAULT_VERSION_CODE, DEFAULT_VERSION_NAME,
    DependencyCoordinate, JavaVersion, SdkBinding, SigningConfig, SigningRegistry,
    ToolchainDescriptor,
};
use secrecy::SecretString;
use tracing::debug;

use crate::diagnostic::{self, ManifestError, SourceText};
use crate::model::{ManifestDocument, SigningConfigDecl};

/// Resolve a document against the toolchain and signing registry.
///
/// `registry` is not modified; manifest-declared signing configs are added to
/// a copy.
pub fn resolve(
    doc: &ManifestDocument,
    toolchain: &ToolchainDescriptor,
    registry: &SigningRegistry,
    source: SourceText<'_>,
) -> Result<BuildConfiguration, Vec<ManifestError>> {
    let mut errors = Vec::new();
    let android = &doc.android;
    let default_config = &android.default_config;

    let sdk = SdkBinding {
        compile_sdk: android.compile_sdk.unwrap_or(toolchain.compile_sdk),
        min_sdk: default_config.min_sdk.unwrap_or(toolchain.min_sdk),
        target_sdk: default_config.target_sdk.unwrap_or(toolchain.target_sdk),
        ndk_version: android
            .ndk_version
            .clone()
            .unwrap_or_else(|| toolchain.ndk_version.clone()),
    };
    debug!(?sdk, "resolved sdk binding");

    let version_code = default_config
        .version_code
        .or(toolchain.version_code)
        .unwrap_or(DEFAULT_VERSION_CODE);
    let version_name = default_config
        .version_name
        .clone()
        .or_else(|| toolchain.version_name.clone())
        .unwrap_or_else(|| DEFAULT_VERSION_NAME.to_string());

    let compile_options = CompileOptions {
        source_compatibility: java_version(
            "android.compile_options.source_compatibility",
            &android.compile_options.source_compatibility,
            &mut errors,
        ),
        target_compatibility: java_version(
            "android.compile_options.target_compatibility",
            &android.compile_options.target_compatibility,
            &mut errors,
        ),
        jvm_target: java_version(
            "android.kotlin_options.jvm_target",
            &android.kotlin_options.jvm_target,
            &mut errors,
        ),
    };

    let mut signing = registry.clone();
    for decl in &android.signing_configs {
        if signing.insert(signing_config(decl)).is_some() {
            debug!(name = %decl.name, "manifest signing config replaces registry entry");
        }
    }

    let mut variants = Vec::with_capacity(android.build_types.len());
    for (i, build_type) in android.build_types.iter().enumerate() {
        let reference = build_type.signing_config.trim();
        match signing.get(reference) {
            Some(config) => {
                debug!(
                    variant = %build_type.name,
                    signing = %config.name,
                    "resolved signing config"
                );
                variants.push(BuildVariant {
                    name: build_type.name.clone(),
                    signing: config,
                    minify_enabled: build_type.minify_enabled,
                    shrink_resources: build_type.shrink_resources,
                });
            }
            None => {
                let names = signing.names();
                let path = vec![
                    "android".to_string(),
                    "build_types".to_string(),
                    i.to_string(),
                ];
                let (span, src) = diagnostic::locate(source, &path, "signing_config");
                errors.push(ManifestError::UnresolvedSigningConfig {
                    variant: build_type.name.clone(),
                    reference: reference.to_string(),
                    suggestion: diagnostic::suggest_key(reference, &names),
                    available: names.join(", "),
                    span,
                    src,
                });
            }
        }
    }

    let mut dependencies = Vec::with_capacity(doc.dependencies.len());
    for (i, decl) in doc.dependencies.iter().enumerate() {
        match DependencyCoordinate::parse(&decl.notation, decl.platform, decl.configuration) {
            Ok(coordinate) => dependencies.push(coordinate),
            Err(err) => errors.push(ManifestError::validation(format!("dependencies[{i}]: {err}"))),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let application_id = default_config.application_id.trim().to_string();
    let namespace = android
        .namespace
        .as_deref()
        .map(str::trim)
        .unwrap_or(&application_id)
        .to_string();

    Ok(BuildConfiguration {
        namespace,
        application_id,
        plugins: doc.plugins.iter().map(|p| p.trim().to_string()).collect(),
        sdk,
        compile_options,
        version_code,
        version_name,
        multidex_enabled: default_config.multidex_enabled,
        variants,
        dependencies,
        flutter_source: doc.flutter.as_ref().map(|f| f.source.clone()),
    })
}

/// Parse a Java level, recording an error and yielding the default on failure
/// so the remaining fields are still checked.
fn java_version(key: &str, value: &str, errors: &mut Vec<ManifestError>) -> JavaVersion {
    JavaVersion::parse(value).unwrap_or_else(|err| {
        errors.push(ManifestError::validation(format!(
            "{key}: {err} (expected one of 1.8, 11, 17, 21)"
        )));
        JavaVersion::Java11
    })
}

fn signing_config(decl: &SigningConfigDecl) -> SigningConfig {
    SigningConfig {
        name: decl.name.trim().to_string(),
        store_file: PathBuf::from(&decl.store_file),
        key_alias: decl.key_alias.clone(),
        store_password: SecretString::from(decl.store_password.clone()),
        key_password: SecretString::from(decl.key_password.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::sync::Arc;

    const SOURCE: &str = r#"
[android.default_config]
application_id = "com.example.app"

[[android.signing_configs]]
name = "upload"
store_file = "keys/upload.jks"
key_alias = "upload"
store_password = "store-pw"
key_password = "key-pw"

[[android.build_types]]
name = "release"
signing_config = "upload"

[[android.build_types]]
name = "staging"
signing_config = "uplaod"
"#;

    fn resolve_source(text: &str) -> Result<BuildConfiguration, Vec<ManifestError>> {
        let doc: ManifestDocument = toml::from_str(text).unwrap();
        resolve(
            &doc,
            &ToolchainDescriptor::default(),
            &SigningRegistry::with_debug_default(),
            SourceText::new("build.toml", text),
        )
    }

    #[test]
    fn unresolved_reference_suggests_and_points_at_entry() {
        let errors = resolve_source(SOURCE).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ManifestError::UnresolvedSigningConfig {
                variant,
                reference,
                suggestion,
                available,
                span,
                ..
            } => {
                assert_eq!(variant, "staging");
                assert_eq!(reference, "uplaod");
                assert_eq!(suggestion.as_deref(), Some("upload"));
                assert_eq!(available, "debug, upload");
                let offset = span.expect("span located").offset();
                assert!(SOURCE[offset..].starts_with("signing_config = \"uplaod\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn signing_reference_is_trimmed() {
        let text = SOURCE
            .replace("\"upload\"\n\n[[android.build_types]]", "\" upload \"\n\n[[android.build_types]]")
            .replace("\"uplaod\"", "\"debug \"");
        let config = resolve_source(&text).unwrap();
        assert_eq!(config.variant("release").unwrap().signing.name, "upload");
        assert_eq!(config.variant("staging").unwrap().signing.name, "debug");
    }

    #[test]
    fn manifest_signing_config_is_registered() {
        let text = SOURCE.replace("\"uplaod\"", "\"upload\"");
        let config = resolve_source(&text).unwrap();
        let release = config.variant("release").unwrap();
        let staging = config.variant("staging").unwrap();
        assert!(Arc::ptr_eq(&release.signing, &staging.signing));
        assert_eq!(release.signing.store_file, PathBuf::from("keys/upload.jks"));
        assert_eq!(release.signing.store_password.expose_secret(), "store-pw");
    }

    #[test]
    fn caller_registry_is_untouched() {
        let text = SOURCE.replace("\"uplaod\"", "\"upload\"");
        let doc: ManifestDocument = toml::from_str(&text).unwrap();
        let registry = SigningRegistry::with_debug_default();
        resolve(
            &doc,
            &ToolchainDescriptor::default(),
            &registry,
            SourceText::new("build.toml", &text),
        )
        .unwrap();
        assert!(!registry.contains("upload"));
    }

    #[test]
    fn bad_java_version_and_notation_are_both_reported() {
        let text = r#"
[android.compile_options]
source_compatibility = "12"

[android.default_config]
application_id = "com.example.app"

[[dependencies]]
notation = "firebase"
"#;
        let errors = resolve_source(text).unwrap_err();
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 2);
        assert!(msgs[0].contains("source_compatibility"));
        assert!(msgs[1].contains("dependencies[0]"));
    }

    #[test]
    fn namespace_defaults_to_application_id() {
        let text = r#"
[android.default_config]
application_id = "com.example.app"
"#;
        let config = resolve_source(text).unwrap();
        assert_eq!(config.namespace, "com.example.app");
        assert!(config.variants.is_empty());
    }

    #[test]
    fn toolchain_fills_unset_values() {
        let text = r#"
[android]
compile_sdk = 34

[android.default_config]
application_id = "com.example.app"
min_sdk = 24
"#;
        let doc: ManifestDocument = toml::from_str(text).unwrap();
        let toolchain = ToolchainDescriptor {
            target_sdk: 33,
            version_code: Some(12),
            version_name: Some("3.1.4".to_string()),
            ..ToolchainDescriptor::default()
        };
        let config = resolve(
            &doc,
            &toolchain,
            &SigningRegistry::with_debug_default(),
            SourceText::new("build.toml", text),
        )
        .unwrap();
        assert_eq!(config.sdk.compile_sdk, 34);
        assert_eq!(config.sdk.min_sdk, 24);
        assert_eq!(config.sdk.target_sdk, 33);
        assert_eq!(config.version_code, 12);
        assert_eq!(config.version_name, "3.1.4");
    }
}
