// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest document structs, deserialized straight from TOML.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is an
//! error rather than a silently ignored line. Ordered collections (plugins,
//! build types, dependencies) are arrays so declaration order survives.

use buildwire_core::DependencyConfiguration;
use serde::{Deserialize, Serialize};

/// A whole manifest file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestDocument {
    /// Plugin ids in application order.
    #[serde(default)]
    pub plugins: Vec<String>,

    pub android: AndroidSection,

    #[serde(default)]
    pub flutter: Option<FlutterSection>,

    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
}

/// The `[android]` block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AndroidSection {
    /// Defaults to `default_config.application_id`.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Overrides the toolchain's compile SDK.
    #[serde(default)]
    pub compile_sdk: Option<u32>,

    /// Overrides the toolchain's NDK version.
    #[serde(default)]
    pub ndk_version: Option<String>,

    #[serde(default)]
    pub compile_options: CompileOptionsSection,

    #[serde(default)]
    pub kotlin_options: KotlinOptionsSection,

    pub default_config: DefaultConfigSection,

    #[serde(default)]
    pub signing_configs: Vec<SigningConfigDecl>,

    #[serde(default)]
    pub build_types: Vec<BuildTypeDecl>,
}

/// `[android.compile_options]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompileOptionsSection {
    #[serde(default = "default_java_version")]
    pub source_compatibility: String,

    #[serde(default = "default_java_version")]
    pub target_compatibility: String,
}

impl Default for CompileOptionsSection {
    fn default() -> Self {
        Self {
            source_compatibility: default_java_version(),
            target_compatibility: default_java_version(),
        }
    }
}

/// `[android.kotlin_options]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KotlinOptionsSection {
    #[serde(default = "default_java_version")]
    pub jvm_target: String,
}

impl Default for KotlinOptionsSection {
    fn default() -> Self {
        Self {
            jvm_target: default_java_version(),
        }
    }
}

fn default_java_version() -> String {
    "11".to_string()
}

/// `[android.default_config]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfigSection {
    pub application_id: String,

    /// Falls back to the toolchain when unset.
    #[serde(default)]
    pub min_sdk: Option<u32>,

    /// Falls back to the toolchain when unset.
    #[serde(default)]
    pub target_sdk: Option<u32>,

    /// Falls back to the toolchain, then to 1.
    #[serde(default)]
    pub version_code: Option<u32>,

    /// Falls back to the toolchain, then to "1.0.0".
    #[serde(default)]
    pub version_name: Option<String>,

    #[serde(default)]
    pub multidex_enabled: bool,
}

/// One `[[android.signing_configs]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SigningConfigDecl {
    pub name: String,
    pub store_file: String,
    pub key_alias: String,
    pub store_password: String,
    pub key_password: String,
}

/// One `[[android.build_types]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypeDecl {
    pub name: String,

    /// Name of a signing configuration in the registry.
    pub signing_config: String,

    #[serde(default)]
    pub minify_enabled: bool,

    #[serde(default)]
    pub shrink_resources: bool,
}

/// `[flutter]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlutterSection {
    /// Path to the Flutter module, relative to the Android app directory.
    pub source: String,
}

/// One `[[dependencies]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDecl {
    /// `group:artifact[:version]`.
    pub notation: String,

    /// Import the coordinate as a platform (BOM).
    #[serde(default)]
    pub platform: bool,

    #[serde(default)]
    pub configuration: DependencyConfiguration,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[android.default_config]
application_id = "com.example.app"
"#;

    #[test]
    fn minimal_document_uses_defaults() {
        let doc: ManifestDocument = toml::from_str(MINIMAL).unwrap();
        assert!(doc.plugins.is_empty());
        assert!(doc.flutter.is_none());
        assert!(doc.dependencies.is_empty());
        assert_eq!(doc.android.namespace, None);
        assert_eq!(doc.android.compile_options.source_compatibility, "11");
        assert_eq!(doc.android.kotlin_options.jvm_target, "11");
        assert!(!doc.android.default_config.multidex_enabled);
        assert!(doc.android.build_types.is_empty());
    }

    #[test]
    fn build_types_keep_declaration_order() {
        let toml_str = r#"
[android.default_config]
application_id = "com.example.app"

[[android.build_types]]
name = "release"
signing_config = "debug"
minify_enabled = true

[[android.build_types]]
name = "debug"
signing_config = "debug"
"#;
        let doc: ManifestDocument = toml::from_str(toml_str).unwrap();
        let names: Vec<_> = doc.android.build_types.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["release", "debug"]);
        assert!(doc.android.build_types[0].minify_enabled);
        assert!(!doc.android.build_types[1].shrink_resources);
    }

    #[test]
    fn dependency_configuration_defaults_to_implementation() {
        let toml_str = r#"
[android.default_config]
application_id = "com.example.app"

[[dependencies]]
notation = "androidx.core:core-ktx:1.12.0"

[[dependencies]]
notation = "junit:junit:4.13.2"
configuration = "testImplementation"
"#;
        let doc: ManifestDocument = toml::from_str(toml_str).unwrap();
        assert_eq!(
            doc.dependencies[0].configuration,
            DependencyConfiguration::Implementation
        );
        assert_eq!(
            doc.dependencies[1].configuration,
            DependencyConfiguration::TestImplementation
        );
        assert!(!doc.dependencies[0].platform);
    }

    #[test]
    fn build_type_requires_signing_config() {
        let toml_str = r#"
[android.default_config]
application_id = "com.example.app"

[[android.build_types]]
name = "release"
"#;
        assert!(toml::from_str::<ManifestDocument>(toml_str).is_err());
    }

    #[test]
    fn unknown_field_in_default_config_is_rejected() {
        let toml_str = r#"
[android.default_config]
application_id = "com.example.app"
multiDexEnabled = true
"#;
        assert!(toml::from_str::<ManifestDocument>(toml_str).is_err());
    }
}
