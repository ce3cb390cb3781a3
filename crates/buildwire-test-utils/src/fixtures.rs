// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest text fixtures and a builder for composing manifests in tests.

use std::path::PathBuf;

use buildwire_core::SigningConfig;
use secrecy::SecretString;
use toml::{Table, Value};

/// A Flutter app with Firebase, MultiDex and AndroidX dependencies, release
/// signed with the debug keys.
pub const INVENTAPP_MANIFEST: &str = r#"
plugins = [
    "com.android.application",
    "kotlin-android",
    "dev.flutter.flutter-gradle-plugin",
    "com.google.gms.google-services",
]

[android]
namespace = "com.example.inventapp"

[android.compile_options]
source_compatibility = "VERSION_11"
target_compatibility = "VERSION_11"

[android.kotlin_options]
jvm_target = "11"

[android.default_config]
application_id = "com.example.inventapp"
multidex_enabled = true

[[android.build_types]]
name = "release"
signing_config = "debug"
minify_enabled = true
shrink_resources = true

[[android.build_types]]
name = "debug"
signing_config = "debug"

[flutter]
source = "../.."

[[dependencies]]
notation = "com.google.firebase:firebase-bom:33.0.0"
platform = true

[[dependencies]]
notation = "com.google.firebase:firebase-analytics"

[[dependencies]]
notation = "com.google.firebase:firebase-firestore"

[[dependencies]]
notation = "com.google.firebase:firebase-storage"

[[dependencies]]
notation = "androidx.multidex:multidex:2.0.1"

[[dependencies]]
notation = "androidx.core:core-ktx:1.12.0"

[[dependencies]]
notation = "androidx.appcompat:appcompat:1.6.1"
"#;

/// An `upload` signing configuration with fixed test passwords.
pub fn upload_signing_config() -> SigningConfig {
    SigningConfig {
        name: "upload".to_string(),
        store_file: PathBuf::from("upload-keystore.jks"),
        key_alias: "upload".to_string(),
        store_password: SecretString::from("upload-store".to_string()),
        key_password: SecretString::from("upload-key".to_string()),
    }
}

/// Builds manifest TOML from parts.
///
/// Every field starts unset so tests state exactly what they rely on. The
/// application id defaults to `com.example.app`; use
/// [`ManifestBuilder::without_application_id`] to drop it.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    application_id: Option<String>,
    plugins: Vec<String>,
    version_code: Option<i64>,
    version_name: Option<String>,
    build_types: Vec<Table>,
    dependencies: Vec<Table>,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            application_id: Some("com.example.app".to_string()),
            plugins: Vec::new(),
            version_code: None,
            version_name: None,
            build_types: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn application_id(mut self, id: &str) -> Self {
        self.application_id = Some(id.to_string());
        self
    }

    pub fn without_application_id(mut self) -> Self {
        self.application_id = None;
        self
    }

    pub fn plugin(mut self, id: &str) -> Self {
        self.plugins.push(id.to_string());
        self
    }

    pub fn version_code(mut self, code: i64) -> Self {
        self.version_code = Some(code);
        self
    }

    pub fn version_name(mut self, name: &str) -> Self {
        self.version_name = Some(name.to_string());
        self
    }

    /// Add a build type with minify and shrink disabled.
    pub fn build_type(self, name: &str, signing_config: &str) -> Self {
        self.build_type_with(name, signing_config, false, false)
    }

    pub fn build_type_with(
        mut self,
        name: &str,
        signing_config: &str,
        minify_enabled: bool,
        shrink_resources: bool,
    ) -> Self {
        let mut table = Table::new();
        table.insert("name".into(), Value::from(name));
        table.insert("signing_config".into(), Value::from(signing_config));
        table.insert("minify_enabled".into(), Value::from(minify_enabled));
        table.insert("shrink_resources".into(), Value::from(shrink_resources));
        self.build_types.push(table);
        self
    }

    /// Add a dependency; a version-less notation is BOM-managed.
    pub fn dependency(self, notation: &str) -> Self {
        self.dependency_with(notation, false)
    }

    /// Add a BOM imported as a platform.
    pub fn platform(self, notation: &str) -> Self {
        self.dependency_with(notation, true)
    }

    fn dependency_with(mut self, notation: &str, platform: bool) -> Self {
        let mut table = Table::new();
        table.insert("notation".into(), Value::from(notation));
        if platform {
            table.insert("platform".into(), Value::from(true));
        }
        self.dependencies.push(table);
        self
    }

    /// Render the manifest as TOML text.
    pub fn render(&self) -> String {
        let mut default_config = Table::new();
        if let Some(id) = &self.application_id {
            default_config.insert("application_id".into(), Value::from(id.as_str()));
        }
        if let Some(code) = self.version_code {
            default_config.insert("version_code".into(), Value::from(code));
        }
        if let Some(name) = &self.version_name {
            default_config.insert("version_name".into(), Value::from(name.as_str()));
        }

        let mut android = Table::new();
        android.insert("default_config".into(), Value::Table(default_config));
        if !self.build_types.is_empty() {
            android.insert(
                "build_types".into(),
                Value::Array(self.build_types.iter().cloned().map(Value::Table).collect()),
            );
        }

        let mut root = Table::new();
        if !self.plugins.is_empty() {
            root.insert(
                "plugins".into(),
                Value::Array(self.plugins.iter().map(|p| Value::from(p.as_str())).collect()),
            );
        }
        root.insert("android".into(), Value::Table(android));
        if !self.dependencies.is_empty() {
            root.insert(
                "dependencies".into(),
                Value::Array(self.dependencies.iter().cloned().map(Value::Table).collect()),
            );
        }

        toml::to_string(&root).expect("manifest table serializes to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_manifest_parses_back_as_toml() {
        let text = ManifestBuilder::new()
            .plugin("com.android.application")
            .version_code(3)
            .build_type("release", "debug")
            .platform("com.google.firebase:firebase-bom:33.0.0")
            .dependency("com.google.firebase:firebase-analytics")
            .render();
        let table: Table = text.parse().unwrap();
        let deps = table["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0]["platform"].as_bool(), Some(true));
        assert_eq!(
            table["android"]["default_config"]["version_code"].as_integer(),
            Some(3)
        );
    }

    #[test]
    fn without_application_id_omits_the_key() {
        let text = ManifestBuilder::new().without_application_id().render();
        assert!(!text.contains("application_id"));
    }

    #[test]
    fn inventapp_fixture_is_valid_toml() {
        let table: Table = INVENTAPP_MANIFEST.parse().unwrap();
        assert_eq!(table["plugins"].as_array().unwrap().len(), 4);
    }
}
