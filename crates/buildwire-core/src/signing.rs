// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signing configurations and the registry build variants resolve against.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Name of the signing configuration Android provides for every project.
pub const DEBUG_SIGNING_CONFIG: &str = "debug";

/// A named keystore reference.
///
/// Passwords are never serialized and print redacted in `Debug`.
#[derive(Debug, Serialize)]
pub struct SigningConfig {
    pub name: String,
    pub store_file: PathBuf,
    pub key_alias: String,
    #[serde(skip_serializing)]
    pub store_password: SecretString,
    #[serde(skip_serializing)]
    pub key_password: SecretString,
}

impl SigningConfig {
    /// The well-known Android debug keystore (`~/.android/debug.keystore`).
    pub fn android_debug() -> Self {
        let store_file = dirs::home_dir()
            .map(|home| home.join(".android").join("debug.keystore"))
            .unwrap_or_else(|| PathBuf::from("debug.keystore"));

        Self {
            name: DEBUG_SIGNING_CONFIG.to_string(),
            store_file,
            key_alias: "androiddebugkey".to_string(),
            store_password: SecretString::from("android".to_string()),
            key_password: SecretString::from("android".to_string()),
        }
    }
}

impl PartialEq for SigningConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.store_file == other.store_file
            && self.key_alias == other.key_alias
            && self.store_password.expose_secret() == other.store_password.expose_secret()
            && self.key_password.expose_secret() == other.key_password.expose_secret()
    }
}

/// Named signing configurations available to build variants.
///
/// Entries are shared: every variant resolving the same name receives a clone
/// of the same `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SigningRegistry {
    configs: BTreeMap<String, Arc<SigningConfig>>,
}

impl SigningRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the implicit Android `debug` configuration.
    pub fn with_debug_default() -> Self {
        let mut registry = Self::new();
        registry.insert(SigningConfig::android_debug());
        registry
    }

    /// Register a configuration, returning the one it replaced, if any.
    pub fn insert(&mut self, config: SigningConfig) -> Option<Arc<SigningConfig>> {
        tracing::debug!(name = %config.name, "registering signing config");
        self.configs.insert(config.name.clone(), Arc::new(config))
    }

    pub fn get(&self, name: &str) -> Option<Arc<SigningConfig>> {
        self.configs.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.configs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_config() -> SigningConfig {
        SigningConfig {
            name: "upload".to_string(),
            store_file: PathBuf::from("upload.jks"),
            key_alias: "upload".to_string(),
            store_password: SecretString::from("store-secret".to_string()),
            key_password: SecretString::from("key-secret".to_string()),
        }
    }

    #[test]
    fn debug_default_is_registered() {
        let registry = SigningRegistry::with_debug_default();
        assert!(registry.contains(DEBUG_SIGNING_CONFIG));
        let debug = registry.get("debug").unwrap();
        assert_eq!(debug.key_alias, "androiddebugkey");
        assert!(debug.store_file.ends_with("debug.keystore"));
    }

    #[test]
    fn lookups_share_one_allocation() {
        let registry = SigningRegistry::with_debug_default();
        let a = registry.get("debug").unwrap();
        let b = registry.get("debug").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut registry = SigningRegistry::with_debug_default();
        let mut custom = upload_config();
        custom.name = "debug".to_string();
        let replaced = registry.insert(custom).expect("debug existed");
        assert_eq!(replaced.key_alias, "androiddebugkey");
        assert_eq!(registry.get("debug").unwrap().key_alias, "upload");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = SigningRegistry::with_debug_default();
        registry.insert(upload_config());
        assert_eq!(registry.names(), vec!["debug", "upload"]);
    }

    #[test]
    fn passwords_are_not_serialized_or_printed() {
        let config = upload_config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("store-secret"));
        assert!(!json.contains("key-secret"));
        assert!(!format!("{config:?}").contains("store-secret"));
    }
}
