// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-backed extraction of the manifest document and the toolchain
//! descriptor.
//!
//! The manifest is a single TOML document with no layering. The toolchain
//! descriptor is layered: compiled defaults, then `buildwire-toolchain.toml`
//! (or an explicit path), then `BUILDWIRE_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use buildwire_core::ToolchainDescriptor;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ManifestDocument;

/// Toolchain file looked up in the working directory when no path is given.
pub const TOOLCHAIN_FILE: &str = "buildwire-toolchain.toml";

/// Prefix for toolchain environment overrides.
pub const ENV_PREFIX: &str = "BUILDWIRE_";

/// Numeric toolchain keys that may be overridden from the environment.
const TOOLCHAIN_ENV_KEYS: &[&str] = &["compile_sdk", "min_sdk", "target_sdk", "version_code"];

/// String toolchain keys. Their values are taken verbatim so `2.0` stays a
/// version name instead of becoming a float.
const TOOLCHAIN_STRING_ENV_KEYS: &[&str] = &["ndk_version", "version_name"];

/// Extract a manifest document from TOML text.
pub fn parse_manifest_str(toml_content: &str) -> Result<ManifestDocument, figment::Error> {
    Figment::new().merge(Toml::string(toml_content)).extract()
}

/// Load the toolchain descriptor with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `path`, or `./buildwire-toolchain.toml` when `path` is `None`
/// 3. `BUILDWIRE_*` environment variables
pub fn load_toolchain(path: Option<&Path>) -> Result<ToolchainDescriptor, figment::Error> {
    build_toolchain_figment(path).extract()
}

/// Load the toolchain descriptor from TOML text over the compiled defaults.
///
/// Ignores the environment; used for testing and explicit descriptors.
pub fn load_toolchain_from_str(toml_content: &str) -> Result<ToolchainDescriptor, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ToolchainDescriptor::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the toolchain Figment before extraction so callers can inspect metadata.
pub fn build_toolchain_figment(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(TOOLCHAIN_FILE));
    let figment = Figment::new()
        .merge(Serialized::defaults(ToolchainDescriptor::default()))
        .merge(Toml::file(file))
        .merge(env_provider());

    TOOLCHAIN_STRING_ENV_KEYS
        .iter()
        .fold(figment, |figment, key| {
            let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
            match std::env::var(&var) {
                Ok(value) => figment.merge(Serialized::default(key, value)),
                Err(_) => figment,
            }
        })
}

/// The toolchain is flat, so prefixed keys map directly onto fields.
/// `only` keeps unrelated `BUILDWIRE_*` variables (e.g. `BUILDWIRE_LOG`)
/// from tripping `deny_unknown_fields`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).only(TOOLCHAIN_ENV_KEYS)
}
