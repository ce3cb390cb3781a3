// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The toolchain descriptor: SDK numbers and app version supplied by the
//! environment rather than the manifest.

use serde::{Deserialize, Serialize};

/// Values the surrounding toolchain provides to every manifest load.
///
/// Defaults mirror what Flutter's Android Gradle plugin ships with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainDescriptor {
    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,

    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,

    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,

    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// App version code, usually derived from the project's build number.
    #[serde(default)]
    pub version_code: Option<u32>,

    /// App version name, usually derived from the project's version string.
    #[serde(default)]
    pub version_name: Option<String>,
}

impl Default for ToolchainDescriptor {
    fn default() -> Self {
        Self {
            compile_sdk: default_compile_sdk(),
            min_sdk: default_min_sdk(),
            target_sdk: default_target_sdk(),
            ndk_version: default_ndk_version(),
            version_code: None,
            version_name: None,
        }
    }
}

fn default_compile_sdk() -> u32 {
    35
}

fn default_min_sdk() -> u32 {
    21
}

fn default_target_sdk() -> u32 {
    35
}

fn default_ndk_version() -> String {
    "27.0.12077973".to_string()
}
