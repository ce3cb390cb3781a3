// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved build configuration handed to the external build tool.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use strum::{Display, EnumString};

use crate::dependency::{DependencyCoordinate, DependencyVersion};
use crate::error::BuildwireError;
use crate::signing::SigningConfig;

/// Fallback version code when neither the manifest nor the toolchain sets one.
pub const DEFAULT_VERSION_CODE: u32 = 1;

/// Fallback version name when neither the manifest nor the toolchain sets one.
pub const DEFAULT_VERSION_NAME: &str = "1.0.0";

/// SDK levels and NDK version, resolved once per load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkBinding {
    pub compile_sdk: u32,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub ndk_version: String,
}

/// Supported Java language levels.
///
/// Parses the bare number as well as the Gradle `JavaVersion` constant forms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
)]
pub enum JavaVersion {
    #[strum(
        to_string = "1.8",
        serialize = "8",
        serialize = "VERSION_1_8",
        serialize = "JavaVersion.VERSION_1_8"
    )]
    #[serde(rename = "1.8")]
    Java8,
    #[strum(
        to_string = "11",
        serialize = "VERSION_11",
        serialize = "JavaVersion.VERSION_11"
    )]
    #[serde(rename = "11")]
    Java11,
    #[strum(
        to_string = "17",
        serialize = "VERSION_17",
        serialize = "JavaVersion.VERSION_17"
    )]
    #[serde(rename = "17")]
    Java17,
    #[strum(
        to_string = "21",
        serialize = "VERSION_21",
        serialize = "JavaVersion.VERSION_21"
    )]
    #[serde(rename = "21")]
    Java21,
}

impl JavaVersion {
    pub fn parse(s: &str) -> Result<Self, BuildwireError> {
        s.trim()
            .parse::<Self>()
            .map_err(|_| BuildwireError::InvalidJavaVersion(s.to_string()))
    }
}

/// Java and Kotlin compilation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    pub jvm_target: JavaVersion,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            source_compatibility: JavaVersion::Java11,
            target_compatibility: JavaVersion::Java11,
            jvm_target: JavaVersion::Java11,
        }
    }
}

/// A named build type with its resolved signing configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildVariant {
    pub name: String,
    #[serde(rename = "signing_config", serialize_with = "serialize_signing_name")]
    pub signing: Arc<SigningConfig>,
    pub minify_enabled: bool,
    pub shrink_resources: bool,
}

fn serialize_signing_name<S: Serializer>(
    signing: &Arc<SigningConfig>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&signing.name)
}

/// Everything a manifest declares, with toolchain values and signing
/// references resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfiguration {
    pub application_id: String,
    pub namespace: String,
    pub plugins: Vec<String>,
    pub sdk: SdkBinding,
    pub compile_options: CompileOptions,
    pub version_code: u32,
    pub version_name: String,
    pub multidex_enabled: bool,
    pub variants: Vec<BuildVariant>,
    pub dependencies: Vec<DependencyCoordinate>,
    pub flutter_source: Option<String>,
}

impl BuildConfiguration {
    pub fn variant(&self, name: &str) -> Option<&BuildVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Bills of materials imported as platforms, in declaration order.
    pub fn boms(&self) -> impl Iterator<Item = &DependencyCoordinate> {
        self.dependencies.iter().filter(|d| d.is_platform())
    }

    /// Coordinates with no declared version.
    pub fn bom_managed(&self) -> impl Iterator<Item = &DependencyCoordinate> {
        self.dependencies
            .iter()
            .filter(|d| d.version == DependencyVersion::Managed)
    }
}
