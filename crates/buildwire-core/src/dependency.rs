// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency coordinates in Gradle notation.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BuildwireError;

/// The Gradle configuration a dependency is declared under.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum DependencyConfiguration {
    #[default]
    Implementation,
    Api,
    CompileOnly,
    RuntimeOnly,
    TestImplementation,
    AndroidTestImplementation,
    DebugImplementation,
    ReleaseImplementation,
}

/// How a coordinate's version is determined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "version", rename_all = "snake_case")]
pub enum DependencyVersion {
    /// An explicit version string.
    Pinned(String),
    /// The coordinate is a bill of materials imported as a platform.
    Platform(String),
    /// No version declared; a BOM supplies it.
    Managed,
}

/// A single declared dependency.
///
/// Duplicates are allowed; the declarer owns uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyCoordinate {
    pub configuration: DependencyConfiguration,
    pub group: String,
    pub artifact: String,
    pub version: DependencyVersion,
}

impl DependencyCoordinate {
    /// Parse `group:artifact[:version]`.
    ///
    /// With `platform` set, the notation must carry a version and the result
    /// is a [`DependencyVersion::Platform`] import.
    pub fn parse(
        notation: &str,
        platform: bool,
        configuration: DependencyConfiguration,
    ) -> Result<Self, BuildwireError> {
        let invalid = |reason: &str| BuildwireError::InvalidNotation {
            notation: notation.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = notation.trim().split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid("expected `group:artifact` or `group:artifact:version`"));
        }
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("segments must not be empty"));
        }

        let group = parts[0].trim().to_string();
        let artifact = parts[1].trim().to_string();
        let version = match (parts.get(2).map(|v| v.trim().to_string()), platform) {
            (Some(v), true) => DependencyVersion::Platform(v),
            (Some(v), false) => DependencyVersion::Pinned(v),
            (None, true) => return Err(invalid("a platform import needs a version")),
            (None, false) => DependencyVersion::Managed,
        };

        Ok(Self {
            configuration,
            group,
            artifact,
            version,
        })
    }

    /// The `group:artifact[:version]` notation for this coordinate.
    pub fn notation(&self) -> String {
        match &self.version {
            DependencyVersion::Pinned(v) | DependencyVersion::Platform(v) => {
                format!("{}:{}:{v}", self.group, self.artifact)
            }
            DependencyVersion::Managed => format!("{}:{}", self.group, self.artifact),
        }
    }

    pub fn is_platform(&self) -> bool {
        matches!(self.version, DependencyVersion::Platform(_))
    }
}

/// Renders the coordinate as a Gradle dependency line, e.g.
/// `implementation(platform("com.google.firebase:firebase-bom:33.0.0"))`.
impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_platform() {
            write!(f, "{}(platform(\"{}\"))", self.configuration, self.notation())
        } else {
            write!(f, "{}(\"{}\")", self.configuration, self.notation())
        }
    }
}
