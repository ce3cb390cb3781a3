// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Buildwire workspace.

use thiserror::Error;

/// The primary error type for core value parsing and CLI plumbing.
///
/// Manifest loading reports its own diagnostics (see `buildwire-manifest`);
/// this type covers the failures that happen outside a manifest document.
#[derive(Debug, Error)]
pub enum BuildwireError {
    /// A dependency notation could not be split into `group:artifact[:version]`.
    #[error("invalid dependency notation `{notation}`: {reason}")]
    InvalidNotation { notation: String, reason: String },

    /// A Java compatibility level outside the supported set.
    #[error("unsupported Java version `{0}`")]
    InvalidJavaVersion(String),

    /// Rendering the configuration as JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The manifest failed to load. The diagnostics have already been reported.
    #[error("manifest failed to load with {count} error(s)")]
    ManifestRejected { count: usize },
}
