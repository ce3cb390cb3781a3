// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for loading manifests from disk.
//!
//! `ManifestHarness` owns a temp directory holding a manifest and, optionally,
//! a toolchain file, plus the signing registry a load should resolve against.

use std::path::{Path, PathBuf};

use buildwire_core::{SigningConfig, SigningRegistry};

/// Builder for creating test environments with configurable options.
pub struct ManifestHarnessBuilder {
    manifest: String,
    toolchain: Option<String>,
    extra_signing: Vec<SigningConfig>,
    include_debug_signing: bool,
}

impl ManifestHarnessBuilder {
    fn new() -> Self {
        Self {
            manifest: String::new(),
            toolchain: None,
            extra_signing: Vec::new(),
            include_debug_signing: true,
        }
    }

    /// Set the manifest text written to `build.toml`.
    pub fn with_manifest(mut self, text: impl Into<String>) -> Self {
        self.manifest = text.into();
        self
    }

    /// Write a `buildwire-toolchain.toml` next to the manifest.
    pub fn with_toolchain(mut self, text: impl Into<String>) -> Self {
        self.toolchain = Some(text.into());
        self
    }

    /// Register an extra signing configuration.
    pub fn with_signing(mut self, config: SigningConfig) -> Self {
        self.extra_signing.push(config);
        self
    }

    /// Start from an empty registry instead of the Android debug default.
    pub fn without_debug_signing(mut self) -> Self {
        self.include_debug_signing = false;
        self
    }

    pub fn build(self) -> std::io::Result<ManifestHarness> {
        let temp_dir = tempfile::TempDir::new()?;

        let manifest_path = temp_dir.path().join("build.toml");
        std::fs::write(&manifest_path, &self.manifest)?;

        let toolchain_path = match &self.toolchain {
            Some(text) => {
                let path = temp_dir.path().join("buildwire-toolchain.toml");
                std::fs::write(&path, text)?;
                Some(path)
            }
            None => None,
        };

        let mut registry = if self.include_debug_signing {
            SigningRegistry::with_debug_default()
        } else {
            SigningRegistry::new()
        };
        for config in self.extra_signing {
            registry.insert(config);
        }

        Ok(ManifestHarness {
            manifest_path,
            toolchain_path,
            registry,
            _temp_dir: temp_dir,
        })
    }
}

/// A temp directory with a manifest ready to load.
pub struct ManifestHarness {
    /// Path of the written manifest.
    pub manifest_path: PathBuf,
    /// Path of the written toolchain file, if one was requested.
    pub toolchain_path: Option<PathBuf>,
    /// Signing registry for the load.
    pub registry: SigningRegistry,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl ManifestHarness {
    /// Create a new builder for configuring the harness.
    pub fn builder() -> ManifestHarnessBuilder {
        ManifestHarnessBuilder::new()
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn toolchain_path(&self) -> Option<&Path> {
        self.toolchain_path.as_deref()
    }
}
