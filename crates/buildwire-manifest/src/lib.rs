// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Buildwire manifest loader.
//!
//! Reads a declarative Android build manifest (TOML) and produces a
//! [`BuildConfiguration`]: plugins, SDK binding, compile options, build
//! variants with resolved signing configs, and dependency coordinates in
//! declaration order. Loading is a pure transformation; nothing is compiled,
//! downloaded, or signed.
//!
//! # Usage
//!
//! ```no_run
//! use buildwire_core::{SigningRegistry, ToolchainDescriptor};
//! use buildwire_manifest::load_manifest_str;
//!
//! let text = std::fs::read_to_string("build.toml").unwrap();
//! let config = load_manifest_str(
//!     &text,
//!     &ToolchainDescriptor::default(),
//!     &SigningRegistry::with_debug_default(),
//! )
//! .expect("manifest errors");
//! println!("application id: {}", config.application_id);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod validation;

use std::path::Path;

use buildwire_core::{BuildConfiguration, SigningRegistry, ToolchainDescriptor};
use tracing::{debug, info};

pub use diagnostic::{ErrorKind, ManifestError, SourceText, render_errors};
pub use loader::{TOOLCHAIN_FILE, load_toolchain, load_toolchain_from_str, parse_manifest_str};
pub use model::ManifestDocument;

/// Display name used for diagnostics when the manifest has no file name.
const INLINE_SOURCE: &str = "<inline>";

/// Load a manifest from TOML text.
///
/// This is the high-level entry point that:
/// 1. Extracts the document via Figment
/// 2. Validates document-level rules
/// 3. Resolves toolchain values and signing references
/// 4. Validates the resolved SDK binding
///
/// Every error found is returned; the load never yields a partial result.
pub fn load_manifest_str(
    toml_content: &str,
    toolchain: &ToolchainDescriptor,
    registry: &SigningRegistry,
) -> Result<BuildConfiguration, Vec<ManifestError>> {
    load_source(SourceText::new(INLINE_SOURCE, toml_content), toolchain, registry)
}

/// Load a manifest file. Diagnostics point into the file by name.
pub fn load_manifest_from_path(
    path: &Path,
    toolchain: &ToolchainDescriptor,
    registry: &SigningRegistry,
) -> Result<BuildConfiguration, Vec<ManifestError>> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        vec![ManifestError::Unreadable {
            path: path.to_path_buf(),
            source,
        }]
    })?;
    let name = path.display().to_string();
    load_source(SourceText::new(&name, &content), toolchain, registry)
}

/// Load the toolchain descriptor, converting failures into diagnostics.
///
/// An explicit `path` must exist; the default `buildwire-toolchain.toml` is
/// optional.
pub fn load_toolchain_validated(
    path: Option<&Path>,
) -> Result<ToolchainDescriptor, Vec<ManifestError>> {
    let file = path.unwrap_or_else(|| Path::new(TOOLCHAIN_FILE));
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(source) if path.is_some() => {
            return Err(vec![ManifestError::Unreadable {
                path: file.to_path_buf(),
                source,
            }]);
        }
        Err(_) => String::new(),
    };

    loader::load_toolchain(path).map_err(|err| {
        let name = file.display().to_string();
        diagnostic::figment_to_manifest_errors(err, SourceText::new(&name, &content))
    })
}

fn load_source(
    source: SourceText<'_>,
    toolchain: &ToolchainDescriptor,
    registry: &SigningRegistry,
) -> Result<BuildConfiguration, Vec<ManifestError>> {
    debug!(source = source.name, "loading manifest");

    let doc = loader::parse_manifest_str(source.content)
        .map_err(|err| diagnostic::figment_to_manifest_errors(err, source))?;

    let mut errors = validation::validate_document(&doc).err().unwrap_or_default();

    match resolve::resolve(&doc, toolchain, registry, source) {
        Ok(config) => {
            if let Err(sdk_errors) = validation::validate_configuration(&config) {
                errors.extend(sdk_errors);
            }
            if errors.is_empty() {
                info!(
                    application_id = %config.application_id,
                    variants = config.variants.len(),
                    dependencies = config.dependencies.len(),
                    "manifest loaded"
                );
                Ok(config)
            } else {
                Err(errors)
            }
        }
        Err(resolve_errors) => {
            errors.extend(resolve_errors);
            Err(errors)
        }
    }
}
