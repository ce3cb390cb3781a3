// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Buildwire.
//!
//! Holds the resolved configuration types produced by the manifest loader,
//! the signing-config registry variants resolve against, the toolchain
//! descriptor, and the workspace error type.

pub mod dependency;
pub mod error;
pub mod signing;
pub mod toolchain;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use dependency::{DependencyConfiguration, DependencyCoordinate, DependencyVersion};
pub use error::BuildwireError;
pub use signing::{DEBUG_SIGNING_CONFIG, SigningConfig, SigningRegistry};
pub use toolchain::ToolchainDescriptor;
pub use types::{
    BuildConfiguration, BuildVariant, CompileOptions, DEFAULT_VERSION_CODE,
    DEFAULT_VERSION_NAME, JavaVersion, SdkBinding,
};
