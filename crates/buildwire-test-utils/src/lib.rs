// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Buildwire integration tests.
//!
//! # Components
//!
//! - [`ManifestHarness`] - temp directory with a manifest, optional toolchain
//!   file, and a signing registry
//! - [`ManifestBuilder`] - compose manifest TOML from parts
//! - [`INVENTAPP_MANIFEST`] - a complete Flutter + Firebase app manifest

pub mod fixtures;
pub mod harness;

pub use fixtures::{INVENTAPP_MANIFEST, ManifestBuilder, upload_signing_config};
pub use harness::{ManifestHarness, ManifestHarnessBuilder};
