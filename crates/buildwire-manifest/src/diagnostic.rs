// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Every manifest failure is a [`ManifestError`]. Each variant belongs to one
//! of two [`ErrorKind`]s: a structural problem with the document
//! (`MalformedManifest`) or a variant naming a signing configuration the
//! registry does not hold (`UnresolvedSigningConfig`).

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use strum::Display;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The two ways a manifest load can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    MalformedManifest,
    UnresolvedSigningConfig,
}

/// A manifest error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    /// An unknown key was found in the manifest.
    #[error("unknown manifest key `{key}`")]
    #[diagnostic(
        code(buildwire::manifest::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value has the wrong type or is out of range for its type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(buildwire::manifest::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A string value is not one of the accepted names.
    #[error("unknown value `{value}` for key `{key}`")]
    #[diagnostic(
        code(buildwire::manifest::unknown_value),
        help("{}", format_unknown_value_help(suggestion.as_deref(), valid_values))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
        #[label("not an accepted value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(buildwire::manifest::missing_key),
        help("add `{key} = <value>` to the manifest")
    )]
    MissingKey { key: String },

    /// A value parsed but breaks a semantic rule.
    #[error("validation error: {message}")]
    #[diagnostic(code(buildwire::manifest::validation))]
    Validation { message: String },

    /// The manifest or toolchain file could not be read.
    #[error("cannot read {}", .path.display())]
    #[diagnostic(code(buildwire::manifest::unreadable))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A build variant names a signing configuration that is not registered.
    #[error("build type `{variant}` references unknown signing config `{reference}`")]
    #[diagnostic(
        code(buildwire::manifest::unresolved_signing_config),
        help("{}", format_unknown_key_help(suggestion.as_deref(), available))
    )]
    UnresolvedSigningConfig {
        variant: String,
        reference: String,
        suggestion: Option<String>,
        available: String,
        #[label("not in the signing registry")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Catch-all for other manifest errors.
    #[error("manifest error: {0}")]
    #[diagnostic(code(buildwire::manifest::other))]
    Other(String),
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManifestError::UnresolvedSigningConfig { .. } => ErrorKind::UnresolvedSigningConfig,
            _ => ErrorKind::MalformedManifest,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ManifestError::Validation {
            message: message.into(),
        }
    }
}

fn format_unknown_value_help(suggestion: Option<&str>, valid_values: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Accepted values: {valid_values}"),
        None => format!("accepted values: {valid_values}"),
    }
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// The text a diagnostic points into: a display name and its content.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> SourceText<'a> {
    pub fn new(name: &'a str, content: &'a str) -> Self {
        Self { name, content }
    }

    pub(crate) fn named(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.content.to_string())
    }
}

/// Convert a `figment::Error` into a list of `ManifestError` diagnostics.
///
/// Figment may carry several errors; each becomes its own diagnostic.
pub fn figment_to_manifest_errors(
    err: figment::Error,
    source: SourceText<'_>,
) -> Vec<ManifestError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let path: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
        let manifest_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = locate(source, parent_path(&path, field), field);

                ManifestError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => {
                let mut key = parent_path(&path, field).to_vec();
                key.push(field.to_string());
                ManifestError::MissingKey {
                    key: key.join("."),
                }
            }
            Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
                let field = path.last().cloned().unwrap_or_default();
                let (span, src) = locate(source, parent_path(&path, &field), &field);
                ManifestError::InvalidType {
                    key: path.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            Kind::UnknownVariant(found, expected) => {
                let valid: Vec<&str> = expected.to_vec();
                let field = path.last().cloned().unwrap_or_default();
                let (span, src) = locate(source, parent_path(&path, &field), &field);
                ManifestError::UnknownValue {
                    key: path.join("."),
                    value: found.clone(),
                    suggestion: suggest_key(found, &valid),
                    valid_values: valid.join(", "),
                    span,
                    src,
                }
            }
            _ => ManifestError::Other(format!("{error}")),
        };

        errors.push(manifest_error);
    }

    errors
}

/// Figment error paths end with the offending key; strip it to get the table.
fn parent_path<'p>(path: &'p [String], field: &str) -> &'p [String] {
    match path.split_last() {
        Some((last, parents)) if last == field => parents,
        _ => path,
    }
}

/// Span of `field` under the table named by `path`, if it can be found.
pub(crate) fn locate(
    source: SourceText<'_>,
    path: &[String],
    field: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    match find_key_offset(source.content, path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(source.named()),
        ),
        None => (None, None),
    }
}

/// Find the byte offset of a key in TOML content, relative to a table path.
///
/// Numeric path segments are array indices: `["android", "build_types", "1"]`
/// looks under the second `[[android.build_types]]` header. The search stops
/// at the next table header. Top-level keys are searched from the start of
/// the document up to the first header.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let table: Vec<&str> = path
        .iter()
        .map(String::as_str)
        .filter(|s| s.parse::<usize>().is_err())
        .collect();
    let index = path.iter().rev().find_map(|s| s.parse::<usize>().ok());

    let search_start = if table.is_empty() {
        0
    } else {
        let dotted = table.join(".");
        let array_header = format!("[[{dotted}]]");
        let header = format!("[{dotted}]");
        content
            .match_indices(&array_header)
            .nth(index.unwrap_or(0))
            .map(|(pos, _)| pos + array_header.len())
            .or_else(|| content.find(&header).map(|pos| pos + header.len()))?
    };

    let remaining = &content[search_start..];

    let mut byte_offset = 0;
    for (line_no, line) in remaining.split_inclusive('\n').enumerate() {
        let trimmed = line.trim_start();
        // The header line itself is line 0 when searching under a table.
        if trimmed.starts_with('[') && (line_no > 0 || table.is_empty()) {
            break;
        }
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            let field_start_in_line = line.len() - trimmed.len();
            return Some(search_start + byte_offset + field_start_in_line);
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ManifestError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ManifestError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
