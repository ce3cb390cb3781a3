// SPDX-FileCopyrightText: 2026 Buildwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Buildwire - a declarative Android build manifest loader.
//!
//! This is the binary entry point for the `buildwire` CLI.

mod check;
mod deps;
mod load;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Buildwire - load and check declarative Android build manifests.
#[derive(Parser, Debug)]
#[command(name = "buildwire", version, about, long_about = None)]
struct Cli {
    /// Toolchain file to use instead of ./buildwire-toolchain.toml.
    #[arg(long, global = true)]
    toolchain: Option<PathBuf>,

    /// Log level for buildwire crates (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a manifest and print the resolved build configuration.
    Load {
        /// Path to the manifest.
        manifest: PathBuf,
        /// Print the configuration as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate a manifest and report problems.
    Check {
        /// Path to the manifest.
        manifest: PathBuf,
    },
    /// List the manifest's dependencies in declaration order.
    Deps {
        /// Path to the manifest.
        manifest: PathBuf,
    },
}

/// Initialize the tracing subscriber, writing to stderr.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buildwire={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    tracing::debug!(command = ?cli.command, toolchain = ?cli.toolchain, "running command");

    let toolchain = cli.toolchain.as_deref();
    let result = match &cli.command {
        Commands::Load { manifest, json } => load::run_load(manifest, toolchain, *json, cli.plain),
        Commands::Check { manifest } => check::run_check(manifest, toolchain, cli.plain),
        Commands::Deps { manifest } => deps::run_deps(manifest, toolchain),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "buildwire",
            "load",
            "build.toml",
            "--json",
            "--toolchain",
            "ci-toolchain.toml",
            "--plain",
        ])
        .unwrap();
        assert_eq!(cli.toolchain, Some(PathBuf::from("ci-toolchain.toml")));
        assert!(cli.plain);
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Load { manifest, json } => {
                assert_eq!(manifest, PathBuf::from("build.toml"));
                assert!(json);
            }
            other => panic!("expected load, got {other:?}"),
        }
    }

    #[test]
    fn manifest_argument_is_required() {
        assert!(Cli::try_parse_from(["buildwire", "check"]).is_err());
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
