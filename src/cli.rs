// src/cli.rs
//! CLI definitions for the binaries pipeline tools
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use binaries_tools::config::{DEFAULT_DISTRIBUTION, DEFAULT_ORG, DEFAULT_OUTPUT_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "binaries-tools")]
#[command(author = "MediaEase Project")]
#[command(version)]
#[command(about = "Automation tools for the binaries publishing pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate release assets into per-distribution JSON summaries
    Aggregate {
        /// GitHub organization hosting the build repositories
        #[arg(long, default_value = DEFAULT_ORG)]
        org: String,

        /// Build repository to scan (repeatable; defaults to the pipeline set)
        #[arg(long = "repo")]
        repos: Vec<String>,

        /// Directory to write the summary files into
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },

    /// Apply a JSON update batch to manifest.yaml
    UpdateManifest {
        /// Path to the binaries repository checkout containing manifest.yaml
        repo_path: PathBuf,

        /// JSON string with package and application updates
        updates: String,

        /// Distribution codename pinned into package entries
        #[arg(long, default_value = DEFAULT_DISTRIBUTION)]
        distribution: String,
    },
}
