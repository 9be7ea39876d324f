// src/error.rs

//! Error types for the binaries pipeline tools

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while aggregating assets or updating the manifest
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialize error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse or serialize error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP download error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `gh` CLI invocation failed
    #[error("Failed to list releases for '{repo}': {reason}")]
    ReleaseListing { repo: String, reason: String },

    /// Asset download returned a non-success status
    #[error("Download of '{url}' failed with status {status}")]
    AssetDownload { url: String, status: u16 },

    /// Manifest file not found at the expected path
    #[error("Manifest file '{0}' does not exist")]
    ManifestMissing(PathBuf),

    /// Manifest file parsed to an empty document
    #[error("Manifest file '{0}' is empty")]
    ManifestEmpty(PathBuf),

    /// A package update record is missing a required field
    #[error("No {field} provided for package '{package}'")]
    MissingField { field: &'static str, package: String },
}

pub type Result<T> = std::result::Result<T, Error>;
