// src/config.rs

//! Pipeline configuration
//!
//! Defaults for the organization, the set of package-build repositories and
//! the output locations. Everything here can be overridden from the CLI so
//! tests and forks never have to patch source.

use std::path::PathBuf;

/// Organization hosting the package-build repositories
pub const DEFAULT_ORG: &str = "MediaEase-binaries";

/// Repositories scanned by the asset aggregator
pub const DEFAULT_REPOS: &[&str] = &[
    "deluge-builds",
    "qbittorrent-builds",
    "transmission-builds",
    "rtorrent-builds",
    "qBittorrent-builds",
];

/// Directory the per-distribution summary files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "packages";

/// Distribution codename pinned into every package manifest entry
pub const DEFAULT_DISTRIBUTION: &str = "bookworm";

/// Configuration for the asset aggregator
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// GitHub organization the repositories live under
    pub org: String,
    /// Repositories whose releases are scanned
    pub repos: Vec<String>,
    /// Directory to write `packages_<distro>.json` files into
    pub output_dir: PathBuf,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            repos: DEFAULT_REPOS.iter().map(|r| r.to_string()).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
