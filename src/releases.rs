// src/releases.rs

//! GitHub release listing and asset downloads
//!
//! Releases are listed through the `gh` CLI so its stored credential is used
//! for the API call; asset bodies are fetched over plain HTTPS with reqwest.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// Default timeout for asset downloads (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A single downloadable asset attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A release as returned by the GitHub releases API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Display name for progress output
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Source of releases and asset contents
///
/// The aggregator only talks to this trait, so tests can feed it a fixed
/// in-memory release set instead of the live API.
pub trait ReleaseSource {
    /// List all releases of `org/repo`
    fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>>;

    /// Download an asset body as text
    fn fetch_asset(&self, url: &str) -> Result<String>;
}

/// Release source backed by the `gh` CLI and a blocking HTTP client
pub struct GhReleaseSource {
    client: Client,
}

impl GhReleaseSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

impl ReleaseSource for GhReleaseSource {
    fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>> {
        let api_path = format!("/repos/{org}/{repo}/releases");
        debug!("Running gh api {}", api_path);

        // GITHUB_TOKEN is scrubbed so gh falls back to its own stored
        // credential instead of the ambient CI token.
        let output = Command::new("gh")
            .args(["api", &api_path])
            .env_remove("GITHUB_TOKEN")
            .output()
            .map_err(|e| Error::ReleaseListing {
                repo: repo.to_string(),
                reason: format!("failed to run gh: {e}. Is gh installed?"),
            })?;

        if !output.status.success() {
            return Err(Error::ReleaseListing {
                repo: repo.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let releases: Vec<Release> = serde_json::from_slice(&output.stdout)?;
        Ok(releases)
    }

    fn fetch_asset(&self, url: &str) -> Result<String> {
        debug!("Downloading asset from {}", url);
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(Error::AssetDownload {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text()?)
    }
}
