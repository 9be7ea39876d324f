// src/aggregate.rs

//! Per-distribution package summaries
//!
//! Walks the releases of every configured build repository, pairs each `.deb`
//! asset with its sibling `.json` metadata file and groups the results by
//! distribution codename and base package name. One summary file is written
//! per distribution.
//!
//! Per-asset problems (missing sibling, unparsable metadata, metadata with no
//! distribution) are logged and skipped; a failure to list a repository's
//! releases aborts the whole run.

use crate::config::AggregateConfig;
use crate::error::Result;
use crate::metadata::{base_package_name, PackageMetadata};
use crate::releases::{Release, ReleaseSource};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// One line of a distribution summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryEntry {
    pub name: String,
    pub version: String,
    pub stability: String,
    pub checksum_sha256: String,
    pub url: String,
}

/// distribution codename -> base package name -> entries, in processing order
pub type DistributionSummaries = IndexMap<String, IndexMap<String, Vec<SummaryEntry>>>;

/// Package file suffix the aggregator cares about
const PACKAGE_SUFFIX: &str = ".deb";

/// Suffix of the sidecar metadata asset
const METADATA_SUFFIX: &str = ".json";

/// Collect summary entries for every configured repository
///
/// Entries keep their processing order and repeated assets across releases
/// are all kept; downstream consumers rely on seeing every published build.
pub fn collect_summaries(
    source: &dyn ReleaseSource,
    config: &AggregateConfig,
) -> Result<DistributionSummaries> {
    let mut summaries = DistributionSummaries::new();

    for repo in &config.repos {
        info!("Processing repo: {}", repo);
        let releases = source.list_releases(&config.org, repo)?;
        info!("Found {} releases in {}", releases.len(), repo);

        for release in &releases {
            info!(
                "Processing release {} ({} assets)",
                release.display_name(),
                release.assets.len()
            );
            for asset in &release.assets {
                if !asset.name.ends_with(PACKAGE_SUFFIX) {
                    continue;
                }
                let Some(metadata) = fetch_sibling_metadata(source, release, &asset.name) else {
                    continue;
                };
                let Some(distro) = metadata.os.as_deref() else {
                    warn!("Missing 'os' in metadata for {}, skipping", asset.name);
                    continue;
                };

                let package_name = base_package_name(&metadata.package_id);
                let entry = SummaryEntry {
                    name: asset.name.clone(),
                    version: metadata.version.clone(),
                    stability: metadata.tag.clone(),
                    checksum_sha256: metadata.checksum_sha256.clone(),
                    url: asset.browser_download_url.clone(),
                };

                summaries
                    .entry(distro.to_string())
                    .or_default()
                    .entry(package_name.to_string())
                    .or_default()
                    .push(entry);
                info!("Added {} -> {}/{}", asset.name, distro, package_name);
            }
        }
    }

    Ok(summaries)
}

/// Find and parse the `.json` sidecar for a `.deb` asset within one release
///
/// Returns `None` (after logging) when the sidecar is absent, cannot be
/// downloaded or does not parse.
fn fetch_sibling_metadata(
    source: &dyn ReleaseSource,
    release: &Release,
    deb_name: &str,
) -> Option<PackageMetadata> {
    let json_name = deb_name.replace(PACKAGE_SUFFIX, METADATA_SUFFIX);
    let Some(sidecar) = release.assets.iter().find(|a| a.name == json_name) else {
        warn!("No JSON file found for {}", deb_name);
        return None;
    };

    let body = match source.fetch_asset(&sidecar.browser_download_url) {
        Ok(body) => body,
        Err(e) => {
            warn!("Error fetching {}: {}", sidecar.browser_download_url, e);
            return None;
        }
    };

    match serde_json::from_str(&body) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!("Error decoding JSON from {}: {}", sidecar.browser_download_url, e);
            None
        }
    }
}

/// Write one pretty-printed summary file per distribution
///
/// Returns the paths written, in distribution order.
pub fn write_summaries(
    summaries: &DistributionSummaries,
    output_dir: &std::path::Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(summaries.len());
    for (distro, packages) in summaries {
        let path = output_dir.join(format!("packages_{distro}.json"));
        let body = serde_json::to_string_pretty(packages)?;
        fs::write(&path, body)?;
        info!("Saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::releases::ReleaseAsset;
    use std::collections::HashMap;

    /// In-memory release source with a fixed release set per repository
    struct FixedSource {
        releases: HashMap<String, Vec<Release>>,
        assets: HashMap<String, String>,
    }

    impl FixedSource {
        fn new() -> Self {
            Self {
                releases: HashMap::new(),
                assets: HashMap::new(),
            }
        }

        fn add_release(&mut self, repo: &str, name: &str, assets: Vec<ReleaseAsset>) {
            self.releases.entry(repo.to_string()).or_default().push(Release {
                name: Some(name.to_string()),
                assets,
            });
        }

        fn add_asset_body(&mut self, url: &str, body: &str) {
            self.assets.insert(url.to_string(), body.to_string());
        }
    }

    impl ReleaseSource for FixedSource {
        fn list_releases(&self, _org: &str, repo: &str) -> Result<Vec<Release>> {
            match self.releases.get(repo) {
                Some(releases) => Ok(releases.clone()),
                None => Err(Error::ReleaseListing {
                    repo: repo.to_string(),
                    reason: "unknown repository".to_string(),
                }),
            }
        }

        fn fetch_asset(&self, url: &str) -> Result<String> {
            match self.assets.get(url) {
                Some(body) => Ok(body.clone()),
                None => Err(Error::AssetDownload {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            browser_download_url: format!("https://example.invalid/{name}"),
        }
    }

    fn metadata_body(os: &str, package_id: &str, version: &str) -> String {
        format!(
            r#"{{"os": "{os}", "package_id": "{package_id}", "version": "{version}",
                "tag": "stable", "checksum_sha256": "deadbeef"}}"#
        )
    }

    fn config(repos: &[&str]) -> AggregateConfig {
        AggregateConfig {
            org: "MediaEase-binaries".to_string(),
            repos: repos.iter().map(|r| r.to_string()).collect(),
            output_dir: PathBuf::from("packages"),
        }
    }

    fn single_repo_source() -> FixedSource {
        let mut source = FixedSource::new();
        source.add_release(
            "qbittorrent-builds",
            "v4.6.0",
            vec![
                asset("qbittorrent_4.6.0-1.deb"),
                asset("qbittorrent_4.6.0-1.json"),
                asset("qbittorrent_4.6.0-1.changelog"),
            ],
        );
        source.add_asset_body(
            "https://example.invalid/qbittorrent_4.6.0-1.json",
            &metadata_body("bookworm", "qbittorrent_4.6.0-1", "4.6.0"),
        );
        source
    }

    #[test]
    fn test_groups_by_distribution_and_base_name() {
        let source = single_repo_source();
        let summaries =
            collect_summaries(&source, &config(&["qbittorrent-builds"])).unwrap();

        assert_eq!(summaries.len(), 1);
        let packages = &summaries["bookworm"];
        let entries = &packages["qbittorrent"];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "qbittorrent_4.6.0-1.deb");
        assert_eq!(entries[0].version, "4.6.0");
        assert_eq!(entries[0].stability, "stable");
        assert_eq!(
            entries[0].url,
            "https://example.invalid/qbittorrent_4.6.0-1.deb"
        );
    }

    #[test]
    fn test_asset_without_sidecar_is_skipped() {
        let mut source = FixedSource::new();
        source.add_release(
            "rtorrent-builds",
            "v0.9.8",
            vec![asset("rtorrent_0.9.8-1.deb")],
        );

        let summaries = collect_summaries(&source, &config(&["rtorrent-builds"])).unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_unparsable_metadata_is_skipped() {
        let mut source = FixedSource::new();
        source.add_release(
            "rtorrent-builds",
            "v0.9.8",
            vec![asset("rtorrent_0.9.8-1.deb"), asset("rtorrent_0.9.8-1.json")],
        );
        source.add_asset_body("https://example.invalid/rtorrent_0.9.8-1.json", "not json");

        let summaries = collect_summaries(&source, &config(&["rtorrent-builds"])).unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_metadata_without_os_is_skipped() {
        let mut source = FixedSource::new();
        source.add_release(
            "deluge-builds",
            "v2.1.1",
            vec![asset("deluge_2.1.1-1.deb"), asset("deluge_2.1.1-1.json")],
        );
        source.add_asset_body(
            "https://example.invalid/deluge_2.1.1-1.json",
            r#"{"package_id": "deluge_2.1.1-1", "version": "2.1.1",
                "tag": "stable", "checksum_sha256": "deadbeef"}"#,
        );

        let summaries = collect_summaries(&source, &config(&["deluge-builds"])).unwrap();
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_listing_failure_is_fatal() {
        let source = FixedSource::new();
        let result = collect_summaries(&source, &config(&["missing-builds"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_assets_across_releases_are_kept() {
        let mut source = single_repo_source();
        // A rerun of the same build published under a second release
        source.add_release(
            "qbittorrent-builds",
            "v4.6.0-rerun",
            vec![
                asset("qbittorrent_4.6.0-1.deb"),
                asset("qbittorrent_4.6.0-1.json"),
            ],
        );

        let summaries =
            collect_summaries(&source, &config(&["qbittorrent-builds"])).unwrap();
        assert_eq!(summaries["bookworm"]["qbittorrent"].len(), 2);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let source = single_repo_source();
        let cfg = config(&["qbittorrent-builds"]);

        let dir = tempfile::tempdir().unwrap();
        let first_dir = dir.path().join("first");
        let second_dir = dir.path().join("second");

        let first = collect_summaries(&source, &cfg).unwrap();
        write_summaries(&first, &first_dir).unwrap();
        let second = collect_summaries(&source, &cfg).unwrap();
        write_summaries(&second, &second_dir).unwrap();

        let a = fs::read(first_dir.join("packages_bookworm.json")).unwrap();
        let b = fs::read(second_dir.join("packages_bookworm.json")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_file_is_two_space_indented() {
        let source = single_repo_source();
        let summaries =
            collect_summaries(&source, &config(&["qbittorrent-builds"])).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = write_summaries(&summaries, dir.path()).unwrap();
        assert_eq!(written.len(), 1);

        let body = fs::read_to_string(&written[0]).unwrap();
        assert!(body.starts_with("{\n  \"qbittorrent\""));
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            parsed["qbittorrent"][0]["checksum_sha256"],
            serde_json::json!("deadbeef")
        );
    }
}
