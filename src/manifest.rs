// src/manifest.rs

//! The manifest of record for published packages and applications
//!
//! `manifest.yaml` tracks every known package version and application build.
//! Updates arrive as a JSON batch; the whole batch is validated and applied
//! to a working copy, and the file is rewritten only when the document
//! actually changed. Key order is preserved across a load/save round-trip.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// File name of the manifest inside a binaries repository checkout
pub const MANIFEST_FILE_NAME: &str = "manifest.yaml";

/// One published build of a package version
///
/// Field order here is the field order written to YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub checksum_sha256: String,
    pub build_date: String,
    pub build: String,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub distribution: Vec<String>,
}

/// One application entry; replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub build_date: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub packages: IndexMap<String, serde_yaml::Value>,
}

/// The whole manifest document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// package id -> package version -> release
    #[serde(default)]
    pub packages: IndexMap<String, IndexMap<String, PackageRelease>>,
    /// application id -> entry
    #[serde(default)]
    pub applications: IndexMap<String, ApplicationEntry>,
}

impl Manifest {
    /// Load the manifest from disk
    ///
    /// A missing file or an empty document is fatal; the updater never
    /// conjures a manifest out of thin air.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestMissing(path.to_path_buf()));
        }
        debug!("Loading manifest from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&raw)?;
        if value.is_null() {
            return Err(Error::ManifestEmpty(path.to_path_buf()));
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Write the manifest back, keeping key insertion order
    pub fn save(&self, path: &Path) -> Result<()> {
        let body = serde_yaml::to_string(self)?;
        fs::write(path, body)?;
        Ok(())
    }
}

/// A single package update record from the input batch
///
/// Everything is optional at parse time; [`apply_updates`] enforces the
/// required fields and fails the whole batch on the first violation.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageUpdate {
    pub package_id: Option<String>,
    pub checksum_sha256: Option<String>,
    pub build_date: Option<String>,
    pub build: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

/// A single application update record; missing fields reset to empty
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationUpdate {
    pub build_date: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub packages: IndexMap<String, serde_yaml::Value>,
}

/// The update batch as passed on the command line
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestUpdates {
    /// grouping key -> package version -> update record
    #[serde(default)]
    pub package_updates: IndexMap<String, IndexMap<String, PackageUpdate>>,
    /// application id -> update record
    #[serde(default)]
    pub application_updates: IndexMap<String, ApplicationUpdate>,
}

impl ManifestUpdates {
    /// Parse the JSON batch given as a CLI argument
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Collapse legacy libtorrent ABI variants onto the logical package key
///
/// Builds were historically published as libtorrent21/22/24 depending on the
/// bundled ABI; the manifest tracks them all as one `libtorrent` package.
pub fn canonical_package_id(package_id: &str) -> &str {
    match package_id {
        "libtorrent21" | "libtorrent22" | "libtorrent24" => "libtorrent",
        other => other,
    }
}

/// Required-field check; an absent or empty value fails the batch
fn require<'a>(
    value: &'a Option<String>,
    field: &'static str,
    package: &str,
) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingField {
            field,
            package: package.to_string(),
        }),
    }
}

/// Apply an update batch to the manifest in memory
///
/// Package entries are written under `packages[package_id][version]`, last
/// write wins. Application entries are replaced wholesale. Any missing
/// required field aborts before the caller gets a chance to save, so a bad
/// batch never half-applies to disk.
pub fn apply_updates(
    manifest: &mut Manifest,
    updates: &ManifestUpdates,
    distribution: &str,
) -> Result<()> {
    for (group, versions) in &updates.package_updates {
        debug!("Processing package updates for group '{}'", group);
        for (package_version, update) in versions {
            let raw_id = require(&update.package_id, "package_id", group)?;
            let package_id = canonical_package_id(raw_id);

            let checksum = require(&update.checksum_sha256, "checksum", package_id)?;
            if package_version.is_empty() {
                return Err(Error::MissingField {
                    field: "version",
                    package: package_id.to_string(),
                });
            }
            let build_date = require(&update.build_date, "build date", package_id)?;
            let build = require(&update.build, "build", package_id)?;

            info!(
                "Updating package '{}', version '{}', build '{}'",
                package_id, package_version, build
            );
            manifest
                .packages
                .entry(package_id.to_string())
                .or_default()
                .insert(
                    package_version.clone(),
                    PackageRelease {
                        checksum_sha256: checksum.to_string(),
                        build_date: build_date.to_string(),
                        build: build.to_string(),
                        category: update.category.clone(),
                        tag: update.tag.clone(),
                        distribution: vec![distribution.to_string()],
                    },
                );
        }
    }

    for (application_id, update) in &updates.application_updates {
        info!("Updating application '{}'", application_id);
        manifest.applications.insert(
            application_id.clone(),
            ApplicationEntry {
                build_date: update.build_date.clone(),
                dependencies: update.dependencies.clone(),
                packages: update.packages.clone(),
            },
        );
    }

    Ok(())
}

/// Load `<repo_path>/manifest.yaml`, apply the batch and save on change
///
/// The original document is snapshotted before any mutation and the file is
/// rewritten only when the updated document structurally differs from it.
/// Returns `true` when the file was rewritten.
pub fn update_manifest_file(
    repo_path: &Path,
    updates: &ManifestUpdates,
    distribution: &str,
) -> Result<bool> {
    let manifest_path = repo_path.join(MANIFEST_FILE_NAME);
    info!("Updating manifest at {}", manifest_path.display());

    let original = Manifest::load(&manifest_path)?;
    let mut updated = original.clone();
    apply_updates(&mut updated, updates, distribution)?;

    if updated == original {
        info!("No changes detected, skipping save");
        return Ok(false);
    }
    updated.save(&manifest_path)?;
    Ok(true)
}
