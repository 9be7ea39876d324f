// src/metadata.rs

//! Package metadata sidecar files
//!
//! Every published `.deb` asset is accompanied by a same-named `.json` file
//! describing the build. This module holds that record plus the base-name
//! extraction used to group packages across versions.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Metadata record published next to each package file
///
/// `os` stays optional: a record without a distribution is reported and
/// skipped rather than treated as a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMetadata {
    pub os: Option<String>,
    pub package_id: String,
    pub version: String,
    pub tag: String,
    pub checksum_sha256: String,
}

static VERSION_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d.*").unwrap());

/// Strip the version/build suffix from a package identifier
///
/// The suffix starts at the first underscore followed by a digit, so
/// `libtorrent-rasterbar_2.0.9-1build1` becomes `libtorrent-rasterbar` while
/// an id without such a suffix is returned unchanged.
pub fn base_package_name(package_id: &str) -> &str {
    match VERSION_SUFFIX_RE.find(package_id) {
        Some(m) => &package_id[..m.start()],
        None => package_id,
    }
}
