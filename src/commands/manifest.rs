// src/commands/manifest.rs
//! Manifest update command

use anyhow::Result;
use binaries_tools::manifest::{update_manifest_file, ManifestUpdates};
use std::path::Path;

/// Apply a JSON update batch to `<repo_path>/manifest.yaml`
pub fn cmd_update_manifest(repo_path: &Path, updates_json: &str, distribution: &str) -> Result<()> {
    let updates = ManifestUpdates::parse(updates_json)?;
    let saved = update_manifest_file(repo_path, &updates, distribution)?;
    if saved {
        println!("Changes detected. Manifest saved.");
    } else {
        println!("No changes detected. Save operation skipped.");
    }
    Ok(())
}
