// src/lib.rs

//! Binaries pipeline tools
//!
//! Two small utilities behind one CLI:
//!
//! - the asset aggregator walks the releases of the package-build
//!   repositories, pairs each `.deb` asset with its `.json` metadata sidecar
//!   and writes one summary file per distribution codename;
//! - the manifest updater applies a JSON batch of package and application
//!   version updates to `manifest.yaml`, rewriting the file only when the
//!   document actually changed.

pub mod aggregate;
pub mod config;
mod error;
pub mod manifest;
pub mod metadata;
pub mod releases;

pub use error::{Error, Result};
