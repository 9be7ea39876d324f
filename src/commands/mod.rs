// src/commands/mod.rs
//! Command handlers for the binaries-tools CLI

mod aggregate;
mod manifest;

pub use aggregate::cmd_aggregate;
pub use manifest::cmd_update_manifest;
