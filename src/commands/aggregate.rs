// src/commands/aggregate.rs
//! Asset aggregation command

use anyhow::Result;
use binaries_tools::aggregate::{collect_summaries, write_summaries};
use binaries_tools::config::AggregateConfig;
use binaries_tools::releases::GhReleaseSource;
use tracing::info;

/// Generate per-distribution package summaries from the build repositories
pub fn cmd_aggregate(config: &AggregateConfig) -> Result<()> {
    info!(
        "Generating package summaries for {} repositories under {}",
        config.repos.len(),
        config.org
    );
    println!("Generating package summaries from selected repos...");

    let source = GhReleaseSource::new()?;
    let summaries = collect_summaries(&source, config)?;

    if summaries.is_empty() {
        // Zero entries is a soft "nothing to do", not a failure
        println!("No data generated.");
        return Ok(());
    }

    let written = write_summaries(&summaries, &config.output_dir)?;
    for path in &written {
        println!("Saved {}", path.display());
    }
    println!("Done.");
    Ok(())
}
