//! Render a multi-panel PNG report from a CSV of serverless invocation
//! metrics (init, execution and billed durations, plus max memory used).

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

pub mod chart;
pub mod color;
pub mod metrics;
pub mod stats;
pub mod summary;

/// Full reporting pipeline: load the CSV, summarize it, and render the
/// chart next to the invocation. Returns the path of the written image.
pub fn generate_report(csv_path: &Path) -> Result<PathBuf> {
    let records = metrics::load_records(csv_path)?;
    info!(
        "loaded {} data points from {}",
        records.len(),
        csv_path.display()
    );

    let summary = summary::summarize(&records);
    let title = chart::pretty_title(csv_path);
    let plot_path = chart::output_path(csv_path);
    chart::render(&summary, &title, &plot_path)?;

    info!("plot saved as: {}", plot_path.display());

    Ok(plot_path)
}
