//! CSV loading for benchmark invocation samples.

use anyhow::Result;
use csv::ReaderBuilder;
use log::error;
use serde::Deserialize;
use std::path::Path;

/// One invocation sample, as written by the benchmark harness. Cells are
/// kept as raw strings so that each column can be coerced to numbers
/// independently: a bad cell drops out of its own series without taking the
/// rest of the row with it.
#[derive(Debug, Default, Deserialize)]
pub struct InvocationRecord {
    #[serde(default, rename = "InitDuration(ms)")]
    pub init_duration_ms: Option<String>,
    #[serde(default, rename = "Duration(ms)")]
    pub duration_ms: Option<String>,
    #[serde(default, rename = "BilledDuration(ms)")]
    pub billed_duration_ms: Option<String>,
    #[serde(default, rename = "MaxMemoryUsed(MB)")]
    pub max_memory_used_mb: Option<String>,
}

/// Read all rows from a headed CSV file. Columns other than the four known
/// ones are ignored; a missing column leaves its field unset on every row.
/// Structural failures (unreadable file, ragged rows) abort the whole load.
pub fn load_records(path: &Path) -> Result<Vec<InvocationRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            let reason = format!(
                "error opening csv file (path={}, error={e:?})",
                path.display()
            );
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: InvocationRecord = result.map_err(|e| {
            let reason = format!(
                "error parsing csv record (path={}, error={e:?})",
                path.display()
            );
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

        records.push(record);
    }

    Ok(records)
}

/// Extract one column as floats, dropping cells that fail coercion. Series
/// lengths may differ between columns after cleaning.
pub fn numeric_series<F>(records: &[InvocationRecord], column: F) -> Vec<f64>
where
    F: Fn(&InvocationRecord) -> Option<&String>,
{
    records
        .iter()
        .filter_map(|record| column(record))
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .collect()
}
