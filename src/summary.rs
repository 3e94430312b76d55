//! Per-run statistics derived from the loaded samples.

use crate::metrics::{numeric_series, InvocationRecord};
use crate::stats::{mean, median, quantile};

/// Memory provisioned for every benchmarked function, in MB. Billing cost
/// is derived from this constant, not from the measured memory column.
pub const ALLOCATED_MEMORY_MB: f64 = 128.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationSummary {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl DurationSummary {
    fn from_series(samples: &[f64]) -> Self {
        Self {
            p50: median(samples),
            p90: quantile(samples, 0.90),
            p99: quantile(samples, 0.99),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub init: DurationSummary,
    pub exec: DurationSummary,
    pub billed: DurationSummary,
    /// Mean of the max-memory-used column, in MB.
    pub mem_avg_mb: f64,
    /// Median billing cost in GB-seconds.
    pub cost_gbs: f64,
}

pub fn summarize(records: &[InvocationRecord]) -> RunSummary {
    let init = numeric_series(records, |r| r.init_duration_ms.as_ref());
    let exec = numeric_series(records, |r| r.duration_ms.as_ref());
    let billed = numeric_series(records, |r| r.billed_duration_ms.as_ref());
    let mem = numeric_series(records, |r| r.max_memory_used_mb.as_ref());

    // GB-seconds per sample: billed seconds times allocated GB.
    let cost: Vec<f64> = billed
        .iter()
        .map(|billed_ms| (billed_ms / 1000.0) * (ALLOCATED_MEMORY_MB / 1024.0))
        .collect();

    RunSummary {
        init: DurationSummary::from_series(&init),
        exec: DurationSummary::from_series(&exec),
        billed: DurationSummary::from_series(&billed),
        mem_avg_mb: mean(&mem),
        cost_gbs: median(&cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(init: &str, exec: &str, billed: &str, mem: &str) -> InvocationRecord {
        InvocationRecord {
            init_duration_ms: Some(init.to_string()),
            duration_ms: Some(exec.to_string()),
            billed_duration_ms: Some(billed.to_string()),
            max_memory_used_mb: Some(mem.to_string()),
        }
    }

    #[test]
    fn test_summarize_duration_percentiles() {
        let records: Vec<InvocationRecord> = ["10", "20", "30", "40", "50"]
            .iter()
            .map(|v| record(v, "5", "100", "21"))
            .collect();

        let summary = summarize(&records);
        assert!((summary.init.p50 - 30.0).abs() < 1e-9);
        assert!((summary.init.p90 - 46.0).abs() < 1e-9);
        assert!((summary.init.p99 - 49.6).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_cost_metric() {
        // 200ms billed at 128MB is 0.2s * 0.125GB = 0.025 GB-seconds.
        let records = vec![
            record("0", "0", "100", "21"),
            record("0", "0", "200", "21"),
            record("0", "0", "300", "21"),
        ];

        let summary = summarize(&records);
        assert!((summary.cost_gbs - 0.025).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_memory_mean() {
        let records = vec![
            record("0", "0", "0", "20"),
            record("0", "0", "0", "22"),
        ];

        let summary = summarize(&records);
        assert!((summary.mem_avg_mb - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_missing_memory_column() {
        let records = vec![InvocationRecord {
            init_duration_ms: Some("120.5".to_string()),
            duration_ms: Some("5.2".to_string()),
            billed_duration_ms: Some("126".to_string()),
            max_memory_used_mb: None,
        }];

        let summary = summarize(&records);
        assert_eq!(summary.mem_avg_mb, 0.0);
        assert!(summary.init.p50 > 0.0);
    }

    #[test]
    fn test_summarize_empty_input() {
        let summary = summarize(&[]);

        assert_eq!(summary.init, DurationSummary::default());
        assert_eq!(summary.billed, DurationSummary::default());
        assert_eq!(summary.mem_avg_mb, 0.0);
        assert_eq!(summary.cost_gbs, 0.0);
    }

    #[test]
    fn test_summarize_columns_cleaned_independently() {
        let records = vec![
            record("bad", "4.0", "100", "20"),
            record("100.0", "6.0", "bad", "22"),
        ];

        let summary = summarize(&records);
        // Init keeps its one good sample, exec keeps both.
        assert!((summary.init.p50 - 100.0).abs() < 1e-9);
        assert!((summary.exec.p50 - 5.0).abs() < 1e-9);
    }
}
