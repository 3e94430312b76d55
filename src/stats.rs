//! Descriptive statistics over cleaned metric series.

/// Linear-interpolation quantile over `samples`, using the `(n - 1) * q`
/// index rule. An empty series yields 0.0 so that downstream rendering
/// stays well-defined when a column is absent or entirely unparseable.
pub fn quantile(samples: &[f64], q: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_owned();
    sorted.sort_unstable_by(f64::total_cmp);

    let rank = (sorted.len() - 1) as f64 * q;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }

    let weight = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * weight
}

pub fn median(samples: &[f64]) -> f64 {
    quantile(samples, 0.5)
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    samples.iter().sum::<f64>() / samples.len() as f64
}
