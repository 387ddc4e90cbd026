//! Aggregate statistics over a numeric value collection.
//!
//! Variance is the population variance (divisor `n`). `NaN` and infinities are
//! not filtered: they propagate through sum, mean and variance following IEEE 754.

use std::collections::BTreeMap;

use crate::model::AggregateStats;

/// Percentile ranks computed for every numeric column.
pub const PERCENTILE_RANKS: [u32; 6] = [25, 50, 75, 90, 95, 99];

/// Computes count, sum, mean, median, variance, standard deviation and
/// percentiles. An empty input yields a zero-valued result with no percentiles.
///
/// The input slice is left untouched; percentiles are read from a sorted copy.
#[must_use]
pub fn calculate_aggregates(values: &[f64]) -> AggregateStats {
    if values.is_empty() {
        return AggregateStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = values.len();
    let n = count as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / n;

    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let percentiles: BTreeMap<u32, f64> = PERCENTILE_RANKS
        .iter()
        .map(|&rank| (rank, calculate_percentile(&sorted, f64::from(rank))))
        .collect();
    let median = percentiles[&50];

    AggregateStats {
        count: count as u64,
        sum,
        mean,
        median,
        std_dev,
        variance,
        percentiles,
    }
}

/// Linear-interpolation percentile over an ascending slice.
///
/// `rank` is clamped to `[0, 100]`; `index = rank / 100 * (n - 1)`. An integral
/// index returns that element, otherwise the two neighbours are blended by the
/// fractional part. Returns 0 for an empty slice.
#[must_use]
pub fn calculate_percentile(sorted: &[f64], rank: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = rank.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor();
    if index == lower {
        return sorted[lower as usize];
    }

    let upper = index.ceil() as usize;
    let weight = index - lower;
    sorted[lower as usize] * (1.0 - weight) + sorted[upper] * weight
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
