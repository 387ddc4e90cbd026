//! Population row-count extrapolation for sampled reads.

use crate::config::SamplingConfig;
use crate::model::RowEstimate;

/// Bytes and records consumed at one sampling position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSample {
    /// Bytes between the seek offset and the end of the last record read.
    pub bytes: u64,
    /// Leading partial-line bytes discarded before the first record; part of `bytes`.
    pub fragment: u64,
    /// Records parsed at this position.
    pub records: usize,
}

/// Point estimate: `file_size / (bytes_consumed / sample_size)`.
///
/// Integer arithmetic throughout; assumes rows are of uniform size. Falls back to
/// `collected` when the average record size rounds to zero.
#[must_use]
pub fn estimate_row_count(
    file_size: u64,
    bytes_consumed: u64,
    config: &SamplingConfig,
    collected: u64,
) -> u64 {
    let sample_size = config.sample_size.max(1) as u64;
    let avg_bytes_per_record = bytes_consumed / sample_size;
    if avg_bytes_per_record == 0 {
        return collected;
    }
    file_size / avg_bytes_per_record
}

/// Two-sided normal quantile for the supported confidence levels.
///
/// Levels between table entries round down to the nearest entry.
#[must_use]
pub fn z_score(confidence: f64) -> f64 {
    match confidence {
        x if x >= 0.999 => 3.291,
        x if x >= 0.99 => 2.576,
        x if x >= 0.98 => 2.326,
        x if x >= 0.95 => 1.960,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.0,
    }
}

/// Builds the point estimate plus a confidence interval from per-position
/// bytes-per-record observations.
///
/// Densities use record bytes only (`bytes - fragment`). Positions that yielded no
/// record carry no density information and are ignored. With fewer than two
/// observations the interval collapses to the point estimate, and it is always
/// widened to contain the point estimate.
#[must_use]
pub fn row_estimate(
    file_size: u64,
    positions: &[PositionSample],
    config: &SamplingConfig,
    collected: u64,
) -> RowEstimate {
    let bytes_consumed: u64 = positions.iter().map(|p| p.bytes).sum();
    let point = estimate_row_count(file_size, bytes_consumed, config, collected);

    let densities: Vec<f64> = positions
        .iter()
        .filter(|p| p.records > 0)
        .map(|p| p.bytes.saturating_sub(p.fragment) as f64 / p.records as f64)
        .collect();

    let collapsed = RowEstimate {
        point,
        lower: point,
        upper: point,
        confidence: config.confidence,
    };
    if densities.len() < 2 {
        return collapsed;
    }

    let k = densities.len() as f64;
    let mean = densities.iter().sum::<f64>() / k;
    let sample_variance = densities
        .iter()
        .map(|d| (d - mean) * (d - mean))
        .sum::<f64>()
        / (k - 1.0);
    let margin = z_score(config.confidence) * (sample_variance / k).sqrt();

    if mean <= 0.0 {
        return collapsed;
    }

    let size = file_size as f64;
    let lower = (size / (mean + margin)).floor() as u64;
    let upper = if mean - margin > 0.0 {
        ((size / (mean - margin)).ceil() as u64).min(file_size)
    } else {
        file_size
    };

    RowEstimate {
        point,
        lower: lower.min(point),
        upper: upper.max(point),
        confidence: config.confidence,
    }
}
