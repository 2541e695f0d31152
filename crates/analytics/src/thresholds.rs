use crate::error::AnalyticsError;
use core_types::InstrumentStat;
use serde::{Deserialize, Serialize};

/// The four quantile cut points that define the tier intervals for the
/// current query. Recomputed per (time_range, return_period) query, never
/// cached across different bar universes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub p40_return: f64,
    pub p75_return: f64,
    pub p40_std: f64,
    pub p75_std: f64,
}

/// Cross-sectional summary of the instrument stats backing a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean_return: f64,
    pub p40_return: f64,
    pub p75_return: f64,
    pub mean_std: f64,
    pub p40_std: f64,
    pub p75_std: f64,
}

/// Derives the p40/p75 cut points over the classifiable stats (those with a
/// defined deviation).
pub fn compute_thresholds(stats: &[InstrumentStat]) -> Result<Thresholds, AnalyticsError> {
    let (returns, stds) = classifiable_samples(stats)?;
    Ok(Thresholds {
        p40_return: quantile(&returns, 0.40),
        p75_return: quantile(&returns, 0.75),
        p40_std: quantile(&stds, 0.40),
        p75_std: quantile(&stds, 0.75),
    })
}

/// The scalar summary bundle served to the presentation layer: mean and
/// p40/p75 of both the return and deviation cross-sections.
pub fn compute_summary(stats: &[InstrumentStat]) -> Result<SummaryStats, AnalyticsError> {
    let (returns, stds) = classifiable_samples(stats)?;

    // The market mean return covers every aggregated instrument, including
    // those whose deviation is undefined.
    let mean_return = stats.iter().map(|s| s.mean_return).sum::<f64>() / stats.len() as f64;
    let mean_std = stds.iter().sum::<f64>() / stds.len() as f64;

    Ok(SummaryStats {
        mean_return,
        p40_return: quantile(&returns, 0.40),
        p75_return: quantile(&returns, 0.75),
        mean_std,
        p40_std: quantile(&stds, 0.40),
        p75_std: quantile(&stds, 0.75),
    })
}

/// Splits the stats into sorted return and deviation samples, keeping only
/// instruments whose deviation is defined.
fn classifiable_samples(
    stats: &[InstrumentStat],
) -> Result<(Vec<f64>, Vec<f64>), AnalyticsError> {
    let mut returns = Vec::with_capacity(stats.len());
    let mut stds = Vec::with_capacity(stats.len());
    for stat in stats {
        if let Some(std) = stat.std_return {
            returns.push(stat.mean_return);
            stds.push(std);
        }
    }
    if returns.is_empty() {
        return Err(AnalyticsError::NotEnoughData(
            "no instrument has at least two return observations in the window".to_string(),
        ));
    }
    returns.sort_by(f64::total_cmp);
    stds.sort_by(f64::total_cmp);
    Ok((returns, stds))
}

/// Linear-interpolation quantile over a pre-sorted, non-empty sample at
/// position `q * (n - 1)`. Monotonic in `q` and deterministic.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let position = q * (n - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
