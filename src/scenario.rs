use crate::error::{ForecastError, Result};
use crate::models::{ConfidenceBand, Scenarios, SimulatedEnsemble};

pub const CONSERVATIVE_PCT: f64 = 25.0;
pub const MODERATE_PCT: f64 = 50.0;
pub const AGGRESSIVE_PCT: f64 = 75.0;
pub const BAND_LOWER_PCT: f64 = 10.0;
pub const BAND_UPPER_PCT: f64 = 90.0;

/// Percentile of an ascending slice with linear interpolation between
/// order statistics (rank = pct / 100 * (n - 1)).
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Percentile summary of one simulated horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSet {
    pub scenarios: Scenarios,
    pub confidence: ConfidenceBand,
}

pub fn extract(ensemble: &SimulatedEnsemble) -> Result<ScenarioSet> {
    let mut sorted = ensemble.terminal_prices.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let at = |pct| percentile(&sorted, pct).ok_or(ForecastError::EmptyEnsemble);

    Ok(ScenarioSet {
        scenarios: Scenarios {
            conservative: at(CONSERVATIVE_PCT)?,
            moderate: at(MODERATE_PCT)?,
            aggressive: at(AGGRESSIVE_PCT)?,
        },
        confidence: ConfidenceBand {
            lower: at(BAND_LOWER_PCT)?,
            upper: at(BAND_UPPER_PCT)?,
        },
    })
}
