use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::models::{PricePoint, VolatilityEstimate};

pub const DEFAULT_PERIODS_PER_YEAR: f64 = 12.0;
const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;
const MIN_PERIODS_PER_YEAR: f64 = 1.0;
const MAX_PERIODS_PER_YEAR: f64 = 365.0;

/// Sampling frequency inferred from the mean spacing between timestamps.
///
/// Falls back to monthly when the spacing cannot be determined (fewer than
/// two points, or every point at the same instant).
pub fn periods_per_year(history: &[PricePoint]) -> f64 {
    let (first, last) = match (history.first(), history.last()) {
        (Some(f), Some(l)) if history.len() >= 2 => (f, l),
        _ => return DEFAULT_PERIODS_PER_YEAR,
    };
    let span = (last.timestamp - first.timestamp).num_seconds() as f64;
    let spacing = span / (history.len() - 1) as f64;
    if !spacing.is_finite() || spacing <= 0.0 {
        return DEFAULT_PERIODS_PER_YEAR;
    }
    (SECONDS_PER_YEAR / spacing).clamp(MIN_PERIODS_PER_YEAR, MAX_PERIODS_PER_YEAR)
}

/// Simple period-over-period returns.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .iter()
        .tuple_windows()
        .map(|(prev, next)| (next - prev) / prev)
        .collect()
}

/// Sample standard deviation of simple returns, annualized.
///
/// Series shorter than two points (or with a single return) have no
/// measurable dispersion and report zero.
pub fn estimate_volatility(history: &[PricePoint]) -> VolatilityEstimate {
    let periods = periods_per_year(history);
    let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
    let returns = simple_returns(&prices);

    let annualized = if returns.len() < 2 {
        0.0
    } else {
        let sd = returns.iter().std_dev();
        if sd.is_finite() { sd.max(0.0) * periods.sqrt() } else { 0.0 }
    };

    VolatilityEstimate {
        annualized,
        periods_per_year: periods,
    }
}
