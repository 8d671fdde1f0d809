use crate::error::{ForecastError, Result};
use crate::models::{PricePoint, TrendState};

/// Level smoothing weight.
pub const ALPHA: f64 = 0.2;
/// Trend smoothing weight.
pub const BETA: f64 = 0.05;

/// Double exponential smoothing (level + trend) over the history prices.
pub fn estimate_trend(history: &[PricePoint]) -> Result<TrendState> {
    let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
    smooth(&prices, ALPHA, BETA)
}

pub fn smooth(prices: &[f64], alpha: f64, beta: f64) -> Result<TrendState> {
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(ForecastError::InsufficientData),
    };

    let periods = prices.len() - 1;
    let mut level = first;
    let mut drift = if periods > 0 {
        (last - first) / periods as f64
    } else {
        0.0
    };

    for &price in prices.iter().skip(1) {
        let prev_level = level;
        level = alpha * price + (1.0 - alpha) * (level + drift);
        drift = beta * (level - prev_level) + (1.0 - beta) * drift;
    }

    // A steep decline can carry the smoothed level through zero.
    if !(level.is_finite() && level > 0.0) {
        level = last;
    }

    Ok(TrendState { level, drift })
}
