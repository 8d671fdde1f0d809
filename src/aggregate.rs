use crate::error::{ForecastError, Result};
use crate::models::PricePoint;

/// Volume-weighted current price over every point with a positive, finite
/// volume.
///
/// Without any such volume this is the last observed price. The result
/// always lies within the range of the weighted prices.
pub fn current_price(history: &[PricePoint]) -> Result<f64> {
    let last = history.last().ok_or(ForecastError::InsufficientData)?.price;

    let (notional, total_volume) = history
        .iter()
        .filter_map(|p| p.volume.map(|v| (p.price, v)))
        .filter(|(_, v)| v.is_finite() && *v > 0.0)
        .fold((0.0, 0.0), |(n, t), (price, volume)| {
            (n + price * volume, t + volume)
        });

    if total_volume > 0.0 && notional.is_finite() {
        Ok(notional / total_volume)
    } else {
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn points(rows: &[(f64, Option<f64>)]) -> Vec<PricePoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, (price, volume))| PricePoint {
                timestamp: start + Duration::days(i as i64),
                price: *price,
                volume: *volume,
                source: None,
            })
            .collect()
    }

    #[test]
    fn no_volume_uses_last_price() {
        let h = points(&[(10.0, None), (12.0, None), (11.0, None)]);
        assert_eq!(current_price(&h).unwrap(), 11.0);
    }

    #[test]
    fn weights_by_volume() {
        let h = points(&[(10.0, Some(1.0)), (20.0, Some(3.0))]);
        assert!((current_price(&h).unwrap() - 17.5).abs() < 1e-12);
    }

    #[test]
    fn points_without_volume_are_skipped_in_weighting() {
        let h = points(&[(10.0, Some(2.0)), (50.0, None), (20.0, Some(2.0))]);
        assert!((current_price(&h).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_volume_falls_back_to_last_price() {
        let h = points(&[(10.0, Some(0.0)), (14.0, Some(0.0))]);
        assert_eq!(current_price(&h).unwrap(), 14.0);
    }

    #[test]
    fn negative_volume_does_not_pull_price_outside_range() {
        let h = points(&[(10.0, Some(5.0)), (20.0, Some(-4.0))]);
        assert_eq!(current_price(&h).unwrap(), 10.0);
    }

    #[test]
    fn empty_history_is_an_error() {
        assert_eq!(current_price(&[]), Err(ForecastError::InsufficientData));
    }
}
