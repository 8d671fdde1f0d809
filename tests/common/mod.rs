#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use collectible_forecast::{ItemFeatures, PricePoint};

/// Prices spaced 30 days apart starting 2023-01-01.
pub fn monthly(prices: &[f64]) -> Vec<PricePoint> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| PricePoint::new(start + Duration::days(30 * i as i64), *p))
        .collect()
}

/// Popularity 50, rarity 5, artist 5, flat trends, sentiment 50.
pub fn neutral_features() -> ItemFeatures {
    ItemFeatures {
        popularity_score: 50.0,
        rarity_score: 5.0,
        artist_score: 5.0,
        trend_30d: 0.0,
        trend_90d: 0.0,
        trend_1y: 0.0,
        market_sentiment: Some(50.0),
    }
}

/// A noisy, mildly rising history.
pub fn noisy_history() -> Vec<PricePoint> {
    monthly(&[
        120.0, 131.0, 118.0, 140.0, 126.0, 150.0, 138.0, 161.0, 142.0, 170.0, 155.0, 176.0, 149.0,
        182.0,
    ])
}
