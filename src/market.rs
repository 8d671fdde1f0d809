use crate::models::ItemFeatures;

pub const MIN_MULTIPLIER: f64 = 0.85;
pub const MAX_MULTIPLIER: f64 = 1.25;
/// Distance from 1.0 reached when every input sits at an extreme.
const SWING: f64 = 0.15;

const POPULARITY_WEIGHT: f64 = 0.25;
const SENTIMENT_WEIGHT: f64 = 0.25;
const TREND_WEIGHT: f64 = 0.50;

pub const NEUTRAL_SENTIMENT: f64 = 50.0;

/// Maps a 0..=100 score onto [-1, 1] with 50 at zero.
fn centered(score: f64) -> f64 {
    ((score.clamp(0.0, 100.0) / 100.0) - 0.5) * 2.0
}

/// Weighted blend of popularity, sentiment and one-year trend in [-1, 1].
pub fn market_signal(features: &ItemFeatures) -> f64 {
    let popularity = centered(features.popularity_score);
    let sentiment = centered(features.market_sentiment.unwrap_or(NEUTRAL_SENTIMENT));
    let trend = (features.trend_1y / 100.0).clamp(-1.0, 1.0);

    POPULARITY_WEIGHT * popularity + SENTIMENT_WEIGHT * sentiment + TREND_WEIGHT * trend
}

/// Growth multiplier in [0.85, 1.25]; exactly 1.0 for neutral features and
/// linear (hence symmetric about 1.0) in the blended signal.
pub fn growth_multiplier(features: &ItemFeatures) -> f64 {
    let signal = market_signal(features);
    if !signal.is_finite() {
        return 1.0;
    }
    (1.0 + SWING * signal).clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}
