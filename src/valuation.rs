//! Feature-driven valuation that complements the simulated scenarios.
//!
//! The estimate compounds a base annual growth rate adjusted by the item's
//! rarity, popularity, artist, one-year trend, sentiment and volatility,
//! decaying the rate for longer horizons.

use crate::market::NEUTRAL_SENTIMENT;
use crate::models::{InvestmentRating, ItemFeatures};

const BASE_GROWTH_PCT: f64 = 6.0;
const HORIZON_DECAY: f64 = 0.95;
/// History length at which the simulation dominates the blend.
pub const LONG_HISTORY_POINTS: usize = 12;

/// trend_1y thresholds (percent) and growth bonus, first match wins.
const TREND_BONUS_TABLE: [(f64, f64); 3] = [(20.0, 6.0), (10.0, 4.0), (0.0, 2.0)];
const TREND_PENALTY_BELOW: f64 = -10.0;
const TREND_PENALTY: f64 = -3.0;

/// Score floor and rating, first match wins.
const RATING_TABLE: [(f64, InvestmentRating); 4] = [
    (8.5, InvestmentRating::StrongBuy),
    (7.0, InvestmentRating::Buy),
    (5.5, InvestmentRating::Hold),
    (4.0, InvestmentRating::Underperform),
];

fn trend_adjustment(trend_1y: f64) -> f64 {
    TREND_BONUS_TABLE
        .iter()
        .find(|(above, _)| trend_1y > *above)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(if trend_1y < TREND_PENALTY_BELOW {
            TREND_PENALTY
        } else {
            0.0
        })
}

/// Annual growth in percent before horizon decay.
pub fn annual_growth_pct(features: &ItemFeatures, volatility: f64) -> f64 {
    let sentiment = features.market_sentiment.unwrap_or(NEUTRAL_SENTIMENT);
    BASE_GROWTH_PCT
        + (features.rarity_score / 10.0) * 3.5
        + (features.popularity_score / 100.0) * 5.0
        + (features.artist_score / 10.0) * 2.0
        + trend_adjustment(features.trend_1y)
        + ((sentiment - NEUTRAL_SENTIMENT) / NEUTRAL_SENTIMENT) * 4.0
        + (volatility.max(0.0) * 2.0).min(2.0)
}

pub fn feature_estimate(
    current_price: f64,
    features: &ItemFeatures,
    volatility: f64,
    years_ahead: i32,
) -> f64 {
    let years = years_ahead.max(1);
    let decay = HORIZON_DECAY.powi(years - 1);
    let growth = annual_growth_pct(features, volatility) * decay / 100.0;
    current_price * (1.0 + growth).max(0.0).powi(years)
}

/// Mix of the simulated median and the feature estimate, trusting the
/// simulation more once the history is long enough.
pub fn blend(moderate: f64, estimate: f64, history_len: usize) -> f64 {
    let weight = if history_len >= LONG_HISTORY_POINTS { 0.75 } else { 0.5 };
    moderate * weight + estimate * (1.0 - weight)
}

/// 1..=10 score from fundamentals, momentum and price stability.
/// Percent change from `current` to `predicted`; 0 when `current` is not positive.
pub fn growth_rate_pct(current: f64, predicted: f64) -> f64 {
    if current > 0.0 {
        (predicted - current) / current * 100.0
    } else {
        0.0
    }
}

pub fn investment_score(features: &ItemFeatures, volatility: f64) -> f64 {
    let fundamentals = (features.rarity_score / 10.0) * 0.4
        + (features.popularity_score / 100.0) * 0.4
        + (features.artist_score / 10.0) * 0.2;
    let momentum = ((features.trend_1y + 30.0) / 70.0).clamp(0.0, 1.0);
    let stability = (1.0 - (volatility * 100.0) / 50.0).clamp(0.0, 1.0);

    (fundamentals * 5.0 + momentum * 3.0 + stability * 2.0).clamp(1.0, 10.0)
}

pub fn investment_rating(score: f64) -> InvestmentRating {
    RATING_TABLE
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, rating)| *rating)
        .unwrap_or(InvestmentRating::Sell)
}
