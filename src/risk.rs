use crate::models::{ConfidenceBand, RiskAssessment, RiskLevel};

/// Ratio reported when there is no measurable downside; also the ratio ceiling.
pub const REWARD_RISK_SENTINEL: f64 = 10.0;
/// Downside below this share of the current price (in percent) counts as none.
pub const MIN_DOWNSIDE_PCT: f64 = 0.01;

/// Downside thresholds (percent), evaluated in order, first match wins.
pub const RISK_LEVEL_TABLE: [(f64, RiskLevel); 2] =
    [(30.0, RiskLevel::High), (15.0, RiskLevel::Moderate)];

pub fn classify_risk(downside_risk_pct: f64) -> RiskLevel {
    RISK_LEVEL_TABLE
        .iter()
        .find(|(threshold, _)| downside_risk_pct > *threshold)
        .map(|(_, level)| *level)
        .unwrap_or(RiskLevel::Low)
}

/// `upside / downside`, capped at [`REWARD_RISK_SENTINEL`] so the value is
/// always finite and comparable across items.
pub fn reward_risk_ratio(upside_potential_pct: f64, downside_risk_pct: f64) -> f64 {
    if downside_risk_pct.is_nan() || downside_risk_pct < MIN_DOWNSIDE_PCT {
        return REWARD_RISK_SENTINEL;
    }
    let ratio = upside_potential_pct.max(0.0) / downside_risk_pct;
    if ratio.is_finite() {
        ratio.min(REWARD_RISK_SENTINEL)
    } else {
        REWARD_RISK_SENTINEL
    }
}

/// Risk metrics for a horizon from its confidence band relative to the
/// current price.
pub fn assess(current_price: f64, band: &ConfidenceBand, volatility: f64) -> RiskAssessment {
    let (downside, upside) = if current_price > 0.0 {
        (
            ((current_price - band.lower) / current_price * 100.0).max(0.0),
            ((band.upper - current_price) / current_price * 100.0).max(0.0),
        )
    } else {
        (0.0, 0.0)
    };

    RiskAssessment {
        risk_level: classify_risk(downside),
        volatility: volatility.max(0.0),
        downside_risk_pct: downside,
        upside_potential_pct: upside,
        reward_risk_ratio: reward_risk_ratio(upside, downside),
    }
}
