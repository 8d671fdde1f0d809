use crate::models::{Recommendation, RiskLevel};

/// One row of the decision table: the ratio must exceed `min_ratio` and the
/// risk level must be one of `allowed` (`None` accepts any level).
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub min_ratio: f64,
    pub allowed: Option<&'static [RiskLevel]>,
    pub outcome: Recommendation,
}

impl Rule {
    fn matches(&self, ratio: f64, risk: RiskLevel) -> bool {
        ratio > self.min_ratio && self.allowed.is_none_or(|levels| levels.contains(&risk))
    }
}

/// Evaluated top to bottom, first match wins; `Sell` when nothing matches.
pub const RECOMMENDATION_TABLE: [Rule; 4] = [
    Rule {
        min_ratio: 2.5,
        allowed: Some(&[RiskLevel::Low]),
        outcome: Recommendation::StrongBuy,
    },
    Rule {
        min_ratio: 1.5,
        allowed: Some(&[RiskLevel::Low, RiskLevel::Moderate]),
        outcome: Recommendation::Buy,
    },
    Rule {
        min_ratio: 1.0,
        allowed: None,
        outcome: Recommendation::Hold,
    },
    Rule {
        min_ratio: 0.5,
        allowed: None,
        outcome: Recommendation::ConsiderSelling,
    },
];

pub fn classify(reward_risk_ratio: f64, risk_level: RiskLevel) -> Recommendation {
    RECOMMENDATION_TABLE
        .iter()
        .find(|rule| rule.matches(reward_risk_ratio, risk_level))
        .map(|rule| rule.outcome)
        .unwrap_or(Recommendation::Sell)
}
