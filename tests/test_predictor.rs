//! End-to-end tests for the forecasting pipeline.

mod common;

use collectible_forecast::{
    ForecastError, ItemFeatures, Recommendation, RiskLevel, SimulationConfig, predict,
};
use common::{monthly, neutral_features, noisy_history};

// ---------------------------------------------------------------------------
// Named scenarios
// ---------------------------------------------------------------------------

#[test]
fn linear_monthly_history_forecasts_capped_growth() {
    let history = monthly(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    let cfg = SimulationConfig::new(1).with_seed(2024);
    let p = predict(&history, &neutral_features(), &cfg).unwrap();

    assert_eq!(p.current_price, 15.0);
    // One unit per month on a level of 15 annualizes to ~0.8, so the 0.30
    // drift cap binds and the median lands near 15 * 1.30.
    let target = 15.0 * (1.0 + cfg.annual_drift_cap);
    assert!(
        (p.scenarios.moderate - target).abs() <= target * 0.15,
        "moderate {} not within 15% of {}",
        p.scenarios.moderate,
        target
    );
    assert!(p.scenarios.conservative < p.scenarios.moderate);
    assert!(p.scenarios.moderate < p.scenarios.aggressive);
    assert!(matches!(
        p.risk_assessment.risk_level,
        RiskLevel::Low | RiskLevel::Moderate
    ));
    assert_eq!(p.market_factors.sentiment_multiplier, 1.0);
    assert_eq!(p.market_factors.annual_drift, 0.30);
}

#[test]
fn single_point_history_is_flat() {
    let history = monthly(&[100.0]);
    let cfg = SimulationConfig::new(3).with_seed(7);
    let p = predict(&history, &neutral_features(), &cfg).unwrap();

    for v in [
        p.scenarios.conservative,
        p.scenarios.moderate,
        p.scenarios.aggressive,
        p.confidence.lower,
        p.confidence.upper,
    ] {
        assert!((v - 100.0).abs() < 1e-9, "expected 100, got {}", v);
    }
    assert_eq!(p.risk_assessment.volatility, 0.0);
    assert_eq!(p.market_factors.current_trend, 0.0);
    assert_eq!(p.timeline.len(), 3);
}

#[test]
fn zero_downside_reports_sentinel_ratio() {
    let history = monthly(&[100.0]);
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(1).with_seed(1))
        .unwrap();
    assert_eq!(p.risk_assessment.downside_risk_pct, 0.0);
    assert_eq!(p.risk_assessment.reward_risk_ratio, 10.0);
    assert!(p.risk_assessment.reward_risk_ratio.is_finite());
}

#[test]
fn non_positive_horizon_is_rejected() {
    let history = monthly(&[10.0, 11.0, 12.0]);
    for years in [0, -1, -5] {
        let err = predict(&history, &neutral_features(), &SimulationConfig::new(years))
            .unwrap_err();
        assert_eq!(err, ForecastError::InvalidHorizon(years));
    }
}

#[test]
fn empty_history_is_rejected() {
    let err = predict(&[], &neutral_features(), &SimulationConfig::new(2).with_seed(3))
        .unwrap_err();
    assert_eq!(err, ForecastError::EmptyHistory);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_gives_identical_prediction() {
    let history = noisy_history();
    let cfg = SimulationConfig::new(5).with_seed(123_456);
    let a = predict(&history, &neutral_features(), &cfg).unwrap();
    let b = predict(&history, &neutral_features(), &cfg).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn different_seeds_differ() {
    let history = noisy_history();
    let a = predict(&history, &neutral_features(), &SimulationConfig::new(2).with_seed(1))
        .unwrap();
    let b = predict(&history, &neutral_features(), &SimulationConfig::new(2).with_seed(2))
        .unwrap();
    assert_ne!(a.scenarios, b.scenarios);
}

#[test]
fn unseeded_runs_still_produce_valid_predictions() {
    let history = noisy_history();
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(2)).unwrap();
    assert!(p.scenarios.conservative <= p.scenarios.moderate);
    assert!(p.scenarios.moderate <= p.scenarios.aggressive);
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[test]
fn timeline_spread_widens_with_horizon() {
    let history = noisy_history();
    let cfg = SimulationConfig::new(5).with_seed(77);
    let p = predict(&history, &neutral_features(), &cfg).unwrap();

    let spreads: Vec<f64> = p
        .timeline
        .iter()
        .map(|e| e.confidence.upper - e.confidence.lower)
        .collect();
    assert_eq!(spreads.len(), 5);
    assert!(spreads[4] > spreads[0]);
}

#[test]
fn headline_matches_final_timeline_entry() {
    let history = noisy_history();
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(3).with_seed(9))
        .unwrap();
    let last = p.timeline.last().unwrap();
    assert_eq!(last.years_ahead, 3);
    assert_eq!(last.scenarios, p.scenarios);
    assert_eq!(last.confidence, p.confidence);
    assert_eq!(last.recommendation, p.recommendation);
    assert_eq!(last.target_date, p.target_date);
}

// ---------------------------------------------------------------------------
// Inputs flowing through
// ---------------------------------------------------------------------------

#[test]
fn volume_weighted_current_price_is_used() {
    let mut history = monthly(&[10.0, 20.0]);
    history[0].volume = Some(3.0);
    history[1].volume = Some(1.0);
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(1).with_seed(4))
        .unwrap();
    assert!((p.current_price - 12.5).abs() < 1e-12);
}

#[test]
fn negative_volume_never_yields_a_negative_price() {
    let mut history = monthly(&[10.0, 20.0]);
    history[0].volume = Some(5.0);
    history[1].volume = Some(-4.0);
    let err = predict(&history, &neutral_features(), &SimulationConfig::new(1).with_seed(1))
        .unwrap_err();
    assert_eq!(
        err,
        ForecastError::InvalidVolume {
            index: 1,
            volume: -4.0
        }
    );
}

#[test]
fn declining_history_leans_towards_selling() {
    let history = monthly(&[
        200.0, 185.0, 190.0, 170.0, 160.0, 165.0, 140.0, 130.0, 135.0, 115.0, 105.0, 100.0,
    ]);
    let features = ItemFeatures {
        popularity_score: 20.0,
        trend_1y: -40.0,
        market_sentiment: Some(25.0),
        ..neutral_features()
    };
    let p = predict(&history, &features, &SimulationConfig::new(2).with_seed(31)).unwrap();
    assert!(p.market_factors.sentiment_multiplier < 1.0);
    assert!(p.market_factors.annual_drift < 0.0);
    assert!(p.scenarios.moderate < p.current_price);
    assert!(matches!(
        p.recommendation,
        Recommendation::Sell | Recommendation::ConsiderSelling
    ));
}

#[test]
fn insights_blend_simulation_and_features() {
    let history = noisy_history();
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(2).with_seed(8))
        .unwrap();
    let expected = p.scenarios.moderate * 0.75 + p.insights.feature_estimate * 0.25;
    assert!((p.insights.blended_price - expected).abs() < 1e-9);
    let growth = (p.insights.blended_price - p.current_price) / p.current_price * 100.0;
    assert!((p.insights.growth_rate - growth).abs() < 1e-9);
    assert!(p.insights.feature_estimate > p.current_price);
    assert!((1.0..=10.0).contains(&p.insights.investment_score));
    assert_eq!(p.model_version, "v2");
}

#[test]
fn prediction_serializes_with_snake_case_tokens() {
    let history = monthly(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    let p = predict(&history, &neutral_features(), &SimulationConfig::new(1).with_seed(2024))
        .unwrap();
    let json: serde_json::Value = serde_json::to_value(&p).unwrap();
    assert_eq!(json["recommendation"], p.recommendation.as_str());
    assert_eq!(
        json["risk_assessment"]["risk_level"],
        p.risk_assessment.risk_level.as_str()
    );
    assert!(json["scenarios"]["moderate"].is_number());
    assert_eq!(json["timeline"].as_array().unwrap().len(), 1);
}
