use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::{ForecastError, Result};
use crate::models::{
    Insights, ItemFeatures, MarketFactors, MODEL_VERSION, Prediction, PricePoint, RiskAssessment,
    SimulationConfig, TimelineEntry, TrendState, VolatilityEstimate,
};
use crate::scenario::ScenarioSet;
use crate::simulation::MonteCarloSimulator;
use crate::{aggregate, market, recommendation, risk, scenario, trend, valuation, volatility};

const DAYS_PER_YEAR: i64 = 365;

/// Everything derived from the history once per prediction, shared by every
/// simulated horizon.
#[derive(Debug, Clone, Copy)]
struct Inputs {
    trend: TrendState,
    volatility: VolatilityEstimate,
    current_price: f64,
    multiplier: f64,
    as_of: DateTime<Utc>,
}

/// Result of simulating and scoring one horizon.
#[derive(Debug, Clone)]
struct HorizonOutcome {
    entry: TimelineEntry,
    expected_price: f64,
    annual_drift: f64,
    effective_growth: f64,
}

/// Runs the forecasting pipeline for one item.
#[derive(Debug, Clone)]
pub struct PricePredictor {
    config: SimulationConfig,
}

impl PricePredictor {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn predict(&self, history: &[PricePoint], features: &ItemFeatures) -> Result<Prediction> {
        validate_history(history)?;
        let years = self.config.years_ahead;
        if years <= 0 {
            return Err(ForecastError::InvalidHorizon(years));
        }

        let inputs = self.prepare(history, features)?;
        debug!(
            level = inputs.trend.level,
            drift = inputs.trend.drift,
            volatility = inputs.volatility.annualized,
            periods_per_year = inputs.volatility.periods_per_year,
            current_price = inputs.current_price,
            multiplier = inputs.multiplier,
            "prepared forecast inputs"
        );

        let outcomes = (1..=years)
            .map(|y| self.run_horizon(&self.config.for_horizon(y), &inputs))
            .collect::<Result<Vec<_>>>()?;
        let headline = outcomes
            .last()
            .cloned()
            .ok_or(ForecastError::InvalidHorizon(years))?;

        let estimate = valuation::feature_estimate(
            inputs.current_price,
            features,
            inputs.volatility.annualized,
            years,
        );
        let score = valuation::investment_score(features, inputs.volatility.annualized);
        let blended_price =
            valuation::blend(headline.entry.scenarios.moderate, estimate, history.len());
        let insights = Insights {
            expected_price: headline.expected_price,
            feature_estimate: estimate,
            blended_price,
            growth_rate: valuation::growth_rate_pct(inputs.current_price, blended_price),
            investment_score: score,
            investment_rating: valuation::investment_rating(score),
        };

        let market_factors = MarketFactors {
            sentiment_multiplier: inputs.multiplier,
            popularity_score: features.popularity_score,
            market_sentiment: features
                .market_sentiment
                .unwrap_or(market::NEUTRAL_SENTIMENT),
            current_trend: inputs.trend.drift,
            annual_drift: headline.annual_drift,
            effective_growth: headline.effective_growth,
        };

        info!(
            years_ahead = years,
            points = history.len(),
            moderate = headline.entry.scenarios.moderate,
            risk = headline.entry.risk_assessment.risk_level.as_str(),
            recommendation = headline.entry.recommendation.as_str(),
            "prediction complete"
        );

        let entry = headline.entry;
        Ok(Prediction {
            current_price: inputs.current_price,
            years_ahead: years,
            target_date: entry.target_date,
            scenarios: entry.scenarios,
            confidence: entry.confidence,
            risk_assessment: entry.risk_assessment,
            recommendation: entry.recommendation,
            market_factors,
            timeline: outcomes.into_iter().map(|o| o.entry).collect(),
            insights,
            model_version: MODEL_VERSION.to_string(),
        })
    }

    fn prepare(&self, history: &[PricePoint], features: &ItemFeatures) -> Result<Inputs> {
        let as_of = history
            .last()
            .map(|p| p.timestamp)
            .ok_or(ForecastError::EmptyHistory)?;
        Ok(Inputs {
            trend: trend::estimate_trend(history)?,
            volatility: volatility::estimate_volatility(history),
            current_price: aggregate::current_price(history)?,
            multiplier: market::growth_multiplier(features),
            as_of,
        })
    }

    fn run_horizon(&self, config: &SimulationConfig, inputs: &Inputs) -> Result<HorizonOutcome> {
        let mut rng = rng_for(config);
        let ensemble = MonteCarloSimulator::new(config).simulate(
            &inputs.trend,
            &inputs.volatility,
            inputs.multiplier,
            &mut rng,
        )?;
        if ensemble.collapsed() {
            warn!(
                years_ahead = config.years_ahead,
                volatility = inputs.volatility.annualized,
                "every simulated path collapsed to zero"
            );
        }
        let ScenarioSet {
            scenarios,
            confidence,
        } = scenario::extract(&ensemble)?;
        let risk_assessment: RiskAssessment = risk::assess(
            inputs.current_price,
            &confidence,
            inputs.volatility.annualized,
        );
        let recommendation = recommendation::classify(
            risk_assessment.reward_risk_ratio,
            risk_assessment.risk_level,
        );

        debug!(
            years_ahead = config.years_ahead,
            moderate = scenarios.moderate,
            downside = risk_assessment.downside_risk_pct,
            upside = risk_assessment.upside_potential_pct,
            "simulated horizon"
        );

        let horizon_days = DAYS_PER_YEAR * i64::from(config.years_ahead);
        Ok(HorizonOutcome {
            entry: TimelineEntry {
                years_ahead: config.years_ahead,
                target_date: inputs.as_of + Duration::days(horizon_days),
                scenarios,
                confidence,
                risk_assessment,
                recommendation,
            },
            expected_price: ensemble.mean(),
            annual_drift: ensemble.annual_drift,
            effective_growth: ensemble.effective_growth,
        })
    }
}

/// Convenience wrapper around [`PricePredictor::predict`].
pub fn predict(
    history: &[PricePoint],
    features: &ItemFeatures,
    config: &SimulationConfig,
) -> Result<Prediction> {
    PricePredictor::new(config.clone()).predict(history, features)
}

/// Seeded when the config carries a seed, fresh entropy otherwise.
fn rng_for(config: &SimulationConfig) -> StdRng {
    match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn validate_history(history: &[PricePoint]) -> Result<()> {
    if history.is_empty() {
        return Err(ForecastError::EmptyHistory);
    }
    if let Some((index, p)) = history
        .iter()
        .enumerate()
        .find(|(_, p)| !p.price.is_finite() || p.price <= 0.0)
    {
        return Err(ForecastError::InvalidPrice {
            index,
            price: p.price,
        });
    }
    if let Some((index, volume)) = history
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.volume.map(|v| (i, v)))
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
    {
        return Err(ForecastError::InvalidVolume { index, volume });
    }
    Ok(())
}
