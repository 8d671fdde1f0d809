use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PATH_COUNT: usize = 1000;
pub const DEFAULT_ANNUAL_DRIFT_CAP: f64 = 0.30;
pub const DEFAULT_ANNUAL_GROWTH_CAP: f64 = 0.50;
pub const MODEL_VERSION: &str = "v2";

/// One observed price for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: None,
            source: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Qualitative item features supplied by the catalog layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFeatures {
    /// 0..=100
    pub popularity_score: f64,
    /// 0..=10
    pub rarity_score: f64,
    /// 0..=10
    pub artist_score: f64,
    /// Signed percent changes.
    pub trend_30d: f64,
    pub trend_90d: f64,
    pub trend_1y: f64,
    /// 0..=100, externally supplied.
    pub market_sentiment: Option<f64>,
}

impl Default for ItemFeatures {
    fn default() -> Self {
        Self {
            popularity_score: 50.0,
            rarity_score: 5.0,
            artist_score: 5.0,
            trend_30d: 0.0,
            trend_90d: 0.0,
            trend_1y: 0.0,
            market_sentiment: None,
        }
    }
}

/// Smoothed level and per-period drift of a price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendState {
    pub level: f64,
    pub drift: f64,
}

/// Annualized volatility together with the sampling frequency it was scaled by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimate {
    pub annualized: f64,
    pub periods_per_year: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub path_count: usize,
    pub years_ahead: i32,
    pub annual_drift_cap: f64,
    pub annual_growth_cap: f64,
    pub random_seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(years_ahead: i32) -> Self {
        Self {
            path_count: DEFAULT_PATH_COUNT,
            years_ahead,
            annual_drift_cap: DEFAULT_ANNUAL_DRIFT_CAP,
            annual_growth_cap: DEFAULT_ANNUAL_GROWTH_CAP,
            random_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Copy of this config for a single horizon inside a timeline.
    pub fn for_horizon(&self, years_ahead: i32) -> Self {
        Self {
            years_ahead,
            random_seed: self.random_seed.map(|s| derive_seed(s, years_ahead as u64)),
            ..self.clone()
        }
    }
}

/// Mixes a base seed with a stream index (splitmix64 finalizer).
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Terminal prices of every simulated path, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedEnsemble {
    pub terminal_prices: Vec<f64>,
    pub annual_drift: f64,
    pub effective_growth: f64,
    pub years_ahead: i32,
}

impl SimulatedEnsemble {
    pub fn mean(&self) -> f64 {
        if self.terminal_prices.is_empty() {
            return 0.0;
        }
        self.terminal_prices.iter().sum::<f64>() / self.terminal_prices.len() as f64
    }

    /// True when no path stayed above zero, e.g. after `exp` underflow at
    /// extreme volatility.
    pub fn collapsed(&self) -> bool {
        !self.terminal_prices.iter().any(|p| *p > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub volatility: f64,
    pub downside_risk_pct: f64,
    pub upside_potential_pct: f64,
    /// Upside over downside, capped at 10. Also 10 when there is no
    /// measurable downside.
    pub reward_risk_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    ConsiderSelling,
    Sell,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong_buy",
            Recommendation::Buy => "buy",
            Recommendation::Hold => "hold",
            Recommendation::ConsiderSelling => "consider_selling",
            Recommendation::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentRating {
    StrongBuy,
    Buy,
    Hold,
    Underperform,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFactors {
    pub sentiment_multiplier: f64,
    pub popularity_score: f64,
    pub market_sentiment: f64,
    /// Smoothed per-period drift of the history.
    pub current_trend: f64,
    pub annual_drift: f64,
    pub effective_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub years_ahead: i32,
    pub target_date: DateTime<Utc>,
    pub scenarios: Scenarios,
    pub confidence: ConfidenceBand,
    pub risk_assessment: RiskAssessment,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub expected_price: f64,
    pub feature_estimate: f64,
    pub blended_price: f64,
    /// Percent change from the current price to `blended_price`.
    pub growth_rate: f64,
    pub investment_score: f64,
    pub investment_rating: InvestmentRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub current_price: f64,
    pub years_ahead: i32,
    pub target_date: DateTime<Utc>,
    pub scenarios: Scenarios,
    pub confidence: ConfidenceBand,
    pub risk_assessment: RiskAssessment,
    pub recommendation: Recommendation,
    pub market_factors: MarketFactors,
    pub timeline: Vec<TimelineEntry>,
    pub insights: Insights,
    pub model_version: String,
}
