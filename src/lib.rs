pub mod aggregate;
pub mod batch;
pub mod error;
pub mod forecast;
pub mod history;
pub mod market;
pub mod models;
pub mod output;
pub mod predictor;
pub mod recommendation;
pub mod risk;
pub mod scenario;
pub mod simulation;
pub mod trend;
pub mod valuation;
pub mod volatility;

pub use error::{ForecastError, Result};
pub use models::{
    ConfidenceBand, ItemFeatures, Prediction, PricePoint, Recommendation, RiskAssessment,
    RiskLevel, Scenarios, SimulationConfig,
};
pub use predictor::{PricePredictor, predict};

use clap::Parser;
use std::path::PathBuf;

/// Forecast one item from a price history CSV and a features JSON.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct ForecastArgs {
    /// Price history CSV (columns: date,price[,volume][,source])
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Item features JSON (popularity_score, rarity_score, artist_score, trend_*, market_sentiment)
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// Years ahead to forecast, clamped to 1..=5 (or set FORECAST_YEARS env)
    #[arg(long, allow_negative_numbers = true)]
    pub years: Option<i32>,

    /// Seed for reproducible simulations (or set FORECAST_SEED env)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the prediction JSON here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Forecast every `<id>.csv` + `<id>.json` pair in a directory concurrently.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct BatchArgs {
    /// Directory holding item histories and features
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Years ahead to forecast, clamped to 1..=5 (or set FORECAST_YEARS env)
    #[arg(long, allow_negative_numbers = true)]
    pub years: Option<i32>,

    /// Base seed; each item derives its own seed from it (or set FORECAST_SEED env)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Items forecast at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Write the id -> prediction map here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}
