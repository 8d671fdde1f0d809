use anyhow::{Context, Result};
use tracing::info;

use crate::ForecastArgs;
use crate::history::{read_features, read_history};
use crate::models::SimulationConfig;
use crate::output::write_json_atomic;
use crate::predictor::PricePredictor;

pub fn execute(args: &ForecastArgs) -> Result<()> {
    let history_path = args.history.as_ref().context("--history is required")?;
    let features_path = args.features.as_ref().context("--features is required")?;
    let years = args.years.context("--years is required")?;

    let history = read_history(history_path).context("read history")?;
    let features = read_features(features_path).context("read features")?;

    let mut config = SimulationConfig::new(years);
    config.random_seed = args.seed;
    info!(
        "forecasting {} ({} points, {} years ahead, seed {:?})",
        history_path.display(),
        history.len(),
        years,
        config.random_seed
    );

    let prediction = PricePredictor::new(config)
        .predict(&history, &features)
        .context("prediction unavailable")?;

    match &args.out {
        Some(out) => write_json_atomic(out, &prediction)?,
        None => println!("{}", serde_json::to_string_pretty(&prediction)?),
    }
    Ok(())
}
