use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::history::{read_features, read_history};
use crate::models::{Prediction, SimulationConfig, derive_seed};
use crate::output::write_json_atomic;
use crate::predictor::PricePredictor;
use crate::BatchArgs;

/// One item on disk: `<id>.csv` price history with a sibling `<id>.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub id: String,
    pub history: PathBuf,
    pub features: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    Prediction(Box<Prediction>),
    Error(String),
}

/// Stable 64-bit FNV-1a of an item id, used as its seed stream.
fn id_stream(id: &str) -> u64 {
    id.bytes().fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Finds every history CSV in `dir` that has a features JSON beside it.
pub fn discover_items(dir: &Path) -> Result<Vec<ItemInput>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() || path.extension().unwrap_or_default() != "csv" {
            continue;
        }
        let features = path.with_extension("json");
        let Some(id) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        if features.is_file() {
            items.push(ItemInput {
                id,
                history: path,
                features,
            });
        } else {
            info!("skipping {} (no {})", id, features.display());
        }
    }
    items.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(items)
}

fn forecast_item(item: &ItemInput, config: &SimulationConfig) -> Result<Prediction> {
    let history = read_history(&item.history)?;
    let features = read_features(&item.features)?;
    let prediction = PricePredictor::new(config.clone())
        .predict(&history, &features)
        .with_context(|| format!("forecast {}", item.id))?;
    Ok(prediction)
}

/// Forecasts every item on the blocking pool with at most `concurrency`
/// items in flight. Each item gets its own seed derived from `seed` and its id.
pub async fn forecast_all(
    items: Vec<ItemInput>,
    years_ahead: i32,
    seed: Option<u64>,
    concurrency: usize,
) -> Result<BTreeMap<String, BatchOutcome>> {
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = Vec::with_capacity(items.len());

    for item in items {
        let permit = sem.clone().acquire_owned().await?;
        let mut config = SimulationConfig::new(years_ahead);
        config.random_seed = seed.map(|s| derive_seed(s, id_stream(&item.id)));

        tasks.push(tokio::task::spawn_blocking(move || {
            let _p = permit;
            let outcome = match forecast_item(&item, &config) {
                Ok(p) => BatchOutcome::Prediction(Box::new(p)),
                Err(e) => {
                    error!("failed {}: {:#}", item.id, e);
                    BatchOutcome::Error(format!("{:#}", e))
                }
            };
            (item.id, outcome)
        }));
    }

    let mut results = BTreeMap::new();
    for joined in futures::future::join_all(tasks).await {
        let (id, outcome) = joined.context("forecast task panicked")?;
        results.insert(id, outcome);
    }
    Ok(results)
}

pub async fn execute(args: &BatchArgs) -> Result<()> {
    let dir = args.dir.as_ref().context("--dir is required")?;
    let years = args.years.context("--years is required")?;
    let concurrency = args.concurrency.context("--concurrency is required")?;

    let items = discover_items(dir)?;
    if items.is_empty() {
        bail!("no <id>.csv + <id>.json pairs found in {}", dir.display());
    }
    info!(
        "forecasting {} items ({} years ahead, concurrency {})",
        items.len(),
        years,
        concurrency
    );

    let results = forecast_all(items, years, args.seed, concurrency).await?;
    let failed = results
        .values()
        .filter(|o| matches!(o, BatchOutcome::Error(_)))
        .count();

    match &args.out {
        Some(out) => write_json_atomic(out, &results)?,
        None => println!("{}", serde_json::to_string_pretty(&results)?),
    }
    info!("batch complete: {} ok, {} failed", results.len() - failed, failed);
    Ok(())
}
