use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

use crate::models::{ItemFeatures, PricePoint};

/// CSV row: `date,price[,volume][,source]`
#[derive(Debug, Clone, Deserialize)]
struct Row {
    date: NaiveDate,
    price: f64,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    source: Option<String>,
}

/// Reads a price history CSV, stably sorted by date.
pub fn read_history(path: &Path) -> Result<Vec<PricePoint>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open history {}", path.display()))?;

    let mut points = Vec::new();
    for (i, rec) in rdr.deserialize::<Row>().enumerate() {
        let r = rec.with_context(|| format!("{} row {}", path.display(), i + 1))?;
        let timestamp = r
            .date
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("invalid date {}", r.date))?
            .and_utc();
        points.push(PricePoint {
            timestamp,
            price: r.price,
            volume: r.volume,
            source: r.source.filter(|s| !s.is_empty()),
        });
    }
    points.sort_by_key(|p| p.timestamp);

    debug!("read {} price points from {}", points.len(), path.display());
    Ok(points)
}

/// Reads item features from JSON; missing fields take neutral defaults.
pub fn read_features(path: &Path) -> Result<ItemFeatures> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read features {}", path.display()))?;
    let features = serde_json::from_str(&raw)
        .with_context(|| format!("parse features {}", path.display()))?;
    Ok(features)
}
