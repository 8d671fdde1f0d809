/// Failures surfaced by the forecasting engine.
///
/// Numeric degeneracies (single-point history, zero volume, zero downside)
/// are not errors; each has a fallback in the component that meets it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    #[error("price history is empty")]
    EmptyHistory,

    #[error("invalid forecast horizon: {0} years (must be at least 1)")]
    InvalidHorizon(i32),

    #[error("insufficient data: at least one price point is required")]
    InsufficientData,

    #[error("simulated ensemble is empty")]
    EmptyEnsemble,

    #[error("invalid price {price} at history index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("invalid volume {volume} at history index {index}")]
    InvalidVolume { index: usize, volume: f64 },

    #[error("distribution error: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
