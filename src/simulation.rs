//! Single-step geometric Brownian motion.
//!
//! Only terminal prices are needed, so each path is one draw:
//! `S_T = S_0 * exp((mu - sigma^2 / 2) * T + sigma * sqrt(T) * z)`.

use rand::Rng;
use rand::distributions::Distribution;
use statrs::distribution::Normal;

use crate::error::{ForecastError, Result};
use crate::models::{SimulatedEnsemble, SimulationConfig, TrendState, VolatilityEstimate};

/// Per-period drift expressed as an annual rate relative to the level,
/// clamped to `±cap`.
pub fn annualized_drift(trend: &TrendState, periods_per_year: f64, cap: f64) -> f64 {
    if trend.level <= 0.0 || !trend.level.is_finite() {
        return 0.0;
    }
    let annual = trend.drift / trend.level * periods_per_year;
    if annual.is_finite() { annual.clamp(-cap, cap) } else { 0.0 }
}

/// Annual drift scaled by the market multiplier and clamped to `±growth_cap`.
pub fn effective_growth(annual_drift: f64, multiplier: f64, growth_cap: f64) -> f64 {
    (annual_drift * multiplier).clamp(-growth_cap, growth_cap)
}

pub struct MonteCarloSimulator<'a> {
    config: &'a SimulationConfig,
}

impl<'a> MonteCarloSimulator<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        trend: &TrendState,
        volatility: &VolatilityEstimate,
        multiplier: f64,
        rng: &mut R,
    ) -> Result<SimulatedEnsemble> {
        let years = self.config.years_ahead;
        if years <= 0 {
            return Err(ForecastError::InvalidHorizon(years));
        }

        let annual_drift = annualized_drift(
            trend,
            volatility.periods_per_year,
            self.config.annual_drift_cap,
        );
        let growth = effective_growth(annual_drift, multiplier, self.config.annual_growth_cap);

        let sigma = volatility.annualized.max(0.0);
        let t = f64::from(years);
        let log_drift = (growth - 0.5 * sigma * sigma) * t;
        let diffusion = sigma * t.sqrt();

        let normal =
            Normal::new(0.0, 1.0).map_err(|e| ForecastError::Distribution(e.to_string()))?;

        let terminal_prices: Vec<f64> = (0..self.config.path_count)
            .map(|_| {
                let z = normal.sample(&mut *rng);
                trend.level * (log_drift + diffusion * z).exp()
            })
            .collect();

        Ok(SimulatedEnsemble {
            terminal_prices,
            annual_drift,
            effective_growth: growth,
            years_ahead: years,
        })
    }
}
