//! Backtest gating configuration.

use super::env_parse;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct BacktestEnvConfig {
    /// Directional accuracy (%) a strategy must strictly exceed to pass.
    pub baseline_accuracy: f64,
    /// Width of the Flat band when classifying direction. 0.0 means exact
    /// equality, the behavior of the system this replaces.
    pub flat_epsilon: f64,
}

impl BacktestEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            baseline_accuracy: env_parse("BASELINE_ACCURACY", 55.0)?,
            flat_epsilon: env_parse("FLAT_EPSILON", 0.0)?,
        })
    }
}
