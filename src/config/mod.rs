//! Configuration module for tradecast.
//!
//! Structured configuration loading from environment variables, organized by
//! domain: model backends, signal rules, and backtest gating.

mod backtest_config;
mod model_config;
mod signal_config;

pub use backtest_config::BacktestEnvConfig;
pub use model_config::ModelEnvConfig;
pub use signal_config::SignalEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Which model backends the ensemble runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Deterministic test doubles; same contract as trained backends.
    Mock,
    /// ONNX sequence model + smartcore forest, loaded from artifact paths.
    Trained,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "trained" => Ok(Mode::Trained),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'mock' or 'trained'", s),
        }
    }
}

/// Main application configuration, aggregated from sub-modules.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub pair: String,
    pub model: ModelEnvConfig,
    pub signal: SignalEnvConfig,
    pub backtest: BacktestEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode = env::var("MODE")
            .unwrap_or_else(|_| "mock".to_string())
            .parse::<Mode>()?;
        let pair = env::var("PAIR").unwrap_or_else(|_| "BTC/USDT".to_string());

        Ok(Self {
            mode,
            pair,
            model: ModelEnvConfig::from_env()?,
            signal: SignalEnvConfig::from_env()?,
            backtest: BacktestEnvConfig::from_env()?,
        })
    }
}

/// Parses an environment variable, falling back to a default when unset.
pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e))
            .with_context(|| format!("invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("mock".parse::<Mode>().unwrap(), Mode::Mock);
        assert_eq!("Trained".parse::<Mode>().unwrap(), Mode::Trained);
        assert!("onnx".parse::<Mode>().is_err());
    }
}
