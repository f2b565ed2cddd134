//! Signal rule configuration: trigger ratios and the momentum gate.

use super::env_parse;
use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct SignalEnvConfig {
    pub upper_trigger: f64,
    pub lower_trigger: f64,
    pub momentum_indicator: String,
    pub overbought: f64,
    pub oversold: f64,
    pub trigger_confidence: f64,
    pub hold_confidence: f64,
}

impl SignalEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            upper_trigger: env_parse("UPPER_TRIGGER_RATIO", 1.015)?,
            lower_trigger: env_parse("LOWER_TRIGGER_RATIO", 0.985)?,
            momentum_indicator: env::var("MOMENTUM_INDICATOR")
                .unwrap_or_else(|_| "rsi".to_string()),
            overbought: env_parse("OVERBOUGHT_THRESHOLD", 60.0)?,
            oversold: env_parse("OVERSOLD_THRESHOLD", 40.0)?,
            trigger_confidence: env_parse("TRIGGER_CONFIDENCE", 0.8)?,
            hold_confidence: env_parse("HOLD_CONFIDENCE", 0.5)?,
        })
    }
}
