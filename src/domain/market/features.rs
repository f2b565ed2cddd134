use super::bar::PriceBar;
use crate::domain::errors::SignalError;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named indicator values computed for one bar by the external feature
/// supplier. BTreeMap keeps iteration order stable so model input rows are
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Looks up an indicator the active rule set depends on.
    pub fn require(&self, name: &str) -> Result<f64, SignalError> {
        self.get(name).ok_or_else(|| SignalError::MissingIndicator {
            name: name.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Indicator values in name order.
    pub fn ordered_values(&self) -> Vec<f64> {
        self.values.values().copied().collect()
    }
}

/// One bar plus the indicator snapshot visible at that bar. This is the only
/// context a model adapter or the signal generator ever sees; nothing derived
/// from later bars may enter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    pub bar: PriceBar,
    pub features: FeatureVector,
}

impl FeatureFrame {
    pub fn new(bar: PriceBar, features: FeatureVector) -> Self {
        Self { bar, features }
    }

    /// Flat model input row: OHLCV followed by indicators in name order.
    /// Returns None when a price does not fit in f64.
    pub fn to_model_row(&self) -> Option<Vec<f64>> {
        let mut row = vec![
            self.bar.open.to_f64()?,
            self.bar.high.to_f64()?,
            self.bar.low.to_f64()?,
            self.bar.close.to_f64()?,
            self.bar.volume.to_f64()?,
        ];
        row.extend(self.features.ordered_values());
        Some(row)
    }
}
