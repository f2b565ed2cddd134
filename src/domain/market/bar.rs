use crate::domain::errors::BacktestError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a fixed interval. Immutable once produced by the
/// data supplier; timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl PriceBar {
    /// Close price at the f64 boundary used by models and metrics.
    pub fn close_f64(&self) -> Option<f64> {
        self.close.to_f64()
    }

    fn invalid_reason(&self) -> Option<String> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            if value < Decimal::ZERO {
                return Some(format!("negative {}: {}", name, value));
            }
        }
        None
    }
}

/// Validates the input series contract: at least 2 bars, strictly increasing
/// timestamps, non-negative prices and volume.
pub fn validate_series<'a, I>(bars: I) -> Result<(), BacktestError>
where
    I: IntoIterator<Item = &'a PriceBar>,
{
    let mut count = 0usize;
    let mut previous_timestamp: Option<i64> = None;

    for (index, bar) in bars.into_iter().enumerate() {
        if let Some(reason) = bar.invalid_reason() {
            return Err(BacktestError::InvalidBar {
                timestamp: bar.timestamp,
                reason,
            });
        }
        if let Some(previous) = previous_timestamp {
            if bar.timestamp <= previous {
                return Err(BacktestError::NonMonotonicTimestamps { index });
            }
        }
        previous_timestamp = Some(bar.timestamp);
        count = index + 1;
    }

    if count < 2 {
        return Err(BacktestError::NotEnoughBars { got: count });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(timestamp: i64, close: Decimal) -> PriceBar {
        PriceBar {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: dec!(10),
        }
    }

    #[test]
    fn test_validate_rejects_short_series() {
        let bars = vec![bar(1, dec!(100))];
        assert!(matches!(
            validate_series(&bars),
            Err(BacktestError::NotEnoughBars { got: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_timestamps() {
        let bars = vec![bar(1, dec!(100)), bar(1, dec!(101))];
        assert!(matches!(
            validate_series(&bars),
            Err(BacktestError::NonMonotonicTimestamps { index: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let bars = vec![bar(1, dec!(100)), bar(2, dec!(-5))];
        assert!(matches!(
            validate_series(&bars),
            Err(BacktestError::InvalidBar { timestamp: 2, .. })
        ));
    }

    #[test]
    fn test_validate_accepts_ordered_series() {
        let bars = vec![bar(1, dec!(100)), bar(2, dec!(101)), bar(3, dec!(99))];
        assert!(validate_series(&bars).is_ok());
    }
}
