use thiserror::Error;

/// Errors raised by individual model adapters.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("model '{model_id}' unavailable: {reason}")]
    ModelUnavailable { model_id: String, reason: String },
}

/// Errors raised when blending model outputs into one forecast.
#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error("invalid ensemble weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("no model produced an estimate for bar at timestamp {timestamp}")]
    NoAvailableModel { timestamp: i64 },
}

/// Errors raised while mapping a forecast to a trading action.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("missing indicator '{name}' required by the active rule set")]
    MissingIndicator { name: String },
}

/// Errors raised by a walk-forward evaluation run.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("backtest needs at least 2 bars, got {got}")]
    NotEnoughBars { got: usize },

    #[error("bar timestamps must be strictly increasing (violation at index {index})")]
    NonMonotonicTimestamps { index: usize },

    #[error("bar at timestamp {timestamp} is invalid: {reason}")]
    InvalidBar { timestamp: i64, reason: String },

    #[error("no usable bars recorded ({skipped} skipped)")]
    EmptyRun { skipped: usize },

    #[error("run cancelled after {completed} completed bars")]
    Cancelled { completed: usize },

    // Missing indicators are a supplier/config mismatch, not transient data loss,
    // so they abort the run instead of being counted as a skip.
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Ensemble(#[from] EnsembleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_names_the_model() {
        let err = PredictionError::ModelUnavailable {
            model_id: "sequence".to_string(),
            reason: "history buffer cold".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sequence"));
        assert!(msg.contains("history buffer cold"));
    }

    #[test]
    fn test_missing_indicator_names_the_indicator() {
        let err = SignalError::MissingIndicator {
            name: "rsi".to_string(),
        };
        assert!(err.to_string().contains("rsi"));
    }

    #[test]
    fn test_signal_error_converts_to_backtest_error() {
        let err: BacktestError = SignalError::MissingIndicator {
            name: "rsi".to_string(),
        }
        .into();
        assert!(matches!(err, BacktestError::Signal(_)));
    }
}
