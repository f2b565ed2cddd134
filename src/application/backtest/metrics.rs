use crate::domain::errors::BacktestError;
use crate::domain::forecast::{Direction, SignalAction};
use serde::{Deserialize, Serialize};

/// One evaluated bar: what the pipeline predicted before the next close was
/// revealed, and what actually happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub timestamp: i64,
    pub predicted_price: f64,
    pub actual_price: f64,
    pub predicted_direction: Direction,
    pub actual_direction: Direction,
    pub action: SignalAction,
}

/// Final report of one walk-forward run. Immutable once built; a run with
/// skipped bars always reports the skip count alongside its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub records: Vec<PredictionRecord>,
    pub mse: f64,
    pub mae: f64,
    pub directional_accuracy: f64,
    pub baseline_accuracy: f64,
    pub passed: bool,
    pub evaluated_bars: usize,
    pub skipped_bars: usize,
}

/// Scores a completed accumulator. The verdict uses a strict `>` against the
/// baseline: accuracy exactly at the baseline fails.
pub fn score(
    records: Vec<PredictionRecord>,
    skipped_bars: usize,
    baseline_accuracy: f64,
) -> Result<BacktestResult, BacktestError> {
    if records.is_empty() {
        return Err(BacktestError::EmptyRun {
            skipped: skipped_bars,
        });
    }

    let n = records.len() as f64;
    let mse = records
        .iter()
        .map(|r| (r.actual_price - r.predicted_price).powi(2))
        .sum::<f64>()
        / n;
    let mae = records
        .iter()
        .map(|r| (r.actual_price - r.predicted_price).abs())
        .sum::<f64>()
        / n;

    let matches = records
        .iter()
        .filter(|r| r.predicted_direction == r.actual_direction)
        .count();
    let directional_accuracy = matches as f64 / n * 100.0;

    Ok(BacktestResult {
        evaluated_bars: records.len(),
        passed: directional_accuracy > baseline_accuracy,
        records,
        mse,
        mae,
        directional_accuracy,
        baseline_accuracy,
        skipped_bars,
    })
}
