use super::metrics::{BacktestResult, PredictionRecord, score};
use crate::application::ensemble::EnsembleContext;
use crate::domain::errors::{BacktestError, EnsembleError};
use crate::domain::market::{FeatureFrame, validate_series};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Lifecycle of one evaluation run. `Completed` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Replays the combine/generate decision process bar by bar over historical
/// data, without lookahead: the decision for bar i is fully recorded before
/// bar i+1's close is read, and that close is used only to score the
/// decision, never to make it.
///
/// One evaluator drives one run; it owns the accumulator for the run's
/// lifetime and shares nothing with concurrent runs.
pub struct WalkForwardEvaluator {
    context: EnsembleContext,
    baseline_accuracy: f64,
    state: RunState,
    cancel: Arc<AtomicBool>,
}

impl WalkForwardEvaluator {
    pub fn new(context: EnsembleContext, baseline_accuracy: f64) -> Self {
        Self {
            context,
            baseline_accuracy,
            state: RunState::Idle,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Handle for cooperative cancellation. Takes effect between bar steps
    /// only, so a partially evaluated bar is never recorded.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run(&mut self, frames: &[FeatureFrame]) -> Result<BacktestResult, BacktestError> {
        if let Err(e) = validate_series(frames.iter().map(|f| &f.bar)) {
            self.state = RunState::Aborted;
            return Err(e);
        }

        self.state = RunState::Running;
        info!(
            "Starting walk-forward run over {} bars ({} eligible)",
            frames.len(),
            frames.len() - 1
        );

        let mut records: Vec<PredictionRecord> = Vec::with_capacity(frames.len() - 1);
        let mut skipped_bars = 0usize;

        // The last bar has no realized next close and is excluded.
        for (step, window) in frames.windows(2).enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                warn!("Run cancelled after {} bar steps", step);
                self.state = RunState::Aborted;
                return Err(BacktestError::Cancelled { completed: step });
            }

            let frame = &window[0];
            let Some(current_price) = frame.bar.close_f64() else {
                self.state = RunState::Aborted;
                return Err(BacktestError::InvalidBar {
                    timestamp: frame.bar.timestamp,
                    reason: "close not representable as f64".to_string(),
                });
            };

            let forecast = match self.context.forecast_bar(frame, current_price) {
                Ok(forecast) => forecast,
                Err(EnsembleError::NoAvailableModel { timestamp }) => {
                    debug!("No model available at timestamp {}, bar skipped", timestamp);
                    skipped_bars += 1;
                    continue;
                }
                Err(e) => {
                    self.state = RunState::Aborted;
                    return Err(e.into());
                }
            };

            let signal = match self.context.generate_signal(&forecast, frame) {
                Ok(signal) => signal,
                Err(e) => {
                    self.state = RunState::Aborted;
                    return Err(e.into());
                }
            };

            // Decision is final here. Only now is the realized next close
            // revealed, and it feeds scoring exclusively.
            let next_bar = &window[1].bar;
            let Some(actual_price) = next_bar.close_f64() else {
                self.state = RunState::Aborted;
                return Err(BacktestError::InvalidBar {
                    timestamp: next_bar.timestamp,
                    reason: "close not representable as f64".to_string(),
                });
            };
            let actual_direction = self
                .context
                .direction_policy()
                .classify(actual_price, current_price);

            records.push(PredictionRecord {
                timestamp: frame.bar.timestamp,
                predicted_price: forecast.blended_price,
                actual_price,
                predicted_direction: forecast.direction,
                actual_direction,
                action: signal.action,
            });
        }

        match score(records, skipped_bars, self.baseline_accuracy) {
            Ok(result) => {
                self.state = RunState::Completed;
                info!(
                    "Walk-forward run completed: {} bars evaluated, {} skipped, accuracy {:.2}% ({})",
                    result.evaluated_bars,
                    result.skipped_bars,
                    result.directional_accuracy,
                    if result.passed { "PASS" } else { "FAIL" }
                );
                Ok(result)
            }
            Err(e) => {
                self.state = RunState::Aborted;
                Err(e)
            }
        }
    }
}
