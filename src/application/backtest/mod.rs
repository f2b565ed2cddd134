mod evaluator;
mod metrics;

pub use evaluator::{RunState, WalkForwardEvaluator};
pub use metrics::{BacktestResult, PredictionRecord, score};
