use crate::domain::errors::PredictionError;
use crate::domain::forecast::ModelPrediction;
use crate::domain::market::FeatureFrame;

/// Capability every forecasting model exposes to the ensemble: given the
/// feature context visible at the current bar, estimate the next bar's close.
///
/// A model that cannot produce a value (artifact not loaded, history buffer
/// still cold, malformed input shape) fails with `ModelUnavailable` naming
/// itself; it never returns a placeholder estimate.
pub trait PricePredictor: Send + Sync {
    /// Stable identifier, also the key into `EnsembleWeights`.
    fn id(&self) -> &str;

    /// Feed one bar of context without requesting an estimate. Sequence
    /// models use this to fill their history buffer; stateless models ignore
    /// it.
    fn warmup(&self, _frame: &FeatureFrame) {}

    fn predict(&self, frame: &FeatureFrame) -> Result<ModelPrediction, PredictionError>;
}
