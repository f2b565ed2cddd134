use super::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::forecast::ModelPrediction;
use crate::domain::market::FeatureFrame;

/// Deterministic test double implementing the same contract as a trained
/// model: always estimates `close * (1 + drift)`. Selected through `Mode::Mock`
/// in configuration, so the rest of the pipeline cannot tell it apart from a
/// real backend.
pub struct MockPredictor {
    id: String,
    drift: f64,
    confidence: Option<f64>,
}

impl MockPredictor {
    pub fn new(id: impl Into<String>, drift: f64) -> Self {
        Self {
            id: id.into(),
            drift,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

impl PricePredictor for MockPredictor {
    fn id(&self) -> &str {
        &self.id
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ModelPrediction, PredictionError> {
        let close = frame
            .bar
            .close_f64()
            .ok_or_else(|| PredictionError::ModelUnavailable {
                model_id: self.id.clone(),
                reason: "close price not representable as f64".to_string(),
            })?;

        let mut prediction = ModelPrediction::new(self.id.clone(), close * (1.0 + self.drift));
        if let Some(confidence) = self.confidence {
            prediction = prediction.with_confidence(confidence);
        }
        Ok(prediction)
    }
}
