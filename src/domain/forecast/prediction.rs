use serde::{Deserialize, Serialize};

/// One model's point estimate of the next bar's close, normalized by the
/// model adapter. Confidence is optional; models that expose none (e.g. plain
/// regressors) leave it unset and the pipeline never fabricates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub model_id: String,
    pub estimate: f64,
    pub confidence: Option<f64>,
}

impl ModelPrediction {
    pub fn new(model_id: impl Into<String>, estimate: f64) -> Self {
        Self {
            model_id: model_id.into(),
            estimate,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped_to_unit_interval() {
        assert_eq!(
            ModelPrediction::new("m", 1.0).with_confidence(1.7).confidence,
            Some(1.0)
        );
        assert_eq!(
            ModelPrediction::new("m", 1.0)
                .with_confidence(-0.2)
                .confidence,
            Some(0.0)
        );
    }
}
