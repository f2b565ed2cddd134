//! Model backend configuration: artifact locations and ensemble weights.

use super::env_parse;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    /// Exported LSTM, served through ONNX Runtime.
    pub sequence_model_path: PathBuf,
    /// Serialized smartcore random forest regressor.
    pub forest_model_path: PathBuf,
    /// History window the sequence model was trained on.
    pub sequence_length: usize,

    // Blend weights; renormalized by EnsembleWeights, so they only need to
    // be non-negative with a positive sum.
    pub sequence_weight: f64,
    pub forest_weight: f64,

    /// Per-bar drift of the mock backend (MODE=mock only).
    pub mock_drift: f64,
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let sequence_model_path = PathBuf::from(
            env::var("SEQUENCE_MODEL_PATH").unwrap_or_else(|_| "models/sequence.onnx".to_string()),
        );
        let forest_model_path = PathBuf::from(
            env::var("FOREST_MODEL_PATH").unwrap_or_else(|_| "models/forest.json".to_string()),
        );

        Ok(Self {
            sequence_model_path,
            forest_model_path,
            sequence_length: env_parse("SEQUENCE_LENGTH", 60)?,
            sequence_weight: env_parse("SEQUENCE_WEIGHT", 0.6)?,
            forest_weight: env_parse("FOREST_WEIGHT", 0.4)?,
            mock_drift: env_parse("MOCK_DRIFT", 0.02)?,
        })
    }
}
