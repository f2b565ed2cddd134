use super::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::forecast::ModelPrediction;
use crate::domain::market::FeatureFrame;
use ndarray::Array3;
use ort::session::Session;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info, warn};

pub const SEQUENCE_MODEL_ID: &str = "sequence";

/// Sequence model (exported LSTM) served through ONNX Runtime. Keeps a
/// rolling history buffer of feature rows; until the buffer holds a full
/// window the model is reported unavailable rather than guessing.
pub struct OnnxSequencePredictor {
    session: Option<Mutex<Session>>,
    model_path: PathBuf,
    history_buffer: Mutex<VecDeque<Vec<f32>>>,
    sequence_length: usize,
}

impl OnnxSequencePredictor {
    pub fn new(model_path: PathBuf, sequence_length: usize) -> Self {
        let mut predictor = Self {
            session: None,
            model_path,
            history_buffer: Mutex::new(VecDeque::new()),
            sequence_length,
        };
        predictor.load_model();
        predictor
    }

    fn load_model(&mut self) {
        if !self.model_path.exists() {
            warn!(
                "ONNX model file not found at {:?}. Sequence model will report unavailable.",
                self.model_path
            );
            return;
        }

        match Session::builder() {
            Ok(mut builder) => match builder.commit_from_file(&self.model_path) {
                Ok(session) => {
                    info!("Loaded ONNX sequence model from {:?}", self.model_path);
                    self.session = Some(Mutex::new(session));
                }
                Err(e) => {
                    error!("Failed to load ONNX model: {}", e);
                }
            },
            Err(e) => {
                error!("Failed to create ONNX session builder: {}", e);
            }
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> PredictionError {
        PredictionError::ModelUnavailable {
            model_id: SEQUENCE_MODEL_ID.to_string(),
            reason: reason.into(),
        }
    }

    fn push_history(&self, frame: &FeatureFrame) {
        let Some(row) = frame.to_model_row() else {
            warn!("Sequence model skipped a bar with non-representable prices");
            return;
        };
        let row: Vec<f32> = row.into_iter().map(|v| v as f32).collect();
        if let Ok(mut buffer) = self.history_buffer.lock() {
            if buffer.len() >= self.sequence_length {
                buffer.pop_front();
            }
            buffer.push_back(row);
        }
    }
}

impl PricePredictor for OnnxSequencePredictor {
    fn id(&self) -> &str {
        SEQUENCE_MODEL_ID
    }

    fn warmup(&self, frame: &FeatureFrame) {
        self.push_history(frame);
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ModelPrediction, PredictionError> {
        // The current bar is part of the visible window.
        self.push_history(frame);

        let mut session = match &self.session {
            Some(m) => m
                .lock()
                .map_err(|e| self.unavailable(format!("session lock failed: {}", e)))?,
            None => return Err(self.unavailable("model artifact not loaded")),
        };

        let buffer = self
            .history_buffer
            .lock()
            .map_err(|e| self.unavailable(format!("buffer lock failed: {}", e)))?;

        if buffer.len() < self.sequence_length {
            return Err(self.unavailable(format!(
                "history buffer cold ({}/{} bars)",
                buffer.len(),
                self.sequence_length
            )));
        }

        let feature_dim = buffer[0].len();
        let mut window = Array3::<f32>::zeros((1, self.sequence_length, feature_dim));
        for (i, row) in buffer.iter().enumerate() {
            if row.len() != feature_dim {
                return Err(self.unavailable(format!(
                    "inconsistent feature row width: {} vs {}",
                    row.len(),
                    feature_dim
                )));
            }
            for (j, value) in row.iter().enumerate() {
                window[[0, i, j]] = *value;
            }
        }

        let shape = vec![1, self.sequence_length, feature_dim];
        let input_value = ort::value::Value::from_array((shape.as_slice(), window.into_raw_vec()))
            .map_err(|e| self.unavailable(format!("input tensor creation failed: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| self.unavailable(format!("inference failed: {}", e)))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| self.unavailable("model produced no output"))?;
        let data = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| self.unavailable(format!("output extraction failed: {}", e)))?;
        let estimate = *data
            .1
            .iter()
            .next()
            .ok_or_else(|| self.unavailable("empty output tensor"))? as f64;

        Ok(ModelPrediction::new(SEQUENCE_MODEL_ID, estimate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{FeatureVector, PriceBar};
    use rust_decimal_macros::dec;

    fn frame(timestamp: i64) -> FeatureFrame {
        FeatureFrame::new(
            PriceBar {
                timestamp,
                open: dec!(100),
                high: dec!(101),
                low: dec!(99),
                close: dec!(100),
                volume: dec!(10),
            },
            FeatureVector::new().with("rsi", 50.0),
        )
    }

    #[test]
    fn test_missing_artifact_is_unavailable_not_neutral() {
        let predictor = OnnxSequencePredictor::new(PathBuf::from("non_existent.onnx"), 60);

        for i in 0..70 {
            let err = predictor.predict(&frame(i)).unwrap_err();
            let PredictionError::ModelUnavailable { model_id, .. } = err;
            assert_eq!(model_id, SEQUENCE_MODEL_ID);
        }
    }

    #[test]
    fn test_warmup_fills_history_buffer() {
        let predictor = OnnxSequencePredictor::new(PathBuf::from("non_existent.onnx"), 3);
        for i in 0..5 {
            predictor.warmup(&frame(i));
        }
        // Buffer is capped at the window length.
        assert_eq!(predictor.history_buffer.lock().unwrap().len(), 3);
    }
}
