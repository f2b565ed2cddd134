use super::predictor::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::forecast::ModelPrediction;
use crate::domain::market::FeatureFrame;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const FOREST_MODEL_ID: &str = "forest";

/// Gradient-boosted-tree stand-in: a smartcore random forest regressor
/// trained offline and serialized as JSON. Stateless per bar; each predict
/// call flattens the current feature frame into one input row.
pub struct ForestPredictor {
    model: Option<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>,
    model_path: PathBuf,
}

impl ForestPredictor {
    pub fn new(model_path: PathBuf) -> Self {
        let mut predictor = Self {
            model: None,
            model_path,
        };
        predictor.load_model();
        predictor
    }

    fn load_model(&mut self) {
        if !self.model_path.exists() {
            warn!(
                "Forest model file not found at {:?}. Predictor will report unavailable.",
                self.model_path
            );
            return;
        }

        match File::open(&self.model_path) {
            Ok(mut file) => {
                let mut buffer = Vec::new();
                if let Err(e) = file.read_to_end(&mut buffer) {
                    error!("Failed to read forest model file: {}", e);
                    return;
                }

                match serde_json::from_reader(std::io::Cursor::new(&buffer)) {
                    Ok(model) => {
                        info!("Loaded forest model from {:?}", self.model_path);
                        self.model = Some(model);
                    }
                    Err(e) => {
                        error!("Failed to deserialize forest model: {}", e);
                    }
                }
            }
            Err(e) => {
                error!("Failed to open forest model file: {}", e);
            }
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> PredictionError {
        PredictionError::ModelUnavailable {
            model_id: FOREST_MODEL_ID.to_string(),
            reason: reason.into(),
        }
    }
}

impl PricePredictor for ForestPredictor {
    fn id(&self) -> &str {
        FOREST_MODEL_ID
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<ModelPrediction, PredictionError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| self.unavailable("model artifact not loaded"))?;

        let row = frame
            .to_model_row()
            .ok_or_else(|| self.unavailable("bar prices not representable as f64"))?;
        let input = DenseMatrix::from_2d_vec(&vec![row])
            .map_err(|e| self.unavailable(format!("matrix creation failed: {}", e)))?;

        let predictions = model
            .predict(&input)
            .map_err(|e| self.unavailable(format!("prediction failed: {}", e)))?;
        let estimate = predictions
            .first()
            .copied()
            .ok_or_else(|| self.unavailable("no prediction returned"))?;

        Ok(ModelPrediction::new(FOREST_MODEL_ID, estimate))
    }
}
