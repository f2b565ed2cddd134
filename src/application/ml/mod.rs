mod forest_predictor;
mod mock_predictor;
mod onnx_predictor;
mod predictor;

pub use forest_predictor::ForestPredictor;
pub use mock_predictor::MockPredictor;
pub use onnx_predictor::OnnxSequencePredictor;
pub use predictor::PricePredictor;
