mod combined;
mod direction;
mod prediction;
mod signal;
mod weights;

pub use combined::CombinedForecast;
pub use direction::{Direction, DirectionPolicy};
pub use prediction::ModelPrediction;
pub use signal::{LivePrediction, Signal, SignalAction};
pub use weights::EnsembleWeights;
