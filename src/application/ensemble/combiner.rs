use crate::domain::errors::EnsembleError;
use crate::domain::forecast::{CombinedForecast, DirectionPolicy, EnsembleWeights, ModelPrediction};

/// Blends the available model estimates into one forecast.
///
/// Models that failed with `ModelUnavailable` are simply absent from
/// `predictions`; their weight is redistributed proportionally across the
/// survivors. Pure and stateless: identical inputs always produce an
/// identical forecast.
pub fn combine(
    predictions: &[ModelPrediction],
    weights: &EnsembleWeights,
    timestamp: i64,
    current_price: f64,
    policy: &DirectionPolicy,
) -> Result<CombinedForecast, EnsembleError> {
    // A NaN or infinite estimate is treated the same as an unavailable
    // model: it cannot feed the blend, and its weight is redistributed.
    let available: Vec<&str> = predictions
        .iter()
        .filter(|p| p.estimate.is_finite())
        .map(|p| p.model_id.as_str())
        .collect();

    // An empty prediction set and an all-zero-weight subset are the same
    // condition: nothing can form a forecast for this bar.
    let renormalized = weights
        .renormalized_for(&available)
        .ok_or(EnsembleError::NoAvailableModel { timestamp })?;

    let blended_price: f64 = predictions
        .iter()
        .filter_map(|p| renormalized.get(&p.model_id).map(|w| w * p.estimate))
        .sum();

    Ok(CombinedForecast {
        timestamp,
        current_price,
        blended_price,
        direction: policy.classify(blended_price, current_price),
    })
}
