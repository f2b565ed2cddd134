use crate::domain::errors::EnsembleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-model blending weights, validated at construction: finite,
/// non-negative, at least one positive. Stored normalized to sum 1.0 so a
/// weight mapping is always directly usable as blend coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    weights: BTreeMap<String, f64>,
}

impl EnsembleWeights {
    pub fn new(raw: BTreeMap<String, f64>) -> Result<Self, EnsembleError> {
        if raw.is_empty() {
            return Err(EnsembleError::InvalidWeights {
                reason: "weight mapping is empty".to_string(),
            });
        }

        let mut sum = 0.0;
        for (model_id, weight) in &raw {
            if !weight.is_finite() {
                return Err(EnsembleError::InvalidWeights {
                    reason: format!("weight for '{}' is not finite", model_id),
                });
            }
            if *weight < 0.0 {
                return Err(EnsembleError::InvalidWeights {
                    reason: format!("weight for '{}' is negative: {}", model_id, weight),
                });
            }
            sum += weight;
        }

        if sum <= 0.0 {
            return Err(EnsembleError::InvalidWeights {
                reason: "all weights are zero".to_string(),
            });
        }

        let weights = raw.into_iter().map(|(id, w)| (id, w / sum)).collect();
        Ok(Self { weights })
    }

    /// Convenience constructor for (model_id, weight) pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, EnsembleError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(id, w)| (id.into(), w)).collect())
    }

    pub fn get(&self, model_id: &str) -> f64 {
        self.weights.get(model_id).copied().unwrap_or(0.0)
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Renormalizes the subset of weights for the models available on this
    /// bar so they sum to 1.0. Redistribution is proportional: a model's
    /// absence never changes the relative weighting among the rest. Returns
    /// None when the available subset carries no positive weight.
    pub fn renormalized_for(&self, available: &[&str]) -> Option<BTreeMap<String, f64>> {
        let subset_sum: f64 = available.iter().map(|id| self.get(id)).sum();
        if subset_sum <= 0.0 {
            return None;
        }

        Some(
            available
                .iter()
                .map(|id| (id.to_string(), self.get(id) / subset_sum))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_normalized_at_construction() {
        let weights = EnsembleWeights::from_pairs([("a", 3.0), ("b", 1.0)]).unwrap();
        assert!((weights.get("a") - 0.75).abs() < 1e-12);
        assert!((weights.get("b") - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_mapping_rejected() {
        let err = EnsembleWeights::new(BTreeMap::new()).unwrap_err();
        assert!(matches!(err, EnsembleError::InvalidWeights { .. }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = EnsembleWeights::from_pairs([("a", 0.6), ("b", -0.1)]).unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let err = EnsembleWeights::from_pairs([("a", 0.0), ("b", 0.0)]).unwrap_err();
        assert!(matches!(err, EnsembleError::InvalidWeights { .. }));
    }

    #[test]
    fn test_renormalization_preserves_relative_weighting() {
        let weights =
            EnsembleWeights::from_pairs([("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
        let subset = weights.renormalized_for(&["a", "b"]).unwrap();
        // 0.5 : 0.3 stays 5 : 3 after redistribution.
        assert!((subset["a"] - 0.625).abs() < 1e-12);
        assert!((subset["b"] - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_single_survivor_takes_full_weight() {
        let weights = EnsembleWeights::from_pairs([("a", 0.6), ("b", 0.4)]).unwrap();
        let subset = weights.renormalized_for(&["a"]).unwrap();
        assert!((subset["a"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_subset_yields_none() {
        let weights = EnsembleWeights::from_pairs([("a", 1.0), ("b", 0.0)]).unwrap();
        assert!(weights.renormalized_for(&["b"]).is_none());
        assert!(weights.renormalized_for(&["unknown"]).is_none());
    }
}
