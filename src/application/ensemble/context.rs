use super::combiner::combine;
use crate::application::ml::{
    ForestPredictor, MockPredictor, OnnxSequencePredictor, PricePredictor,
};
use crate::application::signal::{SignalGenerator, SignalRules};
use crate::config::{Config, Mode};
use crate::domain::errors::{EnsembleError, PredictionError, SignalError};
use crate::domain::forecast::{
    CombinedForecast, DirectionPolicy, EnsembleWeights, LivePrediction, ModelPrediction, Signal,
};
use crate::domain::market::FeatureFrame;
use anyhow::Context;
use chrono::Utc;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::warn;

/// Explicitly constructed bundle of models, weights and rules. Replaces the
/// process-wide engine singleton of the system this supersedes: independent
/// backtest runs each hold their own context and share no mutable state.
pub struct EnsembleContext {
    models: Vec<Arc<dyn PricePredictor>>,
    weights: EnsembleWeights,
    direction_policy: DirectionPolicy,
    generator: SignalGenerator,
}

impl EnsembleContext {
    pub fn new(
        models: Vec<Arc<dyn PricePredictor>>,
        weights: EnsembleWeights,
        direction_policy: DirectionPolicy,
        generator: SignalGenerator,
    ) -> Self {
        for id in weights.model_ids() {
            if !models.iter().any(|m| m.id() == id) {
                warn!("Weight configured for unknown model '{}'", id);
            }
        }
        Self {
            models,
            weights,
            direction_policy,
            generator,
        }
    }

    /// Builds the context the configuration asks for. Mock and trained
    /// backends satisfy the same `PricePredictor` contract; the choice is
    /// made here, once, never by runtime type inspection.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rules = SignalRules {
            upper_trigger: config.signal.upper_trigger,
            lower_trigger: config.signal.lower_trigger,
            momentum_indicator: config.signal.momentum_indicator.clone(),
            overbought: config.signal.overbought,
            oversold: config.signal.oversold,
            trigger_confidence: config.signal.trigger_confidence,
            hold_confidence: config.signal.hold_confidence,
        };
        rules.validate()?;

        let (models, weights): (Vec<Arc<dyn PricePredictor>>, EnsembleWeights) = match config.mode
        {
            Mode::Mock => (
                vec![Arc::new(MockPredictor::new("mock", config.model.mock_drift))
                    as Arc<dyn PricePredictor>],
                EnsembleWeights::from_pairs([("mock", 1.0)])?,
            ),
            Mode::Trained => (
                vec![
                    Arc::new(OnnxSequencePredictor::new(
                        config.model.sequence_model_path.clone(),
                        config.model.sequence_length,
                    )) as Arc<dyn PricePredictor>,
                    Arc::new(ForestPredictor::new(config.model.forest_model_path.clone())),
                ],
                EnsembleWeights::from_pairs([
                    ("sequence", config.model.sequence_weight),
                    ("forest", config.model.forest_weight),
                ])?,
            ),
        };

        Ok(Self::new(
            models,
            weights,
            DirectionPolicy::new(config.backtest.flat_epsilon),
            SignalGenerator::new(rules),
        ))
    }

    pub fn direction_policy(&self) -> &DirectionPolicy {
        &self.direction_policy
    }

    /// Queries every configured model for this bar. Models run in parallel;
    /// each only reads the shared immutable frame. Unavailable models are
    /// logged and excluded; the combiner redistributes their weight.
    pub fn gather_predictions(&self, frame: &FeatureFrame) -> Vec<ModelPrediction> {
        self.models
            .par_iter()
            .filter_map(|model| match model.predict(frame) {
                Ok(prediction) => Some(prediction),
                Err(PredictionError::ModelUnavailable { model_id, reason }) => {
                    warn!("Model '{}' unavailable for bar: {}", model_id, reason);
                    None
                }
            })
            .collect()
    }

    /// Gather + combine for one bar.
    pub fn forecast_bar(
        &self,
        frame: &FeatureFrame,
        current_price: f64,
    ) -> Result<CombinedForecast, EnsembleError> {
        let predictions = self.gather_predictions(frame);
        combine(
            &predictions,
            &self.weights,
            frame.bar.timestamp,
            current_price,
            &self.direction_policy,
        )
    }

    pub fn generate_signal(
        &self,
        forecast: &CombinedForecast,
        frame: &FeatureFrame,
    ) -> Result<Signal, SignalError> {
        self.generator.generate(forecast, &frame.features)
    }

    /// Live path: warm sequence models over the history, then decide on the
    /// most recent bar. Returns the plain record the serving layer emits.
    pub fn signal_for_latest(
        &self,
        pair: &str,
        frames: &[FeatureFrame],
    ) -> anyhow::Result<LivePrediction> {
        let (latest, history) = frames
            .split_last()
            .context("no feature frames supplied for live prediction")?;

        for frame in history {
            for model in &self.models {
                model.warmup(frame);
            }
        }

        let current_price = latest
            .bar
            .close_f64()
            .context("latest close not representable as f64")?;
        let forecast = self.forecast_bar(latest, current_price)?;
        let signal = self.generate_signal(&forecast, latest)?;

        Ok(LivePrediction {
            pair: pair.to_string(),
            prediction: signal.action,
            current_price,
            target_price: forecast.blended_price,
            confidence: signal.confidence,
            timestamp: Utc::now(),
        })
    }
}
