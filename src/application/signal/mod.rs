use crate::domain::errors::SignalError;
use crate::domain::forecast::{CombinedForecast, Signal, SignalAction};
use crate::domain::market::FeatureVector;

/// Threshold and consistency rules mapping a forecast to an action.
///
/// Buy requires the blended price to clear `upper_trigger` AND the momentum
/// indicator to sit below its overbought level; Sell mirrors that on the
/// downside. Defaults reproduce the production rule set: 1.5% triggers with
/// an RSI 40/60 band.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRules {
    pub upper_trigger: f64,
    pub lower_trigger: f64,
    pub momentum_indicator: String,
    pub overbought: f64,
    pub oversold: f64,
    pub trigger_confidence: f64,
    pub hold_confidence: f64,
}

impl Default for SignalRules {
    fn default() -> Self {
        Self {
            upper_trigger: 1.015,
            lower_trigger: 0.985,
            momentum_indicator: "rsi".to_string(),
            overbought: 60.0,
            oversold: 40.0,
            trigger_confidence: 0.8,
            hold_confidence: 0.5,
        }
    }
}

impl SignalRules {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upper_trigger <= 1.0 {
            anyhow::bail!("upper trigger ratio must be > 1.0, got {}", self.upper_trigger);
        }
        if self.lower_trigger >= 1.0 || self.lower_trigger <= 0.0 {
            anyhow::bail!(
                "lower trigger ratio must be in (0.0, 1.0), got {}",
                self.lower_trigger
            );
        }
        if self.momentum_indicator.is_empty() {
            anyhow::bail!("momentum indicator name must not be empty");
        }
        for (name, value) in [
            ("trigger confidence", self.trigger_confidence),
            ("hold confidence", self.hold_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{} must be within [0.0, 1.0], got {}", name, value);
            }
        }
        Ok(())
    }
}

/// Pure function of (forecast, indicators) and the active rules; no hidden
/// state.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    rules: SignalRules,
}

impl SignalGenerator {
    pub fn new(rules: SignalRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SignalRules {
        &self.rules
    }

    pub fn generate(
        &self,
        forecast: &CombinedForecast,
        indicators: &FeatureVector,
    ) -> Result<Signal, SignalError> {
        let momentum = indicators.require(&self.rules.momentum_indicator)?;

        let upper = forecast.current_price * self.rules.upper_trigger;
        let lower = forecast.current_price * self.rules.lower_trigger;

        let (action, confidence) =
            if forecast.blended_price > upper && momentum < self.rules.overbought {
                (SignalAction::Buy, self.rules.trigger_confidence)
            } else if forecast.blended_price < lower && momentum > self.rules.oversold {
                (SignalAction::Sell, self.rules.trigger_confidence)
            } else {
                (SignalAction::Hold, self.rules.hold_confidence)
            };

        Ok(Signal {
            action,
            confidence,
            forecast: forecast.clone(),
            indicators: indicators.clone(),
        })
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(SignalRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{Direction, DirectionPolicy};

    fn forecast(current: f64, blended: f64) -> CombinedForecast {
        CombinedForecast {
            timestamp: 1,
            current_price: current,
            blended_price: blended,
            direction: DirectionPolicy::default().classify(blended, current),
        }
    }

    fn rsi(value: f64) -> FeatureVector {
        FeatureVector::new().with("rsi", value)
    }

    #[test]
    fn test_buy_when_above_trigger_and_gate_open() {
        let generator = SignalGenerator::default();
        let signal = generator.generate(&forecast(100.0, 102.0), &rsi(50.0)).unwrap();
        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.confidence, 0.8);
    }

    #[test]
    fn test_overbought_gate_blocks_buy() {
        let generator = SignalGenerator::default();
        let signal = generator.generate(&forecast(100.0, 102.0), &rsi(70.0)).unwrap();
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.confidence, 0.5);
    }

    #[test]
    fn test_sell_when_below_trigger_and_gate_open() {
        let generator = SignalGenerator::default();
        let signal = generator.generate(&forecast(100.0, 98.0), &rsi(50.0)).unwrap();
        assert_eq!(signal.action, SignalAction::Sell);
    }

    #[test]
    fn test_oversold_gate_blocks_sell() {
        let generator = SignalGenerator::default();
        let signal = generator.generate(&forecast(100.0, 98.0), &rsi(30.0)).unwrap();
        assert_eq!(signal.action, SignalAction::Hold);
    }

    #[test]
    fn test_inside_band_holds() {
        let generator = SignalGenerator::default();
        let signal = generator.generate(&forecast(100.0, 100.5), &rsi(50.0)).unwrap();
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.forecast.direction, Direction::Up);
    }

    #[test]
    fn test_missing_momentum_indicator_fails() {
        let generator = SignalGenerator::default();
        let err = generator
            .generate(&forecast(100.0, 102.0), &FeatureVector::new())
            .unwrap_err();
        assert!(matches!(err, SignalError::MissingIndicator { .. }));
        assert!(err.to_string().contains("rsi"));
    }

    #[test]
    fn test_rules_validation() {
        let mut rules = SignalRules::default();
        assert!(rules.validate().is_ok());

        rules.upper_trigger = 0.99;
        assert!(rules.validate().is_err());

        rules = SignalRules {
            lower_trigger: 1.01,
            ..SignalRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_confidence_outside_unit_interval_is_rejected() {
        let rules = SignalRules {
            trigger_confidence: 1.5,
            ..SignalRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = SignalRules {
            hold_confidence: -0.1,
            ..SignalRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = SignalRules {
            trigger_confidence: f64::NAN,
            ..SignalRules::default()
        };
        assert!(rules.validate().is_err());
    }
}
