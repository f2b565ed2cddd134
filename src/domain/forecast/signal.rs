use super::combined::CombinedForecast;
use crate::domain::market::FeatureVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
            SignalAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// One bar's trading decision: the action, its confidence, the forecast it
/// was derived from and the indicator snapshot consulted by the rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    pub confidence: f64,
    pub forecast: CombinedForecast,
    pub indicators: FeatureVector,
}

/// Serving-layer record for a live prediction on the most recent bar. Shaped
/// for direct JSON serialization; the HTTP framing around it is not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePrediction {
    pub pair: String,
    pub prediction: SignalAction,
    pub current_price: f64,
    pub target_price: f64,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_prediction_serializes_with_named_fields() {
        let record = LivePrediction {
            pair: "BTC/USDT".to_string(),
            prediction: SignalAction::Buy,
            current_price: 100.0,
            target_price: 102.0,
            confidence: 0.8,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pair"], "BTC/USDT");
        assert_eq!(json["prediction"], "Buy");
        assert_eq!(json["target_price"], 102.0);
    }
}
