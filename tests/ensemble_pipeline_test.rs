use std::path::PathBuf;

use tradecast::application::backtest::WalkForwardEvaluator;
use tradecast::application::ensemble::EnsembleContext;
use tradecast::config::{BacktestEnvConfig, Config, Mode, ModelEnvConfig, SignalEnvConfig};
use tradecast::domain::forecast::SignalAction;
use tradecast::infrastructure::feature_engineering::FeatureEngineering;
use tradecast::infrastructure::mock;

fn mock_config() -> Config {
    Config {
        mode: Mode::Mock,
        pair: "BTC/USDT".to_string(),
        model: ModelEnvConfig {
            sequence_model_path: PathBuf::from("models/sequence.onnx"),
            forest_model_path: PathBuf::from("models/forest.json"),
            sequence_length: 60,
            sequence_weight: 0.6,
            forest_weight: 0.4,
            mock_drift: 0.02,
        },
        signal: SignalEnvConfig {
            upper_trigger: 1.015,
            lower_trigger: 0.985,
            momentum_indicator: "rsi".to_string(),
            overbought: 60.0,
            oversold: 40.0,
            trigger_confidence: 0.8,
            hold_confidence: 0.5,
        },
        backtest: BacktestEnvConfig {
            baseline_accuracy: 55.0,
            flat_epsilon: 0.0,
        },
    }
}

#[test]
fn test_mock_mode_pipeline_end_to_end() {
    let config = mock_config();
    let context = EnsembleContext::from_config(&config).unwrap();

    let bars = mock::generate_bars(300, 1_600_000_000_000, 14_400_000, 100.0, 42);
    let frames = FeatureEngineering::annotate(bars).unwrap();

    let mut evaluator = WalkForwardEvaluator::new(context, config.backtest.baseline_accuracy);
    let result = evaluator.run(&frames).unwrap();

    assert_eq!(result.evaluated_bars + result.skipped_bars, 299);
    assert_eq!(result.skipped_bars, 0);
    assert!(result.directional_accuracy >= 0.0);
    assert!(result.directional_accuracy <= 100.0);
    assert!(result.mse >= 0.0);
    assert!(result.mae >= 0.0);
}

#[test]
fn test_live_prediction_from_config() {
    let config = mock_config();
    let context = EnsembleContext::from_config(&config).unwrap();

    let bars = mock::generate_bars(100, 1_600_000_000_000, 14_400_000, 100.0, 7);
    let frames = FeatureEngineering::annotate(bars).unwrap();

    let live = context.signal_for_latest(&config.pair, &frames).unwrap();
    assert_eq!(live.pair, "BTC/USDT");
    // Drift of +2% always clears the 1.5% trigger; the RSI gate decides
    // between Buy and Hold.
    assert!(matches!(live.prediction, SignalAction::Buy | SignalAction::Hold));
    assert!(live.confidence >= 0.5);
    assert!(live.target_price > live.current_price);

    let json = serde_json::to_value(&live).unwrap();
    for field in [
        "pair",
        "prediction",
        "current_price",
        "target_price",
        "confidence",
        "timestamp",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
}

#[test]
fn test_invalid_trigger_ratio_rejected_at_construction() {
    let mut config = mock_config();
    config.signal.upper_trigger = 0.9;
    assert!(EnsembleContext::from_config(&config).is_err());
}

#[test]
fn test_trained_mode_without_artifacts_skips_every_bar() {
    // No model files on disk: both backends must report unavailable and the
    // run must surface EmptyRun instead of fabricated metrics.
    let mut config = mock_config();
    config.mode = Mode::Trained;
    config.model.sequence_model_path = PathBuf::from("does/not/exist.onnx");
    config.model.forest_model_path = PathBuf::from("does/not/exist.json");

    let context = EnsembleContext::from_config(&config).unwrap();
    let bars = mock::generate_bars(10, 1_000, 1_000, 100.0, 1);
    let frames = FeatureEngineering::annotate(bars).unwrap();

    let mut evaluator = WalkForwardEvaluator::new(context, 55.0);
    let err = evaluator.run(&frames).unwrap_err();
    assert!(err.to_string().contains("no usable bars"));
}
