use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::prelude::*;

use tradecast::application::backtest::WalkForwardEvaluator;
use tradecast::application::ensemble::EnsembleContext;
use tradecast::config::Config;
use tradecast::domain::market::FeatureFrame;
use tradecast::infrastructure::feature_engineering::FeatureEngineering;
use tradecast::infrastructure::{csv_bars, mock};

const FOUR_HOURS_MS: i64 = 4 * 60 * 60 * 1_000;

#[derive(Parser)]
#[command(author, version, about = "Ensemble price forecasting and walk-forward evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit a live trading signal for the most recent bar
    Predict {
        /// CSV bar cache (timestamp,open,high,low,close,volume); synthetic
        /// bars are generated when omitted
        #[arg(long)]
        data: Option<PathBuf>,
        /// Overrides PAIR from the environment
        #[arg(long)]
        pair: Option<String>,
        #[arg(long, default_value_t = 300)]
        bars: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Replay the decision process over historical bars and score it
    Backtest {
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long, default_value_t = 500)]
        bars: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn load_frames(data: Option<&PathBuf>, bars: usize, seed: u64) -> Result<Vec<FeatureFrame>> {
    let bars = match data {
        Some(path) => csv_bars::load_bars(path)?,
        None => {
            let start = chrono::Utc::now().timestamp_millis() - bars as i64 * FOUR_HOURS_MS;
            mock::generate_bars(bars, start, FOUR_HOURS_MS, 100.0, seed)
        }
    };
    FeatureEngineering::annotate(bars)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let context = EnsembleContext::from_config(&config)?;

    match cli.command {
        Commands::Predict {
            data,
            pair,
            bars,
            seed,
        } => {
            let frames = load_frames(data.as_ref(), bars, seed)?;
            let pair = pair.unwrap_or_else(|| config.pair.clone());
            let live = context.signal_for_latest(&pair, &frames)?;
            println!("{}", serde_json::to_string_pretty(&live)?);
        }
        Commands::Backtest { data, bars, seed } => {
            let frames = load_frames(data.as_ref(), bars, seed)?;
            let mut evaluator =
                WalkForwardEvaluator::new(context, config.backtest.baseline_accuracy);
            let result = evaluator.run(&frames)?;

            println!("\n=== Backtest Report ({}) ===", config.pair);
            println!("Bars evaluated:       {}", result.evaluated_bars);
            println!("Bars skipped:         {}", result.skipped_bars);
            println!("MSE:                  {:.4}", result.mse);
            println!("MAE:                  {:.4}", result.mae);
            println!(
                "Directional accuracy: {:.2}%",
                result.directional_accuracy
            );
            if result.passed {
                println!("Verdict: PASS (baseline {:.1}%)", result.baseline_accuracy);
            } else {
                println!("Verdict: FAIL (baseline {:.1}%)", result.baseline_accuracy);
            }
        }
    }

    Ok(())
}
