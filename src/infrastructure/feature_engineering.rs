//! Streaming indicator supplier.
//!
//! Computes the named indicators the signal rules and models consume, one
//! bar at a time. Each bar's FeatureVector only ever sees closes up to and
//! including that bar, which is what keeps downstream evaluation free of
//! lookahead.

use crate::domain::market::{FeatureFrame, FeatureVector, PriceBar};
use anyhow::{Context, Result};
use ta::Next;
use ta::indicators::{
    AverageTrueRange, BollingerBands, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    SimpleMovingAverage,
};

pub struct FeatureEngineering {
    rsi: RelativeStrengthIndex,
    macd: MovingAverageConvergenceDivergence,
    sma_20: SimpleMovingAverage,
    sma_50: SimpleMovingAverage,
    sma_200: SimpleMovingAverage,
    bb: BollingerBands,
    atr: AverageTrueRange,
}

impl FeatureEngineering {
    pub fn new() -> Self {
        Self {
            rsi: RelativeStrengthIndex::new(14).unwrap(),
            macd: MovingAverageConvergenceDivergence::new(12, 26, 9).unwrap(),
            sma_20: SimpleMovingAverage::new(20).unwrap(),
            sma_50: SimpleMovingAverage::new(50).unwrap(),
            sma_200: SimpleMovingAverage::new(200).unwrap(),
            bb: BollingerBands::new(20, 2.0).unwrap(),
            atr: AverageTrueRange::new(14).unwrap(),
        }
    }

    pub fn update(&mut self, close: f64) -> FeatureVector {
        let macd = self.macd.next(close);
        let bb = self.bb.next(close);

        let mut features = FeatureVector::new();
        features.insert("rsi", self.rsi.next(close));
        features.insert("macd", macd.macd);
        features.insert("macd_signal", macd.signal);
        features.insert("macd_hist", macd.histogram);
        features.insert("sma_20", self.sma_20.next(close));
        features.insert("sma_50", self.sma_50.next(close));
        features.insert("sma_200", self.sma_200.next(close));
        features.insert("bb_upper", bb.upper);
        features.insert("bb_middle", bb.average);
        features.insert("bb_lower", bb.lower);
        features.insert("atr", self.atr.next(close));
        features
    }

    /// Annotates a bar series into feature frames, in order.
    pub fn annotate(bars: Vec<PriceBar>) -> Result<Vec<FeatureFrame>> {
        let mut engine = Self::new();
        bars.into_iter()
            .map(|bar| {
                let close = bar
                    .close_f64()
                    .with_context(|| format!("close at {} not representable", bar.timestamp))?;
                let features = engine.update(close);
                Ok(FeatureFrame::new(bar, features))
            })
            .collect()
    }
}

impl Default for FeatureEngineering {
    fn default() -> Self {
        Self::new()
    }
}
