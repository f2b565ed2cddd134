//! Synthetic bar generation for demos and tests.

use crate::domain::market::PriceBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Seeded random walk: same seed, same series.
pub fn generate_bars(
    count: usize,
    start_timestamp: i64,
    interval_ms: i64,
    base_price: f64,
    seed: u64,
) -> Vec<PriceBar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = base_price;
    let mut bars = Vec::with_capacity(count);

    for i in 0..count {
        let drift: f64 = rng.random_range(-0.01..0.01);
        let open = price;
        let close = price * (1.0 + drift);
        let high = open.max(close) * (1.0 + rng.random_range(0.0..0.002));
        let low = open.min(close) * (1.0 - rng.random_range(0.0..0.002));
        let volume = rng.random_range(10.0..100.0);

        bars.push(PriceBar {
            timestamp: start_timestamp + i as i64 * interval_ms,
            open: Decimal::from_f64(open).unwrap_or_default(),
            high: Decimal::from_f64(high).unwrap_or_default(),
            low: Decimal::from_f64(low).unwrap_or_default(),
            close: Decimal::from_f64(close).unwrap_or_default(),
            volume: Decimal::from_f64(volume).unwrap_or_default(),
        });

        price = close;
    }

    bars
}
