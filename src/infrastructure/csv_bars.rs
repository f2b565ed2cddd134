//! Loads cached OHLCV bars from CSV files written by the data supplier.

use crate::domain::market::PriceBar;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvBarRecord {
    timestamp: String,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

/// Accepts epoch milliseconds, `YYYY-mm-dd HH:MM:SS` (the cache writer's
/// format) or RFC 3339.
fn parse_timestamp(raw: &str) -> Result<i64> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }
    anyhow::bail!("unrecognized timestamp format: '{}'", raw)
}

pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("failed to open {:?}", path))?;

    let mut bars = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let record: CsvBarRecord =
            result.with_context(|| format!("malformed bar record at line {}", line + 2))?;
        bars.push(PriceBar {
            timestamp: parse_timestamp(&record.timestamp)?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }

    info!("Loaded {} bars from {:?}", bars.len(), path);
    Ok(bars)
}
