use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// The ensemble's blended forecast for one bar. Recomputed every bar, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedForecast {
    /// Timestamp of the bar the forecast was made on.
    pub timestamp: i64,
    pub current_price: f64,
    pub blended_price: f64,
    pub direction: Direction,
}
