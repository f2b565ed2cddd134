use serde::{Deserialize, Serialize};
use std::fmt;

/// Implied price direction of a forecast relative to the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Flat => write!(f, "FLAT"),
        }
    }
}

/// Tie-break policy for classifying a predicted (or realized) price against
/// the current price. `flat_epsilon = 0.0` means exact equality is Flat,
/// which matches the observed behavior of the system this replaces; a wider
/// band can be configured via FLAT_EPSILON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionPolicy {
    pub flat_epsilon: f64,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self { flat_epsilon: 0.0 }
    }
}

impl DirectionPolicy {
    pub fn new(flat_epsilon: f64) -> Self {
        Self {
            flat_epsilon: flat_epsilon.max(0.0),
        }
    }

    pub fn classify(&self, price: f64, reference: f64) -> Direction {
        let diff = price - reference;
        if diff.abs() <= self.flat_epsilon {
            Direction::Flat
        } else if diff > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality_is_flat_by_default() {
        let policy = DirectionPolicy::default();
        assert_eq!(policy.classify(100.0, 100.0), Direction::Flat);
        assert_eq!(policy.classify(100.0001, 100.0), Direction::Up);
        assert_eq!(policy.classify(99.9999, 100.0), Direction::Down);
    }

    #[test]
    fn test_epsilon_band_widens_flat() {
        let policy = DirectionPolicy::new(0.5);
        assert_eq!(policy.classify(100.4, 100.0), Direction::Flat);
        assert_eq!(policy.classify(100.6, 100.0), Direction::Up);
        assert_eq!(policy.classify(99.4, 100.0), Direction::Down);
    }

    #[test]
    fn test_negative_epsilon_is_clamped() {
        let policy = DirectionPolicy::new(-1.0);
        assert_eq!(policy.flat_epsilon, 0.0);
    }
}
