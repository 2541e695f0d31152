use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A tercile bucket applied independently to mean return and to volatility.
///
/// Each tier maps to a half-open numeric interval derived from the
/// cross-sectional p40/p75 quantiles: Low = `[-inf, p40)`,
/// Medium = `[p40, p75)`, High = `[p75, +inf)`. A value exactly equal to a
/// boundary belongs to the upper tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Resolves this tier into its half-open `[lower, upper)` interval given
    /// the p40/p75 cut points.
    pub fn interval(&self, p40: f64, p75: f64) -> (f64, f64) {
        match self {
            Tier::Low => (f64::NEG_INFINITY, p40),
            Tier::Medium => (p40, p75),
            Tier::High => (p75, f64::INFINITY),
        }
    }

    /// True when `value` falls inside this tier's interval.
    pub fn contains(&self, value: f64, p40: f64, p75: f64) -> bool {
        let (lower, upper) = self.interval(p40, p75);
        value >= lower && value < upper
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => write!(f, "Low"),
            Tier::Medium => write!(f, "Medium"),
            Tier::High => write!(f, "High"),
        }
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Tier::Low),
            "medium" | "med" => Ok(Tier::Medium),
            "high" => Ok(Tier::High),
            other => Err(CoreError::InvalidInput(
                "tier".to_string(),
                format!("expected low, medium or high, got '{other}'"),
            )),
        }
    }
}
