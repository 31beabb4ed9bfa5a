use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Price Range
// ============================================================================

/// Typical price bounds for a procedure, stored as `[low, high]`.
///
/// Deserialization rejects ranges where `low > high`, so a stored document
/// that breaks the invariant is treated as corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    low: f64,
    high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Result<Self, String> {
        if !low.is_finite() || !high.is_finite() {
            return Err(format!("price range bounds must be finite: [{low}, {high}]"));
        }
        if low > high {
            return Err(format!("price range low {low} exceeds high {high}"));
        }
        Ok(Self { low, high })
    }

    /// For literal bounds already known to be ordered.
    pub(crate) fn new_unchecked(low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.low && amount <= self.high
    }
}

impl TryFrom<(f64, f64)> for PriceRange {
    type Error = String;

    fn try_from((low, high): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.low, range.high)
    }
}

// ============================================================================
// Risk Level
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{label}")
    }
}

// ============================================================================
// Procedure
// ============================================================================

/// Catalogue item. Seed data only; never created or deleted at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub category: String,
    pub duration_min: u32,
    pub downtime_days: u32,
    pub price_range: PriceRange,
    /// Months between repeat treatments; 0 (or absent) means it does not repeat.
    #[serde(default)]
    pub repeat_every_months: u32,
    pub risk_level: RiskLevel,
    pub overview: String,
    #[serde(default)]
    pub aftercare: Vec<String>,
    #[serde(default)]
    pub misconceptions: Vec<String>,
}

impl Procedure {
    pub fn repeats(&self) -> bool {
        self.repeat_every_months > 0
    }

    /// One-line summary: duration, downtime, cadence and risk.
    pub fn meta_line(&self) -> String {
        let cadence = if self.repeats() {
            format!("Repeat ~ every {} months", self.repeat_every_months)
        } else {
            "No repeat".to_string()
        };
        format!(
            "{} min · {} d downtime · {} · Risk: {}",
            self.duration_min, self.downtime_days, cadence, self.risk_level
        )
    }
}
