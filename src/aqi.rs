//! Air-quality index classification
//!
//! The classifier is total: values 1 through 4 map to their own category and
//! everything else, including zero, negatives and anything above the
//! documented 1-5 scale, falls back to [`AqiCategory::Hazardous`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    Hazardous,
}

impl AqiCategory {
    /// Classify an integer index. First match wins; anything unmatched is the worst category.
    pub fn classify(index: i64) -> Self {
        match index {
            1 => AqiCategory::Good,
            2 => AqiCategory::Fair,
            3 => AqiCategory::Moderate,
            4 => AqiCategory::Poor,
            _ => AqiCategory::Hazardous,
        }
    }

    /// Classify a raw numeric reading. Non-integral and non-finite values are hazardous.
    pub fn classify_value(value: f64) -> Self {
        if !value.is_finite() || value.fract() != 0.0 {
            return AqiCategory::Hazardous;
        }
        if value < i64::MIN as f64 || value > i64::MAX as f64 {
            return AqiCategory::Hazardous;
        }
        Self::classify(value as i64)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Fair => "Fair",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Display colour as RGB
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            AqiCategory::Good => (0x4c, 0xaf, 0x50),      // Green
            AqiCategory::Fair => (0xff, 0xc1, 0x07),      // Amber
            AqiCategory::Moderate => (0xff, 0x98, 0x00),  // Orange
            AqiCategory::Poor => (0xff, 0x57, 0x22),      // Deep orange
            AqiCategory::Hazardous => (0xd3, 0x2f, 0x2f), // Red
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category label for an integer index
pub fn classify(index: i64) -> &'static str {
    AqiCategory::classify(index).label()
}
