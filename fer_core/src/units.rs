//! # Unit Types
//!
//! Type-safe wrappers for the few physical quantities the tracker handles.
//! Simple newtype wrappers keep JSON serialization clean (just numbers) with
//! no runtime overhead.
//!
//! ## Metric Units (Primary)
//!
//! Rebar tracking uses metric units throughout:
//! - Length: metres (m)
//! - Mass: kilograms (kg), tonnes (1 T = 1000 kg)
//! - Diameter: millimetres (mm), always whole numbers
//!
//! ## Bar Weight
//!
//! The linear mass of a rebar follows the standard steel approximation
//! `kg/m = d² / 162` with `d` in millimetres. The divisor 162 is the
//! conventional rounded constant used on site paperwork, and must not be
//! replaced by a density-derived value: downstream tonnage columns are
//! compared against documents computed with exactly this rate.
//!
//! ## Example
//!
//! ```rust
//! use fer_core::units::{bar_weight, Tonnes};
//!
//! let kg = bar_weight(12, 10.0, 1);
//! assert!((kg.0 - 144.0 / 162.0 * 10.0).abs() < 1e-9);
//!
//! let t: Tonnes = kg.into();
//! assert!((t.0 - kg.0 / 1000.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in tonnes (1 T = 1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * 1000.0)
    }
}

/// Linear mass of a rebar in kg per metre: `d² / 162` with `d` in mm.
pub fn kg_per_meter(mm: u32) -> f64 {
    f64::from(mm * mm) / 162.0
}

/// Total mass of `count` bars of diameter `mm` and length `length_m` metres.
pub fn bar_weight(mm: u32, length_m: f64, count: u32) -> Kilograms {
    Kilograms(kg_per_meter(mm) * length_m * f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_uses_conventional_divisor() {
        assert!((kg_per_meter(12) - 144.0 / 162.0).abs() < 1e-12);
        assert!((kg_per_meter(8) - 64.0 / 162.0).abs() < 1e-12);
    }

    #[test]
    fn test_bar_weight_example() {
        // 12 mm, 10 m, one bar: 144/162 × 10 ≈ 8.888... kg
        let kg = bar_weight(12, 10.0, 1);
        assert!((kg.0 - 8.888888888888889).abs() < 1e-9);

        let t: Tonnes = kg.into();
        assert!((t.0 - 0.008888888888888889).abs() < 1e-12);
    }

    #[test]
    fn test_unit_conversions() {
        let kg: Kilograms = Tonnes(2.5).into();
        assert_eq!(kg.0, 2500.0);
        let t: Tonnes = Kilograms(500.0).into();
        assert_eq!(t.0, 0.5);
    }
}
