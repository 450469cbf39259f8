//! # Row/Totals Aggregation
//!
//! Per-diameter sums over row collections. The same shape backs the
//! delivery-movement table, the remaining-quantity table and the per-niveau
//! designation tables: each row holds a value per diameter, and the footer
//! shows one total per diameter.
//!
//! Every requested diameter is initialized to zero even when no row mentions
//! it, so table columns stay stable regardless of the data.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use fer_core::aggregate::sum_text_rows;
//!
//! let row: BTreeMap<u32, String> = [(8, "2,5".to_string())].into_iter().collect();
//! let totals = sum_text_rows([&row], &[6, 8]);
//! assert_eq!(totals[&6], 0.0);
//! assert_eq!(totals[&8], 2.5);
//! ```

use std::collections::BTreeMap;

use crate::numfmt::parse_qty;

/// Sum rows whose quantities are locale-formatted decimal strings.
///
/// Missing or unreadable cell values count as zero. The result has exactly
/// one entry per requested diameter.
pub fn sum_text_rows<'a, I>(rows: I, diameters: &[u32]) -> BTreeMap<u32, f64>
where
    I: IntoIterator<Item = &'a BTreeMap<u32, String>>,
{
    let mut totals: BTreeMap<u32, f64> = diameters.iter().map(|&mm| (mm, 0.0)).collect();
    for row in rows {
        for &mm in diameters {
            if let Some(cell) = row.get(&mm) {
                if let Some(total) = totals.get_mut(&mm) {
                    *total += parse_qty(cell);
                }
            }
        }
    }
    totals
}

/// Sum rows whose quantities are already numeric.
///
/// Same zero-initialization guarantee as [`sum_text_rows`].
pub fn sum_numeric_rows<'a, I>(rows: I, diameters: &[u32]) -> BTreeMap<u32, f64>
where
    I: IntoIterator<Item = &'a BTreeMap<u32, f64>>,
{
    let mut totals: BTreeMap<u32, f64> = diameters.iter().map(|&mm| (mm, 0.0)).collect();
    for row in rows {
        for &mm in diameters {
            if let Some(&value) = row.get(&mm) {
                if let Some(total) = totals.get_mut(&mm) {
                    *total += value;
                }
            }
        }
    }
    totals
}

/// Grand total across all diameters of a totals map.
pub fn sum_all(totals: &BTreeMap<u32, f64>) -> f64 {
    totals.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[(u32, &str)]) -> BTreeMap<u32, String> {
        cells
            .iter()
            .map(|&(mm, v)| (mm, v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_requested_diameter_has_a_key() {
        let rows = [text_row(&[(8, "1,0")])];
        let totals = sum_text_rows(rows.iter(), &[6, 8, 10, 12]);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[&6], 0.0);
        assert_eq!(totals[&10], 0.0);
        assert_eq!(totals[&12], 0.0);
    }

    #[test]
    fn test_empty_rows_yield_zeros() {
        let totals = sum_text_rows(std::iter::empty(), &[6, 8, 10]);
        assert_eq!(totals.len(), 3);
        assert!(totals.values().all(|&v| v == 0.0));
    }

    #[test]
    fn test_sums_accumulate_per_diameter() {
        let rows = [
            text_row(&[(8, "2,5"), (10, "1,5")]),
            text_row(&[(8, "0,5"), (12, "4")]),
            text_row(&[(8, "junk")]),
        ];
        let totals = sum_text_rows(rows.iter(), &[8, 10, 12]);
        assert_eq!(totals[&8], 3.0);
        assert_eq!(totals[&10], 1.5);
        assert_eq!(totals[&12], 4.0);
    }

    #[test]
    fn test_diameters_absent_from_request_are_ignored() {
        let rows = [text_row(&[(8, "2,5"), (40, "9")])];
        let totals = sum_text_rows(rows.iter(), &[8]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&8], 2.5);
    }

    #[test]
    fn test_numeric_rows() {
        let rows: Vec<BTreeMap<u32, f64>> = vec![
            [(6, 44.0), (8, 62.0)].into_iter().collect(),
            [(8, 22.0), (10, 34.0)].into_iter().collect(),
        ];
        let totals = sum_numeric_rows(rows.iter(), &[6, 8, 10, 12]);
        assert_eq!(totals[&6], 44.0);
        assert_eq!(totals[&8], 84.0);
        assert_eq!(totals[&10], 34.0);
        assert_eq!(totals[&12], 0.0);
        assert_eq!(sum_all(&totals), 162.0);
    }
}
