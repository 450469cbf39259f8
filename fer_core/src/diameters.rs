//! # Diameter Range Model
//!
//! A report's quantity grid has one column per rebar diameter. The set of
//! known diameters starts from a fixed standard set and can grow one value at
//! a time past either end; only those boundary extensions can be removed
//! again, and only while they are still the extremity. The standard set is
//! permanent.
//!
//! The range is stored as a single sorted sequence with a provenance tag per
//! entry rather than two separate collections, which makes the
//! boundary-adjacency check a constant-time look at the first or last entry.
//!
//! Two starting shapes exist:
//! - [`DiameterRange::standard_run`]: the contiguous run 5..=21 mm used by the
//!   rapport creation flow
//! - [`DiameterRange::catalog`]: the fixed list of common structural sizes
//!   used by the niveau flows
//!
//! ## Example
//!
//! ```rust
//! use fer_core::diameters::DiameterRange;
//!
//! let mut range = DiameterRange::standard_run();
//! assert_eq!(range.min_known(), Some(5));
//!
//! assert_eq!(range.extend_before(), Some(4));
//! assert!(range.remove_boundary(4));
//! assert_eq!(range.min_known(), Some(5));
//!
//! // Standard values can never be removed.
//! assert!(!range.remove_boundary(5));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Fixed list of common structural rebar sizes, in millimetres.
pub const STANDARD_CATALOG: [u32; 11] = [6, 8, 10, 12, 14, 16, 20, 25, 32, 40, 50];

/// Bounds of the contiguous standard run used by the rapport flow.
pub const STANDARD_RUN_FIRST: u32 = 5;
pub const STANDARD_RUN_LAST: u32 = 21;

/// Where a known diameter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Part of the immutable standard set
    Standard,
    /// Added by the user past a boundary; removable while at the extremity
    Extra,
}

/// One known diameter and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiameterEntry {
    pub mm: u32,
    pub provenance: Provenance,
}

/// Ordered set of known diameters plus the subset currently selected for a
/// report. Invariants: entries sorted ascending, no duplicates, the standard
/// subset always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    entries: Vec<DiameterEntry>,
    selected: BTreeSet<u32>,
}

impl DiameterRange {
    /// The contiguous standard run 5..=21 mm, nothing selected.
    pub fn standard_run() -> Self {
        Self::from_standard((STANDARD_RUN_FIRST..=STANDARD_RUN_LAST).collect())
    }

    /// The fixed catalog of common structural sizes, nothing selected.
    pub fn catalog() -> Self {
        Self::from_standard(STANDARD_CATALOG.to_vec())
    }

    fn from_standard(mut mms: Vec<u32>) -> Self {
        mms.sort_unstable();
        mms.dedup();
        DiameterRange {
            entries: mms
                .into_iter()
                .map(|mm| DiameterEntry {
                    mm,
                    provenance: Provenance::Standard,
                })
                .collect(),
            selected: BTreeSet::new(),
        }
    }

    /// All known diameters, ascending.
    pub fn known(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.mm)
    }

    /// All known diameters collected into a vector, ascending.
    pub fn known_vec(&self) -> Vec<u32> {
        self.known().collect()
    }

    /// Number of known diameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no diameters are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest known diameter.
    pub fn min_known(&self) -> Option<u32> {
        self.entries.first().map(|e| e.mm)
    }

    /// Largest known diameter.
    pub fn max_known(&self) -> Option<u32> {
        self.entries.last().map(|e| e.mm)
    }

    /// True when `mm` is a known diameter.
    pub fn contains(&self, mm: u32) -> bool {
        self.entries.binary_search_by_key(&mm, |e| e.mm).is_ok()
    }

    /// True when `mm` belongs to the immutable standard subset.
    pub fn is_standard(&self, mm: u32) -> bool {
        self.entries
            .binary_search_by_key(&mm, |e| e.mm)
            .ok()
            .map(|i| self.entries[i].provenance == Provenance::Standard)
            .unwrap_or(false)
    }

    /// The selected subset, ascending.
    pub fn selected(&self) -> &BTreeSet<u32> {
        &self.selected
    }

    /// The selected subset collected into a vector, ascending.
    pub fn selected_vec(&self) -> Vec<u32> {
        self.selected.iter().copied().collect()
    }

    /// Flip membership of `mm` in the selection. Unknown diameters are
    /// ignored. Returns the new membership state.
    pub fn toggle(&mut self, mm: u32) -> bool {
        if !self.contains(mm) {
            return false;
        }
        if self.selected.remove(&mm) {
            false
        } else {
            self.selected.insert(mm);
            true
        }
    }

    /// Add one new diameter below the current minimum: the first integer
    /// under it that is not already known. Returns the added value, or `None`
    /// when the extension would go below 1 mm.
    pub fn extend_before(&mut self) -> Option<u32> {
        let min = self.min_known()?;
        let mut cand = min.checked_sub(1)?;
        while cand >= 1 && self.contains(cand) {
            cand = cand.checked_sub(1)?;
        }
        if cand < 1 {
            return None;
        }
        self.insert_extra(cand);
        Some(cand)
    }

    /// Add one new diameter above the current maximum: the first integer over
    /// it that is not already known. No upper bound.
    pub fn extend_after(&mut self) -> Option<u32> {
        let max = self.max_known()?;
        let mut cand = max + 1;
        while self.contains(cand) {
            cand += 1;
        }
        self.insert_extra(cand);
        Some(cand)
    }

    /// True when the current minimum is a removable extension.
    pub fn can_remove_first(&self) -> bool {
        self.entries
            .first()
            .map(|e| e.provenance == Provenance::Extra)
            .unwrap_or(false)
    }

    /// True when the current maximum is a removable extension.
    pub fn can_remove_last(&self) -> bool {
        self.entries
            .last()
            .map(|e| e.provenance == Provenance::Extra)
            .unwrap_or(false)
    }

    /// Remove `mm` from the known set, provided it is an extension value
    /// currently sitting at the minimum or maximum. Also drops it from the
    /// selection. Returns whether anything was removed; standard values and
    /// interior extensions are left untouched.
    pub fn remove_boundary(&mut self, mm: u32) -> bool {
        let at_boundary = self.min_known() == Some(mm) || self.max_known() == Some(mm);
        if !at_boundary {
            return false;
        }
        let Ok(idx) = self.entries.binary_search_by_key(&mm, |e| e.mm) else {
            return false;
        };
        if self.entries[idx].provenance != Provenance::Extra {
            return false;
        }
        self.entries.remove(idx);
        self.selected.remove(&mm);
        true
    }

    fn insert_extra(&mut self, mm: u32) {
        if let Err(idx) = self.entries.binary_search_by_key(&mm, |e| e.mm) {
            self.entries.insert(
                idx,
                DiameterEntry {
                    mm,
                    provenance: Provenance::Extra,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_run_shape() {
        let range = DiameterRange::standard_run();
        assert_eq!(range.min_known(), Some(5));
        assert_eq!(range.max_known(), Some(21));
        assert_eq!(range.len(), 17);
        assert!(range.selected().is_empty());
    }

    #[test]
    fn test_catalog_shape() {
        let range = DiameterRange::catalog();
        assert_eq!(range.known_vec(), STANDARD_CATALOG.to_vec());
    }

    #[test]
    fn test_toggle_keeps_selection_sorted() {
        let mut range = DiameterRange::catalog();
        assert!(range.toggle(12));
        assert!(range.toggle(6));
        assert!(range.toggle(20));
        assert_eq!(range.selected_vec(), vec![6, 12, 20]);

        assert!(!range.toggle(12));
        assert_eq!(range.selected_vec(), vec![6, 20]);

        // Unknown diameters cannot be selected.
        assert!(!range.toggle(7));
        assert_eq!(range.selected_vec(), vec![6, 20]);
    }

    #[test]
    fn test_extend_before_and_after() {
        let mut range = DiameterRange::standard_run();
        assert_eq!(range.extend_before(), Some(4));
        assert_eq!(range.extend_before(), Some(3));
        assert_eq!(range.min_known(), Some(3));

        assert_eq!(range.extend_after(), Some(22));
        assert_eq!(range.max_known(), Some(22));
    }

    #[test]
    fn test_extend_before_stops_at_one() {
        let mut range = DiameterRange::standard_run();
        for _ in 0..4 {
            assert!(range.extend_before().is_some());
        }
        assert_eq!(range.min_known(), Some(1));
        assert_eq!(range.extend_before(), None);
        assert_eq!(range.min_known(), Some(1));
    }

    #[test]
    fn test_extend_skips_known_values() {
        // Catalog has a gap between 6 and 8; extending below 6 must yield 5,
        // then 4, never colliding with known entries.
        let mut range = DiameterRange::catalog();
        assert_eq!(range.extend_before(), Some(5));
        assert_eq!(range.extend_before(), Some(4));
        assert_eq!(range.known_vec()[..3], [4, 5, 6]);
    }

    #[test]
    fn test_remove_boundary_restores_prior_set() {
        let mut range = DiameterRange::standard_run();
        let before = range.clone();

        let added = range.extend_before().unwrap();
        assert!(range.remove_boundary(added));
        assert_eq!(range, before);
    }

    #[test]
    fn test_remove_boundary_ignores_standard_values() {
        let mut range = DiameterRange::standard_run();
        let before = range.clone();
        assert!(!range.remove_boundary(5));
        assert!(!range.remove_boundary(21));
        assert_eq!(range, before);
    }

    #[test]
    fn test_remove_boundary_ignores_interior_extras() {
        let mut range = DiameterRange::standard_run();
        let four = range.extend_before().unwrap();
        let three = range.extend_before().unwrap();
        assert_eq!((three, four), (3, 4));

        // 4 is an extension but no longer the extremity.
        assert!(!range.remove_boundary(4));
        assert!(range.remove_boundary(3));
        assert!(range.remove_boundary(4));
        assert_eq!(range.min_known(), Some(5));
    }

    #[test]
    fn test_remove_boundary_clears_selection() {
        let mut range = DiameterRange::standard_run();
        let added = range.extend_after().unwrap();
        range.toggle(added);
        assert!(range.selected().contains(&added));

        assert!(range.remove_boundary(added));
        assert!(!range.selected().contains(&added));
    }

    #[test]
    fn test_can_remove_flags() {
        let mut range = DiameterRange::standard_run();
        assert!(!range.can_remove_first());
        assert!(!range.can_remove_last());

        range.extend_before();
        range.extend_after();
        assert!(range.can_remove_first());
        assert!(range.can_remove_last());
    }
}
