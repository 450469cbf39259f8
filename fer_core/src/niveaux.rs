//! # Niveaux and Derived Totals
//!
//! A building level ("niveau") groups designation rows — semelles, poteaux,
//! dalles and the like — each carrying a bar count plus a length quantity and
//! a weight per diameter. Totals are always re-derived from the row list for
//! the level's declared diameter subset, never stored.
//!
//! The recap view unions the diameters of every level, computes per-level
//! totals over that shared column set, then a grand total over all rows, and
//! finally a single all-diameter tonnage figure.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{sum_all, sum_numeric_rows};

/// Draft niveau captured by the project wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NiveauRow {
    pub id: Uuid,
    pub name: String,
    pub note: String,
    /// Active diameters for this level, sorted ascending.
    pub selected_mms: Vec<u32>,
    pub sous_traitants: Vec<String>,
}

impl NiveauRow {
    pub fn new() -> Self {
        NiveauRow {
            id: Uuid::new_v4(),
            name: String::new(),
            note: String::new(),
            selected_mms: Vec::new(),
            sous_traitants: Vec::new(),
        }
    }

    /// Flip membership of `mm` in the level's active diameters, keeping the
    /// list sorted and free of duplicates.
    pub fn toggle_mm(&mut self, mm: u32) {
        let mut set: BTreeSet<u32> = self.selected_mms.iter().copied().collect();
        if !set.remove(&mm) {
            set.insert(mm);
        }
        self.selected_mms = set.into_iter().collect();
    }

    /// Add a sous-traitant name. Leading/trailing whitespace is trimmed;
    /// blank and duplicate entries are rejected. Returns whether it was added.
    pub fn add_sous_traitant(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() || self.sous_traitants.iter().any(|st| st == name) {
            return false;
        }
        self.sous_traitants.push(name.to_string());
        true
    }

    /// Remove the sous-traitant at `idx`, ignoring out-of-range indices.
    pub fn remove_sous_traitant(&mut self, idx: usize) {
        if idx < self.sous_traitants.len() {
            self.sous_traitants.remove(idx);
        }
    }
}

impl Default for NiveauRow {
    fn default() -> Self {
        NiveauRow::new()
    }
}

/// One designation row of a level's totals table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationRow {
    pub id: String,
    pub designation: String,
    /// Bar count; absent for rows where it does not apply.
    pub nb: Option<f64>,
    /// Total length in metres per diameter.
    pub qty_by_mm: BTreeMap<u32, f64>,
    /// Tonnage per diameter.
    pub poids_by_mm: BTreeMap<u32, f64>,
}

/// Quantity and weight totals per diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub qty: BTreeMap<u32, f64>,
    pub poids: BTreeMap<u32, f64>,
}

impl Totals {
    /// Sum `rows` over `diameters`. Every requested diameter gets a key, even
    /// when no row mentions it.
    pub fn compute(rows: &[DesignationRow], diameters: &[u32]) -> Self {
        Totals {
            qty: sum_numeric_rows(rows.iter().map(|r| &r.qty_by_mm), diameters),
            poids: sum_numeric_rows(rows.iter().map(|r| &r.poids_by_mm), diameters),
        }
    }
}

/// A level with its designation rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NiveauTotal {
    pub id: String,
    pub niveau_name: String,
    pub note: String,
    pub sous_traitants: Vec<String>,
    pub diametres: Vec<u32>,
    pub rows: Vec<DesignationRow>,
}

impl NiveauTotal {
    /// The level's declared diameters, sorted ascending.
    pub fn sorted_mms(&self) -> Vec<u32> {
        let mut mms = self.diametres.clone();
        mms.sort_unstable();
        mms
    }

    /// Derived totals over the level's own diameter subset.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.rows, &self.sorted_mms())
    }
}

/// The full rebar totals document for a rapport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalFerraillage {
    pub rapport_id: String,
    pub chantier_name: String,
    pub niveaux: Vec<NiveauTotal>,
}

/// One line of the recap table: a level's name with its totals over the
/// shared diameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct RecapLine {
    pub id: String,
    pub name: String,
    pub totals: Totals,
}

impl TotalFerraillage {
    /// Union of every level's diameters, sorted ascending.
    pub fn all_mms(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .niveaux
            .iter()
            .flat_map(|n| n.diametres.iter().copied())
            .collect();
        set.into_iter().collect()
    }

    /// Per-level totals over the shared diameter set. Unnamed levels display
    /// as an em dash.
    pub fn recap_lines(&self) -> Vec<RecapLine> {
        let all_mms = self.all_mms();
        self.niveaux
            .iter()
            .map(|n| RecapLine {
                id: n.id.clone(),
                name: if n.niveau_name.is_empty() {
                    "—".to_string()
                } else {
                    n.niveau_name.clone()
                },
                totals: Totals::compute(&n.rows, &all_mms),
            })
            .collect()
    }

    /// Grand totals over every row of every level.
    pub fn grand_totals(&self) -> Totals {
        let all_rows: Vec<DesignationRow> = self
            .niveaux
            .iter()
            .flat_map(|n| n.rows.iter().cloned())
            .collect();
        Totals::compute(&all_rows, &self.all_mms())
    }

    /// Total weight across all diameters and levels, in tonnes.
    pub fn total_poids(&self) -> f64 {
        sum_all(&self.grand_totals().poids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, nb: Option<f64>, qty: &[(u32, f64)], poids: &[(u32, f64)]) -> DesignationRow {
        DesignationRow {
            id: id.to_string(),
            designation: format!("Designation {id}"),
            nb,
            qty_by_mm: qty.iter().copied().collect(),
            poids_by_mm: poids.iter().copied().collect(),
        }
    }

    fn sample() -> TotalFerraillage {
        TotalFerraillage {
            rapport_id: "RAPPORT-001".to_string(),
            chantier_name: "Chantier A".to_string(),
            niveaux: vec![
                NiveauTotal {
                    id: "niv-0".to_string(),
                    niveau_name: "RDC".to_string(),
                    note: String::new(),
                    sous_traitants: vec!["SOTUMAG".to_string()],
                    diametres: vec![6, 8, 10],
                    rows: vec![
                        row("r1", Some(12.0), &[(6, 44.0), (8, 62.0)], &[(6, 2657.6), (8, 3976.0)]),
                        row("r2", Some(18.0), &[(8, 22.0), (10, 34.0)], &[(8, 1408.0), (10, 2669.0)]),
                    ],
                },
                NiveauTotal {
                    id: "niv-1".to_string(),
                    niveau_name: String::new(),
                    note: String::new(),
                    sous_traitants: Vec::new(),
                    diametres: vec![8, 12],
                    rows: vec![row("r3", Some(8.0), &[(8, 10.0), (12, 8.0)], &[(8, 640.0), (12, 483.2)])],
                },
            ],
        }
    }

    #[test]
    fn test_niveau_toggle_and_sous_traitants() {
        let mut niveau = NiveauRow::new();
        niveau.toggle_mm(12);
        niveau.toggle_mm(6);
        assert_eq!(niveau.selected_mms, vec![6, 12]);
        niveau.toggle_mm(12);
        assert_eq!(niveau.selected_mms, vec![6]);

        assert!(niveau.add_sous_traitant("  SOBAT "));
        assert!(!niveau.add_sous_traitant("SOBAT"));
        assert!(!niveau.add_sous_traitant("   "));
        assert_eq!(niveau.sous_traitants, vec!["SOBAT"]);

        niveau.remove_sous_traitant(5);
        assert_eq!(niveau.sous_traitants.len(), 1);
        niveau.remove_sous_traitant(0);
        assert!(niveau.sous_traitants.is_empty());
    }

    #[test]
    fn test_level_totals_use_own_diameters() {
        let doc = sample();
        let totals = doc.niveaux[0].totals();
        assert_eq!(totals.qty[&6], 44.0);
        assert_eq!(totals.qty[&8], 84.0);
        assert_eq!(totals.qty[&10], 34.0);
        assert_eq!(totals.poids[&8], 5384.0);
        // 12 belongs to the other level only.
        assert!(!totals.qty.contains_key(&12));
    }

    #[test]
    fn test_recap_unions_diameters() {
        let doc = sample();
        assert_eq!(doc.all_mms(), vec![6, 8, 10, 12]);

        let lines = doc.recap_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "RDC");
        assert_eq!(lines[1].name, "—");
        // Every recap line carries the shared column set.
        assert_eq!(lines[1].totals.qty.len(), 4);
        assert_eq!(lines[1].totals.qty[&6], 0.0);
        assert_eq!(lines[1].totals.qty[&12], 8.0);
    }

    #[test]
    fn test_grand_totals_and_weight_sum() {
        let doc = sample();
        let grand = doc.grand_totals();
        assert_eq!(grand.qty[&8], 94.0);
        assert_eq!(grand.qty[&12], 8.0);

        let expected = 2657.6 + 3976.0 + 1408.0 + 2669.0 + 640.0 + 483.2;
        assert!((doc.total_poids() - expected).abs() < 1e-9);
    }
}
