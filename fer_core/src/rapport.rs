//! # Rapport Row Models
//!
//! In-memory rows for the two tables of a rapport d'attachement: dated
//! mouvements (deliveries, transfers, adjustments) and dated snapshots of the
//! remaining unfabricated quantity. Quantities are kept as the user typed
//! them — locale-formatted decimal strings — and only parsed when totals are
//! computed.
//!
//! Row identifiers are client-generated; persistence assigns its own ids on
//! the way through the API.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MouvementType {
    Livraison,
    Transfert,
    Ajustement,
}

impl MouvementType {
    /// All kinds, in display order.
    pub const ALL: [MouvementType; 3] = [
        MouvementType::Livraison,
        MouvementType::Transfert,
        MouvementType::Ajustement,
    ];

    /// Wire/display identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MouvementType::Livraison => "LIVRAISON",
            MouvementType::Transfert => "TRANSFERT",
            MouvementType::Ajustement => "AJUSTEMENT",
        }
    }
}

impl std::fmt::Display for MouvementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated movement with quantities per diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouvementRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: MouvementType,
    pub bon_livraison: String,
    pub note: String,
    pub qty_by_mm: BTreeMap<u32, String>,
}

impl MouvementRow {
    pub fn new(
        date: NaiveDate,
        kind: MouvementType,
        bon_livraison: impl Into<String>,
        note: impl Into<String>,
        qty_by_mm: BTreeMap<u32, String>,
    ) -> Self {
        MouvementRow {
            id: Uuid::new_v4(),
            date,
            kind,
            bon_livraison: bon_livraison.into(),
            note: note.into(),
            qty_by_mm,
        }
    }
}

/// One dated snapshot of the remaining unfabricated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestantRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub note: String,
    pub qty_by_mm: BTreeMap<u32, String>,
}

impl RestantRow {
    pub fn new(date: NaiveDate, note: impl Into<String>, qty_by_mm: BTreeMap<u32, String>) -> Self {
        RestantRow {
            id: Uuid::new_v4(),
            date,
            note: note.into(),
            qty_by_mm,
        }
    }
}

/// A quantity map with every diameter of the active selection set to `"0"`,
/// so freshly opened entry forms show a stable grid.
pub fn zero_quantities(diameters: &[u32]) -> BTreeMap<u32, String> {
    diameters.iter().map(|&mm| (mm, "0".to_string())).collect()
}

/// Case-insensitive substring match used by the rapport list search box.
/// Matches against the chantier name and, when present, the sous-traitant.
pub fn matches_query(chantier_name: &str, sous_traitant: Option<&str>, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    if chantier_name.to_lowercase().contains(&q) {
        return true;
    }
    sous_traitant
        .map(|st| st.to_lowercase().contains(&q))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouvement_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&MouvementType::Livraison).unwrap(),
            "\"LIVRAISON\""
        );
        let roundtrip: MouvementType = serde_json::from_str("\"TRANSFERT\"").unwrap();
        assert_eq!(roundtrip, MouvementType::Transfert);
        assert_eq!(MouvementType::Ajustement.to_string(), "AJUSTEMENT");
    }

    #[test]
    fn test_zero_quantities_covers_all_diameters() {
        let zeros = zero_quantities(&[6, 8, 12]);
        assert_eq!(zeros.len(), 3);
        assert!(zeros.values().all(|v| v == "0"));
    }

    #[test]
    fn test_rows_get_distinct_ids() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let a = RestantRow::new(d, "", zero_quantities(&[8]));
        let b = RestantRow::new(d, "", zero_quantities(&[8]));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_search_matching() {
        assert!(matches_query("Pharmaghreb - El Agba", None, "agba"));
        assert!(matches_query("Chantier A", Some("Ste. AM SIOUD"), "sioud"));
        assert!(!matches_query("Chantier A", None, "sioud"));
        // Blank queries match everything.
        assert!(matches_query("Chantier A", None, "  "));
    }
}
