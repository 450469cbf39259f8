//! # Wizard Step Controllers
//!
//! The creation flows are sequenced, validated multi-step forms: a current
//! step index, a per-step validity predicate that gates forward navigation
//! only, and a draft owned by the wizard and mutated in place. Jumping via
//! the stepper control is deliberately unconditional; only `next` checks
//! validity. Cancelling discards the whole draft — there is no partial save.
//!
//! Three controllers live here:
//!
//! - [`RapportWizard`]: rapport creation, five steps, step 0 requires at
//!   least one diameter selected
//! - [`ProjetWizard`]: project creation, two steps, step 0 requires a
//!   chantier name
//! - [`RowForm`]: the modal used to add or edit one mouvement/restant row,
//!   with the bar-weight [`Calculator`] alongside it

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::sum_text_rows;
use crate::diameters::DiameterRange;
use crate::errors::{FerError, FerResult};
use crate::niveaux::NiveauRow;
use crate::numfmt::{format_qty, parse_qty};
use crate::rapport::{zero_quantities, MouvementRow, MouvementType, RestantRow};
use crate::units::kg_per_meter;

/// Steel grade of the tracked rebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AcierType {
    F400,
    #[default]
    F500,
}

impl AcierType {
    /// All grades, in display order.
    pub const ALL: [AcierType; 2] = [AcierType::F400, AcierType::F500];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcierType::F400 => "F400",
            AcierType::F500 => "F500",
        }
    }
}

impl std::fmt::Display for AcierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step position with clamped navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stepper {
    current: usize,
    count: usize,
}

impl Stepper {
    pub fn new(count: usize) -> Self {
        Stepper { current: 0, count }
    }

    /// Zero-based current step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move forward one step; no-op when `valid` is false or already last.
    pub fn advance(&mut self, valid: bool) {
        if valid && self.current + 1 < self.count {
            self.current += 1;
        }
    }

    /// Move back one step, clamped at the first.
    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump directly to `step`, clamped at the last. Skipped steps are not
    /// re-validated.
    pub fn jump(&mut self, step: usize) {
        self.current = step.min(self.count.saturating_sub(1));
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.count
    }
}

/// Step labels of the rapport creation wizard.
pub const RAPPORT_STEPS: [&str; 5] = [
    "Projet & Diamètres",
    "Rapport d'attachement",
    "Calcule de Quantité",
    "Avances de paiement",
    "Vérification & Calcule finale",
];

/// Draft accumulated by the rapport wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapportDraft {
    pub chantier_name: String,
    pub sous_traitant: String,
    pub acier_type: AcierType,
    pub diameters: DiameterRange,
    pub mouvements: Vec<MouvementRow>,
    pub restants: Vec<RestantRow>,
}

impl Default for RapportDraft {
    fn default() -> Self {
        RapportDraft {
            chantier_name: String::new(),
            sous_traitant: String::new(),
            acier_type: AcierType::default(),
            diameters: DiameterRange::standard_run(),
            mouvements: Vec::new(),
            restants: Vec::new(),
        }
    }
}

/// Controller for the rapport creation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapportWizard {
    stepper: Stepper,
    pub draft: RapportDraft,
}

impl RapportWizard {
    pub fn new() -> Self {
        RapportWizard {
            stepper: Stepper::new(RAPPORT_STEPS.len()),
            draft: RapportDraft::default(),
        }
    }

    pub fn step(&self) -> usize {
        self.stepper.current()
    }

    pub fn step_label(&self) -> &'static str {
        RAPPORT_STEPS[self.step().min(RAPPORT_STEPS.len() - 1)]
    }

    /// Only the entry step gates navigation: it needs at least one diameter
    /// selected. Every other step is unconditionally valid.
    pub fn step_valid(&self) -> bool {
        if self.step() == 0 {
            return !self.draft.diameters.selected().is_empty();
        }
        true
    }

    pub fn next(&mut self) {
        let valid = self.step_valid();
        self.stepper.advance(valid);
    }

    pub fn back(&mut self) {
        self.stepper.back();
    }

    pub fn jump(&mut self, step: usize) {
        self.stepper.jump(step);
    }

    pub fn is_last_step(&self) -> bool {
        self.stepper.is_last()
    }

    /// Discard the draft and return to the first step.
    pub fn reset(&mut self) {
        *self = RapportWizard::new();
    }

    pub fn toggle_mm(&mut self, mm: u32) {
        self.draft.diameters.toggle(mm);
    }

    pub fn extend_before(&mut self) -> Option<u32> {
        self.draft.diameters.extend_before()
    }

    pub fn extend_after(&mut self) -> Option<u32> {
        self.draft.diameters.extend_after()
    }

    /// Remove the smallest known diameter when it is a removable extension,
    /// scrubbing it from every captured row.
    pub fn remove_first_extra(&mut self) -> bool {
        match self.draft.diameters.min_known() {
            Some(mm) => self.remove_extra(mm),
            None => false,
        }
    }

    /// Remove the largest known diameter when it is a removable extension,
    /// scrubbing it from every captured row.
    pub fn remove_last_extra(&mut self) -> bool {
        match self.draft.diameters.max_known() {
            Some(mm) => self.remove_extra(mm),
            None => false,
        }
    }

    fn remove_extra(&mut self, mm: u32) -> bool {
        if !self.draft.diameters.remove_boundary(mm) {
            return false;
        }
        for row in &mut self.draft.mouvements {
            row.qty_by_mm.remove(&mm);
        }
        for row in &mut self.draft.restants {
            row.qty_by_mm.remove(&mm);
        }
        true
    }

    /// Newest rows go on top.
    pub fn add_mouvement(&mut self, row: MouvementRow) {
        self.draft.mouvements.insert(0, row);
    }

    /// Replace the row with `id` in place, keeping its identifier.
    pub fn update_mouvement(&mut self, id: Uuid, updated: MouvementRow) -> bool {
        match self.draft.mouvements.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                *row = MouvementRow { id, ..updated };
                true
            }
            None => false,
        }
    }

    pub fn remove_mouvement(&mut self, id: Uuid) {
        self.draft.mouvements.retain(|r| r.id != id);
    }

    pub fn add_restant(&mut self, row: RestantRow) {
        self.draft.restants.insert(0, row);
    }

    pub fn update_restant(&mut self, id: Uuid, updated: RestantRow) -> bool {
        match self.draft.restants.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                *row = RestantRow { id, ..updated };
                true
            }
            None => false,
        }
    }

    pub fn remove_restant(&mut self, id: Uuid) {
        self.draft.restants.retain(|r| r.id != id);
    }

    /// Per-diameter totals of the mouvement table over the selection.
    pub fn total_mouvements(&self) -> BTreeMap<u32, f64> {
        let mms = self.draft.diameters.selected_vec();
        sum_text_rows(self.draft.mouvements.iter().map(|r| &r.qty_by_mm), &mms)
    }

    /// Per-diameter totals of the restant table over the selection.
    pub fn total_restants(&self) -> BTreeMap<u32, f64> {
        let mms = self.draft.diameters.selected_vec();
        sum_text_rows(self.draft.restants.iter().map(|r| &r.qty_by_mm), &mms)
    }
}

impl Default for RapportWizard {
    fn default() -> Self {
        RapportWizard::new()
    }
}

/// Step labels of the project creation wizard.
pub const PROJET_STEPS: [&str; 2] = ["Détails projet", "Niveaux"];

/// Draft accumulated by the project wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjetDraft {
    pub chantier_name: String,
    pub acier_type: AcierType,
    pub note: String,
    pub niveaux: Vec<NiveauRow>,
}

/// Controller for the project creation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjetWizard {
    stepper: Stepper,
    pub draft: ProjetDraft,
}

impl ProjetWizard {
    pub fn new() -> Self {
        ProjetWizard {
            stepper: Stepper::new(PROJET_STEPS.len()),
            draft: ProjetDraft::default(),
        }
    }

    pub fn step(&self) -> usize {
        self.stepper.current()
    }

    pub fn step_label(&self) -> &'static str {
        PROJET_STEPS[self.step().min(PROJET_STEPS.len() - 1)]
    }

    /// Step 0 requires a non-blank chantier name.
    pub fn step_valid(&self) -> bool {
        if self.step() == 0 {
            return !self.draft.chantier_name.trim().is_empty();
        }
        true
    }

    pub fn next(&mut self) {
        let valid = self.step_valid();
        self.stepper.advance(valid);
    }

    pub fn back(&mut self) {
        self.stepper.back();
    }

    pub fn jump(&mut self, step: usize) {
        self.stepper.jump(step);
    }

    pub fn reset(&mut self) {
        *self = ProjetWizard::new();
    }

    /// Add an empty niveau at the top of the list; returns its id.
    pub fn add_niveau(&mut self) -> Uuid {
        let niveau = NiveauRow::new();
        let id = niveau.id;
        self.draft.niveaux.insert(0, niveau);
        id
    }

    pub fn remove_niveau(&mut self, id: Uuid) {
        self.draft.niveaux.retain(|n| n.id != id);
    }

    pub fn niveau_mut(&mut self, id: Uuid) -> Option<&mut NiveauRow> {
        self.draft.niveaux.iter_mut().find(|n| n.id == id)
    }
}

impl Default for ProjetWizard {
    fn default() -> Self {
        ProjetWizard::new()
    }
}

/// Draft for one row entry modal (mouvement or restant).
///
/// Quantity cells are initialized to `"0"` for the whole active selection,
/// then overlaid with the row being edited, so the grid always shows every
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowForm {
    pub date: Option<NaiveDate>,
    pub kind: MouvementType,
    pub bon_livraison: String,
    pub note: String,
    pub values_by_mm: BTreeMap<u32, String>,
}

impl RowForm {
    /// Empty form over the active selection.
    pub fn new(diameters: &[u32]) -> Self {
        RowForm {
            date: None,
            kind: MouvementType::Livraison,
            bon_livraison: String::new(),
            note: String::new(),
            values_by_mm: zero_quantities(diameters),
        }
    }

    /// Form prefilled from an existing mouvement row.
    pub fn for_mouvement(row: &MouvementRow, diameters: &[u32]) -> Self {
        let mut form = RowForm::new(diameters);
        form.date = Some(row.date);
        form.kind = row.kind;
        form.bon_livraison = row.bon_livraison.clone();
        form.note = row.note.clone();
        form.overlay(&row.qty_by_mm, diameters);
        form
    }

    /// Form prefilled from an existing restant row.
    pub fn for_restant(row: &RestantRow, diameters: &[u32]) -> Self {
        let mut form = RowForm::new(diameters);
        form.date = Some(row.date);
        form.note = row.note.clone();
        form.overlay(&row.qty_by_mm, diameters);
        form
    }

    fn overlay(&mut self, values: &BTreeMap<u32, String>, diameters: &[u32]) {
        for &mm in diameters {
            if let Some(v) = values.get(&mm) {
                self.values_by_mm.insert(mm, v.clone());
            }
        }
    }

    /// Set one quantity cell. Cells outside the active selection are
    /// rejected.
    pub fn set_value(&mut self, mm: u32, value: impl Into<String>) -> FerResult<()> {
        match self.values_by_mm.get_mut(&mm) {
            Some(cell) => {
                *cell = value.into();
                Ok(())
            }
            None => Err(FerError::unknown_diameter(mm)),
        }
    }

    fn require_date(&self) -> FerResult<NaiveDate> {
        self.date
            .ok_or_else(|| FerError::validation("date", "Date obligatoire"))
    }

    /// Produce a mouvement row; the date is mandatory.
    pub fn submit_mouvement(&self) -> FerResult<MouvementRow> {
        let date = self.require_date()?;
        Ok(MouvementRow::new(
            date,
            self.kind,
            self.bon_livraison.clone(),
            self.note.clone(),
            self.values_by_mm.clone(),
        ))
    }

    /// Produce a restant row; the date is mandatory.
    pub fn submit_restant(&self) -> FerResult<RestantRow> {
        let date = self.require_date()?;
        Ok(RestantRow::new(
            date,
            self.note.clone(),
            self.values_by_mm.clone(),
        ))
    }
}

/// Bar-weight calculator shown next to the row entry form.
///
/// Length and bar count are raw user strings, parsed leniently: the length is
/// clamped at zero, the count is floored and clamped at one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    pub mm: u32,
    pub length_m: String,
    pub bars: String,
}

impl Calculator {
    /// Calculator targeting the first diameter of the selection.
    pub fn new(diameters: &[u32]) -> Self {
        Calculator {
            mm: diameters.first().copied().unwrap_or(0),
            length_m: "0".to_string(),
            bars: "1".to_string(),
        }
    }

    /// Keep the target inside the selection when it changes underneath.
    pub fn retarget(&mut self, diameters: &[u32]) {
        if !diameters.contains(&self.mm) {
            self.mm = diameters.first().copied().unwrap_or(0);
        }
    }

    /// Parsed length, clamped at zero.
    pub fn length(&self) -> f64 {
        parse_qty(&self.length_m).max(0.0)
    }

    /// Parsed bar count, floored and clamped at one.
    pub fn bar_count(&self) -> u32 {
        let raw = parse_qty(&self.bars).floor();
        if raw >= 1.0 {
            raw.min(f64::from(u32::MAX)) as u32
        } else {
            1
        }
    }

    /// Total weight in kilograms for the current inputs.
    pub fn kilograms(&self) -> f64 {
        if self.mm == 0 {
            return 0.0;
        }
        kg_per_meter(self.mm) * self.length() * f64::from(self.bar_count())
    }

    /// Total weight in tonnes.
    pub fn tonnes(&self) -> f64 {
        self.kilograms() / 1000.0
    }

    /// Tonnage formatted for a quantity cell.
    pub fn result_tn(&self) -> String {
        format_qty(self.tonnes())
    }

    /// Overwrite the target cell with the computed tonnage.
    pub fn apply_replace(&self, values: &mut BTreeMap<u32, String>) {
        if self.mm == 0 {
            return;
        }
        values.insert(self.mm, self.result_tn());
    }

    /// Add the computed tonnage to the target cell's current value.
    pub fn apply_add(&self, values: &mut BTreeMap<u32, String>) {
        if self.mm == 0 {
            return;
        }
        let current = values.get(&self.mm).map(|v| parse_qty(v)).unwrap_or(0.0);
        values.insert(self.mm, format_qty(current + self.tonnes()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_entry_step_gates_forward_navigation() {
        let mut wizard = RapportWizard::new();
        assert_eq!(wizard.step(), 0);

        wizard.next();
        assert_eq!(wizard.step(), 0, "no diameter selected yet");

        wizard.toggle_mm(12);
        wizard.next();
        assert_eq!(wizard.step(), 1);
        assert_eq!(wizard.step_label(), "Rapport d'attachement");
    }

    #[test]
    fn test_navigation_clamps() {
        let mut wizard = RapportWizard::new();
        wizard.back();
        assert_eq!(wizard.step(), 0);

        wizard.toggle_mm(8);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), RAPPORT_STEPS.len() - 1);
        assert!(wizard.is_last_step());
    }

    #[test]
    fn test_jump_is_unconditional() {
        let mut wizard = RapportWizard::new();
        // Step 0 is invalid, but the stepper control may still jump.
        wizard.jump(3);
        assert_eq!(wizard.step(), 3);
        wizard.jump(99);
        assert_eq!(wizard.step(), RAPPORT_STEPS.len() - 1);
    }

    #[test]
    fn test_reset_discards_draft() {
        let mut wizard = RapportWizard::new();
        wizard.draft.chantier_name = "Chantier A".to_string();
        wizard.toggle_mm(8);
        wizard.next();

        wizard.reset();
        assert_eq!(wizard, RapportWizard::new());
    }

    #[test]
    fn test_row_lifecycle_and_totals() {
        let mut wizard = RapportWizard::new();
        wizard.toggle_mm(8);
        wizard.toggle_mm(12);
        let mms = wizard.draft.diameters.selected_vec();

        let mut form = RowForm::new(&mms);
        form.date = Some(date(2025, 6, 1));
        form.set_value(8, "2,5").unwrap();
        let first = form.submit_mouvement().unwrap();
        let first_id = first.id;
        wizard.add_mouvement(first);

        let mut form = RowForm::new(&mms);
        form.date = Some(date(2025, 6, 3));
        form.kind = MouvementType::Transfert;
        form.set_value(8, "-0,5").unwrap();
        form.set_value(12, "1").unwrap();
        wizard.add_mouvement(form.submit_mouvement().unwrap());

        // Newest row sits on top.
        assert_eq!(wizard.draft.mouvements[1].id, first_id);

        let totals = wizard.total_mouvements();
        assert_eq!(totals[&8], 2.0);
        assert_eq!(totals[&12], 1.0);

        wizard.remove_mouvement(first_id);
        let totals = wizard.total_mouvements();
        assert_eq!(totals[&8], -0.5);
    }

    #[test]
    fn test_update_keeps_row_id() {
        let mut wizard = RapportWizard::new();
        wizard.toggle_mm(8);
        let mms = wizard.draft.diameters.selected_vec();

        let mut form = RowForm::new(&mms);
        form.date = Some(date(2025, 6, 1));
        let row = form.submit_mouvement().unwrap();
        let id = row.id;
        wizard.add_mouvement(row);

        let mut edit = RowForm::for_mouvement(&wizard.draft.mouvements[0], &mms);
        edit.set_value(8, "7").unwrap();
        assert!(wizard.update_mouvement(id, edit.submit_mouvement().unwrap()));

        assert_eq!(wizard.draft.mouvements[0].id, id);
        assert_eq!(wizard.draft.mouvements[0].qty_by_mm[&8], "7");
        assert!(!wizard.update_mouvement(Uuid::new_v4(), edit.submit_mouvement().unwrap()));
    }

    #[test]
    fn test_removing_extension_scrubs_rows() {
        let mut wizard = RapportWizard::new();
        let added = wizard.extend_after().unwrap();
        wizard.toggle_mm(added);
        wizard.toggle_mm(8);
        let mms = wizard.draft.diameters.selected_vec();

        let mut form = RowForm::new(&mms);
        form.date = Some(date(2025, 6, 1));
        form.set_value(added, "3").unwrap();
        wizard.add_mouvement(form.submit_mouvement().unwrap());

        assert!(wizard.remove_last_extra());
        assert!(!wizard.draft.mouvements[0].qty_by_mm.contains_key(&added));
        assert!(!wizard.draft.diameters.selected().contains(&added));
    }

    #[test]
    fn test_row_form_requires_date() {
        let form = RowForm::new(&[8]);
        let err = form.submit_mouvement().unwrap_err();
        assert_eq!(err.to_string(), "Date obligatoire");
        let err = form.submit_restant().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION");
    }

    #[test]
    fn test_row_form_rejects_unknown_cells() {
        let mut form = RowForm::new(&[8, 12]);
        assert!(form.set_value(8, "1").is_ok());
        assert!(form.set_value(10, "1").is_err());
    }

    #[test]
    fn test_projet_wizard_requires_chantier_name() {
        let mut wizard = ProjetWizard::new();
        wizard.next();
        assert_eq!(wizard.step(), 0);

        wizard.draft.chantier_name = "   ".to_string();
        wizard.next();
        assert_eq!(wizard.step(), 0);

        wizard.draft.chantier_name = "Pharmaghreb - El Agba".to_string();
        wizard.next();
        assert_eq!(wizard.step(), 1);
        assert_eq!(wizard.step_label(), "Niveaux");
    }

    #[test]
    fn test_projet_wizard_niveau_ops() {
        let mut wizard = ProjetWizard::new();
        let first = wizard.add_niveau();
        let second = wizard.add_niveau();
        // Newest niveau on top.
        assert_eq!(wizard.draft.niveaux[0].id, second);

        if let Some(n) = wizard.niveau_mut(first) {
            n.name = "RDC".to_string();
            n.toggle_mm(12);
        }
        assert_eq!(wizard.draft.niveaux[1].selected_mms, vec![12]);

        wizard.remove_niveau(second);
        assert_eq!(wizard.draft.niveaux.len(), 1);
    }

    #[test]
    fn test_calculator_example() {
        let calc = Calculator {
            mm: 12,
            length_m: "10".to_string(),
            bars: "1".to_string(),
        };
        assert!((calc.kilograms() - 8.888888888888889).abs() < 1e-9);
        assert_eq!(calc.result_tn(), "0,009");
    }

    #[test]
    fn test_calculator_clamps_inputs() {
        let calc = Calculator {
            mm: 12,
            length_m: "-4".to_string(),
            bars: "abc".to_string(),
        };
        assert_eq!(calc.length(), 0.0);
        assert_eq!(calc.bar_count(), 1);
        assert_eq!(calc.kilograms(), 0.0);

        let calc = Calculator {
            mm: 12,
            length_m: "1".to_string(),
            bars: "2,9".to_string(),
        };
        assert_eq!(calc.bar_count(), 2);
    }

    #[test]
    fn test_calculator_apply() {
        let mut values = zero_quantities(&[8, 12]);
        let calc = Calculator {
            mm: 12,
            length_m: "10".to_string(),
            bars: "1".to_string(),
        };

        calc.apply_replace(&mut values);
        assert_eq!(values[&12], "0,009");

        calc.apply_add(&mut values);
        assert_eq!(values[&12], "0,018");
    }

    #[test]
    fn test_calculator_retarget() {
        let mut calc = Calculator::new(&[8, 12]);
        assert_eq!(calc.mm, 8);
        calc.mm = 12;
        calc.retarget(&[8, 12]);
        assert_eq!(calc.mm, 12);
        calc.retarget(&[14, 16]);
        assert_eq!(calc.mm, 14);
        calc.retarget(&[]);
        assert_eq!(calc.mm, 0);
    }
}
