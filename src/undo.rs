//! Undo for destructive plate edits.
//!
//! Before a removal, clear or reset the editor pushes a snapshot holding full
//! copies of the well attributes, selection and legend. Undo pops the newest
//! snapshot and replaces all three wholesale. There is no redo: a snapshot is
//! consumed whether or not it could be applied.

use std::collections::BTreeSet;

use protocalc_ui::UndoStack;

use crate::attributes::WellAttributes;
use crate::constants::MAX_UNDO_HISTORY;
use crate::error::UndoError;
use crate::geometry::PlateLabels;
use crate::legend::Legend;
use crate::model::WellId;
use crate::plate::timestamp_millis;
use crate::selection::SelectionEngine;

// ============================================================================
// Snapshots
// ============================================================================

/// Pre-image of one destructive operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    /// Human-readable description, e.g. "Reset plate"
    pub label: String,
    /// Well attributes before the operation
    pub attributes: WellAttributes,
    /// Selected wells before the operation
    pub selection: BTreeSet<WellId>,
    /// Legend before the operation
    pub legend: Legend,
    /// Milliseconds since the Unix epoch when the snapshot was taken
    pub taken_at: u64,
}

impl UndoSnapshot {
    pub fn new(
        label: impl Into<String>,
        attributes: &WellAttributes,
        selection: &BTreeSet<WellId>,
        legend: &Legend,
    ) -> Self {
        Self {
            label: label.into(),
            attributes: attributes.clone(),
            selection: selection.clone(),
            legend: legend.clone(),
            taken_at: timestamp_millis(),
        }
    }

    /// Check that every well in the snapshot exists on the given plate shape.
    pub fn validate(&self, labels: &PlateLabels) -> Result<(), UndoError> {
        let legend_wells = [&self.legend.fill, &self.legend.border, &self.legend.background]
            .into_iter()
            .flat_map(|kind| kind.entries.values())
            .flat_map(|entry| entry.wells.iter());
        let mut all = self
            .attributes
            .well_ids()
            .chain(self.selection.iter())
            .chain(legend_wells);
        match all.find(|id| !labels.contains(id)) {
            Some(well) => Err(UndoError::IncompatibleSnapshot {
                label: self.label.clone(),
                well: well.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Result of an undo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The stack was empty
    NothingToUndo,
    /// The snapshot with this label was restored
    Restored(String),
    /// The snapshot with this label could not be applied and was discarded
    Failed(String),
}

impl UndoOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, UndoOutcome::Restored(_))
    }
}

// ============================================================================
// Undo Manager
// ============================================================================

/// Bounded LIFO of undo snapshots for one plate.
#[derive(Debug, Clone)]
pub struct UndoManager {
    stack: UndoStack<UndoSnapshot>,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoManager {
    /// Create a manager holding at most 50 snapshots.
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNDO_HISTORY)
    }

    /// Create a manager with a custom history limit.
    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            stack: UndoStack::new(max_history),
        }
    }

    /// Record a snapshot. The oldest snapshot is evicted when the stack is full.
    pub fn push(&mut self, snapshot: UndoSnapshot) {
        log::debug!("📝 Undo: pushed '{}'", snapshot.label);
        self.stack.push(snapshot);
    }

    /// Pop the newest snapshot and apply it to the plate state.
    ///
    /// A snapshot that fails validation is logged and dropped; the current
    /// state is left untouched in that case.
    pub fn undo(
        &mut self,
        attributes: &mut WellAttributes,
        selection: &mut SelectionEngine,
        legend: &mut Legend,
    ) -> UndoOutcome {
        let Some(snapshot) = self.stack.pop() else {
            log::debug!("Nothing to undo");
            return UndoOutcome::NothingToUndo;
        };

        if let Err(e) = snapshot.validate(selection.labels()) {
            log::error!("⏪ Undo failed, snapshot discarded: {}", e);
            return UndoOutcome::Failed(snapshot.label);
        }

        let UndoSnapshot {
            label,
            attributes: prev_attributes,
            selection: prev_selection,
            legend: prev_legend,
            ..
        } = snapshot;
        *attributes = prev_attributes;
        *legend = prev_legend;
        selection.replace(prev_selection);
        log::debug!("⏪ Undo: '{}'", label);
        UndoOutcome::Restored(label)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Label of the snapshot that would be restored next
    pub fn undo_description(&self) -> Option<&str> {
        self.stack.peek().map(|s| s.label.as_str())
    }

    /// Number of snapshots available
    pub fn len(&self) -> usize {
        self.stack.undo_count()
    }

    pub fn is_empty(&self) -> bool {
        !self.stack.can_undo()
    }

    /// Snapshots from oldest to newest
    pub fn snapshots(&self) -> impl Iterator<Item = &UndoSnapshot> {
        self.stack.iter()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.stack.clear();
        log::debug!("🗑️ Undo history cleared");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::reconcile;
    use crate::model::{AttributeKind, Color, PlateType};

    fn empty_snapshot(label: &str) -> UndoSnapshot {
        UndoSnapshot::new(label, &WellAttributes::new(), &BTreeSet::new(), &Legend::new())
    }

    #[test]
    fn push_beyond_capacity_evicts_oldest() {
        let mut undo = UndoManager::new();
        for i in 0..60 {
            undo.push(empty_snapshot(&format!("step {}", i)));
        }
        assert_eq!(undo.len(), MAX_UNDO_HISTORY);
        let labels: Vec<&str> = undo.snapshots().map(|s| s.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"step 10"));
        assert_eq!(labels.last(), Some(&"step 59"));
        assert_eq!(undo.undo_description(), Some("step 59"));
    }

    #[test]
    fn undo_on_empty_stack() {
        let mut undo = UndoManager::new();
        let mut attrs = WellAttributes::new();
        let mut sel = SelectionEngine::new(PlateType::default());
        let mut legend = Legend::new();
        assert_eq!(
            undo.undo(&mut attrs, &mut sel, &mut legend),
            UndoOutcome::NothingToUndo
        );
    }

    #[test]
    fn undo_restores_all_three_pieces() {
        let plate = PlateType::default();
        let mut attrs = WellAttributes::new();
        let mut sel = SelectionEngine::new(plate);
        let wells = vec![WellId::from("A1"), WellId::from("B2")];
        attrs.set_attribute(&wells, AttributeKind::Fill, &Color::from("#ff0000"));
        let mut legend = reconcile(&Legend::new(), &attrs);
        legend.set_label(AttributeKind::Fill, &Color::from("#ff0000"), "Control");
        sel.replace(wells.clone());

        let mut undo = UndoManager::new();
        undo.push(UndoSnapshot::new("Reset plate", &attrs, sel.selected(), &legend));
        let (attrs_before, sel_before, legend_before) =
            (attrs.clone(), sel.selected().clone(), legend.clone());

        attrs.reset_all();
        sel.clear();
        legend = reconcile(&legend, &attrs);

        let outcome = undo.undo(&mut attrs, &mut sel, &mut legend);
        assert_eq!(outcome, UndoOutcome::Restored("Reset plate".to_string()));
        assert_eq!(attrs, attrs_before);
        assert_eq!(sel.selected(), &sel_before);
        assert_eq!(legend, legend_before);
        assert!(!undo.can_undo());
    }

    #[test]
    fn broken_snapshot_is_consumed_and_state_kept() {
        let mut attrs = WellAttributes::new();
        attrs.set_attribute(&[WellId::from("A1")], AttributeKind::Fill, &Color::from("#00ff00"));
        let mut sel = SelectionEngine::new(PlateType::lookup("6-well").unwrap());
        let mut legend = reconcile(&Legend::new(), &attrs);

        let mut foreign = WellAttributes::new();
        foreign.set_attribute(&[WellId::from("H12")], AttributeKind::Fill, &Color::from("#000000"));
        let mut undo = UndoManager::new();
        undo.push(empty_snapshot("ok"));
        undo.push(UndoSnapshot::new("broken", &foreign, &BTreeSet::new(), &Legend::new()));

        let outcome = undo.undo(&mut attrs, &mut sel, &mut legend);
        assert_eq!(outcome, UndoOutcome::Failed("broken".to_string()));
        assert!(attrs.contains(&WellId::from("A1")));
        assert_eq!(undo.len(), 1);
        assert!(undo.undo(&mut attrs, &mut sel, &mut legend).is_restored());
    }
}
