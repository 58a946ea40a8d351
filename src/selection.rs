//! Well selection for one plate.
//!
//! Selection input comes in three flavours:
//! - plain clicks toggle a well (or a whole row/column header) and set the anchor
//! - shift-clicks union the region between the anchor and the target
//! - ctrl/cmd-clicks apply the toggle rule to the target's wells
//!
//! The toggle rule: if every well of the target set is already selected the
//! set is removed, otherwise the whole set is added.
//!
//! Drag-rectangle selection picks the wells whose rendered box lies fully
//! inside the dragged rectangle.

use std::collections::BTreeSet;

use protocalc_ui::{Bounds, Direction, DragState, Modifiers, Point};

use crate::geometry::{self, PlateLabels};
use crate::layout::WellLayout;
use crate::model::{PlateType, WellId, WellIndex};

/// The most recent plain selection interaction, used as the start of shift ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    None,
    Well(WellIndex),
    Row(usize),
    Column(usize),
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    /// A single well
    Well(WellIndex),
    /// A row header
    Row(usize),
    /// A column header
    Column(usize),
}

impl SelectionTarget {
    fn anchor(self) -> Anchor {
        match self {
            SelectionTarget::Well(idx) => Anchor::Well(idx),
            SelectionTarget::Row(r) => Anchor::Row(r),
            SelectionTarget::Column(c) => Anchor::Column(c),
        }
    }
}

/// Where a drag gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// Empty plate background; clears the selection before tracking
    Background,
    /// On top of a well
    Well,
}

/// Apply the toggle rule of `targets` to `selection`. Returns true if anything changed.
pub fn toggle_set(selection: &mut BTreeSet<WellId>, targets: &[WellId]) -> bool {
    if targets.is_empty() {
        return false;
    }
    if targets.iter().all(|w| selection.contains(w)) {
        for w in targets {
            selection.remove(w);
        }
    } else {
        selection.extend(targets.iter().cloned());
    }
    true
}

/// Selection state machine for one plate instance.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    plate_type: PlateType,
    labels: PlateLabels,
    selected: BTreeSet<WellId>,
    anchor: Anchor,
    drag: DragState,
    drag_modifiers: Modifiers,
}

impl SelectionEngine {
    pub fn new(plate_type: PlateType) -> Self {
        Self {
            plate_type,
            labels: plate_type.labels(),
            selected: BTreeSet::new(),
            anchor: Anchor::None,
            drag: DragState::Idle,
            drag_modifiers: Modifiers::NONE,
        }
    }

    pub fn plate_type(&self) -> PlateType {
        self.plate_type
    }

    pub fn labels(&self) -> &PlateLabels {
        &self.labels
    }

    pub fn selected(&self) -> &BTreeSet<WellId> {
        &self.selected
    }

    /// Selected wells in plate order.
    pub fn selected_wells(&self) -> Vec<WellId> {
        self.selected.iter().cloned().collect()
    }

    pub fn is_selected(&self, id: &WellId) -> bool {
        self.selected.contains(id)
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Current drag rectangle, for drawing the rubber band.
    pub fn drag_rect(&self) -> Option<Bounds> {
        self.drag.rect()
    }

    /// Switch plate shape. The selection, anchor and any drag are discarded.
    pub fn set_plate_type(&mut self, plate_type: PlateType) {
        self.plate_type = plate_type;
        self.labels = plate_type.labels();
        self.selected.clear();
        self.anchor = Anchor::None;
        self.drag = DragState::Idle;
        log::debug!("🔄 Plate type changed to {}, selection cleared", plate_type.id);
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = Anchor::None;
        log::debug!("Selection cleared");
    }

    /// Select every well of the plate.
    pub fn select_all(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.selected = self.labels.all_wells().into_iter().collect();
        log::debug!("Selected all {} wells", self.selected.len());
    }

    /// Replace the selection wholesale (used by undo restore).
    /// Ids that do not belong to this plate are dropped with a warning.
    pub fn replace(&mut self, wells: impl IntoIterator<Item = WellId>) {
        let labels = &self.labels;
        self.selected = wells
            .into_iter()
            .filter(|id| {
                let valid = labels.contains(id);
                if !valid {
                    log::warn!("Dropping foreign well '{}' from selection", id);
                }
                valid
            })
            .collect();
    }

    fn accepts_input(&self) -> bool {
        if !self.plate_type.is_addressable() {
            log::debug!("{} has no addressable wells, selection input ignored", self.plate_type.id);
            return false;
        }
        true
    }

    fn in_bounds(&self, target: SelectionTarget) -> bool {
        let (rows, cols) = (self.labels.row_count(), self.labels.col_count());
        match target {
            SelectionTarget::Well(idx) => idx.row < rows && idx.col < cols,
            SelectionTarget::Row(r) => r < rows,
            SelectionTarget::Column(c) => c < cols,
        }
    }

    /// Wells covered by a click target.
    pub fn target_wells(&self, target: SelectionTarget) -> Vec<WellId> {
        let (rows, cols) = (&self.labels.rows, &self.labels.cols);
        match target {
            SelectionTarget::Well(idx) => vec![geometry::well_id(idx.row, idx.col, rows, cols)],
            SelectionTarget::Row(r) => geometry::row_wells(r, rows, cols),
            SelectionTarget::Column(c) => geometry::column_wells(c, rows, cols),
        }
    }

    /// Handle a click on a well or header. Returns true if the selection changed.
    pub fn click(&mut self, target: SelectionTarget, modifiers: Modifiers) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !self.in_bounds(target) {
            log::warn!("Click target {:?} outside {} grid, ignored", target, self.plate_type.id);
            return false;
        }
        if modifiers.shift {
            self.shift_click(target)
        } else if modifiers.command() {
            let wells = self.target_wells(target);
            log::debug!("Toggle {:?} ({} wells)", target, wells.len());
            toggle_set(&mut self.selected, &wells)
        } else {
            self.plain_click(target)
        }
    }

    /// Handle a click on a well given by id. Unknown ids are ignored.
    pub fn click_well_id(&mut self, id: &WellId, modifiers: Modifiers) -> bool {
        match self.labels.well_indices(id) {
            Some(idx) => self.click(SelectionTarget::Well(idx), modifiers),
            None => false,
        }
    }

    fn plain_click(&mut self, target: SelectionTarget) -> bool {
        self.anchor = target.anchor();
        let wells = self.target_wells(target);
        toggle_set(&mut self.selected, &wells)
    }

    fn shift_click(&mut self, target: SelectionTarget) -> bool {
        let (rows, cols) = (&self.labels.rows, &self.labels.cols);
        let region = match (self.anchor, target) {
            (Anchor::Well(start), SelectionTarget::Well(end)) => {
                geometry::rectangular_region(start, end, rows, cols)
            }
            (Anchor::Row(start), SelectionTarget::Row(end)) => {
                geometry::row_region(start, end, rows, cols)
            }
            (Anchor::Column(start), SelectionTarget::Column(end)) => {
                geometry::column_region(start, end, rows, cols)
            }
            _ => {
                log::debug!("Shift-click without matching anchor, treated as plain click");
                return self.plain_click(target);
            }
        };
        let before = self.selected.len();
        self.selected.extend(region);
        log::debug!("Shift range added {} wells", self.selected.len() - before);
        self.selected.len() != before
    }

    /// Move the keyboard cursor from the anchored well and click the new well.
    /// Does nothing unless the last plain interaction was on a well.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Anchor::Well(current) = self.anchor else {
            return false;
        };
        let (dr, dc) = direction.delta();
        let max_row = self.labels.row_count().saturating_sub(1);
        let max_col = self.labels.col_count().saturating_sub(1);
        let next = WellIndex::new(
            current.row.saturating_add_signed(dr).min(max_row),
            current.col.saturating_add_signed(dc).min(max_col),
        );
        if next == current {
            return false;
        }
        self.click(SelectionTarget::Well(next), Modifiers::NONE)
    }

    /// Start tracking a drag rectangle.
    pub fn begin_drag(&mut self, position: Point, origin: DragOrigin, modifiers: Modifiers) {
        if !self.accepts_input() {
            return;
        }
        if origin == DragOrigin::Background {
            self.selected.clear();
            self.anchor = Anchor::None;
        }
        self.drag.start(position);
        self.drag_modifiers = modifiers;
        log::debug!("Drag started at ({:.1}, {:.1})", position.x, position.y);
    }

    /// Update the drag rectangle with the current pointer position.
    pub fn update_drag(&mut self, position: Point) {
        self.drag.update(position);
    }

    /// Finish the drag (pointer up or pointer leaving the plate).
    ///
    /// Wells fully inside the rectangle are toggled in if a modifier was held at
    /// press or release, otherwise they replace the selection. Returns the
    /// number of wells the rectangle captured, or None if no drag was active.
    pub fn end_drag(
        &mut self,
        position: Point,
        modifiers: Modifiers,
        layout: &impl WellLayout,
    ) -> Option<usize> {
        self.drag.update(position);
        let rect = self.drag.finish()?;
        let captured = self.wells_in_rect(&rect, layout);
        if self.drag_modifiers.any() || modifiers.any() {
            toggle_set(&mut self.selected, &captured);
        } else {
            self.selected = captured.iter().cloned().collect();
        }
        self.drag_modifiers = Modifiers::NONE;
        log::debug!(
            "Drag selected {} wells in ({:.1}, {:.1}, {:.1}x{:.1})",
            captured.len(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        Some(captured.len())
    }

    /// Wells whose whole bounding box lies inside `rect`, in plate order.
    pub fn wells_in_rect(&self, rect: &Bounds, layout: &impl WellLayout) -> Vec<WellId> {
        self.labels
            .all_wells()
            .into_iter()
            .filter(|id| {
                layout
                    .well_bounds(id)
                    .is_some_and(|b| rect.contains_bounds(&b))
            })
            .collect()
    }
}
