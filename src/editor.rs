//! Plate editor: one plate plus its selection and undo history.
//!
//! Every user-level plate operation goes through [`PlateEditor`]. Destructive
//! edits (removing colors, clearing wells, resetting) push an undo snapshot
//! first; applying a color does not. The legend is reconciled synchronously
//! after every attribute mutation, so readers never see a stale legend.

use std::collections::BTreeSet;

use serde::Serialize;

use protocalc_ui::{Event, Key, Modifiers, MouseButton, Point};

use crate::attributes::{WellAttributes, WellStyle};
use crate::constants::MIN_DRAG_DISTANCE;
use crate::context_menu::{ContextTarget, MenuAction};
use crate::error::PlateError;
use crate::geometry;
use crate::keybindings::{self, Shortcut};
use crate::layout::WellLayout;
use crate::legend::{self, Legend};
use crate::model::{AttributeKind, Color, PlateType, WellId};
use crate::plate::{Plate, PlateId};
use crate::selection::{DragOrigin, SelectionEngine, SelectionTarget};
use crate::undo::{UndoManager, UndoOutcome, UndoSnapshot};

/// Messages the editor emits to the plate list that owns persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum PlateEvent {
    /// Store this complete plate record
    Save(Plate),
    /// Remove the plate with this id
    Delete(PlateId),
}

/// Display style of one well, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellDisplay {
    pub id: WellId,
    pub fill: Option<Color>,
    pub border: Option<Color>,
    pub background: Option<Color>,
    /// Legend labels to draw on the well
    pub labels: Vec<String>,
    pub selected: bool,
}

/// Read model of a whole plate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateView {
    pub plate_type: PlateType,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// Every well in row-major order
    pub wells: Vec<WellDisplay>,
}

/// Press on a well that has not yet moved far enough to become a drag.
#[derive(Debug, Clone)]
struct PendingPress {
    well: WellId,
    position: Point,
    modifiers: Modifiers,
}

/// Editing session for one plate.
#[derive(Debug, Clone)]
pub struct PlateEditor {
    plate: Plate,
    selection: SelectionEngine,
    undo: UndoManager,
    pending_press: Option<PendingPress>,
}

impl PlateEditor {
    /// Open a plate for editing.
    pub fn new(plate: Plate) -> Self {
        let selection = SelectionEngine::new(plate.plate_type);
        Self {
            plate,
            selection,
            undo: UndoManager::new(),
            pending_press: None,
        }
    }

    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionEngine {
        &mut self.selection
    }

    pub fn well_data(&self) -> &WellAttributes {
        &self.plate.well_data
    }

    pub fn legend(&self) -> &Legend {
        &self.plate.legend
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    /// Close the editor and hand back the plate.
    pub fn into_plate(self) -> Plate {
        self.plate
    }

    // ------------------------------------------------------------------------
    // Attribute edits
    // ------------------------------------------------------------------------

    fn snapshot(&mut self, label: &str) {
        self.undo.push(UndoSnapshot::new(
            label,
            &self.plate.well_data,
            self.selection.selected(),
            &self.plate.legend,
        ));
    }

    fn reconcile(&mut self) {
        self.plate.legend = legend::reconcile(&self.plate.legend, &self.plate.well_data);
    }

    /// Apply a color to every selected well. Not recorded for undo.
    /// A transparent color is a removal and goes through [`Self::remove_color`].
    pub fn apply_color(&mut self, kind: AttributeKind, color: &Color) -> bool {
        let wells = self.selection.selected_wells();
        self.apply_color_to(&wells, kind, color)
    }

    fn apply_color_to(&mut self, wells: &[WellId], kind: AttributeKind, color: &Color) -> bool {
        if color.is_transparent() {
            return self.remove_color_from(wells, kind);
        }
        if wells.is_empty() {
            return false;
        }
        self.plate.well_data.set_attribute(wells, kind, color);
        self.reconcile();
        true
    }

    /// Remove one attribute kind from every selected well.
    pub fn remove_color(&mut self, kind: AttributeKind) -> bool {
        let wells = self.selection.selected_wells();
        self.remove_color_from(&wells, kind)
    }

    fn remove_color_from(&mut self, wells: &[WellId], kind: AttributeKind) -> bool {
        let affected = wells.iter().any(|id| {
            self.plate
                .well_data
                .get(id)
                .is_some_and(|style| style.get(kind).is_some())
        });
        if !affected {
            return false;
        }
        self.snapshot(&format!("Remove {} color", kind.name().to_lowercase()));
        self.plate
            .well_data
            .set_attribute(wells, kind, &Color::transparent());
        self.reconcile();
        true
    }

    /// Remove every attribute from the selected wells. The selection itself stays.
    pub fn clear_selected_wells(&mut self) -> bool {
        let wells = self.selection.selected_wells();
        self.clear_wells(&wells, "Clear wells")
    }

    fn clear_wells(&mut self, wells: &[WellId], label: &str) -> bool {
        if !wells.iter().any(|id| self.plate.well_data.contains(id)) {
            return false;
        }
        self.snapshot(label);
        self.plate.well_data.clear_wells(wells);
        self.reconcile();
        true
    }

    /// Remove every attribute from a right-click target.
    pub fn clear_target(&mut self, target: &ContextTarget) -> bool {
        let wells = self.context_wells(target);
        let label = match target {
            ContextTarget::Well(id) => format!("Clear well {}", id),
            ContextTarget::Row(r) => format!("Clear row {}", geometry::row_label(*r)),
            ContextTarget::Column(c) => format!("Clear column {}", geometry::column_label(*c)),
            ContextTarget::Plate => "Clear plate".to_string(),
        };
        self.clear_wells(&wells, &label)
    }

    /// Empty the plate: wells, legend and selection.
    pub fn reset_plate(&mut self) -> bool {
        if self.plate.well_data.is_empty()
            && self.plate.legend.is_empty()
            && self.selection.is_empty()
        {
            return false;
        }
        self.snapshot("Reset plate");
        self.plate.well_data.reset_all();
        self.selection.clear();
        self.reconcile();
        log::info!("Plate {} reset", self.plate.id);
        true
    }

    /// Deselect everything. Not a destructive edit, so not recorded for undo.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Undo the last destructive edit.
    pub fn undo(&mut self) -> UndoOutcome {
        self.undo.undo(
            &mut self.plate.well_data,
            &mut self.selection,
            &mut self.plate.legend,
        )
    }

    // ------------------------------------------------------------------------
    // Plate shape and metadata
    // ------------------------------------------------------------------------

    /// Change the plate shape. Clears the selection and undo history and drops
    /// colors on wells that do not exist in the new shape.
    pub fn set_plate_type(&mut self, plate_type: PlateType) {
        if plate_type == self.plate.plate_type {
            return;
        }
        let labels = plate_type.labels();
        let before = self.plate.well_data.len();
        self.plate.well_data.retain(|id| labels.contains(id));
        let dropped = before - self.plate.well_data.len();
        if dropped > 0 {
            log::info!("Dropped {} wells outside the {} grid", dropped, plate_type.id);
        }
        self.plate.plate_type = plate_type;
        self.selection.set_plate_type(plate_type);
        self.undo.clear();
        self.pending_press = None;
        self.reconcile();
    }

    /// Change the plate shape by registry id.
    pub fn set_plate_type_id(&mut self, id: &str) -> Result<(), PlateError> {
        let plate_type =
            PlateType::lookup(id).ok_or_else(|| PlateError::UnknownPlateType(id.to_string()))?;
        self.set_plate_type(plate_type);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.plate.metadata.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.plate.metadata.description = description.into();
    }

    // ------------------------------------------------------------------------
    // Legend edits
    // ------------------------------------------------------------------------

    pub fn set_legend_label(&mut self, kind: AttributeKind, color: &Color, text: &str) -> bool {
        self.plate.legend.set_label(kind, color, text)
    }

    pub fn set_show_on_wells(&mut self, kind: AttributeKind, color: &Color, show: bool) -> bool {
        self.plate.legend.set_show_on_wells(kind, color, show)
    }

    pub fn move_legend_color(&mut self, kind: AttributeKind, from: usize, to: usize) -> bool {
        self.plate.legend.move_color(kind, from, to)
    }

    // ------------------------------------------------------------------------
    // Context menu
    // ------------------------------------------------------------------------

    /// Wells covered by a right-click target. Out-of-range targets cover nothing.
    pub fn context_wells(&self, target: &ContextTarget) -> Vec<WellId> {
        let labels = self.selection.labels();
        match target {
            ContextTarget::Well(id) if labels.contains(id) => vec![id.clone()],
            ContextTarget::Well(id) => {
                log::warn!("Context menu on unknown well '{}' ignored", id);
                Vec::new()
            }
            ContextTarget::Row(r) if *r < labels.row_count() => {
                geometry::row_wells(*r, &labels.rows, &labels.cols)
            }
            ContextTarget::Column(c) if *c < labels.col_count() => {
                geometry::column_wells(*c, &labels.rows, &labels.cols)
            }
            ContextTarget::Plate => labels.all_wells(),
            _ => Vec::new(),
        }
    }

    /// Run a context-menu action. `color` is required for [`MenuAction::SetColor`].
    pub fn perform(&mut self, target: &ContextTarget, action: MenuAction, color: Option<&Color>) -> bool {
        if !self.plate.plate_type.is_addressable() && action != MenuAction::Reset {
            return false;
        }
        match action {
            MenuAction::SetColor(kind) => {
                let Some(color) = color else {
                    log::warn!("{} requested without a color", action.id());
                    return false;
                };
                let wells = self.context_wells(target);
                self.apply_color_to(&wells, kind, color)
            }
            MenuAction::RemoveColor(kind) => {
                let wells = self.context_wells(target);
                self.remove_color_from(&wells, kind)
            }
            MenuAction::Clear => self.clear_target(target),
            MenuAction::Reset => self.reset_plate(),
        }
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Handle a key press. `global` marks events delivered to the document
    /// rather than the plate. Returns true if state changed.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers, global: bool) -> bool {
        let Some(shortcut) = keybindings::shortcut_for_key(key, modifiers, global) else {
            return false;
        };
        log::debug!("⌨️ Shortcut {:?}", shortcut);
        match shortcut {
            Shortcut::Undo => self.undo().is_restored(),
            Shortcut::Navigate(direction) => self.selection.navigate(direction),
            Shortcut::SelectAll => {
                self.selection.select_all();
                true
            }
            Shortcut::ClearSelection => {
                let had = !self.selection.is_empty();
                self.clear_selection();
                had
            }
            Shortcut::ClearSelectedWells => self.clear_selected_wells(),
        }
    }

    /// Handle a pointer or keyboard event against the rendered layout.
    ///
    /// A press on a well becomes a click on release, or a drag once the pointer
    /// travels far enough. A press on the background starts a drag right away.
    /// Leaving the plate finishes any drag as if the pointer were released.
    pub fn handle_event(&mut self, event: &Event, layout: &impl WellLayout) -> bool {
        match event {
            Event::PointerPressed {
                button,
                position,
                modifiers,
                ..
            } => {
                if *button != MouseButton::Left {
                    return false;
                }
                match layout.well_at(*position) {
                    Some(well) => {
                        self.pending_press = Some(PendingPress {
                            well,
                            position: *position,
                            modifiers: *modifiers,
                        });
                        false
                    }
                    None => {
                        let had = !self.selection.is_empty();
                        self.selection
                            .begin_drag(*position, DragOrigin::Background, *modifiers);
                        had
                    }
                }
            }
            Event::PointerMoved { position } => {
                if let Some(press) = &self.pending_press {
                    let dx = position.x - press.position.x;
                    let dy = position.y - press.position.y;
                    if (dx * dx + dy * dy).sqrt() >= MIN_DRAG_DISTANCE {
                        let (start, mods) = (press.position, press.modifiers);
                        self.pending_press = None;
                        self.selection.begin_drag(start, DragOrigin::Well, mods);
                    }
                }
                self.selection.update_drag(*position);
                false
            }
            Event::PointerReleased {
                button,
                position,
                modifiers,
            } => {
                if *button != MouseButton::Left {
                    return false;
                }
                self.finish_pointer(*position, *modifiers, layout)
            }
            Event::PointerLeft { position } => {
                self.finish_pointer(*position, Modifiers::NONE, layout)
            }
            Event::KeyPressed { key, modifiers } => self.handle_key(*key, *modifiers, false),
        }
    }

    fn finish_pointer(&mut self, position: Point, modifiers: Modifiers, layout: &impl WellLayout) -> bool {
        if let Some(press) = self.pending_press.take() {
            let mods = Modifiers {
                shift: press.modifiers.shift || modifiers.shift,
                ctrl: press.modifiers.ctrl || modifiers.ctrl,
                alt: press.modifiers.alt || modifiers.alt,
                meta: press.modifiers.meta || modifiers.meta,
            };
            return self.selection.click_well_id(&press.well, mods);
        }
        self.selection.end_drag(position, modifiers, layout).is_some()
    }

    /// Click a row or column header.
    pub fn click_header(&mut self, target: SelectionTarget, modifiers: Modifiers) -> bool {
        self.selection.click(target, modifiers)
    }

    // ------------------------------------------------------------------------
    // Read model and persistence
    // ------------------------------------------------------------------------

    /// Display style of one well.
    pub fn well_display(&self, id: &WellId) -> WellDisplay {
        let style = self.plate.well_data.get(id).cloned().unwrap_or_default();
        let labels = self
            .plate
            .legend
            .labels_for(style.iter())
            .into_iter()
            .map(str::to_string)
            .collect();
        let WellStyle {
            fill,
            border,
            background,
        } = style;
        WellDisplay {
            id: id.clone(),
            fill,
            border,
            background,
            labels,
            selected: self.selection.is_selected(id),
        }
    }

    /// Read model of the whole plate.
    pub fn view(&self) -> PlateView {
        let labels = self.selection.labels();
        PlateView {
            plate_type: self.plate.plate_type,
            row_labels: labels.rows.clone(),
            column_labels: labels.cols.clone(),
            wells: labels
                .all_wells()
                .iter()
                .map(|id| self.well_display(id))
                .collect(),
        }
    }

    /// Selected wells, for hosts that render selection separately.
    pub fn selected(&self) -> &BTreeSet<WellId> {
        self.selection.selected()
    }

    /// Emit the complete plate record for the owner to store.
    pub fn save(&self) -> PlateEvent {
        log::info!("💾 Saving plate {} '{}'", self.plate.id, self.plate.metadata.name);
        PlateEvent::Save(self.plate.clone())
    }

    /// Ask the owner to delete this plate.
    pub fn delete(&self) -> PlateEvent {
        log::info!("🗑️ Deleting plate {}", self.plate.id);
        PlateEvent::Delete(self.plate.id)
    }
}
