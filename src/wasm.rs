//! Browser bridge.
//!
//! Exposes a [`PlateSession`] to JavaScript. Structured values cross the
//! boundary as JSON strings; modifier objects use the DOM field names
//! (`shiftKey`, `ctrlKey`, `altKey`, `metaKey`) and may omit any of them.

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

use protocalc_ui::{Bounds, Event, Key, Modifiers, MouseButton, Point, PointerSource, RawModifiers};

use crate::config::{AppConfig, LogLevel};
use crate::context_menu::{ContextTarget, MenuAction};
use crate::editor::{PlateEditor, PlateEvent};
use crate::logging;
use crate::model::{AttributeKind, Color, PlateType, WellId};
use crate::plate::Plate;
use crate::presets::ColorPresets;
use crate::storage::LocalStore;
use crate::undo::UndoOutcome;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = match LocalStore::open() {
        Ok(store) => AppConfig::load(&store).preferences.log_level,
        Err(_) => LogLevel::default(),
    };
    logging::init(level);
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn modifiers(json: &str) -> Modifiers {
    if json.is_empty() {
        return Modifiers::NONE;
    }
    match serde_json::from_str::<RawModifiers>(json) {
        Ok(raw) => raw.into(),
        Err(e) => {
            log::warn!("Malformed modifier state '{}': {}", json, e);
            Modifiers::NONE
        }
    }
}

fn kind(name: &str) -> Result<AttributeKind, JsValue> {
    AttributeKind::from_name(name).ok_or_else(|| js_error(format!("Unknown attribute kind: {}", name)))
}

/// One open plate plus the last rendered well layout.
#[wasm_bindgen]
pub struct PlateSession {
    editor: PlateEditor,
    layout: BTreeMap<WellId, Bounds>,
}

impl PlateSession {
    fn open(plate: Plate) -> PlateSession {
        PlateSession {
            editor: PlateEditor::new(plate),
            layout: BTreeMap::new(),
        }
    }
}

#[wasm_bindgen]
impl PlateSession {
    /// Open a new empty plate.
    #[wasm_bindgen(constructor)]
    pub fn new(id: u32, plate_type: &str, name: &str) -> Result<PlateSession, JsValue> {
        let plate_type = PlateType::lookup(plate_type)
            .ok_or_else(|| js_error(format!("Unknown plate type: {}", plate_type)))?;
        Ok(Self::open(Plate::new(u64::from(id), plate_type, name)))
    }

    /// Open a stored plate record.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<PlateSession, JsValue> {
        Plate::from_json(json).map(Self::open).map_err(js_error)
    }

    /// Ids of every registered plate type, as JSON.
    #[wasm_bindgen(js_name = plateTypes)]
    pub fn plate_types() -> Result<String, JsValue> {
        serde_json::to_string(PlateType::all()).map_err(js_error)
    }

    /// Replace the layout used for hit testing: `{ "A1": {x, y, width, height}, ... }`.
    #[wasm_bindgen(js_name = setLayout)]
    pub fn set_layout(&mut self, json: &str) -> Result<(), JsValue> {
        self.layout = serde_json::from_str(json).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clickWell)]
    pub fn click_well(&mut self, id: &str, modifiers_json: &str) -> bool {
        self.editor
            .selection_mut()
            .click_well_id(&WellId::from(id), modifiers(modifiers_json))
    }

    #[wasm_bindgen(js_name = clickRow)]
    pub fn click_row(&mut self, row: usize, modifiers_json: &str) -> bool {
        self.editor
            .click_header(crate::selection::SelectionTarget::Row(row), modifiers(modifiers_json))
    }

    #[wasm_bindgen(js_name = clickColumn)]
    pub fn click_column(&mut self, col: usize, modifiers_json: &str) -> bool {
        self.editor
            .click_header(crate::selection::SelectionTarget::Column(col), modifiers(modifiers_json))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers_json: &str, touch: bool) -> bool {
        let event = Event::PointerPressed {
            button: MouseButton::Left,
            position: Point::new(x, y),
            modifiers: modifiers(modifiers_json),
            source: if touch {
                PointerSource::Touch
            } else {
                PointerSource::Mouse
            },
        };
        self.editor.handle_event(&event, &self.layout)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let event = Event::PointerMoved {
            position: Point::new(x, y),
        };
        self.editor.handle_event(&event, &self.layout)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32, modifiers_json: &str) -> bool {
        let event = Event::PointerReleased {
            button: MouseButton::Left,
            position: Point::new(x, y),
            modifiers: modifiers(modifiers_json),
        };
        self.editor.handle_event(&event, &self.layout)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, x: f32, y: f32) -> bool {
        let event = Event::PointerLeft {
            position: Point::new(x, y),
        };
        self.editor.handle_event(&event, &self.layout)
    }

    /// Current drag rectangle as JSON, or `null`.
    #[wasm_bindgen(js_name = dragRect)]
    pub fn drag_rect(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.editor.selection().drag_rect()).map_err(js_error)
    }

    /// Handle a DOM `KeyboardEvent.key`. `global` marks document-level listeners.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, modifiers_json: &str, global: bool) -> bool {
        match Key::from_dom_key(key) {
            Some(key) => self.editor.handle_key(key, modifiers(modifiers_json), global),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = applyColor)]
    pub fn apply_color(&mut self, kind_name: &str, color: &str) -> Result<bool, JsValue> {
        Ok(self.editor.apply_color(kind(kind_name)?, &Color::from(color)))
    }

    #[wasm_bindgen(js_name = removeColor)]
    pub fn remove_color(&mut self, kind_name: &str) -> Result<bool, JsValue> {
        Ok(self.editor.remove_color(kind(kind_name)?))
    }

    #[wasm_bindgen(js_name = clearSelectedWells)]
    pub fn clear_selected_wells(&mut self) -> bool {
        self.editor.clear_selected_wells()
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    #[wasm_bindgen(js_name = resetPlate)]
    pub fn reset_plate(&mut self) -> bool {
        self.editor.reset_plate()
    }

    /// Undo the last destructive edit. Returns the restored label, or
    /// `undefined` if nothing was restored.
    pub fn undo(&mut self) -> Option<String> {
        match self.editor.undo() {
            UndoOutcome::Restored(label) => Some(label),
            UndoOutcome::NothingToUndo | UndoOutcome::Failed(_) => None,
        }
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.editor.undo_manager().can_undo()
    }

    /// Context-menu action ids for a target, as a JSON array.
    #[wasm_bindgen(js_name = contextActions)]
    pub fn context_actions(scope: &str, value: &str) -> Result<String, JsValue> {
        let target = ContextTarget::parse(scope, value)
            .ok_or_else(|| js_error(format!("Unknown context target: {} {}", scope, value)))?;
        let ids: Vec<String> = crate::context_menu::available_actions(&target)
            .iter()
            .map(MenuAction::id)
            .collect();
        serde_json::to_string(&ids).map_err(js_error)
    }

    /// Run a context-menu action on a target.
    #[wasm_bindgen(js_name = contextAction)]
    pub fn context_action(
        &mut self,
        scope: &str,
        value: &str,
        action_id: &str,
        color: Option<String>,
    ) -> Result<bool, JsValue> {
        let target = ContextTarget::parse(scope, value)
            .ok_or_else(|| js_error(format!("Unknown context target: {} {}", scope, value)))?;
        let action = MenuAction::from_id(action_id)
            .ok_or_else(|| js_error(format!("Unknown action: {}", action_id)))?;
        let color = color.map(Color::new);
        Ok(self.editor.perform(&target, action, color.as_ref()))
    }

    #[wasm_bindgen(js_name = setPlateType)]
    pub fn set_plate_type(&mut self, id: &str) -> Result<(), JsValue> {
        self.editor.set_plate_type_id(id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: &str) {
        self.editor.set_name(name);
    }

    #[wasm_bindgen(js_name = setDescription)]
    pub fn set_description(&mut self, description: &str) {
        self.editor.set_description(description);
    }

    #[wasm_bindgen(js_name = setLegendLabel)]
    pub fn set_legend_label(&mut self, kind_name: &str, color: &str, text: &str) -> Result<bool, JsValue> {
        Ok(self
            .editor
            .set_legend_label(kind(kind_name)?, &Color::from(color), text))
    }

    #[wasm_bindgen(js_name = setShowOnWells)]
    pub fn set_show_on_wells(&mut self, kind_name: &str, color: &str, show: bool) -> Result<bool, JsValue> {
        Ok(self
            .editor
            .set_show_on_wells(kind(kind_name)?, &Color::from(color), show))
    }

    #[wasm_bindgen(js_name = moveLegendColor)]
    pub fn move_legend_color(&mut self, kind_name: &str, from: usize, to: usize) -> Result<bool, JsValue> {
        Ok(self.editor.move_legend_color(kind(kind_name)?, from, to))
    }

    /// Read model as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.editor.view()).map_err(js_error)
    }

    /// Legend as JSON.
    pub fn legend(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.editor.legend()).map_err(js_error)
    }

    /// Complete plate record for the host to store.
    pub fn save(&self) -> Result<String, JsValue> {
        match self.editor.save() {
            PlateEvent::Save(plate) => plate.to_json().map_err(js_error),
            PlateEvent::Delete(_) => Err(js_error("unexpected delete event")),
        }
    }

    /// Id of the plate to delete.
    pub fn delete(&self) -> f64 {
        match self.editor.delete() {
            PlateEvent::Delete(id) => id as f64,
            PlateEvent::Save(plate) => plate.id as f64,
        }
    }
}

/// Custom color presets from `localStorage` plus the default palette, as JSON.
#[wasm_bindgen(js_name = colorPresets)]
pub fn color_presets() -> Result<String, JsValue> {
    let store = LocalStore::open().map_err(js_error)?;
    serde_json::to_string(&ColorPresets::load(&store).all_colors()).map_err(js_error)
}

/// Add a custom color preset. Returns false for duplicates and non-hex values.
#[wasm_bindgen(js_name = addColorPreset)]
pub fn add_color_preset(color: &str) -> Result<bool, JsValue> {
    let mut store = LocalStore::open().map_err(js_error)?;
    let mut presets = ColorPresets::load(&store);
    if !presets.add(Color::from(color)) {
        return Ok(false);
    }
    Ok(presets.save(&mut store))
}

/// qPCR master-mix table as TSV, from a JSON recipe.
#[wasm_bindgen(js_name = qpcrTable)]
pub fn qpcr_table(json: &str) -> Result<String, JsValue> {
    let mix: crate::calc::MasterMix = serde_json::from_str(json).map_err(js_error)?;
    mix.to_tsv().map_err(js_error)
}

/// Serial-dilution table as TSV, from JSON parameters.
#[wasm_bindgen(js_name = dilutionTable)]
pub fn dilution_table(json: &str) -> Result<String, JsValue> {
    let dilution: crate::calc::SerialDilution = serde_json::from_str(json).map_err(js_error)?;
    dilution.to_tsv().map_err(js_error)
}
