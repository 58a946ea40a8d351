//! End-to-end plate editing scenarios, driven through [`PlateEditor`].

mod addressing;
mod legend;
mod selection;
mod undo;

use protocalc_ui::Modifiers;

use crate::editor::PlateEditor;
use crate::model::{PlateType, WellId};
use crate::plate::Plate;

fn editor_96() -> PlateEditor {
    PlateEditor::new(Plate::new(1, PlateType::default(), "Scenario"))
}

fn ids(wells: &[&str]) -> Vec<WellId> {
    wells.iter().map(|w| WellId::from(*w)).collect()
}

fn click(editor: &mut PlateEditor, well: &str, modifiers: Modifiers) -> bool {
    editor
        .selection_mut()
        .click_well_id(&WellId::from(well), modifiers)
}

fn selected(editor: &PlateEditor) -> Vec<&str> {
    editor.selected().iter().map(WellId::as_str).collect()
}
