use protocalc_ui::{Key, Modifiers};

use super::{click, editor_96};
use crate::context_menu::{ContextTarget, MenuAction};
use crate::model::{AttributeKind, Color};
use crate::undo::UndoOutcome;

#[test]
fn history_keeps_newest_fifty() {
    let mut editor = editor_96();
    click(&mut editor, "A1", Modifiers::NONE);
    for _ in 0..60 {
        editor.apply_color(AttributeKind::Fill, &Color::from("#123456"));
        assert!(editor.clear_selected_wells());
    }
    assert_eq!(editor.undo_manager().len(), 50);

    let mut restored = 0;
    while editor.undo().is_restored() {
        restored += 1;
    }
    assert_eq!(restored, 50);
    assert_eq!(editor.undo(), UndoOutcome::NothingToUndo);
}

#[test]
fn undo_after_reset_restores_everything() {
    let mut editor = editor_96();
    let red = Color::from("#ff0000");
    click(&mut editor, "A1", Modifiers::NONE);
    click(&mut editor, "H12", Modifiers::SHIFT);
    editor.apply_color(AttributeKind::Background, &red);
    editor.set_legend_label(AttributeKind::Background, &red, "Samples");
    let before = (
        editor.well_data().clone(),
        editor.selected().clone(),
        editor.legend().clone(),
    );

    editor.perform(&ContextTarget::Plate, MenuAction::Reset, None);
    assert!(editor.well_data().is_empty());

    assert!(editor.handle_key(Key::Char('z'), Modifiers::CTRL, true));
    assert_eq!(
        (
            editor.well_data().clone(),
            editor.selected().clone(),
            editor.legend().clone(),
        ),
        before
    );
}

#[test]
fn redo_chord_never_undoes() {
    let mut editor = editor_96();
    click(&mut editor, "A1", Modifiers::NONE);
    editor.apply_color(AttributeKind::Fill, &Color::from("#ff0000"));
    editor.clear_selected_wells();

    let redo = Modifiers {
        shift: true,
        meta: true,
        ..Modifiers::NONE
    };
    assert!(!editor.handle_key(Key::Char('Z'), redo, true));
    assert!(editor.undo_manager().can_undo());
}
