use std::collections::HashMap;

use protocalc_ui::{Bounds, Event, Modifiers, MouseButton, Point, PointerSource};

use super::{click, editor_96, ids, selected};
use crate::model::WellId;
use crate::selection::SelectionTarget;

#[test]
fn shift_click_selects_block() {
    let mut editor = editor_96();
    click(&mut editor, "A1", Modifiers::NONE);
    click(&mut editor, "C3", Modifiers::SHIFT);
    assert_eq!(
        selected(&editor),
        vec!["A1", "A2", "A3", "B1", "B2", "B3", "C1", "C2", "C3"]
    );
}

// Ctrl on the row header toggles the whole row. Ctrl on a single well in that
// row toggles only that well.
#[test]
fn ctrl_click_row_turns_full_row_off() {
    let mut editor = editor_96();
    click(&mut editor, "A4", Modifiers::NONE);
    editor.click_header(SelectionTarget::Row(1), Modifiers::NONE);
    assert_eq!(editor.selected().len(), 13);

    click(&mut editor, "B5", Modifiers::CTRL);
    assert_eq!(editor.selected().len(), 12);
    assert!(!editor.selected().contains(&WellId::from("B5")));
    click(&mut editor, "B5", Modifiers::CTRL);

    editor.click_header(SelectionTarget::Row(1), Modifiers::CTRL);
    assert_eq!(selected(&editor), vec!["A4"]);
}

#[test]
fn ctrl_row_toggle_twice_restores_selection() {
    let mut editor = editor_96();
    for well in ["A1", "B3", "H12"] {
        click(&mut editor, well, Modifiers::CTRL);
    }
    let before = editor.selected().clone();
    editor.click_header(SelectionTarget::Row(1), Modifiers::CTRL);
    assert_ne!(editor.selected(), &before);
    editor.click_header(SelectionTarget::Row(1), Modifiers::CTRL);
    // B3 was part of the row, so the first toggle selected the rest of B
    // and the second removed all of B
    let mut expected = before.clone();
    expected.remove(&WellId::from("B3"));
    assert_eq!(editor.selected(), &expected);

    editor.click_header(SelectionTarget::Row(1), Modifiers::CTRL);
    editor.click_header(SelectionTarget::Row(1), Modifiers::CTRL);
    assert_eq!(editor.selected(), &expected);
}

#[test]
fn drag_excludes_partially_covered_wells() {
    let mut editor = editor_96();
    let layout: HashMap<WellId, Bounds> = [
        ("D4", Bounds::new(100.0, 100.0, 20.0, 20.0)),
        ("D5", Bounds::new(130.0, 100.0, 20.0, 20.0)),
    ]
    .into_iter()
    .map(|(id, b)| (WellId::from(id), b))
    .collect();

    let press = Event::PointerPressed {
        button: MouseButton::Left,
        position: Point::new(90.0, 90.0),
        modifiers: Modifiers::NONE,
        source: PointerSource::Touch,
    };
    editor.handle_event(&press, &layout);
    editor.handle_event(&Event::PointerMoved { position: Point::new(140.0, 130.0) }, &layout);
    let release = Event::PointerReleased {
        button: MouseButton::Left,
        position: Point::new(140.0, 130.0),
        modifiers: Modifiers::NONE,
    };
    assert!(editor.handle_event(&release, &layout));
    assert_eq!(editor.selected().iter().cloned().collect::<Vec<_>>(), ids(&["D4"]));
}

#[test]
fn missing_modifier_fields_act_as_plain_click() {
    let raw: protocalc_ui::RawModifiers = serde_json::from_str(r#"{"shiftKey": true}"#).unwrap();
    let mut editor = editor_96();
    click(&mut editor, "B2", Modifiers::NONE);
    click(&mut editor, "D4", raw.into());
    assert_eq!(editor.selected().len(), 9);

    let none: protocalc_ui::RawModifiers = serde_json::from_str("{}").unwrap();
    click(&mut editor, "H12", none.into());
    assert_eq!(editor.selected().len(), 10);
}
