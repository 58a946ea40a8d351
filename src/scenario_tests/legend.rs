use protocalc_ui::Modifiers;

use super::{click, editor_96};
use crate::model::{AttributeKind, Color};

#[test]
fn recolored_well_drops_old_entry_and_label() {
    let mut editor = editor_96();
    let red = Color::from("#ff0000");
    let green = Color::from("#00ff00");
    click(&mut editor, "A1", Modifiers::NONE);
    editor.apply_color(AttributeKind::Fill, &red);
    editor.set_legend_label(AttributeKind::Fill, &red, "Control");
    let saved = editor.save();

    editor.apply_color(AttributeKind::Fill, &green);
    assert!(editor.legend().entry(AttributeKind::Fill, &red).is_none());
    let entry = editor.legend().entry(AttributeKind::Fill, &green).unwrap();
    assert_eq!(entry.label, "");
    assert!(!entry.show_on_wells);
    assert_eq!(editor.legend().kind(AttributeKind::Fill).order, vec![green]);
    assert_ne!(editor.save(), saved);
}

#[test]
fn new_colors_append_to_order() {
    let mut editor = editor_96();
    let (red, blue, green) = (
        Color::from("#ff0000"),
        Color::from("#0000ff"),
        Color::from("#00ff00"),
    );
    for (well, color) in [("A1", &red), ("A2", &blue), ("A3", &green)] {
        editor.clear_selection();
        click(&mut editor, well, Modifiers::NONE);
        editor.apply_color(AttributeKind::Fill, color);
    }
    assert_eq!(
        editor.legend().kind(AttributeKind::Fill).order,
        vec![red.clone(), blue.clone(), green.clone()]
    );

    // User reorder survives later edits
    editor.move_legend_color(AttributeKind::Fill, 2, 0);
    editor.clear_selection();
    click(&mut editor, "B1", Modifiers::NONE);
    editor.apply_color(AttributeKind::Fill, &blue);
    assert_eq!(
        editor.legend().kind(AttributeKind::Fill).order,
        vec![green, red, blue]
    );
}

#[test]
fn kinds_are_reconciled_independently() {
    let mut editor = editor_96();
    let red = Color::from("#ff0000");
    click(&mut editor, "C1", Modifiers::NONE);
    editor.apply_color(AttributeKind::Fill, &red);
    editor.apply_color(AttributeKind::Border, &red);
    editor.set_show_on_wells(AttributeKind::Border, &red, true);

    editor.remove_color(AttributeKind::Fill);
    assert!(editor.legend().entry(AttributeKind::Fill, &red).is_none());
    assert!(editor.legend().entry(AttributeKind::Border, &red).unwrap().show_on_wells);
}
