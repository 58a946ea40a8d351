//! Keyboard shortcuts for the plate editor.
//!
//! The undo chord (Ctrl+Z, or Cmd+Z on macOS) works from anywhere in the
//! document regardless of focus. Holding Shift turns it into the redo chord,
//! which must never trigger a plain undo.

use protocalc_ui::{Direction, Key, Modifiers};

/// An editor action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Undo the last destructive edit
    Undo,
    /// Move the well cursor
    Navigate(Direction),
    /// Select every well
    SelectAll,
    /// Deselect everything
    ClearSelection,
    /// Remove all colors from the selected wells
    ClearSelectedWells,
}

/// Whether the key combination is the undo chord (and not redo).
pub fn is_undo_chord(key: Key, modifiers: Modifiers) -> bool {
    matches!(key, Key::Char('z') | Key::Char('Z')) && modifiers.command() && !modifiers.shift
}

/// Whether the key combination is a redo chord (Ctrl+Shift+Z or Ctrl+Y).
pub fn is_redo_chord(key: Key, modifiers: Modifiers) -> bool {
    if !modifiers.command() {
        return false;
    }
    match key {
        Key::Char('z') | Key::Char('Z') => modifiers.shift,
        Key::Char('y') | Key::Char('Y') => true,
        _ => false,
    }
}

/// Get the editor action for a key press, if any.
///
/// `global` is true when the event was delivered to the document rather than
/// to the plate (e.g. while a text field has focus); only the undo chord is
/// honoured there.
pub fn shortcut_for_key(key: Key, modifiers: Modifiers, global: bool) -> Option<Shortcut> {
    if is_undo_chord(key, modifiers) {
        return Some(Shortcut::Undo);
    }
    if global || is_redo_chord(key, modifiers) {
        return None;
    }
    if let Some(direction) = key.direction() {
        return (!modifiers.any()).then_some(Shortcut::Navigate(direction));
    }
    match key {
        Key::Char('a') | Key::Char('A') if modifiers.command() => Some(Shortcut::SelectAll),
        Key::Escape => Some(Shortcut::ClearSelection),
        Key::Delete | Key::Backspace => Some(Shortcut::ClearSelectedWells),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_chord_requires_command_without_shift() {
        assert!(is_undo_chord(Key::Char('z'), Modifiers::CTRL));
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(is_undo_chord(Key::Char('z'), cmd));
        assert!(!is_undo_chord(Key::Char('z'), Modifiers::NONE));

        let redo = Modifiers {
            shift: true,
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(!is_undo_chord(Key::Char('Z'), redo));
        assert!(is_redo_chord(Key::Char('Z'), redo));
        assert!(is_redo_chord(Key::Char('y'), Modifiers::CTRL));
    }

    #[test]
    fn global_events_only_undo() {
        assert_eq!(
            shortcut_for_key(Key::Char('z'), Modifiers::CTRL, true),
            Some(Shortcut::Undo)
        );
        assert_eq!(shortcut_for_key(Key::Left, Modifiers::NONE, true), None);
        assert_eq!(shortcut_for_key(Key::Escape, Modifiers::NONE, true), None);
    }

    #[test]
    fn plate_shortcuts() {
        assert_eq!(
            shortcut_for_key(Key::Up, Modifiers::NONE, false),
            Some(Shortcut::Navigate(Direction::Up))
        );
        assert_eq!(shortcut_for_key(Key::Up, Modifiers::SHIFT, false), None);
        assert_eq!(
            shortcut_for_key(Key::Char('a'), Modifiers::CTRL, false),
            Some(Shortcut::SelectAll)
        );
        assert_eq!(shortcut_for_key(Key::Char('a'), Modifiers::NONE, false), None);
        assert_eq!(
            shortcut_for_key(Key::Delete, Modifiers::NONE, false),
            Some(Shortcut::ClearSelectedWells)
        );
        assert_eq!(
            shortcut_for_key(Key::Char('y'), Modifiers::CTRL, false),
            None
        );
    }
}
