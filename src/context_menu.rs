//! Right-click actions for wells, rows, columns and the whole plate.
//!
//! The host owns menu positioning and visibility; this module only decides
//! which actions a target offers. [`crate::editor::PlateEditor::perform`]
//! executes them.

use crate::model::{AttributeKind, WellId};

/// What was right-clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextTarget {
    Well(WellId),
    Row(usize),
    Column(usize),
    Plate,
}

impl ContextTarget {
    /// Build a target from a scope name (`well`, `row`, `column`, `plate`)
    /// and its value (well id or 0-based index).
    pub fn parse(scope: &str, value: &str) -> Option<Self> {
        match scope {
            "well" => Some(ContextTarget::Well(WellId::from(value))),
            "row" => value.parse().ok().map(ContextTarget::Row),
            "column" => value.parse().ok().map(ContextTarget::Column),
            "plate" => Some(ContextTarget::Plate),
            _ => None,
        }
    }
}

/// An action offered in the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Apply the current color to one attribute kind
    SetColor(AttributeKind),
    /// Remove one attribute kind
    RemoveColor(AttributeKind),
    /// Remove every attribute from the target wells
    Clear,
    /// Reset the whole plate (wells, legend and selection)
    Reset,
}

impl MenuAction {
    /// Stable identifier, e.g. `"set_fill"` or `"clear"`.
    pub fn id(&self) -> String {
        match self {
            MenuAction::SetColor(kind) => format!("set_{}", kind.name().to_lowercase()),
            MenuAction::RemoveColor(kind) => format!("remove_{}", kind.name().to_lowercase()),
            MenuAction::Clear => "clear".to_string(),
            MenuAction::Reset => "reset".to_string(),
        }
    }

    /// Parse an identifier produced by [`MenuAction::id`].
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "clear" => return Some(MenuAction::Clear),
            "reset" => return Some(MenuAction::Reset),
            _ => {}
        }
        let (verb, kind) = id.split_once('_')?;
        let kind = AttributeKind::from_name(kind)?;
        match verb {
            "set" => Some(MenuAction::SetColor(kind)),
            "remove" => Some(MenuAction::RemoveColor(kind)),
            _ => None,
        }
    }

    /// Menu label for a target.
    pub fn label(&self, target: &ContextTarget) -> String {
        let scope = match target {
            ContextTarget::Well(_) => "well",
            ContextTarget::Row(_) => "row",
            ContextTarget::Column(_) => "column",
            ContextTarget::Plate => "plate",
        };
        match self {
            MenuAction::SetColor(kind) => format!("Set {} color", kind.name().to_lowercase()),
            MenuAction::RemoveColor(kind) => format!("Remove {} color", kind.name().to_lowercase()),
            MenuAction::Clear => format!("Clear {}", scope),
            MenuAction::Reset => "Reset plate".to_string(),
        }
    }

    /// Whether the action removes data and is recorded for undo.
    pub fn is_destructive(&self) -> bool {
        !matches!(self, MenuAction::SetColor(_))
    }
}

/// Actions available for a target, in menu order.
pub fn available_actions(target: &ContextTarget) -> Vec<MenuAction> {
    let mut actions: Vec<MenuAction> = AttributeKind::ALL
        .into_iter()
        .map(MenuAction::SetColor)
        .chain(AttributeKind::ALL.into_iter().map(MenuAction::RemoveColor))
        .collect();
    actions.push(MenuAction::Clear);
    if *target == ContextTarget::Plate {
        actions.push(MenuAction::Reset);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_only_offered_for_plate() {
        let well = available_actions(&ContextTarget::Well(WellId::from("A1")));
        assert_eq!(well.len(), 7);
        assert!(!well.contains(&MenuAction::Reset));

        let plate = available_actions(&ContextTarget::Plate);
        assert_eq!(plate.last(), Some(&MenuAction::Reset));
    }

    #[test]
    fn ids_round_trip() {
        for action in available_actions(&ContextTarget::Plate) {
            assert_eq!(MenuAction::from_id(&action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id("paint_fill"), None);
        assert_eq!(MenuAction::from_id("set_glow"), None);
    }

    #[test]
    fn parse_targets() {
        assert_eq!(ContextTarget::parse("row", "3"), Some(ContextTarget::Row(3)));
        assert_eq!(
            ContextTarget::parse("well", "B7"),
            Some(ContextTarget::Well(WellId::from("B7")))
        );
        assert_eq!(ContextTarget::parse("column", "x"), None);
        assert_eq!(ContextTarget::parse("tray", ""), None);
    }

    #[test]
    fn labels_name_the_scope() {
        assert_eq!(MenuAction::Clear.label(&ContextTarget::Row(2)), "Clear row");
        assert_eq!(
            MenuAction::RemoveColor(AttributeKind::Border).label(&ContextTarget::Plate),
            "Remove border color"
        );
        assert!(MenuAction::Clear.is_destructive());
        assert!(!MenuAction::SetColor(AttributeKind::Fill).is_destructive());
    }
}
