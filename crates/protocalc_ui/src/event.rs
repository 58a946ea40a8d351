use crate::Point;
use serde::{Deserialize, Serialize};

/// Events the plate-map engine responds to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer (mouse button or finger) pressed.
    PointerPressed {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
        source: PointerSource,
    },
    /// Pointer moved.
    PointerMoved { position: Point },
    /// Pointer released.
    PointerReleased {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    },
    /// Pointer left the tracked area.
    PointerLeft { position: Point },
    /// Keyboard key pressed.
    KeyPressed { key: Key, modifiers: Modifiers },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Where a pointer event originated. A single touch is treated like a left-button drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Keyboard keys (only the ones the editor reacts to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Escape,
    Delete,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Arrow direction for this key, if it is an arrow key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Escape" => Some(Key::Escape),
            "Delete" => Some(Key::Delete),
            "Backspace" => Some(Key::Backspace),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Grid movement direction for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column delta for one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only Shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on Windows/Linux or Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Any selection-relevant modifier held.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Modifier state as delivered by a host that may omit fields.
///
/// Missing fields resolve to `false` so a malformed event behaves like a
/// plain interaction instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawModifiers {
    pub shift_key: Option<bool>,
    pub ctrl_key: Option<bool>,
    pub alt_key: Option<bool>,
    pub meta_key: Option<bool>,
}

impl RawModifiers {
    /// Resolve to concrete modifiers, substituting `false` for missing fields.
    pub fn resolve(self) -> Modifiers {
        if self.shift_key.is_none()
            || self.ctrl_key.is_none()
            || self.alt_key.is_none()
            || self.meta_key.is_none()
        {
            log::debug!("Event without full modifier state, missing keys treated as released");
        }
        Modifiers {
            shift: self.shift_key.unwrap_or(false),
            ctrl: self.ctrl_key.unwrap_or(false),
            alt: self.alt_key.unwrap_or(false),
            meta: self.meta_key.unwrap_or(false),
        }
    }
}

impl From<RawModifiers> for Modifiers {
    fn from(raw: RawModifiers) -> Self {
        raw.resolve()
    }
}
