//! protocalc_ui - presentation-neutral input and layout primitives
//!
//! Hosts (browser canvas, native shells, tests) translate their raw input into
//! these types so the plate-map engine never depends on a rendering technology.

mod constants;
mod event;
mod layout;
mod state;

pub use constants::UNDO_STACK_LIMIT;
pub use event::{Direction, Event, Key, Modifiers, MouseButton, PointerSource, RawModifiers};
pub use layout::{Bounds, Point};
pub use state::{DragState, UndoStack};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::{Direction, Event, Key, Modifiers, MouseButton, RawModifiers};
    pub use crate::layout::{Bounds, Point};
    pub use crate::state::{DragState, UndoStack};
}
