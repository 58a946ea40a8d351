//! ProtoCalc plate map
//!
//! Selection and annotation engine for multi-well lab plates: well addressing,
//! plate shapes, click/shift/ctrl/drag selection, per-well colors, a legend
//! derived from those colors, and bounded undo for destructive edits.
//!
//! The crate is presentation-neutral. Hosts render [`editor::PlateView`] and
//! feed pointer and keyboard input back through [`editor::PlateEditor`];
//! the browser build exposes the same engine through `wasm-bindgen`.

pub mod attributes;
pub mod calc;
pub mod config;
pub mod constants;
pub mod context_menu;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod keybindings;
pub mod layout;
pub mod legend;
pub mod logging;
pub mod model;
pub mod plate;
pub mod plates;
pub mod presets;
pub mod selection;
pub mod storage;
pub mod undo;

#[cfg(test)]
mod scenario_tests;

pub use attributes::{WellAttributes, WellStyle};
pub use config::{AppConfig, LogLevel, Session, Theme};
pub use context_menu::{ContextTarget, MenuAction};
pub use editor::{PlateEditor, PlateEvent, PlateView, WellDisplay};
pub use error::{CalcError, PlateError, StorageError, UndoError};
pub use geometry::PlateLabels;
pub use layout::{GridLayout, WellLayout};
pub use legend::{Legend, LegendEntry};
pub use model::{AttributeKind, Color, PlateCategory, PlateType, WellId, WellIndex};
pub use plate::{Plate, PlateId, PlateMetadata};
pub use plates::PlateCollection;
pub use presets::ColorPresets;
pub use selection::{SelectionEngine, SelectionTarget};
pub use storage::{KeyValueStore, MemoryStore};
pub use undo::{UndoManager, UndoOutcome};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
