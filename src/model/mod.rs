//! Data models for the plate-map engine.

mod color;
mod plate_type;
mod well;

pub use color::{AttributeKind, Color};
pub use plate_type::{PlateCategory, PlateType};
pub use well::{WellId, WellIndex};
