//! Error types for plate records, undo restore and persistence.

use thiserror::Error;

use crate::model::WellId;

/// Errors raised when importing or validating plate records.
#[derive(Error, Debug)]
pub enum PlateError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plate type id not present in the registry
    #[error("Unknown plate type: {0}")]
    UnknownPlateType(String),

    /// A well id that does not exist on the plate's grid
    #[error("Well '{well}' is not part of a {plate_type} plate")]
    InvalidWell {
        /// The offending well id
        well: WellId,
        /// Plate type the well was checked against
        plate_type: String,
    },

    /// Plate id not found in a collection
    #[error("Plate not found: {0}")]
    PlateNotFound(u64),
}

/// Errors raised while re-applying an undo snapshot.
#[derive(Error, Debug)]
pub enum UndoError {
    /// Snapshot refers to wells the current plate shape does not have
    #[error("Snapshot '{label}' references well '{well}' outside the current plate")]
    IncompatibleSnapshot {
        /// Snapshot label
        label: String,
        /// First offending well
        well: WellId,
    },
}

/// Errors from the key-value store used for presets and session state.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored value could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error in the file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store not reachable (no config dir, no localStorage)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the lab calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// An input is NaN or infinite
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    /// An input that must be positive is zero or negative
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Input name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Dilution factor of 1 or less
    #[error("Dilution factor must be greater than 1, got {0}")]
    FactorTooSmall(f64),

    /// Zero reactions or zero dilution steps
    #[error("{0} must be at least 1")]
    Empty(&'static str),
}
