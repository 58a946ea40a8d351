//! Bench calculators that sit next to the plate map.
//!
//! Both calculators are pure: they validate their inputs, compute a table and
//! render it as tab-separated text for pasting into a spreadsheet.

pub mod dilution;
pub mod qpcr;

pub use crate::error::CalcError;
pub use dilution::{DilutionStep, SerialDilution};
pub use qpcr::{MasterMix, MixLine, Reagent};

/// Reject NaN and infinities.
pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite(field))
    }
}

/// Reject non-finite, zero and negative values.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::NotPositive { field, value })
    }
}

/// Format a volume or concentration for table output.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
