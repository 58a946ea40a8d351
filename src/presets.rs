//! Color presets offered by the color picker.
//!
//! Custom presets are a flat list of hex colors shared by every plate,
//! persisted under a single storage key.

use crate::constants::storage_keys;
use crate::model::Color;
use crate::storage::{self, KeyValueStore};

/// Built-in palette shown before any custom presets.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
];

/// The built-in palette as colors.
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|hex| Color::from(*hex)).collect()
}

/// User-defined color presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPresets {
    colors: Vec<Color>,
}

impl ColorPresets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load presets from the store. Corrupt or non-hex entries are dropped.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let stored: Vec<String> =
            storage::load_json(store, storage_keys::CUSTOM_COLOR_PRESETS).unwrap_or_default();
        let mut presets = Self::new();
        for hex in stored {
            if !presets.add(Color::new(hex.clone())) {
                log::debug!("Skipping stored preset '{}'", hex);
            }
        }
        presets
    }

    /// Persist presets. Failures are logged.
    pub fn save(&self, store: &mut impl KeyValueStore) -> bool {
        let hexes: Vec<&str> = self.colors.iter().map(Color::as_str).collect();
        storage::save_json(store, storage_keys::CUSTOM_COLOR_PRESETS, &hexes)
    }

    /// Add a color. Returns false for non-hex colors and duplicates.
    pub fn add(&mut self, color: Color) -> bool {
        if !color.is_hex() {
            log::warn!("Rejected preset '{}': not a hex color", color);
            return false;
        }
        let color = Color::new(color.as_str().to_ascii_lowercase());
        if self.colors.contains(&color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    /// Remove a color. Returns false if it was not a preset.
    pub fn remove(&mut self, color: &Color) -> bool {
        let lower = color.as_str().to_ascii_lowercase();
        let before = self.colors.len();
        self.colors.retain(|c| c.as_str() != lower);
        self.colors.len() != before
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Built-in palette followed by custom presets not already in it.
    pub fn all_colors(&self) -> Vec<Color> {
        let mut all = default_palette();
        for color in &self.colors {
            if !all.contains(color) {
                all.push(color.clone());
            }
        }
        all
    }
}
