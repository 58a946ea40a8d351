//! Static registry of plate and container types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::PlateLabels;

/// How a plate type is rendered and whether its wells are addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateCategory {
    /// Row/column addressable well plate
    Grid,
    /// Culture dish, drawn as a single circle
    Dish,
    /// Culture flask, drawn as a single shape
    Flask,
    /// Chamber slide, drawn as a fixed sub-grid of chambers
    Chamber,
}

/// A named physical container shape with fixed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlateType {
    /// Registry identifier, e.g. `"96-well"`
    pub id: &'static str,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Rendering category
    pub category: PlateCategory,
}

const fn grid(id: &'static str, rows: usize, columns: usize) -> PlateType {
    PlateType {
        id,
        rows,
        columns,
        category: PlateCategory::Grid,
    }
}

const fn shape(id: &'static str, rows: usize, columns: usize, category: PlateCategory) -> PlateType {
    PlateType {
        id,
        rows,
        columns,
        category,
    }
}

static PLATE_TYPES: [PlateType; 15] = [
    grid("6-well", 2, 3),
    grid("12-well", 3, 4),
    grid("24-well", 4, 6),
    grid("48-well", 6, 8),
    grid("96-well", 8, 12),
    grid("384-well", 16, 24),
    shape("35mm", 1, 1, PlateCategory::Dish),
    shape("60mm", 1, 1, PlateCategory::Dish),
    shape("100mm", 1, 1, PlateCategory::Dish),
    shape("T25", 1, 1, PlateCategory::Flask),
    shape("T75", 1, 1, PlateCategory::Flask),
    shape("T175", 1, 1, PlateCategory::Flask),
    shape("2-chamber", 1, 2, PlateCategory::Chamber),
    shape("4-chamber", 2, 2, PlateCategory::Chamber),
    shape("8-chamber", 2, 4, PlateCategory::Chamber),
];

impl PlateType {
    /// Identifier of the type new plates start with.
    pub const DEFAULT_ID: &'static str = "96-well";

    /// Get all registered plate types.
    pub fn all() -> &'static [PlateType] {
        &PLATE_TYPES
    }

    /// Look up a plate type by identifier.
    pub fn lookup(id: &str) -> Option<PlateType> {
        PLATE_TYPES.iter().find(|pt| pt.id == id).copied()
    }

    /// Whether individual wells can be selected and colored.
    pub fn is_addressable(&self) -> bool {
        self.category == PlateCategory::Grid
    }

    /// Total number of positions in the grid.
    pub fn well_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Row and column labels for this plate shape.
    pub fn labels(&self) -> PlateLabels {
        PlateLabels::new(self.rows, self.columns)
    }
}

impl Default for PlateType {
    fn default() -> Self {
        grid(Self::DEFAULT_ID, 8, 12)
    }
}

impl Serialize for PlateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id)
    }
}

impl<'de> Deserialize<'de> for PlateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        PlateType::lookup(&id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown plate type '{}'", id)))
    }
}
