//! Screen geometry of rendered wells, used for drag-rectangle hit testing.
//!
//! The presentation layer owns pixel layout; the selection engine only asks a
//! [`WellLayout`] for each well's current bounding box.

use std::collections::{BTreeMap, HashMap};

use protocalc_ui::{Bounds, Point};

use crate::constants::PLATE_ASPECT_RATIO;
use crate::geometry::PlateLabels;
use crate::model::{WellId, WellIndex};

/// Source of on-screen bounding boxes for wells.
pub trait WellLayout {
    /// Current bounding box of a well, or None if it is not rendered.
    fn well_bounds(&self, id: &WellId) -> Option<Bounds>;

    /// Well under a screen point. Layouts that cannot enumerate their wells report none.
    fn well_at(&self, _point: Point) -> Option<WellId> {
        None
    }
}

impl WellLayout for HashMap<WellId, Bounds> {
    fn well_bounds(&self, id: &WellId) -> Option<Bounds> {
        self.get(id).copied()
    }

    fn well_at(&self, point: Point) -> Option<WellId> {
        self.iter()
            .find(|(_, b)| b.contains(point))
            .map(|(id, _)| id.clone())
    }
}

impl WellLayout for BTreeMap<WellId, Bounds> {
    fn well_bounds(&self, id: &WellId) -> Option<Bounds> {
        self.get(id).copied()
    }

    fn well_at(&self, point: Point) -> Option<WellId> {
        self.iter()
            .find(|(_, b)| b.contains(point))
            .map(|(id, _)| id.clone())
    }
}

impl<F> WellLayout for F
where
    F: Fn(&WellId) -> Option<Bounds>,
{
    fn well_bounds(&self, id: &WellId) -> Option<Bounds> {
        self(id)
    }
}

/// Uniform grid layout inside a plate area with a fixed 1.5 aspect ratio.
///
/// The plate area is split into a header band (row/column labels) and a body
/// of equal cells; each well is a square inset in its cell.
#[derive(Debug, Clone)]
pub struct GridLayout {
    labels: PlateLabels,
    /// Plate area in screen space
    area: Bounds,
    /// Size of the row/column header band, as a fraction of a cell
    header_fraction: f32,
    /// Gap between a well and its cell edge, as a fraction of the cell
    well_inset: f32,
}

impl GridLayout {
    /// Default well inset as a fraction of the cell size.
    pub const DEFAULT_INSET: f32 = 0.1;

    /// Lay out a plate at `origin` with the given width; height follows the aspect ratio.
    pub fn new(labels: PlateLabels, origin: Point, width: f32) -> Self {
        Self {
            labels,
            area: Bounds::new(origin.x, origin.y, width, width / PLATE_ASPECT_RATIO),
            header_fraction: 0.6,
            well_inset: Self::DEFAULT_INSET,
        }
    }

    pub fn area(&self) -> Bounds {
        self.area
    }

    fn cell_size(&self) -> f32 {
        let cols = self.labels.col_count() as f32 + self.header_fraction;
        let rows = self.labels.row_count() as f32 + self.header_fraction;
        (self.area.width / cols).min(self.area.height / rows)
    }

    fn body_origin(&self) -> Point {
        let cell = self.cell_size();
        Point::new(
            self.area.x + cell * self.header_fraction,
            self.area.y + cell * self.header_fraction,
        )
    }

    /// Bounding box of the cell (well plus inset) at `index`.
    pub fn cell_bounds(&self, index: WellIndex) -> Bounds {
        let cell = self.cell_size();
        let origin = self.body_origin();
        Bounds::new(
            origin.x + index.col as f32 * cell,
            origin.y + index.row as f32 * cell,
            cell,
            cell,
        )
    }
}

impl WellLayout for GridLayout {
    fn well_bounds(&self, id: &WellId) -> Option<Bounds> {
        let index = self.labels.well_indices(id)?;
        let cell = self.cell_bounds(index);
        let inset = cell.width * self.well_inset;
        Some(Bounds::new(
            cell.x + inset,
            cell.y + inset,
            cell.width - 2.0 * inset,
            cell.height - 2.0 * inset,
        ))
    }

    fn well_at(&self, point: Point) -> Option<WellId> {
        let cell = self.cell_size();
        if cell <= 0.0 {
            return None;
        }
        let origin = self.body_origin();
        let dx = point.x - origin.x;
        let dy = point.y - origin.y;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let col = (dx / cell) as usize;
        let row = (dy / cell) as usize;
        if row >= self.labels.row_count() || col >= self.labels.col_count() {
            return None;
        }
        let id = self.labels.well_id(WellIndex::new(row, col));
        self.well_bounds(&id)
            .filter(|b| b.contains(point))
            .map(|_| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_96() -> GridLayout {
        GridLayout::new(PlateLabels::new(8, 12), Point::zero(), 1260.0)
    }

    #[test]
    fn area_has_fixed_aspect_ratio() {
        let area = layout_96().area();
        assert!((area.width / area.height - PLATE_ASPECT_RATIO).abs() < 1e-4);
        let small = GridLayout::new(PlateLabels::new(2, 3), Point::zero(), 300.0).area();
        assert!((small.width / small.height - PLATE_ASPECT_RATIO).abs() < 1e-4);
    }

    #[test]
    fn wells_fit_inside_area_without_overlap() {
        let layout = layout_96();
        let area = layout.area();
        let a1 = layout.well_bounds(&WellId::from("A1")).unwrap();
        let a2 = layout.well_bounds(&WellId::from("A2")).unwrap();
        let h12 = layout.well_bounds(&WellId::from("H12")).unwrap();
        assert!(area.contains_bounds(&a1));
        assert!(area.contains_bounds(&h12));
        assert!(!a1.intersects(&a2));
        assert!(a2.x > a1.right());
    }

    #[test]
    fn well_at_point() {
        let layout = layout_96();
        let c5 = layout.well_bounds(&WellId::from("C5")).unwrap();
        assert_eq!(layout.well_at(c5.center()), Some(WellId::from("C5")));
        assert_eq!(layout.well_at(Point::new(1.0, 1.0)), None);
        assert_eq!(layout.well_bounds(&WellId::from("Z99")), None);
    }

    #[test]
    fn closures_and_maps_are_layouts() {
        let mut map = HashMap::new();
        map.insert(WellId::from("A1"), Bounds::new(0.0, 0.0, 10.0, 10.0));
        assert!(map.well_bounds(&WellId::from("A1")).is_some());
        assert_eq!(map.well_at(Point::new(5.0, 5.0)), Some(WellId::from("A1")));
        assert_eq!(map.well_at(Point::new(50.0, 5.0)), None);

        let fixed = |_: &WellId| Some(Bounds::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(fixed.well_bounds(&WellId::from("B2")), Some(Bounds::new(1.0, 1.0, 1.0, 1.0)));
    }
}
