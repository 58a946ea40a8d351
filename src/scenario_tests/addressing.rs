use std::collections::BTreeSet;

use crate::geometry;
use crate::model::{PlateType, WellIndex};

#[test]
fn every_registered_grid_round_trips() {
    for plate_type in PlateType::all() {
        let labels = plate_type.labels();
        for row in 0..labels.row_count() {
            for col in 0..labels.col_count() {
                let id = geometry::well_id(row, col, &labels.rows, &labels.cols);
                assert_eq!(
                    geometry::well_indices(&id, &labels.rows, &labels.cols),
                    Some(WellIndex::new(row, col)),
                    "{} on {}",
                    id,
                    plate_type.id
                );
            }
        }
    }
}

#[test]
fn regions_are_corner_independent() {
    let labels = PlateType::lookup("384-well").unwrap().labels();
    let corners = [
        (WellIndex::new(3, 20), WellIndex::new(11, 4)),
        (WellIndex::new(0, 0), WellIndex::new(15, 23)),
        (WellIndex::new(7, 7), WellIndex::new(7, 7)),
    ];
    for (a, b) in corners {
        let ab = geometry::rectangular_region(a, b, &labels.rows, &labels.cols);
        let ba = geometry::rectangular_region(b, a, &labels.rows, &labels.cols);
        let expected = (a.row.abs_diff(b.row) + 1) * (a.col.abs_diff(b.col) + 1);
        assert_eq!(ab.len(), expected);
        assert_eq!(
            ab.into_iter().collect::<BTreeSet<_>>(),
            ba.into_iter().collect::<BTreeSet<_>>()
        );
    }
}
