//! Plate instances and their persisted record.
//!
//! A plate record is what the host stores on explicit save:
//!
//! ```json
//! {
//!   "id": 3,
//!   "type": "96-well",
//!   "wellData": { "A1": { "fill": "#ff0000" } },
//!   "legend": { "fill": { "entries": { "#ff0000": { "label": "Control", ... } }, "order": ["#ff0000"] }, ... },
//!   "metadata": { "name": "Plate 3", "description": "", "createdAt": 1700000000000 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::attributes::WellAttributes;
use crate::error::PlateError;
use crate::legend::{self, Legend};
use crate::model::PlateType;

/// Identifier of a plate within a collection.
pub type PlateId = u64;

/// Milliseconds since the Unix epoch, 0 if the clock is before the epoch.
pub fn timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// User-facing plate metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
}

impl PlateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            created_at: timestamp_millis(),
        }
    }
}

/// One plate: its shape, well colors, legend and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plate {
    pub id: PlateId,
    #[serde(rename = "type")]
    pub plate_type: PlateType,
    #[serde(default)]
    pub well_data: WellAttributes,
    #[serde(default)]
    pub legend: Legend,
    pub metadata: PlateMetadata,
}

impl Plate {
    /// Create an empty plate of the given type.
    pub fn new(id: PlateId, plate_type: PlateType, name: impl Into<String>) -> Self {
        Self {
            id,
            plate_type,
            well_data: WellAttributes::new(),
            legend: Legend::new(),
            metadata: PlateMetadata::new(name),
        }
    }

    /// Parse a stored record, validating well ids and rebuilding derived legend data.
    pub fn from_json(json: &str) -> Result<Self, PlateError> {
        let mut plate: Plate = serde_json::from_str(json)?;
        plate.validate()?;
        plate.legend = legend::reconcile(&plate.legend, &plate.well_data);
        Ok(plate)
    }

    /// Serialize the record.
    pub fn to_json(&self) -> Result<String, PlateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that every colored well exists on this plate's grid.
    pub fn validate(&self) -> Result<(), PlateError> {
        let labels = self.plate_type.labels();
        match self.well_data.well_ids().find(|id| !labels.contains(id)) {
            Some(well) => Err(PlateError::InvalidWell {
                well: well.clone(),
                plate_type: self.plate_type.id.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeKind, Color, WellId};

    #[test]
    fn record_uses_host_field_names() {
        let plate = Plate::new(7, PlateType::default(), "Plate 7");
        let value: serde_json::Value = serde_json::from_str(&plate.to_json().unwrap()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "96-well");
        assert!(value["wellData"].is_object());
        assert_eq!(value["metadata"]["name"], "Plate 7");
        assert!(value["metadata"]["createdAt"].as_u64().unwrap() > 0);
    }

    #[test]
    fn from_json_rebuilds_legend_wells() {
        let json = r##"{
            "id": 1,
            "type": "24-well",
            "wellData": { "A1": { "fill": "#ff0000" }, "B2": { "fill": "#ff0000" } },
            "legend": { "fill": { "entries": { "#ff0000": { "label": "Control", "showOnWells": true, "wells": ["D6"] } }, "order": ["#ff0000"] } },
            "metadata": { "name": "Import", "createdAt": 5 }
        }"##;
        let plate = Plate::from_json(json).unwrap();
        let entry = plate
            .legend
            .entry(AttributeKind::Fill, &Color::from("#ff0000"))
            .unwrap();
        assert_eq!(entry.label, "Control");
        assert_eq!(entry.wells, vec![WellId::from("A1"), WellId::from("B2")]);
        assert_eq!(plate.metadata.description, "");
    }

    #[test]
    fn from_json_normalizes_stored_wells_and_legend() {
        let json = r##"{
            "id": 2,
            "type": "96-well",
            "wellData": { "A1": { "fill": "#f00" }, "A2": {}, "B2": { "fill": "transparent" } },
            "legend": { "fill": { "entries": { "#f00": { "label": "An overly long label for a control well" } }, "order": ["#f00", "#f00"] } },
            "metadata": { "name": "Import", "createdAt": 5 }
        }"##;
        let plate = Plate::from_json(json).unwrap();
        assert_eq!(plate.well_data.well_ids().collect::<Vec<_>>(), vec![&WellId::from("A1")]);
        assert_eq!(plate.legend.fill.order, vec![Color::from("#f00")]);
        let entry = plate
            .legend
            .entry(AttributeKind::Fill, &Color::from("#f00"))
            .unwrap();
        assert_eq!(entry.label.chars().count(), crate::constants::MAX_LEGEND_LABEL_LEN);
        assert_eq!(entry.wells, vec![WellId::from("A1")]);
    }

    #[test]
    fn from_json_rejects_foreign_wells_and_types() {
        let bad_well = r##"{"id":1,"type":"6-well","wellData":{"H12":{"fill":"#fff"}},"metadata":{"name":"x","createdAt":0}}"##;
        assert!(matches!(
            Plate::from_json(bad_well),
            Err(PlateError::InvalidWell { .. })
        ));
        let bad_type = r#"{"id":1,"type":"9-well","metadata":{"name":"x","createdAt":0}}"#;
        assert!(matches!(Plate::from_json(bad_type), Err(PlateError::Json(_))));
    }
}
