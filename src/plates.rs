//! Plate list owned by the host page.
//!
//! Editors never write to storage themselves; they emit [`PlateEvent`]s and
//! the collection applies them. Import and export work on the whole list as a
//! JSON array of plate records.

use serde::{Deserialize, Serialize};

use crate::editor::PlateEvent;
use crate::error::PlateError;
use crate::model::PlateType;
use crate::plate::{Plate, PlateId};

/// Ordered list of plates with id allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateCollection {
    plates: Vec<Plate>,
}

impl PlateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free id (one past the largest id in use).
    pub fn next_id(&self) -> PlateId {
        self.plates.iter().map(|p| p.id).max().map_or(1, |id| id + 1)
    }

    /// Create and store an empty plate, returning its id.
    pub fn create(&mut self, plate_type: PlateType) -> PlateId {
        let id = self.next_id();
        let name = format!("Plate {}", id);
        self.plates.push(Plate::new(id, plate_type, name));
        log::info!("➕ Created plate {} ({})", id, plate_type.id);
        id
    }

    /// Store a plate, replacing any plate with the same id.
    pub fn add(&mut self, plate: Plate) {
        match self.plates.iter_mut().find(|p| p.id == plate.id) {
            Some(existing) => *existing = plate,
            None => self.plates.push(plate),
        }
    }

    /// Replace an existing plate record.
    pub fn update(&mut self, plate: Plate) -> Result<(), PlateError> {
        let existing = self
            .plates
            .iter_mut()
            .find(|p| p.id == plate.id)
            .ok_or(PlateError::PlateNotFound(plate.id))?;
        *existing = plate;
        Ok(())
    }

    /// Remove a plate, returning it.
    pub fn delete(&mut self, id: PlateId) -> Result<Plate, PlateError> {
        let pos = self
            .plates
            .iter()
            .position(|p| p.id == id)
            .ok_or(PlateError::PlateNotFound(id))?;
        Ok(self.plates.remove(pos))
    }

    pub fn get(&self, id: PlateId) -> Option<&Plate> {
        self.plates.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plate> {
        self.plates.iter()
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Apply an editor event. Saves of unknown plates are added.
    pub fn handle(&mut self, event: PlateEvent) {
        match event {
            PlateEvent::Save(plate) => {
                log::debug!("Saving plate {}", plate.id);
                self.add(plate);
            }
            PlateEvent::Delete(id) => {
                if let Err(e) = self.delete(id) {
                    log::warn!("Delete ignored: {}", e);
                }
            }
        }
    }

    /// Serialize the whole list.
    pub fn to_json(&self) -> Result<String, PlateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a list of plate records, validating each and rebuilding legends.
    pub fn from_json(json: &str) -> Result<Self, PlateError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut collection = Self::new();
        for value in values {
            let plate = Plate::from_json(&value.to_string())?;
            if collection.get(plate.id).is_some() {
                log::warn!("Duplicate plate id {} in import, later record wins", plate.id);
            }
            collection.add(plate);
        }
        log::info!("Imported {} plates", collection.len());
        Ok(collection)
    }
}
