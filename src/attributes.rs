//! Per-well visual attributes.
//!
//! A well appears in the store only while it carries at least one color;
//! setting its last attribute to transparent removes the entry entirely.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::model::{AttributeKind, Color, WellId};

/// Up to three optional colors carried by one well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl WellStyle {
    pub fn get(&self, kind: AttributeKind) -> Option<&Color> {
        match kind {
            AttributeKind::Fill => self.fill.as_ref(),
            AttributeKind::Border => self.border.as_ref(),
            AttributeKind::Background => self.background.as_ref(),
        }
    }

    fn slot(&mut self, kind: AttributeKind) -> &mut Option<Color> {
        match kind {
            AttributeKind::Fill => &mut self.fill,
            AttributeKind::Border => &mut self.border,
            AttributeKind::Background => &mut self.background,
        }
    }

    /// Set or clear one attribute. A transparent color clears it.
    pub fn set(&mut self, kind: AttributeKind, color: &Color) {
        *self.slot(kind) = (!color.is_transparent()).then(|| color.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.border.is_none() && self.background.is_none()
    }

    /// Set attributes as (kind, color) pairs, in `AttributeKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &Color)> {
        AttributeKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|color| (kind, color)))
    }
}

/// Mapping from well id to its colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WellAttributes {
    wells: BTreeMap<WellId, WellStyle>,
}

impl<'de> Deserialize<'de> for WellAttributes {
    /// Stored transparent colors are dropped, and so are wells left without any color.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<WellId, WellStyle>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(id, stored)| {
                let mut style = WellStyle::default();
                for (kind, color) in stored.iter() {
                    style.set(kind, color);
                }
                (id, style)
            })
            .collect())
    }
}

impl WellAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `kind` to `color` on every listed well; transparent removes it.
    /// Other kinds on the same wells are untouched.
    pub fn set_attribute<'a>(
        &mut self,
        well_ids: impl IntoIterator<Item = &'a WellId>,
        kind: AttributeKind,
        color: &Color,
    ) {
        let mut touched = 0usize;
        for id in well_ids {
            touched += 1;
            if color.is_transparent() {
                if let Some(style) = self.wells.get_mut(id) {
                    style.set(kind, color);
                    if style.is_empty() {
                        self.wells.remove(id);
                    }
                }
            } else {
                self.wells.entry(id.clone()).or_default().set(kind, color);
            }
        }
        log::debug!("🎨 Set {} = {} on {} wells", kind.name(), color, touched);
    }

    /// Remove every attribute from the listed wells.
    pub fn clear_wells<'a>(&mut self, well_ids: impl IntoIterator<Item = &'a WellId>) {
        let mut removed = 0usize;
        for id in well_ids {
            if self.wells.remove(id).is_some() {
                removed += 1;
            }
        }
        log::debug!("🧹 Cleared {} wells", removed);
    }

    /// Empty the whole store.
    pub fn reset_all(&mut self) {
        self.wells.clear();
        log::debug!("🧹 All well attributes reset");
    }

    /// Keep only wells accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&WellId) -> bool) {
        self.wells.retain(|id, _| keep(id));
    }

    pub fn get(&self, id: &WellId) -> Option<&WellStyle> {
        self.wells.get(id)
    }

    pub fn contains(&self, id: &WellId) -> bool {
        self.wells.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WellId, &WellStyle)> {
        self.wells.iter()
    }

    pub fn well_ids(&self) -> impl Iterator<Item = &WellId> {
        self.wells.keys()
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

impl FromIterator<(WellId, WellStyle)> for WellAttributes {
    fn from_iter<I: IntoIterator<Item = (WellId, WellStyle)>>(iter: I) -> Self {
        Self {
            wells: iter.into_iter().filter(|(_, style)| !style.is_empty()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<WellId> {
        names.iter().map(|n| WellId::from(*n)).collect()
    }

    #[test]
    fn set_keeps_other_kinds() {
        let mut store = WellAttributes::new();
        let wells = ids(&["A1"]);
        store.set_attribute(&wells, AttributeKind::Fill, &Color::from("#ff0000"));
        store.set_attribute(&wells, AttributeKind::Border, &Color::from("#0000ff"));
        store.set_attribute(&wells, AttributeKind::Fill, &Color::from("#00ff00"));

        let style = store.get(&wells[0]).unwrap();
        assert_eq!(style.fill, Some(Color::from("#00ff00")));
        assert_eq!(style.border, Some(Color::from("#0000ff")));
        assert_eq!(style.background, None);
    }

    #[test]
    fn removing_last_attribute_drops_entry() {
        let mut store = WellAttributes::new();
        let wells = ids(&["B2"]);
        store.set_attribute(&wells, AttributeKind::Background, &Color::from("#eeeeee"));
        assert!(store.contains(&wells[0]));

        store.set_attribute(&wells, AttributeKind::Background, &Color::transparent());
        assert!(!store.contains(&wells[0]));
        assert!(store.is_empty());
    }

    #[test]
    fn removing_one_of_two_keeps_entry() {
        let mut store = WellAttributes::new();
        let wells = ids(&["C3"]);
        store.set_attribute(&wells, AttributeKind::Fill, &Color::from("#111111"));
        store.set_attribute(&wells, AttributeKind::Border, &Color::from("#222222"));
        store.set_attribute(&wells, AttributeKind::Fill, &Color::transparent());

        let style = store.get(&wells[0]).unwrap();
        assert_eq!(style.fill, None);
        assert_eq!(style.border, Some(Color::from("#222222")));
    }

    #[test]
    fn loading_drops_transparent_and_empty_wells() {
        let store: WellAttributes = serde_json::from_str(
            r##"{"A1": {}, "B2": {"fill": "transparent"}, "C3": {"fill": "transparent", "border": "#123456"}}"##,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&WellId::from("A1")));
        assert!(!store.contains(&WellId::from("B2")));
        let style = store.get(&WellId::from("C3")).unwrap();
        assert_eq!(style.fill, None);
        assert_eq!(style.border, Some(Color::from("#123456")));
    }

    #[test]
    fn transparent_on_uncolored_well_is_noop() {
        let mut store = WellAttributes::new();
        store.set_attribute(&ids(&["D4"]), AttributeKind::Fill, &Color::transparent());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_and_reset() {
        let mut store = WellAttributes::new();
        let wells = ids(&["A1", "A2", "A3"]);
        store.set_attribute(&wells, AttributeKind::Fill, &Color::from("#abcdef"));
        store.set_attribute(&wells[..1], AttributeKind::Border, &Color::from("#123456"));

        store.clear_wells(&wells[..2]);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&wells[2]));

        store.reset_all();
        assert!(store.is_empty());
    }

    #[test]
    fn serialized_form_omits_unset_kinds() {
        let mut store = WellAttributes::new();
        store.set_attribute(&ids(&["A1"]), AttributeKind::Fill, &Color::from("#ff0000"));
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r##"{"A1":{"fill":"#ff0000"}}"##);
    }
}
