//! Color legend derived from well attributes.
//!
//! The legend keeps user-owned metadata (label, show-on-wells flag, display
//! order) per (kind, color) pair. [`reconcile`] rebuilds it against the
//! current well attributes: metadata survives for colors still in use, the
//! derived well lists are always recomputed, and unused colors are pruned.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::attributes::WellAttributes;
use crate::constants::MAX_LEGEND_LABEL_LEN;
use crate::model::{AttributeKind, Color, WellId};

/// Legend metadata for one (kind, color) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// User label, at most 30 characters
    #[serde(default)]
    pub label: String,
    /// Whether the label is drawn on the wells carrying this color
    #[serde(default)]
    pub show_on_wells: bool,
    /// Wells currently carrying this color, derived on every reconcile
    #[serde(default)]
    pub wells: Vec<WellId>,
}

/// Legend state for one attribute kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindLegend {
    #[serde(default)]
    pub entries: BTreeMap<Color, LegendEntry>,
    /// Display order; always the same color set as `entries`
    #[serde(default)]
    pub order: Vec<Color>,
}

impl KindLegend {
    /// Entries in display order.
    pub fn ordered(&self) -> impl Iterator<Item = (&Color, &LegendEntry)> {
        self.order
            .iter()
            .filter_map(|color| self.entries.get(color).map(|entry| (color, entry)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full legend of a plate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default)]
    pub fill: KindLegend,
    #[serde(default)]
    pub border: KindLegend,
    #[serde(default)]
    pub background: KindLegend,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self, kind: AttributeKind) -> &KindLegend {
        match kind {
            AttributeKind::Fill => &self.fill,
            AttributeKind::Border => &self.border,
            AttributeKind::Background => &self.background,
        }
    }

    fn kind_mut(&mut self, kind: AttributeKind) -> &mut KindLegend {
        match kind {
            AttributeKind::Fill => &mut self.fill,
            AttributeKind::Border => &mut self.border,
            AttributeKind::Background => &mut self.background,
        }
    }

    pub fn entry(&self, kind: AttributeKind, color: &Color) -> Option<&LegendEntry> {
        self.kind(kind).entries.get(color)
    }

    pub fn is_empty(&self) -> bool {
        AttributeKind::ALL.iter().all(|k| self.kind(*k).is_empty())
    }

    /// Set the label of an existing entry, truncated to the maximum length.
    /// Returns false if no entry exists for this pair.
    pub fn set_label(&mut self, kind: AttributeKind, color: &Color, text: &str) -> bool {
        let Some(entry) = self.kind_mut(kind).entries.get_mut(color) else {
            log::debug!("No legend entry for {} {}, label ignored", kind.name(), color);
            return false;
        };
        entry.label = text.chars().take(MAX_LEGEND_LABEL_LEN).collect();
        log::debug!("🏷️ Legend label {} {} = '{}'", kind.name(), color, entry.label);
        true
    }

    /// Toggle whether an entry's label is drawn on its wells.
    /// Returns false if no entry exists for this pair.
    pub fn set_show_on_wells(&mut self, kind: AttributeKind, color: &Color, show: bool) -> bool {
        let Some(entry) = self.kind_mut(kind).entries.get_mut(color) else {
            log::debug!("No legend entry for {} {}, flag ignored", kind.name(), color);
            return false;
        };
        entry.show_on_wells = show;
        true
    }

    /// Move the color at position `from` to position `to` in the display order
    /// of one kind, shifting the colors in between. Returns false if `from` is
    /// out of range; `to` is clamped to the last position.
    pub fn move_color(&mut self, kind: AttributeKind, from: usize, to: usize) -> bool {
        let order = &mut self.kind_mut(kind).order;
        if from >= order.len() {
            return false;
        }
        let to = to.min(order.len() - 1);
        let color = order.remove(from);
        order.insert(to, color);
        log::debug!("↕️ Moved {} legend color {} -> {}", kind.name(), from, to);
        true
    }

    /// Labels that should be drawn on a well, given its colors.
    pub fn labels_for<'c>(
        &self,
        colors: impl Iterator<Item = (AttributeKind, &'c Color)>,
    ) -> Vec<&str> {
        colors
            .filter_map(|(kind, color)| self.entry(kind, color))
            .filter(|entry| entry.show_on_wells && !entry.label.is_empty())
            .map(|entry| entry.label.as_str())
            .collect()
    }
}

/// Rebuild the legend from the current well attributes.
///
/// Metadata of colors still in use is kept, `wells` lists are replaced with
/// freshly derived ones, new colors get default metadata and are appended to
/// the display order in first-seen order, and unused colors are dropped from
/// both the entries and the order.
pub fn reconcile(prev: &Legend, attributes: &WellAttributes) -> Legend {
    let mut used: BTreeMap<AttributeKind, Vec<(Color, Vec<WellId>)>> = BTreeMap::new();
    for (id, style) in attributes.iter() {
        for (kind, color) in style.iter() {
            if color.is_transparent() {
                continue;
            }
            let pairs = used.entry(kind).or_default();
            match pairs.iter_mut().find(|(c, _)| c == color) {
                Some((_, wells)) => wells.push(id.clone()),
                None => pairs.push((color.clone(), vec![id.clone()])),
            }
        }
    }

    let mut next = Legend::new();
    for kind in AttributeKind::ALL {
        let previous = prev.kind(kind);
        let pairs = used.remove(&kind).unwrap_or_default();
        let in_use: BTreeSet<&Color> = pairs.iter().map(|(c, _)| c).collect();

        let mut seen: BTreeSet<&Color> = BTreeSet::new();
        let mut order: Vec<Color> = previous
            .order
            .iter()
            .filter(|c| in_use.contains(c) && seen.insert(*c))
            .cloned()
            .collect();
        for (color, _) in &pairs {
            if !order.contains(color) {
                order.push(color.clone());
            }
        }

        let mut entries = BTreeMap::new();
        for (color, wells) in pairs {
            let mut entry = previous.entries.get(&color).cloned().unwrap_or_default();
            if entry.label.chars().count() > MAX_LEGEND_LABEL_LEN {
                entry.label = entry.label.chars().take(MAX_LEGEND_LABEL_LEN).collect();
            }
            entry.wells = wells;
            entries.insert(color, entry);
        }

        *next.kind_mut(kind) = KindLegend { entries, order };
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(s: &str) -> Color {
        Color::from(s)
    }

    fn paint(store: &mut WellAttributes, wells: &[&str], kind: AttributeKind, c: &str) {
        let ids: Vec<WellId> = wells.iter().map(|w| WellId::from(*w)).collect();
        store.set_attribute(&ids, kind, &color(c));
    }

    #[test]
    fn derives_entries_and_wells() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1", "A2"], AttributeKind::Fill, "#ff0000");
        paint(&mut store, &["A2"], AttributeKind::Border, "#000000");

        let legend = reconcile(&Legend::new(), &store);
        let red = legend.entry(AttributeKind::Fill, &color("#ff0000")).unwrap();
        assert_eq!(red.wells, vec![WellId::from("A1"), WellId::from("A2")]);
        assert_eq!(red.label, "");
        assert!(!red.show_on_wells);
        assert_eq!(legend.border.order, vec![color("#000000")]);
        assert!(legend.background.is_empty());
    }

    #[test]
    fn metadata_survives_and_wells_are_rederived() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "#ff0000");
        let mut legend = reconcile(&Legend::new(), &store);
        assert!(legend.set_label(AttributeKind::Fill, &color("#ff0000"), "Control"));
        assert!(legend.set_show_on_wells(AttributeKind::Fill, &color("#ff0000"), true));

        // A stale cached well list must not leak through.
        legend.fill.entries.get_mut(&color("#ff0000")).unwrap().wells =
            vec![WellId::from("H12")];

        paint(&mut store, &["B1"], AttributeKind::Fill, "#ff0000");
        let legend = reconcile(&legend, &store);
        let entry = legend.entry(AttributeKind::Fill, &color("#ff0000")).unwrap();
        assert_eq!(entry.label, "Control");
        assert!(entry.show_on_wells);
        assert_eq!(entry.wells, vec![WellId::from("A1"), WellId::from("B1")]);
    }

    #[test]
    fn unused_colors_are_pruned_from_entries_and_order() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "#ff0000");
        paint(&mut store, &["A2"], AttributeKind::Fill, "#0000ff");
        let legend = reconcile(&Legend::new(), &store);

        store.clear_wells(&[WellId::from("A1")]);
        let legend = reconcile(&legend, &store);
        assert!(legend.entry(AttributeKind::Fill, &color("#ff0000")).is_none());
        assert_eq!(legend.fill.order, vec![color("#0000ff")]);
    }

    #[test]
    fn order_keeps_user_arrangement() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "red");
        paint(&mut store, &["A2"], AttributeKind::Fill, "blue");
        paint(&mut store, &["A3"], AttributeKind::Fill, "green");
        let mut legend = reconcile(&Legend::new(), &store);
        assert_eq!(legend.fill.order, vec![color("red"), color("blue"), color("green")]);

        assert!(legend.move_color(AttributeKind::Fill, 2, 0));
        assert_eq!(legend.fill.order, vec![color("green"), color("red"), color("blue")]);

        paint(&mut store, &["A4"], AttributeKind::Fill, "yellow");
        let legend = reconcile(&legend, &store);
        assert_eq!(
            legend.fill.order,
            vec![color("green"), color("red"), color("blue"), color("yellow")]
        );
    }

    #[test]
    fn move_color_bounds() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Border, "a");
        paint(&mut store, &["A2"], AttributeKind::Border, "b");
        let mut legend = reconcile(&Legend::new(), &store);

        assert!(!legend.move_color(AttributeKind::Border, 5, 0));
        assert!(legend.move_color(AttributeKind::Border, 0, 99));
        assert_eq!(legend.border.order, vec![color("b"), color("a")]);
        assert!(!legend.move_color(AttributeKind::Fill, 0, 0));
    }

    #[test]
    fn label_is_truncated() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "#abcdef");
        let mut legend = reconcile(&Legend::new(), &store);
        let long = "x".repeat(45);
        legend.set_label(AttributeKind::Fill, &color("#abcdef"), &long);
        let entry = legend.entry(AttributeKind::Fill, &color("#abcdef")).unwrap();
        assert_eq!(entry.label.chars().count(), MAX_LEGEND_LABEL_LEN);
        assert!(!legend.set_label(AttributeKind::Fill, &color("#000000"), "missing"));
    }

    #[test]
    fn stored_duplicates_and_long_labels_are_normalized() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "#f00");
        paint(&mut store, &["A2"], AttributeKind::Fill, "#0f0");
        let mut stored = Legend::new();
        stored.fill.order = vec![color("#f00"), color("#0f0"), color("#f00")];
        stored.fill.entries.insert(
            color("#f00"),
            LegendEntry {
                label: "y".repeat(40),
                ..LegendEntry::default()
            },
        );

        let legend = reconcile(&stored, &store);
        assert_eq!(legend.fill.order, vec![color("#f00"), color("#0f0")]);
        let entry = legend.entry(AttributeKind::Fill, &color("#f00")).unwrap();
        assert_eq!(entry.label, "y".repeat(MAX_LEGEND_LABEL_LEN));
    }

    #[test]
    fn labels_for_well_only_when_shown() {
        let mut store = WellAttributes::new();
        paint(&mut store, &["A1"], AttributeKind::Fill, "#ff0000");
        paint(&mut store, &["A1"], AttributeKind::Border, "#00ff00");
        let mut legend = reconcile(&Legend::new(), &store);
        legend.set_label(AttributeKind::Fill, &color("#ff0000"), "Treated");
        legend.set_label(AttributeKind::Border, &color("#00ff00"), "Replicate");
        legend.set_show_on_wells(AttributeKind::Border, &color("#00ff00"), true);

        let style = store.get(&WellId::from("A1")).unwrap();
        assert_eq!(legend.labels_for(style.iter()), vec!["Replicate"]);
    }
}
