//! Colors and the well attribute kinds they are applied to.

use serde::{Deserialize, Serialize};

use crate::constants::TRANSPARENT;

/// A color value as stored on a well: a hex string (or any CSS color) or the
/// `"transparent"` sentinel meaning "unset".
///
/// Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Create a color from any string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The "no color" sentinel.
    pub fn transparent() -> Self {
        Self(TRANSPARENT.to_string())
    }

    /// Whether this is the "no color" sentinel.
    pub fn is_transparent(&self) -> bool {
        self.0 == TRANSPARENT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is a `#rgb` or `#rrggbb` hex color.
    pub fn is_hex(&self) -> bool {
        let Some(digits) = self.0.strip_prefix('#') else {
            return false;
        };
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Parse the value as RGB if it is a hex color.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        if !self.is_hex() {
            return None;
        }
        let digits = &self.0[1..];
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        if digits.len() == 3 {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 16 + v;
            }
            Some(rgb)
        } else {
            Some([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ])
        }
    }

    /// Build a lowercase `#rrggbb` color from RGB channels.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The three visual attributes a well can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Fill,
    Border,
    Background,
}

impl AttributeKind {
    /// All kinds in display order.
    pub const ALL: [AttributeKind; 3] = [
        AttributeKind::Fill,
        AttributeKind::Border,
        AttributeKind::Background,
    ];

    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Fill => "Fill",
            AttributeKind::Border => "Border",
            AttributeKind::Background => "Background",
        }
    }

    /// Parse a kind name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}
