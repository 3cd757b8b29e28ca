//! Amenity records → icon + label pairs for the amenities grid.

use crate::api::Amenity;

/// Shown when an amenity has no entry in [`ICONS`].
pub const DEFAULT_ICON: &str = "•";

/// Lowercase amenity name → glyph. Matched on the whole trimmed name first,
/// then on the first entry whose key appears inside the name.
const ICONS: &[(&str, &str)] = &[
    ("wifi", "📶"),
    ("wi-fi", "📶"),
    ("internet", "📶"),
    ("pool", "🏊"),
    ("swimming pool", "🏊"),
    ("parking", "🅿"),
    ("kitchen", "🍳"),
    ("air conditioning", "❄"),
    ("ac", "❄"),
    ("breakfast", "🥐"),
    ("restaurant", "🍽"),
    ("bar", "🍸"),
    ("spa", "💆"),
    ("gym", "🏋"),
    ("fitness", "🏋"),
    ("tv", "📺"),
    ("bbq", "🔥"),
    ("barbecue", "🔥"),
    ("garden", "🌿"),
    ("beach", "🏖"),
    ("sea view", "🌊"),
    ("laundry", "🧺"),
    ("pets", "🐾"),
    ("pet friendly", "🐾"),
    ("airport transfer", "🚐"),
    ("shuttle", "🚐"),
    ("security", "🔒"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityDisplay {
    pub icon: &'static str,
    pub label: String,
}

pub fn amenity_icon(name: &str) -> &'static str {
    let name = name.trim().to_lowercase();
    if let Some((_, icon)) = ICONS.iter().find(|(key, _)| *key == name) {
        return *icon;
    }
    // Short keys like "ac" or "tv" would match inside unrelated words.
    ICONS
        .iter()
        .filter(|(key, _)| key.len() > 3)
        .find(|(key, _)| name.contains(key))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Nameless amenities are dropped.
pub fn display_amenities(amenities: &[Amenity]) -> Vec<AmenityDisplay> {
    amenities
        .iter()
        .filter_map(|a| a.name.as_deref().map(str::trim).filter(|n| !n.is_empty()))
        .map(|label| AmenityDisplay {
            icon: amenity_icon(label),
            label: label.to_string(),
        })
        .collect()
}
