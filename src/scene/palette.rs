use crate::foundation::core::Rgba8;

/// Slot conventionally used for title text.
pub const TITLE_SLOT: usize = 3;

/// Ordered scene colors, index-addressed by presentation code.
///
/// Entries are kept as the catalog sent them. Hex forms (`#rgb`, `#rrggbb`, with optional alpha)
/// are decoded up front; anything else, like a CSS color name, is passed through untouched and
/// color lookups for that slot use the caller's fallback. Lookups past the end fall back too.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<String>,
    #[serde(skip)]
    colors: Vec<Option<Rgba8>>,
}

impl Palette {
    /// Keep `entries` in order, decoding the ones that are hex colors.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut colors = Vec::with_capacity(entries.len());
        for (slot, entry) in entries.iter().enumerate() {
            let entry = entry.as_ref();
            let color = Rgba8::from_hex(entry).ok();
            if color.is_none() {
                tracing::debug!(slot, entry, "palette entry is not a hex color");
            }
            kept.push(entry.to_owned());
            colors.push(color);
        }
        Self {
            entries: kept,
            colors,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decoded color at `index`, or `fallback` when the slot is missing or not a hex color.
    pub fn get_or(&self, index: usize, fallback: Rgba8) -> Rgba8 {
        self.colors.get(index).copied().flatten().unwrap_or(fallback)
    }

    /// Title text color (slot 3, white when absent).
    pub fn title_color(&self) -> Rgba8 {
        self.get_or(TITLE_SLOT, Rgba8::WHITE)
    }

    /// Primary accent (slot 0, white when absent).
    pub fn accent(&self) -> Rgba8 {
        self.get_or(0, Rgba8::WHITE)
    }

    /// Entries as supplied.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/palette.rs"]
mod tests;
