//! Typewriter options: the three facets and the user-facing option set.

use crate::facet::{combine_first, combine_min, Facet};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Default vertical position of the caret line, as a fraction of the viewport.
pub const DEFAULT_TYPEWRITER_OFFSET: f64 = 0.5;

/// Fraction of the viewport height where the caret line is kept.
/// Smallest registered value wins.
pub static TYPEWRITER_OFFSET: Facet<f64> = Facet::define("typewriter.offset", |values| {
    combine_min(values, DEFAULT_TYPEWRITER_OFFSET)
});

/// Whether to pad the content so the caret can reach the offset line
/// at the start and end of the document. First registered value wins.
pub static PADDING_ENABLED: Facet<bool> =
    Facet::define("typewriter.padding", |values| combine_first(values, true));

/// Only scroll when the caret is below the offset line.
/// First registered value wins.
pub static FIX_BOTTOM_ONLY: Facet<bool> =
    Facet::define("typewriter.fix_bottom_only", |values| combine_first(values, false));

/// Options accepted by [`crate::typewriter_scroll`].
///
/// Every field is optional; an omitted field contributes nothing and
/// the facet default applies. The offset is not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypewriterOptions {
    pub typewriter_offset: Option<f64>,
    pub padding_option: Option<bool>,
    pub fix_bottom_only: Option<bool>,
}

impl TypewriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.typewriter_offset = Some(offset);
        self
    }

    pub fn with_padding(mut self, enabled: bool) -> Self {
        self.padding_option = Some(enabled);
        self
    }

    pub fn with_fix_bottom_only(mut self, enabled: bool) -> Self {
        self.fix_bottom_only = Some(enabled);
        self
    }

    /// Parses options from JSON, e.g. `{"typewriterOffset": 0.3}`.
    pub fn from_json_str(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid typewriter options: {}", e),
            )
        })
    }

    /// Loads options from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
