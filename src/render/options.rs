//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Options for rendering a placement as HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Class of each ad slot element
    pub slot_class: String,

    /// Prefix for slot element ids; the ad index is appended
    pub slot_id_prefix: String,

    /// Reserved slot width in pixels
    pub slot_width: u32,

    /// Reserved slot height in pixels
    pub slot_height: u32,

    /// Visible label inside each slot (e.g. "Advertisement")
    pub label: Option<String>,

    /// Newline around each slot element
    pub newline_around_slots: bool,

    /// Collect placement statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slot class.
    pub fn with_slot_class(mut self, class: impl Into<String>) -> Self {
        self.slot_class = class.into();
        self
    }

    /// Set the slot id prefix.
    pub fn with_slot_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.slot_id_prefix = prefix.into();
        self
    }

    /// Set the reserved slot size.
    pub fn with_slot_size(mut self, width: u32, height: u32) -> Self {
        self.slot_width = width;
        self.slot_height = height;
        self
    }

    /// Set the slot label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Remove the slot label.
    pub fn without_label(mut self) -> Self {
        self.label = None;
        self
    }

    /// Enable or disable newlines around slots.
    pub fn with_newlines(mut self, newlines: bool) -> Self {
        self.newline_around_slots = newlines;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            slot_class: "ad-slot".to_string(),
            slot_id_prefix: "ad-slot-".to_string(),
            slot_width: 300,
            slot_height: 250,
            label: Some("Advertisement".to_string()),
            newline_around_slots: true,
            collect_stats: false,
        }
    }
}
