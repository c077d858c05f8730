//! Session form: the current selection plus the preview surface

use super::payload::TagPayload;
use shared::models::{BrandScope, Selection, SelectionField, SelectionState};
use tag_printer::Barcode;

/// The single slot holding the most recently generated graphic
#[derive(Debug, Clone)]
pub struct Preview {
    pub barcode: Barcode,
    pub payload: TagPayload,
    pub label: String,
    /// SVG markup captured at generation time
    pub svg: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionForm {
    selection: Selection,
    preview: Option<Preview>,
}

impl SessionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn get(&self, field: SelectionField) -> Option<&str> {
        self.selection.get(field)
    }

    pub fn select(&mut self, field: SelectionField, value: Option<&str>, scope: BrandScope) {
        self.selection.select(field, value, scope);
    }

    pub fn clear(&mut self, field: SelectionField) {
        self.selection.clear(field);
    }

    /// Empty the three fields; the preview is kept
    pub fn reset(&mut self) {
        self.selection.reset();
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Replace whatever the preview surface showed
    pub fn show(&mut self, preview: Preview) {
        self.preview = Some(preview);
    }
}
