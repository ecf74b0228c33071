#![allow(dead_code)]

pub mod mock_paraphraser;
pub mod stub_server;

use rephrase::controller::ParaphraseController;
use rephrase::surface::{EditableSurface, LayoutMetrics, SelectionHost, TextSurface};

/// Editor host, surface and controller wired together the way the GUI does
pub struct TestEditor {
    pub host: TextSurface,
    pub surface: EditableSurface,
    pub controller: ParaphraseController,
}

impl TestEditor {
    pub fn new(text: &str) -> Self {
        let host = TextSurface::new(text, LayoutMetrics::default());
        let surface = EditableSurface::new(host.text());
        Self {
            host,
            surface,
            controller: ParaphraseController::new(),
        }
    }

    /// Select the first occurrence of `needle` and report it
    pub fn select(&mut self, needle: &str) {
        assert!(self.host.select_text(needle), "'{}' not in document", needle);
        self.selection_changed();
    }

    /// Put the caret at `offset` and report it
    pub fn place_caret(&mut self, offset: usize) {
        self.host.collapse_to(offset);
        self.selection_changed();
    }

    /// Type at the caret and report the edit
    pub fn type_text(&mut self, text: &str) {
        let typed = self.host.type_text(text).expect("Typing failed");
        if let Some(edit) = self.surface.on_content_change(&self.host, Some(typed.offset)) {
            self.controller.on_document_edit(&edit);
        }
        self.selection_changed();
    }

    pub fn selection_changed(&mut self) {
        let event = self.surface.on_selection_change(&self.host);
        self.controller.on_selection(event);
    }

    pub fn text(&self) -> String {
        self.host.text()
    }
}
