//! Main application state for the Rephrase GUI
//!
//! Contains the RephraseApp struct and initialization logic.

use iced::widget::text_editor;
use iced::Task;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::controller::ParaphraseController;
use crate::paraphrase::Paraphraser;
use crate::surface::{EditableSurface, LayoutMetrics, Point, SelectionHost, TextSurface};

use super::messages::Message;
use super::state::EditorBridge;

/// Inner padding of the editor widget, in pixels
pub const EDITOR_PADDING: f32 = 12.0;

/// Main application state
pub struct RephraseApp {
    /// Widget content
    pub(crate) content: text_editor::Content,
    /// In-memory mirror of the widget used as the selection host
    pub(crate) surface: TextSurface,
    /// Content / selection reporting
    pub(crate) editable: EditableSurface,
    /// Paraphrase state machine
    pub(crate) controller: ParaphraseController,
    /// Selection anchor tracking for the widget
    pub(crate) bridge: EditorBridge,
    /// Configured paraphrase backend
    pub(crate) paraphraser: Arc<dyn Paraphraser>,
    /// Configuration
    pub(crate) config: Config,
    /// Status line
    pub(crate) status: String,
}

impl RephraseApp {
    /// Create a new RephraseApp instance
    pub fn new(config: Config, paraphraser: Arc<dyn Paraphraser>) -> (Self, Task<Message>) {
        let content = text_editor::Content::with_text(&config.initial_text);

        let metrics = LayoutMetrics::monospace(
            config.editor_font_size,
            Point {
                x: EDITOR_PADDING,
                y: EDITOR_PADDING,
            },
        );
        let mut surface = TextSurface::new(config.initial_text.as_str(), metrics);
        let mut bridge = EditorBridge::default();
        bridge.sync(&content, &mut surface);
        let editable = EditableSurface::new(surface.text());

        info!(
            "🚀 Rephrase editor initialized (backend: {})",
            paraphraser.name()
        );

        let app = Self {
            content,
            surface,
            editable,
            controller: ParaphraseController::new(),
            bridge,
            paraphraser,
            config,
            status: "Ready".to_string(),
        };

        (app, Task::none())
    }

    /// Application title
    pub fn title(&self) -> String {
        if self.controller.is_busy() {
            "Rephrase - Paraphrasing...".to_string()
        } else {
            "Rephrase".to_string()
        }
    }

    /// Application theme
    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Dark
    }
}
