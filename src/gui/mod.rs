//! GUI module using iced
//!
//! Hosts the editor, the floating paraphrase control and the blocking
//! notice.

use iced::keyboard;
use iced::{Subscription, Task};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::controller::Completion;
use crate::error::RephraseError;
use crate::paraphrase::Paraphraser;

// Sub-modules
pub mod app;
pub mod editor;
pub mod messages;
pub mod state;

// Re-exports for convenience
pub use app::RephraseApp;
pub use messages::Message;

use state::EditorBridge;

/// Run the editor window until it is closed
pub fn run(config: Config, paraphraser: Arc<dyn Paraphraser>) -> iced::Result {
    iced::application(RephraseApp::title, RephraseApp::update, RephraseApp::view)
        .theme(RephraseApp::theme)
        .subscription(RephraseApp::subscription)
        .window_size((960.0, 640.0))
        .run_with(move || RephraseApp::new(config, paraphraser))
}

impl RephraseApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Edit(action) => {
                // The notice is blocking
                if self.controller.notice().is_some() {
                    return Task::none();
                }

                let is_edit = action.is_edit();
                let origin = EditorBridge::edit_origin(&action, &self.surface);
                self.bridge.before_action(&action, &self.surface);
                self.content.perform(action);
                self.bridge.sync(&self.content, &mut self.surface);

                if is_edit {
                    if let Some(edit) = self.editable.on_content_change(&self.surface, origin) {
                        self.controller.on_document_edit(&edit);
                    }
                }

                let event = self.editable.on_selection_change(&self.surface);
                self.controller.on_selection(event);
            }
            Message::ParaphrasePressed => match self.controller.activate() {
                Ok(pending) => {
                    self.status = "Paraphrasing...".to_string();
                    let paraphraser = self.paraphraser.clone();
                    return Task::perform(
                        async move {
                            paraphraser
                                .paraphrase(&pending.text)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::ParaphraseFinished,
                    );
                }
                Err(e) => {
                    debug!("Paraphrase not started: {}", e);
                }
            },
            Message::ParaphraseFinished(result) => {
                let outcome = result.map_err(RephraseError::Service);
                match self.controller.complete(&mut self.surface, outcome) {
                    Completion::Replaced(range) => {
                        self.content = EditorBridge::rebuild(&self.surface);
                        self.bridge.reset();
                        if let Some(edit) = self.editable.on_content_change(&self.surface, None)
                        {
                            self.controller.on_document_edit(&edit);
                        }
                        self.status = format!("Paraphrased ({} characters)", range.len());
                    }
                    Completion::Failed(_) => {
                        self.status = "Paraphrase failed".to_string();
                    }
                    Completion::Rejected | Completion::Ignored => {}
                }
            }
            Message::DismissNotice => {
                info!("Notice dismissed");
                self.controller.dismiss_notice();
            }
        }
        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.controller.notice().is_none() {
            return Subscription::none();
        }

        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape | keyboard::key::Named::Enter) => {
                Some(Message::DismissNotice)
            }
            _ => None,
        })
    }

    pub fn view(&self) -> iced::Element<'_, Message> {
        editor::view(self)
    }
}
