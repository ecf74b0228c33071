//! Message types for the Rephrase GUI
//!
//! All messages that can be sent to update the application state.

use iced::widget::text_editor;

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    // Editor
    Edit(text_editor::Action),

    // Paraphrase
    ParaphrasePressed,
    ParaphraseFinished(Result<String, String>),

    // Notice
    DismissNotice,
}
