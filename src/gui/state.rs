//! Editor widget bridge
//!
//! Keeps the in-memory [`TextSurface`] in step with iced's `text_editor`
//! content, which only reports the selected text and the caret position.

use iced::widget::text_editor::{Action, Content, Edit, Motion};

use crate::document::{Document, TextRange};
use crate::surface::{resolve_selection_range, SelectionHost, TextSurface};

/// Tracks where the current selection started
#[derive(Debug, Default)]
pub struct EditorBridge {
    anchor: Option<usize>,
}

impl EditorBridge {
    /// Remember the selection anchor before `action` is performed
    pub fn before_action(&mut self, action: &Action, surface: &TextSurface) {
        match action {
            Action::Select(_) | Action::Drag(_) => {
                let collapsed = surface
                    .selection()
                    .map(|range| range.is_collapsed())
                    .unwrap_or(true);
                if collapsed {
                    self.anchor = Some(surface.caret());
                }
            }
            Action::Scroll { .. } => {}
            _ => self.anchor = None,
        }
    }

    /// Where an edit action will change the text, read before it runs
    pub fn edit_origin(action: &Action, surface: &TextSurface) -> Option<usize> {
        let Action::Edit(edit) = action else {
            return None;
        };
        let caret = surface.caret();
        match surface.selection() {
            Some(range) if !range.is_collapsed() => Some(range.start),
            _ => match edit {
                Edit::Backspace => Some(caret.saturating_sub(1)),
                _ => Some(caret),
            },
        }
    }

    /// Copy the widget's text, caret and selection into `surface`
    pub fn sync(&mut self, content: &Content, surface: &mut TextSurface) {
        let text = content_text(content);
        let document = Document::new(text.as_str());

        // iced reports the column as a byte index into the line
        let (line, column) = content.cursor_position();
        let caret = document.offset_at_byte_column(line, column);

        let selection = match content.selection() {
            Some(selected) => resolve_selection_range(&document, caret, &selected, self.anchor)
                .unwrap_or(TextRange::caret(caret)),
            None => {
                self.anchor = None;
                TextRange::caret(caret)
            }
        };

        surface.sync(text, selection, caret);
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Fresh widget content mirroring `surface`, caret included
    pub fn rebuild(surface: &TextSurface) -> Content {
        let mut content = Content::with_text(surface.document().text());
        let (line, column) = surface.document().position(surface.caret());

        content.perform(Action::Move(Motion::DocumentStart));
        for _ in 0..line {
            content.perform(Action::Move(Motion::Down));
        }
        content.perform(Action::Move(Motion::Home));
        for _ in 0..column {
            content.perform(Action::Move(Motion::Right));
        }

        content
    }
}

/// The widget's lines joined with `\n`.
///
/// `Content::text` appends a newline the user never typed.
pub fn content_text(content: &Content) -> String {
    content
        .lines()
        .map(|line| String::from(&*line))
        .collect::<Vec<_>>()
        .join("\n")
}
