//! Editable Surface
//!
//! Tracks the editor's plain-text content and turns selection changes into
//! selection snapshots. The host editor is reached through the
//! [`SelectionHost`] capability trait so the paraphrase controller never
//! touches a concrete widget.

use tracing::debug;

use crate::document::{Document, Edit, TextRange};
use crate::error::RephraseResult;

/// Vertical distance between a selection's top edge and the floating control
pub const CONTROL_LIFT: f32 = 40.0;

/// A point in editor-local screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in editor-local screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Where the floating control should point for a selection covering `rect`
pub fn control_anchor(rect: &Rect) -> Point {
    Point {
        x: rect.x + rect.width / 2.0,
        y: rect.y - CONTROL_LIFT,
    }
}

/// Text selected by the user, captured when the selection changed
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    pub text: String,
    pub range: TextRange,
    pub anchor: Point,
}

impl SelectionSnapshot {
    /// Only snapshots with non-whitespace text can be paraphrased
    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Outcome of inspecting the host selection
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Selection collapsed or absent
    Cleared,
    /// Non-collapsed selection
    Changed(SelectionSnapshot),
}

/// Capabilities the editor host must provide
pub trait SelectionHost {
    /// Current plain-text content
    fn text(&self) -> String;

    /// Current selection, `None` when there is no selection at all
    fn selection(&self) -> Option<TextRange>;

    /// Screen rectangle covering `range`
    fn bounding_rect(&self, range: TextRange) -> Rect;

    /// Remove the text covered by `range`
    fn delete_contents(&mut self, range: TextRange) -> RephraseResult<()>;

    /// Insert plain text at a character offset
    fn insert_text(&mut self, offset: usize, text: &str) -> RephraseResult<()>;

    /// Drop any selection and put the caret at `offset`
    fn collapse_to(&mut self, offset: usize);

    /// Replace `range` with `text` and leave the caret right after it.
    /// Returns the range covered by the inserted text.
    fn replace_range(&mut self, range: TextRange, text: &str) -> RephraseResult<TextRange> {
        self.delete_contents(range)?;
        self.insert_text(range.start, text)?;
        let inserted = TextRange::new(range.start, range.start + text.chars().count());
        self.collapse_to(inserted.end);
        Ok(inserted)
    }
}

/// Content and selection reporting for the editing region
#[derive(Debug, Clone, Default)]
pub struct EditableSurface {
    content: String,
}

impl EditableSurface {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Last captured plain-text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Capture the host content; returns the edit since the last capture.
    ///
    /// `origin` is where the change began when the host knows it (the
    /// selection start or caret before typing).
    pub fn on_content_change<H: SelectionHost + ?Sized>(
        &mut self,
        host: &H,
        origin: Option<usize>,
    ) -> Option<Edit> {
        let text = host.text();
        let edit = match origin {
            Some(origin) => Edit::between_from(&self.content, &text, origin),
            None => Edit::between(&self.content, &text),
        };
        if let Some(ref edit) = edit {
            debug!("✏️ Content changed: {:?}", edit);
        }
        self.content = text;
        edit
    }

    /// Inspect the host selection and build a snapshot for it
    pub fn on_selection_change<H: SelectionHost + ?Sized>(&self, host: &H) -> SelectionEvent {
        let range = match host.selection() {
            Some(range) if !range.is_collapsed() => range,
            _ => return SelectionEvent::Cleared,
        };

        let text = Document::new(host.text())
            .slice(range)
            .map(str::to_string)
            .unwrap_or_default();
        let rect = host.bounding_rect(range);

        SelectionEvent::Changed(SelectionSnapshot {
            text,
            range,
            anchor: control_anchor(&rect),
        })
    }
}

/// Monospace layout used to turn character positions into screen geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub origin: Point,
    pub char_width: f32,
    pub line_height: f32,
}

impl LayoutMetrics {
    /// Metrics for a monospace font rendered at `font_size`
    pub fn monospace(font_size: f32, origin: Point) -> Self {
        Self {
            origin,
            char_width: font_size * 0.6,
            line_height: font_size * 1.3,
        }
    }

    fn span(&self, line: usize, from: usize, to: usize) -> Rect {
        Rect {
            x: self.origin.x + from as f32 * self.char_width,
            y: self.origin.y + line as f32 * self.line_height,
            width: to.saturating_sub(from) as f32 * self.char_width,
            height: self.line_height,
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::monospace(16.0, Point::default())
    }
}

/// In-memory editor host: a document, a caret and an optional selection
#[derive(Debug, Clone)]
pub struct TextSurface {
    document: Document,
    /// (anchor, head) of the selection; equal when only a caret is shown
    anchor: usize,
    head: usize,
    metrics: LayoutMetrics,
}

impl TextSurface {
    pub fn new(text: impl Into<String>, metrics: LayoutMetrics) -> Self {
        let document = Document::new(text);
        let end = document.len_chars();
        Self {
            document,
            anchor: end,
            head: end,
            metrics,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
    }

    /// Caret position (the moving end of the selection)
    pub fn caret(&self) -> usize {
        self.head
    }

    /// Select from `anchor` to `head`, clamped to the document
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.document.len_chars();
        self.anchor = anchor.min(len);
        self.head = head.min(len);
    }

    /// Select the first occurrence of `needle`; returns whether it was found
    pub fn select_text(&mut self, needle: &str) -> bool {
        let Some(byte_idx) = self.document.text().find(needle) else {
            return false;
        };
        let start = self.document.text()[..byte_idx].chars().count();
        self.select(start, start + needle.chars().count());
        true
    }

    /// Type `text` at the caret, replacing the selection if there is one;
    /// returns the edit that was made
    pub fn type_text(&mut self, text: &str) -> RephraseResult<Edit> {
        let range = TextRange::new(self.anchor, self.head);
        let inserted = self.document.replace(range, text)?;
        self.anchor = inserted.end;
        self.head = inserted.end;
        Ok(Edit {
            offset: range.start,
            removed: range.len(),
            inserted: inserted.len(),
        })
    }

    /// Mirror the state of an external editor widget
    pub fn sync(&mut self, text: impl Into<String>, selection: TextRange, caret: usize) {
        self.document.set_text(text);
        let len = self.document.len_chars();
        let caret = caret.min(len);
        let selection = TextRange::new(selection.start.min(len), selection.end.min(len));
        self.head = caret;
        self.anchor = if selection.start == caret {
            selection.end
        } else {
            selection.start
        };
    }
}

impl SelectionHost for TextSurface {
    fn text(&self) -> String {
        self.document.text().to_string()
    }

    fn selection(&self) -> Option<TextRange> {
        Some(TextRange::new(self.anchor, self.head))
    }

    fn bounding_rect(&self, range: TextRange) -> Rect {
        let (start_line, start_col) = self.document.position(range.start);
        let (end_line, end_col) = self.document.position(range.end);

        if start_line == end_line {
            return self.metrics.span(start_line, start_col, end_col);
        }

        (start_line..=end_line)
            .map(|line| {
                let from = if line == start_line { start_col } else { 0 };
                let to = if line == end_line {
                    end_col
                } else {
                    self.document.line_len(line)
                };
                self.metrics.span(line, from, to)
            })
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default()
    }

    fn delete_contents(&mut self, range: TextRange) -> RephraseResult<()> {
        self.document.replace(range, "")?;
        let edit = Edit {
            offset: range.start,
            removed: range.len(),
            inserted: 0,
        };
        self.anchor = TextRange::caret(self.anchor).rebase(&edit).start;
        self.head = TextRange::caret(self.head).rebase(&edit).start;
        Ok(())
    }

    fn insert_text(&mut self, offset: usize, text: &str) -> RephraseResult<()> {
        self.document.replace(TextRange::caret(offset), text)?;
        let edit = Edit {
            offset,
            removed: 0,
            inserted: text.chars().count(),
        };
        self.anchor = TextRange::caret(self.anchor).rebase(&edit).start;
        self.head = TextRange::caret(self.head).rebase(&edit).start;
        Ok(())
    }

    fn collapse_to(&mut self, offset: usize) {
        let offset = offset.min(self.document.len_chars());
        self.anchor = offset;
        self.head = offset;
    }
}

/// Map an editor's "selected text + caret" report back to a range.
///
/// `anchor_hint` is where the selection started when the caller knows it.
/// Without a usable hint the range ending at the caret wins over the range
/// starting at it.
pub fn resolve_selection_range(
    document: &Document,
    caret: usize,
    selected: &str,
    anchor_hint: Option<usize>,
) -> Option<TextRange> {
    let len = selected.chars().count();
    if len == 0 {
        return None;
    }

    let matches = |range: TextRange| document.slice(range) == Some(selected);

    if let Some(anchor) = anchor_hint {
        let range = TextRange::new(anchor, caret);
        if matches(range) {
            return Some(range);
        }
    }

    if caret >= len {
        let range = TextRange::new(caret - len, caret);
        if matches(range) {
            return Some(range);
        }
    }

    let range = TextRange::new(caret, caret + len);
    if matches(range) {
        return Some(range);
    }

    None
}
