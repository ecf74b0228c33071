//! Document Model
//!
//! Plain-text content addressed by character offsets, plus the range and
//! edit types the editor and the paraphrase controller share.

use crate::error::{RephraseError, RephraseResult};

/// A span of the document in character offsets, always `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Build a range from two boundary points in any order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Zero-width range at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Move both boundaries across `edit` the way a live browser range does.
    ///
    /// Text inserted exactly at the start boundary ends up inside the range,
    /// text inserted at the end boundary ends up outside it. A boundary
    /// inside removed text snaps to the edit offset.
    pub fn rebase(self, edit: &Edit) -> Self {
        Self {
            start: rebase_point(self.start, edit),
            end: rebase_point(self.end, edit),
        }
    }
}

fn rebase_point(point: usize, edit: &Edit) -> usize {
    if point <= edit.offset {
        point
    } else if point <= edit.offset + edit.removed {
        edit.offset
    } else {
        point - edit.removed + edit.inserted
    }
}

/// One contiguous change: `removed` characters at `offset` replaced by
/// `inserted` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub offset: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl Edit {
    /// Smallest single edit turning `old` into `new`, or `None` if equal
    pub fn between(old: &str, new: &str) -> Option<Edit> {
        Self::between_from(old, new, usize::MAX)
    }

    /// Like [`Edit::between`], for a change known to begin at `origin`.
    ///
    /// A bare text diff is ambiguous when the typed text repeats its
    /// neighbours ("The cat" + ' ' at 3 looks like an insert at 4). The
    /// common prefix is capped at `origin` so the edit lands where it was made.
    pub fn between_from(old: &str, new: &str, origin: usize) -> Option<Edit> {
        if old == new {
            return None;
        }

        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();

        let prefix = old_chars
            .iter()
            .zip(new_chars.iter())
            .take_while(|(a, b)| a == b)
            .count()
            .min(origin);

        let max_suffix = old_chars.len().min(new_chars.len()) - prefix;
        let suffix = old_chars
            .iter()
            .rev()
            .zip(new_chars.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(Edit {
            offset: prefix,
            removed: old_chars.len() - prefix - suffix,
            inserted: new_chars.len() - prefix - suffix,
        })
    }
}

/// Editable plain-text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole content, returning the edit that was applied
    pub fn set_text(&mut self, text: impl Into<String>) -> Option<Edit> {
        let text = text.into();
        let edit = Edit::between(&self.text, &text);
        self.text = text;
        edit
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `range`, if it lies inside the document
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        let start = self.byte_offset(range.start)?;
        let end = self.byte_offset(range.end)?;
        self.text.get(start..end)
    }

    /// Replace `range` with `replacement`; returns the range now covered by
    /// the inserted text
    pub fn replace(&mut self, range: TextRange, replacement: &str) -> RephraseResult<TextRange> {
        let (start, end) = match (self.byte_offset(range.start), self.byte_offset(range.end)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(RephraseError::RangeOutOfBounds {
                    start: range.start,
                    end: range.end,
                    len: self.len_chars(),
                })
            }
        };

        self.text.replace_range(start..end, replacement);
        Ok(TextRange::new(
            range.start,
            range.start + replacement.chars().count(),
        ))
    }

    /// Byte index of a character offset; the end of the text is valid
    pub fn byte_offset(&self, offset: usize) -> Option<usize> {
        if offset == 0 {
            return Some(0);
        }
        self.text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(self.text.len()))
            .nth(offset)
    }

    /// Zero-based (line, column) of a character offset, column in characters
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Character offset of (line, column); columns past the end of the line
    /// clamp to the line end, lines past the end clamp to the document end
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (idx, content) in self.text.split('\n').enumerate() {
            let len = content.chars().count();
            if idx == line {
                return offset + column.min(len);
            }
            offset += len + 1;
        }
        self.len_chars()
    }

    /// Character offset of a (line, byte column) pair as reported by
    /// editors that index lines by bytes
    pub fn offset_at_byte_column(&self, line: usize, byte_column: usize) -> usize {
        let Some(content) = self.text.split('\n').nth(line) else {
            return self.len_chars();
        };
        let column = content
            .char_indices()
            .take_while(|(idx, _)| *idx < byte_column)
            .count();
        self.offset_at(line, column)
    }

    /// Length in characters of `line`, zero past the end
    pub fn line_len(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .nth(line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }
}
