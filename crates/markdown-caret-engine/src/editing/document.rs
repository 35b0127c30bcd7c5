use xi_rope::{Rope, delta::Builder};

use crate::editing::{Position, Range};

/// The Document/Selection contract the editing primitives run against.
///
/// Implementations wrap whatever buffer the host uses. All positions
/// handed to an implementation come either from the implementation itself
/// or from arithmetic over text it returned, so an out-of-bounds position
/// is a host bug; implementations may clamp or panic as they see fit.
pub trait TextDocument {
    /// Current cursor location (the head of the primary selection).
    fn cursor(&self) -> Position;

    /// Whether any non-empty selection exists.
    fn something_selected(&self) -> bool;

    /// All selection ranges, primary first. Never empty.
    fn list_selections(&self) -> Vec<Range>;

    /// Word boundaries at or next to `at`. Empty when no word touches it.
    fn find_word_at(&self, at: Position) -> Range;

    /// Text between two positions, line breaks reported as `"\n"`.
    fn get_range(&self, from: Position, to: Position) -> String;

    /// Replace `from..to` with `text`; `to == None` inserts at `from`.
    ///
    /// Afterwards the cursor sits at the end of the inserted text.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);

    /// Replace the selection with a single `anchor..head` range.
    fn set_selection(&mut self, anchor: Position, head: Position);

    /// Raw text of one line, without its line break.
    fn line(&self, index: usize) -> String;

    /// Total number of lines; at least 1.
    fn line_count(&self) -> usize;

    /// Return input focus to the document.
    fn focus(&mut self);
}

/// In-memory [`TextDocument`] backed by a single xi-rope buffer.
///
/// Selections are kept as `(anchor, head)` byte offsets into the buffer,
/// primary first. Columns past the end of a line clamp to the line end,
/// and lines past the end of the document clamp to the last line.
///
/// Text written through [`TextDocument::replace_range`] has its line
/// breaks rewritten to the document's own style, so CRLF files stay CRLF.
#[derive(Clone)]
pub struct RopeDocument {
    buffer: Rope,
    selections: Vec<(usize, usize)>,
    /// Incremented on every edit
    version: u64,
    focused: bool,
    /// Characters treated as word characters on top of alphanumerics and `_`
    word_chars: String,
    line_ending: LineEnding,
}

/// Line break style, detected from the first line break in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// Rewrite every line break in `text` to this style.
    fn normalize<'a>(self, text: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            LineEnding::Lf if text.contains('\r') => text.replace("\r\n", "\n").into(),
            LineEnding::CrLf if text.contains('\n') => {
                text.replace("\r\n", "\n").replace('\n', "\r\n").into()
            }
            _ => text.into(),
        }
    }
}

fn detect_line_ending(text: &str) -> LineEnding {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}

impl RopeDocument {
    /// Create a document with the cursor at the start.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selections: vec![(0, 0)],
            version: 0,
            focused: false,
            word_chars: String::new(),
            line_ending: detect_line_ending(text),
        }
    }

    /// Create a document from raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Build a document from lines joined with `"\n"`.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(&lines.join("\n"))
    }

    /// Extra characters `find_word_at` should treat as part of a word.
    pub fn with_word_chars(mut self, chars: impl Into<String>) -> Self {
        self.word_chars = chars.into();
        self
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    /// Every line, without line breaks.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|i| self.line(i)).collect()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Primary selection as `(anchor, head)`.
    pub fn selection(&self) -> (Position, Position) {
        let (anchor, head) = self.selections[0];
        (self.position_of(anchor), self.position_of(head))
    }

    /// Add a secondary selection range behind the primary one.
    pub fn add_selection(&mut self, anchor: Position, head: Position) {
        let anchor = self.offset_of(anchor);
        let head = self.offset_of(head);
        self.selections.push((anchor, head));
    }

    /// Text currently covered by the primary selection.
    pub fn selected_text(&self) -> String {
        let (anchor, head) = self.selections[0];
        let (start, end) = (anchor.min(head), anchor.max(head));
        self.buffer.slice_to_cow(start..end).into_owned()
    }

    /// Byte offset where `line` starts, clamped to the last line.
    fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        self.buffer.offset_of_line(line)
    }

    /// Byte offset where `line`'s text ends, before any `\r\n` or `\n`.
    fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        let end = if line + 1 < self.line_count() {
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.buffer.len()
        };
        let start = self.buffer.offset_of_line(line);
        // `end - 1` may fall inside a multibyte char, so slice whole lines only
        if end > start && self.buffer.slice_to_cow(start..end).ends_with('\r') {
            end - 1
        } else {
            end
        }
    }

    fn offset_of(&self, pos: Position) -> usize {
        let start = self.line_start(pos.line);
        let end = self.line_end(pos.line);
        if pos.line >= self.line_count() {
            log::trace!(
                "clamping line {} to document of {} lines",
                pos.line,
                self.line_count()
            );
        }
        if pos.is_eol() {
            return end;
        }
        start.saturating_add(pos.column).min(end)
    }

    fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.buffer.line_of_offset(offset);
        Position::new(line, offset - self.buffer.offset_of_line(line))
    }

    fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || self.word_chars.contains(c)
    }
}

impl std::fmt::Debug for RopeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RopeDocument")
            .field("text", &self.buffer.to_string())
            .field("selections", &self.selections)
            .field("version", &self.version)
            .finish()
    }
}

impl PartialEq for RopeDocument {
    fn eq(&self, other: &Self) -> bool {
        // Rope has no PartialEq; compare contents
        self.buffer.to_string() == other.buffer.to_string()
            && self.selections == other.selections
            && self.version == other.version
            && self.word_chars == other.word_chars
            && self.line_ending == other.line_ending
    }
}

impl Default for RopeDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextDocument for RopeDocument {
    fn cursor(&self) -> Position {
        self.position_of(self.selections[0].1)
    }

    fn something_selected(&self) -> bool {
        self.selections.iter().any(|(anchor, head)| anchor != head)
    }

    fn list_selections(&self) -> Vec<Range> {
        self.selections
            .iter()
            .map(|&(anchor, head)| Range::new(self.position_of(anchor), self.position_of(head)))
            .collect()
    }

    fn find_word_at(&self, at: Position) -> Range {
        let line = self.line(at.line);
        let mut col = at.column.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }

        let mut start = col;
        for (i, c) in line[..col].char_indices().rev() {
            if !self.is_word_char(c) {
                break;
            }
            start = i;
        }

        let mut end = col;
        for (i, c) in line[col..].char_indices() {
            if !self.is_word_char(c) {
                break;
            }
            end = col + i + c.len_utf8();
        }

        let line_index = at.line.min(self.line_count() - 1);
        Range::new(
            Position::new(line_index, start),
            Position::new(line_index, end),
        )
    }

    fn get_range(&self, from: Position, to: Position) -> String {
        let a = self.offset_of(from);
        let b = self.offset_of(to);
        let text = self.buffer.slice_to_cow(a.min(b)..a.max(b));
        if text.contains('\r') {
            text.replace("\r\n", "\n")
        } else {
            text.into_owned()
        }
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let start = self.offset_of(from);
        let end = to.map_or(start, |to| self.offset_of(to));
        let (start, end) = (start.min(end), start.max(end));
        let text = self.line_ending.normalize(text);

        if start != end || !text.is_empty() {
            let mut builder = Builder::new(self.buffer.len());
            builder.replace(start..end, Rope::from(text.as_ref()));
            let delta = builder.build();
            self.buffer = delta.apply(&self.buffer);
        }

        let cursor = start + text.len();
        self.selections = vec![(cursor, cursor)];
        self.version += 1;
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        let anchor = self.offset_of(anchor);
        let head = self.offset_of(head);
        self.selections = vec![(anchor, head)];
    }

    fn line(&self, index: usize) -> String {
        let start = self.line_start(index);
        let end = self.line_end(index);
        self.buffer.slice_to_cow(start..end).into_owned()
    }

    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
