/// A (line, column) coordinate into a line-addressable document.
///
/// Columns are UTF-8 byte offsets within the line. A position is only
/// meaningful against the document state it was read from; any edit may
/// invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based byte column, or [`Position::END_OF_LINE`].
    pub column: usize,
}

impl Position {
    /// Column sentinel meaning "wherever this line ends".
    ///
    /// Documents clamp every column to the line length, so the sentinel
    /// resolves to the end of the line at the time it is used.
    pub const END_OF_LINE: usize = usize::MAX;

    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of `line`.
    pub const fn line_start(line: usize) -> Self {
        Self { line, column: 0 }
    }

    /// End of `line`, resolved lazily by the document.
    pub const fn eol(line: usize) -> Self {
        Self {
            line,
            column: Self::END_OF_LINE,
        }
    }

    pub const fn is_eol(self) -> bool {
        self.column == Self::END_OF_LINE
    }
}

/// An ordered pair of positions delimiting a contiguous span.
///
/// `from <= to` always holds in document order; the constructors swap
/// their arguments when given a backwards pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub from: Position,
    pub to: Position,
}

impl Range {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// Zero-width range at `at`.
    pub const fn point(at: Position) -> Self {
        Self { from: at, to: at }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert!(Position::new(4, 100) < Position::eol(4));
    }

    #[test]
    fn range_normalises_backwards_pairs() {
        let range = Range::new(Position::new(3, 1), Position::new(1, 7));
        assert_eq!(range.from, Position::new(1, 7));
        assert_eq!(range.to, Position::new(3, 1));
    }

    #[test]
    fn point_range_is_empty() {
        let range = Range::point(Position::new(2, 5));
        assert!(range.is_empty());
    }

    #[test]
    fn eol_sentinel() {
        let p = Position::eol(3);
        assert!(p.is_eol());
        assert!(!Position::line_start(3).is_eol());
    }
}
