use crate::editing::{Position, TextDocument};

/// Insert `content` as a new block below the cursor and return where it
/// starts.
///
/// Scans forward from the cursor's line (inclusive) for the first blank
/// line. If the document has none below the cursor, a line break is
/// appended first so the new last line serves as the blank line.
/// `"\n" + content` is then written at the end of that blank line, so the
/// content always begins on the line after it.
///
/// When the cursor already sits on a blank line that line is used as is,
/// which can leave an extra empty line above the inserted block.
pub fn append_block<D: TextDocument + ?Sized>(doc: &mut D, content: &str) -> Position {
    let start = doc.cursor().line;
    let blank = match find_blank_line(doc, start) {
        Some(line) => line,
        None => {
            let line_count = doc.line_count();
            let last = line_count - 1;
            doc.replace_range("\n", Position::eol(last), None);
            line_count
        }
    };
    log::debug!("append_block: cursor line {start}, blank line {blank}");

    doc.replace_range(&format!("\n{content}"), Position::eol(blank), None);

    Position::line_start(blank + 1)
}

/// First line at or after `from` whose trimmed text is empty.
pub fn find_blank_line<D: TextDocument + ?Sized>(doc: &D, from: usize) -> Option<usize> {
    (from..doc.line_count()).find(|&i| doc.line(i).trim().is_empty())
}
