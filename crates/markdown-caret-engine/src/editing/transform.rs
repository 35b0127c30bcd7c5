use crate::editing::{Position, Range, TextDocument};

/// Wrap the selection, or the word at the cursor, with `before`/`after`
/// and reselect exactly the original inner text.
///
/// `after` defaults to `before` (`**bold**`, `_em_`). With no selection
/// and no word at the cursor the target is empty: the decorators are
/// still inserted and the cursor is left between them, ready for typing.
///
/// Only the primary selection is used.
pub fn wrap_text<D: TextDocument + ?Sized>(doc: &mut D, before: &str, after: Option<&str>) {
    let after = after.unwrap_or(before);

    let target = if doc.something_selected() {
        primary_selection(doc)
    } else {
        doc.find_word_at(doc.cursor())
    };

    let text = doc.get_range(target.from, target.to);
    log::debug!(
        "wrap_text {:?}..{:?} ({} bytes) with {before:?}/{after:?}",
        target.from,
        target.to,
        text.len()
    );

    doc.replace_range(
        &format!("{before}{text}{after}"),
        target.from,
        Some(target.to),
    );

    // The cursor now sits after `after`; walk back over it, then over the
    // inner text, against the freshly written document.
    let cursor = doc.cursor();
    let head = retreat(doc, cursor, after);
    let anchor = retreat(doc, head, &text);
    doc.set_selection(anchor, head);
}

/// Rewrite every line touched by the primary selection through
/// `transform(line, index_within_span)` and select the rewritten lines.
///
/// Columns of the selection are ignored: the first and last lines are
/// always rewritten whole. The new selection runs from column 0 of the
/// first line to the end of the last rewritten line, so a second call
/// sees the same span as the first.
pub fn replace_lines<D, F>(doc: &mut D, mut transform: F)
where
    D: TextDocument + ?Sized,
    F: FnMut(&str, usize) -> String,
{
    let span = primary_selection(doc);
    let from = Position::line_start(span.from.line);
    let to = Position::eol(span.to.line);

    let original = doc.get_range(from, to);
    let rewritten = original
        .split('\n')
        .enumerate()
        .map(|(i, line)| transform(line, i))
        .collect::<Vec<_>>()
        .join("\n");
    log::debug!(
        "replace_lines {}..={} ({} lines)",
        span.from.line,
        span.to.line,
        span.to.line - span.from.line + 1
    );

    doc.replace_range(&rewritten, from, Some(to));

    let last_line = from.line + rewritten.matches('\n').count();
    doc.set_selection(from, Position::eol(last_line));
}

fn primary_selection<D: TextDocument + ?Sized>(doc: &D) -> Range {
    doc.list_selections()
        .into_iter()
        .next()
        .unwrap_or_else(|| Range::point(doc.cursor()))
}

/// Position of the start of `text`, given that it ends at `end`.
///
/// Single-line text is a plain column subtraction. Text containing line
/// breaks lands on an earlier line, so its start column is measured from
/// the end of that line in the current document.
fn retreat<D: TextDocument + ?Sized>(doc: &D, end: Position, text: &str) -> Position {
    match text.rfind('\n') {
        None => Position::new(end.line, end.column.saturating_sub(text.len())),
        Some(_) => {
            let breaks = text.matches('\n').count();
            let line = end.line.saturating_sub(breaks);
            let first_segment = text.split('\n').next().unwrap_or_default();
            let column = doc.line(line).len().saturating_sub(first_segment.len());
            Position::new(line, column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::RopeDocument;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn selected(doc: &RopeDocument) -> (Position, Position) {
        doc.selection()
    }

    // ============ wrap_text ============

    #[test]
    fn wraps_selection_and_reselects_inner_text() {
        let mut doc = RopeDocument::new("hi");
        doc.set_selection(Position::new(0, 0), Position::new(0, 2));

        wrap_text(&mut doc, "**", None);

        assert_eq!(doc.text(), "**hi**");
        assert_eq!(selected(&doc), (Position::new(0, 2), Position::new(0, 4)));
        assert_eq!(doc.selected_text(), "hi");
    }

    #[test]
    fn wraps_word_at_cursor_when_nothing_selected() {
        let mut doc = RopeDocument::new("say hello world");
        doc.set_selection(Position::new(0, 6), Position::new(0, 6));

        wrap_text(&mut doc, "_", None);

        assert_eq!(doc.text(), "say _hello_ world");
        assert_eq!(doc.selected_text(), "hello");
    }

    #[test]
    fn empty_target_leaves_cursor_between_decorators() {
        let mut doc = RopeDocument::new("see  here");
        let c = 4;
        doc.set_selection(Position::new(0, c), Position::new(0, c));

        wrap_text(&mut doc, "[", Some("](url)"));

        assert_eq!(doc.text(), "see [](url) here");
        assert_eq!(
            selected(&doc),
            (Position::new(0, c + 1), Position::new(0, c + 1))
        );
    }

    #[test]
    fn wraps_in_empty_document() {
        let mut doc = RopeDocument::default();

        wrap_text(&mut doc, "`", None);

        assert_eq!(doc.text(), "``");
        assert_eq!(selected(&doc), (Position::new(0, 1), Position::new(0, 1)));
    }

    #[test]
    fn asymmetric_decorators_reselect_inner_text() {
        let mut doc = RopeDocument::new("see docs now");
        doc.set_selection(Position::new(0, 4), Position::new(0, 8));

        wrap_text(&mut doc, "[", Some("](https://example.com)"));

        assert_eq!(doc.text(), "see [docs](https://example.com) now");
        assert_eq!(selected(&doc), (Position::new(0, 5), Position::new(0, 9)));
    }

    #[test]
    fn wraps_multiline_selection() {
        let mut doc = RopeDocument::from_lines(&["intro text", "more words", "tail"]);
        doc.set_selection(Position::new(0, 6), Position::new(1, 4));

        wrap_text(&mut doc, "**", None);

        assert_eq!(doc.lines(), vec!["intro **text", "more** words", "tail"]);
        assert_eq!(selected(&doc), (Position::new(0, 8), Position::new(1, 4)));
        assert_eq!(doc.selected_text(), "text\nmore");
    }

    #[test]
    fn wrap_only_uses_primary_selection() {
        let mut doc = RopeDocument::new("one two three");
        doc.set_selection(Position::new(0, 0), Position::new(0, 3));
        doc.add_selection(Position::new(0, 8), Position::new(0, 13));

        wrap_text(&mut doc, "~~", None);

        assert_eq!(doc.text(), "~~one~~ two three");
        assert_eq!(doc.selected_text(), "one");
    }

    #[test]
    fn wrap_measures_multibyte_text_in_bytes() {
        let mut doc = RopeDocument::new("x café y");
        doc.set_selection(Position::new(0, 2), Position::new(0, 7));

        wrap_text(&mut doc, "**", None);

        assert_eq!(doc.text(), "x **café** y");
        assert_eq!(doc.selected_text(), "café");
    }

    #[rstest]
    #[case::accented("un café", 3, "un **café**")]
    #[case::cjk("你好 世界", 7, "你好 **世界**")]
    #[case::emoji_after_word("go 🦀", 0, "**go** 🦀")]
    fn wraps_word_on_line_ending_in_multibyte_char(
        #[case] line: &str,
        #[case] column: usize,
        #[case] expected: &str,
    ) {
        let mut doc = RopeDocument::from_lines(&[line, "next"]);
        doc.set_selection(Position::new(0, column), Position::new(0, column));

        wrap_text(&mut doc, "**", None);

        assert_eq!(doc.lines(), vec![expected, "next"]);
    }

    #[test]
    fn multiline_wrap_keeps_crlf_line_endings() {
        let mut doc = RopeDocument::new("one two\r\nthree four\r\n");
        doc.set_selection(Position::new(0, 4), Position::new(1, 5));

        wrap_text(&mut doc, "**", None);

        assert_eq!(doc.text(), "one **two\r\nthree** four\r\n");
        let (anchor, head) = doc.selection();
        assert_eq!((anchor, head), (Position::new(0, 6), Position::new(1, 5)));
        assert_eq!(doc.get_range(anchor, head), "two\nthree");
    }

    // ============ replace_lines ============

    #[test]
    fn prefixes_single_line() {
        let mut doc = RopeDocument::new("Title");
        doc.set_selection(Position::new(0, 2), Position::new(0, 2));

        replace_lines(&mut doc, |line, _| format!("# {line}"));

        assert_eq!(doc.text(), "# Title");
        assert_eq!(selected(&doc), (Position::new(0, 0), Position::new(0, 7)));
    }

    #[test]
    fn numbers_lines_by_index_within_span() {
        let mut doc = RopeDocument::from_lines(&["before", "a", "b", "c", "after"]);
        doc.set_selection(Position::new(1, 0), Position::new(3, 1));

        replace_lines(&mut doc, |line, i| format!("{}. {line}", i + 1));

        assert_eq!(
            doc.lines(),
            vec!["before", "1. a", "2. b", "3. c", "after"]
        );
        assert_eq!(selected(&doc), (Position::new(1, 0), Position::new(3, 4)));
    }

    #[test]
    fn ignores_selection_columns() {
        let mut doc = RopeDocument::from_lines(&["quote me", "and me"]);
        doc.set_selection(Position::new(0, 4), Position::new(1, 2));

        replace_lines(&mut doc, |line, _| format!("> {line}"));

        assert_eq!(doc.lines(), vec!["> quote me", "> and me"]);
        assert_eq!(doc.selected_text(), "> quote me\n> and me");
    }

    #[test]
    fn transform_sees_empty_lines() {
        let mut doc = RopeDocument::from_lines(&["a", "", "b"]);
        doc.set_selection(Position::new(0, 0), Position::new(2, 1));
        let mut seen = Vec::new();

        replace_lines(&mut doc, |line, i| {
            seen.push((i, line.to_string()));
            line.to_uppercase()
        });

        assert_eq!(
            seen,
            vec![
                (0, "a".to_string()),
                (1, String::new()),
                (2, "b".to_string())
            ]
        );
        assert_eq!(doc.lines(), vec!["A", "", "B"]);
    }

    #[test]
    fn chained_transforms_compose_over_same_span() {
        let mut doc = RopeDocument::from_lines(&["one", "two"]);
        doc.set_selection(Position::new(0, 1), Position::new(1, 1));

        replace_lines(&mut doc, |line, _| format!("**{line}**"));
        replace_lines(&mut doc, |line, _| format!("- {line}"));

        assert_eq!(doc.lines(), vec!["- **one**", "- **two**"]);
        assert_eq!(selected(&doc), (Position::new(0, 0), Position::new(1, 9)));
    }

    #[rstest]
    #[case::accented(&["Résumé", "café"], &["# Résumé", "# café"])]
    #[case::cjk(&["世界", "你好"], &["# 世界", "# 你好"])]
    #[case::emoji(&["done 🦀", "ok ✅"], &["# done 🦀", "# ok ✅"])]
    fn rewrites_lines_ending_in_multibyte_chars(
        #[case] lines: &[&str],
        #[case] expected: &[&str],
    ) {
        let mut doc = RopeDocument::from_lines(lines);
        doc.set_selection(Position::new(0, 0), Position::new(1, 0));

        replace_lines(&mut doc, |line, _| format!("# {line}"));

        assert_eq!(doc.lines(), expected);
        assert_eq!(doc.selection().1, Position::new(1, expected[1].len()));
    }

    #[test]
    fn replace_lines_keeps_crlf_line_endings() {
        let mut doc = RopeDocument::new("a\r\nb\r\nc\r\n");
        doc.set_selection(Position::new(0, 0), Position::new(1, 0));

        replace_lines(&mut doc, |line, _| line.to_string());
        assert_eq!(doc.text(), "a\r\nb\r\nc\r\n");

        replace_lines(&mut doc, |line, i| format!("{}. {line}", i + 1));
        assert_eq!(doc.text(), "1. a\r\n2. b\r\nc\r\n");
        assert_eq!(doc.selection(), (Position::new(0, 0), Position::new(1, 4)));
    }

    #[test]
    fn selection_follows_added_lines() {
        let mut doc = RopeDocument::from_lines(&["code", "end"]);
        doc.set_selection(Position::new(0, 0), Position::new(0, 0));

        replace_lines(&mut doc, |line, _| format!("```\n{line}\n```"));

        assert_eq!(doc.lines(), vec!["```", "code", "```", "end"]);
        assert_eq!(selected(&doc), (Position::new(0, 0), Position::new(2, 3)));
    }

    #[rstest]
    #[case::already_trimmed(&["a", "b"])]
    #[case::padded(&["  a  ", "\tb"])]
    #[case::blank(&["   ", ""])]
    fn idempotent_transform_applied_twice_matches_once(#[case] lines: &[&str]) {
        let trim = |line: &str, _: usize| line.trim().to_string();
        let mut once = RopeDocument::from_lines(lines);
        once.set_selection(Position::new(0, 0), Position::eol(lines.len() - 1));
        let mut twice = once.clone();

        replace_lines(&mut once, trim);
        replace_lines(&mut twice, trim);
        replace_lines(&mut twice, trim);

        assert_eq!(once.text(), twice.text());
        assert_eq!(once.selection(), twice.selection());
    }
}
