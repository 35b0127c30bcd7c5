/*!
 * # Selection-Aware Editing Primitives
 *
 * This module holds the editing algorithms behind Markdown formatting
 * commands (bold, headings, lists, inserted images and so on). The commands
 * themselves live in the host; everything here works against whatever
 * document the host hands in.
 *
 * ## Architecture Overview
 *
 * ### 1. Injected Document/Selection Contract
 * - Every primitive takes a `&mut impl TextDocument` rather than a concrete
 *   editor widget
 * - The contract is line addressable: cursor, selection ranges, range
 *   read/write, line count and word-boundary lookup
 * - **`RopeDocument`** is the in-memory implementation, backed by a single
 *   `xi_rope::Rope`, used by tests, benches and the CLI
 *
 * ### 2. Read Then Write, Then Reselect
 * - Each primitive reads the current cursor/selection, writes one or two
 *   range replacements, and computes the new selection from the state
 *   *after* the write
 * - Nothing yields between the read and the write; the host must not let
 *   other edits interleave with a primitive
 *
 * ### 3. First Selection Only
 * - Only the primary range of a multi-range selection is consumed.
 *   Supporting more would mean applying edits in reverse document order so
 *   earlier ranges stay valid
 *
 * ## Module Structure
 *
 * - **`position`**: `Position` and `Range` coordinates
 * - **`document`**: the `TextDocument` trait and `RopeDocument`
 * - **`transform`**: `wrap_text` and `replace_lines`
 * - **`block`**: `append_block`
 * - **`bucket`**: `find_start_index`
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_caret_engine::editing::*;
 *
 * let mut doc = RopeDocument::new("hi there");
 * doc.set_selection(Position::new(0, 0), Position::new(0, 2));
 *
 * wrap_text(&mut doc, "**", None);
 *
 * assert_eq!(doc.text(), "**hi** there");
 * assert_eq!(doc.get_range(Position::new(0, 2), Position::new(0, 4)), "hi");
 * ```
 */

// Module exports
pub mod block;
pub mod bucket;
pub mod document;
pub mod position;
pub mod transform;

// Public API re-exports
pub use block::append_block;
pub use bucket::find_start_index;
pub use document::{LineEnding, RopeDocument, TextDocument};
pub use position::{Position, Range};
pub use transform::{replace_lines, wrap_text};
