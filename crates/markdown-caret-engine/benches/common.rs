// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_paragraphs(count: usize) -> String {
    let base = "A paragraph line with some words in it.\nA second line of the same paragraph.\n\n";
    base.repeat(count)
}

/// One long block with no blank line anywhere, the worst case for the
/// blank-line scan.
#[allow(dead_code)]
pub fn generate_dense_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("- item {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
