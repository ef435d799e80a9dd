//! Small text helpers shared by the parsers and the generators.

/// Convert `\r\n` and bare `\r` to `\n`. Generated output is written
/// with one line-ending convention regardless of mixed input.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split into lines without the trailing newline characters.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|l| l.trim_end_matches('\r')).collect()
}

/// Width in columns of a line's leading whitespace, tabs counted as
/// four spaces.
pub fn leading_indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}
