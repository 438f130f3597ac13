// src/tokenize.rs
use std::ops::Range;

/// Byte range of one column inside a line.
pub type Span = Range<usize>;

/// Number of columns every process line carries.
pub const COLUMN_COUNT: usize = 6;

/// A line is active unless it is empty, a `#` comment, or a bare line ending.
pub fn is_active(line: &str) -> bool {
    is_active_bytes(line.as_bytes())
}

/// [`is_active`] over raw bytes, for lines not yet known to be UTF-8.
pub fn is_active_bytes(line: &[u8]) -> bool {
    !matches!(line.first(), None | Some(b'#' | b'\r' | b'\n'))
}

/// Drop any trailing `\r` / `\n` characters.
pub fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn is_separator(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Split a line into at most [`COLUMN_COUNT`] column spans.
///
/// The first five columns end at the next run of spaces/tabs. Whatever is
/// left after the fifth becomes the sixth column verbatim (embedded
/// whitespace kept, trailing separators trimmed). A returned vector shorter
/// than [`COLUMN_COUNT`] means the line is missing columns.
///
/// Spans index into `line` itself; trailing line endings never appear in
/// a span.
pub fn split_columns(line: &str) -> Vec<Span> {
    let bytes = trim_line_end(line).as_bytes();
    let mut spans = Vec::with_capacity(COLUMN_COUNT);
    let mut pos = 0;

    while spans.len() < COLUMN_COUNT {
        while pos < bytes.len() && is_separator(bytes[pos]) {
            pos += 1;
        }
        if pos == bytes.len() {
            break;
        }

        let start = pos;
        if spans.len() == COLUMN_COUNT - 1 {
            let mut end = bytes.len();
            while end > start && is_separator(bytes[end - 1]) {
                end -= 1;
            }
            spans.push(start..end);
            break;
        }

        while pos < bytes.len() && !is_separator(bytes[pos]) {
            pos += 1;
        }
        spans.push(start..pos);
    }

    spans
}

#[cfg(test)]
fn columns(line: &str) -> Vec<&str> {
    split_columns(line)
        .into_iter()
        .map(|span| &line[span])
        .collect()
}
