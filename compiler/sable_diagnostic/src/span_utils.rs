//! Line and column recovery from spans.
//!
//! Diagnostics carry byte spans only; the 1-based line numbers in rendered
//! output are computed here against the original source text.

use sable_ir::Span;

/// Compute the 1-based line number from a span and source text.
///
/// Returns the line number where the span starts.
pub fn line_number(source: &str, span: Span) -> u32 {
    line_from_offset(source, span.start)
}

/// Compute 1-based line number from a byte offset.
///
/// Counts newlines before the offset to determine the line.
pub fn line_from_offset(source: &str, offset: u32) -> u32 {
    let offset = offset as usize;
    let bytes = source.as_bytes();
    let mut line = 1u32;

    for (i, &byte) in bytes.iter().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
        }
    }

    line
}

/// Compute 1-based (line, column) from a byte offset.
///
/// The column counts characters (not bytes) from the start of the line.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = offset as usize;
    let bytes = source.as_bytes();
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (i, &byte) in bytes.iter().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    let col_chars = source[line_start..offset.min(source.len())].chars().count();
    let col = u32::try_from(col_chars).unwrap_or(u32::MAX).saturating_add(1);

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_offset_single_line() {
        let source = "one = 1;";
        assert_eq!(line_from_offset(source, 0), 1);
        assert_eq!(line_from_offset(source, 7), 1);
    }

    #[test]
    fn test_line_from_offset_multiple_lines() {
        let source = "a = 1;\nb = 2;\nc = 3;";
        assert_eq!(line_from_offset(source, 0), 1); // 'a'
        assert_eq!(line_from_offset(source, 6), 1); // '\n' after first stmt
        assert_eq!(line_from_offset(source, 7), 2); // 'b'
        assert_eq!(line_from_offset(source, 14), 3); // 'c'
    }

    #[test]
    fn test_line_number_from_span() {
        let source = "a = 1;\nb = 2;\nc = 3;";
        assert_eq!(line_number(source, Span::new(0, 6)), 1);
        assert_eq!(line_number(source, Span::new(7, 13)), 2);
        assert_eq!(line_number(source, Span::new(14, 20)), 3);
    }

    #[test]
    fn test_offset_to_line_col() {
        let source = "abc\ndefgh\nij";
        assert_eq!(offset_to_line_col(source, 0), (1, 1)); // 'a'
        assert_eq!(offset_to_line_col(source, 2), (1, 3)); // 'c'
        assert_eq!(offset_to_line_col(source, 4), (2, 1)); // 'd'
        assert_eq!(offset_to_line_col(source, 7), (2, 4)); // 'g'
        assert_eq!(offset_to_line_col(source, 10), (3, 1)); // 'i'
    }

    #[test]
    fn test_offset_to_line_col_empty() {
        let source = "";
        assert_eq!(offset_to_line_col(source, 0), (1, 1));
    }
}
