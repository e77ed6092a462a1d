//! Depth Tracking Lowering
//!
//! Converts raw leading whitespace into a normalized indent level.
//! Only space characters count toward the depth; a remainder that is not a
//! whole indentation unit is truncated downward without complaint.

/// Columns treated as one nesting level, on input and on output.
pub const INDENT_UNIT: usize = 4;

/// A non-blank source line split into depth and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the source document.
    pub number: usize,
    pub level: usize,
    /// Content with leading and trailing whitespace stripped.
    pub content: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn measure(number: usize, raw: &'a str) -> Self {
        let (level, content) = measure_indent(raw);
        Self {
            number,
            level,
            content,
        }
    }
}

/// Compute `(indent level, stripped content)` for a raw line
pub fn measure_indent(raw: &str) -> (usize, &str) {
    let spaces = raw.bytes().take_while(|b| *b == b' ').count();
    (spaces / INDENT_UNIT, raw.trim())
}

/// Blank or whitespace-only line
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Output indentation for an emission level
pub fn indentation(level: usize) -> String {
    " ".repeat(level * INDENT_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_whole_units() {
        assert_eq!(measure_indent("x = 1"), (0, "x = 1"));
        assert_eq!(measure_indent("    x = 1"), (1, "x = 1"));
        assert_eq!(measure_indent("        return x"), (2, "return x"));
    }

    #[test]
    fn test_measure_truncates_partial_unit() {
        assert_eq!(measure_indent("      y"), (1, "y"));
        assert_eq!(measure_indent("   z"), (0, "z"));
    }

    #[test]
    fn test_tabs_do_not_count() {
        assert_eq!(measure_indent("\tx"), (0, "x"));
    }

    #[test]
    fn test_blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank("    \t "));
        assert!(!is_blank("  pass"));
    }

    #[test]
    fn test_indentation() {
        assert_eq!(indentation(0), "");
        assert_eq!(indentation(2), "        ");
    }
}
