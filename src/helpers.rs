//! Helper utility functions for the translator
//!
//! String-aware utilities shared by the construct classifier and the
//! expression passes:
//! - Inline comment splitting
//! - Bracket matching
//! - Top-level separator search and splitting
//! - String literal spans and code / literal segmentation
//!
//! Every scanner here works on bytes. Separators and brackets are ASCII, so
//! the indices returned are always valid `str` slice boundaries.

//===========================================================================
// STRING LITERAL SPANS
//===========================================================================

/// A quoted string literal found in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSpan {
    /// Start of the literal including its prefix letters (`f`, `rb`, ...).
    pub prefix_start: usize,
    /// Index of the opening quote.
    pub quote: usize,
    /// One past the closing quote, or the line length when unterminated.
    pub end: usize,
    /// `f"..."` literal with `{expr}` substitutions.
    pub interpolated: bool,
}

impl StringSpan {
    /// Byte range of the literal body, when the closing quote is present.
    pub fn body(&self, line: &str) -> Option<(usize, usize)> {
        let bytes = line.as_bytes();
        let quote = bytes[self.quote];
        if self.end >= self.quote + 2 && bytes[self.end - 1] == quote {
            Some((self.quote + 1, self.end - 1))
        } else {
            None
        }
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Walk back over the literal prefix letters in front of a quote.
fn literal_prefix(bytes: &[u8], quote: usize) -> (usize, bool) {
    let mut start = quote;
    while start > 0 && bytes[start - 1].is_ascii_alphabetic() {
        start -= 1;
    }
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return (quote, false);
    }
    let prefix = &bytes[start..quote];
    let valid = prefix.len() <= 2
        && prefix
            .iter()
            .all(|b| matches!(b.to_ascii_lowercase(), b'f' | b'r' | b'b' | b'u'));
    if !valid {
        return (quote, false);
    }
    let interpolated = prefix.iter().any(|b| b.to_ascii_lowercase() == b'f');
    (start, interpolated)
}

fn scan_string_end(bytes: &[u8], quote: usize) -> usize {
    let q = bytes[quote];
    let mut i = quote + 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == q {
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Locate every string literal in a line, left to right.
pub fn string_spans(line: &str) -> Vec<StringSpan> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' || bytes[i] == b'\'' {
            let (prefix_start, interpolated) = literal_prefix(bytes, i);
            let end = scan_string_end(bytes, i).min(bytes.len());
            spans.push(StringSpan {
                prefix_start,
                quote: i,
                end,
                interpolated,
            });
            i = end;
            continue;
        }
        i += 1;
    }
    spans
}

//===========================================================================
// CODE / LITERAL SEGMENTATION
//===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    Literal,
}

/// A contiguous byte range of a line that is either code or literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
}

fn push_segment(out: &mut Vec<Segment>, kind: SegmentKind, start: usize, end: usize) {
    if start < end {
        out.push(Segment { kind, start, end });
    }
}

/// Split a line into code and literal segments.
///
/// The substitution expressions of an interpolated string count as code;
/// its literal text, quotes and braces count as literal.
pub fn segments(line: &str) -> Vec<Segment> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut cursor = 0;

    for span in string_spans(line) {
        push_segment(&mut out, SegmentKind::Code, cursor, span.quote);
        cursor = span.end;

        if !span.interpolated {
            push_segment(&mut out, SegmentKind::Literal, span.quote, span.end);
            continue;
        }

        let mut lit_start = span.quote;
        let mut j = span.quote + 1;
        while j < span.end {
            match bytes[j] {
                b'{' if j + 1 < span.end && bytes[j + 1] == b'{' => j += 2,
                b'{' => {
                    push_segment(&mut out, SegmentKind::Literal, lit_start, j + 1);
                    let close = find_interpolation_close(bytes, j + 1, span.end);
                    push_segment(&mut out, SegmentKind::Code, j + 1, close);
                    lit_start = close;
                    j = close + 1;
                }
                _ => j += 1,
            }
        }
        push_segment(&mut out, SegmentKind::Literal, lit_start, span.end);
    }

    push_segment(&mut out, SegmentKind::Code, cursor, bytes.len());
    out
}

/// Index of the `}` closing a substitution that starts at `from`, or `limit`.
pub fn find_interpolation_close(bytes: &[u8], from: usize, limit: usize) -> usize {
    let mut depth = 0usize;
    let mut k = from;
    while k < limit {
        match bytes[k] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b'}' if depth == 0 => return k,
            b'}' => depth -= 1,
            _ => {}
        }
        k += 1;
    }
    limit
}

/// Apply `f` to every code segment, leaving literal text untouched.
pub fn map_code<F>(line: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut result = String::with_capacity(line.len());
    for seg in segments(line) {
        let text = &line[seg.start..seg.end];
        match seg.kind {
            SegmentKind::Code => result.push_str(&f(text)),
            SegmentKind::Literal => result.push_str(text),
        }
    }
    result
}

/// True when byte `pos` falls inside literal text.
pub fn in_literal(line: &str, pos: usize) -> bool {
    segments(line)
        .iter()
        .any(|s| s.kind == SegmentKind::Literal && s.start <= pos && pos < s.end)
}

//===========================================================================
// COMMENTS, BRACKETS AND SEPARATORS
//===========================================================================

/// Split a trailing `#` comment off a line, ignoring `#` inside strings.
pub fn split_inline_comment(line: &str) -> (&str, Option<&str>) {
    let mut cursor = 0;
    for span in string_spans(line) {
        if let Some(pos) = line[cursor..span.prefix_start].find('#') {
            let at = cursor + pos;
            return (line[..at].trim_end(), Some(line[at + 1..].trim()));
        }
        cursor = span.end;
    }
    match line[cursor..].find('#') {
        Some(pos) => {
            let at = cursor + pos;
            (line[..at].trim_end(), Some(line[at + 1..].trim()))
        }
        None => (line, None),
    }
}

/// Find the index of the bracket closing the one `s` starts with.
pub fn find_matching_bracket(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !matches!(bytes.first(), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if let Some(q) = quote {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
            }
        } else {
            match c {
                b'"' | b'\'' => quote = Some(c),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Position of `needle` at bracket depth zero and outside string literals.
pub fn find_top_level(s: &str, needle: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let pattern = needle.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if let Some(q) = quote {
            if c == b'\\' {
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if depth == 0 && bytes[i..].starts_with(pattern) {
            return Some(i);
        }
        match c {
            b'"' | b'\'' => quote = Some(c),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split on `sep` where it occurs at bracket depth zero, trimming each piece.
pub fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    let mut sep_buf = [0u8; 4];
    let sep_str: &str = sep.encode_utf8(&mut sep_buf);

    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(pos) = find_top_level(rest, sep_str) {
        parts.push(rest[..pos].trim());
        rest = &rest[pos + sep_str.len()..];
    }
    parts.push(rest.trim());
    parts
}

/// Check if a string is a plain identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Check if a rewritten statement still needs a `;`
pub fn needs_terminator(text: &str) -> bool {
    let trimmed = text.trim_end();
    !trimmed.is_empty()
        && !trimmed.ends_with('{')
        && !trimmed.ends_with(';')
        && !trimmed.starts_with("//")
}
