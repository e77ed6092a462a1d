//! Interpolated string rewriting
//!
//! `f"Hello {name}!"` becomes the stream chain `"Hello " << name << "!"`.
//! When the literal is not already a stream operand the chain is written
//! to `std::cout`. Format specs and `!r`-style conversions are dropped;
//! `{{` and `}}` unescape to single braces.

use crate::error_msg::DiagnosticKind;
use crate::helpers::{find_interpolation_close, find_top_level, string_spans, StringSpan};
use crate::transpiler_state::TranslationContext;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Expr(String),
}

/// Reason an interpolated literal could not be split.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InterpolationError {
    Unterminated,
    UnmatchedClose,
    EmptyExpression,
}

impl InterpolationError {
    fn describe(&self) -> &'static str {
        match self {
            InterpolationError::Unterminated => "unterminated `{` substitution",
            InterpolationError::UnmatchedClose => "single `}` outside a substitution",
            InterpolationError::EmptyExpression => "empty `{}` substitution",
        }
    }
}

/// Re-quote literal text for a C++ double-quoted string.
fn cpp_text(text: &str, quote: u8) -> String {
    if quote == b'\'' {
        text.replace("\\'", "'").replace('"', "\\\"")
    } else {
        text.to_string()
    }
}

fn clean_expression(raw: &str) -> String {
    let mut expr = raw.trim();
    if let Some(colon) = find_top_level(expr, ":") {
        expr = expr[..colon].trim_end();
    }
    for conversion in ["!r", "!s", "!a"] {
        if let Some(stripped) = expr.strip_suffix(conversion) {
            expr = stripped.trim_end();
        }
    }
    expr.to_string()
}

fn split_pieces(body: &str, quote: u8) -> Result<Vec<Piece>, InterpolationError> {
    let bytes = body.as_bytes();
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' if i + 1 < bytes.len() && bytes[i + 1] == bytes[i] => {
                text.push_str(&body[run_start..i]);
                text.push(bytes[i] as char);
                i += 2;
                run_start = i;
            }
            b'{' => {
                text.push_str(&body[run_start..i]);
                let close = find_interpolation_close(bytes, i + 1, bytes.len());
                if close == bytes.len() {
                    return Err(InterpolationError::Unterminated);
                }
                let expr = clean_expression(&body[i + 1..close]);
                if expr.is_empty() {
                    return Err(InterpolationError::EmptyExpression);
                }
                if !text.is_empty() {
                    pieces.push(Piece::Text(cpp_text(&text, quote)));
                    text.clear();
                }
                pieces.push(Piece::Expr(expr));
                i = close + 1;
                run_start = i;
            }
            b'}' => return Err(InterpolationError::UnmatchedClose),
            _ => i += 1,
        }
    }
    text.push_str(&body[run_start..]);
    if !text.is_empty() {
        pieces.push(Piece::Text(cpp_text(&text, quote)));
    }
    Ok(pieces)
}

fn render_chain(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "\"\"".to_string();
    }
    pieces
        .iter()
        .map(|p| match p {
            Piece::Text(t) => format!("\"{}\"", t),
            Piece::Expr(e) => e.clone(),
        })
        .collect::<Vec<_>>()
        .join(" << ")
}

fn rewrite_span(line: &str, span: &StringSpan) -> Result<String, InterpolationError> {
    let (body_start, body_end) = span.body(line).ok_or(InterpolationError::Unterminated)?;
    let quote = line.as_bytes()[span.quote];
    let pieces = split_pieces(&line[body_start..body_end], quote)?;
    let chain = render_chain(&pieces);

    let streamed = line[..span.prefix_start].trim_end().ends_with("<<");
    Ok(if streamed {
        chain
    } else {
        format!("std::cout << {}", chain)
    })
}

/// Pass 5: interpolated string literals to stream chains.
pub fn transform_interpolation(line: &str, ctx: &mut TranslationContext) -> String {
    let spans: Vec<StringSpan> = string_spans(line)
        .into_iter()
        .filter(|s| s.interpolated)
        .collect();
    if spans.is_empty() {
        return line.to_string();
    }

    // right to left so earlier offsets stay valid
    let mut result = line.to_string();
    for span in spans.iter().rev() {
        match rewrite_span(&result, span) {
            Ok(rendered) => {
                result.replace_range(span.prefix_start..span.end, &rendered);
            }
            Err(err) => ctx.record(
                DiagnosticKind::PatternMismatch,
                format!("interpolated string left unchanged: {}", err.describe()),
            ),
        }
    }
    result
}
