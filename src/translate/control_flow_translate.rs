//! Control Flow Translation
//!
//! Conditional and loop headers:
//! ```text
//! if x > 0:                 if (x > 0) {
//! elif x < 0:               } else if (x < 0) {
//! else:                     } else {
//! while running:            while (running) {
//! for i in range(10):       for (int i = 0; i < 10; ++i) {
//! for k, v in d.items():    for (const auto& [k, v] : d) {
//! for item in items:        for (const auto& item : items) {
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::helpers::{find_matching_bracket, is_identifier, split_top_level};
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::FrameKind;
use crate::transpiler_state::TranslationContext;
use crate::translate::{mismatch, rewrite_expression, Rewrite, RuleOutcome};

static CONDITIONAL_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(if|elif)\b\s*(.+?)\s*:$").unwrap());
static ELSE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^else\s*:$").unwrap());
static WHILE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^while\b\s*(.+?)\s*:$").unwrap());
static FOR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^for\s+(.+?)\s+in\s+(.+?)\s*:$").unwrap());
static RANGE_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^range\s*\(").unwrap());

/// Drop one pair of parentheses wrapping the whole condition.
fn strip_wrapping_parens(cond: &str) -> &str {
    if cond.starts_with('(') && find_matching_bracket(cond) == Some(cond.len() - 1) {
        cond[1..cond.len() - 1].trim()
    } else {
        cond
    }
}

fn condition(raw: &str, ctx: &mut TranslationContext) -> String {
    rewrite_expression(strip_wrapping_parens(raw.trim()), ctx)
}

pub fn translate_conditional(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    if ELSE_HEADER.is_match(line.content) {
        return RuleOutcome::Emit(Rewrite::block("} else {", FrameKind::Conditional));
    }
    let Some(caps) = CONDITIONAL_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "conditional header");
    };
    let cond = condition(&caps[2], ctx);
    let text = match &caps[1] {
        "if" => format!("if ({}) {{", cond),
        _ => format!("}} else if ({}) {{", cond),
    };
    RuleOutcome::Emit(Rewrite::block(text, FrameKind::Conditional))
}

//===========================================================================
// LOOPS
//===========================================================================

/// `range(...)` arguments as `(start, stop, step)`.
fn range_bounds(iterable: &str, ctx: &mut TranslationContext) -> Option<(String, String, String)> {
    let m = RANGE_CALL.find(iterable)?;
    let open = m.end() - 1;
    let close = open + find_matching_bracket(&iterable[open..])?;
    if close != iterable.len() - 1 {
        return None;
    }
    let args: Vec<String> = split_top_level(&iterable[open + 1..close], ',')
        .into_iter()
        .map(|a| rewrite_expression(a, ctx))
        .collect();
    match args.as_slice() {
        [stop] => Some(("0".to_string(), stop.clone(), "1".to_string())),
        [start, stop] => Some((start.clone(), stop.clone(), "1".to_string())),
        [start, stop, step] => Some((start.clone(), stop.clone(), step.clone())),
        _ => None,
    }
}

fn counting_loop(var: &str, start: &str, stop: &str, step: &str) -> String {
    let descending = step.starts_with('-');
    let compare = if descending { ">" } else { "<" };
    let advance = match step {
        "1" => format!("++{}", var),
        "-1" => format!("--{}", var),
        _ => format!("{} += {}", var, step),
    };
    format!(
        "for (int {v} = {}; {v} {} {}; {}) {{",
        start,
        compare,
        stop,
        advance,
        v = var
    )
}

/// Loop target: a single name, or a structured binding for tuples.
fn loop_binding(target: &str) -> String {
    let names = split_top_level(strip_wrapping_parens(target), ',');
    if names.len() > 1 {
        format!("[{}]", names.join(", "))
    } else {
        target.to_string()
    }
}

fn translate_for(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let Some(caps) = FOR_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "for header");
    };
    let target = caps[1].trim();
    let iterable = caps[2].trim();

    if RANGE_CALL.is_match(iterable) {
        if !is_identifier(target) {
            return mismatch(line, ctx, "range loop target");
        }
        let Some((start, stop, step)) = range_bounds(iterable, ctx) else {
            return mismatch(line, ctx, "range arguments");
        };
        let text = counting_loop(target, &start, &stop, &step);
        return RuleOutcome::Emit(Rewrite::block(text, FrameKind::Loop));
    }

    let source = rewrite_expression(iterable, ctx);
    let source = source.strip_suffix(".items()").unwrap_or(&source);
    let text = format!("for (const auto& {} : {}) {{", loop_binding(target), source);
    RuleOutcome::Emit(Rewrite::block(text, FrameKind::Loop))
}

pub fn translate_loop(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    if line.content.starts_with("for") {
        return translate_for(line, ctx);
    }
    let Some(caps) = WHILE_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "while header");
    };
    let cond = condition(&caps[1], ctx);
    RuleOutcome::Emit(Rewrite::block(format!("while ({}) {{", cond), FrameKind::Loop))
}
