//! Statement Translation
//!
//! Simple statements and the fallback rule:
//! - `return a, b` returns a tuple
//! - `pass`, imports and decorators become comments
//! - `name: T = value` becomes a typed declaration
//! - anything else runs through the expression rewriter and gets a `;`

use std::sync::LazyLock;

use regex::Regex;

use crate::helpers::{needs_terminator, split_top_level};
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::transpiler_state::TranslationContext;
use crate::translate::{mismatch, rewrite_expression, Rewrite, RuleOutcome};
use crate::type_resolution::resolve_type;

static ANNOTATED_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][\w.]*)\s*:\s*([^=]+?)\s*(?:=\s*(.+))?$").unwrap()
});

pub fn translate_return(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let value = line.content["return".len()..].trim();
    if value.is_empty() {
        return RuleOutcome::Emit(Rewrite::statement("return;"));
    }

    let parts = split_top_level(value, ',');
    let text = if parts.len() > 1 {
        let parts: Vec<String> = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(|p| rewrite_expression(p, ctx))
            .collect();
        format!("return std::make_tuple({});", parts.join(", "))
    } else {
        format!("return {};", rewrite_expression(value, ctx))
    };
    RuleOutcome::Emit(Rewrite::statement(text))
}

pub fn translate_pass(_line: &SourceLine<'_>, _ctx: &mut TranslationContext) -> RuleOutcome {
    RuleOutcome::Emit(Rewrite::statement("// pass"))
}

pub fn translate_import(line: &SourceLine<'_>, _ctx: &mut TranslationContext) -> RuleOutcome {
    RuleOutcome::Emit(Rewrite::statement(format!("// {}", line.content)))
}

pub fn translate_decorator(line: &SourceLine<'_>, _ctx: &mut TranslationContext) -> RuleOutcome {
    RuleOutcome::Emit(Rewrite::statement(format!("// {}", line.content)))
}

fn translate_declaration(
    caps: &regex::Captures<'_>,
    ctx: &mut TranslationContext,
) -> String {
    let name = rewrite_expression(&caps[1], ctx);
    let ty = resolve_type(&caps[2], &ctx.symbols);
    match caps.get(3) {
        Some(value) => format!("{} {} = {};", ty, name, rewrite_expression(value.as_str(), ctx)),
        None => format!("{} {};", ty, name),
    }
}

/// Fallback rule: expression statements and declarations.
pub fn translate_statement(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let code = line.content;
    if code.is_empty() {
        return RuleOutcome::Emit(Rewrite::statement(""));
    }
    if code.ends_with(':') {
        return mismatch(line, ctx, "block header");
    }
    if let Some(caps) = ANNOTATED_ASSIGNMENT.captures(code) {
        return RuleOutcome::Emit(Rewrite::statement(translate_declaration(&caps, ctx)));
    }

    let mut text = rewrite_expression(code, ctx);
    if needs_terminator(&text) {
        text.push(';');
    }
    RuleOutcome::Emit(Rewrite::statement(text))
}
