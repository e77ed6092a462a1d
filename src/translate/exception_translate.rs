//! Exception Translation
//!
//! ```text
//! try:                          try {
//! except ValueError as err:     } catch (const std::invalid_argument& err) {
//! except:                       } catch (...) {
//! finally:                      // finally
//! raise KeyError("missing")     throw std::out_of_range("missing");
//! raise                         throw;
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::helpers::split_top_level;
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::FrameKind;
use crate::transpiler_state::TranslationContext;
use crate::translate::{mismatch, rewrite_expression, Rewrite, RuleOutcome};

/// Python exception names with a standard library counterpart.
const EXCEPTION_MAP: &[(&str, &str)] = &[
    ("ValueError", "std::invalid_argument"),
    ("TypeError", "std::invalid_argument"),
    ("IndexError", "std::out_of_range"),
    ("KeyError", "std::out_of_range"),
    ("RuntimeError", "std::runtime_error"),
    ("ZeroDivisionError", "std::domain_error"),
    ("OverflowError", "std::overflow_error"),
    ("Exception", "std::exception"),
];

/// Handler binding name when the source gives none.
const DEFAULT_BINDING: &str = "e";

static EXCEPT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^except\b\s*(.*?)\s*:$").unwrap());
static RAISE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^raise\s+([A-Za-z_][\w.]*)\s*(\((.*)\))?\s*(?:from\s+.+)?$").unwrap()
});

pub fn map_exception(name: &str) -> String {
    EXCEPTION_MAP
        .iter()
        .find(|(py, _)| *py == name)
        .map(|(_, cpp)| cpp.to_string())
        .unwrap_or_else(|| name.to_string())
}

fn translate_handler(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let Some(caps) = EXCEPT_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "except header");
    };
    let clause = caps[1].trim();
    if clause.is_empty() {
        return RuleOutcome::Emit(Rewrite::block("} catch (...) {", FrameKind::ExceptionHandler));
    }

    let (types, binding) = match clause.rsplit_once(" as ") {
        Some((types, binding)) => (types.trim(), binding.trim()),
        None => (clause, DEFAULT_BINDING),
    };
    // a tuple of types has no single C++ counterpart
    let caught = if types.starts_with('(') || split_top_level(types, ',').len() > 1 {
        "std::exception".to_string()
    } else {
        map_exception(types)
    };

    RuleOutcome::Emit(Rewrite::block(
        format!("}} catch (const {}& {}) {{", caught, binding),
        FrameKind::ExceptionHandler,
    ))
}

/// `try:`, `except ...:` and `finally:` markers.
pub fn translate_exception_block(
    line: &SourceLine<'_>,
    ctx: &mut TranslationContext,
) -> RuleOutcome {
    let head = line.content.trim_end_matches(':').trim();
    match head {
        "try" => RuleOutcome::Emit(Rewrite::block("try {", FrameKind::ExceptionTry)),
        "finally" => RuleOutcome::Emit(Rewrite::statement("// finally")),
        _ => translate_handler(line, ctx),
    }
}

pub fn translate_raise(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    if line.content == "raise" {
        return RuleOutcome::Emit(Rewrite::statement("throw;"));
    }
    let Some(caps) = RAISE_STATEMENT.captures(line.content) else {
        return mismatch(line, ctx, "raise statement");
    };
    let name = &caps[1];

    let text = match caps.get(3) {
        Some(args) => {
            let args = rewrite_expression(args.as_str(), ctx);
            format!("throw {}({});", map_exception(name), args)
        }
        // re-raising a bound exception object
        None if name.starts_with(|c: char| c.is_lowercase()) => format!("throw {};", name),
        None => format!("throw {}();", map_exception(name)),
    };
    RuleOutcome::Emit(Rewrite::statement(text))
}
