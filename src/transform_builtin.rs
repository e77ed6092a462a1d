//! Built-in call rewriting
//!
//! - `print(a, b)` becomes a `std::cout` write ending in `std::endl`
//! - `len(x)` becomes `x.size()`
//! - `super().__init__(args)` becomes a qualified base initializer call
//!
//! Calls are located outside string literals and their arguments are cut
//! out with bracket matching, so nested calls such as `print(len(xs))`
//! rewrite inside out.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_msg::DiagnosticKind;
use crate::helpers::{find_matching_bracket, find_top_level, in_literal, split_top_level};
use crate::transpiler_state::TranslationContext;

static PRINT_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bprint\s*\(").unwrap());
static LEN_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blen\s*\(").unwrap());
static SUPER_INIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsuper\s*\(\s*\)\s*\.\s*__init__\s*\(").unwrap());

/// Keyword arguments of `print` that have no stream equivalent.
const PRINT_KWARGS: &[&str] = &["sep", "file", "flush"];

//===========================================================================
// CALL LOCATION
//===========================================================================

/// A call found in a line: `[start, open]` is the callee text, `open..=close`
/// the parenthesized arguments.
struct CallSite {
    start: usize,
    open: usize,
    close: usize,
}

fn next_call(line: &str, pattern: &Regex, from: usize) -> Option<CallSite> {
    let mut search = from;
    while let Some(m) = pattern.find_at(line, search) {
        search = m.end();
        let preceded_by_dot = line[..m.start()].trim_end().ends_with('.');
        if preceded_by_dot || in_literal(line, m.start()) {
            continue;
        }
        let open = m.end() - 1;
        let close = open + find_matching_bracket(&line[open..])?;
        return Some(CallSite {
            start: m.start(),
            open,
            close,
        });
    }
    None
}

/// Replace every call matched by `pattern` with `render(arguments)`.
fn rewrite_calls<F>(line: &str, pattern: &Regex, mut render: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut result = line.to_string();
    let mut from = 0;
    while let Some(call) = next_call(&result, pattern, from) {
        let rendered = render(&result[call.open + 1..call.close]);
        result = format!(
            "{}{}{}",
            &result[..call.start],
            rendered,
            &result[call.close + 1..]
        );
        from = call.start;
    }
    result
}

//===========================================================================
// PRINT / LEN
//===========================================================================

fn render_print(args: &str) -> String {
    let mut operands: Vec<String> = Vec::new();
    let mut terminator = "std::endl".to_string();

    for arg in split_top_level(args, ',') {
        if let Some(eq) = find_top_level(arg, "=") {
            let key = arg[..eq].trim();
            let value = arg[eq + 1..].trim();
            if key == "end" {
                terminator = value.to_string();
                continue;
            }
            if PRINT_KWARGS.contains(&key) {
                continue;
            }
        }
        operands.push(arg.to_string());
    }

    let mut parts = vec!["std::cout".to_string()];
    parts.push(operands.join(" << \" \" << "));
    if terminator != "\"\"" && terminator != "''" {
        parts.push(terminator);
    }
    parts.retain(|p| !p.is_empty());
    parts.join(" << ")
}

fn render_len(arg: &str) -> String {
    let arg = arg.trim();
    let compound = arg
        .chars()
        .any(|c| matches!(c, ' ' | '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '?' | ':'))
        && !arg.starts_with('"');
    if compound {
        format!("({}).size()", arg)
    } else {
        format!("{}.size()", arg)
    }
}

/// Pass 1: display and size calls.
pub fn transform_builtin_calls(line: &str, _ctx: &mut TranslationContext) -> String {
    let printed = rewrite_calls(line, &PRINT_CALL, render_print);
    rewrite_calls(&printed, &LEN_CALL, render_len)
}

//===========================================================================
// SUPER INITIALIZER
//===========================================================================

/// Pass 2: `super().__init__(args)` → `Base::__init__(args)`, where `Base`
/// is the second-to-last declared class. With fewer than two declared
/// classes the call is left as written and a diagnostic is recorded.
pub fn transform_super_init(line: &str, ctx: &mut TranslationContext) -> String {
    if next_call(line, &SUPER_INIT, 0).is_none() {
        return line.to_string();
    }

    let count = ctx.class_names.len();
    if count < 2 {
        ctx.record(
            DiagnosticKind::UndefinedBaseClassReference,
            format!(
                "`super().__init__` needs two declared classes, found {}; call left unchanged",
                count
            ),
        );
        return line.to_string();
    }

    let base = ctx.class_names[count - 2].clone();
    rewrite_calls(line, &SUPER_INIT, |args| format!("{}::__init__({})", base, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_pass::SymbolTable;

    fn ctx() -> TranslationContext {
        TranslationContext::new(SymbolTable::new())
    }

    #[test]
    fn test_print_single_argument() {
        let out = transform_builtin_calls("print(x)", &mut ctx());
        assert_eq!(out, "std::cout << x << std::endl");
    }

    #[test]
    fn test_print_joins_arguments_with_space() {
        let out = transform_builtin_calls("print(\"total:\", total)", &mut ctx());
        assert_eq!(out, "std::cout << \"total:\" << \" \" << total << std::endl");
    }

    #[test]
    fn test_print_without_arguments() {
        let out = transform_builtin_calls("print()", &mut ctx());
        assert_eq!(out, "std::cout << std::endl");
    }

    #[test]
    fn test_print_end_keyword() {
        let out = transform_builtin_calls("print(x, end=\"\")", &mut ctx());
        assert_eq!(out, "std::cout << x");
    }

    #[test]
    fn test_nested_len_inside_print() {
        let out = transform_builtin_calls("print(len(items))", &mut ctx());
        assert_eq!(out, "std::cout << items.size() << std::endl");
    }

    #[test]
    fn test_len_of_compound_expression() {
        let out = transform_builtin_calls("n = len(a + b)", &mut ctx());
        assert_eq!(out, "n = (a + b).size()");
    }

    #[test]
    fn test_method_named_print_is_untouched() {
        let out = transform_builtin_calls("logger.print(x)", &mut ctx());
        assert_eq!(out, "logger.print(x)");
    }

    #[test]
    fn test_call_inside_string_is_untouched() {
        let out = transform_builtin_calls("s = \"print(x)\"", &mut ctx());
        assert_eq!(out, "s = \"print(x)\"");
    }

    #[test]
    fn test_super_init_uses_second_to_last_class() {
        let mut c = ctx();
        c.register_class("Animal");
        c.register_class("Dog");
        let out = transform_super_init("super().__init__(name)", &mut c);
        assert_eq!(out, "Animal::__init__(name)");
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn test_super_init_with_one_class_is_left_alone() {
        let mut c = ctx();
        c.register_class("Dog");
        let out = transform_super_init("super().__init__(name)", &mut c);
        assert_eq!(out, "super().__init__(name)");
        assert_eq!(c.diagnostics.len(), 1);
        assert_eq!(c.diagnostics[0].kind, DiagnosticKind::UndefinedBaseClassReference);
    }
}
