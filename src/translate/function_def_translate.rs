//! Function Definition Translation
//!
//! Python function syntax:
//! ```text
//! def area(width: float, height: float = 1.0) -> float:
//! ```
//!
//! C++ function syntax:
//! ```text
//! double area(double width, double height = 1.0) {
//! ```
//!
//! Inside a class body a leading `self` parameter marks a method: it is
//! dropped, and `__init__` becomes a constructor named after the class.
//! A leading `cls` parameter makes the method `static`.

use std::sync::LazyLock;

use regex::Regex;

use crate::helpers::{find_top_level, split_top_level};
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::FrameKind;
use crate::transpiler_state::TranslationContext;
use crate::translate::{mismatch, rewrite_expression, Rewrite, RuleOutcome};
use crate::type_resolution::resolve_type;

static DEF_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^def\s+(\w+)\s*\((.*)\)\s*(?:->\s*(.+?))?\s*:$").unwrap()
});

/// How the first parameter binds the function to its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Receiver {
    None,
    Instance,
    Class,
}

fn receiver(first: Option<&str>) -> Receiver {
    let name = first.map(|p| p.split(':').next().unwrap_or(p).trim());
    match name {
        Some("self") => Receiver::Instance,
        Some("cls") => Receiver::Class,
        _ => Receiver::None,
    }
}

fn translate_parameter(param: &str, ctx: &mut TranslationContext) -> Option<String> {
    if param == "*" || param == "/" {
        return None;
    }
    if param.starts_with("**") {
        return Some(param.to_string());
    }
    if let Some(variadic) = param.strip_prefix('*') {
        let name = variadic.split(':').next().unwrap_or(variadic).trim();
        return Some(format!("auto... {}", name));
    }

    let (declaration, default) = match find_top_level(param, "=") {
        Some(eq) => (param[..eq].trim(), Some(param[eq + 1..].trim())),
        None => (param, None),
    };
    let (name, ty) = match find_top_level(declaration, ":") {
        Some(colon) => (
            declaration[..colon].trim(),
            resolve_type(&declaration[colon + 1..], &ctx.symbols),
        ),
        None => (declaration, "auto".to_string()),
    };

    let mut rendered = format!("{} {}", ty, name);
    if let Some(value) = default {
        rendered.push_str(" = ");
        rendered.push_str(&rewrite_expression(value, ctx));
    }
    Some(rendered)
}

/// Render a Python parameter list as a C++ parameter list.
pub fn translate_parameters(params: &[&str], ctx: &mut TranslationContext) -> String {
    params
        .iter()
        .filter_map(|p| translate_parameter(p, ctx))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn translate_function(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let Some(caps) = DEF_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "function header");
    };
    let name = &caps[1];
    let params = split_top_level(caps.get(2).map_or("", |m| m.as_str()), ',');
    let return_type = caps
        .get(3)
        .map(|m| resolve_type(m.as_str(), &ctx.symbols))
        .unwrap_or_else(|| "auto".to_string());

    let class_name = ctx.scopes.open_class().map(str::to_string);
    let bound = match class_name {
        Some(_) => receiver(params.first().copied()),
        None => Receiver::None,
    };
    let params = if bound == Receiver::None { &params[..] } else { &params[1..] };
    let param_list = translate_parameters(params, ctx);

    let (header, kind) = match (class_name, bound) {
        (Some(class), Receiver::Instance) if name == "__init__" => {
            (format!("{}({}) {{", class, param_list), FrameKind::Method)
        }
        (Some(_), Receiver::Instance) => (
            format!("{} {}({}) {{", return_type, name, param_list),
            FrameKind::Method,
        ),
        (Some(_), Receiver::Class) => (
            format!("static {} {}({}) {{", return_type, name, param_list),
            FrameKind::Method,
        ),
        _ => (
            format!("{} {}({}) {{", return_type, name, param_list),
            FrameKind::Function,
        ),
    };
    RuleOutcome::Emit(Rewrite::block(header, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_pass::SymbolTable;
    use crate::scope::ScopeFrame;

    fn run_in(ctx: &mut TranslationContext, content: &str) -> Rewrite {
        match translate_function(&SourceLine::measure(1, content), ctx) {
            RuleOutcome::Emit(r) => r,
            RuleOutcome::Suppress => panic!("suppressed"),
        }
    }

    fn free(content: &str) -> String {
        let mut ctx = TranslationContext::new(SymbolTable::new());
        run_in(&mut ctx, content).text
    }

    fn in_class(content: &str) -> Rewrite {
        let mut ctx = TranslationContext::new(SymbolTable::new());
        ctx.scopes
            .push(ScopeFrame::new(FrameKind::Class, 0, 1).named(Some("Dog".to_string())));
        run_in(&mut ctx, content)
    }

    #[test]
    fn test_untyped_function() {
        assert_eq!(free("def add(a, b):"), "auto add(auto a, auto b) {");
    }

    #[test]
    fn test_annotated_function() {
        assert_eq!(
            free("def area(w: float, h: float = 1.0) -> float:"),
            "double area(double w, double h = 1.0) {"
        );
        assert_eq!(free("def greet(name: str) -> None:"), "void greet(std::string name) {");
    }

    #[test]
    fn test_default_values_are_rewritten() {
        assert_eq!(
            free("def run(verbose=False, target=None):"),
            "auto run(auto verbose = false, auto target = nullptr) {"
        );
    }

    #[test]
    fn test_variadic_parameters() {
        assert_eq!(free("def log(*args, **kwargs):"), "auto log(auto... args, **kwargs) {");
        assert_eq!(free("def f(a, *, b):"), "auto f(auto a, auto b) {");
    }

    #[test]
    fn test_constructor() {
        let r = in_class("def __init__(self, name):");
        assert_eq!(r.text, "Dog(auto name) {");
        assert_eq!(r.opens, Some(FrameKind::Method));
    }

    #[test]
    fn test_method() {
        let r = in_class("def speak(self) -> str:");
        assert_eq!(r.text, "std::string speak() {");
    }

    #[test]
    fn test_class_method_is_static() {
        let r = in_class("def create(cls, name):");
        assert_eq!(r.text, "static auto create(auto name) {");
    }

    #[test]
    fn test_nested_function_is_not_a_method() {
        let mut ctx = TranslationContext::new(SymbolTable::new());
        let r = run_in(&mut ctx, "def helper(self):");
        assert_eq!(r.text, "auto helper(auto self) {");
        assert_eq!(r.opens, Some(FrameKind::Function));
    }
}
