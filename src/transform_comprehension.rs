//! Container comprehension rewriting
//!
//! List, set and dict comprehensions become an immediately invoked lambda
//! that fills a result container:
//!
//! ```text
//! [x * x for x in numbers if x > 0]
//! [&]() { std::vector<auto> result; for (const auto& x : numbers) { if (x > 0) { result.push_back(x * x); } } return result; }()
//! ```
//!
//! Runs after interpolation rewriting, so braces that belonged to an
//! interpolated literal are already gone.

use crate::helpers::{find_matching_bracket, find_top_level, in_literal, split_top_level};
use crate::transpiler_state::TranslationContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerForm {
    List,
    Set,
    Dict,
}

/// The parts of `[ELEMENT for TARGET in SOURCE if FILTER]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Comprehension<'a> {
    element: &'a str,
    target: &'a str,
    source: &'a str,
    filter: Option<&'a str>,
}

fn parse(inner: &str) -> Option<Comprehension<'_>> {
    let for_at = find_top_level(inner, " for ")?;
    let element = inner[..for_at].trim();
    let rest = &inner[for_at + " for ".len()..];
    let in_at = find_top_level(rest, " in ")?;
    let target = rest[..in_at].trim();
    let tail = &rest[in_at + " in ".len()..];
    let (source, filter) = match find_top_level(tail, " if ") {
        Some(if_at) => (tail[..if_at].trim(), Some(tail[if_at + " if ".len()..].trim())),
        None => (tail.trim(), None),
    };
    if element.is_empty() || target.is_empty() || source.is_empty() {
        return None;
    }
    Some(Comprehension {
        element,
        target,
        source,
        filter,
    })
}

fn binding(target: &str) -> String {
    let names = split_top_level(target.trim_matches(|c| c == '(' || c == ')'), ',');
    if names.len() > 1 {
        format!("[{}]", names.join(", "))
    } else {
        target.to_string()
    }
}

fn render(form: ContainerForm, comp: &Comprehension<'_>) -> Option<String> {
    let (container, insert) = match form {
        ContainerForm::List => (
            "std::vector<auto>",
            format!("result.push_back({});", rewrite_all(comp.element)),
        ),
        ContainerForm::Set => (
            "std::set<auto>",
            format!("result.insert({});", rewrite_all(comp.element)),
        ),
        ContainerForm::Dict => {
            let colon = find_top_level(comp.element, ":")?;
            let key = rewrite_all(comp.element[..colon].trim());
            let value = rewrite_all(comp.element[colon + 1..].trim());
            ("std::map<auto, auto>", format!("result[{}] = {};", key, value))
        }
    };

    let source = rewrite_all(comp.source);
    let source = source.strip_suffix(".items()").unwrap_or(&source);
    let body = match comp.filter {
        Some(cond) => format!("if ({}) {{ {} }}", rewrite_all(cond), insert),
        None => insert,
    };

    Some(format!(
        "[&]() {{ {} result; for (const auto& {} : {}) {{ {} }} return result; }}()",
        container,
        binding(comp.target),
        source,
        body
    ))
}

/// Rewrite every comprehension in `text`, outermost first.
fn rewrite_all(text: &str) -> String {
    let mut result = text.to_string();
    let mut pos = 0;
    while pos < result.len() {
        let b = result.as_bytes()[pos];
        if (b != b'[' && b != b'{') || in_literal(&result, pos) {
            pos += 1;
            continue;
        }
        let Some(close) = find_matching_bracket(&result[pos..]).map(|c| pos + c) else {
            pos += 1;
            continue;
        };
        let inner = &result[pos + 1..close];
        let rendered = parse(inner).and_then(|comp| {
            let form = match b {
                b'[' => ContainerForm::List,
                _ if find_top_level(comp.element, ":").is_some() => ContainerForm::Dict,
                _ => ContainerForm::Set,
            };
            render(form, &comp)
        });
        match rendered {
            Some(text) => {
                result.replace_range(pos..=close, &text);
                pos += text.len();
            }
            None => pos += 1,
        }
    }
    result
}

/// Pass 6: list, set and dict comprehensions.
pub fn transform_comprehensions(line: &str, _ctx: &mut TranslationContext) -> String {
    if has_loop_keyword(line) {
        rewrite_all(line)
    } else {
        line.to_string()
    }
}

/// Cheap precheck: a ` for ` somewhere outside literals.
fn has_loop_keyword(line: &str) -> bool {
    line.match_indices(" for ").any(|(at, _)| !in_literal(line, at))
}
