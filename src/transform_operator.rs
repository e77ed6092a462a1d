//! Operator and keyword rewriting
//!
//! Word operators and the Python constants are replaced inside code
//! segments only; literal text passes through untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::helpers::map_code;
use crate::transpiler_state::TranslationContext;

static SELF_ACCESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bself\s*\.").unwrap());

/// Word operators and constants in one alternation. Leftmost-first
/// matching tries the two-word forms before their one-word prefixes.
static KEYWORD_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(is\s+not|not\s+in|is|not|and|or|True|False|None)\b(\s*)").unwrap()
});

fn symbol_for(keyword: &str) -> Option<&'static str> {
    let words: Vec<&str> = keyword.split_whitespace().collect();
    match words.as_slice() {
        ["is", "not"] => Some("!="),
        ["is"] => Some("=="),
        ["and"] => Some("&&"),
        ["or"] => Some("||"),
        ["True"] => Some("true"),
        ["False"] => Some("false"),
        ["None"] => Some("nullptr"),
        // membership tests keep their keyword form
        _ => None,
    }
}

fn rewrite_operators(code: &str) -> String {
    KEYWORD_OPERATOR
        .replace_all(code, |caps: &Captures<'_>| {
            let keyword = &caps[1];
            let spacing = &caps[2];
            if keyword == "not" {
                return "!".to_string();
            }
            match symbol_for(keyword) {
                Some(symbol) => format!("{}{}", symbol, spacing),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Pass 3: `self.x` → `this->x`.
pub fn transform_self_access(line: &str, _ctx: &mut TranslationContext) -> String {
    map_code(line, |code| SELF_ACCESS.replace_all(code, "this->").into_owned())
}

/// Pass 4: word operators and constants.
pub fn transform_operators(line: &str, _ctx: &mut TranslationContext) -> String {
    map_code(line, rewrite_operators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_pass::SymbolTable;

    fn run(line: &str) -> String {
        let mut ctx = TranslationContext::new(SymbolTable::new());
        transform_operators(line, &mut ctx)
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(run("a and b or c"), "a && b || c");
        assert_eq!(run("not done"), "!done");
    }

    #[test]
    fn test_identity_operators() {
        assert_eq!(run("x is None"), "x == nullptr");
        assert_eq!(run("x is not None"), "x != nullptr");
    }

    #[test]
    fn test_constants() {
        assert_eq!(run("flag = True"), "flag = true");
        assert_eq!(run("flag = False"), "flag = false");
    }

    #[test]
    fn test_identifiers_containing_keywords_are_untouched() {
        assert_eq!(run("android = notice + Nonesuch"), "android = notice + Nonesuch");
    }

    #[test]
    fn test_literal_text_is_untouched() {
        assert_eq!(run("msg = \"True and not None\""), "msg = \"True and not None\"");
    }

    #[test]
    fn test_membership_keeps_not_in() {
        assert_eq!(run("x not in items"), "x not in items");
    }

    #[test]
    fn test_identifier_spelled_like_membership_is_untouched() {
        assert_eq!(run("not_in = 1"), "not_in = 1");
        assert_eq!(run("if x not in not_in"), "if x not in not_in");
    }

    #[test]
    fn test_two_word_forms_need_whole_words() {
        assert_eq!(run("x is nothing"), "x == nothing");
        assert_eq!(run("not input"), "!input");
    }

    #[test]
    fn test_self_access() {
        let mut ctx = TranslationContext::new(SymbolTable::new());
        assert_eq!(
            transform_self_access("self.name = name", &mut ctx),
            "this->name = name"
        );
        assert_eq!(
            transform_self_access("s = \"self.name\"", &mut ctx),
            "s = \"self.name\""
        );
    }
}
