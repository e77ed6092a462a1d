//! Translation Module
//!
//! The construct classifier: an ordered table of `(predicate, handler)`
//! rules. Each source line is dispatched to the first rule whose predicate
//! accepts it; the last rule accepts everything and runs the expression
//! rewriter. Precedence is the table order:
//!
//! 1. comment
//! 2. entry guard
//! 3. class header
//! 4. function / method header
//! 5. conditional header
//! 6. loop header
//! 7. exception block marker
//! 8. raise
//! 9. return
//! 10. pass
//! 11. import
//! 12. decorator
//! 13. statement (fallback)

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error_msg::DiagnosticKind;
use crate::helpers::split_inline_comment;
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::FrameKind;
use crate::transpiler_state::TranslationContext;

// Construct handlers
pub mod class_def_translate;
pub mod function_def_translate;
pub mod control_flow_translate;
pub mod exception_translate;
pub mod statement_translate;

// Intra-line rewriting
pub mod expression_translate;

// Re-exports for convenience
pub use class_def_translate::translate_class;
pub use function_def_translate::{translate_function, translate_parameters};
pub use control_flow_translate::{translate_conditional, translate_loop};
pub use exception_translate::{map_exception, translate_exception_block, translate_raise};
pub use statement_translate::{
    translate_decorator,
    translate_import,
    translate_pass,
    translate_return,
    translate_statement,
};
pub use expression_translate::{rewrite_expression, ExpressionPass, EXPRESSION_PASSES};

//===========================================================================
// REWRITE RESULT
//===========================================================================

/// A translated line, before indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Frame kind pushed when `text` ends in `{`.
    pub opens: Option<FrameKind>,
    /// Declared name carried into the frame (class headers).
    pub name: Option<String>,
    /// Trailing source comment, without the `#`.
    pub comment: Option<String>,
}

impl Rewrite {
    pub fn statement(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            opens: None,
            name: None,
            comment: None,
        }
    }

    pub fn block(text: impl Into<String>, kind: FrameKind) -> Self {
        Self {
            opens: Some(kind),
            ..Self::statement(text)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_comment(mut self, comment: Option<&str>) -> Self {
        if let Some(c) = comment.filter(|c| !c.is_empty()) {
            self.comment = Some(c.to_string());
        }
        self
    }

    pub fn opens_block(&self) -> bool {
        self.text.trim_end().ends_with('{')
    }

    /// Frame kind to push, when the text opens a block.
    pub fn frame_kind(&self) -> Option<FrameKind> {
        self.opens_block()
            .then(|| self.opens.unwrap_or(FrameKind::Block))
    }

    /// Final line text with the carried comment appended.
    pub fn rendered(&self) -> String {
        match &self.comment {
            Some(c) if self.text.is_empty() => format!("// {}", c),
            Some(c) => format!("{} // {}", self.text, c),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Emit(Rewrite),
    /// The line produces no output of its own.
    Suppress,
}

//===========================================================================
// RULE TABLE
//===========================================================================

pub struct PatternRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub handle: fn(&SourceLine<'_>, &mut TranslationContext) -> RuleOutcome,
}

static ENTRY_GUARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^if\s*\(?\s*__name__\s*==\s*['"]__main__['"]\s*\)?\s*:$"#).unwrap()
});
static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?:if|elif)\b|else\s*:)").unwrap());
static LOOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:for|while)\b").unwrap());
static EXCEPTION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?:try|finally)\s*:$|except\b)").unwrap());
static RAISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^raise\b").unwrap());
static RETURN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^return\b").unwrap());
static IMPORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:import|from)\s").unwrap());
static CONDITIONAL_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:elif\b|else\s*:)").unwrap());
static HANDLER_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^except\b").unwrap());

const AFTER_CONDITIONAL: &[FrameKind] = &[FrameKind::Conditional];
const AFTER_TRY: &[FrameKind] = &[FrameKind::ExceptionTry, FrameKind::ExceptionHandler];

pub fn is_entry_guard(code: &str) -> bool {
    ENTRY_GUARD.is_match(code)
}

fn handle_comment(line: &SourceLine<'_>, _ctx: &mut TranslationContext) -> RuleOutcome {
    RuleOutcome::Emit(Rewrite::statement(format!("//{}", &line.content[1..])))
}

fn handle_entry_guard(_line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    ctx.flags.inside_entry_guard = true;
    RuleOutcome::Suppress
}

pub static RULES: &[PatternRule] = &[
    PatternRule {
        name: "comment",
        matches: |c| c.starts_with('#'),
        handle: handle_comment,
    },
    PatternRule {
        name: "entry-guard",
        matches: is_entry_guard,
        handle: handle_entry_guard,
    },
    PatternRule {
        name: "class",
        matches: |c| c.starts_with("class "),
        handle: translate_class,
    },
    PatternRule {
        name: "def",
        matches: |c| c.starts_with("def "),
        handle: translate_function,
    },
    PatternRule {
        name: "conditional",
        matches: |c| CONDITIONAL.is_match(c),
        handle: translate_conditional,
    },
    PatternRule {
        name: "loop",
        matches: |c| LOOP.is_match(c),
        handle: translate_loop,
    },
    PatternRule {
        name: "exception-block",
        matches: |c| EXCEPTION_BLOCK.is_match(c),
        handle: translate_exception_block,
    },
    PatternRule {
        name: "raise",
        matches: |c| RAISE.is_match(c),
        handle: translate_raise,
    },
    PatternRule {
        name: "return",
        matches: |c| RETURN.is_match(c),
        handle: translate_return,
    },
    PatternRule {
        name: "pass",
        matches: |c| c == "pass",
        handle: translate_pass,
    },
    PatternRule {
        name: "import",
        matches: |c| IMPORT.is_match(c),
        handle: translate_import,
    },
    PatternRule {
        name: "decorator",
        matches: |c| c.starts_with('@'),
        handle: translate_decorator,
    },
    PatternRule {
        name: "statement",
        matches: |_| true,
        handle: translate_statement,
    },
];

//===========================================================================
// DISPATCH
//===========================================================================

/// Classify one source line and produce its rewrite.
///
/// A trailing `# comment` is split off before classification and carried
/// onto the rewrite.
pub fn translate_line(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let (code, comment) = if line.content.starts_with('#') {
        (line.content, None)
    } else {
        split_inline_comment(line.content)
    };
    let code_line = SourceLine {
        content: code,
        ..*line
    };

    for rule in RULES {
        if (rule.matches)(code) {
            debug!(line = line.number, rule = rule.name, "classified");
            return match (rule.handle)(&code_line, ctx) {
                RuleOutcome::Emit(rewrite) => RuleOutcome::Emit(rewrite.with_comment(comment)),
                RuleOutcome::Suppress => RuleOutcome::Suppress,
            };
        }
    }
    RuleOutcome::Suppress
}

/// Frame kinds a continuation header (`elif`, `else`, `except`) may follow.
pub fn is_block_continuation(content: &str) -> Option<&'static [FrameKind]> {
    let code = split_inline_comment(content).0;
    if CONDITIONAL_CONTINUATION.is_match(code) {
        Some(AFTER_CONDITIONAL)
    } else if HANDLER_CONTINUATION.is_match(code) {
        Some(AFTER_TRY)
    } else {
        None
    }
}

/// Record a pattern mismatch and pass the line through unchanged.
pub fn mismatch(line: &SourceLine<'_>, ctx: &mut TranslationContext, what: &str) -> RuleOutcome {
    ctx.record(
        DiagnosticKind::PatternMismatch,
        format!("{} could not be parsed, passed through: `{}`", what, line.content),
    );
    RuleOutcome::Emit(Rewrite::statement(line.content))
}
