//! Expression Rewriter
//!
//! A fixed, order-sensitive pipeline of intra-line substitutions. Later
//! passes see the text produced by earlier ones:
//! - builtins must run before `self` rewriting so `print(self.x)` still
//!   sees a bare call
//! - interpolation must run before comprehension rewriting so braces of an
//!   interpolated literal are not read as a set comprehension
//!
//! A pass that cannot make sense of its sub-shape leaves the text unchanged.

use tracing::trace;

use crate::transform_builtin::{transform_builtin_calls, transform_super_init};
use crate::transform_comprehension::transform_comprehensions;
use crate::transform_operator::{transform_operators, transform_self_access};
use crate::transform_string::transform_interpolation;
use crate::transpiler_state::TranslationContext;

pub struct ExpressionPass {
    pub name: &'static str,
    pub apply: fn(&str, &mut TranslationContext) -> String,
}

pub static EXPRESSION_PASSES: &[ExpressionPass] = &[
    ExpressionPass {
        name: "builtin-calls",
        apply: transform_builtin_calls,
    },
    ExpressionPass {
        name: "super-init",
        apply: transform_super_init,
    },
    ExpressionPass {
        name: "self-access",
        apply: transform_self_access,
    },
    ExpressionPass {
        name: "operators",
        apply: transform_operators,
    },
    ExpressionPass {
        name: "interpolation",
        apply: transform_interpolation,
    },
    ExpressionPass {
        name: "comprehensions",
        apply: transform_comprehensions,
    },
];

/// Run every pass over `text` in order.
pub fn rewrite_expression(text: &str, ctx: &mut TranslationContext) -> String {
    EXPRESSION_PASSES.iter().fold(text.to_string(), |current, pass| {
        let next = (pass.apply)(&current, ctx);
        if next != current {
            trace!(pass = pass.name, before = %current, after = %next, "rewrote");
        }
        next
    })
}
