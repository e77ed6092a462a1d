//! Class Definition Translation
//!
//! Python class header:
//! ```text
//! class Dog(Animal):
//! ```
//!
//! C++ class header, followed by an access specifier line written by the
//! block lowering:
//! ```text
//! class Dog : public Animal {
//! public:
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::helpers::split_top_level;
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::FrameKind;
use crate::transpiler_state::TranslationContext;
use crate::translate::{mismatch, Rewrite, RuleOutcome};

static CLASS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+(\w+)\s*(?:\((.*)\))?\s*:$").unwrap());

/// Base list entries that have no C++ counterpart.
fn is_inheritable(base: &str) -> bool {
    !base.is_empty() && base != "object" && !base.contains('=')
}

pub fn translate_class(line: &SourceLine<'_>, ctx: &mut TranslationContext) -> RuleOutcome {
    let Some(caps) = CLASS_HEADER.captures(line.content) else {
        return mismatch(line, ctx, "class header");
    };
    let name = &caps[1];
    let bases: Vec<String> = caps
        .get(2)
        .map(|m| split_top_level(m.as_str(), ','))
        .unwrap_or_default()
        .into_iter()
        .filter(|b| is_inheritable(b))
        .map(|b| format!("public {}", b))
        .collect();

    ctx.register_class(name);

    let header = if bases.is_empty() {
        format!("class {} {{", name)
    } else {
        format!("class {} : {} {{", name, bases.join(", "))
    };
    RuleOutcome::Emit(Rewrite::block(header, FrameKind::Class).named(name))
}
