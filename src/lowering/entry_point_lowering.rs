//! Entry Point Lowering
//!
//! Handles the `if __name__ == "__main__":` section. Once the guard line has
//! been seen, indented lines are queued untranslated instead of emitted.
//! At end of input the queue becomes the body of a synthesized entry
//! function, one direct child statement per queued line:
//!
//! ```text
//! if __name__ == "__main__":        int main() {
//!     x = 1                              x = 1;
//!     print(x)                           std::cout << x << std::endl;
//!                                        return 0;
//!                                    }
//! ```
//!
//! Queued lines lose their relative indentation. A queued line that opens
//! a block is closed immediately so the synthesized function stays
//! balanced, and the flattening is reported.

use crate::error_msg::DiagnosticKind;
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::transpiler_state::TranslationContext;
use crate::translate::{translate_line, RuleOutcome};

/// A source line held back for the entry function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredLine {
    pub number: usize,
    /// Content with indentation stripped.
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeferralBuffer {
    lines: Vec<DeferredLine>,
}

impl DeferralBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, number: usize, content: &str) {
        self.lines.push(DeferredLine {
            number,
            content: content.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeferredLine> {
        self.lines.iter()
    }

    pub fn take(&mut self) -> Vec<DeferredLine> {
        std::mem::take(&mut self.lines)
    }
}

/// Queue or discard a line that follows the entry guard.
///
/// Returns `true` when the line was consumed. Top-level comments are left
/// for normal emission.
pub fn defer_line(ctx: &mut TranslationContext, line: &SourceLine<'_>) -> bool {
    if !ctx.flags.inside_entry_guard {
        return false;
    }
    if line.level > 0 {
        ctx.deferred.push(line.number, line.content);
        return true;
    }
    if line.content.starts_with('#') {
        return false;
    }
    ctx.record(
        DiagnosticKind::DiscardedAfterEntryGuard,
        format!("top-level line after the entry guard dropped: `{}`", line.content),
    );
    true
}

/// Hold a blank line read after the entry guard.
///
/// Blank lines carry no level, so every one of them belongs to the entry
/// function body. Returns `true` when the line was consumed.
pub fn defer_blank(ctx: &mut TranslationContext, number: usize) -> bool {
    if !ctx.flags.inside_entry_guard {
        return false;
    }
    ctx.deferred.push(number, "");
    true
}

/// Emit the entry function at end of input.
///
/// With nothing queued, a bare entry function is still written when the
/// document declares no function or class, so the output stands alone.
pub fn synthesize_entry(ctx: &mut TranslationContext, entry_function: &str) {
    if ctx.deferred.is_empty() {
        if !ctx.symbols.has_declarations() {
            open_entry(ctx, entry_function);
            close_entry(ctx);
        }
        return;
    }

    open_entry(ctx, entry_function);
    for deferred in ctx.deferred.take() {
        if deferred.content.is_empty() {
            ctx.emitter.blank();
            continue;
        }
        ctx.line_number = deferred.number;
        let line = SourceLine {
            number: deferred.number,
            level: 0,
            content: &deferred.content,
        };
        let RuleOutcome::Emit(mut rewrite) = translate_line(&line, ctx) else {
            continue;
        };
        if rewrite.text.starts_with('}') {
            rewrite.text = rewrite.text.trim_start_matches('}').trim_start().to_string();
        }
        ctx.emitter.line(&rewrite.rendered());
        if rewrite.opens_block() {
            ctx.record(
                DiagnosticKind::FlattenedEntryBlock,
                format!("block `{}` flattened into the entry function", deferred.content),
            );
            ctx.emitter.line("}");
        }
    }
    close_entry(ctx);
}

fn open_entry(ctx: &mut TranslationContext, entry_function: &str) {
    if !ctx.emitter.is_empty() && !ctx.emitter.last_is_blank() {
        ctx.emitter.blank();
    }
    ctx.emitter.line(&format!("int {}() {{", entry_function));
    ctx.emitter.indent();
}

fn close_entry(ctx: &mut TranslationContext) {
    ctx.emitter.line("return 0;");
    ctx.emitter.close("}");
}
