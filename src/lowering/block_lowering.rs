//! Block Lowering
//!
//! Turns indentation changes into emitted braces:
//! - a dedent closes every frame opened at or deeper than the new level,
//!   innermost first, one closer per frame
//! - a continuation header (`elif`, `else`, `except`) at the level of the
//!   frame it continues reuses that frame's closing brace as its own
//!   leading `}`
//! - a rewrite ending in `{` pushes a frame and raises the emission level
//! - end of input closes whatever is still open

use crate::error_msg::DiagnosticKind;
use crate::lowering::depth_tracking_lowering::SourceLine;
use crate::scope::{FrameKind, ScopeFrame};
use crate::transpiler_state::TranslationContext;
use crate::translate::Rewrite;

/// Close frames for a line at `level`.
///
/// Returns `true` when the frame at exactly `level` was left open for a
/// continuation header to close with its own leading `}`.
pub fn close_frames(
    ctx: &mut TranslationContext,
    level: usize,
    continuation: Option<&[FrameKind]>,
) -> bool {
    let mut continued = false;
    for frame in ctx.scopes.pop_to(level) {
        let continues = frame.level == level
            && continuation.is_some_and(|kinds| kinds.contains(&frame.kind));
        if continues {
            ctx.emitter.dedent();
            continued = true;
        } else {
            ctx.emitter.close(frame.kind.closer());
        }
    }
    ctx.refresh_flags();
    continued
}

/// Reconcile a rewrite's leading `}` with what `close_frames` did.
pub fn attach_continuation(ctx: &mut TranslationContext, rewrite: &mut Rewrite, continued: bool) {
    let leads_with_closer = rewrite.text.starts_with('}');
    if continued && !leads_with_closer {
        ctx.emitter.line("}");
    } else if !continued && leads_with_closer {
        let header = rewrite.text.trim_start_matches('}').trim_start().to_string();
        ctx.record(
            DiagnosticKind::OrphanContinuation,
            format!("`{}` has no open block to continue", header.trim_end_matches(" {")),
        );
        rewrite.text = header;
    }
}

/// Write a rewrite and open its frame when it ends in `{`.
pub fn emit_rewrite(ctx: &mut TranslationContext, line: &SourceLine<'_>, rewrite: Rewrite) {
    ctx.emitter.line(&rewrite.rendered());
    let Some(kind) = rewrite.frame_kind() else {
        return;
    };
    if kind == FrameKind::Class {
        ctx.emitter.line("public:");
    }
    ctx.scopes
        .push(ScopeFrame::new(kind, line.level, line.number).named(rewrite.name));
    ctx.emitter.indent();
    ctx.refresh_flags();
}

/// Close every open frame at end of input.
pub fn close_all(ctx: &mut TranslationContext) {
    for frame in ctx.scopes.pop_to(0) {
        if !frame.has_body {
            ctx.line_number = frame.line;
            ctx.record(
                DiagnosticKind::UnterminatedScope,
                format!("{} block has no body before end of input", frame.kind),
            );
        }
        ctx.emitter.close(frame.kind.closer());
    }
    ctx.refresh_flags();
}
