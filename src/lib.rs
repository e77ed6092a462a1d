//! py2cpp - line-oriented Python to C++ translation
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  PASS 1: DECLARATION SCAN                                        │
//! │    → collect function and class names (first_pass)               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  PASS 2: PER-LINE TRANSLATION                                    │
//! │    → measure indentation (lowering::depth_tracking_lowering)     │
//! │    → queue lines behind the entry guard (entry_point_lowering)   │
//! │    → close frames on dedent (lowering::block_lowering)           │
//! │    → classify and rewrite (translate::RULES)                     │
//! │    → expression rewriter (translate::EXPRESSION_PASSES)          │
//! │    → emit, open a frame when the line ends in `{`                │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  END OF INPUT                                                    │
//! │    → close open frames, synthesize the entry function            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no parse tree. Nesting is inferred from indentation alone, so
//! irregular indentation produces irregular braces. Anything a rule cannot
//! make sense of passes through unchanged and is reported as a
//! [`Diagnostic`].

// Core modules
pub mod error;
pub mod error_msg;
pub mod first_pass;
pub mod scope;
pub mod emitter;
pub mod transpiler_state;
pub mod type_resolution;

// Modularized translator components
pub mod helpers;
pub mod lowering;
pub mod translate;

// Expression rewriter passes
pub mod transform_builtin;
pub mod transform_operator;
pub mod transform_string;
pub mod transform_comprehension;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::{Error, Result};
pub use error_msg::{format_diagnostics, Diagnostic, DiagnosticCategory, DiagnosticKind};
pub use first_pass::SymbolTable;
pub use scope::{FrameKind, ScopeFrame, ScopeStack};
pub use transpiler_state::TranslationContext;

use first_pass::run_first_pass;
use lowering::{
    attach_continuation, close_all, close_frames, defer_blank, defer_line, emit_rewrite, is_blank,
    synthesize_entry, SourceLine,
};
use translate::{is_block_continuation, translate_line, RuleOutcome};

/// Include block written ahead of the translated document.
pub const PRELUDE: &[&str] = &[
    "#include <iostream>",
    "#include <string>",
    "#include <vector>",
    "#include <map>",
    "#include <set>",
    "#include <tuple>",
    "#include <stdexcept>",
    "#include <algorithm>",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Write the [`PRELUDE`] include block.
    pub prelude: bool,
    /// Name of the synthesized entry function.
    pub entry_function: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            prelude: true,
            entry_function: "main".to_string(),
        }
    }
}

/// Translated document and everything noticed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

//===========================================================================
// ENGINE
//===========================================================================

/// Translate a Python document with default options.
pub fn translate(source: &str) -> Translation {
    translate_with(source, &TranslateOptions::default())
}

pub fn translate_with(source: &str, options: &TranslateOptions) -> Translation {
    let lines: Vec<&str> = source.lines().collect();
    let symbols = run_first_pass(&lines);
    debug!(
        functions = symbols.functions().len(),
        classes = symbols.classes().len(),
        "first pass complete"
    );

    let mut ctx = TranslationContext::new(symbols);
    if options.prelude {
        for include in PRELUDE {
            ctx.emitter.line(include);
        }
        ctx.emitter.blank();
    }

    for (index, raw) in lines.iter().enumerate() {
        process_line(&mut ctx, index + 1, raw);
    }

    close_all(&mut ctx);
    ctx.flush_blanks();
    synthesize_entry(&mut ctx, &options.entry_function);

    debug!(
        lines = lines.len(),
        diagnostics = ctx.diagnostics.len(),
        "translation complete"
    );
    Translation {
        text: ctx.emitter.finish(),
        diagnostics: ctx.diagnostics,
    }
}

fn process_line(ctx: &mut TranslationContext, number: usize, raw: &str) {
    ctx.line_number = number;

    if is_blank(raw) {
        if !defer_blank(ctx, number) {
            ctx.pending_blanks += 1;
        }
        return;
    }

    let line = SourceLine::measure(number, raw);
    if defer_line(ctx, &line) {
        return;
    }

    let continuation = is_block_continuation(line.content);
    let continued = close_frames(ctx, line.level, continuation);
    ctx.flush_blanks();
    ctx.scopes.mark_body(line.level);

    match translate_line(&line, ctx) {
        RuleOutcome::Emit(mut rewrite) => {
            attach_continuation(ctx, &mut rewrite, continued);
            emit_rewrite(ctx, &line, rewrite);
        }
        RuleOutcome::Suppress => {
            if continued {
                ctx.emitter.line("}");
            }
        }
    }
}

//===========================================================================
// FILE WRAPPER
//===========================================================================

/// Translate `input` into `output`.
///
/// The input is read completely before the output is created, so a read
/// failure never leaves a partial output file behind.
pub fn translate_file(input: &Path, output: &Path) -> Result<Translation> {
    let source = fs::read_to_string(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let translation = translate(&source);

    fs::write(output, &translation.text).map_err(|source| Error::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(translation)
}

#[cfg(test)]
mod tests;
