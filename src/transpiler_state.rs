//! Translation Context
//!
//! Holds all mutable state threaded through one document translation:
//! emitter, scope stack, context flags, declared class names, the entry
//! point deferral buffer and the diagnostics list. A fresh context is built
//! for every document and passed explicitly into each handler, so separate
//! documents can be translated on separate threads.

use tracing::warn;

use crate::emitter::Emitter;
use crate::error_msg::{Diagnostic, DiagnosticKind};
use crate::first_pass::SymbolTable;
use crate::lowering::entry_point_lowering::DeferralBuffer;
use crate::scope::{FrameKind, ScopeStack};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextFlags {
    pub inside_class: bool,
    pub inside_method: bool,
    pub inside_entry_guard: bool,
}

#[derive(Debug)]
pub struct TranslationContext {
    pub emitter: Emitter,
    pub scopes: ScopeStack,
    pub flags: ContextFlags,
    /// Classes declared so far, in declaration order, unique.
    pub class_names: Vec<String>,
    /// Names collected by the first pass.
    pub symbols: SymbolTable,
    pub deferred: DeferralBuffer,
    pub diagnostics: Vec<Diagnostic>,
    /// Source line currently being translated (1-based).
    pub line_number: usize,
    /// Blank source lines waiting to be written after pending closers.
    pub pending_blanks: usize,
}

impl TranslationContext {
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            emitter: Emitter::new(),
            scopes: ScopeStack::new(),
            flags: ContextFlags::default(),
            class_names: Vec::new(),
            symbols,
            deferred: DeferralBuffer::new(),
            diagnostics: Vec::new(),
            line_number: 0,
            pending_blanks: 0,
        }
    }

    /// Record a non-fatal diagnostic against the current line.
    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(self.line_number, kind, message);
        warn!(
            line = diagnostic.line,
            code = kind.code(),
            "{}: {}",
            kind.title(),
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub fn register_class(&mut self, name: &str) {
        if !self.class_names.iter().any(|c| c == name) {
            self.class_names.push(name.to_string());
        }
    }

    /// Re-derive the class/method flags from the scope stack.
    pub fn refresh_flags(&mut self) {
        self.flags.inside_class = self.scopes.contains(FrameKind::Class);
        self.flags.inside_method = self.scopes.contains(FrameKind::Method);
    }

    pub fn flush_blanks(&mut self) {
        for _ in 0..self.pending_blanks {
            self.emitter.blank();
        }
        self.pending_blanks = 0;
    }
}
