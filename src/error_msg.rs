//! Translation diagnostics
//!
//! Non-fatal findings recorded while a document is translated. None of them
//! stops the run: the affected line degrades (usually passes through
//! unchanged) and a [`Diagnostic`] is returned alongside the output text.
//!
//! ## Code Format
//!
//! `P2Cxxx`, grouped by category:
//! - 001-019: Pattern errors (a rule matched a line but not its parts)
//! - 020-039: Structure errors (block and class bookkeeping)
//! - 040-059: Entry point errors (deferred `__main__` section)

use std::fmt;

//=============================================================================
// CATEGORIES
//=============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// P2C001-019
    Pattern,
    /// P2C020-039
    Structure,
    /// P2C040-059
    EntryPoint,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Pattern => write!(f, "pattern"),
            DiagnosticCategory::Structure => write!(f, "structure"),
            DiagnosticCategory::EntryPoint => write!(f, "entry-point"),
        }
    }
}

//=============================================================================
// KINDS
//=============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A rule recognized the line but could not extract its parts.
    PatternMismatch,
    /// `super().__init__` seen with fewer than two declared classes.
    UndefinedBaseClassReference,
    /// End of input reached with a block that never got a body.
    UnterminatedScope,
    /// `elif` / `else` / `except` without an open block at its level.
    OrphanContinuation,
    /// Top-level statement after the entry guard.
    DiscardedAfterEntryGuard,
    /// Block opener inside the entry guard, whose nesting is flattened.
    FlattenedEntryBlock,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::PatternMismatch => "P2C001",
            DiagnosticKind::UndefinedBaseClassReference => "P2C002",
            DiagnosticKind::UnterminatedScope => "P2C020",
            DiagnosticKind::OrphanContinuation => "P2C021",
            DiagnosticKind::DiscardedAfterEntryGuard => "P2C040",
            DiagnosticKind::FlattenedEntryBlock => "P2C041",
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            DiagnosticKind::PatternMismatch | DiagnosticKind::UndefinedBaseClassReference => {
                DiagnosticCategory::Pattern
            }
            DiagnosticKind::UnterminatedScope | DiagnosticKind::OrphanContinuation => {
                DiagnosticCategory::Structure
            }
            DiagnosticKind::DiscardedAfterEntryGuard | DiagnosticKind::FlattenedEntryBlock => {
                DiagnosticCategory::EntryPoint
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::PatternMismatch => "pattern mismatch",
            DiagnosticKind::UndefinedBaseClassReference => "undefined base class reference",
            DiagnosticKind::UnterminatedScope => "unterminated scope",
            DiagnosticKind::OrphanContinuation => "orphan block continuation",
            DiagnosticKind::DiscardedAfterEntryGuard => "statement discarded after entry guard",
            DiagnosticKind::FlattenedEntryBlock => "block flattened in entry function",
        }
    }
}

//=============================================================================
// DIAGNOSTIC
//=============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warning[{}]: line {}: {}: {}",
            self.kind.code(),
            self.line,
            self.kind.title(),
            self.message
        )
    }
}

/// Render diagnostics one per line.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let d = Diagnostic::new(7, DiagnosticKind::PatternMismatch, "class header `class :`");
        assert_eq!(
            d.to_string(),
            "warning[P2C001]: line 7: pattern mismatch: class header `class :`"
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            DiagnosticKind::PatternMismatch,
            DiagnosticKind::UndefinedBaseClassReference,
            DiagnosticKind::UnterminatedScope,
            DiagnosticKind::OrphanContinuation,
            DiagnosticKind::DiscardedAfterEntryGuard,
            DiagnosticKind::FlattenedEntryBlock,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            DiagnosticKind::UndefinedBaseClassReference.category(),
            DiagnosticCategory::Pattern
        );
        assert_eq!(DiagnosticKind::FlattenedEntryBlock.category().to_string(), "entry-point");
    }
}
