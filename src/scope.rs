//! Block scope stack
//!
//! Mirrors the nesting of the emitted C++ document:
//! - A frame is pushed when a rewritten line ends in `{`
//! - Frames are popped when the source indentation returns to or below the
//!   level the frame was opened at
//! - Frames are kept in strictly increasing level order, since pushing at a
//!   level first pops everything opened at or below it

use std::fmt;

/// What opened a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Function,
    Method,
    Class,
    Conditional,
    Loop,
    ExceptionTry,
    ExceptionHandler,
    /// A line that ended in `{` without being a recognized construct.
    Block,
}

impl FrameKind {
    /// Closing marker emitted when the frame is popped.
    pub fn closer(self) -> &'static str {
        match self {
            FrameKind::Class => "};",
            _ => "}",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FrameKind::Function => "function",
            FrameKind::Method => "method",
            FrameKind::Class => "class",
            FrameKind::Conditional => "conditional",
            FrameKind::Loop => "loop",
            FrameKind::ExceptionTry => "try",
            FrameKind::ExceptionHandler => "handler",
            FrameKind::Block => "block",
        };
        write!(f, "{}", label)
    }
}

/// One open block and the source indent level it was opened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub kind: FrameKind,
    pub level: usize,
    /// Declared name for class frames.
    pub name: Option<String>,
    /// Line that opened the frame.
    pub line: usize,
    /// Set once a deeper line has been seen inside the block.
    pub has_body: bool,
}

impl ScopeFrame {
    pub fn new(kind: FrameKind, level: usize, line: usize) -> Self {
        Self {
            kind,
            level,
            name: None,
            line,
            has_body: false,
        }
    }

    pub fn named(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    pub fn top(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pop every frame opened at or deeper than `level`, innermost first.
    pub fn pop_to(&mut self, level: usize) -> Vec<ScopeFrame> {
        let keep = self
            .frames
            .iter()
            .position(|f| f.level >= level)
            .unwrap_or(self.frames.len());
        let mut popped = self.frames.split_off(keep);
        popped.reverse();
        popped
    }

    /// Record that a line at `level` sits inside the innermost frame.
    pub fn mark_body(&mut self, level: usize) {
        if let Some(top) = self.frames.last_mut() {
            if level > top.level {
                top.has_body = true;
            }
        }
    }

    /// Name of the class whose body is currently open, if it is the
    /// innermost frame.
    pub fn open_class(&self) -> Option<&str> {
        self.top()
            .filter(|f| f.kind == FrameKind::Class)
            .and_then(|f| f.name.as_deref())
    }

    pub fn contains(&self, kind: FrameKind) -> bool {
        self.frames.iter().any(|f| f.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(levels: &[(FrameKind, usize)]) -> ScopeStack {
        let mut s = ScopeStack::new();
        for (kind, level) in levels {
            s.push(ScopeFrame::new(*kind, *level, 1));
        }
        s
    }

    #[test]
    fn test_pop_to_returns_innermost_first() {
        let mut s = stack(&[
            (FrameKind::Function, 0),
            (FrameKind::Loop, 1),
            (FrameKind::Conditional, 2),
        ]);
        let popped = s.pop_to(1);
        let kinds: Vec<FrameKind> = popped.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FrameKind::Conditional, FrameKind::Loop]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_pop_to_deeper_level_pops_nothing() {
        let mut s = stack(&[(FrameKind::Function, 0)]);
        assert!(s.pop_to(1).is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_mark_body_only_for_deeper_lines() {
        let mut s = stack(&[(FrameKind::Function, 0)]);
        s.mark_body(0);
        assert!(!s.top().unwrap().has_body);
        s.mark_body(1);
        assert!(s.top().unwrap().has_body);
    }

    #[test]
    fn test_open_class() {
        let mut s = ScopeStack::new();
        s.push(ScopeFrame::new(FrameKind::Class, 0, 1).named(Some("Dog".to_string())));
        assert_eq!(s.open_class(), Some("Dog"));
        s.push(ScopeFrame::new(FrameKind::Method, 1, 2));
        assert_eq!(s.open_class(), None);
    }

    #[test]
    fn test_class_closer_is_terminated() {
        assert_eq!(FrameKind::Class.closer(), "};");
        assert_eq!(FrameKind::Loop.closer(), "}");
    }
}
