//! Output emitter
//!
//! Writes translated lines prefixed with indentation proportional to the
//! current emission level. The emission level follows the emitted braces,
//! not the source indentation; the two drift apart whenever a rewrite adds
//! or removes nesting.

use crate::lowering::depth_tracking_lowering::indentation;

#[derive(Debug, Clone, Default)]
pub struct Emitter {
    lines: Vec<String>,
    level: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_is_blank(&self) -> bool {
        self.lines.last().is_some_and(|l| l.is_empty())
    }

    /// Emit `text` at the current level.
    pub fn line(&mut self, text: &str) {
        self.lines.push(format!("{}{}", indentation(self.level), text));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Enter a block opened by the previous line.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Leave a block without writing its closer.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Leave a block and write its closer at the outer level.
    pub fn close(&mut self, closer: &str) {
        self.dedent();
        self.line(closer);
    }

    pub fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_braces() {
        let mut e = Emitter::new();
        e.line("auto f() {");
        e.indent();
        e.line("return 1;");
        e.close("}");
        assert_eq!(e.finish(), "auto f() {\n    return 1;\n}\n");
    }

    #[test]
    fn test_blank_lines_have_no_indent() {
        let mut e = Emitter::new();
        e.indent();
        e.blank();
        assert!(e.last_is_blank());
        assert_eq!(e.finish(), "\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut e = Emitter::new();
        e.dedent();
        assert_eq!(e.level(), 0);
    }
}
