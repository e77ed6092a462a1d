//! First pass analysis
//!
//! Scans every line once before translation and records the names of
//! declared functions and classes. The second pass consults the table for
//! type lookups and to decide whether an empty entry function is needed.

use std::sync::LazyLock;

use regex::Regex;

static DEF_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*def\s+(\w+)").unwrap());
static CLASS_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*class\s+(\w+)").unwrap());

/// Declared names in declaration order, each recorded once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    functions: Vec<String>,
    classes: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_function(&mut self, name: &str) {
        if !self.functions.iter().any(|f| f == name) {
            self.functions.push(name.to_string());
        }
    }

    pub fn register_class(&mut self, name: &str) {
        if !self.classes.iter().any(|c| c == name) {
            self.classes.push(name.to_string());
        }
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn has_declarations(&self) -> bool {
        !self.functions.is_empty() || !self.classes.is_empty()
    }
}

/// Run the first pass analysis over source lines
pub fn run_first_pass(lines: &[&str]) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    for line in lines {
        if let Some(caps) = DEF_NAME.captures(line) {
            symbols.register_function(&caps[1]);
        } else if let Some(caps) = CLASS_NAME.captures(line) {
            symbols.register_class(&caps[1]);
        }
    }
    symbols
}
