//! Output sink: the ordered statements of the translated program.

use std::fmt;

/// Append-only statement buffer for one conversion session.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    statements: Vec<String>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_program(self) -> Program {
        Program {
            statements: self.statements,
        }
    }
}

/// A finished translated program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<String>,
}

impl Program {
    /// Statements newline-joined, without a trailing newline.
    pub fn text(&self) -> String {
        self.statements.join("\n")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
