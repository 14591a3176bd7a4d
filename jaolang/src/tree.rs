// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::Statement;

/// The parsed form of a whole script, an implicit top-level block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseTree {
    statements: Vec<Statement>,
}

impl ParseTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
