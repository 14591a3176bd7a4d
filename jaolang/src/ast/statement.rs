// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{FileRange, Ranged};

use super::Expression;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub range: FileRange,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Block(Vec<Statement>),
    Expression(Ranged<Expression>),
    For(ForStatement),
    If(IfStatement),
    Print(PrintStatement),
    Repeat(RepeatStatement),
    Scan(ScanStatement),
    When(WhenStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub expression: Ranged<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanStatement {
    pub name: Ranged<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Ranged<Expression>,
    pub then_body: Vec<Statement>,
    pub else_body: Option<Vec<Statement>>,
}

/// A C-style loop. All three header slots may be left empty; an empty
/// condition counts as true.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub initializer: Option<Ranged<Expression>>,
    pub condition: Option<Ranged<Expression>>,
    pub step: Option<Ranged<Expression>>,
    pub body: Vec<Statement>,
}

/// Runs the body a fixed number of times. The count is evaluated once,
/// before the first iteration; a negative count means zero iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub count: Ranged<Expression>,
    pub body: Vec<Statement>,
}

/// A guarded block: the body runs once if the condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenStatement {
    pub condition: Ranged<Expression>,
    pub body: Vec<Statement>,
}
