// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use crate::Ranged;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Assignment(AssignmentExpression),
    Bi(BiExpression),
    Primary(PrimaryExpression),
    Unary(UnaryExpression),
}

impl Expression {
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Primary(PrimaryExpression::Reference(reference)) => Some(reference.value()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryExpression {
    Boolean(bool),
    IntegerLiteral(i64),
    StringLiteral(String),
    Reference(Ranged<String>),
    Parenthesized(Box<Ranged<Expression>>),
}

/// Binds a new value to a variable, creating the variable if it does
/// not exist yet. Evaluates to the assigned value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub name: Ranged<String>,
    pub value: Box<Ranged<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiExpression {
    pub operator: Ranged<BiOperator>,
    pub lhs: Box<Ranged<Expression>>,
    pub rhs: Box<Ranged<Expression>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiOperator {
    Add,
    Subtract,
    Multiply,
    Divide,

    Comparison(Comparison),

    LogicalAnd,
    LogicalOr,
}

impl BiOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Comparison(comparison) => comparison.as_str(),
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
        }
    }
}

impl Display for BiOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equality,
    LessThan,
    GreaterThan,
}

impl Comparison {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equality => "==",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub kind: Ranged<UnaryExpressionKind>,
    pub operand: Box<Ranged<Expression>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryExpressionKind {
    Negate,
}
