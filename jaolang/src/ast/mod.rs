// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod expression;
mod statement;

pub use self::{
    expression::{
        AssignmentExpression,
        BiExpression,
        BiOperator,
        Comparison,
        Expression,
        PrimaryExpression,
        UnaryExpression,
        UnaryExpressionKind,
    },
    statement::{
        ForStatement,
        IfStatement,
        PrintStatement,
        RepeatStatement,
        ScanStatement,
        Statement,
        StatementKind,
        WhenStatement,
    },
};
