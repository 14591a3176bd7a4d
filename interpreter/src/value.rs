// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use jaolang::Comparison;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl Value {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(..) => "bool",
            Self::Integer(..) => "int",
            Self::String(..) => "string",
        }
    }

    /// Compares two values of the same type. `None` means the
    /// comparison is not defined for these operands.
    #[must_use]
    pub fn compare(&self, other: &Self, comparison: Comparison) -> Option<bool> {
        match (self, other) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Some(compare_by(lhs, rhs, comparison)),
            (Self::String(lhs), Self::String(rhs)) => Some(compare_by(lhs, rhs, comparison)),

            (Self::Bool(lhs), Self::Bool(rhs)) => match comparison {
                Comparison::Equality => Some(lhs == rhs),
                _ => None,
            },

            _ => None,
        }
    }
}

fn compare_by<T: PartialOrd + ?Sized>(lhs: &T, rhs: &T, comparison: Comparison) -> bool {
    match comparison {
        Comparison::Equality => lhs == rhs,
        Comparison::LessThan => lhs < rhs,
        Comparison::GreaterThan => lhs > rhs,
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Integer(int) => int.fmt(f),
            Self::String(str) => f.write_str(str),
        }
    }
}
