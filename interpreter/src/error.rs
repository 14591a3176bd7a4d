// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use colored::{Color, ColoredString, Colorize};
use jaolang::{BiOperator, FileRange, SourceCode};
use strum::AsRefStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error, AsRefStr)]
pub enum TypeError {
    #[error("operator `{operator}` cannot be applied to {lhs} and {rhs}")]
    InvalidOperands {
        operator: BiOperator,
        lhs: &'static str,
        rhs: &'static str,
        range: FileRange,
    },

    #[error("unary `-` expects an int, but got {actual}")]
    InvalidUnaryOperand {
        actual: &'static str,
        range: FileRange,
    },

    #[error("`{operator}` expects bool operands, but got {actual}")]
    LogicalOperandNotBoolean {
        operator: BiOperator,
        actual: &'static str,
        range: FileRange,
    },

    #[error("condition must be a bool, but got {actual}")]
    ConditionNotBoolean {
        actual: &'static str,
        range: FileRange,
    },

    #[error("repeat count must be an int, but got {actual}")]
    RepeatCountNotInteger {
        actual: &'static str,
        range: FileRange,
    },
}

impl TypeError {
    #[must_use]
    pub fn range(&self) -> FileRange {
        match self {
            Self::InvalidOperands { range, .. }
            | Self::InvalidUnaryOperand { range, .. }
            | Self::LogicalOperandNotBoolean { range, .. }
            | Self::ConditionNotBoolean { range, .. }
            | Self::RepeatCountNotInteger { range, .. } => *range,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error, AsRefStr)]
pub enum RuntimeError {
    #[error("division by zero")]
    DivisionByZero { range: FileRange },

    #[error("variable `{name}` is not defined")]
    UndefinedVariable { name: String, range: FileRange },

    #[error("`{name}` holds an int, but the input `{line}` is not a number")]
    InvalidInput {
        name: String,
        line: String,
        range: FileRange,
    },

    #[error("no input is available")]
    InputExhausted { range: FileRange },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl RuntimeError {
    pub fn name(&self) -> &str {
        match self {
            Self::Type(error) => error.as_ref(),
            _ => self.as_ref(),
        }
    }

    /// An extra line of advice for the error printer, where one exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UndefinedVariable { name, .. } => {
                Some(format!("assign a value to `{name}` before using it"))
            }

            Self::InvalidInput { name, .. } => {
                Some(format!("`{name}` holds an int, so the line must be a number"))
            }

            _ => None,
        }
    }

    #[must_use]
    pub fn range(&self) -> FileRange {
        match self {
            Self::DivisionByZero { range } => *range,
            Self::UndefinedVariable { range, .. } => *range,
            Self::InvalidInput { range, .. } => *range,
            Self::InputExhausted { range } => *range,
            Self::Type(error) => error.range(),
        }
    }
}

pub struct ErrorPrinter {
    source_code: SourceCode,
    range: FileRange,
    message: String,
    hint: Option<String>,

    color: Color,
    line_number: ColoredString,
}

impl ErrorPrinter {
    #[must_use = "Use the `print` method to actually print"]
    pub fn new(source_code: &SourceCode, range: FileRange, message: impl Display) -> Self {
        Self {
            source_code: source_code.clone(),
            range,
            message: message.to_string(),
            hint: None,

            color: Color::Red,
            line_number: format!("{}", range.start().line() + 1).blue().bold(),
        }
    }

    #[must_use]
    pub fn hint(self, hint: impl Into<Option<String>>) -> Self {
        Self {
            hint: hint.into(),
            ..self
        }
    }

    pub fn print(self) {
        self.print_prelude();

        self.print_lines();

        self.print_postlude();
    }

    fn print_prelude(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message.clone().bold());

        eprintln!();
    }

    fn print_lines(&self) {
        let line = self.range.start().line();
        let mut lines = self.source_code.lines().skip(line.saturating_sub(1));

        if line > 0 {
            if let Some(previous) = lines.next() {
                if !previous.trim().is_empty() {
                    self.print_line(false, previous);
                }
            }
        }

        self.print_line(true, lines.next().unwrap_or_default());
        self.print_error_indicator();

        if let Some(next) = lines.next() {
            if !next.trim().is_empty() {
                self.print_line(false, next);
            }
        }
    }

    fn print_line(&self, is_primary: bool, line: &str) {
        self.print_line_prefix(is_primary);
        eprintln!("{line}");
    }

    fn print_error_indicator(&self) {
        let spaces = " ".repeat(self.range.start().column());
        let caret = "^".color(self.color).bold();
        let tildes = "~".repeat(self.range.len().saturating_sub(1)).color(self.color);

        let hint = match &self.hint {
            Some(hint) => format!("hint: {hint}").color(self.color).bold(),
            None => "".bold(),
        };

        self.print_line_prefix(false);
        eprintln!("{spaces}{caret}{tildes} {hint}");
    }

    fn print_line_prefix(&self, is_primary: bool) {
        let separator = " | ".blue().bold();

        if is_primary {
            eprint!("{} {separator}", self.line_number);
        } else {
            eprint!("{} {separator}", " ".repeat(self.line_number.len()));
        }
    }

    fn print_postlude(&self) {
        eprintln!();

        let path = self.source_code.path().display();
        let line = self.range.start().line() + 1;
        let column = self.range.start().column() + 1;

        eprintln!("In {path}:{line}:{column}\n");
    }
}
