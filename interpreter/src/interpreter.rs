// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use jaolang::{
    AssignmentExpression,
    BiExpression,
    BiOperator,
    Expression,
    FileRange,
    ForStatement,
    IfStatement,
    ParseTree,
    PrimaryExpression,
    PrintStatement,
    Ranged,
    RepeatStatement,
    ScanStatement,
    Statement,
    StatementKind,
    UnaryExpression,
    UnaryExpressionKind,
    WhenStatement,
};

use crate::{Console, Environment, RuntimeError, TypeError, Value};

/// Walks the tree depth-first, mutating a single flat [`Environment`].
/// The first error aborts the run; output produced before it stays.
pub struct Interpreter<C: Console> {
    environment: Environment,
    console: C,
}

impl<C: Console> Interpreter<C> {
    pub fn new(console: C) -> Self {
        Self {
            environment: Environment::new(),
            console,
        }
    }

    pub fn execute_tree(&mut self, tree: &ParseTree) -> Result<(), RuntimeError> {
        log::debug!("Executing {} top-level statement(s)", tree.statements().len());

        self.execute_body(tree.statements())
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    #[must_use]
    pub fn into_console(self) -> C {
        self.console
    }

    fn execute_body(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute_statement(statement)?;
        }

        Ok(())
    }

    fn execute_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match &statement.kind {
            StatementKind::Block(statements) => self.execute_body(statements),

            StatementKind::Expression(expression) => {
                self.execute_expression(expression)?;
                Ok(())
            }

            StatementKind::For(statement) => self.execute_for_statement(statement),
            StatementKind::If(statement) => self.execute_if_statement(statement),
            StatementKind::Print(statement) => self.execute_print_statement(statement),
            StatementKind::Repeat(statement) => self.execute_repeat_statement(statement),
            StatementKind::Scan(statement) => self.execute_scan_statement(statement),
            StatementKind::When(statement) => self.execute_when_statement(statement),
        }
    }

    fn execute_print_statement(&mut self, statement: &PrintStatement) -> Result<(), RuntimeError> {
        let value = self.execute_expression(&statement.expression)?;
        self.console.write_line(&value.to_string());

        Ok(())
    }

    /// The line is parsed as an integer when the target variable
    /// currently holds one, otherwise it is bound verbatim as a string.
    fn execute_scan_statement(&mut self, statement: &ScanStatement) -> Result<(), RuntimeError> {
        let Some(line) = self.console.read_line() else {
            return Err(RuntimeError::InputExhausted {
                range: statement.name.range(),
            });
        };

        let value = match self.environment.get(statement.name.value()) {
            Some(Value::Integer(..)) => match line.trim().parse() {
                Ok(int) => Value::Integer(int),
                Err(..) => {
                    return Err(RuntimeError::InvalidInput {
                        name: statement.name.value().clone(),
                        line,
                        range: statement.name.range(),
                    });
                }
            },

            _ => Value::String(line),
        };

        self.environment.set(statement.name.value().clone(), value);
        Ok(())
    }

    fn execute_if_statement(&mut self, statement: &IfStatement) -> Result<(), RuntimeError> {
        if self.evaluate_condition(&statement.condition)? {
            return self.execute_body(&statement.then_body);
        }

        if let Some(else_body) = &statement.else_body {
            return self.execute_body(else_body);
        }

        Ok(())
    }

    fn execute_when_statement(&mut self, statement: &WhenStatement) -> Result<(), RuntimeError> {
        if self.evaluate_condition(&statement.condition)? {
            self.execute_body(&statement.body)?;
        }

        Ok(())
    }

    fn execute_for_statement(&mut self, statement: &ForStatement) -> Result<(), RuntimeError> {
        if let Some(initializer) = &statement.initializer {
            self.execute_expression(initializer)?;
        }

        loop {
            if let Some(condition) = &statement.condition {
                if !self.evaluate_condition(condition)? {
                    break;
                }
            }

            self.execute_body(&statement.body)?;

            if let Some(step) = &statement.step {
                self.execute_expression(step)?;
            }
        }

        Ok(())
    }

    /// The count is evaluated once, up front. A negative count runs the
    /// body zero times.
    fn execute_repeat_statement(&mut self, statement: &RepeatStatement) -> Result<(), RuntimeError> {
        let count = self.execute_expression(&statement.count)?;

        let Value::Integer(count) = count else {
            return Err(TypeError::RepeatCountNotInteger {
                actual: count.type_name(),
                range: statement.count.range(),
            }
            .into());
        };

        for _ in 0..count.max(0) {
            self.execute_body(&statement.body)?;
        }

        Ok(())
    }

    fn evaluate_condition(&mut self, condition: &Ranged<Expression>) -> Result<bool, RuntimeError> {
        match self.execute_expression(condition)? {
            Value::Bool(value) => Ok(value),

            other => Err(TypeError::ConditionNotBoolean {
                actual: other.type_name(),
                range: condition.range(),
            }
            .into()),
        }
    }

    fn execute_expression(&mut self, expression: &Ranged<Expression>) -> Result<Value, RuntimeError> {
        match expression.value() {
            Expression::Assignment(assignment) => self.execute_assignment_expression(assignment),
            Expression::Bi(bi) => self.execute_bi_expression(bi),
            Expression::Primary(primary) => self.execute_primary_expression(primary),
            Expression::Unary(unary) => self.execute_unary_expression(unary),
        }
    }

    fn execute_assignment_expression(
        &mut self,
        expression: &AssignmentExpression,
    ) -> Result<Value, RuntimeError> {
        let value = self.execute_expression(&expression.value)?;
        self.environment.set(expression.name.value().clone(), value.clone());

        Ok(value)
    }

    fn execute_primary_expression(
        &mut self,
        expression: &PrimaryExpression,
    ) -> Result<Value, RuntimeError> {
        match expression {
            PrimaryExpression::Boolean(value) => Ok(Value::Bool(*value)),
            PrimaryExpression::IntegerLiteral(value) => Ok(Value::Integer(*value)),
            PrimaryExpression::StringLiteral(value) => Ok(Value::String(value.clone())),

            PrimaryExpression::Reference(reference) => {
                match self.environment.get(reference.value()) {
                    Some(value) => Ok(value.clone()),
                    None => Err(RuntimeError::UndefinedVariable {
                        name: reference.value().clone(),
                        range: reference.range(),
                    }),
                }
            }

            PrimaryExpression::Parenthesized(expression) => self.execute_expression(expression),
        }
    }

    fn execute_unary_expression(
        &mut self,
        expression: &UnaryExpression,
    ) -> Result<Value, RuntimeError> {
        let operand = self.execute_expression(&expression.operand)?;

        match expression.kind.value() {
            UnaryExpressionKind::Negate => match operand {
                Value::Integer(int) => Ok(Value::Integer(int.wrapping_neg())),

                other => Err(TypeError::InvalidUnaryOperand {
                    actual: other.type_name(),
                    range: expression.operand.range(),
                }
                .into()),
            },
        }
    }

    fn execute_bi_expression(&mut self, expression: &BiExpression) -> Result<Value, RuntimeError> {
        let operator = *expression.operator.value();

        if matches!(operator, BiOperator::LogicalAnd | BiOperator::LogicalOr) {
            return self.execute_logical_expression(expression);
        }

        let lhs = self.execute_expression(&expression.lhs)?;
        let rhs = self.execute_expression(&expression.rhs)?;

        match operator {
            BiOperator::Add => match (lhs, rhs) {
                (Value::Integer(lhs), Value::Integer(rhs)) => {
                    Ok(Value::Integer(lhs.wrapping_add(rhs)))
                }
                (Value::String(lhs), Value::String(rhs)) => Ok(Value::String(lhs + &rhs)),
                (lhs, rhs) => Err(invalid_operands(expression, &lhs, &rhs)),
            },

            BiOperator::Subtract => {
                execute_bi_expression_numeric(expression, lhs, rhs, |a, b| a.wrapping_sub(b))
            }
            BiOperator::Multiply => {
                execute_bi_expression_numeric(expression, lhs, rhs, |a, b| a.wrapping_mul(b))
            }

            BiOperator::Divide => match (lhs, rhs) {
                (Value::Integer(..), Value::Integer(0)) => Err(RuntimeError::DivisionByZero {
                    range: expression.rhs.range(),
                }),
                (Value::Integer(lhs), Value::Integer(rhs)) => {
                    Ok(Value::Integer(lhs.wrapping_div(rhs)))
                }
                (lhs, rhs) => Err(invalid_operands(expression, &lhs, &rhs)),
            },

            BiOperator::Comparison(comparison) => match lhs.compare(&rhs, comparison) {
                Some(result) => Ok(Value::Bool(result)),
                None => Err(invalid_operands(expression, &lhs, &rhs)),
            },

            BiOperator::LogicalAnd | BiOperator::LogicalOr => unreachable!(),
        }
    }

    /// `&&` and `||` only evaluate their right side when the left side
    /// does not already decide the outcome.
    fn execute_logical_expression(
        &mut self,
        expression: &BiExpression,
    ) -> Result<Value, RuntimeError> {
        let operator = *expression.operator.value();

        let lhs = self.execute_expression(&expression.lhs)?;
        let Value::Bool(lhs) = lhs else {
            return Err(TypeError::LogicalOperandNotBoolean {
                operator,
                actual: lhs.type_name(),
                range: expression.lhs.range(),
            }
            .into());
        };

        let decided = match operator {
            BiOperator::LogicalAnd => !lhs,
            BiOperator::LogicalOr => lhs,
            _ => unreachable!(),
        };

        if decided {
            return Ok(Value::Bool(lhs));
        }

        let rhs = self.execute_expression(&expression.rhs)?;
        let Value::Bool(rhs) = rhs else {
            return Err(TypeError::LogicalOperandNotBoolean {
                operator,
                actual: rhs.type_name(),
                range: expression.rhs.range(),
            }
            .into());
        };

        Ok(Value::Bool(rhs))
    }
}

fn execute_bi_expression_numeric(
    expression: &BiExpression,
    lhs: Value,
    rhs: Value,
    f: impl FnOnce(i64, i64) -> i64,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Integer(f(lhs, rhs))),
        (lhs, rhs) => Err(invalid_operands(expression, &lhs, &rhs)),
    }
}

fn invalid_operands(expression: &BiExpression, lhs: &Value, rhs: &Value) -> RuntimeError {
    TypeError::InvalidOperands {
        operator: *expression.operator.value(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
        range: FileRange::new(expression.lhs.range().start(), expression.rhs.range().end()),
    }
    .into()
}
