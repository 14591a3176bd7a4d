// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use thiserror::Error;

use crate::{
    ast::{
        AssignmentExpression,
        BiExpression,
        BiOperator,
        Comparison,
        Expression,
        ForStatement,
        IfStatement,
        PrimaryExpression,
        PrintStatement,
        RepeatStatement,
        ScanStatement,
        Statement,
        StatementKind,
        UnaryExpression,
        UnaryExpressionKind,
        WhenStatement,
    },
    FileLocation,
    FileRange,
    Keyword,
    ParseTree,
    Punctuator,
    Ranged,
    Token,
    TokenKind,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// One-token-lookahead recursive descent. Stops at the first
/// unexpected token.
pub struct Parser<'tokens> {
    tokens: &'tokens [Token],
    cursor: usize,
    token_end: FileLocation,
}

impl<'tokens> Parser<'tokens> {
    pub fn new(tokens: &'tokens [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            token_end: FileLocation::default(),
        }
    }

    pub fn parse_tree(&mut self) -> ParseResult<ParseTree> {
        let mut tree = ParseTree::new();

        while !self.is_at_end() {
            tree.push(self.parse_statement()?);
        }

        log::debug!("Parsed {} top-level statement(s)", tree.statements().len());

        Ok(tree)
    }

    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let begin = self.peek_token()?.begin;
        let peeked = self.peek_token()?.kind.clone();

        let kind = match peeked {
            TokenKind::Keyword(Keyword::Print) => self.parse_print_statement()?,
            TokenKind::Keyword(Keyword::Scan) => self.parse_scan_statement()?,
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement()?,
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement()?,
            TokenKind::Keyword(Keyword::Repeat) => self.parse_repeat_statement()?,
            TokenKind::Keyword(Keyword::When) => self.parse_when_statement()?,

            TokenKind::Punctuator(Punctuator::LeftCurlyBracket) => {
                StatementKind::Block(self.parse_block("block statement")?)
            }

            TokenKind::Illegal(..) => {
                return Err(ParseError::IllegalToken {
                    token: self.consume_token()?,
                });
            }

            _ => {
                let expression = self.parse_expression()?;
                self.consume_semicolon_if_present();
                StatementKind::Expression(expression)
            }
        };

        Ok(Statement {
            range: FileRange::new(begin, self.token_end),
            kind,
        })
    }

    fn parse_print_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;
        self.expect_left_parenthesis("print statement")?;

        let expression = self.parse_expression()?;

        self.expect_right_parenthesis("print statement")?;
        self.consume_semicolon_if_present();

        Ok(StatementKind::Print(PrintStatement { expression }))
    }

    fn parse_scan_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;

        let name = self.consume_identifier("scan target")?;
        self.consume_semicolon_if_present();

        Ok(StatementKind::Scan(ScanStatement { name }))
    }

    fn parse_if_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;
        self.expect_left_parenthesis("if statement")?;

        let condition = self.parse_expression()?;

        self.expect_right_parenthesis("if statement")?;

        let then_body = self.parse_block("if statement")?;

        let mut else_body = None;
        if self.peek_keyword() == Some(Keyword::Else) {
            self.consume_token()?;
            else_body = Some(self.parse_block("else branch")?);
        }

        Ok(StatementKind::If(IfStatement {
            condition,
            then_body,
            else_body,
        }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;
        self.expect_left_parenthesis("for statement")?;

        let initializer = self.parse_for_header_slot(Punctuator::Semicolon)?;
        self.expect_semicolon("for statement header")?;

        let condition = self.parse_for_header_slot(Punctuator::Semicolon)?;
        self.expect_semicolon("for statement header")?;

        let step = self.parse_for_header_slot(Punctuator::RightParenthesis)?;
        self.expect_right_parenthesis("for statement")?;

        let body = self.parse_block("for statement")?;

        Ok(StatementKind::For(ForStatement {
            initializer,
            condition,
            step,
            body,
        }))
    }

    fn parse_for_header_slot(
        &mut self,
        terminator: Punctuator,
    ) -> ParseResult<Option<Ranged<Expression>>> {
        if self.peek_punctuator() == Some(terminator) {
            return Ok(None);
        }

        Ok(Some(self.parse_expression()?))
    }

    fn parse_repeat_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;
        self.expect_left_parenthesis("repeat statement")?;

        let count = self.parse_expression()?;

        self.expect_right_parenthesis("repeat statement")?;

        let body = self.parse_block("repeat statement")?;

        Ok(StatementKind::Repeat(RepeatStatement { count, body }))
    }

    fn parse_when_statement(&mut self) -> ParseResult<StatementKind> {
        self.consume_token()?;
        self.expect_left_parenthesis("when statement")?;

        let condition = self.parse_expression()?;

        self.expect_right_parenthesis("when statement")?;

        let body = self.parse_block("when statement")?;

        Ok(StatementKind::When(WhenStatement { condition, body }))
    }

    fn parse_block(&mut self, context: &'static str) -> ParseResult<Vec<Statement>> {
        self.expect_left_curly_bracket(context)?;

        let mut statements = Vec::new();
        loop {
            if self.peek_punctuator() == Some(Punctuator::RightCurlyBracket) {
                self.consume_token()?;
                break;
            }

            if self.is_at_end() {
                return Err(ParseError::EndOfFile);
            }

            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    pub fn parse_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_assignment_expression()
    }

    /// Assignment is right-associative and only legal when the left
    /// side is a bare identifier.
    fn parse_assignment_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        let lhs = self.parse_logical_or_expression()?;

        if self.peek_punctuator() != Some(Punctuator::Assignment) {
            return Ok(lhs);
        }

        self.consume_token()?;

        let Some(name) = lhs.value().as_identifier() else {
            return Err(ParseError::InvalidAssignmentTarget { range: lhs.range() });
        };
        let name = Ranged::new(lhs.range(), name.to_string());

        let value = self.parse_assignment_expression()?;
        let range = FileRange::new(lhs.range().start(), value.range().end());

        Ok(Ranged::new(
            range,
            Expression::Assignment(AssignmentExpression {
                name,
                value: Box::new(value),
            }),
        ))
    }

    fn parse_logical_or_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_logical_and_expression,
            &[(Punctuator::LogicalOr, BiOperator::LogicalOr)],
        )
    }

    fn parse_logical_and_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_equality_expression,
            &[(Punctuator::LogicalAnd, BiOperator::LogicalAnd)],
        )
    }

    fn parse_equality_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_relational_expression,
            &[(Punctuator::Equals, BiOperator::Comparison(Comparison::Equality))],
        )
    }

    fn parse_relational_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_additive_expression,
            &[
                (Punctuator::LessThan, BiOperator::Comparison(Comparison::LessThan)),
                (Punctuator::GreaterThan, BiOperator::Comparison(Comparison::GreaterThan)),
            ],
        )
    }

    fn parse_additive_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_multiplicative_expression,
            &[
                (Punctuator::PlusSign, BiOperator::Add),
                (Punctuator::HyphenMinus, BiOperator::Subtract),
            ],
        )
    }

    fn parse_multiplicative_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        self.parse_bi_expression(
            Self::parse_unary_expression,
            &[
                (Punctuator::Asterisk, BiOperator::Multiply),
                (Punctuator::Solidus, BiOperator::Divide),
            ],
        )
    }

    fn parse_bi_expression(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Ranged<Expression>>,
        operators: &[(Punctuator, BiOperator)],
    ) -> ParseResult<Ranged<Expression>> {
        let mut expression = operand(self)?;

        loop {
            let Some(punctuator) = self.peek_punctuator() else {
                break;
            };

            let Some(&(_, operator)) = operators.iter().find(|(x, _)| *x == punctuator) else {
                break;
            };

            let operator_range = self.peek_token()?.range();
            self.consume_token()?;

            let rhs = operand(self)?;
            let range = FileRange::new(expression.range().start(), rhs.range().end());

            expression = Ranged::new(
                range,
                Expression::Bi(BiExpression {
                    operator: Ranged::new(operator_range, operator),
                    lhs: Box::new(expression),
                    rhs: Box::new(rhs),
                }),
            );
        }

        Ok(expression)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        if self.peek_punctuator() != Some(Punctuator::HyphenMinus) {
            return self.parse_primary_expression();
        }

        let token = self.consume_token()?;
        let operand = self.parse_unary_expression()?;
        let range = FileRange::new(token.begin, operand.range().end());

        Ok(Ranged::new(
            range,
            Expression::Unary(UnaryExpression {
                kind: Ranged::new(token.range(), UnaryExpressionKind::Negate),
                operand: Box::new(operand),
            }),
        ))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Ranged<Expression>> {
        let token = self.consume_token()?;
        let range = token.range();

        let primary = match token.kind {
            TokenKind::Keyword(Keyword::True) => PrimaryExpression::Boolean(true),
            TokenKind::Keyword(Keyword::False) => PrimaryExpression::Boolean(false),

            TokenKind::Integer(integer) => PrimaryExpression::IntegerLiteral(integer),
            TokenKind::StringLiteral(str) => PrimaryExpression::StringLiteral(str),
            TokenKind::Identifier(ident) => {
                PrimaryExpression::Reference(Ranged::new(range, ident))
            }

            TokenKind::Punctuator(Punctuator::LeftParenthesis) => {
                let expression = self.parse_expression()?;
                self.expect_right_parenthesis("parenthesized expression")?;

                let range = FileRange::new(range.start(), self.token_end);
                return Ok(Ranged::new(
                    range,
                    Expression::Primary(PrimaryExpression::Parenthesized(Box::new(expression))),
                ));
            }

            TokenKind::Illegal(..) => return Err(ParseError::IllegalToken { token }),

            _ => {
                return Err(ParseError::UnexpectedToken {
                    token,
                    expected: "an expression",
                });
            }
        };

        Ok(Ranged::new(range, Expression::Primary(primary)))
    }

    fn is_at_end(&self) -> bool {
        matches!(
            self.tokens.get(self.cursor).map(|token| &token.kind),
            None | Some(TokenKind::EndOfFile)
        )
    }

    fn peek_token(&self) -> ParseResult<&Token> {
        self.tokens.get(self.cursor).ok_or(ParseError::EndOfFile)
    }

    fn peek_punctuator(&self) -> Option<Punctuator> {
        match self.peek_token().ok()?.kind {
            TokenKind::Punctuator(punctuator) => Some(punctuator),
            _ => None,
        }
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        match self.peek_token().ok()?.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    fn consume_token(&mut self) -> ParseResult<Token> {
        let token = self.peek_token()?.clone();

        self.token_end = token.end;
        self.cursor += 1;

        Ok(token)
    }

    fn consume_semicolon_if_present(&mut self) {
        if self.peek_punctuator() == Some(Punctuator::Semicolon) {
            _ = self.consume_token();
        }
    }

    fn consume_identifier(&mut self, expected: &'static str) -> ParseResult<Ranged<String>> {
        let token = self.consume_token()?;

        match token.as_identifier() {
            Some(identifier) => Ok(identifier),
            None => Err(ParseError::ExpectedIdentifier { token, expected }),
        }
    }

    fn expect_left_parenthesis(&mut self, context: &'static str) -> ParseResult<()> {
        let token = self.consume_token()?;

        if token.kind != TokenKind::Punctuator(Punctuator::LeftParenthesis) {
            return Err(ParseError::ExpectedLeftParenthesis { token, context });
        }

        Ok(())
    }

    fn expect_right_parenthesis(&mut self, context: &'static str) -> ParseResult<()> {
        let token = self.consume_token()?;

        if token.kind != TokenKind::Punctuator(Punctuator::RightParenthesis) {
            return Err(ParseError::ExpectedRightParenthesis { token, context });
        }

        Ok(())
    }

    fn expect_left_curly_bracket(&mut self, context: &'static str) -> ParseResult<()> {
        let token = self.consume_token()?;

        if token.kind != TokenKind::Punctuator(Punctuator::LeftCurlyBracket) {
            return Err(ParseError::ExpectedLeftCurlyBracket { token, context });
        }

        Ok(())
    }

    fn expect_semicolon(&mut self, context: &'static str) -> ParseResult<()> {
        let token = self.consume_token()?;

        if token.kind != TokenKind::Punctuator(Punctuator::Semicolon) {
            return Err(ParseError::ExpectedSemicolon { token, context });
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of file")]
    EndOfFile,

    #[error("expected `(` after {context}, but got: {token}")]
    ExpectedLeftParenthesis { token: Token, context: &'static str },

    #[error("expected `)` to close {context}, but got: {token}")]
    ExpectedRightParenthesis { token: Token, context: &'static str },

    #[error("expected `{{` to open {context}, but got: {token}")]
    ExpectedLeftCurlyBracket { token: Token, context: &'static str },

    #[error("expected `;` in {context}, but got: {token}")]
    ExpectedSemicolon { token: Token, context: &'static str },

    #[error("expected {expected}, but got: {token}")]
    ExpectedIdentifier { token: Token, expected: &'static str },

    #[error("only a variable name can be assigned to")]
    InvalidAssignmentTarget { range: FileRange },

    #[error("illegal token: {token}")]
    IllegalToken { token: Token },

    #[error("unexpected token `{token}`, expected {expected}")]
    UnexpectedToken { token: Token, expected: &'static str },
}

impl ParseError {
    pub fn range(&self) -> Option<FileRange> {
        match self {
            Self::EndOfFile => None,

            Self::ExpectedLeftParenthesis { token, .. } => Some(token.range()),
            Self::ExpectedRightParenthesis { token, .. } => Some(token.range()),
            Self::ExpectedLeftCurlyBracket { token, .. } => Some(token.range()),
            Self::ExpectedSemicolon { token, .. } => Some(token.range()),
            Self::ExpectedIdentifier { token, .. } => Some(token.range()),

            Self::InvalidAssignmentTarget { range } => Some(*range),

            Self::IllegalToken { token } => Some(token.range()),
            Self::UnexpectedToken { token, .. } => Some(token.range()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Lexer, SourceCode};

    use super::*;

    fn parse(input: &str) -> ParseResult<ParseTree> {
        let source_code = SourceCode::new("test.jao", input.to_string());
        let (tokens, errors) = Lexer::new(&source_code).collect_all();
        assert_eq!(errors, Vec::new());

        Parser::new(&tokens).parse_tree()
    }

    fn parse_lenient(input: &str) -> ParseResult<ParseTree> {
        let source_code = SourceCode::new("test.jao", input.to_string());
        let (tokens, _) = Lexer::new(&source_code).collect_all();

        Parser::new(&tokens).parse_tree()
    }

    fn single_expression(input: &str) -> Ranged<Expression> {
        let tree = parse(input).unwrap();
        assert_eq!(tree.statements().len(), 1);

        let StatementKind::Expression(expression) = &tree.statements()[0].kind else {
            panic!("expected an expression statement, got: {:#?}", tree.statements()[0]);
        };

        expression.clone()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expression = single_expression("1 + 2 * 3");

        let Expression::Bi(add) = expression.value() else {
            panic!("expected a binary expression, got: {expression:#?}");
        };

        assert_eq!(*add.operator.value(), BiOperator::Add);
        assert_eq!(
            *add.lhs.value(),
            Expression::Primary(PrimaryExpression::IntegerLiteral(1))
        );

        let Expression::Bi(multiply) = add.rhs.value() else {
            panic!("expected the right side to be a binary expression");
        };

        assert_eq!(*multiply.operator.value(), BiOperator::Multiply);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expression = single_expression("10 - 2 - 3");

        let Expression::Bi(outer) = expression.value() else {
            panic!("expected a binary expression, got: {expression:#?}");
        };

        assert_eq!(*outer.operator.value(), BiOperator::Subtract);
        assert!(matches!(outer.lhs.value(), Expression::Bi(..)));
        assert_eq!(
            *outer.rhs.value(),
            Expression::Primary(PrimaryExpression::IntegerLiteral(3))
        );
    }

    #[test]
    fn assignment_followed_by_print() {
        let tree = parse("x = 5 print(x)").unwrap();
        assert_eq!(tree.statements().len(), 2);

        let StatementKind::Expression(expression) = &tree.statements()[0].kind else {
            panic!("expected an expression statement");
        };
        let Expression::Assignment(assignment) = expression.value() else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.name.value(), "x");

        assert!(matches!(tree.statements()[1].kind, StatementKind::Print(..)));
    }

    #[test]
    fn assignment_is_right_associative() {
        let expression = single_expression("x = y = 1");

        let Expression::Assignment(outer) = expression.value() else {
            panic!("expected an assignment, got: {expression:#?}");
        };

        assert_eq!(outer.name.value(), "x");
        assert!(matches!(
            outer.value.value(),
            Expression::Assignment(..)
        ));
    }

    #[test]
    fn literal_is_not_an_assignment_target() {
        let error = parse("1 = 2").unwrap_err();

        assert!(matches!(error, ParseError::InvalidAssignmentTarget { .. }));
    }

    #[test]
    fn if_with_else_branch() {
        let tree = parse("if (1 < 2) { print(\"yes\") } else { print(\"no\") }").unwrap();
        assert_eq!(tree.statements().len(), 1);

        let StatementKind::If(statement) = &tree.statements()[0].kind else {
            panic!("expected an if statement");
        };

        assert_eq!(statement.then_body.len(), 1);
        assert_eq!(statement.else_body.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn for_header_slots_may_be_empty() {
        let tree = parse("for (;;) {}").unwrap();

        let StatementKind::For(statement) = &tree.statements()[0].kind else {
            panic!("expected a for statement");
        };

        assert_eq!(statement.initializer, None);
        assert_eq!(statement.condition, None);
        assert_eq!(statement.step, None);
        assert_eq!(statement.body, Vec::new());
    }

    #[test]
    fn for_with_full_header() {
        let tree = parse("for (i = 0; i < 3; i = i + 1) { print(i) }").unwrap();

        let StatementKind::For(statement) = &tree.statements()[0].kind else {
            panic!("expected a for statement");
        };

        assert!(statement.initializer.is_some());
        assert!(statement.condition.is_some());
        assert!(statement.step.is_some());
        assert_eq!(statement.body.len(), 1);
    }

    #[test]
    fn scan_binds_an_identifier() {
        let tree = parse("scan name;").unwrap();

        let StatementKind::Scan(statement) = &tree.statements()[0].kind else {
            panic!("expected a scan statement");
        };

        assert_eq!(statement.name.value(), "name");
    }

    #[rstest]
    #[case("print 1")]
    #[case("repeat 3 {}")]
    fn missing_parenthesis_is_an_error(#[case] input: &str) {
        let error = parse(input).unwrap_err();

        assert!(matches!(error, ParseError::ExpectedLeftParenthesis { .. }));
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let error = parse("when (true) { print(1)").unwrap_err();

        assert_eq!(error, ParseError::EndOfFile);
    }

    #[test]
    fn illegal_token_is_rejected() {
        let error = parse_lenient("1 $ 2").unwrap_err();

        assert!(matches!(error, ParseError::IllegalToken { .. }));
    }

    #[test]
    fn parsing_the_same_source_twice_gives_equal_trees() {
        let input = "x = 0 \
            for (i = 0; i < 3; i = i + 1) { x = x + i } \
            if (x > 1) { print(x) } else { print(\"small\") } \
            when (true) { scan x }";

        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let expression = single_expression("(1 + 2) * 3");

        let Expression::Bi(multiply) = expression.value() else {
            panic!("expected a binary expression, got: {expression:#?}");
        };

        assert_eq!(*multiply.operator.value(), BiOperator::Multiply);
        assert!(matches!(
            multiply.lhs.value(),
            Expression::Primary(PrimaryExpression::Parenthesized(..))
        ));
    }

    #[test]
    fn unary_minus_nests() {
        let expression = single_expression("--5");

        let Expression::Unary(outer) = expression.value() else {
            panic!("expected a unary expression, got: {expression:#?}");
        };

        assert_eq!(*outer.kind.value(), UnaryExpressionKind::Negate);
        assert!(matches!(outer.operand.value(), Expression::Unary(..)));
    }
}
