// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::str::CharIndices;

use thiserror::Error;

use crate::{FileLocation, Keyword, Punctuator, SourceCode, Token, TokenKind};

pub struct Lexer<'source_code> {
    input: &'source_code str,

    chars: CharIndices<'source_code>,
    current: Option<(FileLocation, char)>,
    line: usize,
    column: usize,

    emitted_end_of_file: bool,
    errors: Vec<LexerError>,
}

impl<'source_code> Lexer<'source_code> {
    pub fn new(input: &'source_code SourceCode) -> Self {
        Self {
            input: input.contents(),
            chars: input.contents().char_indices(),
            current: None,
            line: 0,
            column: 0,
            emitted_end_of_file: false,
            errors: Vec::new(),
        }
    }

    /// Consumes the rest of the input, returning the tokens and the
    /// errors encountered along the way. The token stream always ends
    /// with an end-of-file token.
    pub fn collect_all(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = Vec::new();

        while let Some(token) = self.next() {
            tokens.push(token);
        }

        log::debug!("Lexed {} token(s), {} error(s)", tokens.len(), self.errors.len());

        (tokens, self.errors)
    }

    pub fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let Some(ch) = self.peek_char() else {
            if self.emitted_end_of_file {
                return None;
            }

            self.emitted_end_of_file = true;
            let location = self.current_location();
            return Some(Token {
                kind: TokenKind::EndOfFile,
                begin: location,
                end: location,
            });
        };

        let token = match ch {
            '"' => self.consume_string(),
            'a'..='z' | 'A'..='Z' | '_' => self.consume_identifier_or_keyword(),
            '0'..='9' => self.consume_number(),

            '(' => self.consume_single_char_token(Punctuator::LeftParenthesis),
            ')' => self.consume_single_char_token(Punctuator::RightParenthesis),
            '{' => self.consume_single_char_token(Punctuator::LeftCurlyBracket),
            '}' => self.consume_single_char_token(Punctuator::RightCurlyBracket),
            ';' => self.consume_single_char_token(Punctuator::Semicolon),
            '+' => self.consume_single_char_token(Punctuator::PlusSign),
            '-' => self.consume_single_char_token(Punctuator::HyphenMinus),
            '*' => self.consume_single_char_token(Punctuator::Asterisk),
            '/' => return self.handle_solidus(),
            '=' => self.consume_single_or_double_char_token(
                Punctuator::Assignment,
                '=',
                Punctuator::Equals,
            ),
            '<' => self.consume_single_char_token(Punctuator::LessThan),
            '>' => self.consume_single_char_token(Punctuator::GreaterThan),
            '&' => self.consume_double_char_token(Punctuator::LogicalAnd),
            '|' => self.consume_double_char_token(Punctuator::LogicalOr),

            _ => {
                let begin = self.current_location();
                self.consume_char();
                let end = self.current_location();

                self.errors.push(LexerError {
                    location: begin,
                    kind: LexerErrorKind::IllegalCharacter { character: ch },
                });

                Token {
                    kind: TokenKind::Illegal(ch.to_string()),
                    begin,
                    end,
                }
            }
        };

        Some(token)
    }

    fn consume_single_char_token(&mut self, punctuator: Punctuator) -> Token {
        let begin = self.current_location();

        self.consume_char();

        Token {
            kind: TokenKind::Punctuator(punctuator),
            begin,
            end: self.current_location(),
        }
    }

    fn consume_single_or_double_char_token(
        &mut self,
        single: Punctuator,
        second_char: char,
        double: Punctuator,
    ) -> Token {
        let begin = self.current_location();

        self.consume_char();

        let punctuator = if self.peek_char() == Some(second_char) {
            self.consume_char();
            double
        } else {
            single
        };

        Token {
            kind: TokenKind::Punctuator(punctuator),
            begin,
            end: self.current_location(),
        }
    }

    /// `&` and `|` only exist doubled. A lone occurrence is an illegal
    /// token.
    fn consume_double_char_token(&mut self, punctuator: Punctuator) -> Token {
        let begin = self.current_location();

        let first = self.peek_char();
        self.consume_char();

        if self.peek_char() == first {
            self.consume_char();

            return Token {
                kind: TokenKind::Punctuator(punctuator),
                begin,
                end: self.current_location(),
            };
        }

        let character = first.unwrap_or_default();
        self.errors.push(LexerError {
            location: begin,
            kind: LexerErrorKind::IllegalCharacter { character },
        });

        Token {
            kind: TokenKind::Illegal(character.to_string()),
            begin,
            end: self.current_location(),
        }
    }

    /// A solidus either starts a `//` comment, which runs to the end of
    /// the line, or is the division punctuator.
    fn handle_solidus(&mut self) -> Option<Token> {
        let begin = self.current_location();

        self.consume_char();

        if self.peek_char() != Some('/') {
            return Some(Token {
                kind: TokenKind::Punctuator(Punctuator::Solidus),
                begin,
                end: self.current_location(),
            });
        }

        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }

            self.consume_char();
        }

        self.next()
    }

    fn consume_string(&mut self) -> Token {
        let begin = self.current_location();

        self.consume_char();
        let content_begin = self.current_location();

        loop {
            match self.peek_char() {
                Some('"') => break,
                Some('\n') | None => {
                    self.errors.push(LexerError {
                        location: begin,
                        kind: LexerErrorKind::UnterminatedString,
                    });

                    let end = self.current_location();
                    let text = &self.input[begin.offset()..end.offset()];
                    return Token {
                        kind: TokenKind::Illegal(text.to_string()),
                        begin,
                        end,
                    };
                }
                Some(..) => self.consume_char(),
            }
        }

        let content_end = self.current_location();
        self.consume_char();

        let str = &self.input[content_begin.offset()..content_end.offset()];

        Token {
            kind: TokenKind::StringLiteral(str.to_string()),
            begin,
            end: self.current_location(),
        }
    }

    fn consume_identifier_or_keyword(&mut self) -> Token {
        let begin = self.current_location();

        while let Some(ch) = self.peek_char() {
            if !is_identifier_char(ch) {
                break;
            }

            self.consume_char();
        }

        let end = self.current_location();
        let str = &self.input[begin.offset()..end.offset()];

        let kind = match Keyword::parse(str) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(str.to_string()),
        };

        Token { kind, begin, end }
    }

    /// A digit run immediately followed by an identifier character is a
    /// single malformed token, not a number and an identifier.
    fn consume_number(&mut self) -> Token {
        let begin = self.current_location();

        while let Some(ch) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }

            self.consume_char();
        }

        if self.peek_char().is_some_and(is_identifier_char) {
            while let Some(ch) = self.peek_char() {
                if !is_identifier_char(ch) {
                    break;
                }

                self.consume_char();
            }

            let end = self.current_location();
            self.errors.push(LexerError {
                location: begin,
                kind: LexerErrorKind::InvalidNumber,
            });

            return Token {
                kind: TokenKind::Illegal(self.input[begin.offset()..end.offset()].to_string()),
                begin,
                end,
            };
        }

        let end = self.current_location();
        let str = &self.input[begin.offset()..end.offset()];

        // A digit run that does not fit an i64 is malformed.
        let Ok(integer) = str.parse() else {
            self.errors.push(LexerError {
                location: begin,
                kind: LexerErrorKind::InvalidNumber,
            });

            return Token {
                kind: TokenKind::Illegal(str.to_string()),
                begin,
                end,
            };
        };

        Token {
            kind: TokenKind::Integer(integer),
            begin,
            end,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }

            self.consume_char();
        }
    }

    fn current_location(&mut self) -> FileLocation {
        match self.peek_char_with_location() {
            Some((location, _)) => location,
            None => FileLocation::new(self.input.len(), self.line, self.column),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        Some(self.peek_char_with_location()?.1)
    }

    fn peek_char_with_location(&mut self) -> Option<(FileLocation, char)> {
        if let Some(current) = self.current {
            return Some(current);
        }

        let (offset, char) = self.chars.next()?;
        let location = FileLocation::new(offset, self.line, self.column);

        self.current = Some((location, char));
        Some((location, char))
    }

    fn consume_char(&mut self) {
        let Some((_, ch)) = self.peek_char_with_location() else {
            debug_assert!(false, "consume_char() past the end of the input");
            return;
        };

        self.current = None;

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Lexer::next(self)
    }
}

const fn is_identifier_char(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_')
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct LexerError {
    pub location: FileLocation,
    pub kind: LexerErrorKind,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum LexerErrorKind {
    #[error("string is missing its closing quote")]
    UnterminatedString,

    #[error("invalid number")]
    InvalidNumber,

    #[error("illegal character `{character}`")]
    IllegalCharacter { character: char },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lex(input: &str) -> (Vec<Token>, Vec<LexerError>) {
        let source_code = SourceCode::new("test.jao", input.to_string());
        Lexer::new(&source_code).collect_all()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = lex(input);
        assert_eq!(errors, Vec::new());
        tokens.into_iter().map(|token| token.kind).collect()
    }

    #[rstest]
    #[case("print", TokenKind::Keyword(Keyword::Print))]
    #[case("scan", TokenKind::Keyword(Keyword::Scan))]
    #[case("if", TokenKind::Keyword(Keyword::If))]
    #[case("else", TokenKind::Keyword(Keyword::Else))]
    #[case("for", TokenKind::Keyword(Keyword::For))]
    #[case("repeat", TokenKind::Keyword(Keyword::Repeat))]
    #[case("when", TokenKind::Keyword(Keyword::When))]
    #[case("true", TokenKind::Keyword(Keyword::True))]
    #[case("false", TokenKind::Keyword(Keyword::False))]
    #[case("trueish", TokenKind::Identifier("trueish".to_string()))]
    #[case("print_me", TokenKind::Identifier("print_me".to_string()))]
    #[case("_x", TokenKind::Identifier("_x".to_string()))]
    fn keywords_and_identifiers(#[case] input: &str, #[case] expected: TokenKind) {
        assert_eq!(kinds(input), vec![expected, TokenKind::EndOfFile]);
    }

    #[rstest]
    #[case("=", Punctuator::Assignment)]
    #[case("==", Punctuator::Equals)]
    #[case("&&", Punctuator::LogicalAnd)]
    #[case("||", Punctuator::LogicalOr)]
    fn greedy_punctuators(#[case] input: &str, #[case] expected: Punctuator) {
        assert_eq!(
            kinds(input),
            vec![TokenKind::Punctuator(expected), TokenKind::EndOfFile]
        );
    }

    #[test]
    fn expression_token_stream() {
        assert_eq!(
            kinds("1+2*3"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Punctuator(Punctuator::PlusSign),
                TokenKind::Integer(2),
                TokenKind::Punctuator(Punctuator::Asterisk),
                TokenKind::Integer(3),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn string_literal_with_spans() {
        let (tokens, errors) = lex("\"hoi\"");

        assert_eq!(errors, Vec::new());
        assert_eq!(
            tokens,
            vec![
                Token {
                    kind: TokenKind::StringLiteral("hoi".to_string()),
                    begin: FileLocation::new(0, 0, 0),
                    end: FileLocation::new(5, 0, 5),
                },
                Token {
                    kind: TokenKind::EndOfFile,
                    begin: FileLocation::new(5, 0, 5),
                    end: FileLocation::new(5, 0, 5),
                },
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("1 // comment with = and \"\nx"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Identifier("x".to_string()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (tokens, errors) = lex("\"abc");

        assert_eq!(
            errors,
            vec![LexerError {
                location: FileLocation::new(0, 0, 0),
                kind: LexerErrorKind::UnterminatedString,
            }]
        );
        assert_eq!(tokens[0].kind, TokenKind::Illegal("\"abc".to_string()));
    }

    #[test]
    fn malformed_number_is_a_single_illegal_token() {
        let (tokens, errors) = lex("12abc");

        assert_eq!(
            errors,
            vec![LexerError {
                location: FileLocation::new(0, 0, 0),
                kind: LexerErrorKind::InvalidNumber,
            }]
        );
        assert_eq!(
            tokens.iter().map(|token| token.kind.clone()).collect::<Vec<_>>(),
            vec![
                TokenKind::Illegal("12abc".to_string()),
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn overflowing_number_is_a_single_illegal_token() {
        let (tokens, errors) = lex("9223372036854775808");

        assert_eq!(
            errors,
            vec![LexerError {
                location: FileLocation::new(0, 0, 0),
                kind: LexerErrorKind::InvalidNumber,
            }]
        );
        assert_eq!(
            tokens[0].kind,
            TokenKind::Illegal("9223372036854775808".to_string())
        );
    }

    #[test]
    fn lone_ampersand_is_illegal() {
        let (tokens, errors) = lex("1 & 2");

        assert_eq!(
            errors,
            vec![LexerError {
                location: FileLocation::new(2, 0, 2),
                kind: LexerErrorKind::IllegalCharacter { character: '&' },
            }]
        );
        assert_eq!(tokens[1].kind, TokenKind::Illegal("&".to_string()));
    }

    #[test]
    fn end_of_file_token_has_an_empty_range() {
        let (tokens, errors) = lex("x");

        assert_eq!(errors, Vec::new());

        let token = tokens.last().unwrap();
        assert_eq!(token.kind, TokenKind::EndOfFile);
        assert!(token.range().is_empty());
    }

    #[test]
    fn locations_track_lines_and_columns() {
        let (tokens, errors) = lex("x\n  y");

        assert_eq!(errors, Vec::new());
        assert_eq!(tokens[0].begin, FileLocation::new(0, 0, 0));
        assert_eq!(tokens[1].begin, FileLocation::new(4, 1, 2));
        assert_eq!(tokens[1].end, FileLocation::new(5, 1, 3));
    }
}
