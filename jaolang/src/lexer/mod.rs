// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod keyword;
#[allow(clippy::module_inception)]
mod lexer;
mod punctuator;
mod token;
mod token_kind;

pub use self::{
    keyword::Keyword,
    lexer::{Lexer, LexerError, LexerErrorKind},
    punctuator::Punctuator,
    token::Token,
    token_kind::TokenKind,
};
