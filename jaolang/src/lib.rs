// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod ast;
mod lexer;
mod parser;
mod tree;
mod util;

pub use self::{
    ast::*,
    lexer::{Keyword, Lexer, LexerError, LexerErrorKind, Punctuator, Token, TokenKind},
    parser::{ParseError, ParseResult, Parser},
    tree::ParseTree,
    util::{FileLocation, FileRange, Ranged, SourceCode},
};
