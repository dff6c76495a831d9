// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::Chars;

use crate::config::ParseOptions;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // --- literals ---
    Ident(String),
    String(String),
    Number(String),

    // --- structure ---
    Comma,
    Equal,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    /// A lexing failure; carries a human readable message.
    Error(String),
    Eof,
}

impl Token {
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Ident(_) => "IDENT",
            Token::String(_) => "STRING",
            Token::Number(_) => "NUMBER",
            Token::Comma => "COMMA",
            Token::Equal => "EQUAL",
            Token::OpenParen => "OPEN_PAREN",
            Token::CloseParen => "CLOSE_PAREN",
            Token::OpenBracket => "OPEN_BRACKET",
            Token::CloseBracket => "CLOSE_BRACKET",
            Token::Error(_) => "ERROR",
            Token::Eof => "EOF",
        }
    }

    /// Literal text, or the message for `Error`. Empty for punctuation.
    pub fn text(&self) -> &str {
        match self {
            Token::Ident(s) | Token::String(s) | Token::Number(s) | Token::Error(s) => s,
            Token::Comma => ",",
            Token::Equal => "=",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Eof => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "{}", self.kind()),
            _ => write!(f, "{} '{}'", self.kind(), self.text()),
        }
    }
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    /// Char offset of `peek`.
    position: usize,
    strict_numbers: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            position: 0,
            strict_numbers: options.strict_numbers,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Next token together with the char offset it starts at.
    ///
    /// Once `Eof` is reached every further call returns `Eof` again.
    pub fn next_token(&mut self) -> (usize, Token) {
        tokenizer::next_token(self)
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Token);

    /// Yields tokens up to, but not including, `Eof`. An `Error` token ends the stream.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            (_, Token::Eof) => None,
            (pos, Token::Error(msg)) => {
                self.peek = None;
                Some((pos, Token::Error(msg)))
            }
            other => Some(other),
        }
    }
}
