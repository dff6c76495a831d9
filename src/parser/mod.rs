// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{Attribute, Body, Value};
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token};

mod attribute;
mod value;

/// Parse `input` into its top-level attribute list.
///
/// ```
/// let attrs = attribs::parser::parse("id=42, tags[1,2]").unwrap();
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[1].name, "tags");
/// ```
pub fn parse(input: &str) -> Result<Vec<Attribute>, ParseError> {
    Parser::new(input).parse()
}

pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Vec<Attribute>, ParseError> {
    Parser::with_options(input, options).parse()
}

/// Like [`parse`], but panics on malformed input. Meant for literals in tests
/// and static initialisers.
pub fn must_parse(input: &str) -> Vec<Attribute> {
    match parse(input) {
        Ok(attrs) => attrs,
        Err(e) => panic!("{}", e),
    }
}

/// Recursive-descent parser with one token of push-back.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(usize, Token)>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::with_options(input, options),
            peeked: None,
        }
    }

    /// Parse the whole input. Anything left after the attribute list is an error.
    pub fn parse(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let attrs = attribute::parse_attributes(self)?;

        match self.lex()? {
            (_, Token::Eof) => Ok(attrs),
            (pos, tok) => Err(unexpected(pos, &tok, "end of input")),
        }
    }

    /// Next token; an `ERROR` token from the lexer becomes a `ParseError`.
    pub(crate) fn lex(&mut self) -> Result<(usize, Token), ParseError> {
        let (pos, tok) = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token(),
        };

        match tok {
            Token::Error(message) => Err(ParseError::new(pos, message)),
            tok => Ok((pos, tok)),
        }
    }

    pub(crate) fn unlex(&mut self, pos: usize, token: Token) {
        debug_assert!(self.peeked.is_none(), "only one token of push-back");
        self.peeked = Some((pos, token));
    }

    /// Consume the closing token of a group opened at `open_pos`.
    pub(crate) fn expect_close(&mut self, close: Token, open_pos: usize) -> Result<(), ParseError> {
        match self.lex()? {
            (_, tok) if tok == close => Ok(()),
            (pos, Token::Eof) => Err(ParseError::new(
                pos,
                format!("unterminated group opened at {}, expected {}", open_pos, close.kind()),
            )),
            (pos, tok) => Err(unexpected(pos, &tok, close.kind())),
        }
    }
}

pub(crate) fn unexpected(pos: usize, token: &Token, expected: &str) -> ParseError {
    ParseError::new(pos, format!("unexpected token {}, expected {}", token, expected))
}
