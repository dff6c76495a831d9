use super::*;
use super::scanner::{bump, is_ident_continue, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> (usize, Token) {
    skip_whitespace(lexer);

    let start = lexer.position;
    match lexer.peek {
        Some('(') => tokenize_symbol(lexer, Token::OpenParen),
        Some(')') => tokenize_symbol(lexer, Token::CloseParen),
        Some('[') => tokenize_symbol(lexer, Token::OpenBracket),
        Some(']') => tokenize_symbol(lexer, Token::CloseBracket),
        Some('=') => tokenize_symbol(lexer, Token::Equal),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some('\'') => tokenize_string(lexer),
        Some(c) if c.is_ascii_digit() || c == '.' || c == '-' => tokenize_number(lexer),
        Some(c) if c.is_alphabetic() => tokenize_identifier(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => (start, Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> (usize, Token) {
    let start = lexer.position;
    bump(lexer);
    (start, token)
}

/// `'...'` with `\'` and `\\` as the only escapes. Any other backslash is
/// dropped and the character after it is read as usual.
fn tokenize_string(lexer: &mut Lexer) -> (usize, Token) {
    let start = lexer.position;
    bump(lexer); // opening quote
    let mut content = String::new();

    loop {
        match bump(lexer) {
            None => {
                return (
                    lexer.position,
                    Token::Error(format!("unterminated string literal '{}'", content)),
                );
            }
            Some('\'') => return (start, Token::String(content)),
            Some('\\') => match lexer.peek {
                Some('\'') => {
                    bump(lexer);
                    content.push('\'');
                }
                Some('\\') => {
                    bump(lexer);
                    content.push('\\');
                }
                _ => {}
            },
            Some(ch) => content.push(ch),
        }
    }
}

fn tokenize_number(lexer: &mut Lexer) -> (usize, Token) {
    let start = lexer.position;
    let mut num = String::new();

    if lexer.peek == Some('-') {
        bump(lexer);
        num.push('-');
        match lexer.peek {
            None => return (lexer.position, Token::Error("found minus sign at EOF".into())),
            Some(c) if c.is_ascii_digit() || c == '.' => {}
            Some(c) => {
                return (
                    lexer.position,
                    Token::Error(format!("expected digit after minus sign, found '{}'", c)),
                );
            }
        }
    }

    // `.5` and `-.5` become `0.5` and `-0.5`
    if lexer.peek == Some('.') {
        num.push('0');
    }

    let mut found_dot = false;
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else if ch == '.' {
            if found_dot {
                return (lexer.position, Token::Error("found multiple dots in number".into()));
            }
            found_dot = true;
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if lexer.strict_numbers {
        if let Some(ch) = lexer.peek.filter(|c| is_ident_continue(*c)) {
            return (
                lexer.position,
                Token::Error(format!("unexpected character '{}' after number {}", ch, num)),
            );
        }
    }

    (start, Token::Number(num))
}

fn tokenize_identifier(lexer: &mut Lexer) -> (usize, Token) {
    let start = lexer.position;
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if is_ident_continue(ch) {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    (start, Token::Ident(ident))
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> (usize, Token) {
    let start = lexer.position;
    bump(lexer);
    (start, Token::Error(format!("unexpected character '{}'", ch)))
}
