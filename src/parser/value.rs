use super::*;

/// `value := STRING | IDENT | NUMBER`
///
/// A bare identifier is a string literal, `true` and `false` included.
pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, ParseError> {
    match parser.lex()? {
        (_, Token::String(s)) | (_, Token::Ident(s)) => Ok(Value::String(s)),
        (_, Token::Number(n)) => Ok(Value::Number(n)),
        (pos, tok) => Err(unexpected(pos, &tok, "value")),
    }
}

/// `array := ( item ( ',' item )* )?`
pub(super) fn parse_array(parser: &mut Parser) -> Result<Vec<Attribute>, ParseError> {
    let mut items = Vec::new();

    let (pos, tok) = parser.lex()?;
    let starts_item = starts_item(&tok);
    parser.unlex(pos, tok);
    if !starts_item {
        return Ok(items);
    }

    loop {
        items.push(parse_item(parser)?);

        match parser.lex()? {
            (_, Token::Comma) => continue,
            (pos, tok) => {
                parser.unlex(pos, tok);
                return Ok(items);
            }
        }
    }
}

fn starts_item(tok: &Token) -> bool {
    matches!(
        tok,
        Token::String(_) | Token::Ident(_) | Token::Number(_) | Token::OpenParen | Token::OpenBracket
    )
}

/// `item := value | '(' attributes ')' | '[' array ']'`
fn parse_item(parser: &mut Parser) -> Result<Attribute, ParseError> {
    let body = match parser.lex()? {
        (open, Token::OpenParen) => {
            let children = attribute::parse_attributes(parser)?;
            parser.expect_close(Token::CloseParen, open)?;
            (open, Body::Attributes(children))
        }
        (open, Token::OpenBracket) => {
            let items = parse_array(parser)?;
            parser.expect_close(Token::CloseBracket, open)?;
            (open, Body::Array(items))
        }
        (pos, tok) if starts_item(&tok) => {
            parser.unlex(pos, tok);
            (pos, Body::Value(parse_value(parser)?))
        }
        (pos, tok) => return Err(unexpected(pos, &tok, "array item")),
    };

    Ok(Attribute::new("", body.0, body.1))
}
