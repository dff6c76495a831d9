use super::*;

/// `attributes := ( attribute ( ',' attribute )* )?`
pub(super) fn parse_attributes(parser: &mut Parser) -> Result<Vec<Attribute>, ParseError> {
    let mut items = Vec::new();

    let (pos, tok) = parser.lex()?;
    let starts_attribute = matches!(tok, Token::Ident(_));
    parser.unlex(pos, tok);
    if !starts_attribute {
        return Ok(items);
    }

    loop {
        items.push(parse_attribute(parser)?);

        match parser.lex()? {
            (_, Token::Comma) => continue,
            (pos, tok) => {
                parser.unlex(pos, tok);
                return Ok(items);
            }
        }
    }
}

/// One attribute in any of its four forms:
///   - `ident=value`
///   - `ident(...)` object
///   - `ident[...]` array
///   - `ident` shorthand for `ident=true`
fn parse_attribute(parser: &mut Parser) -> Result<Attribute, ParseError> {
    let (pos, name) = match parser.lex()? {
        (pos, Token::Ident(name)) => (pos, name),
        (pos, tok) => return Err(unexpected(pos, &tok, "attribute name")),
    };

    let body = match parser.lex()? {
        (_, Token::Equal) => Body::Value(value::parse_value(parser)?),
        (open, Token::OpenParen) => {
            let children = parse_attributes(parser)?;
            parser.expect_close(Token::CloseParen, open)?;
            Body::Attributes(children)
        }
        (open, Token::OpenBracket) => {
            let items = value::parse_array(parser)?;
            parser.expect_close(Token::CloseBracket, open)?;
            Body::Array(items)
        }
        (next_pos, tok) => {
            parser.unlex(next_pos, tok);
            Body::Value(Value::Boolean("true".into()))
        }
    };

    Ok(Attribute::new(name, pos, body))
}
