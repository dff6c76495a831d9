use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Body, Value};
use crate::error::SchemaError;
use crate::parser;

/// Aliases must lex as a single identifier, or no input could ever address them.
static ALIAS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}\p{N}_]*$").expect("alias pattern is valid"));

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldTag {
    pub alias: Option<String>,
    pub disabled: bool,
}

/// Parse per-field tag text. The tag uses the attribute syntax itself with two
/// known keys: `name` (string) and `disabled` (boolean, usually the bare shorthand).
pub(crate) fn parse_tag(field: &str, tag: &str) -> Result<FieldTag, SchemaError> {
    let invalid = |message: String| SchemaError::InvalidTag {
        field: field.to_string(),
        message,
    };

    let attrs = parser::parse(tag).map_err(|e| invalid(e.to_string()))?;
    let mut result = FieldTag::default();

    for attr in attrs {
        match (attr.name.as_str(), &attr.body) {
            ("name", Body::Value(Value::String(alias))) => {
                if !ALIAS.is_match(alias) {
                    return Err(invalid(format!("`{}` is not a valid attribute name", alias)));
                }
                result.alias = Some(alias.clone());
            }
            ("name", _) => {
                return Err(invalid(format!("`name` expects a string, got {}", attr.body_kind())));
            }
            ("disabled", Body::Value(Value::Boolean(flag))) => {
                result.disabled = flag == "true";
            }
            ("disabled", _) => {
                return Err(invalid(format!(
                    "`disabled` expects a boolean, got {}",
                    attr.body_kind()
                )));
            }
            (other, _) => return Err(invalid(format!("unknown key `{}`", other))),
        }
    }

    Ok(result)
}
