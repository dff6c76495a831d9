// Author: Dustin Pilgrim
// License: MIT

use serde_json::json;

use crate::ast::{Attribute, Body, Value};
use crate::error::Error;
use crate::parser;

/// Render an attribute list as JSON.
///
/// - Strings → JSON strings
/// - Numbers → JSON numbers (text that no JSON number can hold stays a string)
/// - Booleans → JSON booleans
/// - `name(...)` → object in input order; a repeated name keeps its last value
/// - `name[...]` → array
///
/// # Examples
/// ```
/// use attribs::{export, parser};
///
/// let attrs = parser::parse("id=42, tags['a', 'b'], on").unwrap();
/// let json = export::attributes_to_json(&attrs);
/// assert_eq!(json["id"], 42);
/// assert_eq!(json["tags"][1], "b");
/// assert_eq!(json["on"], true);
/// ```
pub fn attributes_to_json(attrs: &[Attribute]) -> serde_json::Value {
    fn value_to_json(v: &Value) -> serde_json::Value {
        match v {
            Value::String(s) => json!(s),
            Value::Boolean(b) => json!(b == "true"),
            Value::Number(n) => {
                if let Ok(i) = n.parse::<i64>() {
                    json!(i)
                } else if let Some(num) = n.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                    serde_json::Value::Number(num)
                } else {
                    json!(n)
                }
            }
        }
    }

    fn body_to_json(body: &Body) -> serde_json::Value {
        match body {
            Body::Value(v) => value_to_json(v),
            Body::Attributes(children) => object_to_json(children),
            Body::Array(items) => json!(items.iter().map(|a| body_to_json(&a.body)).collect::<Vec<_>>()),
        }
    }

    fn object_to_json(children: &[Attribute]) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        for child in children {
            out.insert(child.name.clone(), body_to_json(&child.body));
        }
        serde_json::Value::Object(out)
    }

    object_to_json(attrs)
}

/// Parse attribute text and export it as pretty-printed JSON.
///
/// # Errors
/// Returns [`Error::Parse`] if the text is not valid attribute syntax.
pub fn export_to_json(input: &str) -> Result<String, Error> {
    let attrs = parser::parse(input)?;
    Ok(format!("{:#}", attributes_to_json(&attrs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::Dynamic;

    #[test]
    fn test_export_scalars() {
        let attrs = parser::parse("s='x', i=-3, f=.5, b=false, flag").unwrap();
        let v = attributes_to_json(&attrs);

        assert_eq!(v["s"], "x");
        assert_eq!(v["i"], -3);
        assert_eq!(v["f"], 0.5);
        assert_eq!(v["b"], "false");
        assert_eq!(v["flag"], true);
    }

    #[test]
    fn test_export_nested() {
        let attrs = parser::parse("interval(start=1, end=2), m[[1], [2, 3]], items[(a=1), ()]").unwrap();
        let v = attributes_to_json(&attrs);

        assert_eq!(v["interval"], json!({"start": 1, "end": 2}));
        assert_eq!(v["m"], json!([[1], [2, 3]]));
        assert_eq!(v["items"], json!([{"a": 1}, {}]));
    }

    #[test]
    fn test_export_keeps_order_and_last_duplicate() {
        let attrs = parser::parse("z=1, a=2, z=3").unwrap();
        let v = attributes_to_json(&attrs);

        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(v["z"], 3);
    }

    #[test]
    fn test_export_to_json_string() {
        let out = export_to_json("id=42").unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v, json!({"id": 42}));
        assert!(out.contains('\n'));

        let err = export_to_json("id=").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_export_dynamic() {
        let attr = parser::must_parse("x(n=1, f=2.5, on, l['a', true])").remove(0);
        let dynamic = Dynamic::from_attribute(&attr).unwrap();

        let from_conversion = serde_json::Value::from(dynamic.clone());
        let from_serialize = serde_json::to_value(&dynamic).unwrap();

        assert_eq!(from_conversion, json!({"n": 1, "f": 2.5, "on": true, "l": ["a", "true"]}));
        assert_eq!(from_serialize, from_conversion);
        assert_eq!(serde_json::Value::from(Dynamic::Null), serde_json::Value::Null);
    }
}
