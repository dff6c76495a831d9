use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::{Attribute, Body, Value};
use crate::error::BindError;

/// A value whose shape is taken from the input rather than from a schema.
///
/// `Null` is the unset state of a dynamic slot; binding never produces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dynamic {
    #[default]
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<Dynamic>),
    Map(IndexMap<String, Dynamic>),
}

impl Dynamic {
    /// Classify an attribute node without any schema.
    ///
    /// Numbers become `Integer` when they fit an `i64`, `Float` otherwise.
    pub fn from_attribute(attr: &Attribute) -> Result<Dynamic, BindError> {
        let dynamic = match &attr.body {
            Body::Value(Value::String(s)) => Dynamic::String(s.clone()),
            Body::Value(Value::Boolean(b)) => match b.as_str() {
                "true" => Dynamic::Boolean(true),
                "false" => Dynamic::Boolean(false),
                other => return Err(invalid(attr, format!("'{}' is not a boolean", other))),
            },
            Body::Value(Value::Number(n)) => {
                if let Ok(i) = n.parse::<i64>() {
                    Dynamic::Integer(i)
                } else if let Ok(f) = n.parse::<f64>() {
                    Dynamic::Float(f)
                } else {
                    return Err(invalid(attr, format!("'{}' is not a number", n)));
                }
            }
            Body::Attributes(children) => {
                let mut map = IndexMap::with_capacity(children.len());
                for child in children {
                    map.insert(child.name.clone(), Dynamic::from_attribute(child)?);
                }
                Dynamic::Map(map)
            }
            Body::Array(items) => Dynamic::List(
                items
                    .iter()
                    .map(Dynamic::from_attribute)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(dynamic)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Dynamic::String(s) = self { Some(s) } else { None }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Dynamic::Integer(i) = self { Some(*i) } else { None }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dynamic::Float(f) => Some(*f),
            Dynamic::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Dynamic::Boolean(b) = self { Some(*b) } else { None }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        if let Dynamic::List(items) = self { Some(items) } else { None }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Dynamic>> {
        if let Dynamic::Map(map) = self { Some(map) } else { None }
    }

    /// Map lookup; `None` for anything that is not a map.
    pub fn get(&self, key: &str) -> Option<&Dynamic> {
        self.as_map()?.get(key)
    }
}

fn invalid(attr: &Attribute, reason: String) -> BindError {
    BindError::InvalidValue {
        position: attr.position,
        name: attr.name.clone(),
        reason,
    }
}

impl From<Dynamic> for serde_json::Value {
    fn from(value: Dynamic) -> Self {
        match value {
            Dynamic::Null => serde_json::Value::Null,
            Dynamic::String(s) => serde_json::Value::String(s),
            Dynamic::Integer(i) => serde_json::Value::from(i),
            // NaN and infinities have no JSON form
            Dynamic::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Dynamic::Boolean(b) => serde_json::Value::Bool(b),
            Dynamic::List(items) => items.into_iter().map(serde_json::Value::from).collect(),
            Dynamic::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, serde_json::Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::String(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::String(s)
    }
}

impl From<i64> for Dynamic {
    fn from(i: i64) -> Self {
        Dynamic::Integer(i)
    }
}

impl From<f64> for Dynamic {
    fn from(f: f64) -> Self {
        Dynamic::Float(f)
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Boolean(b)
    }
}
