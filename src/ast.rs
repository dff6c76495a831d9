use serde::Serialize;

/// A leaf literal. Text is kept as written; typing happens at bind time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    Boolean(String),
    Number(String),
    String(String),
}

impl Value {
    pub fn text(&self) -> &str {
        match self {
            Value::Boolean(s) | Value::Number(s) | Value::String(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Body {
    Value(Value),
    /// Named children, i.e. an object: `name(a=1, b=2)`.
    Attributes(Vec<Attribute>),
    /// Unnamed children: `name[1, 2]`.
    Array(Vec<Attribute>),
}

/// A node of the attribute tree.
///
/// Array items carry an empty `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub position: usize,
    pub body: Body,
}

impl Attribute {
    pub fn new(name: impl Into<String>, position: usize, body: Body) -> Self {
        Attribute {
            name: name.into(),
            position,
            body,
        }
    }

    /// The unnamed root object wrapping a top-level attribute list.
    pub fn root(attributes: Vec<Attribute>) -> Self {
        Attribute::new("", 0, Body::Attributes(attributes))
    }

    pub fn as_value(&self) -> Option<&Value> {
        if let Body::Value(v) = &self.body {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_attributes(&self) -> Option<&[Attribute]> {
        if let Body::Attributes(items) = &self.body {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Attribute]> {
        if let Body::Array(items) = &self.body {
            Some(items)
        } else {
            None
        }
    }

    /// Child with the given name, for object bodies. A repeated name
    /// resolves to its last occurrence.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.as_attributes()?.iter().rev().find(|a| a.name == name)
    }

    pub(crate) fn body_kind(&self) -> &'static str {
        match &self.body {
            Body::Value(v) => v.kind(),
            Body::Attributes(_) => "attributes",
            Body::Array(_) => "array",
        }
    }
}
