// Author: Dustin Pilgrim
// License: MIT

//! Projection of an attribute tree onto caller-owned storage.
//!
//! Writes happen in place as nodes are visited. When a node fails, whatever
//! earlier siblings already wrote stays written.

use crate::ast::{Attribute, Body, Value};
use crate::error::{BindError, Error};
use crate::schema::{Schema, SchemaKind};

mod dynamic;
mod slot;

pub use dynamic::Dynamic;
pub use slot::{Mismatch, Scalar, Slot};

/// Bind `attr` onto `slot` as described by `schema`.
pub fn bind(schema: &Schema, attr: &Attribute, slot: &mut dyn Slot) -> Result<(), Error> {
    bind_node(schema, attr, &attr.name, slot)
}

// `name` is what errors report: the attribute's own name, or the enclosing
// array's name for array items.
fn bind_node(schema: &Schema, attr: &Attribute, name: &str, slot: &mut dyn Slot) -> Result<(), Error> {
    match schema.kind() {
        SchemaKind::Struct { properties } => {
            let Body::Attributes(children) = &attr.body else {
                return Err(wrong_shape(attr, name, "attributes").into());
            };
            slot.begin_struct().map_err(|_| mismatch(attr, name, "a struct"))?;

            for child in children {
                let prop = properties.get(&child.name).ok_or_else(|| BindError::UnknownAttribute {
                    position: child.position,
                    name: child.name.clone(),
                })?;
                let target = walk(&mut *slot, &prop.path)
                    .ok_or_else(|| mismatch(child, &child.name, "a struct field"))?;
                bind_node(prop.schema.resolve()?, child, &child.name, target)?;
            }
        }

        SchemaKind::Array { element } => {
            let Body::Array(items) = &attr.body else {
                return Err(wrong_shape(attr, name, "array").into());
            };
            slot.begin_array().map_err(|_| mismatch(attr, name, "an array"))?;

            let schema = element.schema.resolve()?;
            for item in items {
                let target = slot.push_item().ok_or_else(|| mismatch(item, name, "array items"))?;
                bind_node(schema, item, name, target)?;
            }
        }

        SchemaKind::Map { element } => {
            let Body::Attributes(children) = &attr.body else {
                return Err(wrong_shape(attr, name, "attributes").into());
            };
            slot.begin_map().map_err(|_| mismatch(attr, name, "a map"))?;

            let schema = element.schema.resolve()?;
            for child in children {
                let target = slot
                    .entry(&child.name)
                    .ok_or_else(|| mismatch(child, &child.name, "string keys"))?;
                bind_node(schema, child, &child.name, target)?;
            }
        }

        SchemaKind::Integer { signed, width } => {
            let text = number(attr, name)?;
            let scalar = if *signed {
                parse_signed(text, *width).map(Scalar::Signed)
            } else {
                parse_unsigned(text, *width).map(Scalar::Unsigned)
            }
            .ok_or_else(|| {
                let kind = if *signed { "i" } else { "u" };
                invalid(attr, name, format!("'{}' is not a valid {}{}", text, kind, width))
            })?;
            slot.assign(scalar).map_err(|_| mismatch(attr, name, "an integer"))?;
        }

        SchemaKind::Float { width } => {
            let text = number(attr, name)?;
            let parsed = if *width == 32 {
                text.parse::<f32>().map(f64::from).ok()
            } else {
                text.parse::<f64>().ok()
            };
            let value = parsed
                .ok_or_else(|| invalid(attr, name, format!("'{}' is not a valid f{}", text, width)))?;
            slot.assign(Scalar::Float(value))
                .map_err(|_| mismatch(attr, name, "a float"))?;
        }

        SchemaKind::Boolean => {
            let value = match &attr.body {
                Body::Value(Value::Boolean(text)) if text == "true" => true,
                Body::Value(Value::Boolean(text)) if text == "false" => false,
                Body::Value(Value::Boolean(text)) => {
                    return Err(invalid(attr, name, format!("'{}' is not a boolean", text)).into());
                }
                _ => return Err(wrong_shape(attr, name, "boolean").into()),
            };
            slot.assign(Scalar::Boolean(value))
                .map_err(|_| mismatch(attr, name, "a boolean"))?;
        }

        SchemaKind::String => {
            let Body::Value(Value::String(text)) = &attr.body else {
                return Err(wrong_shape(attr, name, "string").into());
            };
            slot.assign(Scalar::String(text))
                .map_err(|_| mismatch(attr, name, "a string"))?;
        }

        SchemaKind::Any => {
            let value = Dynamic::from_attribute(attr)?;
            slot.assign_dynamic(value)
                .map_err(|_| mismatch(attr, name, "a dynamic value"))?;
        }
    }

    Ok(())
}

/// Follow a property path down through (possibly embedded) struct fields.
fn walk<'s>(slot: &'s mut dyn Slot, path: &[&str]) -> Option<&'s mut dyn Slot> {
    let mut current = slot;
    for field in path {
        current = current.field(field)?;
    }
    Some(current)
}

fn number<'a>(attr: &'a Attribute, name: &str) -> Result<&'a str, BindError> {
    match &attr.body {
        Body::Value(Value::Number(text)) => Ok(text),
        _ => Err(wrong_shape(attr, name, "number")),
    }
}

fn parse_signed(text: &str, width: u32) -> Option<i64> {
    let value = text.parse::<i64>().ok()?;
    if width >= 64 {
        return Some(value);
    }
    let max = (1i64 << (width - 1)) - 1;
    let min = -max - 1;
    (min..=max).contains(&value).then_some(value)
}

fn parse_unsigned(text: &str, width: u32) -> Option<u64> {
    let value = text.parse::<u64>().ok()?;
    if width >= 64 {
        return Some(value);
    }
    (value < (1u64 << width)).then_some(value)
}

fn wrong_shape(attr: &Attribute, name: &str, expected: &str) -> BindError {
    invalid(attr, name, format!("expected {}, found {}", expected, attr.body_kind()))
}

fn invalid(attr: &Attribute, name: &str, reason: String) -> BindError {
    BindError::InvalidValue {
        position: attr.position,
        name: name.to_string(),
        reason,
    }
}

fn mismatch(attr: &Attribute, name: &str, expected: &'static str) -> BindError {
    BindError::SlotMismatch {
        position: attr.position,
        name: name.to_string(),
        expected,
    }
}
