// Author: Dustin Pilgrim
// License: MIT

//! Typed description of how attribute trees map onto a Rust type.
//!
//! Schemas are built once per type and cached (see [`SchemaCache`]). A schema
//! node is registered before its children are resolved, so a type that
//! refers back to itself resolves to the node already being built.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::error::SchemaError;

mod builder;
mod cache;
mod describe;
mod tag;

pub use cache::SchemaCache;
pub use describe::{Describe, FieldInfo, TypeHandle, TypeInfo};

#[derive(Debug)]
pub struct Schema {
    type_name: &'static str,
    kind: SchemaKind,
}

#[derive(Debug)]
pub enum SchemaKind {
    Integer { signed: bool, width: u32 },
    Float { width: u32 },
    Boolean,
    String,
    /// Properties keyed by alias, in declaration order.
    Struct { properties: IndexMap<String, Property> },
    Array { element: Element },
    /// Keys are always strings.
    Map { element: Element },
    Any,
}

impl Schema {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, SchemaKind::Struct { .. })
    }

    pub fn properties(&self) -> Option<&IndexMap<String, Property>> {
        match &self.kind {
            SchemaKind::Struct { properties } => Some(properties),
            _ => None,
        }
    }

    pub fn property(&self, alias: &str) -> Option<&Property> {
        self.properties()?.get(alias)
    }

    /// Element of an array or map schema.
    pub fn element(&self) -> Option<&Element> {
        match &self.kind {
            SchemaKind::Array { element } | SchemaKind::Map { element } => Some(element),
            _ => None,
        }
    }
}

/// A resolved type plus whether the slot holding it is optional.
#[derive(Debug, Clone)]
pub struct Element {
    pub nullable: bool,
    pub schema: SchemaRef,
}

#[derive(Debug, Clone)]
pub struct Property {
    pub alias: String,
    /// Name of the Rust field the property writes to.
    pub field: &'static str,
    /// Field names from the owning struct down to the field; longer than one
    /// for properties merged in from embedded structs.
    pub path: Vec<&'static str>,
    pub nullable: bool,
    pub schema: SchemaRef,
}

/// Shared, address-stable handle to a schema node.
///
/// The node is empty while its type is still being built.
#[derive(Clone)]
pub struct SchemaRef {
    cell: Arc<OnceCell<Schema>>,
    type_name: &'static str,
}

impl SchemaRef {
    fn pending(type_name: &'static str) -> Self {
        SchemaRef {
            cell: Arc::new(OnceCell::new()),
            type_name,
        }
    }

    fn fill(&self, schema: Schema) {
        // a node is created and filled by the same builder, exactly once
        let filled = self.cell.set(schema).is_ok();
        debug_assert!(filled, "schema node `{}` filled twice", self.type_name);
    }

    pub fn get(&self) -> Option<&Schema> {
        self.cell.get()
    }

    pub fn resolve(&self) -> Result<&Schema, SchemaError> {
        self.cell.get().ok_or(SchemaError::Incomplete {
            type_name: self.type_name,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles point at the same cached node.
    pub fn ptr_eq(&self, other: &SchemaRef) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

// Recursive schemas are cyclic; print only the type name.
impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaRef({})", self.type_name)
    }
}

/// Build (or fetch) the schema for `T` in the process-wide cache.
pub fn build<T: Describe>() -> Result<Element, SchemaError> {
    SchemaCache::global().build::<T>()
}

#[cfg(test)]
mod tests;
