use std::any::TypeId;
use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::describe::{FieldInfo, TypeHandle, TypeInfo};
use super::tag::parse_tag;
use super::{Element, Property, Schema, SchemaKind, SchemaRef};
use crate::error::SchemaError;

/// One schema construction pass over a locked cache.
///
/// Every node this pass registers is removed again if the pass fails, so a
/// failed build never leaves a partial schema behind.
pub(super) struct Builder<'c> {
    schemas: &'c mut HashMap<TypeId, SchemaRef>,
    inserted: Vec<TypeId>,
    /// Struct whose properties are being collected, followed by the structs
    /// it embeds (transitively) on the way down.
    embedding: Vec<TypeId>,
}

impl<'c> Builder<'c> {
    pub(super) fn new(schemas: &'c mut HashMap<TypeId, SchemaRef>) -> Self {
        Builder {
            schemas,
            inserted: Vec::new(),
            embedding: Vec::new(),
        }
    }

    pub(super) fn build(mut self, handle: TypeHandle) -> Result<Element, SchemaError> {
        let result = self.resolve(handle);

        if let Err(e) = &result {
            debug!(
                type_name = handle.name(),
                discarded = self.inserted.len(),
                error = %e,
                "schema build failed, rolling back"
            );
            for id in &self.inserted {
                self.schemas.remove(id);
            }
        }

        result
    }

    /// Strip `Option`/`Box` wrappers, then build the schema of what is inside.
    fn resolve(&mut self, handle: TypeHandle) -> Result<Element, SchemaError> {
        let mut nullable = false;
        let mut handle = handle;

        loop {
            match handle.info() {
                TypeInfo::Optional(inner) => {
                    nullable = true;
                    handle = inner;
                }
                TypeInfo::Indirect(inner) => handle = inner,
                info => {
                    let schema = self.schema_for(handle, info)?;
                    return Ok(Element { nullable, schema });
                }
            }
        }
    }

    fn schema_for(&mut self, handle: TypeHandle, info: TypeInfo) -> Result<SchemaRef, SchemaError> {
        if let Some(existing) = self.schemas.get(&handle.id()) {
            trace!(type_name = handle.name(), "schema cache hit");
            return Ok(existing.clone());
        }

        // register before recursing: cycles resolve to this node
        let schema = SchemaRef::pending(handle.name());
        self.schemas.insert(handle.id(), schema.clone());
        self.inserted.push(handle.id());

        debug!(type_name = handle.name(), "building attribute schema");
        let kind = self.classify(handle, info)?;
        schema.fill(Schema {
            type_name: handle.name(),
            kind,
        });

        Ok(schema)
    }

    fn classify(&mut self, handle: TypeHandle, info: TypeInfo) -> Result<SchemaKind, SchemaError> {
        let kind = match info {
            TypeInfo::Integer { signed, width } => SchemaKind::Integer { signed, width },
            TypeInfo::Float { width } => SchemaKind::Float { width },
            TypeInfo::Boolean => SchemaKind::Boolean,
            TypeInfo::String => SchemaKind::String,
            TypeInfo::Any => SchemaKind::Any,
            TypeInfo::Array(element) => SchemaKind::Array {
                element: self.resolve(element)?,
            },
            TypeInfo::Map { key, value } => {
                if !matches!(key.info(), TypeInfo::String) {
                    return Err(SchemaError::MapKeyNotString {
                        type_name: handle.name(),
                    });
                }
                SchemaKind::Map {
                    element: self.resolve(value)?,
                }
            }
            TypeInfo::Struct(fields) => {
                // a plain field starts a fresh embedding chain
                let outer = std::mem::replace(&mut self.embedding, vec![handle.id()]);
                let properties = self.properties(handle, fields);
                self.embedding = outer;
                SchemaKind::Struct {
                    properties: properties?,
                }
            }
            TypeInfo::Unsupported => {
                return Err(SchemaError::UnsupportedType {
                    type_name: handle.name(),
                    reason: "no attribute mapping for this kind".into(),
                });
            }
            TypeInfo::Optional(_) | TypeInfo::Indirect(_) => {
                return Err(SchemaError::UnsupportedType {
                    type_name: handle.name(),
                    reason: "wrapper types are unwrapped before classification".into(),
                });
            }
        };

        Ok(kind)
    }

    fn properties(
        &mut self,
        owner: TypeHandle,
        fields: Vec<FieldInfo>,
    ) -> Result<IndexMap<String, Property>, SchemaError> {
        let mut properties = IndexMap::new();

        for field in fields {
            let tag = parse_tag(field.name, field.tag)?;
            if tag.disabled {
                continue;
            }

            if field.embedded {
                self.merge_embedded(owner, &field, &mut properties)?;
                continue;
            }

            let alias = tag.alias.unwrap_or_else(|| field.name.to_string());
            if properties.contains_key(&alias) {
                return Err(SchemaError::DuplicateField {
                    type_name: owner.name(),
                    alias,
                });
            }

            let element = self.resolve(field.ty)?;
            properties.insert(
                alias.clone(),
                Property {
                    alias,
                    field: field.name,
                    path: vec![field.name],
                    nullable: element.nullable,
                    schema: element.schema,
                },
            );
        }

        Ok(properties)
    }

    fn merge_embedded(
        &mut self,
        owner: TypeHandle,
        field: &FieldInfo,
        properties: &mut IndexMap<String, Property>,
    ) -> Result<(), SchemaError> {
        let target = unwrap_wrappers(field.ty);
        if self.embedding.contains(&target.id()) {
            return Err(SchemaError::UnsupportedType {
                type_name: target.name(),
                reason: "a struct cannot embed itself".into(),
            });
        }

        let inner = self.embedded_properties(field.ty, target)?;

        for (alias, prop) in &inner {
            if properties.contains_key(alias) {
                return Err(SchemaError::DuplicateField {
                    type_name: owner.name(),
                    alias: alias.clone(),
                });
            }

            let mut path = Vec::with_capacity(prop.path.len() + 1);
            path.push(field.name);
            path.extend_from_slice(&prop.path);

            properties.insert(
                alias.clone(),
                Property {
                    path,
                    ..prop.clone()
                },
            );
        }

        Ok(())
    }

    /// Properties of an embedded struct. A node that is still being built
    /// higher up the stack is read from its field table instead of the cache,
    /// so the result does not depend on which type was built first.
    fn embedded_properties(
        &mut self,
        declared: TypeHandle,
        target: TypeHandle,
    ) -> Result<IndexMap<String, Property>, SchemaError> {
        let cached = self
            .schemas
            .get(&target.id())
            .and_then(SchemaRef::get)
            .map(|schema| schema.properties().cloned());

        match cached {
            Some(Some(properties)) => return Ok(properties),
            Some(None) => {
                return Err(SchemaError::NotStruct {
                    type_name: target.name(),
                });
            }
            None => {}
        }

        match target.info() {
            TypeInfo::Struct(fields) => {
                self.embedding.push(target.id());
                let properties = self.properties(target, fields);
                self.embedding.pop();
                properties
            }
            _ => {
                // surfaces unsupported types before the shape complaint
                self.resolve(declared)?;
                Err(SchemaError::NotStruct {
                    type_name: target.name(),
                })
            }
        }
    }
}

/// Strip `Option`/`Box` wrappers off a handle.
fn unwrap_wrappers(mut handle: TypeHandle) -> TypeHandle {
    loop {
        match handle.info() {
            TypeInfo::Optional(inner) | TypeInfo::Indirect(inner) => handle = inner,
            _ => return handle,
        }
    }
}
