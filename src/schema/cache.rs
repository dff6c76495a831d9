use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use super::builder::Builder;
use super::describe::{Describe, TypeHandle};
use super::{Element, SchemaRef};
use crate::error::SchemaError;

static GLOBAL: Lazy<SchemaCache> = Lazy::new(SchemaCache::new);

/// Type -> schema memo.
///
/// A single lock covers the whole check-build-insert sequence: the first
/// caller for a type pays the build, concurrent callers wait and then hit
/// the finished entry. Entries are never evicted.
#[derive(Default)]
pub struct SchemaCache {
    schemas: Mutex<HashMap<TypeId, SchemaRef>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        SchemaCache::default()
    }

    /// The process-wide cache used by [`Definition::new`](crate::Definition::new).
    pub fn global() -> &'static SchemaCache {
        &GLOBAL
    }

    pub fn build<T: Describe>(&self) -> Result<Element, SchemaError> {
        self.build_handle(TypeHandle::of::<T>())
    }

    pub fn build_handle(&self, handle: TypeHandle) -> Result<Element, SchemaError> {
        let mut schemas = self.schemas.lock().unwrap_or_else(PoisonError::into_inner);
        Builder::new(&mut schemas).build(handle)
    }

    /// Cached schema for `T`, without building it. Wrapper types are not
    /// unwrapped: ask for `User`, not `Option<User>`.
    pub fn get<T: Describe>(&self) -> Option<SchemaRef> {
        let schemas = self.schemas.lock().unwrap_or_else(PoisonError::into_inner);
        schemas.get(&TypeId::of::<T>()).cloned()
    }

    pub fn len(&self) -> usize {
        self.schemas.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
