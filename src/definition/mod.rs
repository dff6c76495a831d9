// Author: Dustin Pilgrim
// License: MIT

//! Parse-and-bind entry point for one target type.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::ast::Attribute;
use crate::binder::{self, Slot};
use crate::config::ParseOptions;
use crate::error::{Error, SchemaError};
use crate::parser;
use crate::schema::{Describe, SchemaCache, SchemaRef};

mod macros;

/// A schema fixed to the struct type `T`.
///
/// Building one is the only step that can fail with a [`SchemaError`]; once
/// built, [`parse`](Definition::parse) is a pure function of its input.
pub struct Definition<T> {
    schema: SchemaRef,
    options: ParseOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Definition<T>
where
    T: Describe + Slot + Default,
{
    /// Build the definition against the process-wide schema cache.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_cache(SchemaCache::global())
    }

    pub fn with_cache(cache: &SchemaCache) -> Result<Self, SchemaError> {
        let element = cache.build::<T>()?;
        let schema = element.schema.resolve()?;
        if !schema.is_struct() {
            return Err(SchemaError::NotStruct {
                type_name: schema.type_name(),
            });
        }

        Ok(Definition {
            schema: element.schema,
            options: ParseOptions::default(),
            _marker: PhantomData,
        })
    }

    /// Like [`new`](Definition::new), but panics when `T` has no valid schema.
    pub fn must_new() -> Self {
        match Self::new() {
            Ok(definition) => definition,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Bind an already parsed node. Its body must be an attribute list.
    pub fn bind(&self, attr: &Attribute) -> Result<T, Error> {
        let mut value = T::default();
        binder::bind(self.schema.resolve()?, attr, &mut value)?;
        Ok(value)
    }

    /// Parse `input` and bind it onto a fresh `T::default()`.
    ///
    /// An empty input yields `T::default()`.
    pub fn parse(&self, input: &str) -> Result<T, Error> {
        trace!(type_name = self.schema.type_name(), input, "parsing attributes");
        let attrs = parser::parse_with_options(input, self.options)?;
        self.bind(&Attribute::root(attrs))
    }
}

impl<T> Clone for Definition<T> {
    fn clone(&self) -> Self {
        Definition {
            schema: self.schema.clone(),
            options: self.options,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Definition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("type", &self.schema.type_name())
            .field("options", &self.options)
            .finish()
    }
}
