//! Compact attribute syntax (`id=42, interval(start=1), tags['a', 'b']`)
//! decoded into strongly-typed Rust values.

pub mod ast;
pub mod binder;
pub mod config;
pub mod definition;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod schema;

pub use ast::{Attribute, Body, Value};
pub use binder::{Dynamic, Slot};
pub use config::ParseOptions;
pub use definition::Definition;
pub use error::{BindError, Error, ParseError, SchemaError};
pub use schema::{Describe, SchemaCache};
