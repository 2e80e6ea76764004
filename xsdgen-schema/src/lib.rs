//! # xsdgen-schema
//!
//! XSD schema ingestion and the type-descriptor model.
//!
//! This crate covers the first three stages of the generator pipeline:
//! - loading schema documents and surveying their top-level declarations
//! - parsing declarations into type descriptors, including anonymous
//!   inline types, attribute groups and document entry points
//! - resolving cross-references: member types, base types, attribute-group
//!   splicing and friend computation
//!
//! The resolved [`GenerationContext`] is consumed by `xsdgen-codegen`.

pub mod builtins;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod name;
pub mod parser;
pub mod resolver;

mod xml;

pub use context::GenerationContext;
pub use descriptor::{
    DescriptorId, DescriptorKind, Member, SymbolTable, TypeDescriptor, UNBOUNDED,
};
pub use error::{ParseError, SchemaError};
pub use loader::{load_schema, load_schema_str, LoadedSchema};
pub use name::{sanitize, FullName, XSD_NAMESPACE};
pub use parser::parse_schema;
pub use resolver::resolve;
