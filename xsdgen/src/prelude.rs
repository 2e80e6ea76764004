//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use xsdgen::prelude::*;
//! ```

// Schema types
pub use xsdgen_schema::{
    load_schema, load_schema_str, parse_schema, resolve, DescriptorKind, FullName,
    GenerationContext, LoadedSchema, Member, ParseError, SchemaError, TypeDescriptor, UNBOUNDED,
};

// Codegen types
pub use xsdgen_codegen::{
    generate, CodegenError, CodegenOptions, FileReport, FileStatus, GenerateReport, Generator,
};
