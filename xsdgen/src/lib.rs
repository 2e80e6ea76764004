//! # xsdgen
//!
//! Generator of strongly-typed C++ object models from XML Schema
//! Definition files.
//!
//! Given one or more schemas, xsdgen produces one C++ class per named
//! complex type, with members matching the schema's attributes and child
//! elements in declared order and cardinality. Linked with the small
//! `XMLObject` runtime that is emitted alongside, the generated library
//! parses XML documents into a tree of typed objects and re-serialises
//! them.
//!
//! ## Pipeline
//!
//! Four single-threaded batch stages:
//! 1. **Load** each schema and survey its top-level declarations
//! 2. **Parse** declarations into type descriptors
//! 3. **Resolve** member, base and attribute-group references
//! 4. **Emit** headers, implementations, manifest and runtime through a
//!    diff gate that rewrites only what changed
//!
//! ## Quick start
//!
//! ```no_run
//! use xsdgen::prelude::*;
//!
//! # fn main() -> Result<(), xsdgen::codegen::CodegenError> {
//! let mut ctx = GenerationContext::new();
//! let doc = load_schema(std::path::Path::new("schema.xsd"), &mut ctx)?;
//! parse_schema(&doc, &mut ctx)?;
//! resolve(&mut ctx)?;
//!
//! let options = CodegenOptions {
//!     namespace: "models".to_string(),
//!     output_dir: "generated".into(),
//!     dry_run: false,
//! };
//! let report = generate(&ctx, &options)?;
//! assert!(report.changed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate organisation
//!
//! - [`schema`] - loading, parsing and resolution of XSD documents
//! - [`codegen`] - C++ emission, manifest and incremental writing

pub mod prelude;

/// Schema loading, parsing and resolution.
pub mod schema {
    pub use xsdgen_schema::*;
}

/// C++ code generation from resolved descriptors.
pub mod codegen {
    pub use xsdgen_codegen::*;
}
