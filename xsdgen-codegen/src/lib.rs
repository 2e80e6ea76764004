//! # xsdgen-codegen
//!
//! C++ code generation from resolved XSD type descriptors.
//!
//! This crate provides:
//! - topological emission ordering over the descriptor graph
//! - header, implementation and build-manifest rendering
//! - the fixed `XMLObject` runtime emitted verbatim with every tree
//! - a diff-gated incremental writer with dry-run support

pub mod cpp;
pub mod error;
pub mod generator;
pub mod order;
pub mod output;
pub mod runtime;

pub use error::CodegenError;
pub use generator::{generate, CodegenOptions, GenerateReport, Generator};
pub use output::{FileReport, FileStatus};
