//! Generation context threaded through every stage.
//!
//! One [`GenerationContext`] lives for a whole run. It owns the two symbol
//! tables, the namespace-prefix lookup, the element-type lookup used for
//! `ref=` members, and the ambient schema names used to stamp descriptors
//! and documentation.

use crate::builtins::register_builtins;
use crate::descriptor::SymbolTable;
use crate::name::{FullName, XSD_NAMESPACE};
use std::collections::HashMap;

/// Mutable state shared by the loader, parser and resolver.
#[derive(Debug)]
pub struct GenerationContext {
    /// All referable types, built-ins included.
    pub classes: SymbolTable,
    /// Attribute groups; never emitted, consumed during splicing.
    pub groups: SymbolTable,
    /// Prefix to namespace URI, seeded conventionally and extended with
    /// each schema's own prefix declarations.
    pub ns_prefixes: HashMap<String, String>,
    /// Top-level element name to its declared type, for `ref=` members.
    pub element_types: HashMap<String, FullName>,
    /// Target namespace of the schema currently being parsed.
    pub target_namespace: String,
    /// File name of the schema currently being parsed.
    pub current_schema: String,
    /// All schema file names seen, in argument order.
    pub schema_files: Vec<String>,
}

impl GenerationContext {
    /// Creates a context with the built-in table pre-populated and the
    /// conventional prefix seeding in place.
    #[must_use]
    pub fn new() -> Self {
        let mut classes = SymbolTable::new();
        register_builtins(&mut classes);

        let mut ns_prefixes = HashMap::new();
        for prefix in ["xs", "xsd", "xsl"] {
            ns_prefixes.insert(prefix.to_string(), XSD_NAMESPACE.to_string());
        }

        Self {
            classes,
            groups: SymbolTable::new(),
            ns_prefixes,
            element_types: HashMap::new(),
            target_namespace: String::new(),
            current_schema: String::new(),
            schema_files: Vec::new(),
        }
    }

    /// Resolves a raw QName against the current prefix table, defaulting
    /// unprefixed names to the current target namespace.
    #[must_use]
    pub fn to_full_name(&self, qname: &str) -> FullName {
        crate::name::to_full_name(qname, &self.target_namespace, &self.ns_prefixes)
    }

    /// Switches ambient state to a new schema file: records the file name
    /// and binds the `tns` prefix to its target namespace.
    pub fn enter_schema(&mut self, file_name: &str, target_namespace: &str) {
        self.current_schema = file_name.to_string();
        self.schema_files.push(file_name.to_string());
        self.target_namespace = target_namespace.to_string();
        self.ns_prefixes
            .insert("tns".to_string(), target_namespace.to_string());
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}
