//! Built-in XSD primitive types.
//!
//! The generator pre-populates the class table with descriptors for the
//! XSD primitives it understands, so that references like `xs:int` resolve
//! immediately. Built-ins render as fixed C++ types and never produce
//! generated files of their own.

use crate::descriptor::{DescriptorKind, SymbolTable, TypeDescriptor};
use crate::name::FullName;

/// XSD local name and C++ rendering of each supported primitive.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("string", "std::string"),
    ("integer", "int"),
    ("int", "int"),
    ("decimal", "double"),
    ("float", "double"),
    ("double", "double"),
    ("boolean", "bool"),
    ("anyURI", "std::string"),
    ("time", "std::string"),
    ("date", "std::string"),
    ("dateTime", "std::string"),
    ("QName", "std::string"),
    ("ID", "std::string"),
    ("IDREF", "std::string"),
];

/// Inserts every built-in descriptor into the class table.
///
/// Must run before any schema is parsed so primitive references resolve
/// during the binding pass.
pub fn register_builtins(classes: &mut SymbolTable) {
    for &(local, cpp_type) in BUILTIN_TYPES {
        let descriptor = TypeDescriptor::new(
            FullName::xsd(local),
            DescriptorKind::BuiltIn { cpp_type },
            "",
        );
        classes
            .insert(descriptor)
            .expect("built-in table contains no duplicates");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins() {
        let mut table = SymbolTable::new();
        register_builtins(&mut table);

        assert_eq!(table.len(), BUILTIN_TYPES.len());

        let id = table.get_id(&FullName::xsd("string")).unwrap();
        let string = table.get(id);
        assert!(string.is_builtin());
        assert!(string.is_simple());
        assert_eq!(string.classname(), "std::string");

        let id = table.get_id(&FullName::xsd("boolean")).unwrap();
        assert_eq!(table.get(id).classname(), "bool");

        let id = table.get_id(&FullName::xsd("float")).unwrap();
        assert_eq!(table.get(id).classname(), "double");
    }

    #[test]
    fn test_builtins_resolve_by_prefixless_lookup() {
        let mut table = SymbolTable::new();
        register_builtins(&mut table);

        // the name-only fallback lets `int` resolve even without the XSD
        // namespace attached
        assert!(table.find(&FullName::new("", "int")).is_some());
    }
}
