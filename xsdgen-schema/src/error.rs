//! Error types for schema loading, parsing and resolution.

use crate::name::FullName;
use thiserror::Error;

/// Error type for schema loading and parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered where the schema subset allows none.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Unsupported construct of the XSD subset.
    #[error("unsupported construct: {message}")]
    Unsupported {
        /// Error message.
        message: String,
    },

    /// Two non-empty definitions share a qualified name.
    #[error("{name} defined more than once")]
    DuplicateDefinition {
        /// Name of the duplicate.
        name: FullName,
    },

    /// Two members of one type share a name.
    #[error("member '{member}' defined more than once in '{type_name}'")]
    DuplicateMember {
        /// Member name.
        member: String,
        /// Owning type local name.
        type_name: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates an unsupported construct error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// Error type for the resolution pass.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Base type not found.
    #[error("undefined base type '{base}' of '{owner}'")]
    UndefinedBase {
        /// The unresolved base name.
        base: FullName,
        /// The type declaring the base.
        owner: FullName,
    },

    /// Attribute group not found.
    #[error("undefined group '{group}' in '{owner}'")]
    UndefinedGroup {
        /// The unresolved group name.
        group: FullName,
        /// The type referencing the group.
        owner: FullName,
    },

    /// A document entry point lacks a declared type.
    #[error("document '{name}' without base type")]
    DocumentWithoutBase {
        /// The document element name.
        name: FullName,
    },

    /// Cyclic inheritance detected while ordering descriptors.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_missing_attr() {
        let err = ParseError::missing_attr("attribute", "type");
        let msg = err.to_string();
        assert!(msg.contains("attribute"));
        assert!(msg.contains("type"));
        assert!(msg.contains("missing required attribute"));
    }

    #[test]
    fn test_parse_error_invalid_attr() {
        let err = ParseError::invalid_attr("element", "maxOccurs", "abc");
        let msg = err.to_string();
        assert!(msg.contains("element"));
        assert!(msg.contains("maxOccurs"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("invalid value"));
    }

    #[test]
    fn test_parse_error_unknown_element() {
        let err = ParseError::unknown_element("foo", "complexType");
        let msg = err.to_string();
        assert!(msg.contains("foo"));
        assert!(msg.contains("complexType"));
        assert!(msg.contains("unknown element"));
    }

    #[test]
    fn test_parse_error_duplicate_definition() {
        let err = ParseError::DuplicateDefinition {
            name: FullName::new("urn:a", "Foo"),
        };
        let msg = err.to_string();
        assert!(msg.contains("urn:a:Foo"));
        assert!(msg.contains("more than once"));
    }

    #[test]
    fn test_parse_error_duplicate_member() {
        let err = ParseError::DuplicateMember {
            member: "bar".to_string(),
            type_name: "Foo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bar"));
        assert!(msg.contains("Foo"));
    }

    #[test]
    fn test_schema_error_undefined_base() {
        let err = SchemaError::UndefinedBase {
            base: FullName::new("urn:a", "Missing"),
            owner: FullName::new("urn:a", "Derived"),
        };
        let msg = err.to_string();
        assert!(msg.contains("urn:a:Missing"));
        assert!(msg.contains("urn:a:Derived"));
    }

    #[test]
    fn test_schema_error_undefined_group() {
        let err = SchemaError::UndefinedGroup {
            group: FullName::new("urn:a", "attrs"),
            owner: FullName::new("urn:a", "Foo"),
        };
        let msg = err.to_string();
        assert!(msg.contains("urn:a:attrs"));
        assert!(msg.contains("undefined group"));
    }

    #[test]
    fn test_schema_error_from_parse_error() {
        let parse_err = ParseError::missing_attr("schema", "targetNamespace");
        let schema_err: SchemaError = parse_err.into();
        assert!(schema_err.to_string().contains("parse error"));
    }
}
