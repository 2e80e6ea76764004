//! The fixed C++ runtime shipped with every generated tree.
//!
//! `XMLObject` is the root class of all generated types: it holds the
//! parsed element name, namespace, attributes, text content and children,
//! owns the factory that dispatches on `"<namespace>:<localName>"`, and
//! provides the typed and by-name accessors the generated constructors
//! call. The pair is emitted verbatim next to the generated namespace
//! directory.

/// Contents of the emitted `XMLObject.h`.
pub const XML_OBJECT_H: &str = include_str!("../resources/XMLObject.h");

/// Contents of the emitted `XMLObject.cpp`.
pub const XML_OBJECT_CPP: &str = include_str!("../resources/XMLObject.cpp");
