//! Qualified names and identifier sanitisation.
//!
//! A type is identified by its [`FullName`], the pair of namespace URI and
//! local name. Raw QNames such as `xs:int` or `tns:Foo` are resolved against
//! the per-schema prefix table before lookup.

use std::collections::HashMap;
use std::fmt;

/// Namespace URI of the XML Schema Definition language.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Unique identifier of a type: namespace URI plus local name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullName {
    /// Namespace URI.
    pub namespace: String,
    /// Local name within the namespace.
    pub local: String,
}

impl FullName {
    /// Creates a full name from namespace URI and local name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Creates a full name in the XSD namespace.
    #[must_use]
    pub fn xsd(local: impl Into<String>) -> Self {
        Self::new(XSD_NAMESPACE, local)
    }

    /// Returns true if both components are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.local.is_empty()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.local)
    }
}

/// Splits a raw QName on its last colon into `(prefix, local)`.
///
/// An unprefixed name yields an empty prefix.
#[must_use]
pub fn split_qname(qname: &str) -> (&str, &str) {
    match qname.rfind(':') {
        Some(pos) => (&qname[..pos], &qname[pos + 1..]),
        None => ("", qname),
    }
}

/// Resolves a raw QName to a [`FullName`].
///
/// The prefix is looked up in the prefix table; an unprefixed name inherits
/// the ambient default namespace. An unknown prefix maps to the empty
/// namespace and will only resolve through the name-only fallback later.
#[must_use]
pub fn to_full_name(
    qname: &str,
    default_namespace: &str,
    prefixes: &HashMap<String, String>,
) -> FullName {
    let (prefix, local) = split_qname(qname);

    if prefix.is_empty() {
        return FullName::new(default_namespace, local);
    }

    let namespace = prefixes.get(prefix).cloned().unwrap_or_default();
    FullName::new(namespace, local)
}

/// Maps a local name to a valid C++ identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`; a result that
/// collides with a C++ keyword gains a trailing `_`.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    if CPP_KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }

    out
}

// https://en.cppreference.com/w/cpp/keyword
const CPP_KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "and",
    "and_eq",
    "asm",
    "atomic_cancel",
    "atomic_commit",
    "atomic_noexcept",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char8_t",
    "char16_t",
    "char32_t",
    "class",
    "compl",
    "concept",
    "const",
    "consteval",
    "constexpr",
    "constinit",
    "const_cast",
    "continue",
    "co_await",
    "co_return",
    "co_yield",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "not",
    "not_eq",
    "nullptr",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "reflexpr",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "synchronized",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_display() {
        let name = FullName::new("urn:a", "Foo");
        assert_eq!(name.to_string(), "urn:a:Foo");
    }

    #[test]
    fn test_full_name_is_empty() {
        assert!(FullName::default().is_empty());
        assert!(!FullName::new("", "Foo").is_empty());
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("xs:int"), ("xs", "int"));
        assert_eq!(split_qname("Foo"), ("", "Foo"));
        assert_eq!(split_qname("a:b:c"), ("a:b", "c"));
    }

    #[test]
    fn test_to_full_name_prefixed() {
        let mut prefixes = HashMap::new();
        prefixes.insert("xs".to_string(), XSD_NAMESPACE.to_string());
        let name = to_full_name("xs:int", "urn:a", &prefixes);
        assert_eq!(name, FullName::xsd("int"));
    }

    #[test]
    fn test_to_full_name_unprefixed_uses_default() {
        let prefixes = HashMap::new();
        let name = to_full_name("Foo", "urn:a", &prefixes);
        assert_eq!(name, FullName::new("urn:a", "Foo"));
    }

    #[test]
    fn test_to_full_name_unknown_prefix() {
        let prefixes = HashMap::new();
        let name = to_full_name("zz:Foo", "urn:a", &prefixes);
        assert_eq!(name, FullName::new("", "Foo"));
    }

    #[test]
    fn test_sanitize_passthrough() {
        assert_eq!(sanitize("Foo_1"), "Foo_1");
    }

    #[test]
    fn test_sanitize_bad_characters() {
        assert_eq!(sanitize("a.b:c-d"), "a_b_c_d");
        assert_eq!(sanitize("tns:Foo"), "tns_Foo");
    }

    #[test]
    fn test_sanitize_keyword() {
        assert_eq!(sanitize("class"), "class_");
        assert_eq!(sanitize("operator"), "operator_");
        assert_eq!(sanitize("Class"), "Class");
    }

    #[test]
    fn test_sanitize_keyword_after_replacement() {
        // "new." sanitises to "new_", which is not a keyword
        assert_eq!(sanitize("new."), "new_");
        assert_eq!(sanitize("new"), "new_");
    }

    #[test]
    fn test_sanitize_output_charset() {
        for input in ["a b", "x&y", "über", "1:2:3", "it's"] {
            let out = sanitize(input);
            assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
