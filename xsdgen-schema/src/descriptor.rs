//! Type descriptors and the symbol tables that own them.
//!
//! A [`TypeDescriptor`] is the central entity of the generator: one record
//! per named schema type, carrying inheritance, membership, cardinality and
//! default values. Descriptors are created by the parser, bound by the
//! resolver and read by the emitter.

use crate::error::ParseError;
use crate::name::{sanitize, FullName};
use std::collections::{BTreeSet, HashMap};

/// Marker for `maxOccurs="unbounded"`.
pub const UNBOUNDED: u32 = u32::MAX;

/// Index of a descriptor within its owning [`SymbolTable`].
pub type DescriptorId = usize;

/// Kind of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// A simple type aliasing or restricting another type.
    Simple,
    /// A complex type with attributes and/or child elements.
    Complex,
    /// A pre-populated XSD primitive with a fixed C++ rendering.
    BuiltIn {
        /// The C++ type the primitive renders as.
        cpp_type: &'static str,
    },
}

/// A field of a complex type: an attribute or a child element.
#[derive(Debug, Clone)]
pub struct Member {
    /// Declared name.
    pub name: String,
    /// Name transformed to a valid C++ identifier.
    pub sanitized_name: String,
    /// Declared type reference, resolved in the second pass.
    pub type_ref: FullName,
    /// Resolved type, if any. `None` after resolution means the reference
    /// could not be bound; such members render as comment stubs.
    pub type_id: Option<DescriptorId>,
    /// Minimum occurrence count.
    pub min_occurs: u32,
    /// Maximum occurrence count, [`UNBOUNDED`] for `unbounded`.
    pub max_occurs: u32,
    /// True for an attribute, false for a child element.
    pub is_attribute: bool,
    /// Default value literal, empty if none.
    pub default_literal: String,
}

impl Member {
    /// Creates an element member with the given cardinality.
    #[must_use]
    pub fn element(name: impl Into<String>, type_ref: FullName, min: u32, max: u32) -> Self {
        let name = name.into();
        Self {
            sanitized_name: sanitize(&name),
            name,
            type_ref,
            type_id: None,
            min_occurs: min,
            max_occurs: max,
            is_attribute: false,
            default_literal: String::new(),
        }
    }

    /// Creates an attribute member.
    #[must_use]
    pub fn attribute(
        name: impl Into<String>,
        type_ref: FullName,
        required: bool,
        default_literal: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            sanitized_name: sanitize(&name),
            name,
            type_ref,
            type_id: None,
            min_occurs: u32::from(required),
            max_occurs: 1,
            is_attribute: true,
            default_literal: default_literal.into(),
        }
    }

    /// Returns true if the member may occur more than once.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.max_occurs > 1
    }

    /// Returns true if the member is optional and not an array.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.min_occurs == 0 && self.max_occurs == 1
    }

    /// Returns true if the member occurs exactly once.
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.is_array() && !self.is_optional()
    }
}

/// In-memory record of one schema type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Qualified name; immutable after construction.
    pub name: FullName,
    /// Local name transformed to a valid C++ identifier.
    pub sanitized_name: String,
    /// Descriptor kind.
    pub kind: DescriptorKind,
    /// True when the type originated from a top-level `<element>`; such
    /// types are entry points for a document.
    pub is_document: bool,
    /// Declared base type, if any.
    pub base_ref: Option<FullName>,
    /// Resolved base descriptor; set by the resolver.
    pub base: Option<DescriptorId>,
    /// Members in declared order. The order is observable: it governs
    /// field order in generated code.
    pub members: Vec<Member>,
    /// Attribute groups referenced by this type, spliced by the resolver.
    pub attribute_group_refs: Vec<FullName>,
    /// Sanitised names of types that need construction access to this one.
    pub friends: BTreeSet<String>,
    /// Schema file this type was declared in, for documentation comments.
    pub source_schema: String,
}

impl TypeDescriptor {
    /// Creates a descriptor without a base type.
    #[must_use]
    pub fn new(name: FullName, kind: DescriptorKind, source_schema: impl Into<String>) -> Self {
        Self {
            sanitized_name: sanitize(&name.local),
            name,
            kind,
            is_document: false,
            base_ref: None,
            base: None,
            members: Vec::new(),
            attribute_group_refs: Vec::new(),
            friends: BTreeSet::new(),
            source_schema: source_schema.into(),
        }
    }

    /// Creates a descriptor with a declared base type.
    #[must_use]
    pub fn with_base(
        name: FullName,
        kind: DescriptorKind,
        base_ref: FullName,
        source_schema: impl Into<String>,
    ) -> Self {
        let mut desc = Self::new(name, kind, source_schema);
        desc.base_ref = Some(base_ref);
        desc
    }

    /// Returns true for simple types, including built-ins.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(
            self.kind,
            DescriptorKind::Simple | DescriptorKind::BuiltIn { .. }
        )
    }

    /// Returns true for pre-populated primitives.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, DescriptorKind::BuiltIn { .. })
    }

    /// Returns true if a base type was declared.
    #[must_use]
    pub fn has_base(&self) -> bool {
        self.base_ref.is_some()
    }

    /// Returns the name with which generated code refers to this type:
    /// the fixed C++ rendering for built-ins, the local name otherwise.
    #[must_use]
    pub fn classname(&self) -> &str {
        match self.kind {
            DescriptorKind::BuiltIn { cpp_type } => cpp_type,
            _ => &self.name.local,
        }
    }

    /// Returns true if the type has a generated header of its own.
    /// Built-ins render as plain C++ types and have none.
    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.is_builtin()
    }

    /// Appends a member, rejecting duplicate names within this type.
    pub fn add_member(&mut self, member: Member) -> Result<(), ParseError> {
        if self.members.iter().any(|m| m.name == member.name) {
            return Err(ParseError::DuplicateMember {
                member: member.name,
                type_name: self.name.local.clone(),
            });
        }

        if member.max_occurs == UNBOUNDED {
            tracing::debug!(
                "{} got {} {}: at least {}",
                self.name.local,
                member.type_ref,
                member.name,
                member.min_occurs
            );
        } else if member.min_occurs == member.max_occurs {
            tracing::debug!(
                "{} got {} {}: exactly {}",
                self.name.local,
                member.type_ref,
                member.name,
                member.min_occurs
            );
        } else {
            tracing::debug!(
                "{} got {} {}: between {}-{}",
                self.name.local,
                member.type_ref,
                member.name,
                member.min_occurs,
                member.max_occurs
            );
        }

        self.members.push(member);
        Ok(())
    }
}

/// Insertion-ordered collection of descriptors indexed by qualified name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<TypeDescriptor>,
    index: HashMap<FullName, DescriptorId>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor and returns its id.
    ///
    /// A name already present is a fatal duplicate unless the existing
    /// entry has no members, in which case the new definition overwrites
    /// the placeholder in place, keeping its insertion position. This
    /// supports forward-declared references whose type is parsed later.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Result<DescriptorId, ParseError> {
        if let Some(&id) = self.index.get(&descriptor.name) {
            if self.entries[id].members.is_empty() {
                self.entries[id] = descriptor;
                return Ok(id);
            }
            return Err(ParseError::DuplicateDefinition {
                name: descriptor.name,
            });
        }

        let id = self.entries.len();
        self.index.insert(descriptor.name.clone(), id);
        self.entries.push(descriptor);
        Ok(id)
    }

    /// Looks up a descriptor id by exact qualified name.
    #[must_use]
    pub fn get_id(&self, name: &FullName) -> Option<DescriptorId> {
        self.index.get(name).copied()
    }

    /// Finds a descriptor id by exact match, falling back to a name-only
    /// search over insertion order when the namespace does not match.
    /// The fallback tolerates schemas that omit namespace prefixes.
    #[must_use]
    pub fn find(&self, name: &FullName) -> Option<DescriptorId> {
        self.get_id(name)
            .or_else(|| self.entries.iter().position(|d| d.name.local == name.local))
    }

    /// Returns the descriptor with the given id.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> &TypeDescriptor {
        &self.entries[id]
    }

    /// Returns the descriptor with the given id mutably.
    pub fn get_mut(&mut self, id: DescriptorId) -> &mut TypeDescriptor {
        &mut self.entries[id]
    }

    /// Number of descriptors in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.entries.iter()
    }

    /// Iterates `(id, descriptor)` pairs in insertion order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (DescriptorId, &TypeDescriptor)> {
        self.entries.iter().enumerate()
    }
}
