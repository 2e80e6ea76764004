//! C++ artefact rendering.
//!
//! Each generated type yields a header and, for complex types, an
//! implementation file. Rendering builds the whole artefact in memory so
//! the incremental writer can diff it against the file on disk.

pub mod header;
pub mod implementation;
pub mod manifest;

pub use header::render_header;
pub use implementation::render_implementation;
pub use manifest::render_manifest;

use xsdgen_schema::{GenerationContext, TypeDescriptor, UNBOUNDED};

/// Returns the descriptor chain from `desc` up to its root ancestor,
/// derived first.
pub(crate) fn base_chain<'a>(
    ctx: &'a GenerationContext,
    desc: &'a TypeDescriptor,
) -> Vec<&'a TypeDescriptor> {
    let mut chain = vec![desc];
    let mut current = desc;

    while let Some(base) = current.base {
        current = ctx.classes.get(base);
        // the name-only fallback can in principle bind a cycle; the
        // topological pass rejects those before rendering runs
        if chain.iter().any(|c| c.name == current.name) {
            break;
        }
        chain.push(current);
    }

    chain
}

/// Aggregates the default-bearing members of `desc` and all its ancestors
/// in base-to-derived order. Duplicate `(namespace, name)` pairs collapse
/// to one entry, the most derived literal winning.
pub(crate) fn aggregate_defaults(
    ctx: &GenerationContext,
    desc: &TypeDescriptor,
) -> Vec<(String, String, String)> {
    let namespace = &desc.name.namespace;
    let mut defaults: Vec<(String, String, String)> = Vec::new();

    let mut chain = base_chain(ctx, desc);
    chain.reverse();

    for class in chain {
        for member in &class.members {
            if member.default_literal.is_empty() {
                continue;
            }

            if let Some(existing) = defaults.iter_mut().find(|(_, name, _)| *name == member.name)
            {
                existing.2 = member.default_literal.clone();
            } else {
                defaults.push((
                    namespace.clone(),
                    member.name.clone(),
                    member.default_literal.clone(),
                ));
            }
        }
    }

    defaults
}

/// Returns the quoted header include of the nearest ancestor that has a
/// generated header, skipping simple aliases. Built-in ancestors render as
/// plain C++ types and need no include.
pub(crate) fn base_header_include(
    ctx: &GenerationContext,
    desc: &TypeDescriptor,
) -> Option<String> {
    let mut current = desc.base;

    while let Some(id) = current {
        let base = ctx.classes.get(id);
        if base.is_builtin() {
            return None;
        }
        if !base.is_simple() {
            return Some(format!("\"{}.h\"", base.name.local));
        }
        current = base.base;
    }

    None
}

/// Name of the class the generated type inherits from: the base when it is
/// a generated complex type, the runtime root otherwise.
pub(crate) fn parent_classname<'a>(
    ctx: &'a GenerationContext,
    desc: &'a TypeDescriptor,
) -> &'a str {
    match desc.base.map(|id| ctx.classes.get(id)) {
        Some(base) if !base.is_simple() => &base.sanitized_name,
        _ => "XMLObject",
    }
}

/// Formats an occurrence bound, `*` for unbounded.
pub(crate) fn occurs_bound(max: u32) -> String {
    if max == UNBOUNDED {
        "*".to_string()
    } else {
        max.to_string()
    }
}
