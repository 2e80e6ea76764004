//! Emission ordering.
//!
//! Descriptors are emitted so that a base type always precedes its
//! derivatives. The order is otherwise the insertion order of the class
//! table, which makes the generated tree a deterministic function of the
//! input schema list.

use crate::error::CodegenError;
use xsdgen_schema::{DescriptorId, GenerationContext, SchemaError};

/// Produces a topological ordering of all class descriptors.
///
/// Repeatedly takes, in insertion order, any descriptor whose base is
/// already placed or absent. XSD forbids cyclic inheritance, so the
/// procedure terminates on valid input; a cycle introduced by the
/// name-only lookup fallback is reported rather than looping.
///
/// # Errors
/// Returns `CodegenError` if the remaining descriptors form a cycle.
pub fn topological_order(ctx: &GenerationContext) -> Result<Vec<DescriptorId>, CodegenError> {
    let count = ctx.classes.len();
    let mut placed = vec![false; count];
    let mut sorted = Vec::with_capacity(count);

    while sorted.len() < count {
        let mut progressed = false;

        for (id, desc) in ctx.classes.iter_with_ids() {
            if placed[id] {
                continue;
            }
            if desc.base.map_or(true, |base| placed[base]) {
                placed[id] = true;
                sorted.push(id);
                progressed = true;
            }
        }

        if !progressed {
            let stuck: Vec<String> = ctx
                .classes
                .iter_with_ids()
                .filter(|(id, _)| !placed[*id])
                .map(|(_, d)| d.name.to_string())
                .collect();
            return Err(CodegenError::Schema(SchemaError::CircularReference {
                path: stuck.join(" -> "),
            }));
        }
    }

    Ok(sorted)
}
