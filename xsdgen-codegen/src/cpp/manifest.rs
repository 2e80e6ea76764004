//! Build-manifest rendering.
//!
//! The manifest is a CMake snippet listing the generated sources and
//! headers in emission order, for inclusion in a consuming build.

use xsdgen_schema::{DescriptorId, GenerationContext};

/// Renders the `CMakeLists.txt` manifest over the ordered descriptors.
/// Simple types and built-ins produce no compiled artefacts and are
/// omitted.
#[must_use]
pub fn render_manifest(
    ctx: &GenerationContext,
    order: &[DescriptorId],
    namespace: &str,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("set({namespace}_SOURCES\n"));
    for &id in order {
        let desc = ctx.classes.get(id);
        if !desc.is_simple() {
            out.push_str(&format!("\t{namespace}/{}.cpp\n", desc.name.local));
        }
    }
    out.push_str(")\n");
    out.push('\n');

    out.push_str(&format!("set({namespace}_HEADERS\n"));
    for &id in order {
        let desc = ctx.classes.get(id);
        if !desc.is_simple() {
            out.push_str(&format!("\t{namespace}/{}.h\n", desc.name.local));
        }
    }
    out.push_str(")\n");

    out
}
