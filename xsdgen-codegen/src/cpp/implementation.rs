//! Implementation rendering: the generated constructor.
//!
//! The constructor forwards the four runtime arguments to the base class
//! and initialises every resolved member through the runtime accessor
//! matching its kind and cardinality.

use super::parent_classname;
use xsdgen_schema::{GenerationContext, Member, TypeDescriptor};

/// Renders the implementation file of a complex type.
#[must_use]
pub fn render_implementation(
    ctx: &GenerationContext,
    desc: &TypeDescriptor,
    namespace: &str,
) -> String {
    let classname = &desc.name.local;
    let cpp_name = &desc.sanitized_name;
    let mut out = String::new();

    out.push_str(&format!("#include \"{classname}.h\"\n"));
    out.push('\n');
    out.push_str("using namespace XML;\n");
    out.push_str(&format!("using namespace XML::{namespace};\n"));
    out.push('\n');

    out.push_str(&format!(
        "{cpp_name}::{cpp_name}(const Namespace& xmlns, const ClassName& className, const xercesc::DOMElement* element, const Attributes& defaultAttributes) :\n"
    ));
    out.push_str(&format!(
        "\t{}(xmlns, className, element, defaultAttributes)\n",
        parent_classname(ctx, desc)
    ));

    for member in &desc.members {
        render_initializer(ctx, member, &mut out);
    }

    out.push_str("{\n");
    out.push_str("}\n");

    out
}

/// One member initialiser, dispatched on the accessor table.
fn render_initializer(ctx: &GenerationContext, member: &Member, out: &mut String) {
    // unresolved members are declared as comment stubs and not initialised
    let Some(member_type) = member.type_id.map(|id| ctx.classes.get(id)) else {
        return;
    };

    let cpp_name = &member.sanitized_name;

    if member.is_attribute {
        if member.is_optional() {
            out.push_str(&format!(
                "\t, {cpp_name}(getOptionalAttributeByName(\"{}\"))\n",
                member.name
            ));
        } else {
            out.push_str(&format!(
                "\t, {cpp_name}(getRequiredAttributeByName(\"{}\"))\n",
                member.name
            ));
        }
    } else if !member_type.is_builtin() {
        let type_name = &member_type.sanitized_name;
        if member.is_array() {
            out.push_str(&format!("\t, {cpp_name}(getChildren<{type_name}>())\n"));
        } else if member.is_optional() {
            out.push_str(&format!(
                "\t, {cpp_name}(getOptionalChild<{type_name}>())\n"
            ));
        } else {
            out.push_str(&format!(
                "\t, {cpp_name}(getRequiredChild<{type_name}>())\n"
            ));
        }
    } else if member.is_array() {
        out.push_str(&format!(
            "\t, {cpp_name}(getChildrenByName(\"{}\"))\n",
            member.name
        ));
    } else if member.is_optional() {
        out.push_str(&format!(
            "\t, {cpp_name}(getOptionalChildByName(\"{}\"))\n",
            member.name
        ));
    } else {
        out.push_str(&format!(
            "\t, {cpp_name}(getRequiredChildByName(\"{}\"))\n",
            member.name
        ));
    }
}
