//! Header rendering for generated types.

use super::{aggregate_defaults, base_chain, base_header_include, occurs_bound, parent_classname};
use xsdgen_schema::{GenerationContext, Member, TypeDescriptor};

/// Renders the header of a generated type.
///
/// Simple types yield an alias declaration; complex types yield the class
/// definition with factory registration, friends, aggregated defaults and
/// one declaration per member.
#[must_use]
pub fn render_header(ctx: &GenerationContext, desc: &TypeDescriptor, namespace: &str) -> String {
    let classname = &desc.name.local;
    let mut out = String::new();

    out.push_str(&format!("#ifndef XML_{namespace}_{classname}_H\n"));
    out.push_str(&format!("#define XML_{namespace}_{classname}_H\n"));
    out.push_str("#include <memory>\n");
    out.push_str("#include <optional>\n");
    out.push_str("#include <vector>\n");
    out.push('\n');
    out.push_str("#include \"../XMLObject.h\"\n");

    if desc.is_simple() {
        render_alias(ctx, desc, &mut out);
    } else {
        render_class(ctx, desc, namespace, &mut out);
    }

    out.push('\n');
    out.push_str(&format!("#endif // XML_{namespace}_{classname}_H\n"));

    out
}

/// A simple type is an alias for its base.
fn render_alias(ctx: &GenerationContext, desc: &TypeDescriptor, out: &mut String) {
    let base = desc
        .base
        .map(|id| ctx.classes.get(id).sanitized_name.as_str())
        .unwrap_or("XMLObject");

    out.push('\n');
    out.push_str(&format!("typedef {} {};\n", base, desc.name.local));
}

fn render_class(ctx: &GenerationContext, desc: &TypeDescriptor, namespace: &str, out: &mut String) {
    let classname = &desc.name.local;
    let cpp_name = &desc.sanitized_name;

    if let Some(include) = base_header_include(ctx, desc) {
        out.push_str(&format!("#include {include}\n"));
    }

    // include non-builtin member classes and non-simple member classes
    for member in &desc.members {
        if let Some(member_type) = member.type_id.map(|id| ctx.classes.get(id)) {
            if member_type.has_header() {
                out.push_str(&format!("#include \"{}.h\"\n", member_type.name.local));
            }
        }
    }

    out.push('\n');
    out.push_str("/**\n");
    out.push_str(&format!(
        " * @brief The `XML::{namespace}` namespace contains classes from the following XML-schema(s): "
    ));
    for (index, schema) in ctx.schema_files.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("@ref {schema}"));
    }
    out.push_str(".\n");
    out.push_str(" */\n");
    out.push_str(&format!("namespace XML::{namespace} {{\n"));
    out.push('\n');

    // forward declarations break include cycles within the member set
    let mut any_forward = false;
    for member in &desc.members {
        if let Some(member_type) = member.type_id.map(|id| ctx.classes.get(id)) {
            if member_type.has_header() {
                out.push_str(&format!("class {};\n", member_type.sanitized_name));
                any_forward = true;
            }
        }
    }
    if any_forward {
        out.push('\n');
    }

    render_overview_comment(ctx, desc, out);

    out.push_str(&format!(
        "class {cpp_name} : public {} {{\n",
        parent_classname(ctx, desc)
    ));
    out.push_str("\ttemplate<typename T> friend XMLObject* ::XML::createInstance(const Namespace& xmlns, const ClassName& className, const xercesc::DOMElement* element);\n");
    out.push_str("private:\n");
    out.push_str("\tstatic bool registerClass() {\n");
    out.push_str(&format!(
        "\t\tXMLObject::factory[\"{}:{classname}\"] = &createInstance<{cpp_name}>; // register function in factory\n",
        desc.name.namespace
    ));
    out.push_str("\t\treturn true;\n");
    out.push_str("\t};\n");
    out.push_str("\tinline static bool registered = registerClass();\n");
    out.push_str("protected:\n");
    out.push_str(&format!(
        "\t{cpp_name}(const Namespace& xmlns, const ClassName& className, const xercesc::DOMElement* element, const Attributes& defaultAttributes);\n"
    ));
    out.push('\n');

    if !desc.friends.is_empty() {
        for friend in &desc.friends {
            out.push_str(&format!("\tfriend class {friend};\n"));
        }
        out.push('\n');
    }

    out.push_str("public:\n");
    render_defaults(ctx, desc, out);

    for member in &desc.members {
        render_member(ctx, member, out);
    }

    out.push_str("};\n");
    out.push('\n');
    out.push_str(&format!("}} // namespace XML::{namespace}\n"));
}

/// Documentation block listing schema origin and members, inherited ones
/// annotated with the class they come from.
fn render_overview_comment(ctx: &GenerationContext, desc: &TypeDescriptor, out: &mut String) {
    out.push_str("/**\n");
    out.push_str(" * Overview:\n");
    out.push_str(&format!(" * - Element name:  {}\n", desc.sanitized_name));
    out.push_str(&format!(" * - XML-Schema:    {}\n", desc.source_schema));
    out.push_str(&format!(" * - XML-Namespace: {}\n", desc.name.namespace));
    out.push_str(" *\n");
    out.push_str(" * Members:\n");

    for class in base_chain(ctx, desc) {
        for member in &class.members {
            out.push_str(&format!(
                " * - {} : {} [{}..{}]",
                member.name,
                member.type_ref.local,
                member.min_occurs,
                occurs_bound(member.max_occurs)
            ));
            if class.name != desc.name {
                out.push_str(&format!(" (from: {})", class.sanitized_name));
            }
            out.push('\n');
        }
    }

    out.push_str(" *\n");
    out.push_str(&format!(
        " * Automatically generated by xsdgen v{} (https://github.com/xsdgen/xsdgen)\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(" */\n");
}

/// The `defaults` constant aggregates default-bearing members up the base
/// chain; the runtime appends these to parsed elements that lack them.
fn render_defaults(ctx: &GenerationContext, desc: &TypeDescriptor, out: &mut String) {
    out.push_str("\t/// default attributes to be used if they are not explicitly provided\n");
    out.push_str("\tinline static const Attributes defaults = {");

    for (index, (namespace, name, literal)) in aggregate_defaults(ctx, desc).iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push('\n');
        out.push_str(&format!(
            "\t\t{{ .xmlns = \"{namespace}\", .prefix = \"\" , .name = \"{name}\", .value = Value(std::string(\"{literal}\"))}}"
        ));
    }

    out.push('\n');
    out.push_str("\t};\n");
    out.push('\n');
}

fn render_member(ctx: &GenerationContext, member: &Member, out: &mut String) {
    let Some(member_type) = member.type_id.map(|id| ctx.classes.get(id)) else {
        out.push_str(&format!(
            "\t//{} ({}) is undefined\n",
            member.sanitized_name, member.type_ref
        ));
        return;
    };

    let cpp_name = &member.sanitized_name;

    if member.is_attribute {
        if member.is_optional() {
            out.push_str(&format!(
                "\tstd::optional< std::reference_wrapper<Attribute> > {cpp_name}; "
            ));
        } else {
            out.push_str(&format!("\tAttribute& {cpp_name}; "));
        }

        let value_type = if member_type.is_builtin() {
            member_type.classname().to_string()
        } else {
            member_type
                .base
                .map(|id| ctx.classes.get(id).sanitized_name.clone())
                .unwrap_or_else(|| member_type.sanitized_name.clone())
        };
        out.push_str(&format!(
            "///< Attribute value can be expected to be of type '{value_type}'\n"
        ));
    } else if !member_type.is_builtin() {
        let type_name = &member_type.sanitized_name;
        if member.is_array() {
            out.push_str(&format!(
                "\tstd::vector< std::reference_wrapper<{type_name}> > {cpp_name};\n"
            ));
        } else if member.is_optional() {
            out.push_str(&format!(
                "\tstd::optional< std::reference_wrapper<{type_name}> > {cpp_name};\n"
            ));
        } else {
            out.push_str(&format!("\t{type_name}& {cpp_name};\n"));
        }
    } else if member.is_array() {
        out.push_str(&format!(
            "\tstd::vector< std::reference_wrapper<XMLObject> > {cpp_name};\n"
        ));
    } else if member.is_optional() {
        out.push_str(&format!(
            "\tstd::optional< std::reference_wrapper<XMLObject> > {cpp_name};\n"
        ));
    } else {
        out.push_str(&format!("\tXMLObject& {cpp_name};\n"));
    }
}
