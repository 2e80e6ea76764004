//! Schema parsing, the second stage of the pipeline.
//!
//! One recursive descent over each loaded document. Every top-level
//! `<element>`, `<complexType>`, `<simpleType>` and `<attributeGroup>` in
//! the XSD namespace becomes a [`TypeDescriptor`]; anonymous inline types
//! are given synthetic names and parsed in place. Cross-references are left
//! as raw [`FullName`]s for the resolver to bind.

use crate::context::GenerationContext;
use crate::descriptor::{DescriptorKind, Member, TypeDescriptor, UNBOUNDED};
use crate::error::ParseError;
use crate::loader::LoadedSchema;
use crate::name::{sanitize, split_qname, FullName, XSD_NAMESPACE};
use crate::xml::{attr_value, skip_subtree, tag_name};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses all top-level declarations of a loaded schema into the context.
///
/// # Errors
/// Returns `ParseError` on malformed XML, missing required attributes,
/// unsupported constructs, or duplicate definitions.
pub fn parse_schema(doc: &LoadedSchema, ctx: &mut GenerationContext) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(&doc.content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if saw_root {
                    parse_top_level(&mut reader, e, false, doc, ctx)?;
                } else {
                    saw_root = true;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if saw_root {
                    parse_top_level(&mut reader, e, true, doc, ctx)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Dispatches one top-level declaration by (namespace, local name).
/// Declarations outside the XSD namespace and unrecognised local names are
/// skipped.
fn parse_top_level(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    doc: &LoadedSchema,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    let tag = tag_name(e)?;
    let (prefix, local) = split_qname(&tag);

    let namespace = if prefix.is_empty() {
        doc.default_namespace.clone()
    } else {
        ctx.ns_prefixes.get(prefix).cloned().unwrap_or_default()
    };

    if namespace != XSD_NAMESPACE
        || !matches!(
            local,
            "element" | "complexType" | "simpleType" | "attributeGroup"
        )
    {
        if !is_empty {
            skip_subtree(reader)?;
        }
        return Ok(());
    }

    let name = attr_value(e, "name")?.unwrap_or_default();
    let full_name = FullName::new(ctx.target_namespace.clone(), name);

    tracing::debug!("new {local}: {}", full_name.local);

    match local {
        "complexType" => {
            let mut desc = TypeDescriptor::new(
                full_name,
                DescriptorKind::Complex,
                ctx.current_schema.clone(),
            );
            if !is_empty {
                parse_complex_body(reader, &mut desc, ctx)?;
            }
            ctx.classes.insert(desc)?;
        }
        "element" => parse_document_element(reader, e, is_empty, full_name, ctx)?,
        "simpleType" => parse_simple_type(reader, is_empty, full_name, ctx)?,
        "attributeGroup" => {
            let mut group = TypeDescriptor::new(
                full_name,
                DescriptorKind::Complex,
                ctx.current_schema.clone(),
            );
            if !is_empty {
                parse_complex_body(reader, &mut group, ctx)?;
            }
            ctx.groups.insert(group)?;
        }
        _ => unreachable!(),
    }

    Ok(())
}

/// Parses a top-level `<element>` into a document descriptor.
///
/// With a `type` attribute the element's type becomes the document's base;
/// without one an inline `<complexType>` is expected and synthesised under
/// the name `<element>Type`.
fn parse_document_element(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    full_name: FullName,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    if let Some(type_attr) = attr_value(e, "type")? {
        let base = ctx.to_full_name(&type_attr);
        let mut desc = TypeDescriptor::with_base(
            full_name,
            DescriptorKind::Complex,
            base,
            ctx.current_schema.clone(),
        );
        desc.is_document = true;
        ctx.classes.insert(desc)?;

        if !is_empty {
            skip_subtree(reader)?;
        }
        return Ok(());
    }

    // anonymous element type, derived from the expected inline <complexType>
    let type_name = FullName::new(
        ctx.target_namespace.clone(),
        format!("{}Type", full_name.local),
    );

    if is_empty || !parse_inline_complex(reader, type_name.clone(), ctx)? {
        tracing::error!(
            "'{}' missing expected child element 'complexType'",
            full_name.local
        );
        return Ok(());
    }

    let mut desc = TypeDescriptor::with_base(
        full_name,
        DescriptorKind::Complex,
        type_name,
        ctx.current_schema.clone(),
    );
    desc.is_document = true;
    ctx.classes.insert(desc)?;

    Ok(())
}

/// Parses a top-level `<simpleType>`. The base is taken from the
/// `<restriction base=…>` child and defaults to the XSD string type.
fn parse_simple_type(
    reader: &mut Reader<&[u8]>,
    is_empty: bool,
    full_name: FullName,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    let mut base = FullName::xsd("string");

    if !is_empty {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if let Some(b) = restriction_base(e, ctx)? {
                        base = b;
                    }
                    // facets and other children are not interpreted
                    skip_subtree(reader)?;
                }
                Ok(Event::Empty(ref e)) => {
                    if let Some(b) = restriction_base(e, ctx)? {
                        base = b;
                    }
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let desc = TypeDescriptor::with_base(
        full_name,
        DescriptorKind::Simple,
        base,
        ctx.current_schema.clone(),
    );
    ctx.classes.insert(desc)?;

    Ok(())
}

/// Returns the resolved `base` of a `<restriction>` tag, if this is one.
fn restriction_base(
    e: &BytesStart<'_>,
    ctx: &GenerationContext,
) -> Result<Option<FullName>, ParseError> {
    let tag = tag_name(e)?;
    if split_qname(&tag).1 != "restriction" {
        return Ok(None);
    }

    let base = attr_value(e, "base")?
        .ok_or_else(|| ParseError::missing_attr("restriction", "base"))?;
    Ok(Some(ctx.to_full_name(&base)))
}

/// Parses the children of an element until its end tag, looking for a
/// single `<complexType>` to materialise under `full_name`. Returns
/// whether one was found.
fn parse_inline_complex(
    reader: &mut Reader<&[u8]>,
    full_name: FullName,
    ctx: &mut GenerationContext,
) -> Result<bool, ParseError> {
    let mut buf = Vec::new();
    let mut found = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = tag_name(e)?;
                if split_qname(&tag).1 == "complexType" && !found {
                    let mut desc = TypeDescriptor::new(
                        full_name.clone(),
                        DescriptorKind::Complex,
                        ctx.current_schema.clone(),
                    );
                    parse_complex_body(reader, &mut desc, ctx)?;
                    ctx.classes.insert(desc)?;
                    found = true;
                } else {
                    skip_subtree(reader)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = tag_name(e)?;
                if split_qname(&tag).1 == "complexType" && !found {
                    let desc = TypeDescriptor::new(
                        full_name.clone(),
                        DescriptorKind::Complex,
                        ctx.current_schema.clone(),
                    );
                    ctx.classes.insert(desc)?;
                    found = true;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(found)
}

/// Parses the body of a `<complexType>` (or of an `<extension>`, which is
/// treated the same way) into `desc`, until the enclosing end tag.
fn parse_complex_body(
    reader: &mut Reader<&[u8]>,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => parse_complex_child(reader, e, false, desc, ctx)?,
            Ok(Event::Empty(ref e)) => parse_complex_child(reader, e, true, desc, ctx)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Dispatches one direct child of a complex-type body.
fn parse_complex_child(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    let tag = tag_name(e)?;
    let local = split_qname(&tag).1;

    match local {
        "sequence" => {
            if !is_empty {
                parse_sequence(reader, desc, ctx, false)?;
            }
        }
        "choice" | "all" => {
            if attr_value(e, "minOccurs")?.is_some() || attr_value(e, "maxOccurs")?.is_some() {
                return Err(ParseError::unsupported(
                    "minOccurs/maxOccurs not currently supported in <choice>/<all> types",
                ));
            }
            if !is_empty {
                parse_sequence(reader, desc, ctx, true)?;
            }
        }
        "complexContent" | "simpleContent" => {
            if !is_empty {
                parse_content_extension(reader, desc, ctx)?;
            } else {
                tracing::error!("'{local}' missing expected child element 'extension'");
            }
        }
        "attribute" => {
            parse_attribute(e, desc, ctx)?;
            if !is_empty {
                skip_subtree(reader)?;
            }
        }
        "attributeGroup" => {
            let group_ref = attr_value(e, "ref")?
                .ok_or_else(|| ParseError::missing_attr("attributeGroup", "ref"))?;
            desc.attribute_group_refs.push(ctx.to_full_name(&group_ref));
            if !is_empty {
                skip_subtree(reader)?;
            }
        }
        "anyAttribute" => {
            if !is_empty {
                skip_subtree(reader)?;
            }
        }
        other => {
            return Err(ParseError::unknown_element(other, "complexType"));
        }
    }

    Ok(())
}

/// Parses `<complexContent>`/`<simpleContent>`: a single `<extension
/// base=…>` child whose body is read as a complex-type body.
fn parse_content_extension(
    reader: &mut Reader<&[u8]>,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut found = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = tag_name(e)?;
                if split_qname(&tag).1 == "extension" {
                    let base = attr_value(e, "base")?
                        .ok_or_else(|| ParseError::missing_attr("extension", "base"))?;
                    desc.base_ref = Some(ctx.to_full_name(&base));
                    found = true;
                    parse_complex_body(reader, desc, ctx)?;
                } else {
                    skip_subtree(reader)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = tag_name(e)?;
                if split_qname(&tag).1 == "extension" {
                    let base = attr_value(e, "base")?
                        .ok_or_else(|| ParseError::missing_attr("extension", "base"))?;
                    desc.base_ref = Some(ctx.to_full_name(&base));
                    found = true;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !found {
        tracing::error!(
            "'{}' missing expected child element 'extension'",
            desc.name.local
        );
    }

    Ok(())
}

/// Parses an `<attribute>` declaration into a member.
fn parse_attribute(
    e: &BytesStart<'_>,
    desc: &mut TypeDescriptor,
    ctx: &GenerationContext,
) -> Result<(), ParseError> {
    let type_attr =
        attr_value(e, "type")?.ok_or_else(|| ParseError::missing_attr("attribute", "type"))?;
    let name =
        attr_value(e, "name")?.ok_or_else(|| ParseError::missing_attr("attribute", "name"))?;

    let required = attr_value(e, "use")?.as_deref() == Some("required");
    let default_literal = attr_value(e, "default")?.unwrap_or_default();

    desc.add_member(Member::attribute(
        name,
        ctx.to_full_name(&type_attr),
        required,
        default_literal,
    ))
}

/// Parses the particles of a `<sequence>`, `<choice>` or `<all>` body.
///
/// In choice mode every member is forced optional. A nested `<sequence>`
/// inside a non-choice sequence flips the whole containing sequence to
/// choice mode, retroactively forcing the members collected so far.
fn parse_sequence(
    reader: &mut Reader<&[u8]>,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
    choice: bool,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut choice = choice;
    let first_new = desc.members.len();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_particle(reader, e, false, desc, ctx, &mut choice, first_new)?;
            }
            Ok(Event::Empty(ref e)) => {
                parse_particle(reader, e, true, desc, ctx, &mut choice, first_new)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Dispatches one particle of a sequence body.
#[allow(clippy::too_many_arguments)]
fn parse_particle(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
    choice: &mut bool,
    first_new: usize,
) -> Result<(), ParseError> {
    let tag = tag_name(e)?;
    let local = split_qname(&tag).1;

    match local {
        "element" => parse_member_element(reader, e, is_empty, desc, ctx, *choice)?,
        "sequence" => {
            if !*choice {
                *choice = true;
                for member in &mut desc.members[first_new..] {
                    member.min_occurs = 0;
                }
            }
            if !is_empty {
                parse_sequence(reader, desc, ctx, true)?;
            }
        }
        "choice" => {
            // choices cannot nest inside choices
            if !*choice && !is_empty {
                parse_sequence(reader, desc, ctx, true)?;
            } else if !is_empty {
                skip_subtree(reader)?;
            }
        }
        _ => {
            if !is_empty {
                skip_subtree(reader)?;
            }
        }
    }

    Ok(())
}

/// Parses one `<element>` particle into a member of `desc`.
fn parse_member_element(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
    desc: &mut TypeDescriptor,
    ctx: &mut GenerationContext,
    choice: bool,
) -> Result<(), ParseError> {
    let name = attr_value(e, "name")?.unwrap_or_default();

    let mut min_occurs = match attr_value(e, "minOccurs")? {
        Some(value) => value
            .parse()
            .map_err(|_| ParseError::invalid_attr("element", "minOccurs", value))?,
        None => 1,
    };
    let max_occurs = match attr_value(e, "maxOccurs")? {
        Some(value) if value == "unbounded" => UNBOUNDED,
        Some(value) => value
            .parse()
            .map_err(|_| ParseError::invalid_attr("element", "maxOccurs", value))?,
        None => 1,
    };

    // all choice elements are optional
    if choice {
        min_occurs = 0;
    }

    if let Some(type_attr) = attr_value(e, "type")? {
        desc.add_member(Member::element(
            name,
            ctx.to_full_name(&type_attr),
            min_occurs,
            max_occurs,
        ))?;
        if !is_empty {
            skip_subtree(reader)?;
        }
        return Ok(());
    }

    if let Some(ref_attr) = attr_value(e, "ref")? {
        let referred = ctx.to_full_name(&ref_attr);
        let type_ref = ctx
            .element_types
            .get(&referred.local)
            .cloned()
            .unwrap_or_default();
        desc.add_member(Member::element(
            sanitize(&ref_attr),
            type_ref,
            min_occurs,
            max_occurs,
        ))?;
        if !is_empty {
            skip_subtree(reader)?;
        }
        return Ok(());
    }

    // no type and no ref: anonymous subtype named parent + "_" + member
    let sub_name = FullName::new(
        desc.name.namespace.clone(),
        format!("{}_{}", desc.name.local, name),
    );

    if is_empty || !parse_inline_complex(reader, sub_name.clone(), ctx)? {
        tracing::error!("'{name}' missing expected child element 'complexType'");
        return Ok(());
    }

    desc.add_member(Member::element(name, sub_name, min_occurs, max_occurs))
}
