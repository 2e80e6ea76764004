//! Schema loading, the first stage of the pipeline.
//!
//! For each input path the loader reads the document, extracts the
//! mandatory `targetNamespace`, records the schema's namespace-prefix
//! declarations, and enumerates the top-level `<element name=… type=…>`
//! declarations into the element-type lookup that `ref=` members resolve
//! against. The content is kept so the parser can make its own pass.

use crate::context::GenerationContext;
use crate::error::ParseError;
use crate::name::split_qname;
use crate::xml::{attr_value, tag_name};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// A schema file read and surveyed, ready for the parsing stage.
#[derive(Debug)]
pub struct LoadedSchema {
    /// File name used for documentation stamps.
    pub file_name: String,
    /// Full document text.
    pub content: String,
    /// The schema's target namespace.
    pub target_namespace: String,
    /// Default element namespace declared with `xmlns=`, empty if none.
    pub default_namespace: String,
}

#[derive(Default)]
struct Survey {
    target_namespace: Option<String>,
    default_namespace: String,
    prefix_decls: Vec<(String, String)>,
    // (element name, raw type QName); resolved once the tns is known
    element_decls: Vec<(String, String)>,
}

impl Survey {
    fn record_root(&mut self, e: &BytesStart<'_>) -> Result<(), ParseError> {
        for attr in e.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = std::str::from_utf8(&attr.value)?.to_string();

            if key == "targetNamespace" {
                self.target_namespace = Some(value);
            } else if key == "xmlns" {
                self.default_namespace = value;
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.prefix_decls.push((prefix.to_string(), value));
            }
        }

        Ok(())
    }

    fn record_declaration(&mut self, e: &BytesStart<'_>) -> Result<(), ParseError> {
        let tag = tag_name(e)?;

        if split_qname(&tag).1 == "element" {
            if let (Some(name), Some(type_attr)) = (attr_value(e, "name")?, attr_value(e, "type")?)
            {
                self.element_decls.push((name, type_attr));
            }
        }

        Ok(())
    }
}

/// Loads one schema file and primes the context for parsing it.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read, the XML is malformed,
/// or the root element lacks a `targetNamespace`.
pub fn load_schema(path: &Path, ctx: &mut GenerationContext) -> Result<LoadedSchema, ParseError> {
    let content = fs::read_to_string(path)?;
    let file_name = path.file_name().map_or_else(
        || path.display().to_string(),
        |s| s.to_string_lossy().into_owned(),
    );

    load_schema_str(content, &file_name, ctx)
}

/// Loads a schema from an in-memory document.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or the root element lacks
/// a `targetNamespace`.
pub fn load_schema_str(
    content: String,
    file_name: &str,
    ctx: &mut GenerationContext,
) -> Result<LoadedSchema, ParseError> {
    let survey = survey_schema(&content)?;

    let target_namespace = survey
        .target_namespace
        .ok_or_else(|| ParseError::missing_attr("schema", "targetNamespace"))?;

    tracing::debug!("target namespace: {target_namespace}");

    ctx.enter_schema(file_name, &target_namespace);
    for (prefix, uri) in survey.prefix_decls {
        ctx.ns_prefixes.insert(prefix, uri);
    }
    for (name, type_attr) in survey.element_decls {
        let full = ctx.to_full_name(&type_attr);
        ctx.element_types.insert(name, full);
    }

    Ok(LoadedSchema {
        file_name: file_name.to_string(),
        content,
        target_namespace,
        default_namespace: survey.default_namespace,
    })
}

/// Single streaming pass over the document: root attributes plus the
/// depth-one declarations.
fn survey_schema(content: &str) -> Result<Survey, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut survey = Survey::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth == 0 {
                    survey.record_root(e)?;
                } else if depth == 1 {
                    survey.record_declaration(e)?;
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 {
                    survey.record_root(e)?;
                } else if depth == 1 {
                    survey.record_declaration(e)?;
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::{FullName, XSD_NAMESPACE};
    use std::io::Write;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:other="urn:other"
           targetNamespace="urn:a">
    <xs:element name="root" type="tns:RootType"/>
    <xs:complexType name="RootType">
        <xs:sequence>
            <xs:element name="leaf" type="xs:string"/>
        </xs:sequence>
    </xs:complexType>
</xs:schema>"#;

    fn write_schema(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_schema_extracts_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "a.xsd", SCHEMA);

        let mut ctx = GenerationContext::new();
        let doc = load_schema(&path, &mut ctx).unwrap();

        assert_eq!(doc.file_name, "a.xsd");
        assert_eq!(doc.target_namespace, "urn:a");
        assert_eq!(ctx.ns_prefixes["xs"], XSD_NAMESPACE);
        assert_eq!(ctx.ns_prefixes["other"], "urn:other");
        assert_eq!(ctx.ns_prefixes["tns"], "urn:a");
    }

    #[test]
    fn test_load_schema_builds_element_type_lut() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "a.xsd", SCHEMA);

        let mut ctx = GenerationContext::new();
        load_schema(&path, &mut ctx).unwrap();

        assert_eq!(
            ctx.element_types.get("root"),
            Some(&FullName::new("urn:a", "RootType"))
        );
    }

    #[test]
    fn test_load_schema_missing_target_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(
            dir.path(),
            "a.xsd",
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#,
        );

        let mut ctx = GenerationContext::new();
        let err = load_schema(&path, &mut ctx).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_load_schema_missing_file() {
        let mut ctx = GenerationContext::new();
        let err = load_schema(Path::new("/nonexistent/nowhere.xsd"), &mut ctx).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
