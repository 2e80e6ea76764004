//! End-to-end generation tests: schemas in, generated tree out.

use std::fs;
use std::path::Path;
use xsdgen_codegen::{generate, CodegenOptions, FileStatus, GenerateReport};
use xsdgen_schema::{load_schema, parse_schema, resolve, GenerationContext};

const SCENARIO_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:complexType name="Foo">
        <xs:sequence>
            <xs:element name="bar" type="xs:int" minOccurs="0" maxOccurs="unbounded"/>
        </xs:sequence>
        <xs:attribute name="id" type="xs:string" use="required"/>
    </xs:complexType>
</xs:schema>"#;

const SCENARIO_B: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:complexType name="Base">
        <xs:attribute name="k" type="xs:string"/>
    </xs:complexType>
    <xs:complexType name="Derived">
        <xs:complexContent>
            <xs:extension base="tns:Base">
                <xs:sequence>
                    <xs:element name="v" type="xs:string"/>
                </xs:sequence>
            </xs:extension>
        </xs:complexContent>
    </xs:complexType>
</xs:schema>"#;

fn run(
    schemas: &[(&str, &str)],
    out_dir: &Path,
    dry_run: bool,
) -> (GenerationContext, GenerateReport) {
    let schema_dir = tempfile::tempdir().unwrap();

    let mut ctx = GenerationContext::new();
    for (name, content) in schemas {
        let path = schema_dir.path().join(name);
        fs::write(&path, content).unwrap();
        let doc = load_schema(&path, &mut ctx).unwrap();
        parse_schema(&doc, &mut ctx).unwrap();
    }
    resolve(&mut ctx).unwrap();

    let options = CodegenOptions {
        namespace: "models".to_string(),
        output_dir: out_dir.to_path_buf(),
        dry_run,
    };
    let report = generate(&ctx, &options).unwrap();
    (ctx, report)
}

#[test]
fn scenario_a_single_complex_type() {
    let out = tempfile::tempdir().unwrap();
    let (_, report) = run(&[("a.xsd", SCENARIO_A)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/Foo.h")).unwrap();
    assert!(header.contains("class Foo : public XMLObject {"));
    assert!(header.contains("\tAttribute& id; "));
    assert!(header.contains("\tstd::vector< std::reference_wrapper<XMLObject> > bar;\n"));
    assert!(header.contains("XMLObject::factory[\"urn:a:Foo\"]"));
    assert!(header.contains("inline static const Attributes defaults = {\n\t};"));

    let implementation = fs::read_to_string(out.path().join("models/Foo.cpp")).unwrap();
    assert!(implementation.contains("\t, id(getRequiredAttributeByName(\"id\"))\n"));
    assert!(implementation.contains("\t, bar(getChildrenByName(\"bar\"))\n"));

    // the fixed runtime is emitted verbatim next to the namespace dir
    assert!(out.path().join("XMLObject.h").exists());
    assert!(out.path().join("XMLObject.cpp").exists());
    assert!(report.changed());
}

#[test]
fn scenario_b_inheritance() {
    let out = tempfile::tempdir().unwrap();
    run(&[("b.xsd", SCENARIO_B)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/Derived.h")).unwrap();
    assert!(header.contains("#include \"Base.h\""));
    assert!(header.contains("class Derived : public Base {"));

    let manifest = fs::read_to_string(out.path().join("models/CMakeLists.txt")).unwrap();
    let base = manifest.find("models/Base.cpp").unwrap();
    let derived = manifest.find("models/Derived.cpp").unwrap();
    assert!(base < derived);
}

#[test]
fn scenario_c_default_aggregated_up_base_chain() {
    let schema = SCENARIO_B.replace(
        r#"<xs:attribute name="k" type="xs:string"/>"#,
        r#"<xs:attribute name="k" type="xs:string" default="7"/>"#,
    );
    let out = tempfile::tempdir().unwrap();
    run(&[("b.xsd", &schema)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/Derived.h")).unwrap();
    assert!(header.contains(
        "{ .xmlns = \"urn:a\", .prefix = \"\" , .name = \"k\", .value = Value(std::string(\"7\"))}"
    ));
    assert_eq!(header.matches(".name = \"k\"").count(), 1);
}

#[test]
fn scenario_d_forward_reference() {
    let schema = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:complexType name="Foo">
        <xs:sequence>
            <xs:element name="x" type="tns:Bar"/>
        </xs:sequence>
    </xs:complexType>
    <xs:complexType name="Bar">
        <xs:attribute name="id" type="xs:string"/>
    </xs:complexType>
</xs:schema>"#;
    let out = tempfile::tempdir().unwrap();
    run(&[("fwd.xsd", schema)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/Foo.h")).unwrap();
    assert!(header.contains("\tBar& x;\n"));
    assert!(header.contains("#include \"Bar.h\""));
}

#[test]
fn scenario_e_unresolved_optional_child() {
    let schema = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:complexType name="Foo">
        <xs:sequence>
            <xs:element name="x" type="tns:Missing" minOccurs="0"/>
        </xs:sequence>
    </xs:complexType>
</xs:schema>"#;
    let out = tempfile::tempdir().unwrap();
    run(&[("e.xsd", schema)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/Foo.h")).unwrap();
    assert!(header.contains("\t//x (urn:a:Missing) is undefined\n"));
}

#[test]
fn scenario_f_dry_run_stability() {
    let out = tempfile::tempdir().unwrap();

    // dry run against an empty directory: everything would be new
    let (_, report) = run(&[("a.xsd", SCENARIO_A)], out.path(), true);
    assert!(report.changed());
    assert!(report.files.iter().all(|f| f.status == FileStatus::New));
    assert!(!out.path().join("models").exists());

    // real run: same set, reported new
    let (_, report) = run(&[("a.xsd", SCENARIO_A)], out.path(), false);
    assert!(report.changed());
    assert!(report.files.iter().all(|f| f.status == FileStatus::New));

    // dry run again: nothing left to change
    let (_, report) = run(&[("a.xsd", SCENARIO_A)], out.path(), true);
    assert!(!report.changed());
}

#[test]
fn second_run_is_idempotent() {
    let out = tempfile::tempdir().unwrap();
    run(&[("a.xsd", SCENARIO_A), ("b.xsd", SCENARIO_B)], out.path(), false);
    let (_, report) = run(&[("a.xsd", SCENARIO_A), ("b.xsd", SCENARIO_B)], out.path(), false);

    assert!(!report.changed());
    assert!(report
        .files
        .iter()
        .all(|f| f.status == FileStatus::Unchanged));
}

#[test]
fn changing_one_type_touches_only_its_files() {
    let out = tempfile::tempdir().unwrap();
    run(&[("a.xsd", SCENARIO_A), ("b.xsd", SCENARIO_B)], out.path(), false);

    // change only Foo's attribute default; Base/Derived must stay untouched
    let changed_a = SCENARIO_A.replace(
        r#"<xs:attribute name="id" type="xs:string" use="required"/>"#,
        r#"<xs:attribute name="id" type="xs:string" use="required"/>
        <xs:attribute name="extra" type="xs:string" default="x"/>"#,
    );
    let (_, report) = run(&[("a.xsd", &changed_a), ("b.xsd", SCENARIO_B)], out.path(), false);

    assert_eq!(report.statuses_of("Foo.h"), [FileStatus::Modified]);
    assert_eq!(report.statuses_of("Foo.cpp"), [FileStatus::Modified]);
    assert_eq!(report.statuses_of("Base.h"), [FileStatus::Unchanged]);
    assert_eq!(report.statuses_of("Base.cpp"), [FileStatus::Unchanged]);
    assert_eq!(report.statuses_of("Derived.h"), [FileStatus::Unchanged]);
    assert_eq!(report.statuses_of("XMLObject.h"), [FileStatus::Unchanged]);
}

#[test]
fn document_entry_point_generated() {
    let schema = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:element name="definitions" type="tns:Definitions"/>
    <xs:complexType name="Definitions">
        <xs:sequence>
            <xs:element name="item" type="xs:string" maxOccurs="unbounded"/>
        </xs:sequence>
    </xs:complexType>
</xs:schema>"#;
    let out = tempfile::tempdir().unwrap();
    run(&[("doc.xsd", schema)], out.path(), false);

    let header = fs::read_to_string(out.path().join("models/definitions.h")).unwrap();
    assert!(header.contains("class definitions : public Definitions {"));
    assert!(header.contains("XMLObject::factory[\"urn:a:definitions\"]"));

    let manifest = fs::read_to_string(out.path().join("models/CMakeLists.txt")).unwrap();
    let base = manifest.find("models/Definitions.cpp").unwrap();
    let doc = manifest.find("models/definitions.cpp").unwrap();
    assert!(base < doc);
}

#[test]
fn simple_types_emit_header_only() {
    let schema = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
    <xs:simpleType name="Grade">
        <xs:restriction base="xs:string"/>
    </xs:simpleType>
</xs:schema>"#;
    let out = tempfile::tempdir().unwrap();
    run(&[("s.xsd", schema)], out.path(), false);

    assert!(out.path().join("models/Grade.h").exists());
    assert!(!out.path().join("models/Grade.cpp").exists());

    let manifest = fs::read_to_string(out.path().join("models/CMakeLists.txt")).unwrap();
    assert!(!manifest.contains("Grade"));
}

#[test]
fn manifest_order_is_linear_extension_of_base_relation() {
    let out = tempfile::tempdir().unwrap();
    let (ctx, _) = run(&[("a.xsd", SCENARIO_A), ("b.xsd", SCENARIO_B)], out.path(), false);

    let manifest = fs::read_to_string(out.path().join("models/CMakeLists.txt")).unwrap();

    for desc in ctx.classes.iter() {
        if desc.is_simple() {
            continue;
        }
        if let Some(base) = desc.base {
            let base_desc = ctx.classes.get(base);
            if base_desc.is_simple() {
                continue;
            }
            let own = manifest
                .find(&format!("models/{}.cpp", desc.name.local))
                .unwrap();
            let parent = manifest
                .find(&format!("models/{}.cpp", base_desc.name.local))
                .unwrap();
            assert!(parent < own, "{} listed before its base", desc.name);
        }
    }
}
