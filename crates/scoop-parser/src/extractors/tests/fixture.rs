use pretty_assertions::assert_eq;

use super::*;
use crate::types::Severity;

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

fn extract_fixture() -> FileExtraction {
    let mut cache = SourceCache::default();
    extract_file(
        &fixture_path("components/ExampleInput.tsx"),
        &ExtractOptions::default(),
        &mut cache,
    )
    .expect("fixture extraction should succeed")
}

#[test]
fn example_input_defaults() {
    let extraction = extract_fixture();
    let input = find_by_name(&extraction, "ExampleInput");
    let defaults: Vec<_> = input
        .properties
        .values()
        .filter_map(|p| Some((p.name.as_str(), p.default_value_text.as_deref()?)))
        .collect();
    assert_eq!(
        defaults,
        vec![
            ("allowNegative", "true"),
            ("fontSize", "FontSize.medium"),
            ("fontSizeLabel", "ExportedFontSize.medium"),
            ("fontWeight", "FontWeightObj.normal"),
            ("fontWeightLabel", "ExportedFontWeightObj.normal"),
            ("json", r#"{"a":0,"b":"","c":{"d":[],"e":[]}}"#),
            ("labelString", "''"),
            ("maxValue", "0"),
            ("roundToNearest", r#""none""#),
            ("startingValue", "0"),
        ]
    );
}

#[test]
fn example_input_controls() {
    let extraction = extract_fixture();
    let input = find_by_name(&extraction, "ExampleInput");
    let controls: Vec<_> = input
        .properties
        .values()
        .filter_map(|p| Some((p.name.as_str(), p.control.as_ref()?.kind, options(p))))
        .collect();
    assert_eq!(
        controls,
        vec![
            ("choices", ControlKind::MultiSelect, vec!["Choices.one", "Choices.two"]),
            ("choices2", ControlKind::MultiSelect, vec!["ChoicesObj.three", "ChoicesObj.four"]),
            (
                "fontSize",
                ControlKind::Select,
                vec!["FontSize.small", "FontSize.medium", "FontSize.large"]
            ),
            (
                "fontSizeLabel",
                ControlKind::Select,
                vec![
                    "ExportedFontSize.small",
                    "ExportedFontSize.medium",
                    "ExportedFontSize.large"
                ]
            ),
            ("fontWeight", ControlKind::Radio, vec!["FontWeightObj.normal", "FontWeightObj.bold"]),
            (
                "fontWeightLabel",
                ControlKind::Radio,
                vec!["ExportedFontWeightObj.normal", "ExportedFontWeightObj.bold"]
            ),
            ("minValue", ControlKind::Select, vec!["-100", "0", "100"]),
            ("onChange", ControlKind::Action, vec![]),
            (
                "roundToNearest",
                ControlKind::Select,
                vec![r#""none""#, r#""ten""#, r#""hundred""#]
            ),
        ]
    );
}

#[test]
fn example_input_schema_flags_and_imports() {
    let extraction = extract_fixture();
    let input = find_by_name(&extraction, "ExampleInput");
    assert!(input.has_children);
    assert!(input.has_render_function);
    assert!(input.is_exported);
    assert!(!input.is_default_export);
    assert_eq!(extraction.file_stem, "ExampleInput");

    let imports: Vec<_> = input
        .imports_by_module()
        .into_iter()
        .map(|(path, symbols)| (path.to_string(), symbols.join(", ")))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("../types".to_string(), "ExportedFontSize, ExportedFontWeightObj".to_string()),
            (
                "./ExampleInput".to_string(),
                "Choices, ChoicesObj, Complex, FontSize, FontWeightObj".to_string()
            ),
        ]
    );
}

#[test]
fn example_input_registers_local_and_resolved_enums() {
    let extraction = extract_fixture();
    for name in [
        "Choices",
        "ChoicesObj",
        "FontSize",
        "FontSizeNoValues",
        "FontWeightObj",
        "ExportedFontSize",
        "ExportedFontWeightObj",
    ] {
        assert!(extraction.enums.contains(name), "{name} should be registered");
    }
    assert!(!extraction.enums.contains("MAX_VALUE"));
}

#[test]
fn ignored_props_type_is_reported() {
    let extraction = extract_fixture();
    assert_eq!(extraction.components.len(), 1);
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].severity, Severity::Info);
    assert_eq!(extraction.diagnostics[0].component.as_deref(), Some("IgnoreMe"));
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Taco.jsx");
    std::fs::write(&path, "export function Taco() {}").expect("write");
    let result = extract_file(&path, &ExtractOptions::default(), &mut SourceCache::default());
    assert!(matches!(
        result,
        Err(crate::error::ParserError::UnsupportedLanguage(_))
    ));
}

#[test]
fn extraction_serializes_to_json() {
    let extraction = extract_fixture();
    let value = serde_json::to_value(&extraction).expect("serialize");
    let on_change = &value["components"][0]["properties"]["onChange"];
    assert_eq!(on_change["type_kind"], "function_type");
    assert_eq!(on_change["control"]["kind"], "action");
    assert_eq!(value["enums"]["FontSizeNoValues"]["members"][0]["value"]["kind"], "absent");
}
