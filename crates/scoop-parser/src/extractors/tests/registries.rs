use pretty_assertions::assert_eq;

use super::*;
use crate::registry::EnumValue;

#[test]
fn exported_enum_like_declarations_are_registered() {
    let extraction = parse_and_extract(
        r#"export enum Size { sm, md, lg }
        enum Hidden { a, b }
        export const Weight = { normal: "400", bold: "700" } as const
        const Private = { a: 1, b: 2 }
        export const Single = { only: 1 }"#,
    );
    let names: Vec<_> = extraction.enums.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Size", "Weight"]);

    let size = extraction.enums.get("Size").expect("Size registered");
    assert_eq!(size.len(), 3);
    assert!(size.members.iter().all(|m| m.value == EnumValue::Absent));
}

#[test]
fn local_enum_reference_resolves_with_local_import_path() {
    let extraction = parse_and_extract(
        "export enum Cheese { cheddar, jack }
        export type TacoProps = { cheese: Cheese }
        export function Taco({ cheese }: TacoProps) { return null }",
    );
    let taco = find_by_name(&extraction, "Taco");
    let cheese = prop(taco, "cheese");
    assert_eq!(cheese.type_kind, TypeKind::EnumRef);
    assert_eq!(cheese.control.as_ref().map(|c| c.kind), Some(ControlKind::Radio));
    assert_eq!(options(cheese), vec!["Cheese.cheddar", "Cheese.jack"]);
    assert_eq!(cheese.default_value_text.as_deref(), Some("Cheese.cheddar"));
    assert_eq!(taco.imports_used["Cheese"], "./Taco");
}

#[test]
fn unexported_enum_is_not_a_choice() {
    let extraction = parse_and_extract(
        "enum Cheese { cheddar, jack }
        export type TacoProps = { cheese: Cheese }
        export function Taco({ cheese }: TacoProps) { return null }",
    );
    let cheese = prop(find_by_name(&extraction, "Taco"), "cheese");
    assert_eq!(cheese.type_kind, TypeKind::Unknown);
    assert_eq!(cheese.control, None);
}

#[test]
fn indexed_access_on_const_object() {
    let extraction = parse_and_extract(
        r#"export const FontWeightObj = { normal: "400", bold: "700" } as const
        export type TacoProps = {
          weight: typeof FontWeightObj[keyof typeof FontWeightObj]
          weights: Array<typeof FontWeightObj[keyof typeof FontWeightObj]>
        }
        export function Taco({ weight }: TacoProps) { return null }"#,
    );
    let taco = find_by_name(&extraction, "Taco");

    let weight = prop(taco, "weight");
    assert_eq!(weight.type_kind, TypeKind::EnumRef);
    assert_eq!(options(weight), vec!["FontWeightObj.normal", "FontWeightObj.bold"]);

    let weights = prop(taco, "weights");
    assert_eq!(weights.type_kind, TypeKind::EnumRef);
    assert_eq!(weights.control.as_ref().map(|c| c.kind), Some(ControlKind::MultiSelect));
    assert_eq!(weights.default_value_text, None);
}

#[test]
fn local_object_shapes_seed_complex_defaults() {
    let extraction = parse_and_extract(
        "export interface Filling { grams: number, name: string, extras: string[], vegan: boolean }
        export type TacoProps = { filling: Filling, fillings: Filling[] }
        export function Taco({ filling }: TacoProps) { return null }",
    );
    let taco = find_by_name(&extraction, "Taco");

    let filling = prop(taco, "filling");
    assert_eq!(filling.type_kind, TypeKind::ArrayOrComplexRef);
    assert_eq!(
        filling.default_value_text.as_deref(),
        Some(r#"{"grams":0,"name":"","extras":[]}"#)
    );
    assert_eq!(filling.control, None);

    let fillings = prop(taco, "fillings");
    assert_eq!(fillings.type_kind, TypeKind::ArrayOrComplexRef);
    assert_eq!(fillings.default_value_text, None);
    assert_eq!(taco.imports_used["Filling"], "./Taco");
}

#[test]
fn inline_object_types_get_a_placeholder() {
    let extraction = parse_and_extract(
        "export type TacoProps = { size: { width: number, unit: string } }
        export function Taco({ size }: TacoProps) { return null }",
    );
    let size = prop(find_by_name(&extraction, "Taco"), "size");
    assert_eq!(size.type_kind, TypeKind::ArrayOrComplexRef);
    assert_eq!(size.default_value_text.as_deref(), Some(r#"{"width":0,"unit":""}"#));
}
