//! Enum-like declarations: native `enum`s and literal-valued const objects.

use std::collections::BTreeMap;
use std::path::Path;

use ast_grep_core::Node;

use super::defaults;
use super::helpers::{field_text, first_named_child, named_children, string_value, unquote};
use super::{Declaration, top_level_declarations};
use crate::parser::{ParsedSource, SourceCache, SourceProvider};
use crate::registry::{EnumEntry, EnumValue};

/// Const objects need at least this many literal-valued keys to count as
/// enum-like.
pub const MIN_CONST_OBJECT_MEMBERS: usize = 2;

/// `enum Name { a, b = "x" }`. Members keep declaration order; a member
/// without initializer is [`EnumValue::Absent`].
pub fn native_enum<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(String, EnumEntry)> {
    if node.kind().as_ref() != "enum_declaration" {
        return None;
    }
    let name = field_text(node, "name")?;
    let body = node.field("body")?;
    let mut entry = EnumEntry::default();
    for member in named_children(&body) {
        match member.kind().as_ref() {
            "property_identifier" | "string" => {
                entry.push(unquote(&member.text()), EnumValue::Absent);
            }
            "enum_assignment" => {
                let Some(member_name) = field_text(&member, "name") else {
                    continue;
                };
                let value = member
                    .field("value")
                    .map_or(EnumValue::Absent, |v| enum_member_value(&v));
                entry.push(&member_name, value);
            }
            _ => {}
        }
    }
    Some((name, entry))
}

fn enum_member_value<D: ast_grep_core::Doc>(value: &Node<D>) -> EnumValue {
    match value.kind().as_ref() {
        "string" => EnumValue::text(&string_value(value)),
        _ => EnumValue::text(value.text().trim()),
    }
}

/// `const Name = { a: "x", b: 2 } as const`, from a `lexical_declaration`.
///
/// Only `null`, numeric and string values count; fewer than
/// [`MIN_CONST_OBJECT_MEMBERS`] of them means the object is not enum-like.
pub fn const_object<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(String, EnumEntry)> {
    if node.kind().as_ref() != "lexical_declaration" {
        return None;
    }
    let declarator = named_children(node)
        .into_iter()
        .find(|c| c.kind().as_ref() == "variable_declarator")?;
    let name = field_text(&declarator, "name")?;
    let object = object_literal(&declarator.field("value")?)?;

    let mut entry = EnumEntry::default();
    for pair in named_children(&object) {
        if pair.kind().as_ref() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (pair.field("key"), pair.field("value")) else {
            continue;
        };
        if let Some(raw) = literal_value(&value) {
            entry.push(unquote(&key.text()), EnumValue::normalized(&raw));
        }
    }
    if entry.len() < MIN_CONST_OBJECT_MEMBERS {
        tracing::debug!(%name, members = entry.len(), "const object is not enum-like");
        return None;
    }
    Some((name, entry))
}

/// Unwrap `{...} as const` / `{...} satisfies T` down to the object literal.
fn object_literal<'r, D: ast_grep_core::Doc>(value: &Node<'r, D>) -> Option<Node<'r, D>> {
    match value.kind().as_ref() {
        "object" => Some(value.clone()),
        "as_expression" | "satisfies_expression" | "parenthesized_expression" => {
            object_literal(&first_named_child(value)?)
        }
        _ => None,
    }
}

/// Raw text of a `null`, numeric or string literal, strings unquoted.
fn literal_value<D: ast_grep_core::Doc>(value: &Node<D>) -> Option<String> {
    match value.kind().as_ref() {
        "null" | "number" => Some(value.text().trim().to_string()),
        "string" => Some(string_value(value)),
        "unary_expression" => {
            let argument = value.field("argument")?;
            (argument.kind().as_ref() == "number").then(|| value.text().trim().to_string())
        }
        _ => None,
    }
}

/// Enum-like declaration of either flavour.
pub fn enum_like<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(String, EnumEntry)> {
    native_enum(node).or_else(|| const_object(node))
}

/// What a module exports that the extraction can use: its enum-likes and
/// the placeholders of its object-shaped types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExports {
    pub enums: Vec<(String, EnumEntry)>,
    pub shapes: BTreeMap<String, serde_json::Value>,
}

impl ModuleExports {
    /// Scan the exported top-level declarations of a parsed module.
    pub fn scan(source: &ParsedSource) -> Self {
        let root = source.root();
        let mut exports = Self::default();
        for Declaration { node, exported, .. } in top_level_declarations(&root) {
            if !exported {
                continue;
            }
            if let Some(found) = enum_like(&node) {
                exports.enums.push(found);
            } else if let Some(name) = field_text(&node, "name")
                && let Some(placeholder) = defaults::declaration_placeholder(&node)
            {
                exports.shapes.insert(name, placeholder);
            }
        }
        exports
    }

    #[must_use]
    pub fn enum_entry(&self, name: &str) -> Option<&EnumEntry> {
        self.enums.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.shapes.is_empty()
    }
}

/// Load a module path (with extension probing) and collect its exports.
///
/// A missing or unreadable module yields an empty delta. Only the module's
/// own declarations are read; its imports are not followed.
pub fn resolve_enums_from_module<P: SourceProvider>(
    cache: &mut SourceCache<P>,
    module_path: &Path,
) -> ModuleExports {
    let Some(source) = cache.load(module_path) else {
        tracing::debug!(path = %module_path.display(), "module unresolved, no enums added");
        return ModuleExports::default();
    };
    let exports = ModuleExports::scan(&source);
    tracing::debug!(
        path = %source.path().display(),
        enums = exports.enums.len(),
        shapes = exports.shapes.len(),
        "resolved module exports"
    );
    exports
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use ast_grep_language::SupportLang;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::parser::parse_source;

    fn first_declaration(source: &str) -> Option<(String, EnumEntry)> {
        let tree = parse_source(source, SupportLang::TypeScript);
        let root = tree.root();
        top_level_declarations(&root)
            .into_iter()
            .find_map(|d| enum_like(&d.node))
    }

    fn values(entry: &EnumEntry) -> Vec<(&str, &EnumValue)> {
        entry
            .members
            .iter()
            .map(|m| (m.name.as_str(), &m.value))
            .collect()
    }

    #[test]
    fn enum_without_initializers_is_all_absent() {
        let (name, entry) =
            first_declaration("export enum FontSizeNoValues { small, medium, large }")
                .expect("enum registered");
        assert_eq!(name, "FontSizeNoValues");
        assert_eq!(entry.len(), 3);
        assert!(entry.members.iter().all(|m| m.value == EnumValue::Absent));
    }

    #[test]
    fn enum_values_keep_text() {
        let (_, entry) = first_declaration(
            r#"export enum FontSize { small = "0.8rem", medium = "1rem", large = 3 }"#,
        )
        .expect("enum registered");
        assert_eq!(
            values(&entry),
            vec![
                ("small", &EnumValue::text("0.8rem")),
                ("medium", &EnumValue::text("1rem")),
                ("large", &EnumValue::text("3")),
            ]
        );
    }

    #[test]
    fn const_object_values_are_normalized() {
        let (name, entry) = first_declaration(
            r#"export const FontWeightObj = { normal: "400", bold: "700", label: "heavy" } as const"#,
        )
        .expect("object registered");
        assert_eq!(name, "FontWeightObj");
        assert_eq!(
            values(&entry),
            vec![
                ("normal", &EnumValue::Literal(json!(400))),
                ("bold", &EnumValue::Literal(json!(700))),
                ("label", &EnumValue::text("heavy")),
            ]
        );
    }

    #[test]
    fn const_object_accepts_null_and_negative_numbers() {
        let (_, entry) =
            first_declaration("export const Offsets = { none: null, back: -1, other: fn() }")
                .expect("object registered");
        assert_eq!(
            values(&entry),
            vec![
                ("none", &EnumValue::Literal(json!(null))),
                ("back", &EnumValue::Literal(json!(-1))),
            ]
        );
    }

    #[test]
    fn const_object_with_one_literal_is_rejected_every_time() {
        let source = "export const Single = { only: 'one', nested: { a: 1 } }";
        assert_eq!(first_declaration(source), None);
        assert_eq!(first_declaration(source), None);
    }

    #[test]
    fn plain_constants_are_not_enum_like() {
        assert_eq!(first_declaration("export const MAX_VALUE = 1000"), None);
    }

    #[test]
    fn module_scan_skips_unexported_declarations() {
        let files: HashMap<PathBuf, String> = [(
            PathBuf::from("src/types.ts"),
            r#"
            export enum ExportedFontSize { small = "0.8rem", medium = "1rem" }
            enum Hidden { a, b }
            export const ExportedFontWeightObj = { normal: "400", bold: "700" } as const
            export type Complex = { a: number, b: string }
            export const EXPORTED_MAX_VALUE = 1000
            "#
            .to_string(),
        )]
        .into_iter()
        .collect();
        let mut cache = SourceCache::new(files);

        let exports = resolve_enums_from_module(&mut cache, Path::new("src/types"));
        let names: Vec<_> = exports.enums.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["ExportedFontSize", "ExportedFontWeightObj"]);
        assert_eq!(exports.shapes.get("Complex"), Some(&json!({"a": 0, "b": ""})));
        assert!(exports.enum_entry("Hidden").is_none());
    }

    #[test]
    fn missing_module_is_an_empty_delta() {
        let mut cache = SourceCache::new(HashMap::new());
        let exports = resolve_enums_from_module(&mut cache, Path::new("src/nowhere"));
        assert!(exports.is_empty());
    }
}
