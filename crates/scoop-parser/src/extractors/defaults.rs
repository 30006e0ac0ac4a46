//! Placeholder synthesis for object-shaped types.
//!
//! `string` becomes `""`, `number` becomes `0`, arrays become `[]` and nested
//! object literals recurse. Every other member is left out of the placeholder.

use ast_grep_core::Node;
use serde_json::{Map, Value};

use super::helpers::{annotated_type, field_text, first_named_child, named_children};

/// Placeholder for a single type node, `None` when it cannot be synthesized.
pub fn synthesize<D: ast_grep_core::Doc>(type_node: &Node<D>) -> Option<Value> {
    match type_node.kind().as_ref() {
        "predefined_type" => match type_node.text().trim() {
            "string" => Some(Value::String(String::new())),
            "number" => Some(Value::from(0)),
            _ => None,
        },
        "array_type" => Some(Value::Array(Vec::new())),
        "generic_type" => {
            let name = field_text(type_node, "name")?;
            matches!(name.as_str(), "Array" | "ReadonlyArray").then(|| Value::Array(Vec::new()))
        }
        "parenthesized_type" | "readonly_type" => synthesize(&first_named_child(type_node)?),
        "object_type" | "interface_body" => Some(Value::Object(members(type_node))),
        _ => None,
    }
}

/// Placeholder for a named declaration: an object-valued `type` alias or an
/// `interface`.
pub fn declaration_placeholder<D: ast_grep_core::Doc>(declaration: &Node<D>) -> Option<Value> {
    let body = match declaration.kind().as_ref() {
        "type_alias_declaration" => declaration.field("value")?,
        "interface_declaration" => declaration.field("body")?,
        _ => return None,
    };
    matches!(body.kind().as_ref(), "object_type" | "interface_body")
        .then(|| Value::Object(members(&body)))
}

fn members<D: ast_grep_core::Doc>(body: &Node<D>) -> Map<String, Value> {
    let mut object = Map::new();
    for member in named_children(body) {
        if member.kind().as_ref() != "property_signature" {
            continue;
        }
        let Some(name) = field_text(&member, "name") else {
            continue;
        };
        if let Some(value) = annotated_type(&member, "type").and_then(|t| synthesize(&t)) {
            object.insert(name, value);
        }
    }
    object
}
