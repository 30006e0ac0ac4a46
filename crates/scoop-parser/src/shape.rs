//! Normalization of TypeScript type nodes into a closed [`TypeShape`].
//!
//! Classification never looks at raw syntax kinds; it matches on the shape
//! produced here.

use ast_grep_core::Node;
use serde::{Deserialize, Serialize};

use crate::extractors::defaults;
use crate::extractors::helpers::{field_text, first_named_child, is_identifier, named_children};

/// Type names rendered as markup rather than data.
pub const MARKUP_TYPES: &[&str] = &[
    "ReactNode",
    "ReactElement",
    "ReactChild",
    "ReactFragment",
    "ReactPortal",
    "JSX.Element",
    "React.ReactNode",
    "React.ReactElement",
    "React.ReactChild",
    "React.ReactFragment",
    "React.ReactPortal",
    "React.JSX.Element",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean,
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    Keyword(Primitive),
    /// Literal tokens exactly as written, in declaration order.
    LiteralUnion(Vec<String>),
    MixedUnion {
        has_string: bool,
        has_number: bool,
    },
    Function,
    Reference(String),
    /// `typeof X[keyof typeof X]`, reduced to `X`.
    IndexedAccess(String),
    Markup(String),
    Array(Box<TypeShape>),
    /// Inline object type with its synthesized placeholder.
    Object(serde_json::Value),
    Opaque,
}

/// Normalize one type node.
pub fn normalize<D: ast_grep_core::Doc>(node: &Node<D>) -> TypeShape {
    match node.kind().as_ref() {
        "predefined_type" => {
            keyword(node.text().trim()).map_or(TypeShape::Opaque, TypeShape::Keyword)
        }
        "union_type" => union(node),
        "function_type" | "constructor_type" => TypeShape::Function,
        "type_identifier" | "nested_type_identifier" => named(node.text().trim()),
        "generic_type" => generic(node),
        "array_type" => first_named_child(node).map_or(TypeShape::Opaque, |element| {
            TypeShape::Array(Box::new(normalize(&element)))
        }),
        "parenthesized_type" | "readonly_type" => {
            first_named_child(node).map_or(TypeShape::Opaque, |inner| normalize(&inner))
        }
        "object_type" => defaults::synthesize(node).map_or(TypeShape::Opaque, TypeShape::Object),
        _ => indexed_access_target(&node.text()).map_or(TypeShape::Opaque, |name| {
            TypeShape::IndexedAccess(name.to_string())
        }),
    }
}

fn keyword(text: &str) -> Option<Primitive> {
    match text {
        "boolean" => Some(Primitive::Boolean),
        "string" => Some(Primitive::String),
        "number" => Some(Primitive::Number),
        _ => None,
    }
}

fn named(name: &str) -> TypeShape {
    if MARKUP_TYPES.contains(&name) {
        TypeShape::Markup(name.to_string())
    } else {
        TypeShape::Reference(name.to_string())
    }
}

fn generic<D: ast_grep_core::Doc>(node: &Node<D>) -> TypeShape {
    let Some(name) = field_text(node, "name") else {
        return TypeShape::Opaque;
    };
    match name.as_str() {
        "Array" | "ReadonlyArray" => node
            .field("type_arguments")
            .and_then(|args| first_named_child(&args))
            .map_or(TypeShape::Opaque, |element| {
                TypeShape::Array(Box::new(normalize(&element)))
            }),
        _ if MARKUP_TYPES.contains(&name.as_str()) => TypeShape::Markup(name),
        _ => TypeShape::Opaque,
    }
}

fn union<D: ast_grep_core::Doc>(node: &Node<D>) -> TypeShape {
    let mut members = Vec::new();
    flatten_union(node, &mut members);
    // `undefined` only restates optionality; it is never a choice.
    members.retain(|m| m.text().trim() != "undefined");
    if members.is_empty() {
        return TypeShape::Opaque;
    }

    if members.iter().all(|m| m.kind().as_ref() == "literal_type") {
        return TypeShape::LiteralUnion(
            members
                .iter()
                .map(|m| m.text().trim().to_string())
                .collect(),
        );
    }
    let keywords: Vec<_> = members
        .iter()
        .filter(|m| m.kind().as_ref() == "predefined_type")
        .filter_map(|m| keyword(m.text().trim()))
        .collect();
    let has_string = keywords.contains(&Primitive::String);
    let has_number = keywords.contains(&Primitive::Number);
    if has_string || has_number {
        TypeShape::MixedUnion {
            has_string,
            has_number,
        }
    } else {
        TypeShape::Opaque
    }
}

/// Union members with nested and parenthesized unions spliced in.
fn flatten_union<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>, out: &mut Vec<Node<'r, D>>) {
    for child in named_children(node) {
        if child.kind().as_ref() == "union_type" {
            flatten_union(&child, out);
        } else if child.kind().as_ref() == "parenthesized_type"
            && let Some(inner) = first_named_child(&child)
        {
            if inner.kind().as_ref() == "union_type" {
                flatten_union(&inner, out);
            } else {
                out.push(inner);
            }
        } else {
            out.push(child);
        }
    }
}

/// Reduce `typeof X[keyof typeof X]` to `X`. Both names must match.
pub fn indexed_access_target(text: &str) -> Option<&str> {
    let rest = text.trim().strip_prefix("typeof")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (object, index) = rest.split_once('[')?;
    let index = index.trim_end().strip_suffix(']')?.trim();
    let index = index.strip_prefix("keyof")?;
    let index = index.trim_start().strip_prefix("typeof")?.trim();
    let object = object.trim();
    (is_identifier(object) && object == index).then_some(object)
}
