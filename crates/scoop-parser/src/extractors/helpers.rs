//! Shared node helpers for the TypeScript extractors.

use ast_grep_core::Node;

/// Named (non-punctuation) children of a node.
pub fn named_children<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    node.children().filter(Node::is_named).collect()
}

pub fn first_named_child<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    node.children().find(Node::is_named)
}

/// Text of a field node, unquoted.
pub fn field_text<D: ast_grep_core::Doc>(node: &Node<D>, field: &str) -> Option<String> {
    node.field(field).map(|n| unquote(&n.text()).to_string())
}

/// Strip one pair of matching quotes.
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Contents of a `string` node without its delimiters.
pub fn string_value<D: ast_grep_core::Doc>(node: &Node<D>) -> String {
    unquote(&node.text()).to_string()
}

pub fn is_default_export<D: ast_grep_core::Doc>(export_node: &Node<D>) -> bool {
    export_node
        .children()
        .any(|c| c.kind().as_ref() == "default")
}

/// Property signatures mark optionality with an anonymous `?` token.
pub fn has_optional_marker<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.children()
        .any(|c| !c.is_named() && c.text().as_ref() == "?")
}

/// The type node inside a `type_annotation` field (`: T` -> `T`).
pub fn annotated_type<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    field: &str,
) -> Option<Node<'r, D>> {
    let annotation = node.field(field)?;
    if annotation.kind().as_ref() == "type_annotation" {
        first_named_child(&annotation)
    } else {
        Some(annotation)
    }
}

/// Collapse multi-line source text onto one line.
pub fn single_line(text: &str) -> String {
    if text.contains('\n') {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.trim().to_string()
    }
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Component functions start with an uppercase letter followed by at least
/// one more identifier character.
pub fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && name.len() > 1
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
