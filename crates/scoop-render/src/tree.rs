//! Nested markup tree for a story body.

use crate::wrap::{Attribute, WrapNode};

/// Indent of the outermost node inside `return (`.
pub const BASE_INDENT: usize = 4;

const STEP: usize = 2;

/// Tag used as the children placeholder.
pub const CHILDREN_PLACEHOLDER: &str = "div";

/// Wrappers outermost first, then the component itself bound to `props`
/// (one `prop={prop}` attribute each), then a children placeholder when
/// `has_children`.
#[must_use]
pub fn component_chain(
    wrappers: &[WrapNode],
    component: &str,
    props: &[&str],
    has_children: bool,
) -> Vec<WrapNode> {
    let mut chain = wrappers.to_vec();
    chain.push(
        WrapNode::new(component).with_attributes(
            props
                .iter()
                .map(|prop| Attribute::bound(prop, prop))
                .collect(),
        ),
    );
    if has_children {
        chain.push(WrapNode::new(CHILDREN_PLACEHOLDER));
    }
    chain
}

/// Render `chain` from outermost to innermost. Only the innermost node
/// self-closes; the node whose tag is `component` is preceded by an
/// `<h3>` label and lists its attributes one per line.
#[must_use]
pub fn render_tree(chain: &[WrapNode], component: &str, indent: usize) -> String {
    let mut lines = Vec::new();
    render_node(chain, component, indent, &mut lines);
    lines.join("\n")
}

fn render_node(chain: &[WrapNode], component: &str, indent: usize, lines: &mut Vec<String>) {
    let Some((node, inner)) = chain.split_first() else {
        return;
    };
    let pad = " ".repeat(indent);
    let is_last = inner.is_empty();

    if node.tag == component {
        lines.push(format!("{pad}<h3>{component}</h3>"));
        lines.push(format!("{pad}<{}", node.tag));
        let attr_pad = " ".repeat(indent + STEP);
        lines.extend(
            node.attributes
                .iter()
                .map(|attr| format!("{attr_pad}{}", attr.render())),
        );
        lines.push(format!("{pad}{}", if is_last { "/>" } else { ">" }));
    } else {
        let attributes: String = node
            .attributes
            .iter()
            .map(|attr| format!(" {}", attr.render()))
            .collect();
        let close = if is_last { " />" } else { ">" };
        lines.push(format!("{pad}<{}{attributes}{close}", node.tag));
    }

    if !is_last {
        render_node(inner, component, indent + STEP, lines);
        lines.push(format!("{pad}</{}>", node.tag));
    }
}
