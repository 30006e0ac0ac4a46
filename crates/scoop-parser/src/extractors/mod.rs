//! Component props extraction for TypeScript / TSX sources.
//!
//! Three ordered passes fold over the top-level statements of a file:
//! registries first, then props types, then component functions.

pub mod bindings;
pub(crate) mod defaults;
pub mod enums;
pub(crate) mod helpers;
pub mod imports;
pub mod pipeline;
pub mod props;

#[cfg(test)]
mod tests;

use ast_grep_core::Node;

pub use enums::{ModuleExports, resolve_enums_from_module};
pub use pipeline::{ExtractOptions, ExtractionState, FileExtraction, extract_file, extract_source};

/// A top-level statement with its `export` wrapper peeled off.
pub struct Declaration<'r, D: ast_grep_core::Doc> {
    /// The declaration itself, or the `export_statement` when it has no
    /// inner declaration (`export default X`, `export { X }`).
    pub node: Node<'r, D>,
    pub exported: bool,
    pub default_export: bool,
}

/// Top-level statements of a program in source order.
pub fn top_level_declarations<'r, D: ast_grep_core::Doc>(
    root: &Node<'r, D>,
) -> Vec<Declaration<'r, D>> {
    helpers::named_children(root)
        .into_iter()
        .filter(|stmt| stmt.kind().as_ref() != "comment")
        .map(|stmt| {
            if stmt.kind().as_ref() != "export_statement" {
                return Declaration {
                    node: stmt,
                    exported: false,
                    default_export: false,
                };
            }
            let default_export = helpers::is_default_export(&stmt);
            Declaration {
                node: stmt.field("declaration").unwrap_or(stmt),
                exported: true,
                default_export,
            }
        })
        .collect()
}
