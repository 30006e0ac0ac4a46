//! Import declarations of the file under extraction.

use ast_grep_core::Node;

use super::helpers::{field_text, named_children, string_value};

/// One locally bound import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    /// Exported name in the source module; `default` / `*` for default and
    /// namespace imports.
    pub imported: String,
    pub module: String,
}

/// Every binding introduced by one `import_statement`. Side-effect imports
/// (`import "./styles.css"`) bind nothing.
pub fn import_bindings<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<ImportBinding> {
    if node.kind().as_ref() != "import_statement" {
        return Vec::new();
    }
    let Some(module) = node.field("source").map(|s| string_value(&s)) else {
        return Vec::new();
    };
    let Some(clause) = named_children(node)
        .into_iter()
        .find(|c| c.kind().as_ref() == "import_clause")
    else {
        return Vec::new();
    };

    let bind = |local: String, imported: String| ImportBinding {
        local,
        imported,
        module: module.clone(),
    };
    let mut bindings = Vec::new();
    for part in named_children(&clause) {
        match part.kind().as_ref() {
            "identifier" => bindings.push(bind(part.text().to_string(), "default".to_string())),
            "namespace_import" => {
                if let Some(local) = named_children(&part).into_iter().next() {
                    bindings.push(bind(local.text().to_string(), "*".to_string()));
                }
            }
            "named_imports" => {
                for specifier in named_children(&part) {
                    if specifier.kind().as_ref() != "import_specifier" {
                        continue;
                    }
                    let Some(imported) = field_text(&specifier, "name") else {
                        continue;
                    };
                    let local = field_text(&specifier, "alias").unwrap_or_else(|| imported.clone());
                    bindings.push(bind(local, imported));
                }
            }
            _ => {}
        }
    }
    bindings
}
