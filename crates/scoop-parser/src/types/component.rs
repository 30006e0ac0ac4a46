use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PropertyRecord;

/// Normalized props schema for one component.
///
/// `properties` and `imports_used` are ordered maps so every consumer walks
/// them in lexicographic key order regardless of declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ComponentSchema {
    pub name: String,
    pub has_children: bool,
    pub has_render_function: bool,
    pub is_default_export: bool,
    pub is_exported: bool,
    pub properties: BTreeMap<String, PropertyRecord>,
    /// Referenced symbol -> module path the story must import it from.
    pub imports_used: BTreeMap<String, String>,
}

impl ComponentSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn insert_property(&mut self, property: PropertyRecord) {
        self.properties.insert(property.name.clone(), property);
    }

    /// Record an import for the story. The first module path seen for a
    /// symbol wins.
    pub fn use_import(&mut self, symbol: &str, module_path: &str) {
        self.imports_used
            .entry(symbol.to_string())
            .or_insert_with(|| module_path.to_string());
    }

    /// `imports_used` grouped by module path; paths and symbols both sorted.
    #[must_use]
    pub fn imports_by_module(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (symbol, path) in &self.imports_used {
            grouped.entry(path.as_str()).or_default().push(symbol.as_str());
        }
        grouped
    }
}
