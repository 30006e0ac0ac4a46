//! Enum, import and complex-default registries built from top-level declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of one enum member.
///
/// `Absent` marks a member without an initializer and is distinct from every
/// literal, including `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EnumValue {
    Absent,
    Literal(serde_json::Value),
}

impl EnumValue {
    /// Literal text kept verbatim.
    pub fn text(text: &str) -> Self {
        Self::Literal(serde_json::Value::String(text.to_string()))
    }

    /// Best-effort JSON normalization: strings holding a JSON number,
    /// boolean or `null` become that scalar, anything else stays a string.
    pub fn normalized(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value @ (serde_json::Value::Number(_)
            | serde_json::Value::Bool(_)
            | serde_json::Value::Null)) => Self::Literal(value),
            _ => Self::text(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumValue,
}

/// Members of one enum-like declaration in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    pub members: Vec<EnumMember>,
}

impl EnumEntry {
    pub fn push(&mut self, name: &str, value: EnumValue) {
        self.members.push(EnumMember {
            name: name.to_string(),
            value,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `Enum.member` tokens for every member, in declaration order.
    #[must_use]
    pub fn qualified_options(&self, enum_name: &str) -> Vec<String> {
        self.members
            .iter()
            .map(|m| format!("{enum_name}.{}", m.name))
            .collect()
    }
}

/// Enum-like declarations by name. Entries are frozen once registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumRegistry {
    entries: BTreeMap<String, EnumEntry>,
}

impl EnumRegistry {
    /// Register an entry unless the name is already taken.
    ///
    /// Returns `false` when an existing entry was kept.
    pub fn register(&mut self, name: &str, entry: EnumEntry) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), entry);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumEntry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnumEntry)> {
        self.entries.iter()
    }
}

/// Where a locally visible symbol was imported from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    /// Name exported by the source module (`default` / `*` for default and
    /// namespace imports).
    pub imported: String,
    /// Module specifier exactly as written.
    pub module: String,
}

/// Local symbol name -> import origin for the file under extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportRegistry {
    entries: BTreeMap<String, ImportEntry>,
}

impl ImportRegistry {
    pub fn insert(&mut self, local: &str, imported: &str, module: &str) {
        self.entries.insert(
            local.to_string(),
            ImportEntry {
                imported: imported.to_string(),
                module: module.to_string(),
            },
        );
    }

    #[must_use]
    pub fn get(&self, local: &str) -> Option<&ImportEntry> {
        self.entries.get(local)
    }

    /// Local names bound from one module specifier.
    pub fn from_module<'a>(
        &'a self,
        module: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a ImportEntry)> + 'a {
        self.entries.iter().filter(move |(_, e)| e.module == module)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Synthesized placeholder values for object-shaped types, by type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexDefaultRegistry {
    entries: BTreeMap<String, serde_json::Value>,
}

impl ComplexDefaultRegistry {
    pub fn insert(&mut self, name: &str, value: serde_json::Value) {
        self.entries.entry(name.to_string()).or_insert(value);
    }

    /// Compact JSON text of the placeholder, ready to splice into code.
    #[must_use]
    pub fn serialized(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(ToString::to_string)
    }
}
