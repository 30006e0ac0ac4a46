use serde::{Deserialize, Serialize};

/// Closed taxonomy of control-worthy property shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Boolean,
    String,
    Number,
    LiteralUnion,
    EnumRef,
    ArrayOrComplexRef,
    FunctionType,
    Unknown,
}

impl TypeKind {
    /// Whether records of this kind carry a [`ControlSpec`].
    #[must_use]
    pub const fn has_control(self) -> bool {
        matches!(self, Self::LiteralUnion | Self::EnumRef | Self::FunctionType)
    }

    /// Canonical default for primitive keywords.
    #[must_use]
    pub const fn canonical_default(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("false"),
            Self::String => Some("''"),
            Self::Number => Some("0"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::LiteralUnion => "literal_union",
            Self::EnumRef => "enum_ref",
            Self::ArrayOrComplexRef => "array_or_complex_ref",
            Self::FunctionType => "function_type",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Radio,
    Select,
    MultiSelect,
    Action,
}

impl ControlKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Action => "action",
        }
    }
}

/// UI-control metadata inferred from a property's type shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub kind: ControlKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

impl ControlSpec {
    /// Single-choice control: `radio` for exactly two options, `select` otherwise.
    #[must_use]
    pub fn choice(options: Vec<String>) -> Self {
        let kind = if options.len() == 2 {
            ControlKind::Radio
        } else {
            ControlKind::Select
        };
        Self {
            kind,
            options,
            action_name: None,
        }
    }

    #[must_use]
    pub const fn multi_select(options: Vec<String>) -> Self {
        Self {
            kind: ControlKind::MultiSelect,
            options,
            action_name: None,
        }
    }

    #[must_use]
    pub fn action(name: &str) -> Self {
        Self {
            kind: ControlKind::Action,
            options: Vec::new(),
            action_name: Some(name.to_string()),
        }
    }
}

/// One extracted component property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    pub is_optional: bool,
    /// Declared type as written in source; documentation only.
    pub type_text: String,
    pub type_kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlSpec>,
    /// Renderable markup (`ReactNode` and friends); never a story arg.
    #[serde(default)]
    pub is_markup: bool,
}

impl PropertyRecord {
    pub fn new(name: &str, is_optional: bool, type_text: &str, type_kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            is_optional,
            type_text: type_text.to_string(),
            type_kind,
            default_value_text: None,
            control: None,
            is_markup: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Option<String>) -> Self {
        self.default_value_text = default;
        self
    }

    #[must_use]
    pub fn with_control(mut self, control: Option<ControlSpec>) -> Self {
        self.control = control;
        self
    }

    #[must_use]
    pub const fn markup(mut self) -> Self {
        self.is_markup = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, ControlKind::Select)]
    #[case(2, ControlKind::Radio)]
    #[case(3, ControlKind::Select)]
    #[case(7, ControlKind::Select)]
    fn choice_is_radio_only_for_two_options(#[case] count: usize, #[case] kind: ControlKind) {
        let options = (0..count).map(|i| format!("'{i}'")).collect();
        assert_eq!(ControlSpec::choice(options).kind, kind);
    }

    #[test]
    fn action_control_names_the_prop() {
        let control = ControlSpec::action("onChange");
        assert_eq!(control.kind, ControlKind::Action);
        assert_eq!(control.action_name.as_deref(), Some("onChange"));
        assert!(control.options.is_empty());
    }

    #[test]
    fn control_kinds_serialize_in_kebab_case() {
        let value = serde_json::to_value(ControlSpec::multi_select(vec!["A.b".into()]))
            .expect("serialize control");
        assert_eq!(value["kind"], "multi-select");
        assert_eq!(ControlKind::MultiSelect.as_str(), "multi-select");
    }

    #[test]
    fn only_choice_and_function_kinds_carry_controls() {
        let with_control: Vec<_> = [
            TypeKind::Boolean,
            TypeKind::String,
            TypeKind::Number,
            TypeKind::LiteralUnion,
            TypeKind::EnumRef,
            TypeKind::ArrayOrComplexRef,
            TypeKind::FunctionType,
            TypeKind::Unknown,
        ]
        .into_iter()
        .filter(|k| k.has_control())
        .collect();
        assert_eq!(
            with_control,
            vec![TypeKind::LiteralUnion, TypeKind::EnumRef, TypeKind::FunctionType]
        );
    }
}
