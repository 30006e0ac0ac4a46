//! Component functions and the defaults of their destructured props.

use ast_grep_core::Node;

use super::Declaration;
use super::helpers::{field_text, first_named_child, is_component_name, named_children};

/// A located render function.
pub struct ComponentFunction<'r, D: ast_grep_core::Doc> {
    pub name: String,
    pub function: Node<'r, D>,
}

/// Default expression attached to a destructured prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    /// Literal text to splice verbatim.
    Literal(String),
    /// `Enum.member`.
    EnumMember { enum_name: String, member: String },
    /// Anything else (identifiers, calls, objects). Not spliced.
    Other(String),
}

impl Initializer {
    pub fn from_node<D: ast_grep_core::Doc>(node: &Node<D>) -> Self {
        let text = node.text().trim().to_string();
        match node.kind().as_ref() {
            "number" | "string" | "true" | "false" | "null" => Self::Literal(text),
            "unary_expression"
                if node
                    .field("argument")
                    .is_some_and(|a| a.kind().as_ref() == "number") =>
            {
                Self::Literal(text)
            }
            "template_string"
                if !node
                    .children()
                    .any(|c| c.kind().as_ref() == "template_substitution") =>
            {
                Self::Literal(text)
            }
            "member_expression" => {
                let object = node.field("object");
                let property = node.field("property");
                match (object, property) {
                    (Some(object), Some(property))
                        if object.kind().as_ref() == "identifier"
                            && property.kind().as_ref() == "property_identifier" =>
                    {
                        Self::EnumMember {
                            enum_name: object.text().to_string(),
                            member: property.text().to_string(),
                        }
                    }
                    _ => Self::Other(text),
                }
            }
            _ => Self::Other(text),
        }
    }
}

/// One destructured prop of the first parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBinding {
    pub prop: String,
    pub initializer: Option<Initializer>,
}

/// Render functions introduced by one top-level declaration: `function X`,
/// `const X = (...) => ...`, `const X = function ...`, and those wrapped in a
/// call such as `memo(...)` or `forwardRef(...)`.
pub fn component_functions<'r, D: ast_grep_core::Doc>(
    declaration: &Declaration<'r, D>,
) -> Vec<ComponentFunction<'r, D>> {
    let node = &declaration.node;
    let found = match node.kind().as_ref() {
        "function_declaration" | "generator_function_declaration" => field_text(node, "name")
            .map(|name| ComponentFunction {
                name,
                function: node.clone(),
            })
            .into_iter()
            .collect(),
        "lexical_declaration" | "variable_declaration" => named_children(node)
            .into_iter()
            .filter(|d| d.kind().as_ref() == "variable_declarator")
            .filter_map(|declarator| {
                let name = field_text(&declarator, "name")?;
                let function = function_value(&declarator.field("value")?)?;
                Some(ComponentFunction { name, function })
            })
            .collect(),
        "export_statement" => node
            .field("value")
            .filter(|v| matches!(v.kind().as_ref(), "function_expression" | "function"))
            .and_then(|function| {
                let name = field_text(&function, "name")?;
                Some(ComponentFunction { name, function })
            })
            .into_iter()
            .collect(),
        _ => Vec::new(),
    };
    found
        .into_iter()
        .filter(|f: &ComponentFunction<'r, D>| is_component_name(&f.name))
        .collect()
}

fn function_value<'r, D: ast_grep_core::Doc>(value: &Node<'r, D>) -> Option<Node<'r, D>> {
    match value.kind().as_ref() {
        "arrow_function" | "function_expression" | "function" => Some(value.clone()),
        "call_expression" => {
            let arguments = value.field("arguments")?;
            named_children(&arguments)
                .iter()
                .find_map(|arg| function_value(arg))
        }
        "parenthesized_expression" | "as_expression" | "satisfies_expression" => {
            function_value(&first_named_child(value)?)
        }
        _ => None,
    }
}

/// Names an `export_statement` without an inner declaration makes public:
/// `export default X` and `export { X, Y as default }`. Re-exports from
/// another module are ignored. The flag marks a default export.
pub fn exported_names<D: ast_grep_core::Doc>(export_node: &Node<D>) -> Vec<(String, bool)> {
    if export_node.kind().as_ref() != "export_statement" || export_node.field("source").is_some() {
        return Vec::new();
    }
    if let Some(value) = export_node.field("value") {
        return if value.kind().as_ref() == "identifier" {
            vec![(value.text().to_string(), true)]
        } else {
            Vec::new()
        };
    }
    let Some(clause) = named_children(export_node)
        .into_iter()
        .find(|c| c.kind().as_ref() == "export_clause")
    else {
        return Vec::new();
    };
    named_children(&clause)
        .into_iter()
        .filter(|s| s.kind().as_ref() == "export_specifier")
        .filter_map(|specifier| {
            let name = field_text(&specifier, "name")?;
            let is_default = field_text(&specifier, "alias").is_some_and(|a| a == "default");
            Some((name, is_default))
        })
        .collect()
}

/// Destructured props of the function's first parameter, in source order.
/// A parameter that is not an object pattern yields nothing.
pub fn param_bindings<D: ast_grep_core::Doc>(function: &Node<D>) -> Vec<ParamBinding> {
    let Some(parameters) = function.field("parameters") else {
        return Vec::new();
    };
    let Some(pattern) = first_named_child(&parameters).and_then(|p| p.field("pattern")) else {
        return Vec::new();
    };
    if pattern.kind().as_ref() != "object_pattern" {
        return Vec::new();
    }

    let mut bindings = Vec::new();
    for element in named_children(&pattern) {
        match element.kind().as_ref() {
            "shorthand_property_identifier_pattern" => bindings.push(ParamBinding {
                prop: element.text().to_string(),
                initializer: None,
            }),
            "object_assignment_pattern" => {
                let Some(left) = element.field("left") else {
                    continue;
                };
                bindings.push(ParamBinding {
                    prop: left.text().to_string(),
                    initializer: element.field("right").map(|r| Initializer::from_node(&r)),
                });
            }
            "pair_pattern" => {
                let Some(prop) = field_text(&element, "key") else {
                    continue;
                };
                let initializer = element
                    .field("value")
                    .filter(|v| v.kind().as_ref() == "assignment_pattern")
                    .and_then(|v| v.field("right"))
                    .map(|r| Initializer::from_node(&r));
                bindings.push(ParamBinding { prop, initializer });
            }
            _ => {}
        }
    }
    bindings
}

#[cfg(test)]
mod tests {
    use ast_grep_language::SupportLang;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::extractors::top_level_declarations;
    use crate::parser::parse_source;

    fn functions_in(source: &str) -> Vec<String> {
        let tree = parse_source(source, SupportLang::Tsx);
        let root = tree.root();
        top_level_declarations(&root)
            .iter()
            .flat_map(component_functions)
            .map(|f| f.name)
            .collect()
    }

    fn bindings_in(source: &str) -> Vec<ParamBinding> {
        let tree = parse_source(source, SupportLang::Tsx);
        let root = tree.root();
        top_level_declarations(&root)
            .iter()
            .flat_map(component_functions)
            .flat_map(|f| param_bindings(&f.function))
            .collect()
    }

    fn binding(prop: &str, initializer: Option<Initializer>) -> ParamBinding {
        ParamBinding {
            prop: prop.to_string(),
            initializer,
        }
    }

    fn literal(text: &str) -> Option<Initializer> {
        Some(Initializer::Literal(text.to_string()))
    }

    #[test]
    fn locates_every_function_flavour() {
        let names = functions_in(
            "function Plain() {}
             export function Exported() {}
             const Arrow = () => null
             export const Memo = memo(({a}: MemoProps) => null)
             export default function Defaulted() {}
             const lower = () => null
             function X() {}",
        );
        assert_eq!(names, vec!["Plain", "Exported", "Arrow", "Memo", "Defaulted"]);
    }

    #[test]
    fn destructured_defaults() {
        let bindings = bindings_in(
            r#"export function ExampleInput({
              allowNegative = true,
              fontSize = FontSize.medium,
              labelString,
              maxValue = MAX_VALUE,
              minValue = -100,
              roundToNearest = "none",
              label: renamed = 'x',
              ...rest
            }: ExampleInputProps) {}"#,
        );
        assert_eq!(
            bindings,
            vec![
                binding("allowNegative", literal("true")),
                binding(
                    "fontSize",
                    Some(Initializer::EnumMember {
                        enum_name: "FontSize".into(),
                        member: "medium".into()
                    })
                ),
                binding("labelString", None),
                binding("maxValue", Some(Initializer::Other("MAX_VALUE".into()))),
                binding("minValue", literal("-100")),
                binding("roundToNearest", literal(r#""none""#)),
                binding("label", literal("'x'")),
            ]
        );
    }

    #[test]
    fn arrow_functions_bind_too() {
        let bindings = bindings_in("const Taco = ({ cheese = null }: TacoProps) => <div />");
        assert_eq!(bindings, vec![binding("cheese", literal("null"))]);
    }

    #[test]
    fn non_destructured_props_bind_nothing() {
        assert!(bindings_in("function Taco(props: TacoProps) {}").is_empty());
        assert!(bindings_in("function Taco() {}").is_empty());
    }

    #[rstest]
    #[case("export default Taco", vec![("Taco", true)])]
    #[case("export { Taco, Salsa as default }", vec![("Taco", false), ("Salsa", true)])]
    #[case("export { Taco } from './Taco'", vec![])]
    #[case("export default () => null", vec![])]
    fn export_clauses(#[case] source: &str, #[case] expected: Vec<(&str, bool)>) {
        let tree = parse_source(source, SupportLang::Tsx);
        let root = tree.root();
        let stmt = first_named_child(&root).expect("statement");
        let names = exported_names(&stmt);
        let names: Vec<_> = names.iter().map(|(n, d)| (n.as_str(), *d)).collect();
        assert_eq!(names, expected);
    }
}
