//! Ladle story source for one [`ComponentSchema`].
//!
//! Output is a pure function of the schema and [`StoryOptions`]: every
//! listing walks `properties` and `imports_used` in key order, so rendering
//! the same schema twice yields identical text.

use scoop_parser::{ComponentSchema, ControlKind, ControlSpec, PropertyRecord};

use crate::error::RenderError;
use crate::tree::{BASE_INDENT, component_chain, render_tree};
use crate::wrap::{WrapNode, parse_wrap_spec};

/// Wrap spec used when none is configured.
pub const DEFAULT_WRAP: &str = "div";

const STORY_HEADER: &str = "import React from \"react\"\nimport type {Story} from \"@ladle/react\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryOptions {
    /// Stem of the component's source file; the story imports `./<stem>`.
    pub file_stem: String,
    pub wrappers: Vec<WrapNode>,
}

impl StoryOptions {
    /// # Errors
    /// Returns `RenderError::InvalidWrapSpec` if `wrap` does not parse.
    pub fn new(file_stem: &str, wrap: &str) -> Result<Self, RenderError> {
        Ok(Self {
            file_stem: file_stem.to_string(),
            wrappers: parse_wrap_spec(wrap)?,
        })
    }
}

/// `Taco` -> `Taco.stories.tsx`.
#[must_use]
pub fn story_file_name(component: &str) -> String {
    format!("{component}.stories.tsx")
}

/// Render the story module for `schema`.
#[must_use]
pub fn render_story(schema: &ComponentSchema, options: &StoryOptions) -> String {
    let story = format!("{}Story", schema.name);
    let mut out = String::new();

    out.push_str(STORY_HEADER);
    out.push_str("\n\n");
    out.push_str(&component_import(schema, &options.file_stem));
    for (module, symbols) in schema.imports_by_module() {
        out.push_str(&module_imports(module, &symbols));
    }
    out.push_str("\n\n");

    out.push_str(&story_declaration(&story, schema));
    out.push_str("\n  return (\n");
    let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
    let chain = component_chain(&options.wrappers, &schema.name, &names, schema.has_children);
    out.push_str(&render_tree(&chain, &schema.name, BASE_INDENT));
    out.push_str("\n  )\n}");

    let args: Vec<String> = schema
        .properties
        .values()
        .filter(|p| !p.is_markup)
        .filter_map(|p| Some(format!("  {}: {},", p.name, p.default_value_text.as_deref()?)))
        .collect();
    if !args.is_empty() {
        out.push_str(&format!("\n\n{story}.args = {{\n{}\n}}", args.join("\n")));
    }

    let arg_types: Vec<String> = schema
        .properties
        .values()
        .filter_map(|p| Some(arg_type_entry(&p.name, p.control.as_ref()?)))
        .collect();
    if arg_types.is_empty() {
        out.push_str(&format!("\n\n{story}.argTypes = {{}}"));
    } else {
        out.push_str(&format!(
            "\n\n{story}.argTypes = {{\n{}\n}}",
            arg_types.join(",\n")
        ));
    }

    tracing::debug!(
        component = %schema.name,
        args = args.len(),
        arg_types = arg_types.len(),
        "rendered story"
    );
    out
}

fn component_import(schema: &ComponentSchema, file_stem: &str) -> String {
    if schema.is_default_export {
        format!("import {} from \"./{file_stem}\"", schema.name)
    } else {
        format!("import {{{}}} from \"./{file_stem}\"", schema.name)
    }
}

/// Import lines for one module. Namespace bindings (`* as X`) cannot share
/// braces with named ones, so each gets its own line.
fn module_imports(module: &str, symbols: &[&str]) -> String {
    let (namespaces, named): (Vec<&str>, Vec<&str>) =
        symbols.iter().copied().partition(|symbol| symbol.starts_with("* as "));
    let mut lines: String = namespaces
        .iter()
        .map(|namespace| format!("\nimport {namespace} from \"{module}\""))
        .collect();
    if !named.is_empty() {
        lines.push_str(&format!("\nimport {{{}}} from \"{module}\"", named.join(", ")));
    }
    lines
}

/// `export const XStory: Story<{...}> = ({...}) => {`
fn story_declaration(story: &str, schema: &ComponentSchema) -> String {
    if schema.properties.is_empty() {
        return format!("export const {story}: Story<{{}}> = () => {{");
    }
    let contract: String = schema.properties.values().map(contract_line).collect();
    let params = schema
        .properties
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",\n  ");
    format!("export const {story}: Story<{{{contract}\n}}> = ({{\n  {params}\n}}) => {{")
}

fn contract_line(property: &PropertyRecord) -> String {
    let optional = if property.is_optional { "?" } else { "" };
    format!("\n  {}{optional}: {}", property.name, property.type_text)
}

fn arg_type_entry(name: &str, control: &ControlSpec) -> String {
    if control.kind == ControlKind::Action {
        let action = control.action_name.as_deref().unwrap_or(name);
        return format!("  {name}: {{\n    action: \"{action}\",\n  }}");
    }
    let options = control
        .options
        .iter()
        .map(|option| format!("      {option}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "  {name}: {{\n    control: {{type: \"{}\"}},\n    options: [\n{options}\n    ],\n  }}",
        control.kind.as_str()
    )
}
