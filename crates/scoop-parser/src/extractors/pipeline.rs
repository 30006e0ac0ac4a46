//! Per-file extraction: three folds over the top-level declarations.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use ast_grep_core::Node;
use serde::{Deserialize, Serialize};

use super::bindings::{
    Initializer, ParamBinding, component_functions, exported_names, param_bindings,
};
use super::helpers::{
    annotated_type, field_text, has_optional_marker, named_children, single_line,
};
use super::props::{Resolution, ResolveType, classify};
use super::{Declaration, defaults, enums, imports, top_level_declarations};
use crate::error::ParserError;
use crate::naming::{DEFAULT_PROPS_FORMAT, PropsPattern};
use crate::parser::{SourceCache, SourceProvider, normalize_path, resolve_module_path};
use crate::registry::{ComplexDefaultRegistry, EnumRegistry, ImportEntry, ImportRegistry};
use crate::shape;
use crate::types::{ComponentSchema, ControlSpec, Diagnostic, PropertyRecord, TypeKind};

/// Knobs for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub props_format: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            props_format: DEFAULT_PROPS_FORMAT.to_string(),
        }
    }
}

/// Result of extracting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExtraction {
    pub file_path: PathBuf,
    /// Input file name without extension; stories import the component
    /// from `./<file_stem>`.
    pub file_stem: String,
    /// Components whose render function was located, by name.
    pub components: Vec<ComponentSchema>,
    pub enums: EnumRegistry,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileExtraction {
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&ComponentSchema> {
        self.components.iter().find(|c| c.name == name)
    }
}

/// Everything an extraction pass needs besides the state it folds.
pub(crate) struct Context<'c, P: SourceProvider> {
    cache: &'c mut SourceCache<P>,
    importer: PathBuf,
    /// `./<stem>` import path for symbols defined in the file itself.
    local_module: String,
    pattern: PropsPattern,
}

/// State threaded through the passes. Each `apply_*` consumes the state and
/// returns the next one.
#[derive(Debug, Default)]
pub struct ExtractionState {
    enums: EnumRegistry,
    imports: ImportRegistry,
    complex: ComplexDefaultRegistry,
    components: BTreeMap<String, ComponentSchema>,
    /// Module specifiers already resolved.
    resolved_modules: BTreeSet<String>,
    /// Names published by `export { X }` / `export default X`, with the
    /// default flag.
    export_clauses: BTreeMap<String, bool>,
}

impl ExtractionState {
    // ── Pass 1: registries ─────────────────────────────────────────

    /// Record imports, exported enum-likes and exported object shapes.
    #[must_use]
    pub fn apply_registry<D: ast_grep_core::Doc>(self, declaration: &Declaration<'_, D>) -> Self {
        let node = &declaration.node;
        if node.kind().as_ref() == "import_statement" {
            return self.register_imports(node);
        }
        if enums::enum_like(node).is_some() {
            return self.register_enum_like(declaration);
        }
        self.register_local_shape(declaration)
    }

    /// Register an exported enum or const object. Unexported declarations
    /// and objects with too few literal members are skipped.
    #[must_use]
    pub fn register_enum_like<D: ast_grep_core::Doc>(
        mut self,
        declaration: &Declaration<'_, D>,
    ) -> Self {
        if !declaration.exported {
            return self;
        }
        if let Some((name, entry)) = enums::enum_like(&declaration.node) {
            tracing::debug!(%name, members = entry.len(), "registered enum-like");
            self.enums.register(&name, entry);
        }
        self
    }

    fn register_imports<D: ast_grep_core::Doc>(mut self, node: &Node<'_, D>) -> Self {
        for binding in imports::import_bindings(node) {
            self.imports
                .insert(&binding.local, &binding.imported, &binding.module);
        }
        self
    }

    fn register_local_shape<D: ast_grep_core::Doc>(
        mut self,
        declaration: &Declaration<'_, D>,
    ) -> Self {
        if !declaration.exported {
            return self;
        }
        if let Some(name) = field_text(&declaration.node, "name")
            && let Some(placeholder) = defaults::declaration_placeholder(&declaration.node)
        {
            self.complex.insert(&name, placeholder);
        }
        self
    }

    // ── Pass 2: props types ────────────────────────────────────────

    /// Extract the members of a props type or interface whose name matches
    /// the props pattern.
    #[must_use]
    pub(crate) fn apply_props_type<D: ast_grep_core::Doc, P: SourceProvider>(
        mut self,
        ctx: &mut Context<'_, P>,
        declaration: &Declaration<'_, D>,
    ) -> Self {
        let node = &declaration.node;
        let body = match node.kind().as_ref() {
            "type_alias_declaration" => node.field("value"),
            "interface_declaration" => node.field("body"),
            _ => return self,
        };
        let Some(props_name) = field_text(node, "name") else {
            return self;
        };
        let Some(component) = ctx.pattern.component_name(&props_name).map(str::to_string) else {
            return self;
        };
        let mut members = Vec::new();
        if let Some(body) = body {
            collect_members(&body, &mut members);
        }
        if members.is_empty() {
            tracing::debug!(%props_name, "props type has no object members");
        }

        self.components
            .entry(component.clone())
            .or_insert_with(|| ComponentSchema::new(&component));
        for member in &members {
            self = self.apply_member(ctx, &component, member);
        }
        self
    }

    fn apply_member<D: ast_grep_core::Doc, P: SourceProvider>(
        mut self,
        ctx: &mut Context<'_, P>,
        component: &str,
        member: &Node<'_, D>,
    ) -> Self {
        let Some(prop_name) = field_text(member, "name") else {
            return self;
        };
        let is_optional = has_optional_marker(member);
        let record = match member.kind().as_ref() {
            "property_signature" => {
                if prop_name == "children" {
                    self.schema_mut(component).has_children = true;
                    return self;
                }
                let Some(type_node) = annotated_type(member, "type") else {
                    return self;
                };
                self.extract_property(ctx, component, &prop_name, &type_node, is_optional)
            }
            "method_signature" => PropertyRecord::new(
                &prop_name,
                is_optional,
                &method_type_text(member),
                TypeKind::FunctionType,
            )
            .with_control(Some(ControlSpec::action(&prop_name))),
            _ => return self,
        };
        self.schema_mut(component).insert_property(record);
        self
    }

    /// Classify one declared property. Never fails: shapes that cannot be
    /// recognized or resolved become `Unknown`.
    pub(crate) fn extract_property<D: ast_grep_core::Doc, P: SourceProvider>(
        &mut self,
        ctx: &mut Context<'_, P>,
        component: &str,
        prop_name: &str,
        type_node: &Node<'_, D>,
        is_optional: bool,
    ) -> PropertyRecord {
        let shape = shape::normalize(type_node);
        let class = classify(prop_name, &shape, &mut Resolver { state: self, ctx });
        tracing::debug!(
            component,
            prop = prop_name,
            kind = %class.kind,
            ?shape,
            "classified property"
        );

        if let Some((symbol, module)) = &class.import {
            self.schema_mut(component).use_import(symbol, module);
        }
        let record = PropertyRecord::new(
            prop_name,
            is_optional,
            &single_line(&type_node.text()),
            class.kind,
        )
        .with_default(class.default)
        .with_control(class.control);
        if class.markup { record.markup() } else { record }
    }

    // ── Pass 3: component functions ────────────────────────────────

    /// Locate render functions of known components and merge the defaults
    /// of their destructured props.
    #[must_use]
    pub(crate) fn apply_function<D: ast_grep_core::Doc, P: SourceProvider>(
        mut self,
        ctx: &mut Context<'_, P>,
        declaration: &Declaration<'_, D>,
    ) -> Self {
        for (name, is_default) in exported_names(&declaration.node) {
            *self.export_clauses.entry(name).or_default() |= is_default;
        }
        for function in component_functions(declaration) {
            let Some(schema) = self.components.get_mut(&function.name) else {
                continue;
            };
            schema.has_render_function = true;
            schema.is_exported |= declaration.exported;
            schema.is_default_export |= declaration.default_export;
            tracing::debug!(component = %function.name, "located render function");

            for binding in param_bindings(&function.function) {
                self.merge_binding(ctx, &function.name, binding);
            }
        }
        self
    }

    fn merge_binding<P: SourceProvider>(
        &mut self,
        ctx: &mut Context<'_, P>,
        component: &str,
        binding: ParamBinding,
    ) {
        let Some(kind) = self
            .components
            .get(component)
            .and_then(|s| s.properties.get(&binding.prop))
            .map(|p| p.type_kind)
        else {
            tracing::debug!(component, prop = %binding.prop, "binding has no declared prop");
            return;
        };

        let default = match binding.initializer {
            None => match kind {
                TypeKind::Number | TypeKind::String => kind.canonical_default().map(str::to_string),
                _ => return,
            },
            Some(Initializer::Literal(text)) => Some(text),
            Some(Initializer::EnumMember { enum_name, member }) => {
                self.attach_enum_default(ctx, component, &binding.prop, &enum_name);
                Some(format!("{enum_name}.{member}"))
            }
            Some(Initializer::Other(text)) => {
                tracing::debug!(
                    component,
                    prop = %binding.prop,
                    %text,
                    "non-literal default kept out"
                );
                return;
            }
        };
        if let Some(property) = self.property_mut(component, &binding.prop) {
            property.default_value_text = default;
        }
    }

    /// `prop = Enum.member`: import the enum, and give a property without a
    /// control the enum's choices.
    fn attach_enum_default<P: SourceProvider>(
        &mut self,
        ctx: &mut Context<'_, P>,
        component: &str,
        prop: &str,
        enum_name: &str,
    ) {
        let resolution = Resolver { state: self, ctx }.resolve_type(enum_name);
        let (options, symbol, module) = match resolution {
            Resolution::Enum { options, module } => (Some(options), enum_name.to_string(), module),
            Resolution::Complex { module, .. } => (None, enum_name.to_string(), module),
            Resolution::Imported { symbol, module } => (None, symbol, module),
            Resolution::Unresolved => return,
        };
        self.schema_mut(component).use_import(&symbol, &module);
        if let Some(options) = options
            && let Some(property) = self.property_mut(component, prop)
            && property.control.is_none()
        {
            property.type_kind = TypeKind::EnumRef;
            property.control = Some(ControlSpec::choice(options));
        }
    }

    // ── Output ─────────────────────────────────────────────────────

    /// Close the run: apply export clauses, collect diagnostics and keep
    /// only components with a render function.
    #[must_use]
    pub fn finish(mut self, file_path: &Path) -> FileExtraction {
        let mut diagnostics = Vec::new();
        let mut components = Vec::new();
        for (name, mut schema) in std::mem::take(&mut self.components) {
            if let Some(is_default) = self.export_clauses.get(&name) {
                schema.is_exported = true;
                schema.is_default_export |= is_default;
            }
            if !schema.has_render_function {
                diagnostics.push(Diagnostic::info(
                    &name,
                    format!("Props type for {name} matched but no component function was found"),
                ));
                continue;
            }
            if !schema.is_exported {
                diagnostics.push(Diagnostic::warning(
                    &name,
                    format!("Component {name} is not exported"),
                ));
            }
            components.push(schema);
        }
        FileExtraction {
            file_path: file_path.to_path_buf(),
            file_stem: crate::parser::file_stem(file_path),
            components,
            enums: self.enums,
            diagnostics,
        }
    }

    fn schema_mut(&mut self, component: &str) -> &mut ComponentSchema {
        self.components
            .entry(component.to_string())
            .or_insert_with(|| ComponentSchema::new(component))
    }

    fn property_mut(&mut self, component: &str, prop: &str) -> Option<&mut PropertyRecord> {
        self.components
            .get_mut(component)
            .and_then(|s| s.properties.get_mut(prop))
    }

    /// Import path for a symbol visible in the file under extraction.
    fn module_for(&self, name: &str, local_module: &str) -> String {
        self.imports
            .get(name)
            .map_or_else(|| local_module.to_string(), |e| e.module.clone())
    }

    /// Resolve one imported module (one hop) and register what it exports
    /// under the local names bound from it.
    fn resolve_import<P: SourceProvider>(
        &mut self,
        ctx: &mut Context<'_, P>,
        entry: &ImportEntry,
    ) {
        if !self.resolved_modules.insert(entry.module.clone()) {
            return;
        }
        let Some(module_path) = resolve_module_path(&ctx.importer, &entry.module) else {
            tracing::debug!(module = %entry.module, "package import, not resolved");
            return;
        };
        let exports = enums::resolve_enums_from_module(ctx.cache, &module_path);
        let bound: Vec<(String, String)> = self
            .imports
            .from_module(&entry.module)
            .map(|(local, e)| (local.clone(), e.imported.clone()))
            .collect();
        for (local, imported) in bound {
            if let Some(found) = exports.enum_entry(&imported) {
                self.enums.register(&local, found.clone());
            } else if let Some(shape) = exports.shapes.get(&imported) {
                self.complex.insert(&local, shape.clone());
            }
        }
    }
}

/// Object members of a props body; intersections contribute every object
/// literal they contain.
fn collect_members<'r, D: ast_grep_core::Doc>(body: &Node<'r, D>, out: &mut Vec<Node<'r, D>>) {
    match body.kind().as_ref() {
        "object_type" | "interface_body" => out.extend(
            named_children(body)
                .into_iter()
                .filter(|m| matches!(m.kind().as_ref(), "property_signature" | "method_signature")),
        ),
        "intersection_type" | "parenthesized_type" => {
            for part in named_children(body) {
                collect_members(&part, out);
            }
        }
        _ => {}
    }
}

/// `onSave(value: string): void` rendered as `(value: string) => void`.
fn method_type_text<D: ast_grep_core::Doc>(member: &Node<'_, D>) -> String {
    let params = member
        .field("parameters")
        .map_or_else(|| "()".to_string(), |p| single_line(&p.text()));
    let returns = annotated_type(member, "return_type")
        .map_or_else(|| "void".to_string(), |r| single_line(&r.text()));
    format!("{params} => {returns}")
}

/// Registry lookups for one classification, resolving imports on demand.
struct Resolver<'a, 'c, P: SourceProvider> {
    state: &'a mut ExtractionState,
    ctx: &'a mut Context<'c, P>,
}

impl<P: SourceProvider> Resolver<'_, '_, P> {
    fn lookup(&self, name: &str) -> Option<Resolution> {
        let module = self.state.module_for(name, &self.ctx.local_module);
        if let Some(entry) = self.state.enums.get(name) {
            return Some(Resolution::Enum {
                options: entry.qualified_options(name),
                module,
            });
        }
        self.state
            .complex
            .serialized(name)
            .map(|placeholder| Resolution::Complex {
                placeholder,
                module,
            })
    }
}

impl<P: SourceProvider> ResolveType for Resolver<'_, '_, P> {
    fn resolve_type(&mut self, name: &str) -> Resolution {
        if let Some(found) = self.lookup(name) {
            return found;
        }
        // `Theme.Color` is only reachable through the import of `Theme`.
        if let Some((qualifier, _)) = name.split_once('.') {
            return self
                .state
                .imports
                .get(qualifier)
                .map_or(Resolution::Unresolved, |entry| Resolution::Imported {
                    symbol: import_symbol(qualifier, entry),
                    module: entry.module.clone(),
                });
        }
        let Some(entry) = self.state.imports.get(name).cloned() else {
            return Resolution::Unresolved;
        };
        if !matches!(entry.imported.as_str(), "default" | "*") {
            self.state.resolve_import(self.ctx, &entry);
        }
        self.lookup(name).unwrap_or_else(|| Resolution::Imported {
            symbol: import_symbol(name, &entry),
            module: entry.module,
        })
    }
}

/// Import clause that binds `local` the way the source file binds it.
fn import_symbol(local: &str, entry: &ImportEntry) -> String {
    match entry.imported.as_str() {
        "*" => format!("* as {local}"),
        "default" => format!("default as {local}"),
        _ => local.to_string(),
    }
}

/// Extract every component of one TypeScript file.
///
/// # Errors
/// Returns `ParserError` when the props format is invalid or the input file
/// cannot be loaded. Problems inside the file only produce diagnostics.
pub fn extract_file<P: SourceProvider>(
    path: &Path,
    options: &ExtractOptions,
    cache: &mut SourceCache<P>,
) -> Result<FileExtraction, ParserError> {
    let pattern = PropsPattern::new(&options.props_format)?;
    let source = cache.load_required(path)?;
    let root = source.root();
    let declarations = top_level_declarations(&root);
    tracing::debug!(
        path = %source.path().display(),
        statements = declarations.len(),
        "extracting components"
    );

    let mut ctx = Context {
        cache,
        importer: source.path().to_path_buf(),
        local_module: format!("./{}", source.stem()),
        pattern,
    };
    let state = declarations
        .iter()
        .fold(ExtractionState::default(), ExtractionState::apply_registry);
    let state = declarations
        .iter()
        .fold(state, |state, d| state.apply_props_type(&mut ctx, d));
    let state = declarations
        .iter()
        .fold(state, |state, d| state.apply_function(&mut ctx, d));
    Ok(state.finish(source.path()))
}

/// Extract from in-memory source text. Relative imports cannot be resolved
/// and degrade like missing modules.
///
/// # Errors
/// Same as [`extract_file`].
pub fn extract_source(
    path: &Path,
    source: &str,
    options: &ExtractOptions,
) -> Result<FileExtraction, ParserError> {
    let files: HashMap<PathBuf, String> =
        std::iter::once((normalize_path(path), source.to_string())).collect();
    extract_file(path, options, &mut SourceCache::new(files))
}
