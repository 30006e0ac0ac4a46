//! Classification of a normalized [`TypeShape`] into a property kind,
//! control and default.

use crate::shape::{Primitive, TypeShape};
use crate::types::{ControlSpec, TypeKind};

/// Default text for markup-typed properties: an empty fragment.
pub const EMPTY_FRAGMENT: &str = "<></>";

/// Outcome of looking up a referenced type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An enum-like; `options` are qualified with the referenced name.
    Enum { options: Vec<String>, module: String },
    /// An object-shaped type with a serialized placeholder.
    Complex { placeholder: String, module: String },
    /// Imported, but neither enum-like nor object-shaped after resolution.
    /// `symbol` is the import clause the story needs (`Theme`,
    /// `* as Theme`, `default as Theme`).
    Imported { symbol: String, module: String },
    Unresolved,
}

/// Looks up type names against the registries, resolving imports on demand.
pub trait ResolveType {
    fn resolve_type(&mut self, name: &str) -> Resolution;
}

/// Everything classification derives for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: TypeKind,
    pub control: Option<ControlSpec>,
    pub default: Option<String>,
    pub markup: bool,
    /// Symbol the story must import, with its module path.
    pub import: Option<(String, String)>,
}

impl Classification {
    const fn of(kind: TypeKind) -> Self {
        Self {
            kind,
            control: None,
            default: None,
            markup: false,
            import: None,
        }
    }

    fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    fn with_control(mut self, control: ControlSpec) -> Self {
        self.control = Some(control);
        self
    }

    fn importing(mut self, symbol: &str, module: String) -> Self {
        self.import = Some((symbol.to_string(), module));
        self
    }

    fn canonical(kind: TypeKind) -> Self {
        let class = Self::of(kind);
        match kind.canonical_default() {
            Some(default) => class.with_default(default),
            None => class,
        }
    }
}

const fn primitive_kind(primitive: Primitive) -> TypeKind {
    match primitive {
        Primitive::Boolean => TypeKind::Boolean,
        Primitive::String => TypeKind::String,
        Primitive::Number => TypeKind::Number,
    }
}

/// Classify one property. Never fails: unrecognized shapes are `Unknown`.
pub fn classify<R: ResolveType>(
    prop_name: &str,
    shape: &TypeShape,
    resolver: &mut R,
) -> Classification {
    match shape {
        TypeShape::Keyword(primitive) => Classification::canonical(primitive_kind(*primitive)),
        TypeShape::LiteralUnion(tokens) => Classification::of(TypeKind::LiteralUnion)
            .with_control(ControlSpec::choice(tokens.clone())),
        TypeShape::MixedUnion { has_string, .. } => Classification::canonical(if *has_string {
            TypeKind::String
        } else {
            TypeKind::Number
        }),
        TypeShape::Function => Classification::of(TypeKind::FunctionType)
            .with_control(ControlSpec::action(prop_name)),
        TypeShape::Reference(name) | TypeShape::IndexedAccess(name) => {
            classify_reference(name, resolver)
        }
        TypeShape::Markup(_) => {
            let mut class =
                Classification::of(TypeKind::ArrayOrComplexRef).with_default(EMPTY_FRAGMENT);
            class.markup = true;
            class
        }
        TypeShape::Array(element) => classify_array(element, resolver),
        TypeShape::Object(placeholder) => {
            Classification::of(TypeKind::ArrayOrComplexRef).with_default(&placeholder.to_string())
        }
        TypeShape::Opaque => Classification::of(TypeKind::Unknown),
    }
}

fn classify_reference<R: ResolveType>(name: &str, resolver: &mut R) -> Classification {
    match resolver.resolve_type(name) {
        Resolution::Enum { options, module } => {
            let first = options.first().cloned();
            let mut class = Classification::of(TypeKind::EnumRef)
                .with_control(ControlSpec::choice(options))
                .importing(name, module);
            class.default = first;
            class
        }
        Resolution::Complex {
            placeholder,
            module,
        } => Classification::of(TypeKind::ArrayOrComplexRef)
            .with_default(&placeholder)
            .importing(name, module),
        Resolution::Imported { symbol, module } => {
            Classification::of(TypeKind::Unknown).importing(&symbol, module)
        }
        Resolution::Unresolved => Classification::of(TypeKind::Unknown),
    }
}

/// Arrays of enum-likes and literal unions get a multi-select control; any
/// other array is opaque data without a default.
fn classify_array<R: ResolveType>(element: &TypeShape, resolver: &mut R) -> Classification {
    let array = Classification::of(TypeKind::ArrayOrComplexRef);
    match element {
        TypeShape::Reference(name) | TypeShape::IndexedAccess(name) => {
            match resolver.resolve_type(name) {
                Resolution::Enum { options, module } => Classification::of(TypeKind::EnumRef)
                    .with_control(ControlSpec::multi_select(options))
                    .importing(name, module),
                Resolution::Complex { module, .. } => array.importing(name, module),
                Resolution::Imported { symbol, module } => array.importing(&symbol, module),
                Resolution::Unresolved => array,
            }
        }
        TypeShape::LiteralUnion(tokens) => Classification::of(TypeKind::LiteralUnion)
            .with_control(ControlSpec::multi_select(tokens.clone())),
        _ => array,
    }
}
