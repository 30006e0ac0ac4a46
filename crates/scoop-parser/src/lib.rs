//! # scoop-parser
//!
//! ast-grep-based props extraction for storyscoop.
//!
//! Reads a TypeScript/TSX file, matches props types against a naming
//! pattern (`{Component}Props` by default) and produces one
//! [`ComponentSchema`] per component with a located render function:
//! - **Registries**: exported enums and const objects, imports, and
//!   placeholders for object-shaped types
//! - **Classification**: every declared prop is normalized into a
//!   [`TypeShape`](shape::TypeShape) and mapped onto a [`TypeKind`] with an
//!   optional UI control and default
//! - **Binding merge**: defaults from the render function's destructured
//!   parameter override synthesized ones
//!
//! Referenced types imported from relative modules are resolved one hop
//! deep through a [`SourceCache`].

pub mod error;
pub mod extractors;
pub mod naming;
pub mod parser;
pub mod registry;
pub mod shape;
pub mod types;

pub use error::ParserError;
pub use extractors::{ExtractOptions, FileExtraction, extract_file, extract_source};
pub use naming::{COMPONENT_PLACEHOLDER, DEFAULT_PROPS_FORMAT, PropsPattern};
pub use parser::{FsProvider, SourceCache, SourceProvider};
pub use registry::{EnumEntry, EnumRegistry, EnumValue};
pub use types::{
    ComponentSchema, ControlKind, ControlSpec, Diagnostic, PropertyRecord, Severity, TypeKind,
};
