//! Schema types produced by extraction and consumed by the renderer.

mod component;
mod diagnostic;
mod property;

pub use component::ComponentSchema;
pub use diagnostic::{Diagnostic, Severity};
pub use property::{ControlKind, ControlSpec, PropertyRecord, TypeKind};
