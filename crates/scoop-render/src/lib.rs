//! # scoop-render
//!
//! Turns a [`ComponentSchema`](scoop_parser::ComponentSchema) into Ladle
//! story source. The component is nested inside the wrappers described by a
//! wrap spec (`div(className='wrap'),MyProvider`), bound to one story arg per
//! prop, and followed by `args` and `argTypes` blocks.

pub mod error;
pub mod story;
pub mod tree;
pub mod wrap;

pub use error::RenderError;
pub use story::{DEFAULT_WRAP, StoryOptions, render_story, story_file_name};
pub use wrap::{Attribute, WrapNode, parse_wrap_spec};
