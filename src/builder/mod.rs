//! Value builders
//!
//! A value builder composes the text for one layer from literal text,
//! separators and resolved key paths.

pub mod part;
pub mod eval;

pub use part::{BuilderPart, PartKind, ValueBuilder};
pub use eval::{display_value, evaluate_builder};
