//! Shared types: entity ids, transforms, colors.

pub mod color;
pub mod types;

pub use color::Color;
pub use types::{EntityId, Transform};
