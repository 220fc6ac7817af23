//! Shared math and renderer-boundary types.
//!
//! # Invariants
//! - Transform operations are pure; nothing here mutates its inputs.
//! - The renderer is reached only through the [`Scene`] trait.

pub mod scene;
pub mod transform;
pub mod types;

pub use scene::{NullScene, Scene};
pub use transform::{Axis, Transform, TransformError};
pub use types::{Geometry, Material, NodeHandle};

pub fn crate_info() -> &'static str {
    "marionette-common v0.1.0"
}
