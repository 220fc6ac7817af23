//! Rendering adapter: a retained scene the pose core writes into, and a
//! renderer-agnostic interface that reads it.
//!
//! # Invariants
//! - Renderers cannot mutate pose state.
//! - Render output derives only from the latest pushed world transforms.
//!
//! # Workaround
//! Ships a debug text renderer in place of a GPU backend. The [`Renderer`]
//! trait is stable; a real backend can consume [`RetainedScene`] unchanged.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{Node, RetainedScene};

pub fn crate_info() -> &'static str {
    "marionette-render v0.1.0"
}
