//! Developer tooling: figure inspector.
//!
//! # Invariants
//! - Tools only read figure state.

mod inspector;

pub use inspector::{FigureInspector, FigureSummary, SegmentInfo};

pub fn crate_info() -> &'static str {
    "marionette-tools v0.1.0"
}
