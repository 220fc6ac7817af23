//! Pose kernel: the articulated figure, its segment tree, and world
//! transform propagation.
//!
//! # Invariants
//! - `world(segment) = world(parent) · pose(segment) · initial_offset(segment)`.
//! - Initial offsets are fixed at build; poses change only by composition.
//! - Every mutation recomputes its subtree top-down and pushes it before returning.

pub mod figure;
pub mod params;
pub mod segment;

pub use figure::{Figure, FigureError, PoseCommand, PoseEvent};
pub use params::FigureParams;
pub use segment::{Segment, SegmentId};
