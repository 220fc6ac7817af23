use crate::transform::Transform;
use crate::types::{Geometry, Material, NodeHandle};

/// The rendering collaborator as seen from the pose core.
///
/// The core computes absolute world transforms itself and pushes them, so
/// implementations never need a renderer-side hierarchy.
pub trait Scene {
    /// Create a renderable node. It is not drawn until attached.
    fn create_node(&mut self, geometry: Geometry, material: Material) -> NodeHandle;

    /// Add a node to the top level of the scene.
    fn attach_to_scene(&mut self, node: NodeHandle);

    /// Place a node for the next redraw.
    fn set_world_transform(&mut self, node: NodeHandle, transform: &Transform);
}

/// A scene that accepts every call and draws nothing.
///
/// Useful for replaying or benchmarking poses without a renderer.
#[derive(Debug, Default)]
pub struct NullScene {
    next: u32,
}

impl NullScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for NullScene {
    fn create_node(&mut self, _geometry: Geometry, _material: Material) -> NodeHandle {
        let handle = NodeHandle(self.next);
        self.next += 1;
        handle
    }

    fn attach_to_scene(&mut self, _node: NodeHandle) {}

    fn set_world_transform(&mut self, _node: NodeHandle, _transform: &Transform) {}
}
