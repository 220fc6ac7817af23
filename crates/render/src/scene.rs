use marionette_common::{Geometry, Material, NodeHandle, Scene, Transform};

/// A node as last described by the pose core.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub handle: NodeHandle,
    pub geometry: Geometry,
    pub material: Material,
    pub attached: bool,
    pub world: Transform,
}

/// In-memory [`Scene`] that keeps the latest state of every node.
///
/// Stands in for a GPU scene graph: renderers read it, the pose core writes it.
#[derive(Debug, Default)]
pub struct RetainedScene {
    nodes: Vec<Node>,
    transform_pushes: u64,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0 as usize)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes that will actually be drawn.
    pub fn attached(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.attached)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total `set_world_transform` calls accepted so far.
    pub fn transform_pushes(&self) -> u64 {
        self.transform_pushes
    }
}

impl Scene for RetainedScene {
    fn create_node(&mut self, geometry: Geometry, material: Material) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Node {
            handle,
            geometry,
            material,
            attached: false,
            world: Transform::IDENTITY,
        });
        handle
    }

    fn attach_to_scene(&mut self, node: NodeHandle) {
        match self.nodes.get_mut(node.0 as usize) {
            Some(n) => n.attached = true,
            None => tracing::warn!(node = node.0, "attach of unknown node ignored"),
        }
    }

    fn set_world_transform(&mut self, node: NodeHandle, transform: &Transform) {
        match self.nodes.get_mut(node.0 as usize) {
            Some(n) => {
                n.world = *transform;
                self.transform_pushes += 1;
            }
            None => tracing::warn!(node = node.0, "transform for unknown node ignored"),
        }
    }
}
