use glam::Vec3;
use marionette_common::Geometry;

use crate::scene::RetainedScene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(10.0, 5.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 30.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the retained scene and never writes pose state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &RetainedScene, view: &RenderView) -> Self::Output;
}

/// Text renderer for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &RetainedScene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (nodes={}, pushes={}) ===\n",
            scene.attached().count(),
            scene.transform_pushes()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for node in scene.attached() {
            let p = node.world.translation();
            let up = node.world.transform_vector(Vec3::Y);
            let shape = match node.geometry {
                Geometry::Box { .. } => "box",
                Geometry::Sphere { .. } => "sphere",
            };
            out.push_str(&format!(
                "  [{:>2}] {:<6} pos=({:.2}, {:.2}, {:.2}) up=({:.2}, {:.2}, {:.2})\n",
                node.handle.0, shape, p.x, p.y, p.z, up.x, up.y, up.z
            ));
        }

        out
    }
}
