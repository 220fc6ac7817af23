use glam::Vec3;
use marionette_common::Transform;
use marionette_kernel::{Figure, SegmentId};

/// Figure inspector for developer tooling.
///
/// Read-only queries against a figure for debugging and CLI output.
pub struct FigureInspector;

impl FigureInspector {
    /// Produce a summary of the figure state.
    pub fn summary(figure: &Figure) -> FigureSummary {
        FigureSummary {
            segment_count: figure.segments().len(),
            torso_position: figure.world_transform(SegmentId::Torso).translation(),
            walk_direction: figure.walk_direction(),
            logged_events: figure.events().len(),
        }
    }

    /// Placement details for one segment.
    pub fn inspect_segment(figure: &Figure, id: SegmentId) -> SegmentInfo {
        let world = figure.world_transform(id);
        SegmentInfo {
            id,
            parent: id.parent(),
            position: world.translation(),
            up: world.transform_vector(Vec3::Y),
            posed: !figure.local_pose(id).abs_diff_eq(&Transform::IDENTITY, 1e-6),
        }
    }

    /// Info for every segment, parents first.
    pub fn inspect_all(figure: &Figure) -> Vec<SegmentInfo> {
        SegmentId::ALL
            .into_iter()
            .map(|id| Self::inspect_segment(figure, id))
            .collect()
    }
}

/// Summary of figure state for the inspector.
#[derive(Debug, Clone)]
pub struct FigureSummary {
    pub segment_count: usize,
    pub torso_position: Vec3,
    pub walk_direction: Vec3,
    pub logged_events: usize,
}

impl std::fmt::Display for FigureSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Figure: segments={} torso=({:.2}, {:.2}, {:.2}) walk=({:.2}, {:.2}, {:.2}) events={}",
            self.segment_count,
            self.torso_position.x,
            self.torso_position.y,
            self.torso_position.z,
            self.walk_direction.x,
            self.walk_direction.y,
            self.walk_direction.z,
            self.logged_events
        )
    }
}

/// Detailed info about a single segment.
#[derive(Debug, Clone)]
pub struct SegmentInfo {
    pub id: SegmentId,
    pub parent: Option<SegmentId>,
    pub position: Vec3,
    /// The segment's local +Y axis in world space.
    pub up: Vec3,
    /// Whether the segment's own pose differs from rest.
    pub posed: bool,
}

impl std::fmt::Display for SegmentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parent = self.parent.map(|p| p.name()).unwrap_or("-");
        write!(
            f,
            "{:<14} parent={:<10} pos=({:.2}, {:.2}, {:.2}) up=({:.2}, {:.2}, {:.2}){}",
            self.id.name(),
            parent,
            self.position.x,
            self.position.y,
            self.position.z,
            self.up.x,
            self.up.y,
            self.up.z,
            if self.posed { " *" } else { "" }
        )
    }
}
