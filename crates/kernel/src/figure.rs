use glam::Vec3;
use marionette_common::transform::rotate_vector;
use marionette_common::{Axis, Material, Scene, Transform, TransformError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::params::FigureParams;
use crate::segment::{Segment, SegmentId};

/// Errors from building or posing a figure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FigureError {
    #[error("unknown segment {0:?}")]
    UnknownSegment(String),
    #[error("segment index {index} out of range (figure has {count} segments)")]
    SegmentOutOfRange { index: usize, count: usize },
    #[error("invalid figure parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f32 },
    #[error("invalid pose command {0:?}")]
    InvalidCommand(String),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// One pose mutation, as produced by an input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PoseCommand {
    /// Walk the whole figure along its facing.
    MoveTorso { distance: f32 },
    /// Yaw the whole figure and its walk direction.
    RotateTorso { angle: f32 },
    /// Rotate one segment (and everything hanging from it).
    RotateSegment {
        segment: SegmentId,
        angle: f32,
        axis: Axis,
    },
}

impl fmt::Display for PoseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseCommand::MoveTorso { distance } => write!(f, "move {distance}"),
            PoseCommand::RotateTorso { angle } => write!(f, "turn {angle}"),
            PoseCommand::RotateSegment {
                segment,
                angle,
                axis,
            } => write!(f, "rotate {} {angle} {axis}", segment.key()),
        }
    }
}

impl FromStr for PoseCommand {
    type Err = FigureError;

    /// Parses `move <distance>`, `turn <angle>` and
    /// `rotate <segment> <angle> <axis>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FigureError::InvalidCommand(s.to_string());
        let number = |tok: &str| tok.parse::<f32>().map_err(|_| invalid());
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            ["move", d] => Ok(PoseCommand::MoveTorso {
                distance: number(*d)?,
            }),
            ["turn", a] => Ok(PoseCommand::RotateTorso { angle: number(*a)? }),
            ["rotate", seg, a, axis] => Ok(PoseCommand::RotateSegment {
                segment: seg.parse()?,
                angle: number(*a)?,
                axis: axis.parse()?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// A record produced by every pose mutation.
///
/// Replaying the log against a freshly built figure with the same
/// parameters reproduces the pose exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PoseEvent {
    /// Torso translated by `delta` in world space.
    Moved { distance: f32, delta: Vec3 },
    /// Torso yawed; carries the walk direction after the turn.
    Turned { angle: f32, walk_direction: Vec3 },
    /// A single segment rotated about one of its local axes.
    Rotated {
        segment: SegmentId,
        angle: f32,
        axis: Axis,
    },
    /// Every pose returned to rest.
    Reset,
}

/// The articulated figure: a fixed tree of segments rooted at the torso.
///
/// Invariant: for every segment,
/// `world = world(parent) · pose · initial_offset`, with the torso's parent
/// world taken as identity. Every mutation recomputes the affected subtree
/// top-down and pushes it to the scene before returning.
#[derive(Debug, Clone)]
pub struct Figure {
    params: FigureParams,
    /// Indexed by [`SegmentId::index`].
    segments: Vec<Segment>,
    walk_direction: Vec3,
    event_log: Vec<PoseEvent>,
}

impl Figure {
    /// Create every segment's node, place the figure at rest, and push the
    /// initial world transforms.
    pub fn build(params: FigureParams, scene: &mut dyn Scene) -> Result<Self, FigureError> {
        params.validate()?;

        let segments = SegmentId::ALL
            .into_iter()
            .map(|id| {
                let geometry = params.geometry(id);
                let node = scene.create_node(geometry, Material::Normal);
                scene.attach_to_scene(node);
                Segment::new(id, node, geometry, params.initial_offset(id))
            })
            .collect();

        let mut figure = Self {
            walk_direction: params.walk_direction,
            params,
            segments,
            event_log: Vec::new(),
        };
        figure.propagate(SegmentId::Torso, scene);
        tracing::info!(
            segments = figure.segments.len(),
            hip_height = figure.params.hip_height(),
            "figure built"
        );
        Ok(figure)
    }

    /// Rebuild a figure and apply a recorded event log to it.
    pub fn replay(
        params: FigureParams,
        events: &[PoseEvent],
        scene: &mut dyn Scene,
    ) -> Result<Self, FigureError> {
        let mut figure = Self::build(params, scene)?;
        for event in events {
            match event {
                PoseEvent::Moved { distance, .. } => figure.move_torso(*distance, scene)?,
                PoseEvent::Turned { angle, .. } => figure.rotate_torso(*angle, scene)?,
                PoseEvent::Rotated {
                    segment,
                    angle,
                    axis,
                } => figure.rotate_segment(*segment, *angle, *axis, scene)?,
                PoseEvent::Reset => figure.reset(scene),
            }
        }
        Ok(figure)
    }

    pub fn params(&self) -> &FigureParams {
        &self.params
    }

    pub fn walk_direction(&self) -> Vec3 {
        self.walk_direction
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn world_transform(&self, id: SegmentId) -> Transform {
        self.segment(id).world
    }

    pub fn local_pose(&self, id: SegmentId) -> Transform {
        self.segment(id).pose
    }

    pub fn initial_offset(&self, id: SegmentId) -> Transform {
        self.segment(id).initial_offset
    }

    /// Direct children of `id`.
    pub fn children(&self, id: SegmentId) -> Vec<SegmentId> {
        SegmentId::ALL
            .into_iter()
            .filter(|c| c.parent() == Some(id))
            .collect()
    }

    /// `id` and everything below it, parents before children.
    pub fn subtree(&self, id: SegmentId) -> Vec<SegmentId> {
        SegmentId::ALL
            .into_iter()
            .filter(|s| *s == id || s.is_descendant_of(id))
            .collect()
    }

    /// Everything below `id`, parents before children.
    pub fn descendants(&self, id: SegmentId) -> Vec<SegmentId> {
        SegmentId::ALL
            .into_iter()
            .filter(|s| s.is_descendant_of(id))
            .collect()
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[PoseEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<PoseEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Walk `distance` along the current walk direction.
    ///
    /// The translation is composed on the world side of the torso pose so
    /// the figure moves exactly along `walk_direction`, whatever its yaw.
    pub fn move_torso(&mut self, distance: f32, scene: &mut dyn Scene) -> Result<(), FigureError> {
        finite("distance", distance)?;
        let delta = self.walk_direction * distance;
        let torso = &mut self.segments[SegmentId::Torso.index()];
        torso.pose = Transform::IDENTITY.translate(delta.x, delta.y, delta.z) * torso.pose;
        self.propagate(SegmentId::Torso, scene);
        self.event_log.push(PoseEvent::Moved { distance, delta });
        Ok(())
    }

    /// Yaw the torso about its own vertical axis and turn the walk
    /// direction by the same angle.
    pub fn rotate_torso(&mut self, angle: f32, scene: &mut dyn Scene) -> Result<(), FigureError> {
        finite("angle", angle)?;
        let torso = &mut self.segments[SegmentId::Torso.index()];
        torso.pose = torso.pose.rotate(angle, Axis::Y);
        self.walk_direction = rotate_vector(self.walk_direction, angle, Axis::Y);
        self.propagate(SegmentId::Torso, scene);
        self.event_log.push(PoseEvent::Turned {
            angle,
            walk_direction: self.walk_direction,
        });
        Ok(())
    }

    /// Compose `R_axis(angle)` onto one segment's pose.
    ///
    /// Descendants follow rigidly. Rotating the torso this way does not
    /// change the walk direction; use [`Figure::rotate_torso`] for turning.
    pub fn rotate_segment(
        &mut self,
        id: SegmentId,
        angle: f32,
        axis: Axis,
        scene: &mut dyn Scene,
    ) -> Result<(), FigureError> {
        finite("angle", angle)?;
        let segment = &mut self.segments[id.index()];
        segment.pose = segment.pose.rotate(angle, axis);
        self.propagate(id, scene);
        self.event_log.push(PoseEvent::Rotated {
            segment: id,
            angle,
            axis,
        });
        Ok(())
    }

    /// Same as [`Figure::rotate_segment`] but addressed by raw index.
    pub fn rotate_segment_at(
        &mut self,
        index: usize,
        angle: f32,
        axis: Axis,
        scene: &mut dyn Scene,
    ) -> Result<(), FigureError> {
        let id = SegmentId::from_index(index)?;
        self.rotate_segment(id, angle, axis, scene)
    }

    /// Dispatch one command.
    pub fn apply(&mut self, command: PoseCommand, scene: &mut dyn Scene) -> Result<(), FigureError> {
        tracing::debug!(%command, "apply pose command");
        match command {
            PoseCommand::MoveTorso { distance } => self.move_torso(distance, scene),
            PoseCommand::RotateTorso { angle } => self.rotate_torso(angle, scene),
            PoseCommand::RotateSegment {
                segment,
                angle,
                axis,
            } => self.rotate_segment(segment, angle, axis, scene),
        }
    }

    /// Return every segment to rest and restore the initial walk direction.
    pub fn reset(&mut self, scene: &mut dyn Scene) {
        for segment in &mut self.segments {
            segment.pose = Transform::IDENTITY;
        }
        self.walk_direction = self.params.walk_direction;
        self.propagate(SegmentId::Torso, scene);
        self.event_log.push(PoseEvent::Reset);
        tracing::info!("figure reset to rest pose");
    }

    /// Recompute world transforms for `root`'s subtree, top-down, and push
    /// each one to the scene.
    fn propagate(&mut self, root: SegmentId, scene: &mut dyn Scene) {
        for id in self.subtree(root) {
            let parent_world = id
                .parent()
                .map(|p| self.segments[p.index()].world)
                .unwrap_or(Transform::IDENTITY);
            let segment = &mut self.segments[id.index()];
            segment.world = parent_world * segment.local();
            segment.push_world(scene);
        }
    }
}

fn finite(what: &'static str, value: f32) -> Result<(), FigureError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FigureError::NonFinite { what, value })
    }
}
