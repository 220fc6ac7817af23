use marionette_common::Axis;
use marionette_kernel::{PoseCommand, SegmentId};
use std::collections::BTreeSet;

use crate::action::Action;
use crate::selection::Selection;

/// Default angle (radians) or distance applied per key press.
pub const DEFAULT_STEP: f32 = 0.1;

/// Errors from configuring the input collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("step must be positive and finite, got {0}")]
    InvalidStep(f32),
}

/// Tracks which actions were active last frame to report fresh presses.
#[derive(Debug, Clone, Default)]
pub struct ActionEdges {
    previous: BTreeSet<Action>,
}

impl ActionEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions held now but not on the previous call, in [`Action`] order.
    pub fn update(&mut self, held: &BTreeSet<Action>) -> Vec<Action> {
        let fresh = held.difference(&self.previous).copied().collect();
        self.previous = held.clone();
        fresh
    }
}

/// The input-side collaborator: owns the selection and turns fresh actions
/// into at most one pose command per frame.
#[derive(Debug, Clone)]
pub struct Puppeteer {
    selection: Selection,
    edges: ActionEdges,
    step: f32,
}

impl Default for Puppeteer {
    fn default() -> Self {
        Self {
            selection: Selection::new(),
            edges: ActionEdges::new(),
            step: DEFAULT_STEP,
        }
    }
}

impl Puppeteer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(step: f32) -> Result<Self, InputError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(InputError::InvalidStep(step));
        }
        Ok(Self {
            step,
            ..Self::default()
        })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn selected(&self) -> SegmentId {
        self.selection.current()
    }

    /// Poll one frame of held actions.
    ///
    /// Selection changes apply first. Then the first freshly pressed pose
    /// action that has a binding for the selected segment becomes the
    /// frame's command; the rest are dropped.
    pub fn poll(&mut self, held: &BTreeSet<Action>) -> Option<PoseCommand> {
        let fresh = self.edges.update(held);

        for action in fresh.iter().filter(|a| a.is_selection()) {
            let selected = match action {
                Action::SelectNext => self.selection.next(),
                _ => self.selection.previous(),
            };
            tracing::info!(segment = %selected, "selected");
        }

        fresh
            .iter()
            .filter(|a| !a.is_selection())
            .find_map(|a| command_for(self.selected(), *a, self.step))
    }
}

/// The command an action triggers on `segment`, if it is bound at all.
///
/// The torso walks and turns; the head only turns; arms and forearms swing
/// about X and turn about Y; legs only swing about X.
pub fn command_for(segment: SegmentId, action: Action, step: f32) -> Option<PoseCommand> {
    use SegmentId::*;
    let rotate = |angle: f32, axis: Axis| {
        Some(PoseCommand::RotateSegment {
            segment,
            angle,
            axis,
        })
    };
    match (segment, action) {
        (_, Action::SelectNext | Action::SelectPrevious) => None,
        (Torso, Action::Increase) => Some(PoseCommand::MoveTorso { distance: step }),
        (Torso, Action::Decrease) => Some(PoseCommand::MoveTorso { distance: -step }),
        (Torso, Action::RotateLeft) => Some(PoseCommand::RotateTorso { angle: step }),
        (Torso, Action::RotateRight) => Some(PoseCommand::RotateTorso { angle: -step }),
        (Head, Action::RotateLeft) => rotate(step, Axis::Y),
        (Head, Action::RotateRight) => rotate(-step, Axis::Y),
        (Head, _) => None,
        (LeftArm | RightArm | LeftForearm | RightForearm, Action::Increase) => rotate(step, Axis::X),
        (LeftArm | RightArm | LeftForearm | RightForearm, Action::Decrease) => {
            rotate(-step, Axis::X)
        }
        (LeftArm | RightArm | LeftForearm | RightForearm, Action::RotateLeft) => {
            rotate(step, Axis::Y)
        }
        (LeftArm | RightArm | LeftForearm | RightForearm, Action::RotateRight) => {
            rotate(-step, Axis::Y)
        }
        (LeftThigh | RightThigh | LeftShin | RightShin, Action::Increase) => rotate(step, Axis::X),
        (LeftThigh | RightThigh | LeftShin | RightShin, Action::Decrease) => rotate(-step, Axis::X),
        (LeftThigh | RightThigh | LeftShin | RightShin, _) => None,
    }
}
