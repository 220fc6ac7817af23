use marionette_common::{Geometry, NodeHandle, Scene, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::figure::FigureError;

/// Stable identifier for one rigid body part.
///
/// Declaration order puts every parent before its children, so iterating
/// [`SegmentId::ALL`] is a valid top-down traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentId {
    Torso,
    Head,
    LeftArm,
    LeftForearm,
    RightArm,
    RightForearm,
    LeftThigh,
    LeftShin,
    RightThigh,
    RightShin,
}

impl SegmentId {
    pub const COUNT: usize = 10;

    pub const ALL: [SegmentId; Self::COUNT] = [
        SegmentId::Torso,
        SegmentId::Head,
        SegmentId::LeftArm,
        SegmentId::LeftForearm,
        SegmentId::RightArm,
        SegmentId::RightForearm,
        SegmentId::LeftThigh,
        SegmentId::LeftShin,
        SegmentId::RightThigh,
        SegmentId::RightShin,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a segment by its position in [`SegmentId::ALL`].
    pub fn from_index(index: usize) -> Result<Self, FigureError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(FigureError::SegmentOutOfRange {
                index,
                count: Self::COUNT,
            })
    }

    /// The segment this one hangs from. `None` only for the torso.
    pub fn parent(self) -> Option<SegmentId> {
        use SegmentId::*;
        match self {
            Torso => None,
            Head | LeftArm | RightArm | LeftThigh | RightThigh => Some(Torso),
            LeftForearm => Some(LeftArm),
            RightForearm => Some(RightArm),
            LeftShin => Some(LeftThigh),
            RightShin => Some(RightThigh),
        }
    }

    /// True when `ancestor` appears on the path from this segment to the root.
    pub fn is_descendant_of(self, ancestor: SegmentId) -> bool {
        let mut cursor = self.parent();
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = id.parent();
        }
        false
    }

    /// Human-readable label, as shown in selection prompts.
    pub fn name(self) -> &'static str {
        use SegmentId::*;
        match self {
            Torso => "Torso",
            Head => "Head",
            LeftArm => "Left arm",
            LeftForearm => "Left forearm",
            RightArm => "Right arm",
            RightForearm => "Right forearm",
            LeftThigh => "Left thigh",
            LeftShin => "Left shin",
            RightThigh => "Right thigh",
            RightShin => "Right shin",
        }
    }

    /// camelCase key, matching the serde representation.
    pub fn key(self) -> &'static str {
        use SegmentId::*;
        match self {
            Torso => "torso",
            Head => "head",
            LeftArm => "leftArm",
            LeftForearm => "leftForearm",
            RightArm => "rightArm",
            RightForearm => "rightForearm",
            LeftThigh => "leftThigh",
            LeftShin => "leftShin",
            RightThigh => "rightThigh",
            RightShin => "rightShin",
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SegmentId {
    type Err = FigureError;

    /// Accepts exactly `leftArm`, `left_arm` or `Left arm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| s == id.key() || s == id.name() || s == snake_case(id.key()))
            .ok_or_else(|| FigureError::UnknownSegment(s.to_string()))
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 1);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// One rigid part of the figure and its renderable node.
#[derive(Debug, Clone)]
pub struct Segment {
    pub(crate) id: SegmentId,
    pub(crate) node: NodeHandle,
    pub(crate) geometry: Geometry,
    /// Fixed placement relative to the parent's frame. Set once at build.
    pub(crate) initial_offset: Transform,
    /// Accumulated user pose, identity at rest.
    pub(crate) pose: Transform,
    /// Cached `world(parent) · pose · initial_offset`.
    pub(crate) world: Transform,
}

impl Segment {
    pub(crate) fn new(
        id: SegmentId,
        node: NodeHandle,
        geometry: Geometry,
        initial_offset: Transform,
    ) -> Self {
        Self {
            id,
            node,
            geometry,
            initial_offset,
            pose: Transform::IDENTITY,
            world: initial_offset,
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn parent(&self) -> Option<SegmentId> {
        self.id.parent()
    }

    pub fn node(&self) -> NodeHandle {
        self.node
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn initial_offset(&self) -> Transform {
        self.initial_offset
    }

    pub fn pose(&self) -> Transform {
        self.pose
    }

    pub fn world(&self) -> Transform {
        self.world
    }

    /// `pose · initial_offset`: this segment's contribution to its subtree.
    pub fn local(&self) -> Transform {
        self.pose * self.initial_offset
    }

    /// Send the cached world transform to the renderer.
    pub fn push_world(&self, scene: &mut dyn Scene) {
        tracing::debug!(segment = self.id.key(), node = self.node.0, "push world transform");
        scene.set_world_transform(self.node, &self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_ordered_by_index() {
        for (i, id) in SegmentId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(SegmentId::from_index(i).unwrap(), *id);
        }
    }

    #[test]
    fn parents_precede_children() {
        for id in SegmentId::ALL {
            if let Some(parent) = id.parent() {
                assert!(parent.index() < id.index(), "{id} before its parent");
            }
        }
    }

    #[test]
    fn only_torso_is_root() {
        let roots: Vec<_> = SegmentId::ALL
            .into_iter()
            .filter(|id| id.parent().is_none())
            .collect();
        assert_eq!(roots, vec![SegmentId::Torso]);
    }

    #[test]
    fn descendant_relation() {
        assert!(SegmentId::LeftForearm.is_descendant_of(SegmentId::LeftArm));
        assert!(SegmentId::LeftForearm.is_descendant_of(SegmentId::Torso));
        assert!(!SegmentId::LeftForearm.is_descendant_of(SegmentId::RightArm));
        assert!(!SegmentId::Torso.is_descendant_of(SegmentId::Torso));
    }

    #[test]
    fn from_index_out_of_range() {
        assert!(matches!(
            SegmentId::from_index(10),
            Err(FigureError::SegmentOutOfRange { index: 10, count: 10 })
        ));
    }

    #[test]
    fn parse_accepts_several_spellings() {
        assert_eq!("leftArm".parse::<SegmentId>().unwrap(), SegmentId::LeftArm);
        assert_eq!("left_arm".parse::<SegmentId>().unwrap(), SegmentId::LeftArm);
        assert_eq!("Left arm".parse::<SegmentId>().unwrap(), SegmentId::LeftArm);
        assert_eq!(
            "right_forearm".parse::<SegmentId>().unwrap(),
            SegmentId::RightForearm
        );
        assert_eq!("torso".parse::<SegmentId>().unwrap(), SegmentId::Torso);
    }

    #[test]
    fn parse_rejects_loose_spellings() {
        for raw in ["tail", "l_e_f_t_a_r_m", "LEFTARM", "leftarm", "left-arm", "left arm", ""] {
            assert!(
                matches!(raw.parse::<SegmentId>(), Err(FigureError::UnknownSegment(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(SegmentId::RightShin.to_string(), "Right shin");
    }
}
