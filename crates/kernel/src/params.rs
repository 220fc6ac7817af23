use glam::Vec3;
use marionette_common::{Geometry, Transform};
use serde::{Deserialize, Serialize};

use crate::figure::FigureError;
use crate::segment::SegmentId;

/// Fixed geometric parameters of the figure.
///
/// Left limbs sit on -X, the figure faces +Z at rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureParams {
    pub torso_height: f32,
    /// Half the torso width.
    pub torso_radius: f32,
    pub head_radius: f32,
    pub arm_radius: f32,
    pub forearm_radius: f32,
    pub thigh_radius: f32,
    pub shin_radius: f32,
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    /// Direction `move_torso` walks along before any turn. Used as given,
    /// not normalised: its length scales every step.
    pub walk_direction: Vec3,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            torso_height: 1.5,
            torso_radius: 0.75,
            head_radius: 0.32,
            arm_radius: 0.5,
            forearm_radius: 0.5,
            thigh_radius: 0.5,
            shin_radius: 0.5,
            sphere_width_segments: 3,
            sphere_height_segments: 2,
            walk_direction: Vec3::Z,
        }
    }
}

impl FigureParams {
    /// Reject dimensions that would produce a degenerate figure.
    pub fn validate(&self) -> Result<(), FigureError> {
        let dims = [
            ("torso_height", self.torso_height),
            ("torso_radius", self.torso_radius),
            ("head_radius", self.head_radius),
            ("arm_radius", self.arm_radius),
            ("forearm_radius", self.forearm_radius),
            ("thigh_radius", self.thigh_radius),
            ("shin_radius", self.shin_radius),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(FigureError::InvalidParameter {
                    name,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }
        if self.sphere_width_segments < 3 || self.sphere_height_segments < 2 {
            return Err(FigureError::InvalidParameter {
                name: "sphere_segments",
                reason: format!(
                    "need at least 3x2, got {}x{}",
                    self.sphere_width_segments, self.sphere_height_segments
                ),
            });
        }
        if !self.walk_direction.is_finite() || self.walk_direction.length_squared() < 1e-12 {
            return Err(FigureError::InvalidParameter {
                name: "walk_direction",
                reason: format!("must be a finite non-zero vector, got {}", self.walk_direction),
            });
        }
        Ok(())
    }

    /// Height of the torso centre above the floor when every joint is at rest.
    pub fn hip_height(&self) -> f32 {
        self.torso_height / 2.0 + 2.0 * self.thigh_radius + 2.0 * self.shin_radius
    }

    pub fn geometry(&self, id: SegmentId) -> Geometry {
        use SegmentId::*;
        let sphere = |radius: f32| Geometry::Sphere {
            radius,
            width_segments: self.sphere_width_segments,
            height_segments: self.sphere_height_segments,
        };
        match id {
            Torso => Geometry::Box {
                width: 2.0 * self.torso_radius,
                height: self.torso_height,
                depth: self.torso_radius,
            },
            Head => Geometry::Box {
                width: 2.0 * self.head_radius,
                height: self.head_radius,
                depth: self.head_radius,
            },
            LeftArm | RightArm => sphere(self.arm_radius),
            LeftForearm | RightForearm => sphere(self.forearm_radius),
            LeftThigh | RightThigh => sphere(self.thigh_radius),
            LeftShin | RightShin => sphere(self.shin_radius),
        }
    }

    /// Rest placement of `id` in its parent's frame (world frame for the torso).
    pub fn initial_offset(&self, id: SegmentId) -> Transform {
        use SegmentId::*;
        let half_h = self.torso_height / 2.0;
        let arm_x = self.torso_radius + self.arm_radius;
        let arm_y = half_h - self.arm_radius;
        let hip_y = -(half_h + self.thigh_radius);
        let t = Transform::IDENTITY;
        match id {
            Torso => t.translate(0.0, self.hip_height(), 0.0),
            Head => t.translate(0.0, half_h + self.head_radius, 0.0),
            LeftArm => t.translate(-arm_x, arm_y, 0.0),
            RightArm => t.translate(arm_x, arm_y, 0.0),
            LeftForearm | RightForearm => {
                t.translate(0.0, -(self.arm_radius + self.forearm_radius), 0.0)
            }
            LeftThigh => t.translate(-self.torso_radius, hip_y, 0.0),
            RightThigh => t.translate(self.torso_radius, hip_y, 0.0),
            LeftShin | RightShin => t.translate(0.0, -(self.thigh_radius + self.shin_radius), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        FigureParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_dimension() {
        let params = FigureParams {
            head_radius: 0.0,
            ..FigureParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(FigureError::InvalidParameter {
                name: "head_radius",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_dimension() {
        let params = FigureParams {
            torso_height: f32::NAN,
            ..FigureParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_walk_direction() {
        let params = FigureParams {
            walk_direction: Vec3::ZERO,
            ..FigureParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(FigureError::InvalidParameter {
                name: "walk_direction",
                ..
            })
        ));
    }

    #[test]
    fn default_hip_height_puts_feet_on_floor() {
        let p = FigureParams::default();
        assert!((p.hip_height() - 2.75).abs() < 1e-6);
    }

    #[test]
    fn head_offset_sits_on_torso() {
        let p = FigureParams::default();
        let y = p.initial_offset(SegmentId::Head).translation().y;
        assert!((y - (0.75 + p.head_radius)).abs() < 1e-6);
    }

    #[test]
    fn arms_mirror_across_x() {
        let p = FigureParams::default();
        let l = p.initial_offset(SegmentId::LeftArm).translation();
        let r = p.initial_offset(SegmentId::RightArm).translation();
        assert_eq!(l.x, -r.x);
        assert_eq!(l.y, r.y);
        assert!(l.x < 0.0);
        assert!((r.x - (p.torso_radius + p.arm_radius)).abs() < 1e-6);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let p: FigureParams = serde_json::from_str(r#"{"head_radius": 0.4}"#).unwrap();
        assert_eq!(p.head_radius, 0.4);
        assert_eq!(p.torso_height, 1.5);
    }
}
