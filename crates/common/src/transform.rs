use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// Relative tolerance for the singularity check, scaled by the product of
/// the linear part's column lengths.
const SINGULAR_EPSILON: f32 = 1e-6;

/// Largest entry deviation allowed in `m · m⁻¹` before the inverse is
/// rejected as numerically meaningless.
const INVERSE_TOLERANCE: f32 = 1e-3;

/// Errors from building or inverting transforms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("unknown rotation axis {0:?}, expected one of x, y, z")]
    UnknownAxis(String),
    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f32 },
}

/// A principal rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Right-handed rotation matrix about this axis.
    ///
    /// Written out column by column; glam stores matrices column-major, so
    /// each `Vec4` below is one column of the textbook row layout.
    pub fn rotation_matrix(self, angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        match self {
            Axis::X => Mat4::from_cols(
                Vec4::new(1.0, 0.0, 0.0, 0.0),
                Vec4::new(0.0, c, s, 0.0),
                Vec4::new(0.0, -s, c, 0.0),
                Vec4::W,
            ),
            Axis::Y => Mat4::from_cols(
                Vec4::new(c, 0.0, -s, 0.0),
                Vec4::new(0.0, 1.0, 0.0, 0.0),
                Vec4::new(s, 0.0, c, 0.0),
                Vec4::W,
            ),
            Axis::Z => Mat4::from_cols(
                Vec4::new(c, s, 0.0, 0.0),
                Vec4::new(-s, c, 0.0, 0.0),
                Vec4::new(0.0, 0.0, 1.0, 0.0),
                Vec4::W,
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(TransformError::UnknownAxis(s.to_string())),
        }
    }
}

/// A 4x4 homogeneous affine transform.
///
/// Values are immutable: every operation returns a new transform built by
/// right-multiplying an elementary matrix, so `m.translate(..)` means
/// "translate in `m`'s local frame".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(Mat4);

impl Transform {
    pub const IDENTITY: Transform = Transform(Mat4::IDENTITY);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_mat4(m: Mat4) -> Self {
        Self(m)
    }

    pub fn as_mat4(&self) -> &Mat4 {
        &self.0
    }

    /// `self · other`: `other` applies first, in local space.
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform(self.0 * other.0)
    }

    /// `self · T(x, y, z)`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Transform {
        let t = Mat4::from_cols(
            Vec4::X,
            Vec4::Y,
            Vec4::Z,
            Vec4::new(x, y, z, 1.0),
        );
        Transform(self.0 * t)
    }

    /// `self · R_axis(angle)`, angle in radians.
    pub fn rotate(&self, angle: f32, axis: Axis) -> Transform {
        Transform(self.0 * axis.rotation_matrix(angle))
    }

    /// `self · S(x, y, z)`.
    pub fn scale(&self, x: f32, y: f32, z: f32) -> Transform {
        let s = Mat4::from_cols(
            Vec4::new(x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, z, 0.0),
            Vec4::W,
        );
        Transform(self.0 * s)
    }

    /// Matrix inverse, rejecting singular input.
    ///
    /// The determinant is compared against the product of the linear
    /// part's column lengths, so uniformly tiny or huge scales still invert.
    pub fn invert(&self) -> Result<Transform, TransformError> {
        let determinant = self.0.determinant();
        let volume = self.0.x_axis.truncate().length()
            * self.0.y_axis.truncate().length()
            * self.0.z_axis.truncate().length();
        let singular = TransformError::Singular { determinant };
        if !determinant.is_finite() || determinant.abs() <= SINGULAR_EPSILON * volume {
            return Err(singular);
        }
        let inverse = self.0.inverse();
        if !inverse.is_finite()
            || !(self.0 * inverse).abs_diff_eq(Mat4::IDENTITY, INVERSE_TOLERANCE)
        {
            return Err(singular);
        }
        Ok(Transform(inverse))
    }

    /// Translation column.
    pub fn translation(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    /// Upper-left 3x3 block, with the translation column cleared.
    pub fn linear_part(&self) -> Transform {
        let mut m = self.0;
        m.w_axis = Vec4::W;
        Transform(m)
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.0.transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.0.transform_vector3(v)
    }

    pub fn abs_diff_eq(&self, other: &Transform, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

impl From<Mat4> for Transform {
    fn from(m: Mat4) -> Self {
        Self(m)
    }
}

pub fn identity() -> Transform {
    Transform::IDENTITY
}

pub fn multiply(a: &Transform, b: &Transform) -> Transform {
    a.multiply(b)
}

pub fn translate(m: &Transform, x: f32, y: f32, z: f32) -> Transform {
    m.translate(x, y, z)
}

pub fn rotate(m: &Transform, angle: f32, axis: Axis) -> Transform {
    m.rotate(angle, axis)
}

pub fn scale(m: &Transform, x: f32, y: f32, z: f32) -> Transform {
    m.scale(x, y, z)
}

pub fn invert(m: &Transform) -> Result<Transform, TransformError> {
    m.invert()
}

/// Rotate a direction vector by `R_axis(angle)`. Translation never applies.
pub fn rotate_vector(v: Vec3, angle: f32, axis: Axis) -> Vec3 {
    axis.rotation_matrix(angle).transform_vector3(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn sample() -> Transform {
        identity()
            .translate(1.0, -2.0, 0.5)
            .rotate(0.3, Axis::X)
            .rotate(-1.1, Axis::Z)
            .scale(2.0, 1.0, 0.5)
    }

    #[test]
    fn identity_is_two_sided_unit() {
        let m = sample();
        assert!(multiply(&m, &identity()).abs_diff_eq(&m, EPS));
        assert!(multiply(&identity(), &m).abs_diff_eq(&m, EPS));
    }

    #[test]
    fn multiply_is_associative_not_commutative() {
        let a = identity().rotate(0.7, Axis::Y);
        let b = identity().translate(3.0, 0.0, 0.0);
        let c = identity().scale(1.0, 2.0, 3.0);
        assert!(((a * b) * c).abs_diff_eq(&(a * (b * c)), EPS));
        assert!(!(a * b).abs_diff_eq(&(b * a), EPS));
    }

    #[test]
    fn rotation_then_inverse_angle_is_identity() {
        for i in -8..=8 {
            let a = i as f32 * 0.77;
            for axis in Axis::ALL {
                let m = rotate(&rotate(&identity(), a, axis), -a, axis);
                assert!(m.abs_diff_eq(&identity(), EPS), "axis {axis} angle {a}");
            }
        }
    }

    #[test]
    fn translate_moves_origin() {
        let m = translate(&identity(), 1.5, -2.0, 7.25);
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.5, -2.0, 7.25));
        assert_eq!(m.translation(), Vec3::new(1.5, -2.0, 7.25));
    }

    #[test]
    fn translate_is_local() {
        let m = identity().rotate(FRAC_PI_2, Axis::Y).translate(0.0, 0.0, 1.0);
        assert!(m.translation().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn rotations_match_glam_right_handed() {
        let a = 0.42;
        assert!(Axis::X.rotation_matrix(a).abs_diff_eq(Mat4::from_rotation_x(a), EPS));
        assert!(Axis::Y.rotation_matrix(a).abs_diff_eq(Mat4::from_rotation_y(a), EPS));
        assert!(Axis::Z.rotation_matrix(a).abs_diff_eq(Mat4::from_rotation_z(a), EPS));
    }

    #[test]
    fn rotate_vector_yaw_quarter_turn() {
        let v = rotate_vector(Vec3::Z, FRAC_PI_2, Axis::Y);
        assert!(v.abs_diff_eq(Vec3::X, EPS));
        let back = rotate_vector(v, -FRAC_PI_2, Axis::Y);
        assert!(back.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn rotate_vector_ignores_unbounded_angles() {
        let v = rotate_vector(Vec3::X, 2.0 * PI * 10.0 + FRAC_PI_2, Axis::Z);
        assert!(v.abs_diff_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn scale_stretches_points() {
        let m = scale(&identity(), 2.0, 3.0, 4.0);
        assert_eq!(m.transform_point(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn invert_round_trips() {
        let m = sample();
        let inv = invert(&m).unwrap();
        assert!((m * inv).abs_diff_eq(&identity(), EPS));
        assert!((inv * m).abs_diff_eq(&identity(), EPS));
    }

    #[test]
    fn invert_accepts_tiny_uniform_scale() {
        let m = identity()
            .translate(3.0, -1.0, 2.0)
            .scale(1e-3, 1e-3, 1e-3);
        let inv = m.invert().unwrap();
        assert!((m * inv).abs_diff_eq(&identity(), EPS));
        let p = Vec3::new(0.5, -0.25, 4.0);
        assert!(inv.transform_point(m.transform_point(p)).abs_diff_eq(p, 1e-2));
    }

    #[test]
    fn invert_accepts_large_uniform_scale() {
        let m = identity().scale(1e3, 1e3, 1e3);
        let inv = m.invert().unwrap();
        assert!((m * inv).abs_diff_eq(&identity(), EPS));
    }

    #[test]
    fn invert_rejects_nearly_parallel_axes() {
        let m = Transform::from_mat4(Mat4::from_cols(
            Vec4::X,
            Vec4::new(1.0, 1e-8, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        ));
        assert!(matches!(
            m.invert(),
            Err(TransformError::Singular { .. })
        ));
    }

    #[test]
    fn invert_singular_fails() {
        let m = identity().scale(1.0, 0.0, 1.0);
        assert!(matches!(
            m.invert(),
            Err(TransformError::Singular { .. })
        ));
    }

    #[test]
    fn axis_parsing() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!(" Y ".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!("z".parse::<Axis>().unwrap(), Axis::Z);
        assert_eq!(
            "w".parse::<Axis>(),
            Err(TransformError::UnknownAxis("w".into()))
        );
    }

    #[test]
    fn linear_part_drops_translation() {
        let m = identity().translate(4.0, 5.0, 6.0).rotate(0.2, Axis::X);
        let l = m.linear_part();
        assert_eq!(l.translation(), Vec3::ZERO);
        assert!(l.transform_vector(Vec3::Y).abs_diff_eq(m.transform_vector(Vec3::Y), EPS));
    }

    #[test]
    fn serializes_as_column_major_array() {
        let m = identity().translate(1.0, 2.0, 3.0);
        let json = serde_json::to_string(&m).unwrap();
        let cols: Vec<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(cols.len(), 16);
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(cols, m.to_cols_array().to_vec());
    }
}
