//! Affine transforms

use crate::vector::{Vec3, Vec4};
use core::ops::Mul;

/// Determinant magnitude below which a matrix is treated as singular
pub const SINGULAR_EPSILON: f32 = 1e-8;

/// Column-major 4x4 affine transform
///
/// The linear part lives in the first three columns, translation in the
/// fourth. Points are column vectors, so `a * b` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);
    pub const ZERO: Self = Self::from_cols(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    #[inline]
    pub const fn from_cols(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        Self { cols: [x, y, z, w] }
    }

    /// Affine matrix from a linear basis and a translation
    #[inline]
    pub fn from_basis_translation(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Self {
        Self::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), translation.extend(1.0))
    }

    #[inline]
    pub fn from_basis(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::from_basis_translation(x, y, z, Vec3::ZERO)
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_basis_translation(Vec3::X, Vec3::Y, Vec3::Z, translation)
    }

    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_basis(Vec3::X * scale.x, Vec3::Y * scale.y, Vec3::Z * scale.z)
    }

    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::X, Vec3::new(0.0, c, s), Vec3::new(0.0, -s, c))
    }

    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::new(c, 0.0, -s), Vec3::Y, Vec3::new(s, 0.0, c))
    }

    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_basis(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    }

    /// Rotation from XYZ Euler angles in radians: `Rx * Ry * Rz`
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        Self::from_rotation_x(angles.x) * Self::from_rotation_y(angles.y) * Self::from_rotation_z(angles.z)
    }

    /// Right-handed rotation of `angle` radians about `axis` (need not be unit)
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let n = axis.normalize();
        let (s, c) = angle.sin_cos();
        // Rodrigues: v' = v cos + (n × v) sin + n (n · v)(1 - cos)
        let rotate = |v: Vec3| v * c + n.cross(v) * s + n * (n.dot(v) * (1.0 - c));
        Self::from_basis(rotate(Vec3::X), rotate(Vec3::Y), rotate(Vec3::Z))
    }

    /// Basis column `index` (0..=2) as a direction, or the translation for 3
    #[inline]
    pub fn column(&self, index: usize) -> Vec3 {
        self.cols[index].truncate()
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.column(3)
    }

    /// Same linear part, new translation
    #[inline]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.cols[3] = translation.extend(1.0);
        self
    }

    /// Linear part with column scale divided out and translation dropped
    pub fn extract_rotation(&self) -> Self {
        Self::from_basis(
            self.column(0).normalize(),
            self.column(1).normalize(),
            self.column(2).normalize(),
        )
    }

    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        (*self * point.extend(1.0)).truncate()
    }

    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        (*self * vector.extend(0.0)).truncate()
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> f32 {
        self.column(0).dot(self.column(1).cross(self.column(2)))
    }

    /// Bottom row is exactly `(0, 0, 0, 1)`
    pub fn is_affine(&self) -> bool {
        let [x, y, z, w] = self.cols;
        x.w == 0.0 && y.w == 0.0 && z.w == 0.0 && w.w == 1.0
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|c| c.is_finite())
    }

    /// Inverse of an affine transform.
    ///
    /// `None` for non-affine or non-finite input and for a linear part whose
    /// determinant is below [`SINGULAR_EPSILON`].
    pub fn try_inverse(&self) -> Option<Self> {
        if !self.is_affine() || !self.is_finite() {
            return None;
        }

        let (a, b, c) = (self.column(0), self.column(1), self.column(2));
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return None;
        }

        // Rows of the inverse linear part
        let inv_det = det.recip();
        let r0 = b.cross(c) * inv_det;
        let r1 = c.cross(a) * inv_det;
        let r2 = a.cross(b) * inv_det;

        let t = self.translation();
        Some(Self::from_basis_translation(
            Vec3::new(r0.x, r1.x, r2.x),
            Vec3::new(r0.y, r1.y, r2.y),
            Vec3::new(r0.z, r1.z, r2.z),
            -Vec3::new(r0.dot(t), r1.dot(t), r2.dot(t)),
        ))
    }

    /// Element-wise comparison with an absolute tolerance
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .flat_map(|(a, b)| a.to_array().into_iter().zip(b.to_array()))
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [x, y, z, w] = rhs.cols;
        Self::from_cols(self * x, self * y, self * z, self * w)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        let [x, y, z, w] = self.cols;
        x * rhs.x + y * rhs.y + z * rhs.z + w * rhs.w
    }
}
