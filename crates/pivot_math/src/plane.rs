//! Infinite planes used as drag constraints

use crate::vector::Vec3;

/// Plane `normal · p + distance = 0`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Plane through `point`; `normal` is normalized
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Signed distance, positive on the side the normal points to
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}
