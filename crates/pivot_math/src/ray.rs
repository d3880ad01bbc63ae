//! Pick rays

use crate::vector::Vec3;

/// Half-line cast from the viewer through the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction; zero when built from a zero vector
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction`, which is normalized
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point `t` units along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same origin, opposite direction
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.origin,
            direction: -self.direction,
        }
    }

    /// Finite origin and a non-zero finite direction
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite() && self.direction.dot(self.direction) > 1e-10
    }
}
