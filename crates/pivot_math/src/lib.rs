//! # pivot_math - Affine Math for Manipulation Gizmos
//!
//! Value-type math primitives used by the pivot controls: vectors, column-major
//! affine matrices, rays, planes and axis-aligned boxes. Everything is `Copy`
//! and allocation free so per-frame drag solving stays on the stack.

pub mod bounds;
pub mod intersect;
pub mod matrix;
pub mod plane;
pub mod ray;
pub mod vector;

pub use bounds::*;
pub use intersect::*;
pub use matrix::*;
pub use plane::*;
pub use ray::*;
pub use vector::*;

pub mod prelude {
    pub use crate::bounds::AABB;
    pub use crate::intersect::{ray_plane, ray_plane_point, ray_plane_point_double_sided};
    pub use crate::matrix::Mat4;
    pub use crate::plane::Plane;
    pub use crate::ray::Ray;
    pub use crate::vector::{Vec3, Vec4};
}
