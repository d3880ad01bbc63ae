//! Ray intersection tests against drag constraint surfaces

use crate::plane::Plane;
use crate::ray::Ray;
use crate::vector::Vec3;

/// Cosine below which a ray counts as parallel to a plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Ray-Plane intersection
///
/// Returns the distance along the ray to the intersection point, or `None`
/// if the ray is parallel to the plane or the plane lies behind the origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(ray.direction);

    // Check if ray is parallel to plane
    if denom.abs() <= PARALLEL_EPSILON * ray.direction.length() {
        return None;
    }

    let t = -plane.distance_to_point(ray.origin) / denom;

    if t >= 0.0 && t.is_finite() {
        Some(t)
    } else {
        None
    }
}

/// Ray-Plane intersection point
pub fn ray_plane_point(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    ray_plane(ray, plane).map(|t| ray.at(t))
}

/// Ray-Plane intersection that also accepts planes behind the ray origin
///
/// The forward ray is tried first, then the reversed ray. When both hit, the
/// reversed attempt wins. Only a ray parallel to the plane yields `None`.
pub fn ray_plane_point_double_sided(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let forward = ray_plane_point(ray, plane);
    let backward = ray_plane_point(&ray.reversed(), plane);
    backward.or(forward)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_plane() -> Plane {
        Plane::from_point_normal(Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn test_ray_plane_hit() {
        let ray = Ray::new(Vec3::new(2.0, 3.0, 5.0), Vec3::NEG_Z);
        let point = ray_plane_point(&ray, &xy_plane()).expect("ray faces the plane");
        assert!((point - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-6);
        assert!((ray_plane(&ray, &xy_plane()).unwrap() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_plane_behind_origin_misses_single_sided() {
        let ray = Ray::new(Vec3::new(2.0, 3.0, 5.0), Vec3::Z);
        assert!(ray_plane_point(&ray, &xy_plane()).is_none());
    }

    #[test]
    fn test_double_sided_recovers_plane_behind_origin() {
        let ray = Ray::new(Vec3::new(2.0, 3.0, 5.0), Vec3::Z);
        let point = ray_plane_point_double_sided(&ray, &xy_plane()).expect("line crosses plane");
        assert!((point - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_parallel_ray_never_intersects() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray_plane(&ray, &xy_plane()).is_none());
        assert!(ray_plane_point_double_sided(&ray, &xy_plane()).is_none());

        // Even when lying inside the plane
        let inside = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(ray_plane_point_double_sided(&inside, &xy_plane()).is_none());
    }
}
