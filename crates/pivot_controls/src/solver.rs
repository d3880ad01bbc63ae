//! Drag solvers: pointer rays to axis offsets and ring angles

use pivot_math::Vec3;

/// Relative magnitude below which a solver denominator counts as zero
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Offset along `axis` from `click_point` selected by a pointer ray
///
/// The axis is the line `click_point + t * axis`; the returned `t` is measured
/// in units of `axis`, so a unit axis yields a world distance. Returns `None`
/// when the ray direction is perpendicular to the axis or the system is
/// otherwise degenerate; callers treat that frame as "no movement".
pub fn axis_offset(click_point: Vec3, axis: Vec3, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
    let e1 = axis.dot(axis);
    let e2 = axis.dot(click_point) - axis.dot(ray_origin);
    let e3 = axis.dot(ray_dir);

    if e3.abs() <= DEGENERATE_EPSILON * e1.sqrt() * ray_dir.length() {
        return None;
    }

    let v1 = ray_dir * (e1 / e3) - axis;
    let v2 = ray_dir * (e2 / e3) + ray_origin - click_point;

    let v1_len_sq = v1.dot(v1);
    if v1_len_sq <= DEGENERATE_EPSILON * DEGENERATE_EPSILON * e1 {
        return None;
    }

    let offset = -v1.dot(v2) / v1_len_sq;
    offset.is_finite().then_some(offset)
}

/// Signed angle (radians) swept from `click_point` to `intersection` around `origin`
///
/// Both points are expressed in the in-plane basis `{e1, e2}` and the angle is
/// the difference of their polar angles. It is always measured from the
/// original click, never accumulated between frames, and is not unwrapped, so
/// the result lies in (-2π, 2π).
pub fn rotation_angle(click_point: Vec3, intersection: Vec3, origin: Vec3, e1: Vec3, e2: Vec3) -> f32 {
    let click_dir = click_point - origin;
    let intersection_dir = intersection - origin;

    let e1_len_sq = e1.dot(e1);
    let e2_len_sq = e2.dot(e2);

    let u_click = click_dir.dot(e1) / e1_len_sq;
    let v_click = click_dir.dot(e2) / e2_len_sq;

    let u_intersection = intersection_dir.dot(e1) / e1_len_sq;
    let v_intersection = intersection_dir.dot(e2) / e2_len_sq;

    v_intersection.atan2(u_intersection) - v_click.atan2(u_click)
}
