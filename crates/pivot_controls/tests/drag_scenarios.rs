//! Integration tests for pivot_controls drag gestures

use approx::assert_abs_diff_eq;
use core::f32::consts::FRAC_PI_2;
use pivot_controls::*;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Start,
    Drag(DragUpdate),
    End,
    Camera(bool),
}

struct RecordingHost {
    parent: Mat4,
    events: Vec<Event>,
    camera_enabled: bool,
}

impl RecordingHost {
    fn new(parent: Mat4) -> Self {
        Self {
            parent,
            events: Vec::new(),
            camera_enabled: true,
        }
    }

    fn drags(&self) -> Vec<DragUpdate> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Drag(update) => Some(*update),
                _ => None,
            })
            .collect()
    }

    fn position(&self, wanted: &Event) -> Option<usize> {
        self.events.iter().position(|e| std::mem::discriminant(e) == std::mem::discriminant(wanted))
    }
}

impl GizmoHost for RecordingHost {
    fn parent_world(&self) -> Mat4 {
        self.parent
    }

    fn set_camera_controls_enabled(&mut self, enabled: bool) {
        self.camera_enabled = enabled;
        self.events.push(Event::Camera(enabled));
    }

    fn on_drag_start(&mut self) {
        self.events.push(Event::Start);
    }

    fn on_drag(&mut self, update: &DragUpdate) {
        self.events.push(Event::Drag(*update));
    }

    fn on_drag_end(&mut self) {
        self.events.push(Event::End);
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gizmo() -> GizmoController {
    init_logging();
    GizmoController::new(GizmoConfig::default()).unwrap()
}

fn sample(origin: Vec3, direction: Vec3, hit: Vec3) -> PointerSample {
    PointerSample::new(Ray::new(origin, direction), hit, PointerId(1))
}

/// Ray looking straight down -Z onto `target`
fn ray_down_onto(target: Vec3) -> PointerSample {
    sample(target + Vec3::Z * 10.0, Vec3::NEG_Z, target)
}

#[test]
fn test_axis_drag_moves_along_axis() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    let click = Vec3::new(5.0, 0.0, 0.0);
    assert!(gizmo.pointer_down(HandleId::AxisX, &ray_down_onto(click), &mut host).unwrap());

    let view = Vec3::new(-0.3, -0.4, -1.0);
    let drag = sample(Vec3::new(8.0, 0.0, 0.0) - view * 20.0, view, Vec3::ZERO);
    let update = gizmo.pointer_move(HandleId::AxisX, &drag, &mut host).unwrap().expect("oblique ray");

    assert!((update.world_delta.translation() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    assert!((update.local.translation() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    assert!(update.local.extract_rotation().abs_diff_eq(&Mat4::IDENTITY, 1e-6));
}

#[test]
fn test_plane_drag_follows_intersection() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(Vec3::ZERO), &mut host).unwrap();
    let update = gizmo
        .pointer_move(HandleId::PlaneXY, &ray_down_onto(Vec3::new(2.0, 3.0, 0.0)), &mut host)
        .unwrap()
        .expect("ray crosses the slider plane");

    assert!((update.world_delta.translation() - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-5);
    assert!((update.local.translation() - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_plane_drag_from_behind_still_intersects() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(Vec3::ZERO), &mut host).unwrap();
    // Ray pointing away from the plane
    let away = sample(Vec3::new(1.0, -1.0, 4.0), Vec3::Z, Vec3::ZERO);
    let update = gizmo.pointer_move(HandleId::PlaneXY, &away, &mut host).unwrap().unwrap();
    assert!((update.world_delta.translation() - Vec3::new(1.0, -1.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_zero_motion_keeps_start_matrix() {
    let start = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_y(0.4);
    let parent = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    let mut gizmo = gizmo().with_matrix(start);
    let mut host = RecordingHost::new(parent);

    let frame = gizmo.handle_frame_world(&parent);
    let click = frame.translation();
    let normal = frame.column(2).normalize();
    let press = sample(click + normal * 5.0, -normal, click);

    gizmo.pointer_down(HandleId::PlaneXY, &press, &mut host).unwrap();
    let update = gizmo.pointer_move(HandleId::PlaneXY, &press, &mut host).unwrap().unwrap();

    assert!(update.world_delta.abs_diff_eq(&Mat4::IDENTITY, 1e-4));
    assert!(update.local.abs_diff_eq(&start, 1e-4));
    assert!(update.local_delta.abs_diff_eq(&Mat4::IDENTITY, 1e-4));
}

#[test]
fn test_local_delta_reconstructs_local() {
    let start = Mat4::from_translation(Vec3::new(-2.0, 0.5, 4.0)) * Mat4::from_rotation_x(0.3);
    let mut gizmo = gizmo().with_matrix(start);
    let mut host = RecordingHost::new(Mat4::from_rotation_z(0.2));

    let frame = gizmo.handle_frame_world(&host.parent);
    let click = frame.transform_point(Vec3::new(6.0, 0.0, 0.0));
    gizmo.pointer_down(HandleId::AxisX, &ray_down_onto(click), &mut host).unwrap();

    let view = Vec3::new(0.2, -0.5, -1.0);
    let drag = sample(click + Vec3::new(1.0, 2.0, 0.0) - view * 15.0, view, Vec3::ZERO);
    let update = gizmo.pointer_move(HandleId::AxisX, &drag, &mut host).unwrap().unwrap();

    let rebuilt = update.local_delta * start;
    assert!(rebuilt.abs_diff_eq(&update.local, 1e-4));
}

#[test]
fn test_parent_moving_mid_drag_recomputes_local() {
    let parent = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_z(FRAC_PI_2);
    let start = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let mut gizmo = gizmo().with_matrix(start);
    let mut host = RecordingHost::new(parent);

    // Gizmo origin sits at (1, 3, 3) in world space
    let origin = Vec3::new(1.0, 3.0, 3.0);
    assert!((gizmo.handle_frame_world(&parent).translation() - origin).length() < 1e-5);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(origin), &mut host).unwrap();
    let snapshot_world = gizmo.snapshot().unwrap().world;

    host.parent = Mat4::from_translation(Vec3::new(-5.0, 0.0, 0.0)) * Mat4::from_rotation_x(0.7);
    let target = origin + Vec3::new(2.0, 0.0, 0.0);
    let update = gizmo.pointer_move(HandleId::PlaneXY, &ray_down_onto(target), &mut host).unwrap().unwrap();

    let expected_world = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)) * snapshot_world;
    assert!(update.world.abs_diff_eq(&expected_world, 1e-4));

    let parent_inverse = host.parent.try_inverse().unwrap();
    assert!(update.local.abs_diff_eq(&(parent_inverse * update.world), 1e-4));
    assert!((update.local_delta * start).abs_diff_eq(&update.local, 1e-4));
}

#[test]
fn test_ring_drag_rotates_about_pivot() {
    let pivot = Vec3::new(4.0, -2.0, 1.0);
    let mut gizmo = gizmo().with_matrix(Mat4::from_translation(pivot));
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    let radius = gizmo.config().rotator_radius;
    gizmo.pointer_down(HandleId::RingZ, &ray_down_onto(pivot + Vec3::X * radius), &mut host).unwrap();
    let update = gizmo
        .pointer_move(HandleId::RingZ, &ray_down_onto(pivot + Vec3::Y * radius), &mut host)
        .unwrap()
        .unwrap();

    assert!((update.world.translation() - pivot).length() < 1e-4);
    assert!((update.world_delta.transform_point(pivot) - pivot).length() < 1e-4);

    let rotation = Mat4::from_axis_angle(Vec3::Z, FRAC_PI_2);
    assert!(update.local.extract_rotation().abs_diff_eq(&rotation, 1e-5));
    assert_abs_diff_eq!(update.world_delta.determinant(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_ring_drag_about_origin_is_pure_rotation() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    let radius = gizmo.config().rotator_radius;
    let press = sample(Vec3::new(10.0, radius, 0.0), -Vec3::X, Vec3::Y * radius);
    gizmo.pointer_down(HandleId::RingX, &press, &mut host).unwrap();

    let drag = sample(Vec3::new(10.0, 0.0, radius), -Vec3::X, Vec3::ZERO);
    let update = gizmo.pointer_move(HandleId::RingX, &drag, &mut host).unwrap().unwrap();

    assert!(update.world_delta.translation().length() < 1e-5);
    assert!(update.local.translation().length() < 1e-5);
    let rotation = Mat4::from_axis_angle(Vec3::X, FRAC_PI_2);
    assert!(update.local.abs_diff_eq(&rotation, 1e-5));
}

#[test]
fn test_host_write_back_does_not_accumulate() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(Vec3::ZERO), &mut host).unwrap();
    for x in [1.0, 2.0, 3.0] {
        let update = gizmo
            .pointer_move(HandleId::PlaneXY, &ray_down_onto(Vec3::new(x, 0.0, 0.0)), &mut host)
            .unwrap()
            .unwrap();
        assert!((update.local_delta.translation() - Vec3::new(x, 0.0, 0.0)).length() < 1e-5);
        gizmo.set_matrix(update.local);
    }
    gizmo.pointer_up(HandleId::PlaneXY, &mut host);

    assert!((gizmo.matrix().translation() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    assert!(gizmo.matrix().extract_rotation().abs_diff_eq(&Mat4::IDENTITY, 1e-6));
}

#[test]
fn test_parallel_ray_emits_nothing() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(Vec3::ZERO), &mut host).unwrap();
    let grazing = sample(Vec3::new(0.0, 0.0, 1.0), Vec3::X, Vec3::ZERO);
    assert!(gizmo.pointer_move(HandleId::PlaneXY, &grazing, &mut host).unwrap().is_none());

    assert!(host.drags().is_empty());
    assert!(gizmo.is_dragging());
}

#[test]
fn test_events_are_ordered() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXZ, &sample(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::ZERO), &mut host).unwrap();
    assert!(!host.camera_enabled);

    for x in [1.0, 2.0, 3.0] {
        let drag = sample(Vec3::new(x, 10.0, 0.5), Vec3::NEG_Y, Vec3::ZERO);
        gizmo.pointer_move(HandleId::PlaneXZ, &drag, &mut host).unwrap();
    }
    assert!(gizmo.pointer_up(HandleId::PlaneXZ, &mut host));
    assert!(host.camera_enabled);

    let start = host.position(&Event::Start).unwrap();
    let first_drag = host.events.iter().position(|e| matches!(e, Event::Drag(_))).unwrap();
    let last_drag = host.events.iter().rposition(|e| matches!(e, Event::Drag(_))).unwrap();
    let end = host.position(&Event::End).unwrap();
    assert!(start < first_drag && last_drag < end);
    assert_eq!(host.drags().len(), 3);

    let last = host.drags()[2];
    assert!((last.world_delta.translation() - Vec3::new(3.0, 0.0, 0.5)).length() < 1e-5);
    assert!(!gizmo.is_dragging());
    assert!(gizmo.snapshot().is_none());
}

#[test]
fn test_release_over_another_handle_ends_drag() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::AxisX, &ray_down_onto(Vec3::new(5.0, 0.0, 0.0)), &mut host).unwrap();
    assert!(gizmo.pointer_up(HandleId::AxisY, &mut host));

    assert!(!gizmo.is_dragging());
    assert!(!gizmo.handle(HandleId::AxisX).is_dragging());
    assert!(host.camera_enabled);
    assert!(host.position(&Event::End).is_some());

    // Next gesture starts normally
    assert!(gizmo.pointer_down(HandleId::AxisY, &ray_down_onto(Vec3::new(0.0, 5.0, 0.0)), &mut host).unwrap());
    assert_eq!(gizmo.active_handle(), Some(HandleId::AxisY));
}

#[test]
fn test_cancel_restores_camera_without_drag_end() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::RingY, &sample(Vec3::new(0.0, 10.0, 19.0), Vec3::NEG_Y, Vec3::new(0.0, 0.0, 19.0)), &mut host).unwrap();
    assert!(gizmo.cancel(&mut host));

    assert!(host.camera_enabled);
    assert!(host.position(&Event::End).is_none());
    assert!(!gizmo.is_dragging());
    assert!(!gizmo.handle(HandleId::RingY).is_dragging());

    // Nothing open to cancel now
    assert!(!gizmo.cancel(&mut host));
    let drag = sample(Vec3::new(19.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::ZERO);
    assert!(gizmo.pointer_move(HandleId::RingY, &drag, &mut host).unwrap().is_none());
    assert!(host.drags().is_empty());
}

#[test]
fn test_singular_parent_is_reported() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    gizmo.pointer_down(HandleId::PlaneXY, &ray_down_onto(Vec3::ZERO), &mut host).unwrap();
    host.parent = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));

    let err = gizmo
        .pointer_move(HandleId::PlaneXY, &ray_down_onto(Vec3::new(1.0, 0.0, 0.0)), &mut host)
        .unwrap_err();
    assert!(matches!(err, GizmoError::SingularMatrix(MatrixRole::ParentWorld)));
    assert!(host.drags().is_empty());
}

#[test]
fn test_idle_protocol_misuse_is_ignored() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);

    assert!(gizmo.pointer_move(HandleId::AxisY, &ray_down_onto(Vec3::Y), &mut host).unwrap().is_none());
    assert!(!gizmo.pointer_up(HandleId::AxisY, &mut host));
    assert!(host.events.is_empty());
    assert_eq!(gizmo.matrix(), Mat4::IDENTITY);
}

#[test]
fn test_hover_follows_pointer() {
    let mut gizmo = gizmo();
    let mut host = RecordingHost::new(Mat4::IDENTITY);
    let config = gizmo.config().clone();

    assert_eq!(gizmo.handle(HandleId::AxisZ).display_color(), config.axis_colors[2]);
    gizmo.pointer_move(HandleId::AxisZ, &ray_down_onto(Vec3::Z), &mut host).unwrap();
    assert_eq!(gizmo.handle(HandleId::AxisZ).display_color(), config.hovered_color);

    gizmo.pointer_out(HandleId::AxisZ);
    assert_eq!(gizmo.handle(HandleId::AxisZ).display_color(), config.axis_colors[2]);
}

#[test]
fn test_anchor_places_group_at_content_corner() {
    init_logging();
    let config = GizmoConfig::default().with_anchor(1.0, 1.0, -1.0);
    let local = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let mut gizmo = GizmoController::new(config).unwrap().with_matrix(local);

    let content = AnchorContent::new(local, Some(AABB::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 6.0))));
    let position = gizmo.update_anchor(&Mat4::IDENTITY, [content]).unwrap();

    assert!((position - Vec3::new(4.0, 2.0, 0.0)).length() < 1e-5);
    let frame = gizmo.handle_frame_world(&Mat4::IDENTITY);
    assert!((frame.translation() - Vec3::new(14.0, 2.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_config_from_toml_drives_controller() {
    init_logging();
    let config = GizmoConfig::from_toml_str(
        r#"
        rotator_radius = 25.0
        hovered_color = 0xffffff
        offset = [0.0, 2.0, 0.0]
        "#,
    )
    .unwrap();
    let gizmo = GizmoController::new(config).unwrap();

    assert_eq!(gizmo.config().rotator_radius, 25.0);
    assert_eq!(gizmo.group_position(), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(gizmo.handles().count(), 9);
}
