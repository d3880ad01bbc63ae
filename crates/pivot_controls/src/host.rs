//! Host-facing types: pointer samples, drag updates and the host callback trait

use pivot_math::{Mat4, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque identifier of the pointer device driving a gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u64);

/// One pointer event routed to a handle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Pick ray in the gizmo's ambient (world) space
    pub ray: Ray,
    /// Point where the ray hit the handle geometry
    pub hit_point: Vec3,
    pub pointer_id: PointerId,
}

impl PointerSample {
    pub fn new(ray: Ray, hit_point: Vec3, pointer_id: PointerId) -> Self {
        Self { ray, hit_point, pointer_id }
    }
}

/// Matrices produced by one drag frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragUpdate {
    /// New local matrix of the gizmo relative to its parent
    pub local: Mat4,
    /// Change of the local matrix since drag start (`local = local_delta * start_local`)
    pub local_delta: Mat4,
    /// New world matrix of the gizmo
    pub world: Mat4,
    /// World-space delta produced by the handle
    pub world_delta: Mat4,
}

/// Scene and application side of a gizmo.
///
/// Every callback runs synchronously inside the controller call that
/// triggered it. The default implementations do nothing.
pub trait GizmoHost {
    /// Current world matrix of the gizmo's parent node. Read-only input.
    fn parent_world(&self) -> Mat4;

    /// Disable or re-enable camera orbiting while a handle is dragged
    fn set_camera_controls_enabled(&mut self, _enabled: bool) {}

    fn on_drag_start(&mut self) {}

    fn on_drag(&mut self, _update: &DragUpdate) {}

    fn on_drag_end(&mut self) {}
}
