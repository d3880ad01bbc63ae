//! Gizmo controller: owns the handles and composes their deltas.
//!
//! The controller sits between the host's pointer plumbing and the handles.
//! On the first pointer-down of a gesture it snapshots the gizmo's local and
//! world matrices; every later frame composes the handle's world delta
//! against that snapshot and the parent's *current* world matrix:
//!
//! ```text
//! world       = world_delta * start_world
//! local       = parent_world⁻¹ * world
//! local_delta = local * start_local⁻¹
//! ```
//!
//! Deltas are never chained frame to frame.

use pivot_math::{Mat4, Vec3};

use crate::anchor::{AnchorBoundsTracker, AnchorContent};
use crate::config::GizmoConfig;
use crate::error::{GizmoError, MatrixRole, Result};
use crate::handle::{DragHandle, HandleId};
use crate::host::{DragUpdate, GizmoHost, PointerId, PointerSample};

/// Gizmo matrices captured when a gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoSnapshot {
    pub local: Mat4,
    pub world: Mat4,
}

impl GizmoSnapshot {
    pub fn new(local: Mat4, parent_world: &Mat4) -> Self {
        Self {
            local,
            world: *parent_world * local,
        }
    }

    /// Compose a world-space delta against this snapshot.
    ///
    /// Fails if `parent_world` or the snapshot's local matrix is singular.
    pub fn compose(&self, world_delta: Mat4, parent_world: &Mat4) -> Result<DragUpdate> {
        let parent_inverse = parent_world
            .try_inverse()
            .ok_or(GizmoError::SingularMatrix(MatrixRole::ParentWorld))?;
        let start_local_inverse = self
            .local
            .try_inverse()
            .ok_or(GizmoError::SingularMatrix(MatrixRole::DragStartLocal))?;

        let world = world_delta * self.world;
        let local = parent_inverse * world;
        let local_delta = local * start_local_inverse;

        Ok(DragUpdate {
            local,
            local_delta,
            world,
            world_delta,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveDrag {
    handle: HandleId,
    pointer_id: PointerId,
    snapshot: GizmoSnapshot,
}

/// Composite gizmo: nine handles over a host-controlled local matrix.
///
/// All methods are meant to be called from the host's event/render thread;
/// host callbacks fire synchronously from within them.
pub struct GizmoController {
    config: GizmoConfig,
    handles: Vec<DragHandle>,
    matrix: Mat4,
    group_rotation: Mat4,
    group_position: Vec3,
    anchor: AnchorBoundsTracker,
    active: Option<ActiveDrag>,
}

impl GizmoController {
    /// Create a controller with an identity local matrix
    pub fn new(mut config: GizmoConfig) -> Result<Self> {
        config.validate()?;

        if !(0.0..=1.0).contains(&config.opacity) {
            let clamped = if config.opacity.is_nan() { 1.0 } else { config.opacity.clamp(0.0, 1.0) };
            log::warn!("Gizmo opacity {} out of range, using {}", config.opacity, clamped);
            config.opacity = clamped;
        }

        let handles = HandleId::ALL
            .iter()
            .map(|&id| DragHandle::new(id, &config))
            .collect();
        let offset = Vec3::from_array(config.offset);

        Ok(Self {
            handles,
            matrix: Mat4::IDENTITY,
            group_rotation: Mat4::from_euler_xyz(Vec3::from_array(config.rotation)),
            group_position: offset,
            anchor: AnchorBoundsTracker::new(config.anchor.map(Vec3::from_array), offset),
            active: None,
            config,
        })
    }

    /// Builder-style initial local matrix
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    /// Local matrix of the gizmo relative to its parent
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Replace the local matrix, typically with [`DragUpdate::local`].
    ///
    /// An open gesture keeps composing against its drag-start snapshot.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    pub fn handle(&self, id: HandleId) -> &DragHandle {
        &self.handles[id.index()]
    }

    pub fn handles(&self) -> impl Iterator<Item = &DragHandle> {
        self.handles.iter()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.active.map(|a| a.handle)
    }

    /// Pointer holding capture for the open gesture
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active.map(|a| a.pointer_id)
    }

    pub fn snapshot(&self) -> Option<GizmoSnapshot> {
        self.active.map(|a| a.snapshot)
    }

    /// Position of the handle group in the gizmo's local frame
    pub fn group_position(&self) -> Vec3 {
        self.group_position
    }

    /// Transform of the handle group relative to the gizmo
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.group_position) * self.group_rotation
    }

    /// World matrix of the gizmo for the given parent world matrix
    pub fn world_matrix(&self, parent_world: &Mat4) -> Mat4 {
        *parent_world * self.matrix
    }

    /// World matrix of the frame the handles are laid out in
    pub fn handle_frame_world(&self, parent_world: &Mat4) -> Mat4 {
        self.world_matrix(parent_world) * self.group_matrix()
    }

    /// Start a gesture on `id`.
    ///
    /// Returns `Ok(false)` when the press is absorbed: another gesture is
    /// already open.
    pub fn pointer_down<H>(&mut self, id: HandleId, sample: &PointerSample, host: &mut H) -> Result<bool>
    where
        H: GizmoHost + ?Sized,
    {
        if let Some(active) = self.active {
            log::debug!("Pointer down on {:?} while {:?} is dragging, ignored", id, active.handle);
            return Ok(false);
        }

        let parent_world = host.parent_world();
        let snapshot = GizmoSnapshot::new(self.matrix, &parent_world);
        let frame_world = snapshot.world * self.group_matrix();

        if !self.handles[id.index()].pointer_down(&frame_world, sample.hit_point) {
            return Ok(false);
        }

        self.active = Some(ActiveDrag {
            handle: id,
            pointer_id: sample.pointer_id,
            snapshot,
        });
        log::debug!("Drag started on {:?} at {:?}", id, sample.hit_point.to_array());

        host.on_drag_start();
        host.set_camera_controls_enabled(false);
        Ok(true)
    }

    /// Feed a pointer sample to `id`.
    ///
    /// Returns the update that was emitted through [`GizmoHost::on_drag`], or
    /// `None` when nothing was emitted: no gesture on this handle, a sample
    /// from another pointer, or degenerate geometry this frame.
    pub fn pointer_move<H>(&mut self, id: HandleId, sample: &PointerSample, host: &mut H) -> Result<Option<DragUpdate>>
    where
        H: GizmoHost + ?Sized,
    {
        let active = match self.active {
            Some(active) if active.handle == id => active,
            _ => {
                // Hover only
                self.handles[id.index()].pointer_move(&sample.ray);
                return Ok(None);
            }
        };

        if active.pointer_id != sample.pointer_id {
            self.handles[id.index()].pointer_over();
            log::trace!("Sample from {:?} while {:?} holds capture, ignored", sample.pointer_id, active.pointer_id);
            return Ok(None);
        }

        let Some(world_delta) = self.handles[id.index()].pointer_move(&sample.ray) else {
            return Ok(None);
        };

        let update = active.snapshot.compose(world_delta, &host.parent_world())?;
        host.on_drag(&update);
        Ok(Some(update))
    }

    /// Release reported on `id`. Returns whether a gesture was closed.
    ///
    /// An open gesture closes whichever handle receives the release.
    pub fn pointer_up<H>(&mut self, id: HandleId, host: &mut H) -> bool
    where
        H: GizmoHost + ?Sized,
    {
        let Some(active) = self.active.take() else {
            log::debug!("Pointer up on {:?} with no open drag, ignored", id);
            return false;
        };

        self.handles[active.handle.index()].pointer_up();
        log::debug!("Drag ended on {:?} (released over {:?})", active.handle, id);

        host.on_drag_end();
        host.set_camera_controls_enabled(true);
        true
    }

    /// Pointer left the handle: hover feedback only
    pub fn pointer_out(&mut self, id: HandleId) {
        self.handles[id.index()].pointer_leave();
    }

    /// Abort any open gesture without a final update or `on_drag_end`.
    ///
    /// Camera controls are restored. Returns whether a gesture was open.
    pub fn cancel<H>(&mut self, host: &mut H) -> bool
    where
        H: GizmoHost + ?Sized,
    {
        let mut cancelled = false;
        for handle in &mut self.handles {
            cancelled |= handle.cancel();
        }
        cancelled |= self.active.take().is_some();

        if cancelled {
            log::debug!("Drag cancelled");
            host.set_camera_controls_enabled(true);
        }
        cancelled
    }

    /// Per-frame anchor update from the content attached under the gizmo.
    ///
    /// Content world matrices are measured in the gizmo's world frame for the
    /// given parent. Returns the new handle group position.
    pub fn update_anchor<I>(&mut self, parent_world: &Mat4, contents: I) -> Result<Vec3>
    where
        I: IntoIterator<Item = AnchorContent>,
    {
        if self.anchor.anchor().is_none() {
            return Ok(self.group_position);
        }

        let frame_inverse = self
            .world_matrix(parent_world)
            .try_inverse()
            .ok_or(GizmoError::SingularMatrix(MatrixRole::ContentFrame))?;

        self.group_position = self.anchor.update(&frame_inverse, contents);
        Ok(self.group_position)
    }
}
