//! Draggable gizmo handles and their per-gesture state machine.
//!
//! A handle is Idle until `pointer_down` opens a [`DragSession`]. While the
//! session is open every `pointer_move` turns the pointer ray into a
//! world-space delta matrix; `pointer_up` or `cancel` closes it again.

use pivot_math::{ray_plane_point_double_sided, Mat4, Plane, Ray, Vec3};

use crate::config::{color_to_rgb, GizmoConfig};
use crate::solver::{axis_offset, rotation_angle};

/// Identity of one of the nine gizmo handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleId {
    // Axis arrows
    AxisX,
    AxisY,
    AxisZ,
    // Plane sliders, named by the plane they slide in
    PlaneXY,
    PlaneXZ,
    PlaneYZ,
    // Rotation rings, named by the axis they rotate around
    RingX,
    RingY,
    RingZ,
}

impl HandleId {
    pub const ALL: [HandleId; 9] = [
        HandleId::AxisX,
        HandleId::AxisY,
        HandleId::AxisZ,
        HandleId::PlaneXY,
        HandleId::PlaneXZ,
        HandleId::PlaneYZ,
        HandleId::RingX,
        HandleId::RingY,
        HandleId::RingZ,
    ];

    /// Position in [`HandleId::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Local geometry of this handle in the gizmo group frame
    pub fn kind(self) -> HandleKind {
        match self {
            HandleId::AxisX => HandleKind::AxisTranslation { direction: Vec3::X },
            HandleId::AxisY => HandleKind::AxisTranslation { direction: Vec3::Y },
            HandleId::AxisZ => HandleKind::AxisTranslation { direction: Vec3::Z },
            HandleId::PlaneXY => HandleKind::PlaneTranslation { dir1: Vec3::X, dir2: Vec3::Y },
            HandleId::PlaneXZ => HandleKind::PlaneTranslation { dir1: Vec3::Z, dir2: Vec3::X },
            HandleId::PlaneYZ => HandleKind::PlaneTranslation { dir1: Vec3::Y, dir2: Vec3::Z },
            HandleId::RingX => HandleKind::AxisRotation { dir1: Vec3::Y, dir2: Vec3::Z },
            HandleId::RingY => HandleKind::AxisRotation { dir1: Vec3::Z, dir2: Vec3::X },
            HandleId::RingZ => HandleKind::AxisRotation { dir1: Vec3::X, dir2: Vec3::Y },
        }
    }

    /// Index of the axis whose color this handle wears
    ///
    /// Sliders and rings take the color of their normal axis.
    pub fn color_axis(self) -> usize {
        match self {
            HandleId::AxisX | HandleId::PlaneYZ | HandleId::RingX => 0,
            HandleId::AxisY | HandleId::PlaneXZ | HandleId::RingY => 1,
            HandleId::AxisZ | HandleId::PlaneXY | HandleId::RingZ => 2,
        }
    }
}

/// Handle geometry in the gizmo group frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandleKind {
    /// Arrow translating along `direction`
    AxisTranslation { direction: Vec3 },
    /// Slider translating in the plane spanned by `dir1` and `dir2`
    PlaneTranslation { dir1: Vec3, dir2: Vec3 },
    /// Ring rotating around `dir1 × dir2`
    AxisRotation { dir1: Vec3, dir2: Vec3 },
}

impl HandleKind {
    /// Transform from the handle's own frame to the gizmo group frame
    ///
    /// Sliders and rings use the basis `(dir1, dir2, dir1 × dir2)`; arrows
    /// sit directly in the group frame.
    pub fn local_matrix(&self) -> Mat4 {
        match *self {
            HandleKind::AxisTranslation { .. } => Mat4::IDENTITY,
            HandleKind::PlaneTranslation { dir1, dir2 } | HandleKind::AxisRotation { dir1, dir2 } => {
                let d1 = dir1.normalize();
                let d2 = dir2.normalize();
                Mat4::from_basis(d1, d2, d1.cross(d2))
            }
        }
    }
}

/// State captured on pointer-down, alive for one gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragSession {
    Axis {
        click_point: Vec3,
        direction: Vec3,
    },
    Plane {
        click_point: Vec3,
        plane: Plane,
    },
    Rotation {
        click_point: Vec3,
        origin: Vec3,
        e1: Vec3,
        e2: Vec3,
        normal: Vec3,
        plane: Plane,
    },
}

impl DragSession {
    /// Capture a session for `kind` against the current world matrix of the
    /// handle's frame.
    pub fn capture(kind: &HandleKind, handle_world: &Mat4, click_point: Vec3) -> Self {
        match *kind {
            HandleKind::AxisTranslation { direction } => {
                let rotation = handle_world.extract_rotation();
                DragSession::Axis {
                    click_point,
                    direction: rotation.transform_vector(direction).normalize(),
                }
            }
            HandleKind::PlaneTranslation { .. } => {
                let origin = handle_world.translation();
                let normal = handle_world.column(2).normalize();
                DragSession::Plane {
                    click_point,
                    plane: Plane::from_point_normal(origin, normal),
                }
            }
            HandleKind::AxisRotation { .. } => {
                let origin = handle_world.translation();
                let e1 = handle_world.column(0).normalize();
                let e2 = handle_world.column(1).normalize();
                let normal = handle_world.column(2).normalize();
                DragSession::Rotation {
                    click_point,
                    origin,
                    e1,
                    e2,
                    normal,
                    plane: Plane::from_point_normal(origin, normal),
                }
            }
        }
    }

    /// World-space delta selected by `ray`, or `None` for a degenerate frame
    pub fn solve(&self, ray: &Ray) -> Option<Mat4> {
        let delta = match *self {
            DragSession::Axis { click_point, direction } => {
                let offset = axis_offset(click_point, direction, ray.origin, ray.direction)?;
                Mat4::from_translation(direction * offset)
            }
            DragSession::Plane { click_point, plane } => {
                let intersection = ray_plane_point_double_sided(ray, &plane)?;
                Mat4::from_translation(intersection - click_point)
            }
            DragSession::Rotation { click_point, origin, e1, e2, normal, plane } => {
                let intersection = ray_plane_point_double_sided(ray, &plane)?;
                let angle = rotation_angle(click_point, intersection, origin, e1, e2);
                if !angle.is_finite() {
                    return None;
                }
                // Pivot around the ring origin instead of the world origin
                let rotation = Mat4::from_axis_angle(normal, angle);
                let recenter = -(rotation.transform_point(origin) - origin);
                rotation.with_translation(recenter)
            }
        };

        delta.is_finite().then_some(delta)
    }

    pub fn click_point(&self) -> Vec3 {
        match *self {
            DragSession::Axis { click_point, .. }
            | DragSession::Plane { click_point, .. }
            | DragSession::Rotation { click_point, .. } => click_point,
        }
    }
}

/// Lifecycle state of a handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleState {
    Idle,
    Dragging,
}

/// One draggable element of the gizmo.
#[derive(Clone, Debug)]
pub struct DragHandle {
    id: HandleId,
    kind: HandleKind,
    color: u32,
    hovered_color: u32,
    opacity: f32,
    session: Option<DragSession>,
    hovered: bool,
}

impl DragHandle {
    pub fn new(id: HandleId, config: &GizmoConfig) -> Self {
        Self {
            id,
            kind: id.kind(),
            color: config.axis_colors[id.color_axis()],
            hovered_color: config.hovered_color,
            opacity: config.opacity,
            session: None,
            hovered: false,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn kind(&self) -> &HandleKind {
        &self.kind
    }

    pub fn state(&self) -> HandleState {
        if self.session.is_some() {
            HandleState::Dragging
        } else {
            HandleState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Color to draw the handle with right now
    pub fn display_color(&self) -> u32 {
        if self.hovered {
            self.hovered_color
        } else {
            self.color
        }
    }

    pub fn display_rgb(&self) -> [f32; 3] {
        color_to_rgb(self.display_color())
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Needs blending when drawn
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Open a session. `frame_world` is the current world matrix of the gizmo
    /// group holding the handle.
    ///
    /// Returns `false` and leaves the open session untouched if one exists.
    pub fn pointer_down(&mut self, frame_world: &Mat4, hit_point: Vec3) -> bool {
        if self.session.is_some() {
            log::debug!("{:?}: pointer down while already dragging, ignored", self.id);
            return false;
        }

        let handle_world = *frame_world * self.kind.local_matrix();
        self.session = Some(DragSession::capture(&self.kind, &handle_world, hit_point));
        true
    }

    /// Solve the delta for `ray`. Marks the handle hovered either way.
    ///
    /// Returns `None` while idle or when the frame is degenerate.
    pub fn pointer_move(&mut self, ray: &Ray) -> Option<Mat4> {
        self.pointer_over();

        let session = self.session.as_ref()?;
        if !ray.is_valid() {
            log::trace!("{:?}: unusable pointer ray, frame skipped", self.id);
            return None;
        }

        let delta = session.solve(ray);
        if delta.is_none() {
            log::trace!("{:?}: degenerate drag geometry, frame skipped", self.id);
        }
        delta
    }

    /// Close the session. Returns whether one was open.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Hover feedback without solving
    pub fn pointer_over(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Drop any session without producing a delta. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}
