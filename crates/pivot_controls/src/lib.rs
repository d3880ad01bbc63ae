//! Pivot Controls - Transform Gizmo Core
//!
//! Drag solving and matrix composition for a pivot-style manipulation gizmo:
//! three axis arrows, three plane sliders and three rotation rings. Rendering,
//! picking and scene ownership stay with the host; this crate turns pointer
//! rays into transforms.
//!
//! # Features
//!
//! - Axis translation from the closest point between a ray and an axis
//! - Plane translation from double-sided ray/plane intersection
//! - Rotation about a fixed pivot from ring plane angles
//! - Drift-free composition against a drag-start snapshot
//! - Anchor placement from the bounds of attached content
//! - TOML configuration with validated defaults
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                GizmoController                │
//! │  ┌───────────────┐  ┌───────────────────────┐ │
//! │  │ GizmoSnapshot │  │  AnchorBoundsTracker  │ │
//! │  └───────────────┘  └───────────────────────┘ │
//! │  ┌───────────────────────────────────────────┐│
//! │  │           DragHandle × 9                  ││
//! │  │  (axis arrows, plane sliders, rings)      ││
//! │  └───────────────────────────────────────────┘│
//! └───────────────────────────────────────────────┘
//!                        │
//!         ┌──────────────┼──────────────┐
//!         ▼              ▼              ▼
//!   ┌───────────┐  ┌───────────┐  ┌───────────┐
//!   │axis_offset│  │ ray_plane │  │  rotation │
//!   │  solver   │  │ intersect │  │   angle   │
//!   └───────────┘  └───────────┘  └───────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pivot_controls::prelude::*;
//!
//! let mut gizmo = GizmoController::new(GizmoConfig::default())?;
//!
//! // Host routes picked pointer events to the handle that was hit
//! gizmo.pointer_down(HandleId::AxisX, &press, &mut host)?;
//! if let Some(update) = gizmo.pointer_move(HandleId::AxisX, &drag, &mut host)? {
//!     gizmo.set_matrix(update.local);
//! }
//! gizmo.pointer_up(HandleId::AxisX, &mut host);
//! ```

pub mod anchor;
pub mod config;
pub mod controller;
pub mod error;
pub mod handle;
pub mod host;
pub mod solver;

pub mod prelude {
    //! Common imports for gizmo hosts
    pub use crate::anchor::{AnchorBoundsTracker, AnchorContent};
    pub use crate::config::{ArrowDimensions, GizmoConfig};
    pub use crate::controller::{GizmoController, GizmoSnapshot};
    pub use crate::error::{GizmoError, MatrixRole, Result};
    pub use crate::handle::{DragHandle, DragSession, HandleId, HandleKind, HandleState};
    pub use crate::host::{DragUpdate, GizmoHost, PointerId, PointerSample};
    pub use pivot_math::{Mat4, Ray, Vec3, AABB};
}

pub use prelude::*;
