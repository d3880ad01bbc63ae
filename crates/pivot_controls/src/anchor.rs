//! Anchor placement from the bounds of attached content

use pivot_math::{Mat4, Vec3, AABB};

/// One piece of content attached beneath the gizmo
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorContent {
    /// World matrix of the content node
    pub world: Mat4,
    /// Bounds of its geometry in its own frame, if it has any
    pub bounds: Option<AABB>,
}

impl AnchorContent {
    pub fn new(world: Mat4, bounds: Option<AABB>) -> Self {
        Self { world, bounds }
    }
}

/// Places the handle group relative to the union of content bounds.
///
/// The box is rebuilt from scratch on every [`update`](Self::update); nothing
/// carries over between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorBoundsTracker {
    anchor: Option<Vec3>,
    offset: Vec3,
    bounds: AABB,
}

impl AnchorBoundsTracker {
    pub fn new(anchor: Option<Vec3>, offset: Vec3) -> Self {
        Self {
            anchor,
            offset,
            bounds: AABB::EMPTY,
        }
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Union of content bounds from the last update, in the content frame
    pub fn bounds(&self) -> Option<AABB> {
        (!self.bounds.is_empty()).then_some(self.bounds)
    }

    /// Recompute the content box and return the handle group position.
    ///
    /// `frame_inverse` maps world space into the frame the content hangs
    /// from. Content without bounds is skipped. With no anchor configured or
    /// no bounded content the fixed offset is returned.
    pub fn update<I>(&mut self, frame_inverse: &Mat4, contents: I) -> Vec3
    where
        I: IntoIterator<Item = AnchorContent>,
    {
        self.bounds = AABB::EMPTY;

        if self.anchor.is_none() {
            return self.offset;
        }

        for content in contents {
            let Some(bounds) = content.bounds else {
                continue;
            };
            let to_frame = *frame_inverse * content.world;
            self.bounds = self.bounds.union(&bounds.transform(&to_frame));
        }

        self.placement()
    }

    /// `offset + anchor ⊙ half_extent + center` for the current box
    pub fn placement(&self) -> Vec3 {
        match (self.anchor, self.bounds()) {
            (Some(anchor), Some(bounds)) => {
                self.offset + bounds.half_extents().mul_elementwise(anchor) + bounds.center()
            }
            _ => self.offset,
        }
    }
}
