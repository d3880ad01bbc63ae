//! Gizmo configuration

use serde::{Deserialize, Serialize};

use crate::error::{GizmoError, Result};

/// Gizmo construction settings
///
/// Every field has a default, so a TOML document only needs the keys it
/// wants to change:
///
/// ```
/// use pivot_controls::GizmoConfig;
///
/// let config = GizmoConfig::from_toml_str("anchor = [1.0, 1.0, -1.0]\nopacity = 0.5").unwrap();
/// assert_eq!(config.anchor, Some([1.0, 1.0, -1.0]));
/// assert_eq!(config.axis_length, 32.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Length of the axis arrows
    pub axis_length: f32,

    /// Radius of the arrow shafts
    pub axis_width: f32,

    /// Draw a cone tip on the arrows
    pub axis_cone: bool,

    /// Edge length of the plane sliders
    pub slider_length: f32,

    /// Thickness of the plane slider bars
    pub slider_width: f32,

    /// Outer radius of the rotation rings
    pub rotator_radius: f32,

    /// Thickness of the rotation rings
    pub rotator_width: f32,

    /// 0xRRGGBB colors for the X, Y and Z axes
    pub axis_colors: [u32; 3],

    /// 0xRRGGBB color of a hovered handle
    pub hovered_color: u32,

    /// Handle opacity in [0, 1]
    pub opacity: f32,

    /// Fixed offset of the handle group in the gizmo's local frame
    pub offset: [f32; 3],

    /// Anchor fraction in [-1, 1] per axis, relative to the attached content bounds
    pub anchor: Option<[f32; 3]>,

    /// Base rotation of the handle group (XYZ Euler, radians)
    pub rotation: [f32; 3],
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            axis_length: 32.0,
            axis_width: 1.0,
            axis_cone: true,
            slider_length: 10.0,
            slider_width: 3.0,
            rotator_radius: 19.0,
            rotator_width: 3.0,
            axis_colors: [0xd52828, 0x28a628, 0x2828d7],
            hovered_color: 0xd5d528,
            opacity: 1.0,
            offset: [0.0, 0.0, 0.0],
            anchor: None,
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

/// Proportions of an axis arrow, for hosts that build meshes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowDimensions {
    pub cylinder_width: f32,
    pub cylinder_length: f32,
    pub cone_width: f32,
    pub cone_length: f32,
}

impl GizmoConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the fixed offset
    pub fn with_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.offset = [x, y, z];
        self
    }

    /// Set the anchor fraction
    pub fn with_anchor(mut self, x: f32, y: f32, z: f32) -> Self {
        self.anchor = Some([x, y, z]);
        self
    }

    /// Set the base rotation
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = [x, y, z];
        self
    }

    /// Set the handle opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the axis colors
    pub fn with_axis_colors(mut self, colors: [u32; 3]) -> Self {
        self.axis_colors = colors;
        self
    }

    /// Check sizes, anchor range and vectors
    ///
    /// Opacity is not checked here; the controller clamps it.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("axis_length", self.axis_length),
            ("axis_width", self.axis_width),
            ("slider_length", self.slider_length),
            ("slider_width", self.slider_width),
            ("rotator_radius", self.rotator_radius),
            ("rotator_width", self.rotator_width),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(GizmoError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.slider_width >= self.slider_length {
            return Err(GizmoError::InvalidConfig(format!(
                "slider_width ({}) must be smaller than slider_length ({})",
                self.slider_width, self.slider_length
            )));
        }
        if self.rotator_width >= self.rotator_radius {
            return Err(GizmoError::InvalidConfig(format!(
                "rotator_width ({}) must be smaller than rotator_radius ({})",
                self.rotator_width, self.rotator_radius
            )));
        }

        if let Some(anchor) = self.anchor {
            if anchor.iter().any(|a| !(-1.0..=1.0).contains(a)) {
                return Err(GizmoError::InvalidConfig(format!(
                    "anchor components must lie in [-1, 1], got {anchor:?}"
                )));
            }
        }

        if self.offset.iter().chain(self.rotation.iter()).any(|v| !v.is_finite()) {
            return Err(GizmoError::InvalidConfig(
                "offset and rotation must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Arrow shaft and cone sizes derived from `axis_length` and `axis_width`
    pub fn arrow_dimensions(&self) -> ArrowDimensions {
        let cylinder_width = self.axis_width;
        let cone_width = cylinder_width * 1.5;
        let cone_length = (cone_width / 0.12).min(self.axis_length / 2.0);
        let cylinder_length = if self.axis_cone {
            self.axis_length - cone_length
        } else {
            self.axis_length
        };

        ArrowDimensions {
            cylinder_width,
            cylinder_length,
            cone_width,
            cone_length,
        }
    }
}

/// Split a 0xRRGGBB color into normalized channels
pub fn color_to_rgb(color: u32) -> [f32; 3] {
    let channel = |shift: u32| ((color >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}
