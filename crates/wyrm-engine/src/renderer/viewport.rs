use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Visible extent of the scene plane (z = 0), in scene units, centered on the origin.
///
/// Default matches a 45° vertical FOV camera 5 units from the plane at 16:9.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Visible width in scene units.
    pub width: f32,
    /// Visible height in scene units.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 7.364,
            height: 4.142,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Resize the visible area (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Map a normalized device pointer (-1..1 on both axes, Y-up) onto the scene plane.
    pub fn ndc_to_scene(&self, ndc: Vec2) -> Vec3 {
        Vec3::new(ndc.x * self.width / 2.0, ndc.y * self.height / 2.0, 0.0)
    }
}
