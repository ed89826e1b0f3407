//! Lighting types for the renderer.

use crate::math::Vec3f;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3f,
}

impl Default for DirectionalLight {
    /// Light travelling into the screen, along -Z.
    fn default() -> Self {
        Self::new(Vec3f::BACK)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3f) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Unit normal of a world-space triangle, `(b - a) x (c - a)` normalized.
    ///
    /// Returns `None` for a zero-area triangle, whose normal has no direction.
    pub fn face_normal(corners: [Vec3f; 3]) -> Option<Vec3f> {
        let [a, b, c] = corners;
        let normal = (b - a).cross(c - a).normalize();
        normal.is_finite().then_some(normal)
    }

    /// Calculate light intensity for flat shading.
    ///
    /// Returns intensity in [0.0, 1.0] range based on the angle between
    /// the surface normal and the light direction.
    pub fn intensity(&self, normal: Vec3f) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal.normalize()).max(0.0)
    }

    /// Intensity of a whole face. Degenerate faces receive no light.
    pub fn face_intensity(&self, corners: [Vec3f; 3]) -> f32 {
        Self::face_normal(corners).map_or(0.0, |n| self.intensity(n))
    }
}
