use lux_math::{Color, Factor};

/// Constant light present at every point of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Ambient light that contributes nothing.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of color `ia` scaled per channel by `ka`.
    pub fn new(ia: Color, ka: Factor) -> Self {
        Self { intensity: ia * ka }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}
