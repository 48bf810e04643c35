//! Phong material coefficients and per-geometry surface properties.

use lux_math::{Color, Factor};

/// Phong material with transparency and reflection.
///
/// Every coefficient is per-channel and non-negative; setters clamp
/// negative channels to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: Factor,
    /// Specular coefficient
    pub ks: Factor,
    /// Transparency (refraction) coefficient
    pub kt: Factor,
    /// Reflection coefficient
    pub kr: Factor,
    /// Specular exponent
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Factor::ZERO,
            ks: Factor::ZERO,
            kt: Factor::ZERO,
            kr: Factor::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    pub fn with_kd(mut self, kd: Factor) -> Self {
        self.kd = kd.max(Factor::ZERO);
        self
    }

    pub fn with_ks(mut self, ks: Factor) -> Self {
        self.ks = ks.max(Factor::ZERO);
        self
    }

    pub fn with_kt(mut self, kt: Factor) -> Self {
        self.kt = kt.max(Factor::ZERO);
        self
    }

    pub fn with_kr(mut self, kr: Factor) -> Self {
        self.kr = kr.max(Factor::ZERO);
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// What a geometry looks like: its own emitted light plus its material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    /// Emission color (black for non-emissive geometry)
    pub emission: Color,
    pub material: Material,
}
