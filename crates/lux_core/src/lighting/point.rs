use lux_math::{Color, MathResult, Point, Vector};

use super::LightSource;

/// A point light, which emits in all directions from a specified position.
///
/// Intensity falls off as `1 / (kc + kl·d + kq·d²)`.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    /// Constant attenuation
    kc: f64,
    /// Linear attenuation
    kl: f64,
    /// Quadratic attenuation
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance falloff.
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Color {
        let d2 = point.distance_squared(self.position);
        let d = d2.sqrt();
        self.intensity / (self.kc + self.kl * d + self.kq * d2)
    }

    fn incident_direction(&self, point: Point) -> MathResult<Vector> {
        Vector::between(self.position, point)?.normalize()
    }

    fn distance_to(&self, point: Point) -> f64 {
        self.position.distance(point)
    }
}
