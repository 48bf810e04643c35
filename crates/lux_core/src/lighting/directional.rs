use lux_math::{Color, MathResult, Point, Vector};

use super::LightSource;

/// A light infinitely far away, shining along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> MathResult<Self> {
        Ok(Self {
            intensity,
            direction: direction.normalize()?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point) -> Color {
        self.intensity
    }

    fn incident_direction(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.direction)
    }

    fn distance_to(&self, _point: Point) -> f64 {
        f64::INFINITY
    }
}
