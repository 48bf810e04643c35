use lux_math::{align_zero, Color, MathResult, Point, Vector};

use super::{LightSource, PointLight};

/// A point light restricted to a cone around its direction.
///
/// Intensity is the point light intensity times `max(0, dir·L)^narrow_beam`.
/// A `narrow_beam` of 1 gives a plain cosine falloff; larger values
/// tighten the beam.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> MathResult<Self> {
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction: direction.normalize()?,
            narrow_beam: 1.0,
        })
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Color {
        let Ok(l) = self.point.incident_direction(point) else {
            return Color::ZERO;
        };

        let projection = align_zero(self.direction.dot(l));
        if projection <= 0.0 {
            return Color::ZERO;
        }
        self.point.intensity_at(point) * projection.powf(self.narrow_beam)
    }

    fn incident_direction(&self, point: Point) -> MathResult<Vector> {
        self.point.incident_direction(point)
    }

    fn distance_to(&self, point: Point) -> f64 {
        self.point.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot() -> SpotLight {
        SpotLight::new(Color::ONE, Point::new(0.0, 0.0, 10.0), -Vector::Z).unwrap()
    }

    #[test]
    fn test_spot_on_axis_full_intensity() {
        assert_eq!(spot().intensity_at(Point::ZERO), Color::ONE);
    }

    #[test]
    fn test_spot_cosine_falloff() {
        // 45 degrees off axis
        let i = spot().intensity_at(Point::new(10.0, 0.0, 0.0));
        let expected = std::f64::consts::FRAC_1_SQRT_2;
        assert!((i - Color::splat(expected)).length() < 1e-12);

        let narrow = spot().with_narrow_beam(2.0).intensity_at(Point::new(10.0, 0.0, 0.0));
        assert!((narrow - Color::splat(0.5)).length() < 1e-12);
    }

    #[test]
    fn test_spot_behind_is_dark() {
        assert_eq!(spot().intensity_at(Point::new(0.0, 0.0, 20.0)), Color::ZERO);
        assert_eq!(spot().intensity_at(Point::new(5.0, 0.0, 10.0)), Color::ZERO);
    }
}
