//! Infinite tube (cylinder without caps) around an axis ray.

use lux_math::{align_zero, is_zero, MathResult, Point, Ray, Vector};

use super::{forward_hits, GeoPoint, Geometry, GeometryError, GeometryResult, Intersectable};
use crate::material::Surface;

/// An infinite cylinder: every point at `radius` from the axis line.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn axis(&self) -> Ray {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Parametric distances where the ray crosses the tube wall.
    ///
    /// Solves `|(P(t) - A) - ((P(t) - A)·va) va|² = r²` for t. A ray
    /// parallel to the axis never crosses the wall. A tangent ray yields a
    /// single root.
    pub(crate) fn wall_distances(&self, ray: &Ray) -> Vec<f64> {
        let v = ray.direction().get();
        let va = self.axis.direction().get();
        let delta = ray.origin() - self.axis.origin();

        let vva = v.dot(va);
        let a = align_zero(v.dot(v) - vva * vva);
        if a == 0.0 {
            return Vec::new();
        }

        let dva = delta.dot(va);
        let b = 2.0 * (v.dot(delta) - vva * dva);
        let c = delta.dot(delta) - dva * dva - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant < 0.0 {
            return Vec::new();
        }

        let sqrt_d = discriminant.sqrt();
        let t1 = align_zero((-b - sqrt_d) / (2.0 * a));
        let t2 = align_zero((-b + sqrt_d) / (2.0 * a));
        forward_hits(vec![t1, t2])
    }

    /// Normal of the tube wall at `point`.
    pub(crate) fn wall_normal(&self, point: Point) -> MathResult<Vector> {
        let p0 = self.axis.origin();
        let va = self.axis.direction();
        let t = align_zero(va.get().dot(point - p0));

        // The point is level with the axis origin
        if is_zero(t) {
            return Vector::between(p0, point)?.normalize();
        }

        let closest = self.axis.at(t);
        Vector::between(closest, point)?.normalize()
    }
}

impl Intersectable for Tube {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.wall_distances(ray)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect()
    }
}

impl Geometry for Tube {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        self.wall_normal(point)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_tube() -> Tube {
        Tube::new(Ray::new(Point::ZERO, Vector::Z).unwrap(), 1.0).unwrap()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_tube_rejects_bad_radius() {
        let axis = Ray::new(Point::ZERO, Vector::Z).unwrap();
        assert!(Tube::new(axis, 0.0).is_err());
        assert!(Tube::new(axis, -2.0).is_err());
    }

    #[test]
    fn test_tube_normal() {
        let tube = z_tube();
        assert_eq!(tube.normal_at(Point::new(0.0, 1.0, 3.0)).unwrap(), Vector::Y);

        // Level with the axis origin
        assert_eq!(tube.normal_at(Point::new(1.0, 0.0, 0.0)).unwrap(), Vector::X);
    }

    #[test]
    fn test_tube_ray_crosses() {
        let tube = z_tube();
        let ray = Ray::new(Point::new(-2.0, 0.0, 1.0), Vector::X).unwrap();

        let hits = tube.intersect_points(&ray);
        assert_eq!(hits.len(), 2);
        assert_close(hits[0], Point::new(-1.0, 0.0, 1.0));
        assert_close(hits[1], Point::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_tube_ray_starts_inside() {
        let tube = z_tube();
        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), Vector::Y).unwrap();

        let hits = tube.intersect_points(&ray);
        assert_eq!(hits.len(), 1);
        assert_close(hits[0], Point::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_tube_ray_misses() {
        let tube = z_tube();
        let ray = Ray::new(Point::new(-2.0, 3.0, 0.0), Vector::X).unwrap();
        assert!(tube.intersect(&ray).is_empty());

        // Pointing away
        let ray = Ray::new(Point::new(2.0, 0.0, 0.0), Vector::X).unwrap();
        assert!(tube.intersect(&ray).is_empty());
    }

    #[test]
    fn test_tube_parallel_ray() {
        let tube = z_tube();
        let inside = Ray::new(Point::new(0.5, 0.0, 0.0), Vector::Z).unwrap();
        let outside = Ray::new(Point::new(3.0, 0.0, 0.0), Vector::Z).unwrap();
        assert!(tube.intersect(&inside).is_empty());
        assert!(tube.intersect(&outside).is_empty());
    }

    #[test]
    fn test_tube_tangent_ray() {
        let tube = z_tube();
        let ray = Ray::new(Point::new(-2.0, 1.0, 0.0), Vector::X).unwrap();

        let hits = tube.intersect_points(&ray);
        assert_eq!(hits.len(), 1);
        assert_close(hits[0], Point::new(0.0, 1.0, 0.0));
    }
}
