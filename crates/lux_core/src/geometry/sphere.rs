//! Sphere primitive for ray tracing.

use lux_math::{align_zero, MathResult, Point, Ray, Vector};

use super::{forward_hits, GeoPoint, Geometry, GeometryError, GeometryResult, Intersectable};
use crate::material::Surface;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        let origin = ray.origin();

        // A ray from the center leaves through exactly one point
        if origin == self.center {
            return vec![GeoPoint::new(self, ray.at(self.radius))];
        }

        let u = self.center - origin;
        let tm = align_zero(ray.direction().get().dot(u));
        let d = align_zero((u.length_squared() - tm * tm).max(0.0).sqrt());

        // Passing at or beyond the radius is a miss (tangent included)
        if d >= self.radius {
            return Vec::new();
        }

        let th = (self.radius * self.radius - d * d).sqrt();
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);

        forward_hits(vec![t1, t2])
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect()
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        Vector::between(self.center, point)?.normalize()
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

    fn unit_sphere() -> Sphere {
        Sphere::new(Point::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    fn ray(origin: (f64, f64, f64), dir: (f64, f64, f64)) -> Ray {
        Ray::new(
            Point::new(origin.0, origin.1, origin.2),
            Vector::new(dir.0, dir.1, dir.2).unwrap(),
        )
        .unwrap()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert_eq!(
            Sphere::new(Point::ZERO, 0.0).unwrap_err(),
            GeometryError::NonPositiveRadius(0.0)
        );
        assert!(Sphere::new(Point::ZERO, -1.0).is_err());
        assert!(Sphere::new(Point::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere();
        let n = sphere.normal_at(Point::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(n, Vector::X);
    }

    #[test]
    fn test_sphere_ray_through_center() {
        let sphere = Sphere::new(Point::ZERO, 1.0).unwrap();
        let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

        let hits = sphere.intersect_points(&r);
        assert_eq!(hits.len(), 2);
        assert_close(hits[0], Point::new(0.0, 0.0, -1.0));
        assert_close(hits[1], Point::new(0.0, 0.0, 1.0));

        let t0 = hits[0].distance(r.origin());
        let t1 = hits[1].distance(r.origin());
        assert!((t1 - t0 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_ray_misses() {
        let sphere = unit_sphere();
        let r = ray((-1.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        assert!(sphere.intersect(&r).is_empty());
    }

    #[test]
    fn test_sphere_ray_crosses_two_points() {
        let sphere = unit_sphere();
        let r = ray((-1.0, 0.0, 0.0), (3.0, 1.0, 0.0));

        let hits = sphere.intersect_points(&r);
        assert_eq!(hits.len(), 2);
        assert_close(hits[0], Point::new(0.0651530771650466, 0.355051025721682, 0.0));
        assert_close(hits[1], Point::new(1.53484692283495, 0.844948974278318, 0.0));
    }

    #[test]
    fn test_sphere_ray_starts_inside() {
        let sphere = unit_sphere();
        let r = ray((0.5, 0.5, 0.0), (3.0, 1.0, 0.0));

        let hits = sphere.intersect_points(&r);
        assert_eq!(hits.len(), 1);
        assert_close(hits[0], Point::new(1.5348469228349535, 0.8449489742783178, 0.0));
    }

    #[test]
    fn test_sphere_ray_after_sphere() {
        let sphere = unit_sphere();
        let r = ray((2.0, 1.0, 0.0), (3.0, 1.0, 0.0));
        assert!(sphere.intersect(&r).is_empty());
    }

    #[test]
    fn test_sphere_ray_from_center() {
        let sphere = unit_sphere();
        let r = ray((1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        assert_eq!(sphere.intersect_points(&r), vec![Point::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_sphere_ray_starts_on_surface_going_out() {
        let sphere = unit_sphere();
        let r = ray((2.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert!(sphere.intersect(&r).is_empty());
    }

    #[test]
    fn test_sphere_ray_starts_on_surface_going_in() {
        let sphere = unit_sphere();
        let r = ray((2.0, 0.0, 0.0), (-1.0, 0.0, 0.0));
        assert_eq!(sphere.intersect_points(&r), vec![Point::new(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_sphere_tangent_ray() {
        let sphere = unit_sphere();
        let r = ray((0.0, 1.0, 0.0), (1.0, 0.0, 0.0));
        assert!(sphere.intersect(&r).is_empty());
    }
}
