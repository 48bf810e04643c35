//! Finite cylinder: a tube cut to a height and closed by two disk caps.

use lux_math::{align_zero, is_zero, MathResult, Point, Ray, Vector};

use super::{forward_hits, GeoPoint, Geometry, GeometryError, GeometryResult, Intersectable, Tube};
use crate::material::Surface;

/// A capped cylinder spanning axial parameter `[0, height]` along its axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    surface: Surface,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
            surface: Surface::default(),
        })
    }

    pub fn axis(&self) -> Ray {
        self.tube.axis()
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Axial parameter of a point: its projection onto the axis direction.
    fn axial(&self, point: Point) -> f64 {
        let axis = self.tube.axis();
        align_zero(axis.direction().get().dot(point - axis.origin()))
    }

    /// Parametric distance to the cap disk centered at `center`, if the ray
    /// crosses it strictly inside the radius.
    fn cap_distance(&self, ray: &Ray, center: Point) -> Option<f64> {
        let va = self.tube.axis().direction();
        let nv = va.dot(ray.direction());
        if nv == 0.0 {
            return None;
        }

        let t = align_zero(va.get().dot(center - ray.origin()) / nv);
        if t <= 0.0 {
            return None;
        }

        let r = self.tube.radius();
        let inside = align_zero(ray.at(t).distance_squared(center) - r * r) < 0.0;
        inside.then_some(t)
    }
}

impl Intersectable for Cylinder {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        let axis = self.tube.axis();

        let mut ts: Vec<f64> = self
            .tube
            .wall_distances(ray)
            .into_iter()
            .filter(|t| {
                let h = self.axial(ray.at(*t));
                h >= 0.0 && align_zero(h - self.height) <= 0.0
            })
            .collect();

        let bottom = axis.origin();
        let top = axis.at(self.height);
        ts.extend(self.cap_distance(ray, bottom));
        ts.extend(self.cap_distance(ray, top));

        forward_hits(ts)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect()
    }
}

impl Geometry for Cylinder {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        let va = self.tube.axis().direction();

        // The axis origin itself lies on the bottom cap
        if point == self.tube.axis().origin() {
            return Ok(-va);
        }

        let t = self.axial(point);
        if is_zero(t) {
            return Ok(-va);
        }
        if is_zero(t - self.height) {
            return Ok(va);
        }
        self.tube.wall_normal(point)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
