//! Infinite plane primitive.

use lux_math::{align_zero, MathResult, Point, Ray, Vector};

use super::{GeoPoint, Geometry, GeometryError, GeometryResult, Intersectable};
use crate::material::Surface;

/// An infinite plane given by a point on it and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Point,
    normal: Vector,
    surface: Surface,
}

impl Plane {
    /// Create a plane from a point and a normal. The normal is normalized.
    pub fn new(point: Point, normal: Vector) -> MathResult<Self> {
        Ok(Self {
            point,
            normal: normal.normalize()?,
            surface: Surface::default(),
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(p2 - p1) × (p3 - p1)`, normalized. Coincident or
    /// collinear points do not define a plane.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> GeometryResult<Self> {
        let v1 = Vector::between(p1, p2).map_err(|_| GeometryError::DegenerateVertices)?;
        let v2 = Vector::between(p1, p3).map_err(|_| GeometryError::DegenerateVertices)?;
        let normal = v1
            .cross(v2)
            .and_then(Vector::normalize)
            .map_err(|_| GeometryError::DegenerateVertices)?;

        Ok(Self {
            point: p1,
            normal,
            surface: Surface::default(),
        })
    }

    /// The reference point of the plane.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The unit normal of the plane.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Parametric distance and location of the ray's crossing, if any.
    ///
    /// A ray parallel to the plane, or starting on it, does not cross.
    pub(crate) fn crossing(&self, ray: &Ray) -> Option<(f64, Point)> {
        let nv = self.normal.dot(ray.direction());
        if nv == 0.0 {
            return None;
        }

        let numerator = align_zero(self.normal.get().dot(self.point - ray.origin()));
        if numerator == 0.0 {
            return None;
        }

        let t = align_zero(numerator / nv);
        (t > 0.0).then(|| (t, ray.at(t)))
    }
}

impl Intersectable for Plane {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.crossing(ray)
            .map(|(_, p)| vec![GeoPoint::new(self, p)])
            .unwrap_or_default()
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.normal)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
