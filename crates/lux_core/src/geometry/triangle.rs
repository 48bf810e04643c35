//! Triangle primitive for ray tracing.
//!
//! A triangle is the three-vertex case of [`Polygon`]; it shares the
//! edge-side inside test and the boundary-is-a-miss rule.

use lux_math::{MathResult, Point, Ray, Vector};

use super::{GeoPoint, Geometry, GeometryResult, Intersectable, Polygon};
use crate::material::Surface;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Create a new triangle. Coincident or collinear vertices are rejected.
    pub fn new(v0: Point, v1: Point, v2: Point) -> GeometryResult<Self> {
        Ok(Self {
            polygon: Polygon::new(vec![v0, v1, v2])?,
        })
    }

    pub fn vertices(&self) -> [Point; 3] {
        let v = self.polygon.vertices();
        [v[0], v[1], v[2]]
    }
}

impl Intersectable for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.polygon
            .crossing(ray)
            .map(|p| vec![GeoPoint::new(self, p)])
            .unwrap_or_default()
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, point: Point) -> MathResult<Vector> {
        self.polygon.normal_at(point)
    }

    fn surface(&self) -> &Surface {
        self.polygon.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.polygon.surface_mut()
    }
}
