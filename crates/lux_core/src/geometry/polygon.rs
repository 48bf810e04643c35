//! Convex planar polygon.

use lux_math::{align_zero, is_zero, MathResult, Point, Ray, Vector};

use super::{GeoPoint, Geometry, GeometryError, GeometryResult, Intersectable, Plane};
use crate::material::Surface;

/// A convex polygon with ordered, coplanar vertices.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
    surface: Surface,
}

impl Polygon {
    /// Create a polygon from its vertices, in order along the boundary.
    ///
    /// Fails when there are fewer than three vertices, when consecutive
    /// vertices coincide or are collinear, when the vertices are not
    /// coplanar, or when the turn direction changes (concave or
    /// mis-ordered input).
    pub fn new(vertices: Vec<Point>) -> GeometryResult<Self> {
        let size = vertices.len();
        if size < 3 {
            return Err(GeometryError::TooFewVertices(size));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size > 3 {
            Self::check_convex(&vertices, plane.normal())?;
        }

        Ok(Self {
            vertices,
            plane,
            surface: Surface::default(),
        })
    }

    fn check_convex(vertices: &[Point], n: Vector) -> GeometryResult<()> {
        let edge = |from: Point, to: Point| {
            Vector::between(from, to).map_err(|_| GeometryError::DegenerateVertices)
        };
        let turn = |a: Vector, b: Vector| {
            a.cross(b)
                .map(|c| c.dot(n) > 0.0)
                .map_err(|_| GeometryError::DegenerateVertices)
        };

        let last = vertices.len() - 1;
        let mut edge1 = edge(vertices[last - 1], vertices[last])?;
        let mut edge2 = edge(vertices[last], vertices[0])?;

        // The turn between the last and first edges fixes the winding; every
        // other turn must agree with it
        let positive = turn(edge1, edge2)?;
        for i in 1..vertices.len() {
            if !is_zero(n.get().dot(vertices[i] - vertices[0])) {
                return Err(GeometryError::NonCoplanar);
            }
            edge1 = edge2;
            edge2 = edge(vertices[i - 1], vertices[i])?;
            if turn(edge1, edge2)? != positive {
                return Err(GeometryError::NotConvex);
            }
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Where the ray crosses the polygon interior.
    ///
    /// The crossing must lie strictly on the same side of every edge,
    /// measured against the plane normal. Points on an edge or a vertex
    /// are misses.
    pub(crate) fn crossing(&self, ray: &Ray) -> Option<Point> {
        let (_, p) = self.plane.crossing(ray)?;
        let n = self.plane.normal().get();

        let mut sign = 0.0_f64;
        for (i, a) in self.vertices.iter().enumerate() {
            let b = self.vertices[(i + 1) % self.vertices.len()];
            let s = align_zero((b - *a).cross(p - *a).dot(n));
            if s == 0.0 || s * sign < 0.0 {
                return None;
            }
            sign = s;
        }
        Some(p)
    }
}

impl Intersectable for Polygon {
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.crossing(ray)
            .map(|p| vec![GeoPoint::new(self, p)])
            .unwrap_or_default()
    }
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: Point) -> MathResult<Vector> {
        Ok(self.plane.normal())
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

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(-1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_valid_quad() {
        let poly = square();
        assert_eq!(poly.vertices().len(), 4);

        let n = poly.normal_at(p(0.0, 0.0, 1.0)).unwrap();
        let expected = 1.0 / 3f64.sqrt();
        assert!((n.x() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_too_few_vertices() {
        assert_eq!(
            Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]).unwrap_err(),
            GeometryError::TooFewVertices(2)
        );
    }

    #[test]
    fn test_polygon_wrong_order() {
        let result = Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(-1.0, 1.0, 1.0),
        ]);
        assert_eq!(result.unwrap_err(), GeometryError::NotConvex);
    }

    #[test]
    fn test_polygon_not_in_plane() {
        let result = Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 2.0, 2.0),
        ]);
        assert_eq!(result.unwrap_err(), GeometryError::NonCoplanar);
    }

    #[test]
    fn test_polygon_concave() {
        let result = Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.25, 0.25, 0.5),
        ]);
        assert_eq!(result.unwrap_err(), GeometryError::NotConvex);
    }

    #[test]
    fn test_polygon_collinear_or_repeated_vertices() {
        // Vertex on the edge between its neighbours
        let on_edge = Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.5, 0.5),
        ]);
        assert_eq!(on_edge.unwrap_err(), GeometryError::DegenerateVertices);

        // Last vertex repeats the first
        let repeated = Polygon::new(vec![
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ]);
        assert_eq!(repeated.unwrap_err(), GeometryError::DegenerateVertices);
    }

    #[test]
    fn test_polygon_intersections() {
        let poly = Polygon::new(vec![
            p(0.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
        ])
        .unwrap();
        let down = Vector::new(0.0, 0.0, -1.0).unwrap();

        // Inside
        let ray = Ray::new(p(1.0, 1.0, 1.0), down).unwrap();
        assert_eq!(poly.intersect_points(&ray), vec![p(1.0, 1.0, 0.0)]);

        // Outside
        let ray = Ray::new(p(3.0, 1.0, 1.0), down).unwrap();
        assert!(poly.intersect(&ray).is_empty());

        // On an edge
        let ray = Ray::new(p(1.0, 0.0, 1.0), down).unwrap();
        assert!(poly.intersect(&ray).is_empty());

        // On a vertex
        let ray = Ray::new(p(2.0, 2.0, 1.0), down).unwrap();
        assert!(poly.intersect(&ray).is_empty());

        // On an edge's continuation
        let ray = Ray::new(p(3.0, 0.0, 1.0), down).unwrap();
        assert!(poly.intersect(&ray).is_empty());
    }
}
