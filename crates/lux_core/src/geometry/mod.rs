//! Intersectable geometry.
//!
//! Every shape answers two questions: where does a ray hit it, and what is
//! the surface normal at a point on it. The `Geometries` aggregate answers
//! the first question for many shapes at once through the same trait.

mod cylinder;
mod geometries;
mod plane;
mod polygon;
mod sphere;
mod triangle;
mod tube;

pub use cylinder::Cylinder;
pub use geometries::Geometries;
pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

use std::fmt;

use lux_math::{align_zero, Color, MathError, MathResult, Point, Ray, Vector};
use thiserror::Error;

use crate::material::{Material, Surface};

/// Errors raised while constructing a shape.
///
/// Malformed shapes are rejected here so that intersection never has to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Vertices are coincident or collinear")]
    DegenerateVertices,

    #[error("All vertices of a polygon must lie in the same plane")]
    NonCoplanar,

    #[error("Vertices must be ordered and the polygon must be convex")]
    NotConvex,

    #[error("Radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// A point where a ray struck a geometry.
///
/// The geometry is borrowed, never cloned. Two `GeoPoint`s are equal when
/// they refer to the same geometry instance and the same point.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Pick the hit nearest to `origin`.
    pub fn closest(origin: Point, hits: Vec<GeoPoint<'a>>) -> Option<GeoPoint<'a>> {
        hits.into_iter().min_by(|a, b| {
            a.point
                .distance_squared(origin)
                .total_cmp(&b.point.distance_squared(origin))
        })
    }
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        let a = self.geometry as *const dyn Geometry as *const ();
        let b = other.geometry as *const dyn Geometry as *const ();
        std::ptr::eq(a, b) && self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const dyn Geometry as *const ()))
            .field("point", &self.point)
            .finish()
    }
}

/// Trait for anything a ray can be tested against.
pub trait Intersectable: Send + Sync {
    /// All points where the ray hits, in front of its origin.
    ///
    /// Returns an empty list on a miss.
    fn intersect<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>>;

    /// Hits strictly closer to the ray origin than `max_distance`.
    fn intersect_within<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'a>> {
        let origin = ray.origin();
        let mut hits = self.intersect(ray);
        hits.retain(|gp| align_zero(gp.point.distance(origin) - max_distance) < 0.0);
        hits
    }

    /// Hit points without the geometry references.
    fn intersect_points(&self, ray: &Ray) -> Vec<Point> {
        self.intersect(ray).into_iter().map(|gp| gp.point).collect()
    }
}

/// A single shape with a surface.
pub trait Geometry: Intersectable {
    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Point) -> MathResult<Vector>;

    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }

    /// Set the emission color.
    fn with_emission(mut self, emission: Color) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().emission = emission;
        self
    }

    /// Set the material.
    fn with_material(mut self, material: Material) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().material = material;
        self
    }
}

/// Sort parametric distances and keep those in front of the ray origin.
pub(crate) fn forward_hits(mut ts: Vec<f64>) -> Vec<f64> {
    ts.retain(|t| *t > 0.0);
    ts.sort_by(f64::total_cmp);
    ts.dedup_by(|a, b| lux_math::is_zero(*a - *b));
    ts
}
