use crate::util::is_zero;
use crate::{MathResult, Point, Vector};

/// Distance a secondary ray's origin is pushed off the surface it leaves.
///
/// Without it, shadow and reflection rays re-hit their own surface
/// ("shadow acne").
pub const RAY_BIAS: f64 = 1e-4;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are used for raytracing - they represent a half-line starting at
/// `origin` and traveling in `direction`. The direction is normalized on
/// construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: direction.normalize()?,
        })
    }

    /// Create a ray leaving a surface, nudged along the surface normal.
    ///
    /// The origin moves by [`RAY_BIAS`] along `normal`, on the same side of
    /// the surface the direction heads into. A direction tangent to the
    /// surface leaves the origin untouched.
    pub fn with_bias(head: Point, direction: Vector, normal: Vector) -> MathResult<Self> {
        let nv = normal.dot(direction);
        let origin = if is_zero(nv) {
            head
        } else {
            let offset = if nv > 0.0 { RAY_BIAS } else { -RAY_BIAS };
            head + normal.get() * offset
        };
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> Point {
        if is_zero(t) {
            self.origin
        } else {
            self.origin + self.direction.get() * t
        }
    }

    /// Find the point nearest to the ray origin.
    pub fn closest_point(&self, points: &[Point]) -> Option<Point> {
        points
            .iter()
            .copied()
            .min_by(|a, b| {
                a.distance_squared(self.origin)
                    .total_cmp(&b.distance_squared(self.origin))
            })
    }
}
