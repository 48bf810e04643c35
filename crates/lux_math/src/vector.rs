//! Non-zero direction vectors.
//!
//! `Vector` wraps a `DVec3` and refuses to hold the zero vector, so every
//! normal, light direction and ray direction in the renderer is known to
//! be usable without further checks.

use std::ops::Neg;

use glam::DVec3;
use thiserror::Error;

use crate::util::{align_zero, is_zero};

/// Errors raised when building or transforming vectors.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("Vector(0,0,0) is not a valid vector")]
    ZeroVector,

    #[error("Vector has a non-finite component: ({0}, {1}, {2})")]
    NonFinite(f64, f64, f64),

    #[error("Cannot normalize a vector whose length rounds to zero")]
    ZeroLengthNormalize,
}

pub type MathResult<T> = Result<T, MathError>;

/// A 3D vector that is guaranteed to be non-zero and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(DVec3);

impl Vector {
    pub const X: Vector = Vector(DVec3::X);
    pub const Y: Vector = Vector(DVec3::Y);
    pub const Z: Vector = Vector(DVec3::Z);

    /// Create a vector from components. Fails on the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    /// Wrap a raw `DVec3`, rejecting zero and non-finite values.
    pub fn from_dvec3(v: DVec3) -> MathResult<Self> {
        if !v.is_finite() {
            return Err(MathError::NonFinite(v.x, v.y, v.z));
        }
        if v == DVec3::ZERO {
            return Err(MathError::ZeroVector);
        }
        Ok(Self(v))
    }

    /// The vector pointing from `from` to `to`.
    pub fn between(from: DVec3, to: DVec3) -> MathResult<Self> {
        Self::from_dvec3(to - from)
    }

    /// Get the underlying `DVec3`.
    #[inline]
    pub fn get(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Scale to unit length.
    ///
    /// Fails when the length is below the zero threshold, since the
    /// result would not be a meaningful direction.
    pub fn normalize(self) -> MathResult<Self> {
        let length = align_zero(self.length());
        if length == 0.0 {
            return Err(MathError::ZeroLengthNormalize);
        }
        Self::from_dvec3(self.0 / length)
    }

    /// Dot product, snapped to zero within the epsilon threshold.
    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        align_zero(self.0.dot(other.0))
    }

    /// Cross product. Fails for parallel vectors.
    pub fn cross(&self, other: Vector) -> MathResult<Self> {
        Self::from_dvec3(self.0.cross(other.0))
    }

    /// Multiply by a scalar. Fails when the scalar is zero.
    pub fn scale(&self, s: f64) -> MathResult<Self> {
        Self::from_dvec3(self.0 * s)
    }

    /// Mirror this vector about `normal` (expected unit length).
    ///
    /// `r = v - 2 (v·n) n`
    pub fn reflect(&self, normal: Vector) -> MathResult<Self> {
        let vn = self.dot(normal);
        if is_zero(vn) {
            return Ok(*self);
        }
        Self::from_dvec3(self.0 - normal.0 * (2.0 * vn))
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        v.0
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(v: DVec3) -> MathResult<Self> {
        Self::from_dvec3(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_vector_rejected() {
        assert_eq!(Vector::new(0.0, 0.0, 0.0), Err(MathError::ZeroVector));
        assert!(Vector::from_dvec3(DVec3::new(f64::NAN, 1.0, 0.0)).is_err());
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vector::new(1.0, 2.0, 3.0).unwrap().normalize().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);

        let v = Vector::new(-7.0, 0.0, 0.0).unwrap().normalize().unwrap();
        assert_eq!(v, -Vector::X);
    }

    #[test]
    fn test_normalize_tiny_vector_fails() {
        let v = Vector::new(1e-12, 0.0, 0.0).unwrap();
        assert_eq!(v.normalize(), Err(MathError::ZeroLengthNormalize));
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector::new(1.0, 2.0, 3.0).unwrap();
        let b = Vector::new(-2.0, -4.0, -6.0).unwrap();
        let c = Vector::new(0.0, 3.0, -2.0).unwrap();

        assert_eq!(a.dot(c), 0.0);
        assert_eq!(a.dot(b), -28.0);

        // Parallel vectors have no cross product
        assert_eq!(a.cross(b), Err(MathError::ZeroVector));

        let n = a.cross(c).unwrap();
        assert!((n.length() - a.length() * c.length()).abs() < 1e-10);
        assert_eq!(n.dot(a), 0.0);
        assert_eq!(n.dot(c), 0.0);
    }

    #[test]
    fn test_scale_by_zero_fails() {
        let a = Vector::new(1.0, 2.0, 3.0).unwrap();
        assert!(a.scale(0.0).is_err());
        assert_eq!(a.scale(2.0).unwrap().get(), DVec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_reflect() {
        let v = Vector::new(1.0, -1.0, 0.0).unwrap();
        let r = v.reflect(Vector::Y).unwrap();
        assert_eq!(r.get(), DVec3::new(1.0, 1.0, 0.0));

        // Grazing direction stays unchanged
        assert_eq!(Vector::X.reflect(Vector::Y).unwrap(), Vector::X);
    }

    #[test]
    fn test_between() {
        let v = Vector::between(DVec3::new(1.0, 1.0, 1.0), DVec3::new(2.0, 3.0, 4.0)).unwrap();
        assert_eq!(v.get(), DVec3::new(1.0, 2.0, 3.0));
        assert!(Vector::between(DVec3::ONE, DVec3::ONE).is_err());
    }
}
