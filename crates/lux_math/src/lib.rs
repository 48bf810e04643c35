// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod color;
mod ray;
mod util;
mod vector;

pub use color::{average_colors, colors_similar, factor_below, rgb8, Color, Factor};
pub use ray::{Ray, RAY_BIAS};
pub use util::{align_zero, is_zero, EPSILON};
pub use vector::{MathError, MathResult, Vector};

/// A location in 3D space. Unlike [`Vector`], a point may be the origin.
pub type Point = DVec3;
