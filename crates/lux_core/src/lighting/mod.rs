//! Light sources.
//!
//! Directional, point and spot lights implement [`LightSource`]; the
//! ambient term is a plain constant carried by the scene.

mod ambient;
mod directional;
mod point;
mod spot;

pub use ambient::AmbientLight;
pub use directional::DirectionalLight;
pub use point::PointLight;
pub use spot::SpotLight;

use lux_math::{Color, MathResult, Point, Vector};

/// A light that illuminates surface points.
pub trait LightSource: Send + Sync {
    /// Light intensity arriving at `point`, after falloff.
    fn intensity_at(&self, point: Point) -> Color;

    /// Unit direction of the light travelling from the source to `point`.
    ///
    /// This is the `L` of the Phong model. Fails only when the point
    /// coincides with a positional light.
    fn incident_direction(&self, point: Point) -> MathResult<Vector>;

    /// Distance from `point` to the source. Infinite for directional lights.
    fn distance_to(&self, point: Point) -> f64;
}
