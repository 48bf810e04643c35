//! Scene snapshot for rendering.
//!
//! A scene is assembled once, then shared read-only by every render
//! worker. Nothing in it is mutated while pixels are being traced.

use lux_math::Color;

use crate::geometry::{Geometries, Intersectable};
use crate::lighting::{AmbientLight, LightSource};

/// A named scene: geometry, lights, ambient term and background.
pub struct Scene {
    pub name: String,
    pub geometries: Geometries,
    pub ambient_light: AmbientLight,
    /// Color returned for rays that hit nothing
    pub background: Color,
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometries: Geometries::new(),
            ambient_light: AmbientLight::NONE,
            background: Color::ZERO,
            lights: Vec::new(),
        }
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_lights(mut self, lights: Vec<Box<dyn LightSource>>) -> Self {
        self.lights = lights;
        self
    }

    /// Add a single light.
    pub fn add_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    /// Add a geometry to the scene's aggregate.
    pub fn add_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    /// Log a one-line summary of the scene contents.
    pub fn log_summary(&self) {
        log::info!(
            "Scene '{}': {} top-level objects, {} lights",
            self.name,
            self.geometries.len(),
            self.lights.len()
        );
    }
}
