//! Render settings loaded from JSON.
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "output": "spheres",
//!   "camera": {
//!     "location": [0, 0, 100],
//!     "forward": [0, 0, -1],
//!     "up": [0, 1, 0],
//!     "view_plane": [150, 150],
//!     "distance": 100,
//!     "samples": 16,
//!     "threads": 4,
//!     "adaptive": true
//!   },
//!   "tracer": { "max_level": 10, "min_k": 0.001 }
//! }
//! ```

use std::path::Path;

use lux_math::{Point, Vector};
use serde::Deserialize;

use crate::{Camera, CameraBuilder, CameraResult, RenderResult, TracerConfig};

/// Camera fields as they appear in a settings file. All optional; the
/// builder reports whichever required one is missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub location: Option<[f64; 3]>,
    pub forward: Option<[f64; 3]>,
    pub up: Option<[f64; 3]>,
    pub view_plane: Option<[f64; 2]>,
    pub distance: Option<f64>,
    pub samples: Option<u32>,
    pub threads: Option<usize>,
    pub adaptive: Option<bool>,
}

impl CameraSettings {
    /// Feed the present fields into a [`CameraBuilder`].
    ///
    /// Fails only if `forward` or `up` is the zero vector.
    pub fn into_builder(self) -> CameraResult<CameraBuilder> {
        let mut builder = Camera::builder();

        if let Some([x, y, z]) = self.location {
            builder = builder.with_location(Point::new(x, y, z));
        }
        if let (Some(forward), Some(up)) = (self.forward, self.up) {
            builder = builder.with_direction(vector(forward)?, vector(up)?);
        }
        if let Some([width, height]) = self.view_plane {
            builder = builder.with_vp_size(width, height);
        }
        if let Some(distance) = self.distance {
            builder = builder.with_vp_distance(distance);
        }
        if let Some(samples) = self.samples {
            builder = builder.with_samples(samples);
        }
        if let Some(threads) = self.threads {
            builder = builder.with_threads(threads);
        }
        if let Some(adaptive) = self.adaptive {
            builder = builder.with_adaptive(adaptive);
        }
        Ok(builder)
    }

    pub fn build(self) -> CameraResult<Camera> {
        self.into_builder()?.build()
    }
}

fn vector([x, y, z]: [f64; 3]) -> CameraResult<Vector> {
    Ok(Vector::new(x, y, z)?)
}

/// Everything needed to render one image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Image name, without extension
    #[serde(default = "default_output")]
    pub output: String,
    pub camera: CameraSettings,
    #[serde(default)]
    pub tracer: TracerConfig,
}

fn default_output() -> String {
    "render".to_string()
}

impl RenderSettings {
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RenderResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
