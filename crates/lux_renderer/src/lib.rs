//! Lux Renderer - Whitted-style CPU ray tracing
//!
//! Turns a `lux_core::Scene` into pixels:
//! - Recursive shading with Phong local terms, shadows, reflection and
//!   transparency, cut off by depth and attenuation
//! - A pinhole camera with a validating builder
//! - Single-ray, jittered and adaptive super-sampling
//! - Per-pixel work distribution over a fixed worker pool

mod camera;
mod image_sink;
mod pixel_manager;
mod renderer;
mod sampling;
mod settings;
mod tracer;

pub use camera::{Camera, CameraBuilder, CameraError, CameraResult};
pub use image_sink::{color_to_rgba, ImageBuffer, ImageSink, ImageWriter};
pub use pixel_manager::{Pixel, PixelManager};
pub use renderer::{print_grid, render, render_pixel, RenderError, RenderResult};
pub use sampling::{adaptive_supersample, SamplingStrategy, COLOR_SIMILARITY_THRESHOLD};
pub use settings::{CameraSettings, RenderSettings};
pub use tracer::{RayTracer, TracerConfig, WhittedTracer};

/// Re-export the math and scene types the renderer API is built on
pub use lux_core::Scene;
pub use lux_math::{Color, Point, Ray, Vector};
