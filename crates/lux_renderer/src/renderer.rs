//! Image rendering loop.
//!
//! Drives the camera and tracer over every pixel of a sink, either on the
//! calling thread or on a fixed pool of workers that pull pixels from a
//! shared [`PixelManager`].

use std::time::Instant;

use lux_math::Color;
use rand::Rng;
use thiserror::Error;

use crate::{Camera, CameraError, ImageSink, Pixel, PixelManager, RayTracer, SamplingStrategy};

/// Errors raised while setting up or finishing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Percent step between progress log lines.
const PROGRESS_STEP: u64 = 10;

/// Render a single pixel with the camera's sampling strategy.
///
/// Numeric failures while building rays never abort the render. The
/// pixel falls back to the tracer's background color.
pub fn render_pixel<R: Rng + ?Sized>(
    camera: &Camera,
    tracer: &dyn RayTracer,
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    rng: &mut R,
) -> Color {
    SamplingStrategy::for_camera(camera)
        .sample_pixel(camera, tracer, nx, ny, col, row, rng)
        .unwrap_or_else(|err| {
            log::trace!("Pixel ({col}, {row}) falls back to background: {err}");
            tracer.background()
        })
}

/// Render every pixel of `sink`, then flush it.
///
/// With `camera.threads() == 0` pixels are traced on the calling thread in
/// row-major order. Otherwise a pool of exactly that many workers claims
/// pixels one at a time until none remain.
pub fn render(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) -> RenderResult<()> {
    let (nx, ny) = (sink.width(), sink.height());
    let manager = PixelManager::new(ny, nx).with_progress_step(PROGRESS_STEP);

    log::info!(
        "Rendering {}x{} ({}) on {} thread(s)",
        nx,
        ny,
        SamplingStrategy::for_camera(camera),
        camera.threads().max(1)
    );
    let start = Instant::now();

    if camera.threads() == 0 {
        let mut rng = rand::thread_rng();
        while let Some(Pixel { row, col }) = manager.next_pixel() {
            let color = render_pixel(camera, tracer, nx, ny, col, row, &mut rng);
            sink.write_pixel(col, row, color);
            manager.pixel_done();
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(camera.threads())
            .thread_name(|i| format!("lux-render-{i}"))
            .build()?;

        // Each worker keeps the pixels it finished; nothing is shared but the counter
        let batches: Vec<Vec<(Pixel, Color)>> = pool.broadcast(|_| {
            let mut rng = rand::thread_rng();
            let mut finished = Vec::new();
            while let Some(pixel) = manager.next_pixel() {
                let color = render_pixel(camera, tracer, nx, ny, pixel.col, pixel.row, &mut rng);
                finished.push((pixel, color));
                manager.pixel_done();
            }
            finished
        });

        for (pixel, color) in batches.into_iter().flatten() {
            sink.write_pixel(pixel.col, pixel.row, color);
        }
    }

    log::info!("Rendered {} pixels in {:?}", manager.completed(), start.elapsed());
    sink.flush()
}

/// Paint grid lines every `interval` pixels.
///
/// A pixel is on the grid when its row or column is a multiple of
/// `interval`. An interval of 0 paints nothing.
pub fn print_grid(sink: &mut dyn ImageSink, interval: u32, color: Color) {
    if interval == 0 {
        return;
    }
    for row in 0..sink.height() {
        for col in 0..sink.width() {
            if row % interval == 0 || col % interval == 0 {
                sink.write_pixel(col, row, color);
            }
        }
    }
}
