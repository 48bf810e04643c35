//! Pinhole camera for ray generation.
//!
//! The camera sits at `location` and looks along `forward`, with a view
//! plane `distance` away. Row indices grow downward while `up` points up,
//! so rows map to negative offsets along `up`.

use lux_math::{MathError, MathResult, Point, Ray, Vector};
use rand::Rng;
use thiserror::Error;

/// Errors raised while building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Missing camera setting: {0}")]
    Missing(&'static str),

    #[error("Camera forward and up vectors must be orthogonal")]
    NotOrthogonal,

    #[error("Camera {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Sample count must be at least 1")]
    InvalidSampleCount,

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type CameraResult<T> = Result<T, CameraError>;

/// Camera for generating rays into the scene.
///
/// Immutable once built. Use [`Camera::builder`] to create one.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    forward: Vector,
    up: Vector,
    right: Vector,

    // View plane
    width: f64,
    height: f64,
    distance: f64,

    // Sampling and scheduling
    samples: u32,
    threads: usize,
    adaptive: bool,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn forward(&self) -> Vector {
        self.forward
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Rays per pixel. 1 disables super-sampling.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Worker threads. 0 renders on the calling thread.
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn adaptive(&self) -> bool {
        self.adaptive
    }

    /// Center of pixel (`col`, `row`) on the view plane of an `nx` by `ny` grid.
    pub fn pixel_center(&self, nx: u32, ny: u32, col: u32, row: u32) -> Point {
        self.view_plane_point(nx as f64, ny as f64, col as f64, row as f64)
    }

    /// Primary ray through the center of pixel (`col`, `row`).
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> MathResult<Ray> {
        self.ray_to(self.pixel_center(nx, ny, col, row))
    }

    /// The central ray plus `count - 1` rays jittered within the pixel.
    pub fn construct_rays<R: Rng + ?Sized>(
        &self,
        nx: u32,
        ny: u32,
        col: u32,
        row: u32,
        count: u32,
        rng: &mut R,
    ) -> MathResult<Vec<Ray>> {
        let center = self.pixel_center(nx, ny, col, row);
        let (rx, ry) = self.pixel_size(nx as f64, ny as f64);

        let mut rays = Vec::with_capacity(count.max(1) as usize);
        rays.push(self.ray_to(center)?);
        for _ in 1..count {
            let dx = rng.gen_range(-0.5..0.5) * rx;
            let dy = rng.gen_range(-0.5..0.5) * ry;
            rays.push(self.ray_to(self.offset(center, dx, dy))?);
        }
        Ok(rays)
    }

    /// Rays through the four corners of pixel (`col`, `row`).
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right.
    pub fn corner_rays(&self, nx: u32, ny: u32, col: u32, row: u32) -> MathResult<[Ray; 4]> {
        self.corner_rays_f(nx as f64, ny as f64, col as f64, row as f64)
    }

    /// Same as [`corner_rays`](Self::corner_rays) on a grid that may be
    /// finer than `u32` can index.
    pub(crate) fn corner_rays_f(&self, nx: f64, ny: f64, col: f64, row: f64) -> MathResult<[Ray; 4]> {
        let center = self.view_plane_point(nx, ny, col, row);
        let (rx, ry) = self.pixel_size(nx, ny);
        let (hx, hy) = (rx / 2.0, ry / 2.0);

        Ok([
            self.ray_to(self.offset(center, -hx, hy))?,
            self.ray_to(self.offset(center, hx, hy))?,
            self.ray_to(self.offset(center, -hx, -hy))?,
            self.ray_to(self.offset(center, hx, -hy))?,
        ])
    }

    fn pixel_size(&self, nx: f64, ny: f64) -> (f64, f64) {
        (self.width / nx, self.height / ny)
    }

    fn view_plane_point(&self, nx: f64, ny: f64, col: f64, row: f64) -> Point {
        let pc = self.location + self.forward.get() * self.distance;
        let (rx, ry) = self.pixel_size(nx, ny);
        let xj = (col - (nx - 1.0) / 2.0) * rx;
        let yi = -(row - (ny - 1.0) / 2.0) * ry;
        self.offset(pc, xj, yi)
    }

    fn offset(&self, point: Point, dx: f64, dy: f64) -> Point {
        let mut p = point;
        if dx != 0.0 {
            p += self.right.get() * dx;
        }
        if dy != 0.0 {
            p += self.up.get() * dy;
        }
        p
    }

    fn ray_to(&self, target: Point) -> MathResult<Ray> {
        Ray::new(self.location, Vector::between(self.location, target)?)
    }
}

/// Validating builder for [`Camera`].
///
/// Setters only record values. [`build`](Self::build) checks them and
/// reports the first missing or invalid one.
#[derive(Debug, Clone, Default)]
pub struct CameraBuilder {
    location: Option<Point>,
    direction: Option<(Vector, Vector)>,
    view_plane: Option<(f64, f64)>,
    distance: Option<f64>,
    samples: Option<u32>,
    threads: usize,
    adaptive: bool,
}

impl CameraBuilder {
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the viewing direction. `forward` and `up` must be orthogonal.
    pub fn with_direction(mut self, forward: Vector, up: Vector) -> Self {
        self.direction = Some((forward, up));
        self
    }

    /// Set the view plane width and height.
    pub fn with_vp_size(mut self, width: f64, height: f64) -> Self {
        self.view_plane = Some((width, height));
        self
    }

    /// Set the distance from the camera to the view plane.
    pub fn with_vp_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Validate the settings and build the camera.
    pub fn build(self) -> CameraResult<Camera> {
        let location = self.location.ok_or(CameraError::Missing("location"))?;

        let (forward, up) = self.direction.ok_or(CameraError::Missing("direction"))?;
        let forward = forward.normalize()?;
        let up = up.normalize()?;
        if forward.dot(up) != 0.0 {
            return Err(CameraError::NotOrthogonal);
        }
        let right = forward.cross(up)?.normalize()?;

        let (width, height) = self
            .view_plane
            .ok_or(CameraError::Missing("view plane size"))?;
        positive("width", width)?;
        positive("height", height)?;

        let distance = self.distance.ok_or(CameraError::Missing("distance"))?;
        positive("distance", distance)?;

        let samples = self.samples.unwrap_or(1);
        if samples == 0 {
            return Err(CameraError::InvalidSampleCount);
        }

        Ok(Camera {
            location,
            forward,
            up,
            right,
            width,
            height,
            distance,
            samples,
            threads: self.threads,
            adaptive: self.adaptive,
        })
    }
}

fn positive(field: &'static str, value: f64) -> CameraResult<()> {
    // Written so that NaN is rejected too
    if !(value > 0.0) {
        return Err(CameraError::NonPositive { field, value });
    }
    Ok(())
}
