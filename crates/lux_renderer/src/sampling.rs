//! Per-pixel sampling strategies.

use std::fmt;

use lux_math::{average_colors, colors_similar, Color, MathResult};
use rand::Rng;

use crate::{Camera, RayTracer};

/// Largest per-channel difference for corner colors to count as equal.
///
/// A tenth of one 8-bit color step.
pub const COLOR_SIMILARITY_THRESHOLD: f64 = 0.1 / 255.0;

/// How many rays a pixel gets and where they go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// One ray through the pixel center
    Single,
    /// The center ray plus randomly jittered rays
    Jittered { samples: u32 },
    /// Corner rays, subdividing where they disagree
    Adaptive { max_samples: u32 },
}

impl SamplingStrategy {
    /// Pick the strategy a camera is configured for.
    ///
    /// A sample count of 1 always means a single ray, adaptive or not.
    pub fn for_camera(camera: &Camera) -> Self {
        match (camera.samples(), camera.adaptive()) {
            (0 | 1, _) => Self::Single,
            (samples, false) => Self::Jittered { samples },
            (max_samples, true) => Self::Adaptive { max_samples },
        }
    }

    /// Color of pixel (`col`, `row`) in an `nx` by `ny` grid.
    pub fn sample_pixel<R: Rng + ?Sized>(
        &self,
        camera: &Camera,
        tracer: &dyn RayTracer,
        nx: u32,
        ny: u32,
        col: u32,
        row: u32,
        rng: &mut R,
    ) -> MathResult<Color> {
        match *self {
            Self::Single => {
                let ray = camera.construct_ray(nx, ny, col, row)?;
                Ok(tracer.trace_ray(&ray))
            }
            Self::Jittered { samples } => {
                let rays = camera.construct_rays(nx, ny, col, row, samples, rng)?;
                Ok(tracer.trace_rays(&rays))
            }
            Self::Adaptive { max_samples } => {
                adaptive_supersample(camera, tracer, nx, ny, col, row, max_samples)
            }
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single ray"),
            Self::Jittered { samples } => write!(f, "{samples} jittered rays"),
            Self::Adaptive { max_samples } => write!(f, "adaptive, up to {max_samples} rays"),
        }
    }
}

/// Adaptive super-sampling of one pixel.
///
/// Traces the four corner rays. If their colors agree, or the budget is
/// down to 4, returns their average. Otherwise splits the pixel into four
/// quadrants with a quarter of the budget each and averages those.
pub fn adaptive_supersample(
    camera: &Camera,
    tracer: &dyn RayTracer,
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    max_samples: u32,
) -> MathResult<Color> {
    adaptive_region(
        camera,
        tracer,
        nx as f64,
        ny as f64,
        col as f64,
        row as f64,
        max_samples,
    )
}

fn adaptive_region(
    camera: &Camera,
    tracer: &dyn RayTracer,
    nx: f64,
    ny: f64,
    col: f64,
    row: f64,
    max_samples: u32,
) -> MathResult<Color> {
    let corners = camera.corner_rays_f(nx, ny, col, row)?;
    let colors = corners.map(|ray| tracer.trace_ray(&ray));
    if max_samples <= 4 || colors_similar(&colors, COLOR_SIMILARITY_THRESHOLD) {
        return Ok(average_colors(&colors));
    }

    // Each quadrant is a pixel of a grid twice as fine
    let budget = max_samples / 4;
    let mut quadrants = [Color::ZERO; 4];
    for (quadrant, (dc, dr)) in quadrants
        .iter_mut()
        .zip([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)])
    {
        *quadrant = adaptive_region(
            camera,
            tracer,
            nx * 2.0,
            ny * 2.0,
            col * 2.0 + dc,
            row * 2.0 + dr,
            budget,
        )?;
    }
    Ok(average_colors(&quadrants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::{Point, Ray, Vector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// `left` left of the x = 0 plane, black elsewhere. Counts traced rays.
    struct SplitTracer {
        left: Color,
        traced: AtomicUsize,
    }

    impl SplitTracer {
        fn new() -> Self {
            Self::with_left(Color::ONE)
        }

        fn with_left(left: Color) -> Self {
            Self {
                left,
                traced: AtomicUsize::new(0),
            }
        }

        fn traced(&self) -> usize {
            self.traced.load(Ordering::Relaxed)
        }
    }

    impl RayTracer for SplitTracer {
        fn trace_ray(&self, ray: &Ray) -> Color {
            self.traced.fetch_add(1, Ordering::Relaxed);
            if ray.direction().x() < 0.0 {
                self.left
            } else {
                Color::ZERO
            }
        }

        fn background(&self) -> Color {
            Color::ZERO
        }
    }

    /// Same color everywhere.
    struct FlatTracer(Color);

    impl RayTracer for FlatTracer {
        fn trace_ray(&self, _ray: &Ray) -> Color {
            self.0
        }

        fn background(&self) -> Color {
            Color::ZERO
        }
    }

    fn camera(samples: u32, adaptive: bool) -> Camera {
        Camera::builder()
            .with_location(Point::ZERO)
            .with_direction(-Vector::Z, Vector::Y)
            .with_vp_size(3.0, 3.0)
            .with_vp_distance(1.0)
            .with_samples(samples)
            .with_adaptive(adaptive)
            .build()
            .unwrap()
    }

    #[test]
    fn test_strategy_for_camera() {
        assert_eq!(SamplingStrategy::for_camera(&camera(1, false)), SamplingStrategy::Single);
        assert_eq!(SamplingStrategy::for_camera(&camera(1, true)), SamplingStrategy::Single);
        assert_eq!(
            SamplingStrategy::for_camera(&camera(9, false)),
            SamplingStrategy::Jittered { samples: 9 }
        );
        assert_eq!(
            SamplingStrategy::for_camera(&camera(64, true)),
            SamplingStrategy::Adaptive { max_samples: 64 }
        );
    }

    #[test]
    fn test_single_sample_matches_center_ray() {
        let camera = camera(1, true);
        let tracer = SplitTracer::new();
        let mut rng = StdRng::seed_from_u64(7);

        // Pixel (0, 1) is left of center
        let color = SamplingStrategy::Single
            .sample_pixel(&camera, &tracer, 3, 3, 0, 1, &mut rng)
            .unwrap();
        assert_eq!(color, Color::ONE);
        assert_eq!(tracer.traced(), 1);
    }

    #[test]
    fn test_jittered_traces_every_sample() {
        let camera = camera(8, false);
        let tracer = FlatTracer(Color::new(0.2, 0.4, 0.6));
        let mut rng = StdRng::seed_from_u64(7);

        let color = SamplingStrategy::Jittered { samples: 8 }
            .sample_pixel(&camera, &tracer, 3, 3, 2, 2, &mut rng)
            .unwrap();
        assert!((color - Color::new(0.2, 0.4, 0.6)).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_adaptive_uniform_region_stops_at_corners() {
        let camera = camera(64, true);
        let tracer = SplitTracer::new();

        // Pixel (2, 1) is entirely right of x = 0
        let color = adaptive_supersample(&camera, &tracer, 3, 3, 2, 1, 64).unwrap();
        assert_eq!(color, Color::ZERO);
        assert_eq!(tracer.traced(), 4);
    }

    #[test]
    fn test_adaptive_budget_of_four_stops() {
        let camera = camera(4, true);
        let tracer = SplitTracer::new();

        // Center pixel straddles x = 0: two white corners, two black
        let color = adaptive_supersample(&camera, &tracer, 3, 3, 1, 1, 4).unwrap();
        assert_eq!(color, Color::splat(0.5));
        assert_eq!(tracer.traced(), 4);
    }

    #[test]
    fn test_adaptive_subdivides_edges() {
        let camera = camera(16, true);
        let tracer = SplitTracer::new();

        // Left quadrants still straddle the edge (their right corners sit
        // on x = 0), right quadrants are uniformly black
        let color = adaptive_supersample(&camera, &tracer, 3, 3, 1, 1, 16).unwrap();
        assert_eq!(color, Color::splat(0.25));
        assert_eq!(tracer.traced(), 4 + 4 * 4);
    }

    #[test]
    fn test_adaptive_threshold_sees_faint_edges() {
        let camera = camera(16, true);
        // Less than one 8-bit step apart, still more than the threshold
        let tracer = SplitTracer::with_left(Color::splat(0.001));

        let color = adaptive_supersample(&camera, &tracer, 3, 3, 1, 1, 16).unwrap();
        assert_eq!(tracer.traced(), 4 + 4 * 4);
        assert!((color - Color::splat(0.00025)).abs().max_element() < 1e-15);
    }

    #[test]
    fn test_adaptive_threshold_ignores_sub_threshold_noise() {
        let camera = camera(16, true);
        let tracer = SplitTracer::with_left(Color::splat(0.0001));

        adaptive_supersample(&camera, &tracer, 3, 3, 1, 1, 16).unwrap();
        assert_eq!(tracer.traced(), 4);
    }
}
