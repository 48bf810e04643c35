//! Recursive Whitted-style shading.
//!
//! Implements:
//! - Phong local illumination (emission, diffuse, specular)
//! - Shadows with partial transparency along the shadow ray
//! - Mirror reflection and straight-through transparency
//! - Recursion cut off by depth and by accumulated attenuation

use lux_core::{GeoPoint, Intersectable, LightSource, Material, Scene};
use lux_math::{align_zero, average_colors, factor_below, Color, Factor, Ray, Vector};
use serde::Deserialize;

/// Shading engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Maximum recursion depth, counting the primary hit
    pub max_level: u32,
    /// Attenuation below which a contribution is dropped
    pub min_k: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_level: 10,
            min_k: 0.001,
        }
    }
}

/// Anything that can turn a ray into a color.
pub trait RayTracer: Send + Sync {
    /// Color seen along a single ray.
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// Color returned when a ray cannot be traced at all.
    fn background(&self) -> Color;

    /// Trace every ray and average the colors.
    fn trace_rays(&self, rays: &[Ray]) -> Color {
        let colors: Vec<Color> = rays.iter().map(|ray| self.trace_ray(ray)).collect();
        average_colors(&colors)
    }
}

/// Whitted ray tracer over a borrowed scene.
pub struct WhittedTracer<'a> {
    scene: &'a Scene,
    config: TracerConfig,
}

impl<'a> WhittedTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            config: TracerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Nearest hit along the ray, if any.
    pub fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'a>> {
        let hits = self.scene.geometries.intersect(ray);
        GeoPoint::closest(ray.origin(), hits)
    }

    fn color_at(&self, gp: GeoPoint<'a>, ray: &Ray) -> Color {
        self.scene.ambient_light.intensity()
            + self.recursive_color(gp, ray, self.config.max_level, Factor::ONE)
    }

    fn recursive_color(&self, gp: GeoPoint<'a>, ray: &Ray, level: u32, k: Factor) -> Color {
        let Ok(n) = gp.geometry.normal_at(gp.point) else {
            log::trace!("No normal at {:?}, using emission only", gp.point);
            return gp.geometry.emission();
        };
        let v = ray.direction();

        let color = self.local_effects(&gp, v, n, k);
        if level <= 1 {
            return color;
        }
        color + self.global_effects(&gp, v, n, level, k)
    }

    fn local_effects(&self, gp: &GeoPoint<'a>, v: Vector, n: Vector, k: Factor) -> Color {
        let mut color = gp.geometry.emission();
        let nv = n.dot(v);
        if nv == 0.0 {
            return color;
        }

        let material = gp.geometry.material();
        for light in &self.scene.lights {
            let Ok(l) = light.incident_direction(gp.point) else {
                continue;
            };
            let nl = n.dot(l);
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, &**light, l, n);
            if factor_below(ktr * k, self.config.min_k) {
                continue;
            }

            let il = light.intensity_at(gp.point) * ktr;
            color += il * (diffuse(material, nl) + specular(material, n, l, nl, v));
        }
        color
    }

    fn global_effects(&self, gp: &GeoPoint<'a>, v: Vector, n: Vector, level: u32, k: Factor) -> Color {
        let material = gp.geometry.material();
        let mut color = Color::ZERO;

        if let Ok(reflected) = v.reflect(n).and_then(|r| Ray::with_bias(gp.point, r, n)) {
            color += self.global_effect(&reflected, level, k, material.kr);
        }
        if let Ok(refracted) = Ray::with_bias(gp.point, v, n) {
            color += self.global_effect(&refracted, level, k, material.kt);
        }
        color
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: Factor, kx: Factor) -> Color {
        let kkx = k * kx;
        if factor_below(kkx, self.config.min_k) {
            return Color::ZERO;
        }

        match self.find_closest_intersection(ray) {
            Some(gp) => self.recursive_color(gp, ray, level - 1, kkx) * kx,
            None => self.scene.background * kx,
        }
    }

    /// Fraction of the light that reaches the point through the geometry
    /// between them. Opaque blockers drive it to zero.
    fn transparency(&self, gp: &GeoPoint<'a>, light: &dyn LightSource, l: Vector, n: Vector) -> Factor {
        let Ok(shadow_ray) = Ray::with_bias(gp.point, -l, n) else {
            return Factor::ONE;
        };
        let distance = light.distance_to(gp.point);

        let mut ktr = Factor::ONE;
        for blocker in self.scene.geometries.intersect_within(&shadow_ray, distance) {
            ktr *= blocker.geometry.material().kt;
            if factor_below(ktr, self.config.min_k) {
                return Factor::ZERO;
            }
        }
        ktr
    }
}

impl RayTracer for WhittedTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.find_closest_intersection(ray) {
            Some(gp) => self.color_at(gp, ray),
            None => self.scene.background,
        }
    }

    fn background(&self) -> Color {
        self.scene.background
    }
}

#[inline]
fn diffuse(material: &Material, nl: f64) -> Color {
    material.kd * nl.abs()
}

#[inline]
fn specular(material: &Material, n: Vector, l: Vector, nl: f64, v: Vector) -> Color {
    let r = l.get() - n.get() * (2.0 * nl);
    let minus_vr = -align_zero(v.get().dot(r));
    if minus_vr <= 0.0 {
        return Color::ZERO;
    }
    material.ks * minus_vr.powi(material.shininess as i32)
}
