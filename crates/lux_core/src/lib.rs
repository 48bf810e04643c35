//! Lux Core - Scene graph for Whitted-style ray tracing.
//!
//! This crate provides:
//!
//! - **Geometry**: planes, spheres, tubes, cylinders, triangles, convex
//!   polygons and the flat `Geometries` aggregate, all answering ray
//!   intersection and surface normal queries
//! - **Lighting**: ambient, directional, point and spot lights
//! - **Scene**: the read-only snapshot handed to the renderer
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{Geometry, Material, PointLight, Scene, Sphere};
//! use lux_math::{Color, Factor, Point};
//!
//! let sphere = Sphere::new(Point::new(0.0, 0.0, -3.0), 1.0)?
//!     .with_material(Material::default().with_kd(Factor::splat(0.5)));
//! let scene = Scene::new("demo")
//!     .add_geometry(sphere)
//!     .add_light(PointLight::new(Color::ONE, Point::new(0.0, 5.0, 0.0)));
//! ```

pub mod geometry;
pub mod lighting;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use geometry::{
    Cylinder, GeoPoint, Geometries, Geometry, GeometryError, GeometryResult, Intersectable,
    Plane, Polygon, Sphere, Triangle, Tube,
};
pub use lighting::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Material, Surface};
pub use scene::Scene;
