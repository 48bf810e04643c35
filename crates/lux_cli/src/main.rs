//! Lux command-line renderer.
//!
//! Usage: `lux [settings.json]`
//!
//! Renders the built-in demo scene. Camera, resolution and tracer limits
//! come from the optional JSON settings file (see `demos/`), otherwise
//! from the defaults below.

use anyhow::{Context, Result};
use lux_core::{
    AmbientLight, Cylinder, Geometry, Material, Plane, PointLight, Polygon, Scene, Sphere,
    SpotLight, Triangle, Tube,
};
use lux_math::{rgb8, Color, Factor, Point, Ray, Vector};
use lux_renderer::{
    print_grid, render, CameraSettings, ImageSink, ImageWriter, RenderSettings, TracerConfig,
    WhittedTracer,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => RenderSettings::from_path(&path)
            .with_context(|| format!("Failed to load render settings from {path}"))?,
        None => default_settings(),
    };

    let camera = settings
        .camera
        .clone()
        .build()
        .context("Invalid camera settings")?;

    let start = std::time::Instant::now();
    let scene = build_scene().context("Failed to build demo scene")?;
    log::info!("Scene built in {:?}", start.elapsed());
    scene.log_summary();

    let tracer = WhittedTracer::new(&scene).with_config(settings.tracer);
    let mut image = ImageWriter::new(&settings.output, settings.width, settings.height);
    render(&camera, &tracer, &mut image)?;

    // Reference grid alongside the render
    let mut grid = ImageWriter::new(
        format!("{}_grid", settings.output),
        settings.width,
        settings.height,
    );
    print_grid(&mut grid, 50, rgb8(255, 255, 0));
    grid.flush()?;

    Ok(())
}

fn default_settings() -> RenderSettings {
    RenderSettings {
        width: 600,
        height: 600,
        output: "demo".to_string(),
        camera: CameraSettings {
            location: Some([0.0, 0.0, 1000.0]),
            forward: Some([0.0, 0.0, -1.0]),
            up: Some([0.0, 1.0, 0.0]),
            view_plane: Some([200.0, 200.0]),
            distance: Some(1000.0),
            samples: Some(16),
            threads: Some(4),
            adaptive: Some(true),
        },
        tracer: TracerConfig::default(),
    }
}

/// A floor mirror, a glass sphere around a solid one, a pair of triangles,
/// a pillar and a handful of lights.
fn build_scene() -> Result<Scene> {
    let shiny = Material::default()
        .with_kd(Factor::splat(0.5))
        .with_ks(Factor::splat(0.5))
        .with_shininess(60);
    let glass = shiny.with_kt(Factor::splat(0.6));
    let mirror = Material::default()
        .with_kd(Factor::splat(0.2))
        .with_ks(Factor::splat(0.2))
        .with_kr(Factor::splat(0.8))
        .with_shininess(30);

    let floor = Plane::new(Point::new(0.0, -80.0, 0.0), Vector::Y)?
        .with_emission(rgb8(20, 20, 20))
        .with_material(mirror);

    let outer = Sphere::new(Point::new(-30.0, -30.0, -100.0), 50.0)?
        .with_emission(Color::new(0.0, 0.0, 0.4))
        .with_material(glass);
    let inner = Sphere::new(Point::new(-30.0, -30.0, -100.0), 25.0)?
        .with_emission(Color::new(0.4, 0.1, 0.1))
        .with_material(shiny);

    let left = Triangle::new(
        Point::new(-150.0, -80.0, -115.0),
        Point::new(-70.0, 70.0, -140.0),
        Point::new(-150.0, 70.0, -140.0),
    )?
    .with_emission(rgb8(30, 60, 30))
    .with_material(mirror);
    let backdrop = Polygon::new(vec![
        Point::new(60.0, -80.0, -300.0),
        Point::new(150.0, -80.0, -300.0),
        Point::new(150.0, 60.0, -300.0),
        Point::new(60.0, 60.0, -300.0),
    ])?
    .with_emission(rgb8(60, 30, 30))
    .with_material(shiny);

    let axis = Ray::new(Point::new(80.0, -80.0, -120.0), Vector::Y)?;
    let pillar = Cylinder::new(axis, 15.0, 90.0)?
        .with_emission(rgb8(80, 70, 20))
        .with_material(shiny);
    let rail_axis = Ray::new(Point::new(0.0, -75.0, -400.0), Vector::X)?;
    let rail = Tube::new(rail_axis, 4.0)?
        .with_emission(rgb8(40, 40, 40))
        .with_material(shiny);

    let spot = SpotLight::new(
        Color::new(1.0, 0.8, 0.6),
        Point::new(-100.0, 100.0, 200.0),
        Vector::new(1.0, -1.0, -2.0)?,
    )?
    .with_kl(0.0001)
    .with_kq(0.000005)
    .with_narrow_beam(2.0);
    let fill = PointLight::new(Color::new(0.5, 0.5, 0.5), Point::new(100.0, 150.0, 100.0))
        .with_kl(0.00001)
        .with_kq(0.000001);

    Ok(Scene::new("demo")
        .with_background(rgb8(10, 10, 30))
        .with_ambient_light(AmbientLight::new(Color::ONE, Factor::splat(0.1)))
        .add_geometry(floor)
        .add_geometry(outer)
        .add_geometry(inner)
        .add_geometry(left)
        .add_geometry(backdrop)
        .add_geometry(pillar)
        .add_geometry(rail)
        .add_light(spot)
        .add_light(fill))
}
