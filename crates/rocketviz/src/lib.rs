#![warn(missing_docs)]

//! rocketviz — a rocket on its launchpad, as a standalone 3D web page.
//!
//! Composes the fixed rocket scene from the generators in
//! `rocketviz-primitives` and exports it as an HTML document driven by
//! plotly.js, or as the JSON form of the scene IR.
//!
//! # Example
//!
//! ```rust,no_run
//! use rocketviz::{compose_rocket_scene, export, Palette, DEFAULT_OUTPUT};
//!
//! let scene = compose_rocket_scene(&Palette::default());
//! export::export_html(&scene, DEFAULT_OUTPUT, &export::HtmlOptions::default()).unwrap();
//! ```

use rocketviz_math::{Point3, Vec3};
use rocketviz_primitives::{
    make_cone, make_cuboid, make_cylinder, make_hemisphere, make_launchpad, ConeParams,
    CuboidParams, CylinderParams, HemisphereParams,
};
use thiserror::Error;
use tracing::{info, instrument};

pub mod export;
mod palette;

pub use palette::Palette;
pub use rocketviz_ir::{
    Bounds, DisplayConfig, IrError, Margin, Mesh, MeshStyle, ParametricSurface, Scene, Shape,
    SurfaceStyle,
};

/// Where the rocket page is written when no path is given.
pub const DEFAULT_OUTPUT: &str = "rocket_scene_black_bg.html";

/// Fin corners in the xy-plane, in draw order.
pub const FIN_OFFSETS: [(f64, f64); 3] = [(0.5, 0.0), (-0.7, 0.0), (0.0, 0.5)];

/// Height of the fins' lower face.
pub const FIN_LIFT: f64 = 0.2;

/// Height of the nose cone's base (the top of the body).
pub const NOSE_LIFT: f64 = 2.0;

/// Errors returned by scene configuration and export.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An I/O error occurred while reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A palette file could not be parsed.
    #[error("palette error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A palette could not be rendered as TOML.
    #[error("palette encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    /// A shape failed structural validation.
    #[error(transparent)]
    Ir(#[from] IrError),
    /// The scene has nothing to draw.
    #[error("Empty scene")]
    EmptyScene,
}

// =============================================================================
// Scene composition
// =============================================================================

/// Build the rocket scene.
///
/// Draw order: body, nose, three fins, the launchpad's platform and four
/// legs, then the planet; eleven shapes in all. The display is black with
/// hidden axes and no margins.
#[instrument(skip(palette))]
pub fn compose_rocket_scene(palette: &Palette) -> Scene {
    let mut scene = Scene::new("rocket");

    let body = make_cylinder(&CylinderParams::default());
    scene.push(body.with_name("body").with_style(palette.body.clone()));

    let nose = make_cone(&ConeParams {
        offset: Vec3::new(0.0, 0.0, NOSE_LIFT),
        ..ConeParams::default()
    });
    scene.push(nose.with_name("nose").with_style(palette.nose.clone()));

    for (n, &(x, y)) in FIN_OFFSETS.iter().enumerate() {
        let fin = make_cuboid(&CuboidParams {
            offset: Vec3::new(x, y, FIN_LIFT),
            ..CuboidParams::default()
        });
        scene.push(fin.with_name(format!("fin_{n}")).with_style(palette.fins.clone()));
    }

    scene.extend(make_launchpad().into_iter().map(|shape| match shape {
        Shape::Mesh(platform) => Shape::Mesh(platform.with_style(palette.platform.clone())),
        Shape::Surface(leg) => Shape::Surface(leg.with_style(palette.legs.clone())),
    }));

    let planet = make_hemisphere(&HemisphereParams::default());
    scene.push(planet.with_name("planet").with_style(palette.planet.clone()));

    scene.display = DisplayConfig {
        background: palette.background.clone(),
        ..DisplayConfig::space()
    };

    info!(shapes = scene.len(), "rocket scene composed");
    scene
}

/// The rocket scene with the built-in palette.
pub fn rocket_scene() -> Scene {
    compose_rocket_scene(&Palette::default())
}

// =============================================================================
// Inspection
// =============================================================================

/// Per-shape statistics for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSummary {
    /// Shape name.
    pub name: String,
    /// "surface" or "mesh".
    pub kind: &'static str,
    /// Sample or vertex count.
    pub points: usize,
    /// Triangle count (meshes only).
    pub triangles: Option<usize>,
    /// Bounds of the shape's points.
    pub bounds: Option<Bounds>,
}

/// Summarize every shape in draw order.
pub fn summarize(scene: &Scene) -> Vec<ShapeSummary> {
    scene
        .iter()
        .map(|shape| ShapeSummary {
            name: shape.name().to_string(),
            kind: shape.kind(),
            points: shape.num_points(),
            triangles: shape.as_mesh().map(Mesh::num_triangles),
            bounds: shape.bounding_box(),
        })
        .collect()
}

/// Centre of a shape's bounds.
pub fn bounds_center(bounds: &Bounds) -> Point3 {
    Point3::new(
        (bounds.min[0] + bounds.max[0]) / 2.0,
        (bounds.min[1] + bounds.max[1]) / 2.0,
        (bounds.min[2] + bounds.max[2]) / 2.0,
    )
}
