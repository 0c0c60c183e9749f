#![warn(missing_docs)]

//! Shape generators for rocketviz.
//!
//! Each generator is a pure function from a parameter struct to a fresh
//! shape descriptor: cone, cylinder and hemisphere produce sampled
//! [`ParametricSurface`]s, the cuboid produces an 8-vertex [`Mesh`], and
//! the launchpad composes a platform mesh with four cylinder legs.
//!
//! Parameters are never validated; degenerate inputs give degenerate
//! geometry rather than an error.

use std::f64::consts::{FRAC_PI_2, TAU};

use rocketviz_ir::{Mesh, ParametricSurface, Shape, SurfaceStyle};
use rocketviz_math::{linspace, meshgrid, outer, Point3, Transform, Vec3};
use tracing::{debug, instrument};

mod audit;

pub use audit::{audit_closed_mesh, EdgeAudit};

/// Angular samples around the axis of cones and cylinders.
pub const ANGULAR_SAMPLES: usize = 30;

/// Samples along the axis of cones and cylinders.
pub const HEIGHT_SAMPLES: usize = 20;

/// Samples along each parameter of a hemisphere.
pub const HEMISPHERE_SAMPLES: usize = 30;

/// Colour scale of generated cones.
pub const CONE_COLORSCALE: &str = "Oranges";

/// Colour scale of generated cylinders.
pub const CYLINDER_COLORSCALE: &str = "Greys";

/// Colour scale of generated hemispheres.
pub const HEMISPHERE_COLORSCALE: &str = "YlOrBr";

/// Triangle table shared by every 8-vertex box.
///
/// Vertices 0-3 form one rectangular ring and 4-7 the opposite ring, with
/// vertex `n + 4` sitting above (or below) vertex `n`. Two triangles per
/// face; every edge is shared by exactly two triangles and winding is
/// consistent.
/// ```text
///     v5----v6
///    /|    /|
///   v4----v7|
///   | v1--|-v2
///   |/    |/
///   v0----v3
/// ```
pub const BOX_FACES: [[u32; 3]; 12] = [
    // ring 0-3
    [0, 1, 2],
    [0, 2, 3],
    // ring 4-7
    [4, 6, 5],
    [4, 7, 6],
    // sides
    [0, 4, 5],
    [0, 5, 1],
    [1, 5, 6],
    [1, 6, 2],
    [2, 6, 7],
    [2, 7, 3],
    [3, 7, 4],
    [3, 4, 0],
];

/// Unit cube corners in box-table order.
const UNIT_CUBE: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
];

/// Launchpad platform half-width.
pub const PLATFORM_HALF_WIDTH: f64 = 2.0;

/// Launchpad platform thickness (the underside sits at `-PLATFORM_THICKNESS`).
pub const PLATFORM_THICKNESS: f64 = 0.2;

/// Leg positions in the xy-plane, in draw order.
pub const LEG_POSITIONS: [(f64, f64); 4] = [(-1.5, -1.5), (1.5, -1.5), (1.5, 1.5), (-1.5, 1.5)];

/// Leg height.
pub const LEG_HEIGHT: f64 = 1.0;

/// Leg radius.
pub const LEG_RADIUS: f64 = 0.1;

// =============================================================================
// Parameters
// =============================================================================

/// Inputs for [`make_cone`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    /// Translation applied after shaping.
    pub offset: Vec3,
    /// Base radius and height.
    pub scale: f64,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            offset: Vec3::zeros(),
            scale: 1.0,
        }
    }
}

/// Inputs for [`make_cylinder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    /// Translation of the bottom-centre point.
    pub offset: Vec3,
    /// Extent along +Z.
    pub height: f64,
    /// Radius.
    pub radius: f64,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            offset: Vec3::zeros(),
            height: 2.0,
            radius: 0.5,
        }
    }
}

/// Inputs for [`make_cuboid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidParams {
    /// Position of the minimum corner.
    pub offset: Vec3,
    /// Edge length.
    pub size: f64,
}

impl Default for CuboidParams {
    fn default() -> Self {
        Self {
            offset: Vec3::zeros(),
            size: 0.2,
        }
    }
}

/// Inputs for [`make_hemisphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereParams {
    /// Sphere radius.
    pub radius: f64,
    /// Sphere centre (the flat side of the dome lies at `center.z`).
    pub center: Point3,
}

impl Default for HemisphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            center: Point3::new(0.0, 0.0, -1.2),
        }
    }
}

// =============================================================================
// Generators
// =============================================================================

/// Right circular cone with its base at `offset.z` and apex at `offset.z + scale`.
///
/// Sampled as `x = s(1-t)cos θ`, `y = s(1-t)sin θ`, `z = s·t` over
/// `θ ∈ [0, 2π]` (columns) and `t ∈ [0, 1]` (rows), then translated.
#[instrument(level = "debug")]
pub fn make_cone(params: &ConeParams) -> ParametricSurface {
    let ConeParams { offset, scale } = *params;
    let theta = linspace(0.0, TAU, ANGULAR_SAMPLES);
    let t = linspace(0.0, 1.0, HEIGHT_SAMPLES);
    let (theta, t) = meshgrid(&theta, &t);

    let ring = t.map(|t| scale * (1.0 - t));
    let x = ring.zip_map(&theta, |r, th| r * th.cos() + offset.x);
    let y = ring.zip_map(&theta, |r, th| r * th.sin() + offset.y);
    let z = t.map(|t| scale * t + offset.z);

    debug!(rows = x.rows(), cols = x.cols(), "cone sampled");
    ParametricSurface::new("cone", x, y, z).with_style(SurfaceStyle::scale(CONE_COLORSCALE))
}

/// Open circular cylinder from `offset.z` to `offset.z + height`.
#[instrument(level = "debug")]
pub fn make_cylinder(params: &CylinderParams) -> ParametricSurface {
    let CylinderParams {
        offset,
        height,
        radius,
    } = *params;
    let theta = linspace(0.0, TAU, ANGULAR_SAMPLES);
    let heights = linspace(0.0, height, HEIGHT_SAMPLES);
    let (theta, h) = meshgrid(&theta, &heights);

    let x = theta.map(|th| radius * th.cos() + offset.x);
    let y = theta.map(|th| radius * th.sin() + offset.y);
    let z = h.map(|h| h + offset.z);

    debug!(rows = x.rows(), cols = x.cols(), "cylinder sampled");
    ParametricSurface::new("cylinder", x, y, z)
        .with_style(SurfaceStyle::scale(CYLINDER_COLORSCALE))
}

/// Axis-aligned cube of edge `size` with its minimum corner at `offset`.
#[instrument(level = "debug")]
pub fn make_cuboid(params: &CuboidParams) -> Mesh {
    let place = Transform::translation_vec(&params.offset)
        .then(&Transform::uniform_scale(params.size));
    let vertices: Vec<Point3> = UNIT_CUBE
        .iter()
        .map(|&[x, y, z]| place.apply_point(&Point3::new(x, y, z)))
        .collect();

    debug!(vertices = vertices.len(), "cuboid built");
    Mesh::from_parts("cuboid", &vertices, &BOX_FACES)
}

/// Flat square platform plus four support legs.
///
/// Returns five shapes: the platform mesh (top at z=0, underside at
/// z=-0.2, spanning ±2 in x and y) followed by one leg cylinder per
/// entry of [`LEG_POSITIONS`], each hanging from z=-1 to z=0.
#[instrument(level = "debug")]
pub fn make_launchpad() -> Vec<Shape> {
    let w = PLATFORM_HALF_WIDTH;
    let ring = [(-w, -w), (w, -w), (w, w), (-w, w)];
    let vertices: Vec<Point3> = [0.0, -PLATFORM_THICKNESS]
        .iter()
        .flat_map(|&z| ring.iter().map(move |&(x, y)| Point3::new(x, y, z)))
        .collect();

    let mut shapes = Vec::with_capacity(1 + LEG_POSITIONS.len());
    shapes.push(Mesh::from_parts("platform", &vertices, &BOX_FACES).into());
    for (n, &(x, y)) in LEG_POSITIONS.iter().enumerate() {
        let leg = make_cylinder(&CylinderParams {
            offset: Vec3::new(x, y, -1.0),
            height: LEG_HEIGHT,
            radius: LEG_RADIUS,
        });
        shapes.push(leg.with_name(format!("leg_{n}")).into());
    }

    debug!(shapes = shapes.len(), "launchpad built");
    shapes
}

/// Upper half of a sphere: the dome above `center.z`.
///
/// `u ∈ [0, 2π]` indexes rows and the polar angle `v ∈ [0, π/2]` indexes
/// columns; the coordinate grids are outer products of the two axes.
#[instrument(level = "debug")]
pub fn make_hemisphere(params: &HemisphereParams) -> ParametricSurface {
    let HemisphereParams { radius, center } = *params;
    let u = linspace(0.0, TAU, HEMISPHERE_SAMPLES);
    let v = linspace(0.0, FRAC_PI_2, HEMISPHERE_SAMPLES);

    let cos_u: Vec<f64> = u.iter().map(|a| a.cos()).collect();
    let sin_u: Vec<f64> = u.iter().map(|a| a.sin()).collect();
    let cos_v: Vec<f64> = v.iter().map(|a| a.cos()).collect();
    let sin_v: Vec<f64> = v.iter().map(|a| a.sin()).collect();
    let ones = vec![1.0; u.len()];

    let x = outer(&cos_u, &sin_v).map(|w| radius * w + center.x);
    let y = outer(&sin_u, &sin_v).map(|w| radius * w + center.y);
    let z = outer(&ones, &cos_v).map(|w| radius * w + center.z);

    debug!(rows = x.rows(), cols = x.cols(), "hemisphere sampled");
    ParametricSurface::new("hemisphere", x, y, z)
        .with_style(SurfaceStyle::scale(HEMISPHERE_COLORSCALE))
}
