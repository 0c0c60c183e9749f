//! Shape descriptors for rocketviz.
//!
//! This crate defines the renderable values a scene is built from:
//! [`ParametricSurface`] (three equal-shaped coordinate grids) and
//! [`Mesh`] (flat vertex lists plus triangle index lists), wrapped in
//! [`Shape`] and collected into a [`Scene`] with its [`DisplayConfig`].
//!
//! The IR is purely declarative. Generating the coordinates is the job of
//! `rocketviz-primitives`; turning a scene into a viewer document is the job
//! of the exporters in `rocketviz`.

use rocketviz_math::{Grid, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural violations found by [`Scene::validate`] and friends.
#[derive(Error, Debug)]
pub enum IrError {
    /// The x/y/z grids of a surface do not share one shape.
    #[error("surface '{name}': grid shapes differ (x {x:?}, y {y:?}, z {z:?})")]
    SurfaceShape {
        /// Shape name.
        name: String,
        /// Shape of the x grid.
        x: (usize, usize),
        /// Shape of the y grid.
        y: (usize, usize),
        /// Shape of the z grid.
        z: (usize, usize),
    },
    /// A surface with no samples.
    #[error("surface '{name}' has no samples")]
    EmptySurface {
        /// Shape name.
        name: String,
    },
    /// Parallel vertex or face lists disagree in length.
    #[error("mesh '{name}': {what} lists have different lengths")]
    MeshLengths {
        /// Shape name.
        name: String,
        /// Which lists ("vertex" or "face").
        what: &'static str,
    },
    /// A face references a vertex that does not exist.
    #[error("mesh '{name}': index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// Shape name.
        name: String,
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertices: usize,
    },
    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Axis-aligned bounds as `min`/`max` corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl Bounds {
    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let mut out = *self;
        for a in 0..3 {
            out.min[a] = out.min[a].min(other.min[a]);
            out.max[a] = out.max[a].max(other.max[a]);
        }
        out
    }

    fn of_axes(x: Option<(f64, f64)>, y: Option<(f64, f64)>, z: Option<(f64, f64)>) -> Option<Self> {
        let (x, y, z) = (x?, y?, z?);
        Some(Self {
            min: [x.0, y.0, z.0],
            max: [x.1, y.1, z.1],
        })
    }
}

fn slice_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

// =============================================================================
// Parametric surfaces
// =============================================================================

/// How a surface is coloured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    /// Named colour scale (e.g. "Greys", "Oranges").
    pub colorscale: String,
    /// Whether the viewer draws a colour bar for this surface.
    pub show_scale: bool,
}

impl SurfaceStyle {
    /// A style using `colorscale` with the colour bar hidden.
    pub fn scale(colorscale: impl Into<String>) -> Self {
        Self {
            colorscale: colorscale.into(),
            show_scale: false,
        }
    }
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self::scale("Greys")
    }
}

/// A surface sampled on a `(u, v)` parameter grid.
///
/// Cell `(r, c)` of `x`, `y` and `z` together form one 3D point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametricSurface {
    /// Human-readable name (becomes the trace name in exports).
    pub name: String,
    /// X coordinates.
    pub x: Grid,
    /// Y coordinates.
    pub y: Grid,
    /// Z coordinates.
    pub z: Grid,
    /// Colouring.
    pub style: SurfaceStyle,
}

impl ParametricSurface {
    /// Create a surface with the default style.
    pub fn new(name: impl Into<String>, x: Grid, y: Grid, z: Grid) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
            style: SurfaceStyle::default(),
        }
    }

    /// Replace the style.
    pub fn with_style(mut self, style: SurfaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Grid shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// The point at grid cell `(row, col)`.
    pub fn point(&self, row: usize, col: usize) -> Option<Point3> {
        Some(Point3::new(
            self.x.get(row, col)?,
            self.y.get(row, col)?,
            self.z.get(row, col)?,
        ))
    }

    /// Number of sampled points.
    pub fn num_points(&self) -> usize {
        self.x.len()
    }

    /// Check that all three grids share a non-empty shape.
    pub fn validate(&self) -> Result<(), IrError> {
        let (x, y, z) = (self.x.shape(), self.y.shape(), self.z.shape());
        if x != y || y != z {
            return Err(IrError::SurfaceShape {
                name: self.name.clone(),
                x,
                y,
                z,
            });
        }
        if self.x.is_empty() {
            return Err(IrError::EmptySurface {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Bounds of all samples, `None` when empty.
    pub fn bounding_box(&self) -> Option<Bounds> {
        Bounds::of_axes(self.x.min_max(), self.y.min_max(), self.z.min_max())
    }
}

// =============================================================================
// Triangle meshes
// =============================================================================

/// How a mesh is coloured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshStyle {
    /// Flat colour (CSS colour name or `#rrggbb`).
    pub color: String,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            color: "gray".to_string(),
            opacity: 0.9,
        }
    }
}

/// An indexed triangle mesh.
///
/// Vertices are stored as three parallel coordinate lists and faces as
/// three parallel index lists: triangle `n` is `(i[n], j[n], k[n])`.
/// Winding is not required to be consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Human-readable name.
    pub name: String,
    /// Vertex X coordinates.
    pub x: Vec<f64>,
    /// Vertex Y coordinates.
    pub y: Vec<f64>,
    /// Vertex Z coordinates.
    pub z: Vec<f64>,
    /// First corner of each triangle.
    pub i: Vec<u32>,
    /// Second corner of each triangle.
    pub j: Vec<u32>,
    /// Third corner of each triangle.
    pub k: Vec<u32>,
    /// Colouring.
    pub style: MeshStyle,
}

impl Mesh {
    /// Build a mesh from points and triangle corner triples.
    pub fn from_parts(name: impl Into<String>, vertices: &[Point3], faces: &[[u32; 3]]) -> Self {
        Self {
            name: name.into(),
            x: vertices.iter().map(|p| p.x).collect(),
            y: vertices.iter().map(|p| p.y).collect(),
            z: vertices.iter().map(|p| p.z).collect(),
            i: faces.iter().map(|f| f[0]).collect(),
            j: faces.iter().map(|f| f[1]).collect(),
            k: faces.iter().map(|f| f[2]).collect(),
            style: MeshStyle::default(),
        }
    }

    /// Replace the style.
    pub fn with_style(mut self, style: MeshStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.x.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.i.len()
    }

    /// Vertex `idx` as a point.
    pub fn vertex(&self, idx: usize) -> Option<Point3> {
        Some(Point3::new(
            *self.x.get(idx)?,
            *self.y.get(idx)?,
            *self.z.get(idx)?,
        ))
    }

    /// Iterate over triangles as corner triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.i
            .iter()
            .zip(&self.j)
            .zip(&self.k)
            .map(|((&a, &b), &c)| [a, b, c])
    }

    /// Check list lengths and index ranges.
    pub fn validate(&self) -> Result<(), IrError> {
        let n = self.x.len();
        if self.y.len() != n || self.z.len() != n {
            return Err(IrError::MeshLengths {
                name: self.name.clone(),
                what: "vertex",
            });
        }
        if self.j.len() != self.i.len() || self.k.len() != self.i.len() {
            return Err(IrError::MeshLengths {
                name: self.name.clone(),
                what: "face",
            });
        }
        let bad = self
            .i
            .iter()
            .chain(&self.j)
            .chain(&self.k)
            .find(|&&idx| idx as usize >= n);
        if let Some(&index) = bad {
            return Err(IrError::IndexOutOfRange {
                name: self.name.clone(),
                index,
                vertices: n,
            });
        }
        Ok(())
    }

    /// Bounds of all vertices, `None` when empty.
    pub fn bounding_box(&self) -> Option<Bounds> {
        Bounds::of_axes(
            slice_min_max(&self.x),
            slice_min_max(&self.y),
            slice_min_max(&self.z),
        )
    }
}

// =============================================================================
// Shapes and scenes
// =============================================================================

/// A renderable shape descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// A sampled parametric surface.
    Surface(ParametricSurface),
    /// An indexed triangle mesh.
    Mesh(Mesh),
}

impl Shape {
    /// The shape's name.
    pub fn name(&self) -> &str {
        match self {
            Shape::Surface(s) => &s.name,
            Shape::Mesh(m) => &m.name,
        }
    }

    /// Short kind label ("surface" or "mesh").
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Surface(_) => "surface",
            Shape::Mesh(_) => "mesh",
        }
    }

    /// Number of points (grid samples or mesh vertices).
    pub fn num_points(&self) -> usize {
        match self {
            Shape::Surface(s) => s.num_points(),
            Shape::Mesh(m) => m.num_vertices(),
        }
    }

    /// Bounds of the shape's points.
    pub fn bounding_box(&self) -> Option<Bounds> {
        match self {
            Shape::Surface(s) => s.bounding_box(),
            Shape::Mesh(m) => m.bounding_box(),
        }
    }

    /// Structural check for either variant.
    pub fn validate(&self) -> Result<(), IrError> {
        match self {
            Shape::Surface(s) => s.validate(),
            Shape::Mesh(m) => m.validate(),
        }
    }

    /// The surface, if this is one.
    pub fn as_surface(&self) -> Option<&ParametricSurface> {
        match self {
            Shape::Surface(s) => Some(s),
            Shape::Mesh(_) => None,
        }
    }

    /// The mesh, if this is one.
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Shape::Mesh(m) => Some(m),
            Shape::Surface(_) => None,
        }
    }
}

impl From<ParametricSurface> for Shape {
    fn from(s: ParametricSurface) -> Self {
        Shape::Surface(s)
    }
}

impl From<Mesh> for Shape {
    fn from(m: Mesh) -> Self {
        Shape::Mesh(m)
    }
}

/// Page margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    /// Left.
    pub l: f64,
    /// Right.
    pub r: f64,
    /// Bottom.
    pub b: f64,
    /// Top.
    pub t: f64,
}

/// Global display settings applied to the whole scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Scene background colour.
    pub background: String,
    /// Whether the x, y and z axes are drawn.
    pub axes_visible: bool,
    /// Outer margins.
    pub margin: Margin,
}

impl DisplayConfig {
    /// Black background, no axes, no margins.
    pub fn space() -> Self {
        Self {
            background: "black".to_string(),
            axes_visible: false,
            margin: Margin::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            axes_visible: true,
            margin: Margin::default(),
        }
    }
}

/// An ordered collection of shapes plus display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Name of the scene (used as the document title).
    pub name: String,
    /// Shapes in draw order.
    pub shapes: Vec<Shape>,
    /// Display settings.
    pub display: DisplayConfig,
}

impl Scene {
    /// Create an empty scene with default display settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            display: DisplayConfig::default(),
        }
    }

    /// Append one shape.
    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over shapes in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Validate every shape, stopping at the first failure.
    pub fn validate(&self) -> Result<(), IrError> {
        self.shapes.iter().try_for_each(Shape::validate)
    }

    /// Bounds of the whole scene.
    pub fn bounding_box(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter_map(Shape::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Extend<Shape> for Scene {
    fn extend<T: IntoIterator<Item = Shape>>(&mut self, iter: T) {
        self.shapes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mesh() -> Mesh {
        Mesh::from_parts(
            "square",
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
    }

    fn flat_surface() -> ParametricSurface {
        let x = Grid::from_fn(2, 3, |_, c| c as f64);
        let y = Grid::from_fn(2, 3, |r, _| r as f64);
        let z = Grid::filled(2, 3, 5.0);
        ParametricSurface::new("flat", x, y, z)
    }

    #[test]
    fn mesh_from_parts() {
        let mesh = square_mesh();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.vertex(2), Some(Point3::new(1.0, 1.0, 0.0)));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn mesh_index_out_of_range() {
        let mut mesh = square_mesh();
        mesh.k[1] = 4;
        match mesh.validate() {
            Err(IrError::IndexOutOfRange { index, vertices, .. }) => {
                assert_eq!(index, 4);
                assert_eq!(vertices, 4);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn mesh_length_mismatch() {
        let mut mesh = square_mesh();
        mesh.j.pop();
        assert!(matches!(
            mesh.validate(),
            Err(IrError::MeshLengths { what: "face", .. })
        ));
    }

    #[test]
    fn surface_shape_mismatch() {
        let mut surface = flat_surface();
        surface.z = Grid::filled(3, 2, 0.0);
        assert!(matches!(
            surface.validate(),
            Err(IrError::SurfaceShape { .. })
        ));
    }

    #[test]
    fn surface_point_and_bounds() {
        let surface = flat_surface();
        assert!(surface.validate().is_ok());
        assert_eq!(surface.point(1, 2), Some(Point3::new(2.0, 1.0, 5.0)));
        assert_eq!(surface.point(2, 0), None);
        let b = surface.bounding_box().unwrap();
        assert_eq!(b.min, [0.0, 0.0, 5.0]);
        assert_eq!(b.max, [2.0, 1.0, 5.0]);
    }

    #[test]
    fn scene_bounds_union() {
        let mut scene = Scene::new("test");
        scene.push(square_mesh());
        scene.push(flat_surface());
        let b = scene.bounding_box().unwrap();
        assert_eq!(b.min, [0.0, 0.0, 0.0]);
        assert_eq!(b.max, [2.0, 1.0, 5.0]);
    }

    #[test]
    fn scene_json_roundtrip() {
        let mut scene = Scene::new("roundtrip");
        scene.push(flat_surface());
        scene.push(square_mesh());
        scene.display = DisplayConfig::space();

        let json = scene.to_json().expect("serialize");
        assert!(json.contains(r#""type": "Surface""#));
        assert!(json.contains(r#""type": "Mesh""#));
        let restored = Scene::from_json(&json).expect("deserialize");
        assert_eq!(scene, restored);
    }

    #[test]
    fn space_display() {
        let d = DisplayConfig::space();
        assert_eq!(d.background, "black");
        assert!(!d.axes_visible);
        assert_eq!(d.margin, Margin::default());
    }

    #[test]
    fn empty_scene() {
        let scene = Scene::new("empty");
        assert!(scene.is_empty());
        assert!(scene.validate().is_ok());
        assert!(scene.bounding_box().is_none());
    }
}
