//! HTML export for browser viewing.
//!
//! Writes a self-contained page holding the scene as a plotly.js figure:
//! one `surface` trace per parametric surface, one `mesh3d` trace per
//! mesh, and a layout carrying the scene's display settings. Pan, zoom
//! and rotation come from the plotly.js viewer itself.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rocketviz_ir::{Margin, Scene, Shape};
use rocketviz_math::Grid;
use serde::Serialize;
use tracing::{info, instrument};

use crate::SceneError;

/// plotly.js bundle loaded by exported pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Page-level export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Document title; the scene name when `None`.
    pub title: Option<String>,
    /// Script URL for plotly.js.
    pub plotly_js_url: String,
    /// `id` of the element the figure is drawn into.
    pub div_id: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: None,
            plotly_js_url: PLOTLY_CDN.to_string(),
            div_id: "rocketviz-plot".to_string(),
        }
    }
}

// =============================================================================
// plotly.js figure model
// =============================================================================

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Trace<'a> {
    Surface {
        name: &'a str,
        x: &'a Grid,
        y: &'a Grid,
        z: &'a Grid,
        colorscale: &'a str,
        showscale: bool,
    },
    Mesh3d {
        name: &'a str,
        x: &'a [f64],
        y: &'a [f64],
        z: &'a [f64],
        i: &'a [u32],
        j: &'a [u32],
        k: &'a [u32],
        color: &'a str,
        opacity: f64,
    },
}

impl<'a> From<&'a Shape> for Trace<'a> {
    fn from(shape: &'a Shape) -> Self {
        match shape {
            Shape::Surface(s) => Trace::Surface {
                name: &s.name,
                x: &s.x,
                y: &s.y,
                z: &s.z,
                colorscale: &s.style.colorscale,
                showscale: s.style.show_scale,
            },
            Shape::Mesh(m) => Trace::Mesh3d {
                name: &m.name,
                x: &m.x,
                y: &m.y,
                z: &m.z,
                i: &m.i,
                j: &m.j,
                k: &m.k,
                color: &m.style.color,
                opacity: m.style.opacity,
            },
        }
    }
}

#[derive(Serialize)]
struct Axis {
    visible: bool,
}

#[derive(Serialize)]
struct SceneLayout<'a> {
    xaxis: Axis,
    yaxis: Axis,
    zaxis: Axis,
    bgcolor: &'a str,
}

#[derive(Serialize)]
struct Layout<'a> {
    scene: SceneLayout<'a>,
    margin: &'a Margin,
}

#[derive(Serialize)]
struct Figure<'a> {
    data: Vec<Trace<'a>>,
    layout: Layout<'a>,
}

impl<'a> Figure<'a> {
    fn of(scene: &'a Scene) -> Self {
        let visible = scene.display.axes_visible;
        Self {
            data: scene.iter().map(Trace::from).collect(),
            layout: Layout {
                scene: SceneLayout {
                    xaxis: Axis { visible },
                    yaxis: Axis { visible },
                    zaxis: Axis { visible },
                    bgcolor: &scene.display.background,
                },
                margin: &scene.display.margin,
            },
        }
    }
}

// =============================================================================
// Page rendering
// =============================================================================

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The plotly.js figure for `scene` as JSON, safe to inline in a `<script>`.
fn figure_json(scene: &Scene) -> Result<String, SceneError> {
    let json = serde_json::to_string(&Figure::of(scene))?;
    // a literal "</script>" inside a trace name would end the script block
    Ok(json.replace("</", "<\\/"))
}

/// Render `scene` as a complete HTML document.
///
/// The scene is validated first; an empty scene is an error.
pub fn to_html_string(scene: &Scene, opts: &HtmlOptions) -> Result<String, SceneError> {
    if scene.is_empty() {
        return Err(SceneError::EmptyScene);
    }
    scene.validate()?;

    let title = escape_html(opts.title.as_deref().unwrap_or(&scene.name));
    let url = escape_html(&opts.plotly_js_url);
    let div = escape_html(&opts.div_id);
    let figure = figure_json(scene)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<style>html, body {{ margin: 0; height: 100%; background: {bg}; }}</style>
<script src="{url}"></script>
</head>
<body>
<div id="{div}" style="height:100%; width:100%;"></div>
<script type="text/javascript">
const figure = {figure};
Plotly.newPlot("{div}", figure.data, figure.layout, {{"responsive": true}});
</script>
</body>
</html>
"#,
        bg = escape_html(&scene.display.background),
    ))
}

/// Write `scene` as an HTML page at `path`.
#[instrument(skip_all, fields(shapes = scene.len()))]
pub fn export_html(
    scene: &Scene,
    path: impl AsRef<Path>,
    opts: &HtmlOptions,
) -> Result<(), SceneError> {
    let html = to_html_string(scene, opts)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    info!(path = %path.as_ref().display(), bytes = html.len(), "HTML written");
    Ok(())
}
