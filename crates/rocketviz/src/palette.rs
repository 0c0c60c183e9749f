//! Colour configuration for the rocket scene.
//!
//! A palette can be written as TOML; any table or key left out falls back
//! to the built-in value:
//!
//! ```toml
//! background = "black"
//!
//! [nose]
//! colorscale = "Reds"
//!
//! [fins]
//! color = "#c0c0c0"
//! opacity = 1.0
//! ```

use std::path::Path;

use rocketviz_ir::{MeshStyle, SurfaceStyle};
use rocketviz_primitives::{CONE_COLORSCALE, CYLINDER_COLORSCALE, HEMISPHERE_COLORSCALE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::SceneError;

/// Styles for every role in the rocket scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Scene background colour.
    pub background: String,
    /// Rocket body cylinder.
    pub body: SurfaceStyle,
    /// Nose cone.
    pub nose: SurfaceStyle,
    /// Launchpad legs.
    pub legs: SurfaceStyle,
    /// Planet hemisphere.
    pub planet: SurfaceStyle,
    /// Fins.
    pub fins: MeshStyle,
    /// Launchpad platform.
    pub platform: MeshStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "black".to_string(),
            body: SurfaceStyle::scale(CYLINDER_COLORSCALE),
            nose: SurfaceStyle::scale(CONE_COLORSCALE),
            legs: SurfaceStyle::scale(CYLINDER_COLORSCALE),
            planet: SurfaceStyle::scale(HEMISPHERE_COLORSCALE),
            fins: MeshStyle::default(),
            platform: MeshStyle::default(),
        }
    }
}

impl Palette {
    /// Parse a palette from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a palette from a TOML file.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        let palette = Self::from_toml_str(&text)?;
        debug!("palette loaded");
        Ok(palette)
    }

    /// Render the palette as TOML (useful as a starting file).
    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
