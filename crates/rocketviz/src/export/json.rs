//! JSON export of the scene IR.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rocketviz_ir::Scene;
use tracing::{info, instrument};

use crate::SceneError;

/// The scene as pretty-printed JSON, after validation.
pub fn to_json_string(scene: &Scene) -> Result<String, SceneError> {
    if scene.is_empty() {
        return Err(SceneError::EmptyScene);
    }
    scene.validate()?;
    Ok(scene.to_json()?)
}

/// Write the scene as JSON at `path`.
#[instrument(skip_all, fields(shapes = scene.len()))]
pub fn export_json(scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneError> {
    let json = to_json_string(scene)?;
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.as_ref().display(), bytes = json.len(), "JSON written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rocket_scene;

    #[test]
    fn test_json_roundtrip_preserves_scene() {
        let scene = rocket_scene();
        let json = to_json_string(&scene).unwrap();
        let restored = Scene::from_json(&json).unwrap();
        assert_eq!(restored, scene);
        assert_eq!(restored.len(), 11);
    }

    #[test]
    fn test_json_rejects_empty() {
        assert!(matches!(
            to_json_string(&Scene::new("nothing")),
            Err(SceneError::EmptyScene)
        ));
    }
}
