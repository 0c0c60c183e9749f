use std::fs;
use std::path::PathBuf;

use rocketviz::export::{export_html, export_json, HtmlOptions};
use rocketviz::{compose_rocket_scene, rocket_scene, Palette, Scene, SceneError, DEFAULT_OUTPUT};

fn scratch_path(file: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rocketviz-test-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir.join(file)
}

#[test]
fn html_export_writes_non_empty_page() {
    let scene = rocket_scene();
    assert_eq!(scene.len(), 11);

    let path = scratch_path(DEFAULT_OUTPUT);
    export_html(&scene, &path, &HtmlOptions::default()).expect("export html");

    let html = fs::read_to_string(&path).expect("read back");
    assert!(!html.is_empty());
    assert!(html.contains("Plotly.newPlot"));
    assert_eq!(html.matches(r#""type":"surface""#).count(), 7);
    assert_eq!(html.matches(r#""type":"mesh3d""#).count(), 4);
    let _ = fs::remove_file(&path);
}

#[test]
fn json_export_reloads() {
    let scene = rocket_scene();
    let path = scratch_path("rocket_scene.json");
    export_json(&scene, &path).expect("export json");

    let text = fs::read_to_string(&path).expect("read back");
    let restored = Scene::from_json(&text).expect("parse");
    assert_eq!(restored, scene);
    let _ = fs::remove_file(&path);
}

#[test]
fn palette_file_drives_export() {
    let palette_path = scratch_path("palette.toml");
    fs::write(&palette_path, "background = \"#101020\"\n[planet]\ncolorscale = \"Blues\"\n")
        .expect("write palette");

    let palette = Palette::load(&palette_path).expect("load palette");
    let scene = compose_rocket_scene(&palette);
    let html_path = scratch_path("styled.html");
    export_html(&scene, &html_path, &HtmlOptions::default()).expect("export html");

    let html = fs::read_to_string(&html_path).expect("read back");
    assert!(html.contains(r##""bgcolor":"#101020""##));
    assert!(html.contains(r#""colorscale":"Blues""#));
    let _ = fs::remove_file(&palette_path);
    let _ = fs::remove_file(&html_path);
}

#[test]
fn export_to_missing_directory_fails() {
    let path = scratch_path("missing").join("nested").join("out.html");
    let err = export_html(&rocket_scene(), &path, &HtmlOptions::default()).unwrap_err();
    assert!(matches!(err, SceneError::Io(_)));
}
