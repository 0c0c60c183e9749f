//! rocketviz CLI - renders the rocket scene to a standalone web page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rocketviz::export::{export_html, export_json, HtmlOptions};
use rocketviz::{bounds_center, compose_rocket_scene, summarize, Palette, Scene, DEFAULT_OUTPUT};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rocketviz")]
#[command(about = "Render a rocket on its launchpad as a 3D web page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the scene as an HTML page (the default)
    Render {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// TOML palette overriding the built-in colours
        #[arg(long)]
        palette: Option<PathBuf>,
        /// Page title (default: the scene name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Write the scene description as JSON
    Json {
        /// Output file
        #[arg(short, long, default_value = "rocket_scene.json")]
        output: PathBuf,
        /// TOML palette overriding the built-in colours
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Print the shapes that make up the scene
    Info {
        /// TOML palette overriding the built-in colours
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Print the built-in palette as TOML
    Palette,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse().command)
}

fn run(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Render {
            output,
            palette,
            title,
        }) => {
            render(&output, palette.as_deref(), title)?;
        }
        Some(Commands::Json { output, palette }) => {
            let scene = build_scene(palette.as_deref())?;
            export_json(&scene, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Exported JSON to {}", output.display());
        }
        Some(Commands::Info { palette }) => {
            show_info(&build_scene(palette.as_deref())?);
        }
        Some(Commands::Palette) => {
            print!("{}", Palette::default().to_toml_string()?);
        }
        None => {
            render(Path::new(DEFAULT_OUTPUT), None, None)?;
        }
    }

    Ok(())
}

fn build_scene(palette: Option<&Path>) -> Result<Scene> {
    let palette = match palette {
        Some(path) => Palette::load(path)
            .with_context(|| format!("loading palette {}", path.display()))?,
        None => Palette::default(),
    };
    Ok(compose_rocket_scene(&palette))
}

fn render(output: &Path, palette: Option<&Path>, title: Option<String>) -> Result<()> {
    let scene = build_scene(palette)?;
    let opts = HtmlOptions {
        title,
        ..HtmlOptions::default()
    };
    export_html(&scene, output, &opts).with_context(|| format!("writing {}", output.display()))?;
    info!(shapes = scene.len(), "render finished");
    println!("Exported HTML to {}", output.display());
    Ok(())
}

fn show_info(scene: &Scene) {
    println!("rocketviz scene: {}", scene.name);
    println!("  Shapes: {}", scene.len());
    println!("  Background: {}", scene.display.background);
    println!(
        "  Axes: {}",
        if scene.display.axes_visible {
            "visible"
        } else {
            "hidden"
        }
    );

    println!("\nShapes:");
    let mut total_points = 0;
    let mut total_tris = 0;
    for (i, s) in summarize(scene).iter().enumerate() {
        total_points += s.points;
        total_tris += s.triangles.unwrap_or(0);
        let tris = s
            .triangles
            .map(|t| format!(", {t} triangles"))
            .unwrap_or_default();
        let bounds = s
            .bounds
            .map(|b| {
                let c = bounds_center(&b);
                format!(
                    " [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}], centre ({:.2}, {:.2}, {:.2})",
                    b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2], c.x, c.y, c.z
                )
            })
            .unwrap_or_default();
        println!(
            "  {}: {} ({}, {} points{}){}",
            i + 1,
            s.name,
            s.kind,
            s.points,
            tris,
            bounds
        );
    }

    println!("\nTotals:");
    println!("  Points: {}", total_points);
    println!("  Triangles: {}", total_tris);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["rocketviz"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["rocketviz", "render"]).unwrap();
        match cli.command {
            Some(Commands::Render {
                output,
                palette,
                title,
            }) => {
                assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT));
                assert!(palette.is_none());
                assert!(title.is_none());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_render_flags() {
        let cli = Cli::try_parse_from([
            "rocketviz",
            "render",
            "-o",
            "out.html",
            "--palette",
            "dusk.toml",
            "--title",
            "Launch",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Render {
                output,
                palette,
                title,
            }) => {
                assert_eq!(output, PathBuf::from("out.html"));
                assert_eq!(palette, Some(PathBuf::from("dusk.toml")));
                assert_eq!(title.as_deref(), Some("Launch"));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_default_run_writes_fixed_path() {
        // the only test that moves the working directory
        let dir = std::env::temp_dir().join(format!("rocketviz-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::env::set_current_dir(&dir).unwrap();

        run(None).unwrap();

        let html = std::fs::read_to_string(dir.join(DEFAULT_OUTPUT)).unwrap();
        assert!(!html.is_empty());
        assert!(html.contains("Plotly.newPlot"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_palette_is_an_error() {
        let err = build_scene(Some(Path::new("/nonexistent/palette.toml"))).unwrap_err();
        assert!(err.to_string().contains("loading palette"));
    }
}
