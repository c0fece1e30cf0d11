//! Obstacles CLI - inspect obstacle layouts offline.
//!
//! - `obstacles polygons` - print the merged polygons of a scene
//! - `obstacles waypoint` - run one waypoint query
//! - `obstacles snapshot` - back up a scene and write it in save-game format

mod scene;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ai_obstacles::{ObstacleConfig, SaveFileWriter, Vec3};

use crate::scene::{load_config, Scene};

#[derive(Parser)]
#[command(name = "obstacles")]
#[command(about = "Obstacle polygons and waypoint queries", version)]
struct Cli {
    /// YAML file overriding capacities and margin
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged obstacle polygons as JSON
    Polygons {
        /// Scene file (JSON)
        scene: PathBuf,
    },

    /// Compute the next waypoint between two points
    Waypoint {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Actor position as x,y,z
        #[arg(long, value_parser = parse_vec3)]
        from: Vec3,

        /// Destination as x,y,z
        #[arg(long, value_parser = parse_vec3)]
        to: Vec3,
    },

    /// Back up the scene's polygons and write them in save-game format
    Snapshot {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
}

fn parse_vec3(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let coord = |v: &str| v.parse::<f32>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Vec3::new(coord(*x)?, coord(*y)?, coord(*z)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Polygons { scene } => show_polygons(&scene, config),
        Commands::Waypoint { scene, from, to } => show_waypoint(&scene, config, from, to),
        Commands::Snapshot { scene, out } => write_snapshot(&scene, config, &out),
    }
}

fn show_polygons(path: &Path, config: ObstacleConfig) -> Result<()> {
    let scene = Scene::load(path)?;
    let obstacles = scene.build(config);

    tracing::info!(
        obstacles = scene.obstacles.len(),
        polygons = obstacles.present_count(),
        "scene loaded"
    );

    let json = serde_json::to_string_pretty(&obstacles.snapshot())?;
    println!("{json}");
    Ok(())
}

fn show_waypoint(path: &Path, config: ObstacleConfig, from: Vec3, to: Vec3) -> Result<()> {
    let scene = Scene::load(path)?;
    let mut obstacles = scene.build(config);
    let floor = scene.floor();

    let waypoint = obstacles.find_next_waypoint(from, to, &floor);

    let p = waypoint.position;
    if waypoint.success {
        println!("next: {:.2},{:.2},{:.2}", p.x, p.y, p.z);
    } else {
        println!("stay: {:.2},{:.2},{:.2}", p.x, p.y, p.z);
    }
    for point in obstacles.path() {
        println!("  path {:.2},{:.2}", point.x, point.y);
    }
    Ok(())
}

fn write_snapshot(path: &Path, config: ObstacleConfig, out: &Path) -> Result<()> {
    let scene = Scene::load(path)?;
    let mut obstacles = scene.build(config);
    obstacles.backup();

    let file = File::create(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let mut writer = SaveFileWriter::new(BufWriter::new(file));
    obstacles
        .save(&mut writer)
        .with_context(|| format!("Failed to write snapshot to {}", out.display()))?;

    let mut inner = writer.into_inner();
    std::io::Write::flush(&mut inner)?;

    println!(
        "Wrote {} polygons to {}",
        obstacles.backup_count(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_argument_parses() {
        assert_eq!(parse_vec3("1, 2.5,-3").expect("parse"), Vec3::new(1.0, 2.5, -3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn cli_parses_waypoint_command() {
        let cli = Cli::try_parse_from([
            "obstacles",
            "waypoint",
            "scene.json",
            "--from",
            "0,0,0",
            "--to",
            "100,0,100",
        ])
        .expect("parse");
        match cli.command {
            Commands::Waypoint { to, .. } => assert_eq!(to, Vec3::new(100.0, 0.0, 100.0)),
            _ => panic!("wrong command"),
        }
    }
}
