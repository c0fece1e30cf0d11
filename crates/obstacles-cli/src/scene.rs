//! Scene and config files read by the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use ai_obstacles::{ObstacleConfig, Obstacles, Rect, RectWalkboxes, Walkbox};

/// Obstacle rectangles plus the floor they stand on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub obstacles: Vec<Rect>,
    pub walkboxes: Vec<Walkbox>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        let scene: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))?;
        Ok(scene)
    }

    /// Store with every obstacle added in file order.
    pub fn build(&self, config: ObstacleConfig) -> Obstacles {
        let mut obstacles = Obstacles::new(config);
        for rect in &self.obstacles {
            if obstacles.add(*rect).is_none() {
                tracing::warn!(?rect, "obstacle dropped, store is full");
            }
        }
        obstacles
    }

    pub fn floor(&self) -> RectWalkboxes {
        RectWalkboxes::new(self.walkboxes.clone())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ObstacleConfig> {
    let Some(path) = path else {
        return Ok(ObstacleConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: ObstacleConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    Ok(config)
}
