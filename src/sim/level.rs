//! Level layouts
//!
//! A layout is plain data: geometry and spawn points. `GameState` builds its
//! entity collections from it, in the order listed here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entities::EnemyKind;
use crate::tuning::TuningError;

/// Where an enemy starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(default)]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Level number shown in the HUD
    #[serde(default = "default_number")]
    pub number: u32,
    /// Horizontal extent the camera and player are confined to
    pub width: f32,
    /// Player start and respawn point (top-left)
    pub spawn: Vec2,
    /// Anything whose top passes this y has fallen out of the level
    pub kill_plane: f32,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub coins: Vec<Vec2>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub power_ups: Vec<Vec2>,
}

fn default_number() -> u32 {
    1
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::classic()
    }
}

impl LevelLayout {
    /// World 1-1: a long ground strip, three ledges, a row of coins,
    /// three goombas and one mushroom
    pub fn classic() -> Self {
        let mut platforms: Vec<Rect> = (0..50)
            .map(|i| Rect::new(i as f32 * 70.0, 500.0, 70.0, 70.0))
            .collect();
        platforms.push(Rect::new(300.0, 350.0, 210.0, 70.0));
        platforms.push(Rect::new(700.0, 300.0, 210.0, 70.0));
        platforms.push(Rect::new(1100.0, 250.0, 210.0, 70.0));

        let coins = (0..20)
            .map(|i| Vec2::new(300.0 + i as f32 * 100.0, 200.0))
            .collect();

        let enemies = [(500.0, 450.0), (800.0, 250.0), (1200.0, 450.0)]
            .into_iter()
            .map(|(x, y)| EnemySpawn {
                kind: EnemyKind::Goomba,
                x,
                y,
            })
            .collect();

        Self {
            number: 1,
            width: 3000.0,
            spawn: Vec2::new(100.0, 300.0),
            kill_plane: 1000.0,
            platforms,
            coins,
            enemies,
            power_ups: vec![Vec2::new(600.0, 200.0)],
        }
    }

    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let layout: LevelLayout = serde_json::from_str(json)?;
        if !(layout.width.is_finite() && layout.width > 0.0) {
            return Err(TuningError::OutOfRange {
                field: "width",
                expected: "finite and positive",
                value: layout.width,
            });
        }
        Ok(layout)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
