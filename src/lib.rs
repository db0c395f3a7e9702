//! Ledge Runner - a browser arcade suite built around a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game rules)
//! - `renderer`: 2D drawing surface abstraction and scene rendering
//! - `platform`: Fixed-timestep frame loop and input snapshot
//! - `shell`: Game-selection shell that starts/stops games
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod platformer;
pub mod renderer;
pub mod shell;
pub mod sim;
pub mod tuning;

pub use platformer::Platformer;
pub use shell::{Arcade, GameKind};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Default canvas size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Player grows to this height while powered
    pub const PLAYER_POWERED_HEIGHT: f32 = 90.0;

    /// Collectibles
    pub const COIN_SIZE: f32 = 30.0;
    pub const POWER_UP_SIZE: f32 = 40.0;

    /// Seconds per animation frame (10 fps)
    pub const ANIM_FRAME_INTERVAL: f32 = 0.1;

    /// A sideways push only counts as a wall when the platform top sits this
    /// far above the enemy's feet (tile seams are shallower)
    pub const WALL_STEP: f32 = 4.0;
}

/// Axis-aligned viewport the camera frames
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::VIEWPORT_WIDTH,
            height: consts::VIEWPORT_HEIGHT,
        }
    }
}
