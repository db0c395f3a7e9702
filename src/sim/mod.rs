//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (collection order, removals never skip)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Body, Contact, Rect, collide, overlaps, resolve};
pub use entities::{Coin, Enemy, EnemyKind, Platform, Player, PlayerState, PowerUp};
pub use level::{EnemySpawn, LevelLayout};
pub use state::{Camera, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
