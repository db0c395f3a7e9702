//! Game state and core simulation types
//!
//! One `GameState` is one play session: score, lives, phase and every entity.

use serde::{Deserialize, Serialize};

use super::entities::{Coin, Enemy, EnemyKind, Platform, Player, PowerUp};
use super::level::LevelLayout;
use crate::Viewport;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen until the pause trigger fires again
    Paused,
    /// Lives exhausted
    GameOver,
}

/// Horizontal scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Centre on `target_x`, clamped so the view never leaves the level.
    /// A level narrower than the viewport pins the camera at 0.
    pub fn follow(&mut self, target_x: f32, viewport_width: f32, level_width: f32) {
        let max_x = level_width - viewport_width;
        self.x = (target_x - viewport_width / 2.0).min(max_x).max(0.0);
    }
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Stomped { kind: EnemyKind, points: u64 },
    CoinCollected,
    PowerUpCollected,
    /// Hit while powered: power lost, life kept
    PoweredDown,
    LifeLost { lives_left: u32 },
    FellOut,
    GameOver { score: u64 },
    Paused,
    Resumed,
    Restarted,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub layout: LevelLayout,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    /// Draw order is collection order for every list below
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    /// Events from ticks not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session on the given level
    pub fn new(tuning: Tuning, layout: LevelLayout, viewport: Viewport) -> Self {
        let player = Player::new(layout.spawn, tuning.player_speed, tuning.jump_force);
        let platforms = layout
            .platforms
            .iter()
            .map(|r| Platform::new(r.x, r.y, r.w, r.h))
            .collect();
        let enemies = layout
            .enemies
            .iter()
            .map(|s| Enemy::new(s.kind, s.x, s.y))
            .collect();
        let coins = layout.coins.iter().map(|p| Coin::new(p.x, p.y)).collect();
        let power_ups = layout.power_ups.iter().map(|p| PowerUp::new(p.x, p.y)).collect();

        let mut state = Self {
            lives: tuning.starting_lives,
            tuning,
            layout,
            viewport,
            phase: GamePhase::Running,
            score: 0,
            time_ticks: 0,
            player,
            camera: Camera::default(),
            platforms,
            enemies,
            coins,
            power_ups,
            events: Vec::new(),
        };
        state.update_camera();
        state
    }

    /// Classic level with default tuning and viewport
    pub fn classic() -> Self {
        Self::new(Tuning::default(), LevelLayout::classic(), Viewport::default())
    }

    /// Throw the session away and start over on the same level
    pub fn restart(&mut self) {
        let tuning = self.tuning.clone();
        let layout = self.layout.clone();
        *self = Self::new(tuning, layout, self.viewport);
        self.events.push(GameEvent::Restarted);
    }

    /// Flip between Running and Paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Pause a running session; paused and finished sessions are left alone
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.toggle_pause();
        }
    }

    /// Track the viewport size when the canvas changes
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update_camera();
    }

    pub fn update_camera(&mut self) {
        self.camera.follow(
            self.player.body.pos.x,
            self.viewport.width,
            self.layout.width,
        );
    }

    /// Enemy contact that wasn't a stomp
    ///
    /// Powered players just shrink. Otherwise a life is lost and the player
    /// goes back to the level start, or the session ends.
    pub fn player_hit(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if self.player.powered {
            self.player.power_down();
            self.events.push(GameEvent::PoweredDown);
        } else {
            self.lose_life();
        }
    }

    /// Falling out of the level costs a life even when powered
    pub fn player_fell(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.power_down();
        self.events.push(GameEvent::FellOut);
        self.lose_life();
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
        } else {
            self.player.respawn(self.layout.spawn);
        }
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
