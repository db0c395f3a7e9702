//! Entity models and their local per-step updates
//!
//! Updates here only advance an entity's own kinematics and animation.
//! Collisions and cross-entity rules are applied by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::tick::TickInput;
use crate::consts::*;

/// Discrete player movement state (drives the animation row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Jumping,
}

/// Sprite-sheet style frame counter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    /// Column in the current row
    pub frame_x: u32,
    /// Row (one per player state)
    pub frame_y: u32,
    pub timer: f32,
}

impl Animation {
    /// Advance the timer; returns true when a new frame is due
    fn step(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer > ANIM_FRAME_INTERVAL {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Loop through `frames` columns on a single row
    pub fn cycle(&mut self, dt: f32, frames: u32) {
        if self.step(dt) {
            self.frame_x = (self.frame_x + 1) % frames;
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub powered: bool,
    pub state: PlayerState,
    pub anim: Animation,
    pub speed: f32,
    pub jump_force: f32,
    /// "up" level seen on the previous update (jumps fire on the rising edge)
    up_held: bool,
}

impl Player {
    pub fn new(spawn: Vec2, speed: f32, jump_force: f32) -> Self {
        Self {
            body: Body::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: 1.0,
            powered: false,
            state: PlayerState::Idle,
            anim: Animation::default(),
            speed,
            jump_force,
            up_held: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Map input to velocity/state, apply gravity, integrate and animate.
    ///
    /// Returns true if a jump started this step. `grounded` is always false
    /// on return; only a platform resolution can set it again.
    pub fn update(&mut self, dt: f32, input: &TickInput, gravity: f32, friction: f32) -> bool {
        let airborne_or = |grounded: bool, on_ground: PlayerState| {
            if grounded { on_ground } else { PlayerState::Jumping }
        };

        if input.left {
            self.body.vel.x = -self.speed;
            self.facing = -1.0;
            self.state = airborne_or(self.body.grounded, PlayerState::Running);
        } else if input.right {
            self.body.vel.x = self.speed;
            self.facing = 1.0;
            self.state = airborne_or(self.body.grounded, PlayerState::Running);
        } else {
            self.body.vel.x *= friction;
            self.state = airborne_or(self.body.grounded, PlayerState::Idle);
        }

        let mut jumped = false;
        if input.up && !self.up_held && self.body.grounded {
            self.body.vel.y = -self.jump_force;
            self.body.grounded = false;
            self.state = PlayerState::Jumping;
            jumped = true;
        }
        self.up_held = input.up;

        self.body.vel.y += gravity * dt;
        self.body.integrate(dt);
        self.animate(dt);

        self.body.grounded = false;
        jumped
    }

    fn animate(&mut self, dt: f32) {
        if !self.anim.step(dt) {
            return;
        }
        match self.state {
            PlayerState::Idle => {
                self.anim.frame_x = (self.anim.frame_x + 1) % 4;
                self.anim.frame_y = 0;
            }
            PlayerState::Running => {
                self.anim.frame_x = (self.anim.frame_x + 1) % 6;
                self.anim.frame_y = 1;
            }
            PlayerState::Jumping => {
                self.anim.frame_x = 0;
                self.anim.frame_y = 2;
            }
        }
    }

    /// Grow to the powered height, keeping the feet in place
    pub fn power_up(&mut self) {
        if !self.powered {
            self.powered = true;
            self.set_height(PLAYER_POWERED_HEIGHT);
        }
    }

    /// Shrink back after a hit, keeping the feet in place
    pub fn power_down(&mut self) {
        if self.powered {
            self.powered = false;
            self.set_height(PLAYER_HEIGHT);
        }
    }

    fn set_height(&mut self, height: f32) {
        let feet = self.body.pos.y + self.body.size.y;
        self.body.size.y = height;
        self.body.pos.y = feet - height;
    }

    /// Put the player back at the start of the level (same instance)
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.body.vel = Vec2::ZERO;
        self.body.grounded = false;
        self.state = PlayerState::Idle;
        self.up_held = false;
    }
}

/// A static block of level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// Enemy species and their behaviour table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    #[default]
    Goomba,
    Koopa,
}

impl EnemyKind {
    /// Walk speed (pixels/s)
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Goomba => 100.0,
            EnemyKind::Koopa => 60.0,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Goomba => Vec2::new(50.0, 50.0),
            EnemyKind::Koopa => Vec2::new(50.0, 70.0),
        }
    }

    pub fn stomp_points(self) -> u64 {
        match self {
            EnemyKind::Goomba => 100,
            EnemyKind::Koopa => 200,
        }
    }
}

/// A walking enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    /// -1 walking left, +1 walking right
    pub direction: f32,
}

impl Enemy {
    /// Enemies start out walking left
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        let size = kind.size();
        let mut body = Body::new(x, y, size.x, size.y);
        body.vel.x = -kind.speed();
        Self {
            kind,
            body,
            direction: -1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn update(&mut self, dt: f32, gravity: f32) {
        self.body.vel.x = self.direction * self.kind.speed();
        self.body.vel.y += gravity * dt;
        self.body.integrate(dt);
        self.body.grounded = false;
    }

    pub fn turn_around(&mut self) {
        self.direction = -self.direction;
        self.body.vel.x = self.direction * self.kind.speed();
    }
}

/// A spinning coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub anim: Animation,
}

impl Coin {
    pub const FRAMES: u32 = 6;

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            anim: Animation::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COIN_SIZE, COIN_SIZE)
    }

    pub fn update(&mut self, dt: f32) {
        self.anim.cycle(dt, Self::FRAMES);
    }
}

/// A mushroom that makes the player taller and absorbs one hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub anim: Animation,
}

impl PowerUp {
    pub const FRAMES: u32 = 4;

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            anim: Animation::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.anim.cycle(dt, Self::FRAMES);
    }
}
