//! Fixed timestep simulation tick
//!
//! Advances one session by exactly one step. Given the same state and input
//! sequence the result is always the same.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, collide, overlaps};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::WALL_STEP;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    /// Held jump (a jump fires on the rising edge)
    pub up: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Start over after game over (one-shot)
    pub restart: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    let gravity = state.tuning.gravity;

    // 1. Player kinematics
    if state
        .player
        .update(dt, input, gravity, state.tuning.friction)
    {
        state.events.push(GameEvent::Jumped);
    }

    // 2. Player vs platforms, each resolved independently in order
    for platform in &state.platforms {
        collide(&mut state.player.body, platform.rect());
    }

    // 3. Enemies: move, stomp-or-hurt, then land on platforms
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.update(dt, gravity);

        let enemy_rect = enemy.rect();
        let player_rect = state.player.rect();
        if overlaps(&player_rect, &enemy_rect) {
            let falling = state.player.body.vel.y > 0.0;
            let above_center = player_rect.y < enemy_rect.center().y;
            if falling && above_center {
                let stomped = state.enemies.remove(i);
                let points = stomped.kind.stomp_points();
                state.player.body.vel.y = -state.tuning.stomp_bounce;
                state.score += points;
                state.events.push(GameEvent::Stomped {
                    kind: stomped.kind,
                    points,
                });
                continue;
            }
            state.player_hit();
            if state.phase == GamePhase::GameOver {
                return;
            }
        }

        let enemy = &mut state.enemies[i];
        for platform in &state.platforms {
            let fixed = platform.rect();
            if let Some(contact) = collide(&mut enemy.body, fixed) {
                let is_wall = fixed.y < enemy.body.pos.y + enemy.body.size.y - WALL_STEP;
                if contact.is_horizontal() && is_wall {
                    let walking_into = match contact {
                        Contact::Left => enemy.direction > 0.0,
                        _ => enemy.direction < 0.0,
                    };
                    if walking_into {
                        enemy.turn_around();
                    }
                }
            }
        }
        i += 1;
    }

    // 4. Coins
    let player_rect = state.player.rect();
    let coins_before = state.coins.len();
    state.coins.retain_mut(|coin| {
        coin.update(dt);
        !overlaps(&player_rect, &coin.rect())
    });
    for _ in state.coins.len()..coins_before {
        state.score += state.tuning.coin_points;
        state.events.push(GameEvent::CoinCollected);
    }

    // 5. Power-ups
    let power_ups_before = state.power_ups.len();
    state.power_ups.retain_mut(|power_up| {
        power_up.update(dt);
        !overlaps(&player_rect, &power_up.rect())
    });
    for _ in state.power_ups.len()..power_ups_before {
        state.player.power_up();
        state.score += state.tuning.power_up_points;
        state.events.push(GameEvent::PowerUpCollected);
    }

    // 6. World bounds, then camera
    let max_x = (state.layout.width - state.player.body.size.x).max(0.0);
    state.player.body.pos.x = state.player.body.pos.x.clamp(0.0, max_x);
    if state.player.body.pos.y > state.layout.kill_plane {
        state.player_fell();
        if state.phase == GamePhase::GameOver {
            return;
        }
    }
    let kill_plane = state.layout.kill_plane;
    state.enemies.retain(|e| e.body.pos.y <= kill_plane);

    state.update_camera();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::consts::SIM_DT;
    use crate::sim::collision::Rect;
    use crate::sim::entities::{EnemyKind, PlayerState};
    use crate::sim::level::{EnemySpawn, LevelLayout};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// One flat floor, player standing on it at x=100
    fn flat_layout() -> LevelLayout {
        LevelLayout {
            number: 1,
            width: 3000.0,
            spawn: Vec2::new(100.0, 430.0),
            kill_plane: 1000.0,
            platforms: vec![Rect::new(0.0, 500.0, 3000.0, 70.0)],
            coins: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
        }
    }

    fn session(layout: LevelLayout) -> GameState {
        GameState::new(Tuning::default(), layout, Viewport::default())
    }

    fn run(state: &mut GameState, input: &TickInput, steps: usize) {
        for _ in 0..steps {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_resting_player_stays_put() {
        let mut state = session(flat_layout());
        run(&mut state, &TickInput::default(), 60);

        assert_eq!(state.player.body.pos, Vec2::new(100.0, 430.0));
        assert_eq!(state.player.state, PlayerState::Idle);
        // Grounded by the platform after the player's own reset
        assert!(state.player.body.grounded);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut state = session(flat_layout());
        run(&mut state, &TickInput::default(), 2);

        let jump = TickInput { up: true, ..Default::default() };
        tick(&mut state, &jump, SIM_DT);
        let gravity_step = state.tuning.gravity * SIM_DT;
        assert!((state.player.body.vel.y - (-800.0 + gravity_step)).abs() < 1e-3);
        assert!(!state.player.body.grounded);
        assert_eq!(state.player.state, PlayerState::Jumping);
        assert!(state.drain_events().any(|e| e == GameEvent::Jumped));

        let vy = state.player.body.vel.y;
        tick(&mut state, &jump, SIM_DT);
        assert!((state.player.body.vel.y - (vy + gravity_step)).abs() < 1e-3);
        assert!(state.player.body.pos.y < 430.0);
    }

    #[test]
    fn test_jump_lands_back_on_floor() {
        let mut state = session(flat_layout());
        run(&mut state, &TickInput::default(), 2);
        tick(&mut state, &TickInput { up: true, ..Default::default() }, SIM_DT);
        run(&mut state, &TickInput::default(), 120);

        assert_eq!(state.player.body.pos.y, 430.0);
        assert_eq!(state.player.state, PlayerState::Idle);
    }

    #[test]
    fn test_stomp_removes_enemy_and_bounces() {
        let mut layout = flat_layout();
        layout.platforms.clear();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 300.0,
            y: 300.0,
        });
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 2000.0,
            y: 300.0,
        });
        layout.spawn = Vec2::new(300.0, 250.0);
        let mut state = session(layout);
        state.player.body.vel.y = 100.0;

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].body.pos.x, 2000.0 - 100.0 * SIM_DT);
        assert_eq!(state.score, 100);
        assert_eq!(state.player.body.vel.y, -600.0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_side_contact_hurts_player() {
        let mut layout = flat_layout();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 140.0,
            y: 450.0,
        });
        let mut state = session(layout);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.body.pos, state.layout.spawn);
    }

    #[test]
    fn test_last_life_game_over_freezes_updates() {
        let mut layout = flat_layout();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 140.0,
            y: 450.0,
        });
        let mut state = session(layout);
        state.lives = 1;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let snapshot = serde_json::to_string(&state).unwrap();
        let ticks = state.time_ticks;
        run(&mut state, &TickInput { right: true, pause: true, ..Default::default() }, 30);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(serde_json::to_string(&state).unwrap(), snapshot);
    }

    #[test]
    fn test_game_over_ends_the_tick() {
        let mut layout = flat_layout();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 140.0,
            y: 450.0,
        });
        // Coin and power-up under the player, handled after enemies
        layout.coins = vec![Vec2::new(110.0, 450.0)];
        layout.power_ups = vec![Vec2::new(105.0, 450.0)];
        let mut state = session(layout);
        state.lives = 1;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(
            state.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::LifeLost { lives_left: 0 }, GameEvent::GameOver { score: 0 }]
        );
    }

    #[test]
    fn test_fatal_fall_ends_the_tick() {
        let mut layout = flat_layout();
        layout.platforms.clear();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 2000.0,
            y: 300.0,
        });
        let mut state = session(layout);
        state.lives = 1;
        state.player.body.pos.y = 1100.0;
        // The enemy is past the kill plane too, but the session is already over
        state.enemies[0].body.pos.y = 1100.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(
            state.drain_events().last(),
            Some(GameEvent::GameOver { score: 0 })
        );
    }

    #[test]
    fn test_falling_below_enemy_center_is_a_hit() {
        let mut layout = flat_layout();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 300.0,
            y: 300.0,
        });
        let mut state = session(layout);
        // Top of the player below the goomba's centre (325), moving down
        state.player.body.pos = Vec2::new(300.0, 330.0);
        state.player.body.vel.y = 100.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.body.pos, state.layout.spawn);
    }

    #[test]
    fn test_powered_contact_only_drops_power() {
        let mut layout = flat_layout();
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            x: 140.0,
            y: 450.0,
        });
        let mut state = session(layout);
        state.player.power_up();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.powered);
        assert_eq!(state.player.body.size.y, 70.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.drain_events().any(|e| e == GameEvent::PoweredDown));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = session(flat_layout());
        state.lives = 1;
        state.player_hit();
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &TickInput { restart: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = session(flat_layout());
        let pause = TickInput { pause: true, ..Default::default() };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let x = state.player.body.pos.x;
        run(&mut state, &TickInput { right: true, ..Default::default() }, 10);
        assert_eq!(state.player.body.pos.x, x);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_coins_and_power_ups_collected_once() {
        let mut layout = flat_layout();
        layout.coins = vec![
            Vec2::new(110.0, 450.0),
            Vec2::new(130.0, 450.0),
            Vec2::new(600.0, 450.0),
        ];
        layout.power_ups = vec![Vec2::new(105.0, 450.0)];
        let mut state = session(layout);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins[0].pos.x, 600.0);
        assert!(state.power_ups.is_empty());
        assert!(state.player.powered);
        assert_eq!(state.player.body.size.y, 90.0);
        assert_eq!(state.score, 2 * 10 + 50);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 70);
    }

    #[test]
    fn test_overlapping_platforms_all_resolve() {
        let mut layout = flat_layout();
        // Two floor tiles meeting under the player
        layout.platforms = vec![
            Rect::new(0.0, 500.0, 120.0, 70.0),
            Rect::new(120.0, 500.0, 120.0, 70.0),
        ];
        let mut state = session(layout);
        run(&mut state, &TickInput::default(), 30);
        assert_eq!(state.player.body.pos.y, 430.0);
    }

    #[test]
    fn test_enemy_turns_at_wall_not_seam() {
        let layout = LevelLayout {
            platforms: vec![
                Rect::new(0.0, 500.0, 70.0, 70.0),
                Rect::new(70.0, 500.0, 70.0, 70.0),
                Rect::new(140.0, 500.0, 70.0, 70.0),
                Rect::new(210.0, 500.0, 70.0, 70.0),
                // Wall on the left
                Rect::new(0.0, 300.0, 20.0, 200.0),
            ],
            enemies: vec![EnemySpawn {
                kind: EnemyKind::Goomba,
                x: 150.0,
                y: 450.0,
            }],
            spawn: Vec2::new(2000.0, 430.0),
            ..flat_layout()
        };
        let mut state = session(layout);
        // Floor under the player so they stay out of the way
        state.platforms.push(crate::sim::entities::Platform::new(1900.0, 500.0, 400.0, 70.0));

        // 130px to the wall at 100px/s: well under two seconds
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.enemies[0].direction, 1.0);
        assert_eq!(state.enemies[0].body.pos.y, 450.0);
    }

    #[test]
    fn test_player_confined_to_level_and_falls_out() {
        let mut state = session(flat_layout());
        run(&mut state, &TickInput { left: true, ..Default::default() }, 60);
        assert_eq!(state.player.body.pos.x, 0.0);

        let mut layout = flat_layout();
        layout.platforms.clear();
        let mut state = session(layout);
        // First fall takes ~45 steps, so one second sees exactly one
        run(&mut state, &TickInput::default(), 60);
        assert_eq!(state.lives, 2);
        assert!(state.drain_events().any(|e| e == GameEvent::FellOut));
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = session(flat_layout());
        state.player.body.pos.x = 5000.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        // Clamped to the level first, then the camera to its right edge
        assert_eq!(state.player.body.pos.x, 2950.0);
        assert_eq!(state.camera.x, 2200.0);
    }

    #[test]
    fn test_classic_level_determinism() {
        let mut a = GameState::classic();
        let mut b = GameState::classic();
        let inputs = [
            TickInput { right: true, ..Default::default() },
            TickInput { right: true, up: true, ..Default::default() },
            TickInput::default(),
            TickInput { left: true, ..Default::default() },
        ];
        for input in inputs.iter().cycle().take(600) {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
