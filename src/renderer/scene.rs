//! Full-frame scene rendering
//!
//! Layering, back to front: parallax background, world entities (camera
//! space), HUD (screen space), pause/game-over overlay.

use super::sprites::Sprite;
use super::surface::{Color, Surface, TextAlign};
use crate::sim::{GamePhase, GameState};

/// One background band scrolling at a fraction of the camera speed
#[derive(Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub color: Color,
    /// 0 = fixed to the screen, 1 = moves with the world
    pub scroll_factor: f32,
    /// Band top as a fraction of the viewport height
    pub top: f32,
}

/// Sky, mountains, trees
pub const BACKGROUND_LAYERS: [ParallaxLayer; 3] = [
    ParallaxLayer {
        color: Color::SKY,
        scroll_factor: 0.1,
        top: 0.0,
    },
    ParallaxLayer {
        color: Color::DIRT,
        scroll_factor: 0.3,
        top: 0.55,
    },
    ParallaxLayer {
        color: Color::GRASS,
        scroll_factor: 0.6,
        top: 0.7,
    },
];

/// Draw one complete frame of the session
pub fn draw_world(state: &GameState, surface: &mut dyn Surface) {
    let width = surface.width();
    let height = surface.height();

    surface.begin_frame();
    surface.fill_rect(0.0, 0.0, width, height, Color::SKY);
    draw_backgrounds(state.camera.x, surface);

    surface.save();
    surface.translate(-state.camera.x, 0.0);
    for platform in &state.platforms {
        platform.draw(surface);
    }
    for coin in &state.coins {
        coin.draw(surface);
    }
    for power_up in &state.power_ups {
        power_up.draw(surface);
    }
    for enemy in &state.enemies {
        enemy.draw(surface);
    }
    state.player.draw(surface);
    surface.restore();

    draw_hud(state, surface);

    match state.phase {
        GamePhase::GameOver => draw_game_over(state.score, surface),
        GamePhase::Paused => draw_paused(surface),
        GamePhase::Running => {}
    }
}

/// Each layer spans the full viewport width and wraps around so scrolling
/// never uncovers an edge
fn draw_backgrounds(camera_x: f32, surface: &mut dyn Surface) {
    let width = surface.width();
    let height = surface.height();
    for layer in &BACKGROUND_LAYERS {
        let offset = -(camera_x * layer.scroll_factor).rem_euclid(width);
        let y = height * layer.top;
        let h = height - y;
        surface.fill_rect(offset, y, width, h, layer.color);
        surface.fill_rect(offset + width, y, width, h, layer.color);
    }
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface) {
    let lines = [
        format!("Score: {}", state.score),
        format!("Lives: {}", state.lives),
        format!("Level: {}", state.layout.number),
    ];
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, 20.0, 30.0 + i as f32 * 30.0, 24.0, TextAlign::Left, Color::WHITE);
    }
}

fn draw_game_over(score: u64, surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, w, h, Color::rgba(0, 0, 0, 0.7));

    let cx = w / 2.0;
    let cy = h / 2.0;
    surface.fill_text("GAME OVER", cx, cy - 40.0, 48.0, TextAlign::Center, Color::WHITE);
    surface.fill_text(&format!("Final Score: {score}"), cx, cy + 20.0, 24.0, TextAlign::Center, Color::WHITE);
    surface.fill_text("Press any key to restart", cx, cy + 60.0, 24.0, TextAlign::Center, Color::WHITE);
}

fn draw_paused(surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, w, h, Color::rgba(0, 0, 0, 0.5));
    surface.fill_text("PAUSED", w / 2.0, h / 2.0, 48.0, TextAlign::Center, Color::WHITE);
}
