//! Per-entity draw routines
//!
//! Each sprite reads only its own entity's fields and draws in world space;
//! the scene applies the camera transform.

use super::surface::{Color, Surface, TextAlign};
use crate::consts::{COIN_SIZE, POWER_UP_SIZE};
use crate::sim::{Coin, Enemy, EnemyKind, Platform, Player, PowerUp};

/// Something that can draw itself
pub trait Sprite {
    fn draw(&self, surface: &mut dyn Surface);
}

impl Sprite for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.rect();
        let body = if self.powered { Color::RED } else { Color::BLUE };
        // Idle breathing / running bob from the animation column
        let bob = if self.anim.frame_y < 2 { (self.anim.frame_x % 2) as f32 } else { 0.0 };
        surface.fill_rect(r.x, r.y + bob, r.w, r.h - bob, body);

        let facing_right = self.facing > 0.0;
        let eye_x = r.x + if facing_right { 30.0 } else { 10.0 };
        let pupil_x = r.x + if facing_right { 35.0 } else { 15.0 };
        surface.fill_rect(eye_x, r.y + bob + 15.0, 10.0, 10.0, Color::WHITE);
        surface.fill_rect(pupil_x, r.y + bob + 18.0, 4.0, 4.0, Color::BLACK);
    }
}

impl Sprite for Platform {
    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.rect();
        surface.fill_rect(r.x, r.y, r.w, r.h, Color::DIRT);
        surface.fill_rect(r.x, r.y, r.w, 10.0_f32.min(r.h), Color::GRASS);
    }
}

impl Sprite for Enemy {
    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.rect();
        let color = match self.kind {
            EnemyKind::Goomba => Color::ENEMY_RED,
            EnemyKind::Koopa => Color::SHELL_GREEN,
        };
        surface.fill_rect(r.x, r.y, r.w, r.h, color);

        surface.fill_rect(r.x + 10.0, r.y + 10.0, 10.0, 10.0, Color::WHITE);
        surface.fill_rect(r.x + 30.0, r.y + 10.0, 10.0, 10.0, Color::WHITE);
        // Pupils look where the enemy walks
        let look = if self.direction < 0.0 { 0.0 } else { 2.0 };
        surface.fill_rect(r.x + 12.0 + look, r.y + 12.0, 6.0, 6.0, Color::BLACK);
        surface.fill_rect(r.x + 32.0 + look, r.y + 12.0, 6.0, 6.0, Color::BLACK);
    }
}

/// Horizontal squash per animation frame, faking a spin
const COIN_SPIN: [f32; Coin::FRAMES as usize] = [1.0, 0.8, 0.5, 0.2, 0.5, 0.8];

impl Sprite for Coin {
    fn draw(&self, surface: &mut dyn Surface) {
        let radius = COIN_SIZE / 2.0;
        let cx = self.pos.x + radius;
        let cy = self.pos.y + radius;
        let spin = COIN_SPIN[self.anim.frame_x as usize % COIN_SPIN.len()];

        if spin >= 1.0 {
            surface.fill_circle(cx, cy, radius, Color::GOLD);
            surface.fill_circle(self.pos.x + COIN_SIZE / 3.0, self.pos.y + COIN_SIZE / 3.0, COIN_SIZE / 6.0, Color::CORNSILK);
        } else {
            let w = COIN_SIZE * spin;
            surface.fill_rect(cx - w / 2.0, self.pos.y, w, COIN_SIZE, Color::GOLD);
        }
    }
}

impl Sprite for PowerUp {
    fn draw(&self, surface: &mut dyn Surface) {
        // Gentle pulse across the four frames
        let grow = [0.0, 1.0, 2.0, 1.0][self.anim.frame_x as usize % 4];
        surface.fill_rect(
            self.pos.x - grow,
            self.pos.y - grow,
            POWER_UP_SIZE + grow * 2.0,
            POWER_UP_SIZE + grow * 2.0,
            Color::RED,
        );
        surface.fill_text("M", self.pos.x + 12.0, self.pos.y + 28.0, 24.0, TextAlign::Left, Color::WHITE);
    }
}
