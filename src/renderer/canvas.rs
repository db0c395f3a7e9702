//! Canvas 2D backend (browser only)

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::surface::{Color, Surface, TextAlign};

/// `Surface` over a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self { ctx, width, height }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        if let Err(e) = self.ctx.translate(x as f64, y as f64) {
            log::error!("translate failed: {:?}", e);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(cx as f64, cy as f64, radius as f64, 0.0, TAU) {
            log::error!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{size}px Arial"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::error!("fill_text failed: {:?}", e);
        }
    }
}
