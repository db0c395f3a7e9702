//! 2D drawing surface abstraction
//!
//! The game draws through `Surface` so the same scene code targets a browser
//! canvas or a recording used by tests and the headless runner.

/// RGBA colour, components in 0-255 plus alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const SKY: Color = Color::rgb(0x87, 0xCE, 0xEB);
    pub const DIRT: Color = Color::rgb(0x8B, 0x45, 0x13);
    pub const GRASS: Color = Color::rgb(0x22, 0x8B, 0x22);
    pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
    pub const CORNSILK: Color = Color::rgb(0xFF, 0xF8, 0xDC);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x34, 0x98, 0xDB);
    pub const ENEMY_RED: Color = Color::rgb(0xE7, 0x4C, 0x3C);
    pub const SHELL_GREEN: Color = Color::rgb(0x27, 0xAE, 0x60);

    /// CSS colour string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Drawing primitives with canvas-style transform stack
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn resize(&mut self, width: f32, height: f32);

    /// Called once before each frame is drawn
    fn begin_frame(&mut self) {}

    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// `size` is the font size in pixels
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Circle { cx: f32, cy: f32, radius: f32, color: Color },
    Text { text: String, x: f32, y: f32, size: f32, align: TextAlign, color: Color },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl CommandList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            depth: 0,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Transform stack depth; 0 once every save has been restored
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandList {
    fn width(&self) -> f32 {
        self.width
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Only the latest frame is kept
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::SKY.to_css(), "#87CEEB");
        assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_command_list_tracks_depth() {
        let mut list = CommandList::new(800.0, 600.0);
        list.save();
        list.translate(-10.0, 0.0);
        assert_eq!(list.depth(), 1);
        list.restore();
        assert_eq!(list.depth(), 0);
        assert_eq!(list.commands.len(), 3);
    }
}
