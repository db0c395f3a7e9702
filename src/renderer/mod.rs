//! 2D rendering module
//!
//! Scene code draws through the `Surface` trait; the browser backend wraps a
//! canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod sprites;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::draw_world;
pub use sprites::Sprite;
pub use surface::{Color, CommandList, DrawCommand, Surface, TextAlign};
