//! Platform abstraction layer
//!
//! Host-agnostic pieces the browser runner and the native runner share:
//! - Frame timing (fixed-timestep accumulator, start/stop)
//! - Input snapshot

pub mod frame_loop;
pub mod input;

pub use frame_loop::{Frame, FrameHandle, FrameLoop, FrameSource, FrameStats};
pub use input::{InputState, KeyAction};
