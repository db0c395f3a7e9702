//! Game-selection shell
//!
//! Owns the frame loop and whichever game is loaded. Loading a game stops the
//! current one first, so at most one callback chain is ever alive.

use crate::Viewport;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{Frame, FrameLoop, FrameSource, FrameStats};
use crate::platformer::Platformer;
use crate::renderer::Surface;

/// Games the shell's menu can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Platformer,
    Snake,
    Pong,
    Memory,
}

impl GameKind {
    /// Parse a menu name (the `data-game` attribute on the web)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mario" | "platformer" => Some(GameKind::Platformer),
            "snake" => Some(GameKind::Snake),
            "pong" => Some(GameKind::Pong),
            "memory" => Some(GameKind::Memory),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Platformer => "platformer",
            GameKind::Snake => "snake",
            GameKind::Pong => "pong",
            GameKind::Memory => "memory",
        }
    }

    /// Only the platformer ships in this build
    pub fn is_available(self) -> bool {
        matches!(self, GameKind::Platformer)
    }
}

/// A game the shell can drive
pub trait Game: Frame {
    fn kind(&self) -> GameKind;
    fn resize(&mut self, viewport: Viewport);
    /// Pause if the game is running; a paused game stays paused
    fn pause(&mut self);
}

impl<S: Surface> Game for Platformer<S> {
    fn kind(&self) -> GameKind {
        GameKind::Platformer
    }

    fn resize(&mut self, viewport: Viewport) {
        Platformer::resize(self, viewport);
    }

    fn pause(&mut self) {
        Platformer::pause(self);
    }
}

/// Frame loop plus the loaded game
pub struct Arcade<F: FrameSource> {
    source: F,
    frame_loop: FrameLoop,
    current: Option<Box<dyn Game>>,
}

impl<F: FrameSource> Arcade<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            frame_loop: FrameLoop::new(SIM_DT, MAX_SUBSTEPS),
            current: None,
        }
    }

    /// Stop whatever is running and start `game`
    pub fn load(&mut self, game: Box<dyn Game>) {
        self.frame_loop.stop(&mut self.source);
        if let Some(old) = self.current.take() {
            log::info!("Unloading {}", old.kind().name());
        }
        log::info!("Loading {}", game.kind().name());
        self.current = Some(game);
        self.frame_loop.start(&mut self.source);
    }

    /// Stop the loop; the game stays loaded and can be resumed
    pub fn stop(&mut self) {
        self.frame_loop.stop(&mut self.source);
    }

    /// Resume the loaded game. Nothing happens when no game is loaded.
    pub fn resume(&mut self) {
        if self.current.is_some() {
            self.frame_loop.start(&mut self.source);
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn current_kind(&self) -> Option<GameKind> {
        self.current.as_ref().map(|g| g.kind())
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(game) = self.current.as_mut() {
            game.resize(viewport);
        }
    }

    pub fn pause(&mut self) {
        if let Some(game) = self.current.as_mut() {
            game.pause();
        }
    }

    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    /// Host frame callback
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameStats {
        match self.current.as_mut() {
            Some(game) => self
                .frame_loop
                .on_frame(timestamp_ms, game.as_mut(), &mut self.source),
            None => FrameStats::default(),
        }
    }
}
