//! The side-scrolling platformer as a loop-driven game

use std::cell::RefCell;
use std::rc::Rc;

use crate::Viewport;
use crate::platform::{Frame, InputState};
use crate::renderer::{Surface, draw_world};
use crate::sim::{GameEvent, GameState, tick};

/// Session state, the shared input snapshot and the surface it draws to
pub struct Platformer<S: Surface> {
    state: GameState,
    input: Rc<RefCell<InputState>>,
    surface: S,
}

impl<S: Surface> Platformer<S> {
    pub fn new(state: GameState, input: Rc<RefCell<InputState>>, surface: S) -> Self {
        log::info!(
            "Platformer ready: level {} ({} platforms, {} enemies, {} coins)",
            state.layout.number,
            state.platforms.len(),
            state.enemies.len(),
            state.coins.len()
        );
        Self {
            state,
            input,
            surface,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Shared handle the host's event listeners write to
    pub fn input(&self) -> Rc<RefCell<InputState>> {
        Rc::clone(&self.input)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport.width, viewport.height);
        self.state.resize(viewport);
    }

    /// Auto-pause (tab hidden, focus lost)
    pub fn pause(&mut self) {
        self.input.borrow_mut().release_all();
        self.state.pause();
        self.report();
    }

    fn report(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
                GameEvent::Restarted => log::info!("Session restarted"),
                GameEvent::LifeLost { lives_left } => {
                    log::info!("Life lost, {} remaining", lives_left)
                }
                other => log::debug!("{:?}", other),
            }
        }
    }
}

impl<S: Surface> Frame for Platformer<S> {
    fn update(&mut self, dt: f32) {
        let input = self.input.borrow().snapshot();
        tick(&mut self.state, &input, dt);
        self.input.borrow_mut().clear_triggers();
        self.report();
    }

    fn draw(&mut self) {
        draw_world(&self.state, &mut self.surface);
    }
}
