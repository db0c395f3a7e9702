//! Keyboard/touch input state
//!
//! Event listeners write here as events arrive; the game reads one snapshot
//! per simulation step. Held keys are levels, pause/restart are one-shot
//! triggers that survive until a step consumes them.

use crate::sim::TickInput;

/// What a key does in the platformer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Jump,
    Pause,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(KeyAction::Left),
            "ArrowRight" | "d" | "D" => Some(KeyAction::Right),
            "ArrowUp" | " " | "w" | "W" => Some(KeyAction::Jump),
            "p" | "P" | "Escape" => Some(KeyAction::Pause),
            _ => None,
        }
    }
}

/// Latest input state shared between listeners and the game
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    pause: bool,
    restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any fresh key press also arms the restart trigger; it only matters on
    /// the game-over screen. Auto-repeat (`repeat == true`) never fires a
    /// one-shot trigger.
    pub fn key_down(&mut self, key: &str, repeat: bool) {
        if !repeat {
            self.restart = true;
        }
        match KeyAction::from_key(key) {
            Some(KeyAction::Left) => self.left = true,
            Some(KeyAction::Right) => self.right = true,
            Some(KeyAction::Jump) => self.up = true,
            Some(KeyAction::Pause) => self.pause |= !repeat,
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            Some(KeyAction::Jump) => self.up = false,
            Some(KeyAction::Pause) | None => {}
        }
    }

    /// Touch in the top half jumps; bottom half runs toward the touched side
    pub fn touch_start(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.restart = true;
        if y < height / 2.0 {
            self.up = true;
        } else if x < width / 2.0 {
            self.left = true;
            self.right = false;
        } else {
            self.right = true;
            self.left = false;
        }
    }

    pub fn touch_end(&mut self) {
        self.up = false;
        self.left = false;
        self.right = false;
    }

    /// Release every held key (focus loss swallows key-up events)
    pub fn release_all(&mut self) {
        self.touch_end();
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            pause: self.pause,
            restart: self.restart,
        }
    }

    /// Forget one-shot triggers after a step has seen them
    pub fn clear_triggers(&mut self) {
        self.pause = false;
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_levels() {
        let mut input = InputState::new();
        input.key_down("ArrowRight", false);
        input.key_down(" ", false);
        let snap = input.snapshot();
        assert!(snap.right && snap.up && !snap.left);

        input.key_up("ArrowRight");
        assert!(!input.snapshot().right);
        assert!(input.snapshot().up);
    }

    #[test]
    fn test_triggers_clear_after_step() {
        let mut input = InputState::new();
        input.key_down("p", false);
        assert!(input.snapshot().pause);
        assert!(input.snapshot().restart);

        input.clear_triggers();
        let snap = input.snapshot();
        assert!(!snap.pause && !snap.restart);

        // Releasing pause is not a second toggle
        input.key_up("p");
        assert!(!input.snapshot().pause);
    }

    #[test]
    fn test_auto_repeat_fires_no_triggers() {
        let mut input = InputState::new();
        input.key_down("ArrowRight", false);
        input.clear_triggers();

        input.key_down("ArrowRight", true);
        input.key_down("p", true);
        let snap = input.snapshot();
        assert!(snap.right);
        assert!(!snap.restart && !snap.pause);
    }

    #[test]
    fn test_touch_zones() {
        let mut input = InputState::new();
        input.touch_start(100.0, 100.0, 800.0, 600.0);
        assert!(input.snapshot().up);

        input.touch_end();
        input.touch_start(100.0, 500.0, 800.0, 600.0);
        assert!(input.snapshot().left);

        input.touch_start(700.0, 500.0, 800.0, 600.0);
        let snap = input.snapshot();
        assert!(snap.right && !snap.left);

        input.touch_end();
        assert_eq!(input.snapshot(), TickInput { restart: true, ..Default::default() });
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(KeyAction::from_key("q"), None);
        assert_eq!(KeyAction::from_key("Escape"), Some(KeyAction::Pause));
    }
}
