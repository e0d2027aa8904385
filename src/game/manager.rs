//! Game lifecycle
//!
//! One `GameManager` is built at startup and owned by the main loop; there
//! is no global instance.

use super::input::{InputState, Key};

/// What the main loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameControl {
    Continue,
    Quit,
}

pub struct GameManager {
    escape_exits_application: bool,
    running: bool,
    frame: u64,
}

impl GameManager {
    pub fn new(escape_exits_application: bool) -> Self {
        log::debug!("GameManager created (escape exits: {})", escape_exits_application);
        GameManager {
            escape_exits_application,
            running: true,
            frame: 0,
        }
    }

    /// Per-frame update
    pub fn update(&mut self, input: &impl InputState) -> GameControl {
        self.frame += 1;

        if self.escape_exits_application && input.is_key_held(Key::Escape) {
            log::info!("Escape held, quitting");
            self.running = false;
        }

        if self.running {
            GameControl::Continue
        } else {
            GameControl::Quit
        }
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames updated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::KeySet;

    #[test]
    fn test_escape_quits_when_enabled() {
        let mut game = GameManager::new(true);
        let mut keys = KeySet::new();
        assert_eq!(game.update(&keys), GameControl::Continue);

        keys.press(Key::Escape);
        assert_eq!(game.update(&keys), GameControl::Quit);
        assert!(!game.is_running());
    }

    #[test]
    fn test_escape_ignored_when_disabled() {
        let mut game = GameManager::new(false);
        let mut keys = KeySet::new();
        keys.press(Key::Escape);

        assert_eq!(game.update(&keys), GameControl::Continue);
        assert!(game.is_running());
    }

    #[test]
    fn test_request_quit() {
        let mut game = GameManager::new(false);
        game.request_quit();
        assert_eq!(game.update(&KeySet::new()), GameControl::Quit);
        assert_eq!(game.frame(), 1);
    }
}
