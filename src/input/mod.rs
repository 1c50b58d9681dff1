//! # Input Module
//!
//! Keyboard polling and its translation into store actions.

pub mod commands;

pub use commands::*;

use crate::Direction;
use macroquad::prelude::*;

/// Keys for the four move slots, in slot order.
const SLOT_KEYS: [KeyCode; 4] = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];

/// Input handler for processing player commands.
///
/// Polls macroquad once per frame and reports at most one command.
pub struct InputHandler {
    /// Whether WASD moves as well as the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.wasd_enabled);
    /// ```
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Gets the command pressed this frame, if any.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }
        if is_key_pressed(KeyCode::F1) {
            return Some(PlayerInput::Help);
        }
        if is_key_pressed(KeyCode::P) {
            return Some(PlayerInput::TogglePause);
        }

        if let Some(direction) = self.pressed_direction() {
            return Some(PlayerInput::Move(direction));
        }

        if let Some(slot) = SLOT_KEYS.iter().position(|key| is_key_pressed(*key)) {
            return Some(PlayerInput::Attack(slot));
        }
        if is_key_pressed(KeyCode::C) {
            return Some(PlayerInput::Catch);
        }
        if is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::Run);
        }
        if is_key_pressed(KeyCode::H) {
            return Some(PlayerInput::Heal);
        }

        None
    }

    fn pressed_direction(&self) -> Option<Direction> {
        let mut bindings = vec![
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        if self.wasd_enabled {
            bindings.extend([
                (KeyCode::W, Direction::Up),
                (KeyCode::S, Direction::Down),
                (KeyCode::A, Direction::Left),
                (KeyCode::D, Direction::Right),
            ]);
        }

        bindings
            .into_iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, direction)| direction)
    }
}

/// One line per control, for the help overlay.
pub const HELP_LINES: [&str; 7] = [
    "Arrows/WASD: Move",
    "1-4: Use move",
    "C: Catch",
    "R: Run",
    "H: Heal party",
    "P: Pause",
    "ESC: Quit",
];
