//! # Player Commands
//!
//! What the player asked for, and which store action (if any) it becomes in
//! the current state.

use crate::{Direction, GameAction, GameState, Turn};

/// Player input types produced by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Walk one tile
    Move(Direction),
    /// Use the move in this slot
    Attack(usize),
    /// Throw a ball
    Catch,
    /// Run from the battle
    Run,
    /// Heal every roster creature
    Heal,
    /// Pause or resume
    TogglePause,
    /// Show the controls
    Help,
    /// Quit the game
    Quit,
}

/// Converts player input to a store action.
///
/// Walking is disabled during battles and while paused. Battle commands are
/// only offered on the player's turn, matching what the battle screen shows.
/// `Help` and `Quit` never reach the store.
///
/// # Examples
///
/// ```
/// use tallgrass::{input_to_action, Direction, GameAction, GameConfig, GameState, PlayerInput};
///
/// let state = GameState::from_config(&GameConfig::default());
/// assert_eq!(
///     input_to_action(PlayerInput::Move(Direction::Up), &state),
///     Some(GameAction::Move(Direction::Up))
/// );
/// assert_eq!(input_to_action(PlayerInput::Catch, &state), None);
/// ```
pub fn input_to_action(input: PlayerInput, state: &GameState) -> Option<GameAction> {
    let choosing = state.in_battle() && state.battle.turn == Turn::Player && !state.is_paused;

    match input {
        PlayerInput::Move(direction) => {
            if state.in_battle() || state.is_paused {
                return None;
            }
            Some(GameAction::Move(direction))
        }
        PlayerInput::Attack(slot) => choosing.then_some(GameAction::Attack(slot)),
        PlayerInput::Catch => choosing.then_some(GameAction::Catch),
        PlayerInput::Run => choosing.then_some(GameAction::Run),
        PlayerInput::Heal => (!state.is_paused).then_some(GameAction::HealAll),
        PlayerInput::TogglePause => Some(GameAction::SetPaused(!state.is_paused)),
        PlayerInput::Help | PlayerInput::Quit => None,
    }
}
