//! # Game Module
//!
//! Core game state management, world representation and the two engines that
//! mutate it.
//!
//! This module contains the fundamental building blocks of Tallgrass:
//! - Creature, move and player data
//! - The tile map and its encounter zones
//! - The movement and battle engines, plus one-shot battle simulation
//! - The scheduler that sequences timed battle continuations
//! - The game store, the only writer of the game state

pub mod actions;
pub mod battle;
pub mod entities;
pub mod movement;
pub mod scheduler;
pub mod settings;
pub mod simulation;
pub mod state;
pub mod store;
pub mod world;

pub use actions::*;
pub use battle::*;
pub use entities::*;
pub use movement::*;
pub use scheduler::*;
pub use settings::*;
pub use simulation::*;
pub use state::*;
pub use store::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate on the tile grid.
///
/// # Examples
///
/// ```
/// use tallgrass::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Facing direction of the player avatar.
///
/// A direction is pure orientation: pushing against a wall still turns the
/// player to face it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a one-tile position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }
}

/// Unique identifier for one battle.
///
/// Scheduled continuations carry the id of the battle that created them so
/// that a continuation outliving its battle is discarded.
pub type BattleId = Uuid;

/// Creates a new unique battle ID.
pub fn new_battle_id() -> BattleId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
        assert_eq!(Position::origin(), Position::new(0, 0));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos = Position::new(5, 10);
        assert_eq!(pos + Direction::Left.to_delta(), Position::new(4, 10));
        assert_eq!(pos + Direction::Down.to_delta(), Position::new(5, 11));
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Down).unwrap();
        assert_eq!(json, "\"down\"");
    }

    #[test]
    fn test_battle_id_uniqueness() {
        assert_ne!(new_battle_id(), new_battle_id());
    }
}
