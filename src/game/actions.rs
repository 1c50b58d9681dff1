//! # Action System
//!
//! The closed set of actions the store accepts, and what became of each.

use crate::{Creature, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every way the outside world can change the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Walk one tile
    Move(Direction),
    /// Start a battle against this wild creature
    StartBattle(Creature),
    /// Force the current battle to end
    EndBattle,
    /// Use the player creature's move in this slot
    Attack(usize),
    /// Throw a ball at the wild creature
    Catch,
    /// Try to run away
    Run,
    /// Restore every roster creature to full hp
    HealAll,
    /// Freeze or unfreeze the game clock
    SetPaused(bool),
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The state changed
    Applied,
    /// The action was not valid in the current state; nothing changed
    Ignored(IgnoreReason),
}

impl ActionOutcome {
    /// Whether the action changed the state.
    pub fn is_applied(self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

/// Why an action was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    NotInBattle,
    MissingCombatant,
    NotPlayerTurn,
    NoSuchMove(usize),
    BattleDecided,
    EmptyRoster,
    InvalidCreature,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NotInBattle => write!(f, "not in battle"),
            IgnoreReason::MissingCombatant => write!(f, "a combatant is missing"),
            IgnoreReason::NotPlayerTurn => write!(f, "not the player's turn"),
            IgnoreReason::NoSuchMove(index) => write!(f, "no move in slot {}", index),
            IgnoreReason::BattleDecided => write!(f, "the battle is already decided"),
            IgnoreReason::EmptyRoster => write!(f, "the roster is empty"),
            IgnoreReason::InvalidCreature => write!(f, "the creature has invalid stats"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_applied() {
        assert!(ActionOutcome::Applied.is_applied());
        assert!(!ActionOutcome::Ignored(IgnoreReason::NotInBattle).is_applied());
    }

    #[test]
    fn test_ignore_reason_display() {
        assert_eq!(IgnoreReason::NoSuchMove(3).to_string(), "no move in slot 3");
    }
}
