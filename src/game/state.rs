//! # Game State Module
//!
//! The plain data the store owns and the renderer reads.
//!
//! `GameState` has no behaviour of its own beyond queries; every change is
//! made by the [`GameStore`](crate::GameStore). Between two store operations
//! the state is always consistent, so a `&GameState` handed to the renderer
//! is a complete snapshot for one paint.

use crate::{
    Battle, BattleId, BattleOutcome, Creature, Direction, GameConfig, GameMap, Player, Position,
    Side,
};
use serde::Serialize;

/// Item kinds. None exist yet; the inventory is reserved for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Item {}

/// The player's bag. Always empty until item kinds exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Something that happened, reported to the UI and to statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    PlayerBumped {
        at: Position,
        direction: Direction,
    },
    EncounterTriggered {
        zone: usize,
        species: String,
        level: u32,
    },
    BattleStarted {
        battle: BattleId,
        wild: String,
    },
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
        damage: u32,
    },
    MoveMissed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    CreatureFainted {
        side: Side,
        name: String,
    },
    CatchSucceeded {
        name: String,
    },
    CatchFailed {
        name: String,
    },
    EscapeSucceeded,
    EscapeFailed,
    /// `outcome` is `None` when the battle was ended by force
    BattleEnded {
        battle: BattleId,
        outcome: Option<BattleOutcome>,
    },
    RosterHealed {
        count: usize,
    },
    PauseChanged {
        paused: bool,
    },
}

/// Counters describing the player's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStatistics {
    /// Tiles walked
    pub steps_taken: u64,
    /// Pushes against blocked tiles
    pub bumps: u64,
    /// Encounters triggered by walking
    pub encounters: u32,
    /// Battles won by fainting the wild creature
    pub battles_won: u32,
    /// Battles lost by fainting
    pub battles_lost: u32,
    /// Wild creatures caught
    pub creatures_caught: u32,
    /// Successful escapes
    pub escapes: u32,
    /// Total damage dealt by the player's creatures
    pub damage_dealt: u64,
    /// Total damage taken by the player's creatures
    pub damage_taken: u64,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::PlayerBumped { .. } => {
                self.bumps += 1;
            }
            GameEvent::EncounterTriggered { .. } => {
                self.encounters += 1;
            }
            GameEvent::MoveUsed { side, damage, .. } => match side {
                Side::Player => self.damage_dealt += *damage as u64,
                Side::Wild => self.damage_taken += *damage as u64,
            },
            GameEvent::CreatureFainted { side, .. } => match side {
                Side::Wild => self.battles_won += 1,
                Side::Player => self.battles_lost += 1,
            },
            GameEvent::CatchSucceeded { .. } => {
                self.creatures_caught += 1;
            }
            GameEvent::EscapeSucceeded => {
                self.escapes += 1;
            }
            _ => {}
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: Player,
    pub map: GameMap,
    pub battle: Battle,
    /// Creatures the player owns; the first one leads in battle
    pub roster: Vec<Creature>,
    pub inventory: Inventory,
    pub is_loading: bool,
    pub is_paused: bool,
    pub statistics: GameStatistics,
}

impl GameState {
    /// Builds the initial state described by `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::{GameConfig, GameState, Position};
    ///
    /// let state = GameState::from_config(&GameConfig::default());
    /// assert_eq!(state.player.position, Position::new(5, 5));
    /// assert!(!state.in_battle());
    /// ```
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config.player_start, config.player_direction),
            map: config.map.clone(),
            battle: Battle::inactive(),
            roster: config.roster.clone(),
            inventory: Inventory::default(),
            is_loading: false,
            is_paused: false,
            statistics: GameStatistics::new(),
        }
    }

    /// Whether a battle is active.
    pub fn in_battle(&self) -> bool {
        self.battle.in_battle
    }

    /// Serializes the state as JSON, for debugging and external viewers.
    pub fn to_json(&self) -> crate::TallgrassResult<String> {
        serde_json::to_string_pretty(self).map_err(crate::TallgrassError::from)
    }
}
