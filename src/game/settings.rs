//! # Game Configuration
//!
//! Everything a new game is built from: the map, where the player starts, the
//! starting roster, battle pacing and battle odds. Loadable from JSON.

use crate::{config, Creature, Direction, GameMap, Position, TallgrassError, TallgrassResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Delays of the timed battle continuations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleTimings {
    pub movement_animation_ms: u64,
    pub opponent_turn_ms: u64,
    pub faint_announce_ms: u64,
    pub end_after_faint_ms: u64,
    pub end_after_catch_ms: u64,
    pub end_after_escape_ms: u64,
}

impl Default for BattleTimings {
    fn default() -> Self {
        Self {
            movement_animation_ms: config::MOVEMENT_ANIMATION_MS,
            opponent_turn_ms: config::OPPONENT_TURN_MS,
            faint_announce_ms: config::FAINT_ANNOUNCE_MS,
            end_after_faint_ms: config::END_AFTER_FAINT_MS,
            end_after_catch_ms: config::END_AFTER_CATCH_MS,
            end_after_escape_ms: config::END_AFTER_ESCAPE_MS,
        }
    }
}

/// Odds used by the battle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleRules {
    /// A catch succeeds when the percent draw is below this
    pub catch_threshold: u32,
    /// An escape succeeds when the percent draw is below this
    pub flee_threshold: u32,
    /// Roll each strike against the move's accuracy before dealing damage
    pub honor_accuracy: bool,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            catch_threshold: config::DEFAULT_CATCH_THRESHOLD,
            flee_threshold: config::DEFAULT_FLEE_THRESHOLD,
            honor_accuracy: false,
        }
    }
}

/// Where wild creatures come from when a zone has no pool of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WildSource {
    /// The three starter species at levels 1 to 5
    #[default]
    Starters,
    /// Level-scaled creatures rolled from the creature dex
    Dex,
}

/// Complete configuration for a new game.
///
/// # Examples
///
/// ```
/// use tallgrass::GameConfig;
///
/// let config = GameConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.roster[0].name, "Bulbasaur");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Seed for the store's dice; `None` picks one at startup
    pub seed: Option<u64>,
    pub map: GameMap,
    pub player_start: Position,
    pub player_direction: Direction,
    pub roster: Vec<Creature>,
    pub timings: BattleTimings,
    pub rules: BattleRules,
    pub wild_source: WildSource,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            map: GameMap::default(),
            player_start: Position::new(5, 5),
            player_direction: Direction::Down,
            roster: vec![Creature::starter()],
            timings: BattleTimings::default(),
            rules: BattleRules::default(),
            wild_source: WildSource::default(),
        }
    }
}

impl GameConfig {
    /// Creates a configuration for testing: a small open map without zones.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            map: GameMap::new(10, 10),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> TallgrassResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> TallgrassResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> TallgrassResult<String> {
        serde_json::to_string_pretty(self).map_err(TallgrassError::from)
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> TallgrassResult<()> {
        self.map.validate()?;

        if !self.map.in_bounds(self.player_start) {
            return Err(TallgrassError::InvalidConfig(format!(
                "player start {:?} is off the map",
                self.player_start
            )));
        }

        for creature in &self.roster {
            creature.validate()?;
        }

        if self.rules.catch_threshold > 100 || self.rules.flee_threshold > 100 {
            return Err(TallgrassError::InvalidConfig(
                "battle thresholds are percentages and must not exceed 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_new_game() {
        let config = GameConfig::default();
        assert_eq!(config.player_start, Position::new(5, 5));
        assert_eq!(config.player_direction, Direction::Down);
        assert_eq!(config.map.encounter_zones[0].encounter_rate, 10);
        assert_eq!(config.rules.catch_threshold, 30);
        assert_eq!(config.rules.flee_threshold, 80);
        assert_eq!(config.timings.opponent_turn_ms, 1500);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"seed": 9, "rules": {"catchThreshold": 100}}"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rules.catch_threshold, 100);
        assert_eq!(config.rules.flee_threshold, 80);
        assert_eq!(config.map.width, 20);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::for_testing(3);
        let parsed = GameConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_off_map_start() {
        let mut config = GameConfig::for_testing(1);
        config.player_start = Position::new(10, 0);
        assert!(matches!(config.validate(), Err(TallgrassError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_defense_roster() {
        let mut config = GameConfig::default();
        config.roster[0].defense = 0;
        assert!(matches!(config.validate(), Err(TallgrassError::InvalidCreature(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"playerStart": {{"x": 1, "y": 2}}, "wildSource": "dex"}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.player_start, Position::new(1, 2));
        assert_eq!(config.wild_source, WildSource::Dex);
    }

    #[test]
    fn test_load_reports_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(GameConfig::load(file.path()), Err(TallgrassError::Serde(_))));
    }
}
