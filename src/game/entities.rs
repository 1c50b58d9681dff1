//! # Entity Data
//!
//! Creatures, their moves, and the player avatar.

use crate::{Direction, Position, TallgrassError, TallgrassResult};
use serde::{Deserialize, Serialize};

/// Reference to an image drawn by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Asset path
    pub src: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Sprite {
    /// Creates a sprite reference.
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }

    /// Default 64x64 battle sprite for a species name.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::Sprite;
    ///
    /// let sprite = Sprite::for_species("Squirtle");
    /// assert_eq!(sprite.src, "/assets/sprites/squirtle.png");
    /// ```
    pub fn for_species(name: &str) -> Self {
        Self::new(
            format!("/assets/sprites/{}.png", name.to_lowercase()),
            64,
            64,
        )
    }
}

/// A move a creature can use in battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    /// Elemental type label; no effectiveness chart consults it
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u32,
    /// Hit chance in percent (0-100)
    pub accuracy: u32,
}

impl Move {
    /// Creates a move.
    pub fn new(name: impl Into<String>, move_type: impl Into<String>, power: u32, accuracy: u32) -> Self {
        Self {
            name: name.into(),
            move_type: move_type.into(),
            power,
            accuracy,
        }
    }

    /// The basic 40-power normal move every wild creature knows.
    pub fn tackle() -> Self {
        Self::new("Tackle", "normal", 40, 100)
    }
}

/// A creature that can battle and be collected.
///
/// Invariants, checked by [`Creature::validate`]: level, attack, defense,
/// speed and max hp are at least 1, `hp <= max_hp`, and the creature knows at
/// least one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub types: Vec<String>,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub moves: Vec<Move>,
    pub sprite: Sprite,
}

impl Creature {
    /// Checks the stat invariants of this creature.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::Creature;
    ///
    /// let mut bulbasaur = Creature::starter();
    /// assert!(bulbasaur.validate().is_ok());
    ///
    /// bulbasaur.defense = 0;
    /// assert!(bulbasaur.validate().is_err());
    /// ```
    pub fn validate(&self) -> TallgrassResult<()> {
        let positive = [
            ("level", self.level),
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
            ("maxHp", self.max_hp),
        ];
        for (stat, value) in positive {
            if value == 0 {
                return Err(TallgrassError::InvalidCreature(format!(
                    "{} has {} 0",
                    self.name, stat
                )));
            }
        }

        if self.hp > self.max_hp {
            return Err(TallgrassError::InvalidCreature(format!(
                "{} has hp {} above max {}",
                self.name, self.hp, self.max_hp
            )));
        }

        if self.moves.is_empty() {
            return Err(TallgrassError::InvalidCreature(format!(
                "{} knows no moves",
                self.name
            )));
        }

        if let Some(bad) = self.moves.iter().find(|m| m.accuracy > 100) {
            return Err(TallgrassError::InvalidCreature(format!(
                "{} has accuracy {} above 100",
                bad.name, bad.accuracy
            )));
        }

        Ok(())
    }

    /// The level 5 Bulbasaur every new game starts with.
    pub fn starter() -> Self {
        Self {
            id: 1,
            name: "Bulbasaur".to_string(),
            level: 5,
            types: vec!["grass".to_string(), "poison".to_string()],
            hp: 20,
            max_hp: 20,
            attack: 10,
            defense: 10,
            speed: 10,
            moves: vec![Move::tackle(), Move::new("Vine Whip", "grass", 45, 100)],
            sprite: Sprite::for_species("Bulbasaur"),
        }
    }

    /// Subtracts damage, saturating at zero. Returns the remaining hp.
    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }

    /// Whether this creature has fainted.
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Restores hp to the maximum.
    pub fn heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Remaining hp as a fraction of max hp, for health bars.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }
}

/// The player avatar walking the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub position: Position,
    pub direction: Direction,
    pub sprite: Sprite,
    /// Set for a short while after each step; cosmetic only
    pub is_moving: bool,
}

impl Player {
    /// Creates a player standing still at `position`.
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            sprite: Sprite::new("/assets/sprites/player.png", 32, 32),
            is_moving: false,
        }
    }
}
