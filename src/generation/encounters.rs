//! # Encounter Generation
//!
//! The starter-species generator and zone pool selection.

use crate::{Creature, Dice, EncounterZone, Move, Sprite, TallgrassResult, WildCreatureGenerator};
use log::debug;

/// Species the starter generator can roll: dex id, name, type.
const STARTER_SPECIES: [(u32, &str, &str); 3] = [
    (1, "Bulbasaur", "grass"),
    (4, "Charmander", "fire"),
    (7, "Squirtle", "water"),
];

/// Rolls one of the three starter species at a low level.
///
/// Stats are flat (20 hp, 10 attack, defense and speed) and the only move is
/// Tackle. Id, name, type and sprite all follow from one species draw.
///
/// # Examples
///
/// ```
/// use tallgrass::{SeededDice, StarterGenerator, WildCreatureGenerator};
///
/// let mut dice = SeededDice::new(1);
/// let wild = StarterGenerator::new().generate(&mut dice).unwrap();
/// assert!((1..=5).contains(&wild.level));
/// assert_eq!(wild.moves[0].name, "Tackle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterGenerator {
    pub min_level: u32,
    pub max_level: u32,
}

impl StarterGenerator {
    /// Generator for levels 1 to 5.
    pub fn new() -> Self {
        Self {
            min_level: 1,
            max_level: 5,
        }
    }
}

impl Default for StarterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WildCreatureGenerator for StarterGenerator {
    fn generate(&self, dice: &mut dyn Dice) -> TallgrassResult<Creature> {
        let (id, name, kind) = STARTER_SPECIES[dice.index(STARTER_SPECIES.len())];
        let level = dice.range_inclusive(self.min_level, self.max_level);

        let creature = Creature {
            id,
            name: name.to_string(),
            level,
            types: vec![kind.to_string()],
            hp: 20,
            max_hp: 20,
            attack: 10,
            defense: 10,
            speed: 10,
            moves: vec![Move::tackle()],
            sprite: Sprite::for_species(name),
        };
        self.validate(&creature)?;
        Ok(creature)
    }

    fn generator_type(&self) -> &'static str {
        "StarterGenerator"
    }
}

/// Picks the wild creature for an encounter in `zone`.
///
/// A zone with a pool hands out a uniformly chosen copy from it; an empty pool
/// defers to `generator`.
pub fn wild_for_zone(
    zone: &EncounterZone,
    generator: &dyn WildCreatureGenerator,
    dice: &mut dyn Dice,
) -> TallgrassResult<Creature> {
    if zone.pool.is_empty() {
        let creature = generator.generate(dice)?;
        debug!("{} rolled {} lv {}", generator.generator_type(), creature.name, creature.level);
        return Ok(creature);
    }

    let creature = zone.pool[dice.index(zone.pool.len())].clone();
    debug!("zone pool supplied {} lv {}", creature.name, creature.level);
    Ok(creature)
}
