//! # Generation Module
//!
//! Where wild creatures come from.
//!
//! A step that triggers an encounter asks the zone first: a zone with its own
//! pool hands out one of those creatures. Otherwise the store's
//! [`WildCreatureGenerator`] rolls one. Two generators ship with the game: the
//! three starter species, and level-scaled creatures from the creature dex.

pub mod dex;
pub mod encounters;

pub use dex::*;
pub use encounters::*;

use crate::{Creature, Dice, TallgrassResult};

/// Core trait for wild creature generators.
///
/// Generators are interchangeable: the engines only ever see the creature
/// they return.
pub trait WildCreatureGenerator {
    /// Rolls one wild creature.
    fn generate(&self, dice: &mut dyn Dice) -> TallgrassResult<Creature>;

    /// Validates a generated creature. The default checks its stat invariants.
    fn validate(&self, creature: &Creature) -> TallgrassResult<()> {
        creature.validate()
    }

    /// Name of this generator for logging.
    fn generator_type(&self) -> &'static str;
}
