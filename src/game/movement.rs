//! # Movement Engine
//!
//! One-tile steps on the grid and the encounter roll that follows each step.
//!
//! The engine never checks whether a battle is running; the input handler
//! decides when walking is allowed.

use crate::{Dice, Direction, GameMap, Player, Position};
use log::trace;

/// What a step did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The target tile is blocked; only the facing direction changed
    Blocked { at: Position },
    /// The player stands on `to` (which equals `from` when pushing into the map edge)
    Moved { from: Position, to: Position },
}

/// The tile a step in `direction` from `from` would land on, clamped to the map.
///
/// # Examples
///
/// ```
/// use tallgrass::{step_target, Direction, GameMap, Position};
///
/// let map = GameMap::new(20, 15);
/// assert_eq!(step_target(&map, Position::new(0, 3), Direction::Left), Position::new(0, 3));
/// assert_eq!(step_target(&map, Position::new(0, 3), Direction::Right), Position::new(1, 3));
/// ```
pub fn step_target(map: &GameMap, from: Position, direction: Direction) -> Position {
    map.clamp(from + direction.to_delta())
}

/// Moves `player` one tile in `direction`.
///
/// A blocked target leaves the position alone but still turns the player.
/// A committed step sets the walking flag; the caller clears it later.
pub fn step_player(player: &mut Player, map: &GameMap, direction: Direction) -> StepOutcome {
    let from = player.position;
    let target = step_target(map, from, direction);
    player.direction = direction;

    if !map.is_walkable(target) {
        trace!("step {:?} from {:?} blocked at {:?}", direction, from, target);
        return StepOutcome::Blocked { at: target };
    }

    player.position = target;
    player.is_moving = true;
    StepOutcome::Moved { from, to: target }
}

/// Rolls for an encounter at `pos`.
///
/// Each zone containing `pos` gets one percent draw, in map order; the first
/// zone whose draw falls below its rate wins and no further zones are rolled.
pub fn roll_encounter(map: &GameMap, pos: Position, dice: &mut dyn Dice) -> Option<usize> {
    for index in map.zones_at(pos) {
        let zone = &map.encounter_zones[index];
        let roll = dice.percent();
        trace!("zone {} encounter roll {:.2} against {}", index, roll, zone.encounter_rate);
        if roll < zone.encounter_rate as f64 {
            return Some(index);
        }
    }
    None
}
