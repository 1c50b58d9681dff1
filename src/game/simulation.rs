//! # Battle Simulation
//!
//! Automatic battles between two supplied creatures, resolved in one call.
//!
//! A simulation never touches the scheduler or the game state. The faster
//! creature strikes first in every round, with the player winning speed ties.
//! Each strike picks a random move and always rolls against its accuracy. A
//! damaging hit deals 85 to 100 percent of the usual damage, and zero-power
//! moves only print their name. The battle stops when a creature faints or
//! the round limit is reached.

use crate::{damage_between, Creature, Dice, Side};
use log::debug;
use serde::{Deserialize, Serialize};

/// Rounds simulated when a request names none, zero or a negative count.
pub const DEFAULT_SIMULATED_ROUNDS: u32 = 5;

/// Upper bound on simulated rounds.
pub const MAX_SIMULATED_ROUNDS: u32 = 100;

/// Percent range of the damage roll.
const DAMAGE_ROLL: (u32, u32) = (85, 100);

/// Body of a simulation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub player_creature: Option<Creature>,
    #[serde(default)]
    pub opponent_creature: Option<Creature>,
    #[serde(default)]
    pub rounds: i64,
}

impl SimulationRequest {
    /// The number of rounds to run.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::SimulationRequest;
    ///
    /// let mut request = SimulationRequest::default();
    /// assert_eq!(request.round_limit(), 5);
    /// request.rounds = -2;
    /// assert_eq!(request.round_limit(), 5);
    /// request.rounds = 12;
    /// assert_eq!(request.round_limit(), 12);
    /// request.rounds = i64::MAX;
    /// assert_eq!(request.round_limit(), 100);
    /// ```
    pub fn round_limit(&self) -> u32 {
        if self.rounds <= 0 {
            DEFAULT_SIMULATED_ROUNDS
        } else {
            self.rounds.min(MAX_SIMULATED_ROUNDS as i64) as u32
        }
    }
}

/// Who won a simulated battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationWinner {
    Player,
    Opponent,
    Draw,
}

/// Reply to a simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub winner: SimulationWinner,
    /// Rounds actually fought
    pub rounds: u32,
    pub battle_log: Vec<String>,
    pub player_hp: u32,
    pub opponent_hp: u32,
    /// The player's strike lines, in order
    pub player_moves: Vec<String>,
    /// The opponent's strike lines, in order
    pub opponent_moves: Vec<String>,
}

/// Fights up to `rounds` rounds between copies of `player` and `opponent`.
pub fn simulate_battle(
    player: &Creature,
    opponent: &Creature,
    rounds: u32,
    dice: &mut dyn Dice,
) -> SimulationResult {
    let mut player = player.clone();
    let mut opponent = opponent.clone();
    let mut result = SimulationResult {
        winner: SimulationWinner::Draw,
        rounds: 0,
        battle_log: vec![format!(
            "Battle started: {} (Lv.{}) vs {} (Lv.{})",
            player.name, player.level, opponent.name, opponent.level
        )],
        player_hp: 0,
        opponent_hp: 0,
        player_moves: Vec::new(),
        opponent_moves: Vec::new(),
    };

    let order = if player.speed >= opponent.speed {
        [Side::Player, Side::Wild]
    } else {
        [Side::Wild, Side::Player]
    };

    'rounds: while result.rounds < rounds && !player.is_fainted() && !opponent.is_fainted() {
        result.rounds += 1;
        result.battle_log.push(format!("Round {}:", result.rounds));

        for side in order {
            let (attacker, defender) = match side {
                Side::Player => (&player, &mut opponent),
                Side::Wild => (&opponent, &mut player),
            };
            let line = strike(attacker, defender, dice);
            result.battle_log.push(line.clone());
            match side {
                Side::Player => result.player_moves.push(line),
                Side::Wild => result.opponent_moves.push(line),
            }

            if defender.is_fainted() {
                result.battle_log.push(format!("{} fainted!", defender.name));
                break 'rounds;
            }
        }
    }

    result.winner = if player.is_fainted() {
        result.battle_log.push(format!("{} wins the battle!", opponent.name));
        SimulationWinner::Opponent
    } else if opponent.is_fainted() {
        result.battle_log.push(format!("{} wins the battle!", player.name));
        SimulationWinner::Player
    } else {
        result.battle_log.push("The battle ended in a draw!".to_string());
        SimulationWinner::Draw
    };
    result.player_hp = player.hp;
    result.opponent_hp = opponent.hp;

    debug!(
        "simulated {} vs {}: {:?} after {} rounds",
        player.name, opponent.name, result.winner, result.rounds
    );
    result
}

fn strike(attacker: &Creature, defender: &mut Creature, dice: &mut dyn Dice) -> String {
    let Some(mv) = attacker.moves.get(dice.index(attacker.moves.len())) else {
        return format!("{} has no moves!", attacker.name);
    };

    if dice.percent() >= mv.accuracy as f64 {
        return format!("{}'s {} missed!", attacker.name, mv.name);
    }
    if mv.power == 0 {
        return format!("{} used {}!", attacker.name, mv.name);
    }

    let roll = dice.range_inclusive(DAMAGE_ROLL.0, DAMAGE_ROLL.1);
    let damage = (damage_between(attacker, defender, mv) * roll / 100).max(1);
    let remaining = defender.apply_damage(damage);
    format!(
        "{} used {}! It did {} damage! {} HP: {}/{}",
        attacker.name, mv.name, damage, defender.name, remaining, defender.max_hp
    )
}
