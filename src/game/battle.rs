//! # Battle Engine
//!
//! Turn-based battle state machine between the player's lead creature and a
//! wild creature.
//!
//! ```text
//!            start
//!   Idle ─────────────▶ PlayerTurn ◀──────────────────────┐
//!                        │  │  │                          │
//!          attack (faint)│  │  │attack / failed catch/run │opponent strikes
//!                        ▼  │  ▼                          │
//!     ResolvingPlayerMove   │  OpponentTurn ──────────────┘
//!                        │  │  │ opponent strikes (faint)
//!                        │  │  ▼
//!                        │  │ ResolvingOpponentMove
//!        faint announced │  │  │ faint announced
//!                        ▼  ▼  ▼
//!                      Concluding(outcome) ──end──▶ Idle
//! ```
//!
//! Synchronous effects of an action are applied immediately. Everything that
//! happens "a moment later" is a [`Continuation`] on the store's scheduler,
//! tagged with the battle id so it cannot leak into a later battle.

use crate::{
    new_battle_id, ActionOutcome, BattleId, BattleRules, BattleTimings, Continuation, Creature,
    Dice, GameEvent, IgnoreReason, Move, Scheduler,
};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One side of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Wild,
}

/// Whose side may currently act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Opponent,
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The wild creature fainted
    Victory,
    /// The player's creature fainted
    Defeat,
    /// The wild creature joined the roster
    Caught,
    /// The player ran away
    Fled,
}

/// Explicit state of the battle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// No battle
    Idle,
    /// Waiting for the player to choose an action
    PlayerTurn,
    /// The player's strike fainted the wild creature; faint not yet announced
    ResolvingPlayerMove,
    /// The wild creature's retaliation is scheduled
    OpponentTurn,
    /// The wild creature's strike fainted the player's creature; faint not yet announced
    ResolvingOpponentMove,
    /// The outcome is on screen; the battle ends after the display delay
    Concluding(BattleOutcome),
}

impl BattlePhase {
    /// Whether the battle can still go either way.
    pub fn is_undecided(self) -> bool {
        matches!(self, BattlePhase::PlayerTurn | BattlePhase::OpponentTurn)
    }
}

/// The battle part of the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: Option<BattleId>,
    pub in_battle: bool,
    /// Copy of the roster's lead creature; damage to it is not written back
    pub player_creature: Option<Creature>,
    pub wild_creature: Option<Creature>,
    pub turn: Turn,
    pub phase: BattlePhase,
    pub message: String,
}

impl Battle {
    /// The inactive battle.
    pub fn inactive() -> Self {
        Self {
            id: None,
            in_battle: false,
            player_creature: None,
            wild_creature: None,
            turn: Turn::Player,
            phase: BattlePhase::Idle,
            message: String::new(),
        }
    }

    fn begin(id: BattleId, player: Creature, wild: Creature) -> Self {
        let message = format!("A wild {} appeared!", wild.name);
        Self {
            id: Some(id),
            in_battle: true,
            player_creature: Some(player),
            wild_creature: Some(wild),
            turn: Turn::Player,
            phase: BattlePhase::PlayerTurn,
            message,
        }
    }

    /// The creature fighting for `side`.
    pub fn creature(&self, side: Side) -> Option<&Creature> {
        match side {
            Side::Player => self.player_creature.as_ref(),
            Side::Wild => self.wild_creature.as_ref(),
        }
    }

    /// The outcome, once decided.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Concluding(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl Default for Battle {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Damage dealt by an attacker of `level` and `attack` with a move of `power`
/// against `defense`:
///
/// `floor((level * 0.4 + 2) * power * (attack / defense) / 50 + 2)`
///
/// A defense of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use tallgrass::compute_damage;
///
/// // Level 5, attack 10, Tackle (40) against defense 10.
/// assert_eq!(compute_damage(5, 10, 10, 40), 5);
/// ```
pub fn compute_damage(level: u32, attack: u32, defense: u32, power: u32) -> u32 {
    let defense = defense.max(1) as f64;
    let raw = (level as f64 * 0.4 + 2.0) * power as f64 * (attack as f64 / defense) / 50.0 + 2.0;
    raw.floor().max(0.0) as u32
}

/// Damage `attacker` deals to `defender` with `mv`.
pub fn damage_between(attacker: &Creature, defender: &Creature, mv: &Move) -> u32 {
    compute_damage(attacker.level, attacker.attack, defender.defense, mv.power)
}

/// Result of one strike.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Strike {
    Hit {
        attacker: String,
        move_name: String,
        damage: u32,
        fainted: bool,
    },
    Missed {
        attacker: String,
        move_name: String,
    },
}

/// Borrowed view of everything the battle engine touches.
///
/// Built by the store for the duration of one action or continuation.
pub struct BattleEngine<'a> {
    pub battle: &'a mut Battle,
    pub roster: &'a mut Vec<Creature>,
    pub dice: &'a mut dyn Dice,
    pub scheduler: &'a mut Scheduler,
    pub timings: &'a BattleTimings,
    pub rules: &'a BattleRules,
    pub events: &'a mut Vec<GameEvent>,
}

impl BattleEngine<'_> {
    /// Starts a battle against `wild` with the roster's lead creature.
    pub fn start(&mut self, wild: Creature) -> ActionOutcome {
        if wild.validate().is_err() {
            return ActionOutcome::Ignored(IgnoreReason::InvalidCreature);
        }
        let Some(lead) = self.roster.first().cloned() else {
            return ActionOutcome::Ignored(IgnoreReason::EmptyRoster);
        };

        if let Some(previous) = self.battle.id {
            self.scheduler.cancel_battle(previous);
        }

        let id = new_battle_id();
        info!("battle {} started: {} vs wild {} (lv {})", id, lead.name, wild.name, wild.level);
        self.events.push(GameEvent::BattleStarted {
            battle: id,
            wild: wild.name.clone(),
        });
        *self.battle = Battle::begin(id, lead, wild);
        ActionOutcome::Applied
    }

    /// The player's creature uses the move in slot `move_index`.
    pub fn attack(&mut self, move_index: usize) -> ActionOutcome {
        if let Err(reason) = self.guard() {
            return ActionOutcome::Ignored(reason);
        }
        match self.battle.phase {
            BattlePhase::PlayerTurn => {}
            BattlePhase::OpponentTurn => return ActionOutcome::Ignored(IgnoreReason::NotPlayerTurn),
            _ => return ActionOutcome::Ignored(IgnoreReason::BattleDecided),
        }

        let Some(strike) = self.strike(Side::Player, move_index) else {
            return ActionOutcome::Ignored(IgnoreReason::NoSuchMove(move_index));
        };
        self.battle.turn = Turn::Opponent;
        let fainted = self.report(Side::Player, strike);

        let id = self.current_id();
        if fainted {
            self.battle.phase = BattlePhase::ResolvingPlayerMove;
            self.scheduler.schedule(
                self.timings.faint_announce_ms,
                Continuation::AnnounceFaint { battle: id, side: Side::Wild },
            );
        } else {
            self.battle.phase = BattlePhase::OpponentTurn;
            self.scheduler
                .schedule(self.timings.opponent_turn_ms, Continuation::OpponentTurn { battle: id });
        }
        ActionOutcome::Applied
    }

    /// Throws a ball at the wild creature.
    pub fn catch(&mut self) -> ActionOutcome {
        if let Err(reason) = self.guard_undecided() {
            return ActionOutcome::Ignored(reason);
        }
        let Some(wild) = self.battle.wild_creature.clone() else {
            return ActionOutcome::Ignored(IgnoreReason::MissingCombatant);
        };

        let roll = self.dice.percent();
        debug!("catch roll {:.2} against {}", roll, self.rules.catch_threshold);
        let id = self.current_id();

        if roll < self.rules.catch_threshold as f64 {
            info!("caught {} at {}/{} hp", wild.name, wild.hp, wild.max_hp);
            self.battle.message = format!("You caught {}!", wild.name);
            self.battle.phase = BattlePhase::Concluding(BattleOutcome::Caught);
            self.events.push(GameEvent::CatchSucceeded {
                name: wild.name.clone(),
            });
            self.roster.push(wild);
            self.scheduler
                .schedule(self.timings.end_after_catch_ms, Continuation::EndBattle { battle: id });
        } else {
            self.battle.message = format!("{} broke free!", wild.name);
            self.events.push(GameEvent::CatchFailed { name: wild.name });
            self.hand_to_opponent(id);
        }
        ActionOutcome::Applied
    }

    /// Tries to run from the battle.
    pub fn run(&mut self) -> ActionOutcome {
        if let Err(reason) = self.guard_undecided() {
            return ActionOutcome::Ignored(reason);
        }

        let roll = self.dice.percent();
        debug!("escape roll {:.2} against {}", roll, self.rules.flee_threshold);
        let id = self.current_id();

        if roll < self.rules.flee_threshold as f64 {
            self.battle.message = "Got away safely!".to_string();
            self.battle.phase = BattlePhase::Concluding(BattleOutcome::Fled);
            self.events.push(GameEvent::EscapeSucceeded);
            self.scheduler
                .schedule(self.timings.end_after_escape_ms, Continuation::EndBattle { battle: id });
        } else {
            self.battle.message = "Failed to run away!".to_string();
            self.events.push(GameEvent::EscapeFailed);
            self.hand_to_opponent(id);
        }
        ActionOutcome::Applied
    }

    /// Ends the current battle immediately, discarding its pending continuations.
    pub fn end(&mut self) -> ActionOutcome {
        if !self.battle.in_battle {
            return ActionOutcome::Ignored(IgnoreReason::NotInBattle);
        }
        self.finish();
        ActionOutcome::Applied
    }

    /// Runs a scheduled battle continuation.
    ///
    /// Returns `false` when the continuation is stale (its battle is over or
    /// was replaced) and was discarded.
    pub fn resume(&mut self, continuation: Continuation) -> bool {
        let Some(battle) = continuation.battle() else {
            return false;
        };
        if !self.battle.in_battle || self.battle.id != Some(battle) {
            trace!("discarding stale {:?}", continuation);
            return false;
        }

        match continuation {
            Continuation::OpponentTurn { .. } => self.opponent_turn(),
            Continuation::AnnounceFaint { side, .. } => self.announce_faint(side),
            Continuation::EndBattle { .. } => {
                self.finish();
                true
            }
            Continuation::ClearMoving { .. } => false,
        }
    }

    fn opponent_turn(&mut self) -> bool {
        if self.guard().is_err() || !self.battle.phase.is_undecided() {
            return false;
        }

        let moves = self
            .battle
            .wild_creature
            .as_ref()
            .map_or(0, |wild| wild.moves.len());
        let move_index = self.dice.index(moves);
        let id = self.current_id();
        self.battle.turn = Turn::Player;

        let Some(strike) = self.strike(Side::Wild, move_index) else {
            self.battle.phase = BattlePhase::PlayerTurn;
            return true;
        };

        if self.report(Side::Wild, strike) {
            self.battle.phase = BattlePhase::ResolvingOpponentMove;
            self.scheduler.schedule(
                self.timings.faint_announce_ms,
                Continuation::AnnounceFaint { battle: id, side: Side::Player },
            );
        } else {
            self.battle.phase = BattlePhase::PlayerTurn;
        }
        true
    }

    fn announce_faint(&mut self, side: Side) -> bool {
        let Some(name) = self.battle.creature(side).map(|c| c.name.clone()) else {
            return false;
        };
        let (outcome, message) = match side {
            Side::Wild => (BattleOutcome::Victory, format!("{} fainted! You won!", name)),
            Side::Player => (
                BattleOutcome::Defeat,
                format!("{} fainted! You lost the battle!", name),
            ),
        };

        self.battle.message = message;
        self.battle.phase = BattlePhase::Concluding(outcome);
        self.events.push(GameEvent::CreatureFainted { side, name });
        self.scheduler.schedule(
            self.timings.end_after_faint_ms,
            Continuation::EndBattle { battle: self.current_id() },
        );
        true
    }

    /// Resolves one strike by `side` with its move at `move_index`.
    ///
    /// Returns `None` if either combatant is missing or the move does not exist.
    fn strike(&mut self, side: Side, move_index: usize) -> Option<Strike> {
        let battle = &mut *self.battle;
        let (attacker, defender) = match side {
            Side::Player => (battle.player_creature.as_ref()?, battle.wild_creature.as_mut()?),
            Side::Wild => (battle.wild_creature.as_ref()?, battle.player_creature.as_mut()?),
        };
        let mv = attacker.moves.get(move_index)?;

        if self.rules.honor_accuracy {
            let roll = self.dice.percent();
            if roll >= mv.accuracy as f64 {
                return Some(Strike::Missed {
                    attacker: attacker.name.clone(),
                    move_name: mv.name.clone(),
                });
            }
        }

        let damage = damage_between(attacker, defender, mv);
        let remaining = defender.apply_damage(damage);
        debug!(
            "{} used {} on {} for {} ({} hp left)",
            attacker.name, mv.name, defender.name, damage, remaining
        );
        Some(Strike::Hit {
            attacker: attacker.name.clone(),
            move_name: mv.name.clone(),
            damage,
            fainted: remaining == 0,
        })
    }

    /// Writes the strike message and event. Returns whether the target fainted.
    fn report(&mut self, side: Side, strike: Strike) -> bool {
        match strike {
            Strike::Hit {
                attacker,
                move_name,
                damage,
                fainted,
            } => {
                self.battle.message = format!("{} used {}! It did {} damage!", attacker, move_name, damage);
                self.events.push(GameEvent::MoveUsed {
                    side,
                    attacker,
                    move_name,
                    damage,
                });
                fainted
            }
            Strike::Missed {
                attacker,
                move_name,
            } => {
                self.battle.message = format!("{}'s {} missed!", attacker, move_name);
                self.events.push(GameEvent::MoveMissed {
                    side,
                    attacker,
                    move_name,
                });
                false
            }
        }
    }

    /// After a failed catch or escape the wild creature gets a free strike.
    fn hand_to_opponent(&mut self, id: BattleId) {
        self.battle.turn = Turn::Opponent;
        self.battle.phase = BattlePhase::OpponentTurn;
        self.scheduler
            .schedule(self.timings.opponent_turn_ms, Continuation::OpponentTurn { battle: id });
    }

    fn finish(&mut self) {
        let outcome = self.battle.outcome();
        if let Some(id) = self.battle.id {
            self.scheduler.cancel_battle(id);
            info!("battle {} ended: {:?}", id, outcome);
            self.events.push(GameEvent::BattleEnded { battle: id, outcome });
        }
        *self.battle = Battle::inactive();
    }

    fn guard(&self) -> Result<(), IgnoreReason> {
        if !self.battle.in_battle {
            return Err(IgnoreReason::NotInBattle);
        }
        if self.battle.player_creature.is_none() || self.battle.wild_creature.is_none() {
            return Err(IgnoreReason::MissingCombatant);
        }
        Ok(())
    }

    fn guard_undecided(&self) -> Result<(), IgnoreReason> {
        self.guard()?;
        if !self.battle.phase.is_undecided() {
            return Err(IgnoreReason::BattleDecided);
        }
        Ok(())
    }

    fn current_id(&self) -> BattleId {
        // set by `start` for every active battle
        self.battle.id.unwrap_or_else(Uuid::nil)
    }
}
