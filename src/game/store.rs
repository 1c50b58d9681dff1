//! # Game Store
//!
//! The single owner and writer of the game state.
//!
//! Every change goes through [`GameStore::dispatch`] (or the named action
//! method it forwards to) and through [`GameStore::advance`], which moves the
//! virtual clock and runs the continuations that fall due. Readers borrow
//! [`GameStore::state`] between calls and always see a consistent state.

use crate::{
    roll_encounter, step_player, wild_for_zone, ActionOutcome, BattleEngine, Continuation,
    Creature, DexGenerator, Dice, Direction, GameAction, GameConfig, GameEvent, GameState,
    GameStatistics, Position, Scheduler, SeededDice, StarterGenerator, StepOutcome,
    TallgrassResult, WildCreatureGenerator, WildSource,
};
use log::{debug, info, trace, warn};

/// State-owning store driving movement, battles and timed continuations.
pub struct GameStore {
    state: GameState,
    config: GameConfig,
    scheduler: Scheduler,
    dice: Box<dyn Dice>,
    generator: Box<dyn WildCreatureGenerator>,
    events: Vec<GameEvent>,
    /// Events at the front of `events` already folded into the statistics
    recorded: usize,
    /// Number of committed movement steps
    step: u64,
}

impl GameStore {
    /// Creates a store for `config` drawing from `dice`.
    ///
    /// The wild creature generator follows `config.wild_source`.
    pub fn new(config: GameConfig, dice: Box<dyn Dice>) -> TallgrassResult<Self> {
        let generator: Box<dyn WildCreatureGenerator> = match config.wild_source {
            WildSource::Starters => Box::new(StarterGenerator::new()),
            WildSource::Dex => Box::new(DexGenerator::new()),
        };
        Self::with_generator(config, dice, generator)
    }

    /// Creates a store with an explicit wild creature generator.
    pub fn with_generator(
        config: GameConfig,
        dice: Box<dyn Dice>,
        generator: Box<dyn WildCreatureGenerator>,
    ) -> TallgrassResult<Self> {
        config.validate()?;
        info!(
            "new game on a {}x{} map, {} zones, wild creatures from {}",
            config.map.width,
            config.map.height,
            config.map.encounter_zones.len(),
            generator.generator_type()
        );

        Ok(Self {
            state: GameState::from_config(&config),
            config,
            scheduler: Scheduler::new(),
            dice,
            generator,
            events: Vec::new(),
            recorded: 0,
            step: 0,
        })
    }

    /// Creates a store with seeded dice.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::{Direction, GameConfig, GameStore, Position};
    ///
    /// let mut store = GameStore::seeded(GameConfig::for_testing(7), 7).unwrap();
    /// store.move_player(Direction::Right);
    /// assert_eq!(store.state().player.position, Position::new(6, 5));
    /// assert!(store.state().player.is_moving);
    ///
    /// store.advance(200);
    /// assert!(!store.state().player.is_moving);
    /// ```
    pub fn seeded(config: GameConfig, seed: u64) -> TallgrassResult<Self> {
        Self::new(config, Box::new(SeededDice::new(seed)))
    }

    /// Creates a store seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: GameConfig) -> TallgrassResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("store seed {}", seed);
        Self::seeded(config, seed)
    }

    /// The current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The configuration the game was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Progress counters.
    pub fn statistics(&self) -> &GameStatistics {
        &self.state.statistics
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Number of continuations waiting to run.
    pub fn pending_continuations(&self) -> usize {
        self.scheduler.len()
    }

    /// Name of the generator used for zones without a pool.
    pub fn generator_type(&self) -> &'static str {
        self.generator.generator_type()
    }

    /// Applies `action` to the state.
    pub fn dispatch(&mut self, action: GameAction) -> ActionOutcome {
        debug!("dispatch {:?}", action);
        let outcome = match action {
            GameAction::Move(direction) => self.move_player(direction),
            GameAction::StartBattle(wild) => self.start_battle(wild),
            GameAction::EndBattle => self.end_battle(),
            GameAction::Attack(index) => self.attack(index),
            GameAction::Catch => self.catch(),
            GameAction::Run => self.run(),
            GameAction::HealAll => self.heal_all(),
            GameAction::SetPaused(paused) => self.set_paused(paused),
        };
        if let ActionOutcome::Ignored(reason) = outcome {
            warn!("action ignored: {}", reason);
        }
        outcome
    }

    /// Walks one tile and rolls for an encounter on arrival.
    ///
    /// Always applied: a blocked step still turns the player.
    pub fn move_player(&mut self, direction: Direction) -> ActionOutcome {
        match step_player(&mut self.state.player, &self.state.map, direction) {
            StepOutcome::Blocked { at } => {
                self.events.push(GameEvent::PlayerBumped { at, direction });
            }
            StepOutcome::Moved { from, to } => {
                self.step += 1;
                self.scheduler.schedule(
                    self.config.timings.movement_animation_ms,
                    Continuation::ClearMoving { step: self.step },
                );
                self.events.push(GameEvent::PlayerMoved { from, to });
                self.check_encounter(to);
            }
        }
        self.record();
        ActionOutcome::Applied
    }

    fn check_encounter(&mut self, pos: Position) {
        let Some(index) = roll_encounter(&self.state.map, pos, self.dice.as_mut()) else {
            return;
        };
        let zone = &self.state.map.encounter_zones[index];
        let wild = match wild_for_zone(zone, self.generator.as_ref(), self.dice.as_mut()) {
            Ok(wild) => wild,
            Err(e) => {
                warn!("encounter in zone {} produced no creature: {}", index, e);
                return;
            }
        };

        self.events.push(GameEvent::EncounterTriggered {
            zone: index,
            species: wild.name.clone(),
            level: wild.level,
        });
        if let ActionOutcome::Ignored(reason) = self.battle_engine().start(wild) {
            warn!("encounter in zone {} did not start a battle: {}", index, reason);
        }
    }

    /// Starts a battle against `wild` with the roster's lead creature.
    pub fn start_battle(&mut self, wild: Creature) -> ActionOutcome {
        let outcome = self.battle_engine().start(wild);
        self.record();
        outcome
    }

    /// Ends the current battle immediately.
    pub fn end_battle(&mut self) -> ActionOutcome {
        let outcome = self.battle_engine().end();
        self.record();
        outcome
    }

    /// The player's creature uses the move in slot `move_index`.
    pub fn attack(&mut self, move_index: usize) -> ActionOutcome {
        let outcome = self.battle_engine().attack(move_index);
        self.record();
        outcome
    }

    /// Throws a ball at the wild creature.
    pub fn catch(&mut self) -> ActionOutcome {
        let outcome = self.battle_engine().catch();
        self.record();
        outcome
    }

    /// Tries to run from the battle.
    pub fn run(&mut self) -> ActionOutcome {
        let outcome = self.battle_engine().run();
        self.record();
        outcome
    }

    /// Restores every roster creature to full hp.
    pub fn heal_all(&mut self) -> ActionOutcome {
        for creature in &mut self.state.roster {
            creature.heal();
        }
        let count = self.state.roster.len();
        debug!("healed {} creatures", count);
        self.events.push(GameEvent::RosterHealed { count });
        self.record();
        ActionOutcome::Applied
    }

    /// Freezes or unfreezes the clock.
    pub fn set_paused(&mut self, paused: bool) -> ActionOutcome {
        if self.state.is_paused != paused {
            self.state.is_paused = paused;
            self.events.push(GameEvent::PauseChanged { paused });
            self.record();
        }
        ActionOutcome::Applied
    }

    /// Moves the clock forward by `ms` and runs every continuation due by then,
    /// including ones scheduled along the way. Does nothing while paused.
    ///
    /// Returns the number of continuations that changed the state.
    pub fn advance(&mut self, ms: u64) -> usize {
        if self.state.is_paused {
            trace!("paused, clock held at t={}", self.scheduler.now());
            return 0;
        }

        let until = self.scheduler.now().saturating_add(ms);
        let mut ran = 0;
        while let Some(continuation) = self.scheduler.pop_due(until) {
            if self.run_continuation(continuation) {
                ran += 1;
            }
        }
        self.scheduler.advance_to(until);
        self.record();
        ran
    }

    /// Runs every pending continuation, moving the clock as far as needed.
    /// Does nothing while paused.
    pub fn settle(&mut self) -> usize {
        if self.state.is_paused {
            return 0;
        }

        let mut ran = 0;
        while let Some(continuation) = self.scheduler.pop_next() {
            if self.run_continuation(continuation) {
                ran += 1;
            }
        }
        self.record();
        ran
    }

    fn run_continuation(&mut self, continuation: Continuation) -> bool {
        debug!("t={} running {:?}", self.scheduler.now(), continuation);
        match continuation {
            Continuation::ClearMoving { step } => {
                // a newer step owns the flag
                if step != self.step {
                    return false;
                }
                self.state.player.is_moving = false;
                true
            }
            other => self.battle_engine().resume(other),
        }
    }

    /// Takes every event since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.record();
        self.recorded = 0;
        std::mem::take(&mut self.events)
    }

    fn record(&mut self) {
        for event in &self.events[self.recorded..] {
            self.state.statistics.update_from_event(event);
        }
        self.recorded = self.events.len();
    }

    fn battle_engine(&mut self) -> BattleEngine<'_> {
        BattleEngine {
            battle: &mut self.state.battle,
            roster: &mut self.state.roster,
            dice: self.dice.as_mut(),
            scheduler: &mut self.scheduler,
            timings: &self.config.timings,
            rules: &self.config.rules,
            events: &mut self.events,
        }
    }
}
