//! End-to-end battle scenarios driven through the store with forced dice.

use tallgrass::{
    ActionOutcome, BattleOutcome, BattlePhase, Creature, Direction, EncounterZone, GameAction,
    GameConfig, GameEvent, GameStore, IgnoreReason, Move, ScriptedDice, Side, Sprite,
    TallgrassResult, Turn,
};

fn squirtle(hp: u32) -> Creature {
    Creature {
        id: 7,
        name: "Squirtle".to_string(),
        level: 3,
        types: vec!["water".to_string()],
        hp,
        max_hp: 20,
        attack: 10,
        defense: 10,
        speed: 10,
        moves: vec![Move::tackle()],
        sprite: Sprite::for_species("Squirtle"),
    }
}

fn store_with(dice: ScriptedDice) -> GameStore {
    GameStore::new(GameConfig::for_testing(0), Box::new(dice)).expect("valid test config")
}

#[test]
fn test_walking_into_certain_grass_starts_battle() -> TallgrassResult<()> {
    let mut config = GameConfig::default();
    config.map.encounter_zones[0].encounter_rate = 100;

    for seed in 0..20 {
        let mut store = GameStore::seeded(config.clone(), seed)?;
        store.dispatch(GameAction::Move(Direction::Down));

        let state = store.state();
        assert!(state.in_battle(), "seed {} did not trigger", seed);
        assert_eq!(state.battle.turn, Turn::Player);
        let wild = state.battle.wild_creature.as_ref().expect("wild creature");
        assert!(["Bulbasaur", "Charmander", "Squirtle"].contains(&wild.name.as_str()));
        assert_eq!(state.battle.message, format!("A wild {} appeared!", wild.name));
    }
    Ok(())
}

#[test]
fn test_zone_pool_supplies_wild_creature() -> TallgrassResult<()> {
    let mut config = GameConfig::for_testing(0);
    let mut zone = EncounterZone::new(0, 0, 10, 10, 100);
    zone.pool = vec![squirtle(12)];
    config.map = config.map.with_zone(zone);

    let mut store = GameStore::seeded(config, 5)?;
    store.move_player(Direction::Up);
    let wild = store.state().battle.wild_creature.as_ref().expect("wild creature");
    assert_eq!(wild.name, "Squirtle");
    assert_eq!(wild.hp, 12);
    Ok(())
}

#[test]
fn test_reference_damage() {
    let mut store = store_with(ScriptedDice::new());
    store.start_battle(squirtle(20));
    store.attack(0);

    let battle = &store.state().battle;
    assert_eq!(battle.wild_creature.as_ref().map(|c| c.hp), Some(15));
    assert_eq!(battle.message, "Bulbasaur used Tackle! It did 5 damage!");
}

#[test]
fn test_catch_with_zero_draw_adds_wounded_creature() {
    let mut store = store_with(ScriptedDice::always(0.0));
    store.start_battle(squirtle(20));
    store.attack(0);
    store.advance(1500);
    assert_eq!(store.state().battle.phase, BattlePhase::PlayerTurn);

    assert_eq!(store.catch(), ActionOutcome::Applied);
    let state = store.state();
    assert_eq!(state.battle.message, "You caught Squirtle!");
    assert_eq!(state.battle.outcome(), Some(BattleOutcome::Caught));
    assert_eq!(state.roster.len(), 2);
    assert_eq!(state.roster[1].hp, 15);

    store.advance(1999);
    assert!(store.state().in_battle());
    store.advance(1);
    assert!(!store.state().in_battle());
    assert_eq!(store.statistics().creatures_caught, 1);
}

#[test]
fn test_failed_run_hands_turn_to_opponent() {
    let mut store = store_with(ScriptedDice::always(99.0));
    store.start_battle(squirtle(20));

    assert_eq!(store.run(), ActionOutcome::Applied);
    assert_eq!(store.state().battle.message, "Failed to run away!");
    assert_eq!(store.state().battle.turn, Turn::Opponent);
    assert_eq!(store.state().battle.phase, BattlePhase::OpponentTurn);
    assert_eq!(store.pending_continuations(), 1);

    store.advance(1500);
    let battle = &store.state().battle;
    assert_eq!(battle.turn, Turn::Player);
    assert_eq!(battle.player_creature.as_ref().map(|c| c.hp), Some(16));
    assert_eq!(battle.wild_creature.as_ref().map(|c| c.hp), Some(20));
}

#[test]
fn test_successful_escape_ends_after_delay() {
    let mut store = store_with(ScriptedDice::always(10.0));
    store.start_battle(squirtle(20));
    store.run();
    assert_eq!(store.state().battle.message, "Got away safely!");
    assert_eq!(store.run(), ActionOutcome::Ignored(IgnoreReason::BattleDecided));

    store.advance(1000);
    assert!(!store.state().in_battle());
    assert_eq!(store.statistics().escapes, 1);
}

#[test]
fn test_continuations_fire_in_delay_order() {
    let mut store = store_with(ScriptedDice::new());
    store.start_battle(squirtle(5));
    store.drain_events();
    store.attack(0);
    assert_eq!(store.state().battle.phase, BattlePhase::ResolvingPlayerMove);

    store.advance(999);
    assert_eq!(store.state().battle.phase, BattlePhase::ResolvingPlayerMove);
    store.advance(1);
    assert_eq!(store.state().battle.message, "Squirtle fainted! You won!");

    store.advance(1999);
    assert!(store.state().in_battle());
    store.advance(1);
    assert!(!store.state().in_battle());

    let events = store.drain_events();
    assert!(matches!(events[0], GameEvent::MoveUsed { side: Side::Player, damage: 5, .. }));
    assert!(matches!(events[1], GameEvent::CreatureFainted { side: Side::Wild, .. }));
    assert!(matches!(
        events[2],
        GameEvent::BattleEnded { outcome: Some(BattleOutcome::Victory), .. }
    ));
    assert_eq!(store.statistics().battles_won, 1);
}

#[test]
fn test_defeat_does_not_touch_roster() {
    let mut config = GameConfig::for_testing(0);
    config.roster[0].hp = 1;
    let mut store = GameStore::new(config, Box::new(ScriptedDice::new())).expect("valid config");

    store.start_battle(squirtle(20));
    store.attack(0);
    store.advance(1500);
    assert_eq!(store.state().battle.phase, BattlePhase::ResolvingOpponentMove);

    store.advance(1000);
    assert_eq!(store.state().battle.message, "Bulbasaur fainted! You lost the battle!");
    store.settle();

    assert!(!store.state().in_battle());
    assert_eq!(store.state().roster[0].hp, 1);
    assert_eq!(store.statistics().battles_lost, 1);
}

#[test]
fn test_stale_continuations_never_reach_a_new_battle() {
    let mut store = store_with(ScriptedDice::new());
    store.start_battle(squirtle(20));
    store.attack(0);
    assert_eq!(store.pending_continuations(), 1);

    // restart before the retaliation lands
    store.start_battle(squirtle(20));
    assert_eq!(store.pending_continuations(), 0);
    store.advance(5000);

    let battle = &store.state().battle;
    assert_eq!(battle.phase, BattlePhase::PlayerTurn);
    assert_eq!(battle.player_creature.as_ref().map(|c| c.hp), Some(20));
}

#[test]
fn test_forced_end_cancels_pending_work() {
    let mut store = store_with(ScriptedDice::new());
    store.start_battle(squirtle(20));
    store.attack(0);

    assert_eq!(store.end_battle(), ActionOutcome::Applied);
    assert!(!store.state().in_battle());
    assert_eq!(store.pending_continuations(), 0);
    assert_eq!(store.settle(), 0);
}

#[test]
fn test_heal_is_idempotent() {
    let mut config = GameConfig::for_testing(0);
    config.roster[0].hp = 3;
    config.roster.push(squirtle(0));
    let mut store = GameStore::new(config, Box::new(ScriptedDice::new())).expect("valid config");

    store.heal_all();
    let once = store.state().roster.clone();
    store.heal_all();
    assert_eq!(store.state().roster, once);
    assert!(once.iter().all(|c| c.hp == c.max_hp));
}

#[test]
fn test_actions_outside_battle_are_ignored() {
    let mut store = store_with(ScriptedDice::new());
    for action in [GameAction::Attack(0), GameAction::Catch, GameAction::Run] {
        assert_eq!(
            store.dispatch(action),
            ActionOutcome::Ignored(IgnoreReason::NotInBattle)
        );
    }
    assert_eq!(store.state().battle.message, "");
}

#[test]
fn test_invalid_wild_creature_is_refused() {
    let mut store = store_with(ScriptedDice::new());
    let mut broken = squirtle(20);
    broken.defense = 0;
    assert_eq!(
        store.start_battle(broken),
        ActionOutcome::Ignored(IgnoreReason::InvalidCreature)
    );
    assert!(!store.state().in_battle());
}
