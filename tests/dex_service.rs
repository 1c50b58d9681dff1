//! Creature dex requests and replies.

use tallgrass::{
    Creature, CreatureDex, DexGenerator, DexReply, GameConfig, GameStore, ScriptedDice,
    SeededDice, SimulationWinner, TallgrassError, TallgrassResult, WildCreatureGenerator,
    WildSource,
};

#[test]
fn test_lookup_replies() -> TallgrassResult<()> {
    let dex = CreatureDex::standard();

    let DexReply::All(all) = dex.lookup(None)? else {
        panic!("expected every species");
    };
    let ids: Vec<u32> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 4, 7]);

    let DexReply::One(squirtle) = dex.lookup(Some("7"))? else {
        panic!("expected one species");
    };
    assert_eq!(squirtle.name, "Squirtle");
    assert_eq!(squirtle.base_stats.defense, 65);
    assert_eq!(squirtle.sprite, "/assets/sprites/squirtle.png");
    Ok(())
}

#[test]
fn test_lookup_status_codes() {
    let dex = CreatureDex::standard();
    for (query, status) in [("151", 404), ("0", 404), ("x7", 400), ("", 400), ("1.5", 400)] {
        let err = dex.lookup(Some(query)).unwrap_err();
        assert_eq!(err.status_code(), status, "query {:?}", query);
    }
    assert_eq!(TallgrassError::InvalidConfig("x".into()).status_code(), 500);
}

#[test]
fn test_generate_levels_and_moves() -> TallgrassResult<()> {
    let dex = CreatureDex::standard();
    let cases = [(1, 2), (9, 2), (10, 3), (19, 3), (20, 4), (100, 4)];

    for (level, slots) in cases {
        let mut dice = ScriptedDice::new().with_indices([0]);
        let generated = dex.generate(&format!(r#"{{"level": {}}}"#, level), &mut dice)?;
        assert_eq!(generated.level, level);
        assert_eq!(generated.moves.len(), slots, "level {}", level);
    }

    let mut dice = ScriptedDice::new().with_indices([1]);
    let charmander = dex.generate(r#"{"level": 100}"#, &mut dice)?;
    assert_eq!(charmander.stats.hp, 117);
    assert_eq!(charmander.stats.speed, 195);
    Ok(())
}

#[test]
fn test_random_levels_stay_low() -> TallgrassResult<()> {
    let dex = CreatureDex::standard();
    let mut dice = SeededDice::new(8);
    for _ in 0..100 {
        let generated = dex.generate("{}", &mut dice)?;
        assert!((1..=10).contains(&generated.level));
    }
    Ok(())
}

#[test]
fn test_generated_json_shape() -> TallgrassResult<()> {
    let dex = CreatureDex::standard();
    let mut dice = ScriptedDice::new().with_indices([0]);
    let generated = dex.generate(r#"{"level": 10}"#, &mut dice)?;
    let json = serde_json::to_value(&generated)?;

    assert_eq!(json["name"], "Bulbasaur");
    assert_eq!(json["level"], 10);
    assert_eq!(json["stats"]["hp"], 54);
    assert_eq!(json["moves"][2], "Vine Whip");
    Ok(())
}

#[test]
fn test_dex_encounters_through_store() -> TallgrassResult<()> {
    let mut config = GameConfig::default();
    config.map.encounter_zones[0].encounter_rate = 100;
    config.wild_source = WildSource::Dex;

    let mut store = GameStore::seeded(config, 3)?;
    store.move_player(tallgrass::Direction::Down);
    let wild = store.state().battle.wild_creature.as_ref().expect("wild creature");
    assert!((1..=10).contains(&wild.level));
    assert!(wild.moves.len() >= 2);
    assert_eq!(DexGenerator::new().generator_type(), store.generator_type());
    Ok(())
}

#[test]
fn test_simulate_request_reply() -> TallgrassResult<()> {
    let dex = CreatureDex::standard();
    let mut dice = SeededDice::new(21);
    let generated = dex.generate_at(Some(30), &mut ScriptedDice::new().with_indices([1]))?;
    let charmander = dex.to_creature(&generated)?;
    let body = serde_json::json!({
        "playerCreature": Creature::starter(),
        "opponentCreature": charmander,
        "rounds": 40,
    })
    .to_string();

    let result = dex.simulate(&body, &mut dice)?;
    assert!(result.rounds >= 1 && result.rounds <= 40);
    assert_eq!(result.battle_log[0], "Battle started: Bulbasaur (Lv.5) vs Charmander (Lv.30)");
    // Charmander is faster, so it opens every round.
    assert!(result.battle_log[2].starts_with("Charmander"));
    match result.winner {
        SimulationWinner::Player => assert_eq!(result.opponent_hp, 0),
        SimulationWinner::Opponent => assert_eq!(result.player_hp, 0),
        SimulationWinner::Draw => assert_eq!(result.rounds, 40),
    }

    let json = serde_json::to_value(&result)?;
    assert!(json["battleLog"].is_array());
    assert!(["player", "opponent", "draw"].contains(&json["winner"].as_str().unwrap_or("")));
    Ok(())
}
