//! Integration tests for building a game from configuration.

use std::io::Write;
use tallgrass::{
    Direction, GameConfig, GameStore, Position, TallgrassError, TallgrassResult, WildSource,
};

#[test]
fn test_basic_startup() -> TallgrassResult<()> {
    let store = GameStore::seeded(GameConfig::default(), 12345)?;
    let state = store.state();

    assert_eq!(state.player.position, Position::new(5, 5));
    assert_eq!(state.player.direction, Direction::Down);
    assert_eq!(state.map.width, 20);
    assert_eq!(state.map.height, 15);
    assert_eq!(state.map.encounter_zones.len(), 1);
    assert_eq!(state.roster.len(), 1);
    assert_eq!(state.roster[0].name, "Bulbasaur");
    assert_eq!(state.roster[0].moves.len(), 2);
    assert!(!state.in_battle());
    assert!(!state.is_loading);
    assert_eq!(store.now(), 0);
    assert_eq!(store.pending_continuations(), 0);

    Ok(())
}

#[test]
fn test_startup_from_config_file() -> TallgrassResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "seed": 42,
            "playerStart": {{"x": 1, "y": 2}},
            "playerDirection": "left",
            "wildSource": "dex",
            "timings": {{"opponentTurnMs": 10}}
        }}"#
    )?;

    let config = GameConfig::load(file.path())?;
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.timings.opponent_turn_ms, 10);
    assert_eq!(config.timings.faint_announce_ms, 1000);
    assert_eq!(config.wild_source, WildSource::Dex);

    let store = GameStore::from_config(config)?;
    assert_eq!(store.state().player.position, Position::new(1, 2));
    assert_eq!(store.state().player.direction, Direction::Left);
    assert_eq!(store.generator_type(), "DexGenerator");
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected() -> TallgrassResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{"playerStart": {{"x": 50, "y": 0}}}}"#)?;
    assert!(matches!(
        GameConfig::load(file.path()),
        Err(TallgrassError::InvalidConfig(_))
    ));

    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "not json")?;
    assert!(matches!(GameConfig::load(file.path()), Err(TallgrassError::Serde(_))));

    assert!(matches!(
        GameConfig::load("/definitely/not/here.json"),
        Err(TallgrassError::Io(_))
    ));
    Ok(())
}

#[test]
fn test_same_seed_same_game() -> TallgrassResult<()> {
    let mut config = GameConfig::default();
    config.map.encounter_zones[0].encounter_rate = 50;

    let walk = [
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
    let play = |config: GameConfig| -> TallgrassResult<_> {
        let mut store = GameStore::seeded(config, 99)?;
        for direction in walk {
            store.move_player(direction);
            store.advance(250);
        }
        let state = store.snapshot();
        Ok((state.player.position, state.battle.wild_creature, state.statistics))
    };

    assert_eq!(play(config.clone())?, play(config)?);
    Ok(())
}
