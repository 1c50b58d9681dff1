//! # Creature Dex
//!
//! Species records and the lookup service built on them.
//!
//! The service has three requests. A lookup returns every species, or one by
//! id. A generate request rolls a random species at some level, scales its
//! base stats by `1 + (level / 100) * 2` and keeps `2 + min(2, level / 10)` of
//! its moves. A simulate request fights two supplied creatures against each
//! other with [`simulate_battle`]. Malformed requests are reported as
//! [`TallgrassError::BadRequest`], unknown ids as [`TallgrassError::NotFound`];
//! see [`TallgrassError::status_code`] for the status each maps to.

use crate::{
    move_slots, scaled_stat, simulate_battle, Creature, Dice, Move, SimulationRequest,
    SimulationResult, Sprite, TallgrassError, TallgrassResult, WildCreatureGenerator,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Levels rolled when a generate request names none.
const RANDOM_LEVELS: (u32, u32) = (1, 10);

/// Unscaled species stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Stats scaled to `level`.
    pub fn scaled(self, level: u32) -> Self {
        Self {
            hp: scaled_stat(self.hp, level),
            attack: scaled_stat(self.attack, level),
            defense: scaled_stat(self.defense, level),
            speed: scaled_stat(self.speed, level),
        }
    }
}

/// One species in the dex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    /// Move names in the order they are learned
    pub moves: Vec<String>,
    pub sprite: String,
}

/// A creature rolled by a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCreature {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub level: u32,
    pub stats: BaseStats,
    pub moves: Vec<String>,
    pub sprite: String,
}

/// Reply to a lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DexReply {
    All(Vec<SpeciesRecord>),
    One(SpeciesRecord),
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    level: Option<u32>,
}

/// Species and move tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureDex {
    species: Vec<SpeciesRecord>,
    moves: Vec<Move>,
}

fn record(
    id: u32,
    name: &str,
    types: &[&str],
    base_stats: BaseStats,
    moves: [&str; 4],
) -> SpeciesRecord {
    SpeciesRecord {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        base_stats,
        moves: moves.iter().map(|m| m.to_string()).collect(),
        sprite: Sprite::for_species(name).src,
    }
}

impl CreatureDex {
    /// The three starter species and the moves they learn.
    pub fn standard() -> Self {
        let species = vec![
            record(
                1,
                "Bulbasaur",
                &["grass", "poison"],
                BaseStats { hp: 45, attack: 49, defense: 49, speed: 45 },
                ["Tackle", "Growl", "Vine Whip", "Razor Leaf"],
            ),
            record(
                4,
                "Charmander",
                &["fire"],
                BaseStats { hp: 39, attack: 52, defense: 43, speed: 65 },
                ["Scratch", "Growl", "Ember", "Flamethrower"],
            ),
            record(
                7,
                "Squirtle",
                &["water"],
                BaseStats { hp: 44, attack: 48, defense: 65, speed: 43 },
                ["Tackle", "Tail Whip", "Bubble", "Water Gun"],
            ),
        ];

        let moves = vec![
            Move::tackle(),
            Move::new("Growl", "normal", 0, 100),
            Move::new("Vine Whip", "grass", 45, 100),
            Move::new("Razor Leaf", "grass", 55, 95),
            Move::new("Scratch", "normal", 40, 100),
            Move::new("Ember", "fire", 40, 100),
            Move::new("Flamethrower", "fire", 90, 100),
            Move::new("Tail Whip", "normal", 0, 100),
            Move::new("Bubble", "water", 40, 100),
            Move::new("Water Gun", "water", 40, 100),
        ];

        Self { species, moves }
    }

    /// Every species.
    pub fn all(&self) -> &[SpeciesRecord] {
        &self.species
    }

    /// The species with `id`.
    pub fn get(&self, id: u32) -> TallgrassResult<&SpeciesRecord> {
        self.species
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| TallgrassError::NotFound(format!("creature with id {} not found", id)))
    }

    /// The move called `name`.
    pub fn move_named(&self, name: &str) -> Option<&Move> {
        self.moves.iter().find(|m| m.name == name)
    }

    /// Handles a lookup request. `id` is the raw query parameter, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::{CreatureDex, DexReply};
    ///
    /// let dex = CreatureDex::standard();
    /// assert!(matches!(dex.lookup(None), Ok(DexReply::All(_))));
    /// assert_eq!(dex.lookup(Some("4")).unwrap(), DexReply::One(dex.get(4).unwrap().clone()));
    /// assert_eq!(dex.lookup(Some("5")).unwrap_err().status_code(), 404);
    /// assert_eq!(dex.lookup(Some("five")).unwrap_err().status_code(), 400);
    /// ```
    pub fn lookup(&self, id: Option<&str>) -> TallgrassResult<DexReply> {
        let Some(raw) = id else {
            return Ok(DexReply::All(self.species.clone()));
        };
        let id: u32 = raw
            .trim()
            .parse()
            .map_err(|_| TallgrassError::BadRequest(format!("invalid creature id {:?}", raw)))?;
        self.get(id).cloned().map(DexReply::One)
    }

    /// Handles a generate request with a JSON body such as `{"level": 12}`.
    ///
    /// A missing or zero level rolls one between 1 and 10.
    pub fn generate(&self, body: &str, dice: &mut dyn Dice) -> TallgrassResult<GeneratedCreature> {
        let request: GenerateRequest = serde_json::from_str(body)
            .map_err(|e| TallgrassError::BadRequest(format!("invalid generate request: {}", e)))?;
        self.generate_at(request.level, dice)
    }

    /// Rolls a random species at `level`, or at a random level when `None` or 0.
    pub fn generate_at(&self, level: Option<u32>, dice: &mut dyn Dice) -> TallgrassResult<GeneratedCreature> {
        let record = self
            .species
            .get(dice.index(self.species.len()))
            .ok_or_else(|| TallgrassError::NotFound("the dex is empty".to_string()))?;
        let level = match level {
            Some(level) if level > 0 => level,
            _ => dice.range_inclusive(RANDOM_LEVELS.0, RANDOM_LEVELS.1),
        };

        let moves: Vec<String> = record.moves.iter().take(move_slots(level)).cloned().collect();
        debug!("dex rolled {} lv {} with {} moves", record.name, level, moves.len());

        Ok(GeneratedCreature {
            id: record.id,
            name: record.name.clone(),
            types: record.types.clone(),
            level,
            stats: record.base_stats.scaled(level),
            moves,
            sprite: record.sprite.clone(),
        })
    }

    /// Handles a simulation request: a JSON body naming `playerCreature`,
    /// `opponentCreature` and optionally `rounds`.
    ///
    /// Both creatures are required and must pass [`Creature::validate`].
    pub fn simulate(&self, body: &str, dice: &mut dyn Dice) -> TallgrassResult<SimulationResult> {
        let request: SimulationRequest = serde_json::from_str(body)
            .map_err(|e| TallgrassError::BadRequest(format!("invalid simulation request: {}", e)))?;
        let (Some(player), Some(opponent)) = (&request.player_creature, &request.opponent_creature)
        else {
            return Err(TallgrassError::BadRequest(
                "both player and opponent creatures are required".to_string(),
            ));
        };
        for creature in [player, opponent] {
            creature
                .validate()
                .map_err(|e| TallgrassError::BadRequest(e.to_string()))?;
        }
        Ok(simulate_battle(player, opponent, request.round_limit(), dice))
    }

    /// Turns a generated record into a battle-ready creature at full hp.
    pub fn to_creature(&self, generated: &GeneratedCreature) -> TallgrassResult<Creature> {
        let moves = generated
            .moves
            .iter()
            .map(|name| {
                self.move_named(name).cloned().ok_or_else(|| {
                    TallgrassError::InvalidCreature(format!("{} knows unknown move {}", generated.name, name))
                })
            })
            .collect::<TallgrassResult<Vec<Move>>>()?;

        let creature = Creature {
            id: generated.id,
            name: generated.name.clone(),
            level: generated.level,
            types: generated.types.clone(),
            hp: generated.stats.hp,
            max_hp: generated.stats.hp,
            attack: generated.stats.attack,
            defense: generated.stats.defense,
            speed: generated.stats.speed,
            moves,
            sprite: Sprite::new(generated.sprite.clone(), 64, 64),
        };
        creature.validate()?;
        Ok(creature)
    }
}

impl Default for CreatureDex {
    fn default() -> Self {
        Self::standard()
    }
}

/// Wild creatures rolled from the dex at random levels.
#[derive(Debug, Clone, Default)]
pub struct DexGenerator {
    dex: CreatureDex,
}

impl DexGenerator {
    /// Generator over the standard dex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator over a custom dex.
    pub fn with_dex(dex: CreatureDex) -> Self {
        Self { dex }
    }
}

impl WildCreatureGenerator for DexGenerator {
    fn generate(&self, dice: &mut dyn Dice) -> TallgrassResult<Creature> {
        let generated = self.dex.generate_at(None, dice)?;
        self.dex.to_creature(&generated)
    }

    fn generator_type(&self) -> &'static str {
        "DexGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedDice;

    #[test]
    fn test_lookup_all() {
        let dex = CreatureDex::standard();
        match dex.lookup(None).unwrap() {
            DexReply::All(all) => assert_eq!(all.len(), 3),
            other => panic!("expected all species, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_distinguishes_bad_request_from_not_found() {
        let dex = CreatureDex::standard();
        assert!(matches!(dex.lookup(Some("2")), Err(TallgrassError::NotFound(_))));
        assert!(matches!(dex.lookup(Some("abc")), Err(TallgrassError::BadRequest(_))));
        assert!(matches!(dex.lookup(Some("-1")), Err(TallgrassError::BadRequest(_))));
    }

    #[test]
    fn test_generate_scales_stats() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new().with_indices([0]);
        let generated = dex.generate(r#"{"level": 50}"#, &mut dice).unwrap();

        assert_eq!(generated.name, "Bulbasaur");
        assert_eq!(generated.level, 50);
        assert_eq!(generated.stats, BaseStats { hp: 90, attack: 98, defense: 98, speed: 90 });
        assert_eq!(generated.moves.len(), 4);
    }

    #[test]
    fn test_generate_truncates_moves_by_level() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new().with_indices([1]);
        let generated = dex.generate(r#"{"level": 12}"#, &mut dice).unwrap();
        assert_eq!(generated.name, "Charmander");
        assert_eq!(generated.moves, vec!["Scratch", "Growl", "Ember"]);
    }

    #[test]
    fn test_generate_without_level_rolls_one() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new().with_indices([2, 6]);
        let generated = dex.generate("{}", &mut dice).unwrap();
        assert_eq!(generated.name, "Squirtle");
        assert_eq!(generated.level, 7);

        let mut dice = ScriptedDice::new().with_indices([0, 0]);
        let generated = dex.generate(r#"{"level": 0}"#, &mut dice).unwrap();
        assert_eq!(generated.level, 1);
    }

    #[test]
    fn test_generate_rejects_malformed_body() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new();
        for body in ["", "not json", r#"{"level": "high"}"#, r#"{"level": -3}"#] {
            let err = dex.generate(body, &mut dice).unwrap_err();
            assert_eq!(err.status_code(), 400, "body {:?}", body);
        }
    }

    #[test]
    fn test_generated_creature_is_battle_ready() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new().with_indices([2]);
        let generated = dex.generate_at(Some(5), &mut dice).unwrap();
        let creature = dex.to_creature(&generated).unwrap();

        assert_eq!(creature.hp, creature.max_hp);
        assert_eq!(creature.moves.len(), 2);
        assert_eq!(creature.moves[1].name, "Tail Whip");
        assert_eq!(creature.defense, 71);
    }

    #[test]
    fn test_reply_serializes_like_the_records() {
        let dex = CreatureDex::standard();
        let json = serde_json::to_value(dex.lookup(Some("1")).unwrap()).unwrap();
        assert_eq!(json["name"], "Bulbasaur");
        assert_eq!(json["baseStats"]["attack"], 49);
        assert_eq!(json["type"][1], "poison");
    }

    fn simulation_body(player: Option<Creature>, opponent: Option<Creature>, rounds: i64) -> String {
        let request = SimulationRequest {
            player_creature: player,
            opponent_creature: opponent,
            rounds,
        };
        serde_json::to_string(&request).unwrap()
    }

    #[test]
    fn test_simulate_requires_both_creatures() {
        let dex = CreatureDex::standard();
        let mut dice = ScriptedDice::new();
        let bodies = [
            simulation_body(Some(Creature::starter()), None, 3),
            simulation_body(None, Some(Creature::starter()), 3),
            "{}".to_string(),
            "not json".to_string(),
        ];
        for body in bodies {
            let err = dex.simulate(&body, &mut dice).unwrap_err();
            assert_eq!(err.status_code(), 400, "body {:?}", body);
        }
    }

    #[test]
    fn test_simulate_rejects_invalid_creature() {
        let dex = CreatureDex::standard();
        let mut broken = Creature::starter();
        broken.moves.clear();
        let body = simulation_body(Some(Creature::starter()), Some(broken), 3);
        let err = dex.simulate(&body, &mut ScriptedDice::new()).unwrap_err();
        assert!(matches!(err, TallgrassError::BadRequest(_)));
    }

    #[test]
    fn test_simulate_defaults_to_five_rounds() {
        let dex = CreatureDex::standard();
        let mut tank = Creature::starter();
        tank.max_hp = 500;
        tank.hp = 500;
        for rounds in [0, -4] {
            let body = simulation_body(Some(tank.clone()), Some(tank.clone()), rounds);
            let result = dex.simulate(&body, &mut ScriptedDice::new()).unwrap();
            assert_eq!(result.rounds, 5);
            assert_eq!(result.winner, crate::SimulationWinner::Draw);
        }
    }

    #[test]
    fn test_dex_generator_produces_valid_creatures() {
        let generator = DexGenerator::new();
        let mut dice = crate::SeededDice::new(31);
        for _ in 0..50 {
            let creature = generator.generate(&mut dice).unwrap();
            assert!(creature.validate().is_ok());
            assert!((1..=10).contains(&creature.level));
        }
    }
}
