//! # World Representation
//!
//! The fixed-size tile map and the rectangular encounter zones laid over it.

use crate::{config, Creature, Position, TallgrassError, TallgrassResult};
use serde::{Deserialize, Serialize};

/// Tile id used for plain grass.
pub const GRASS_TILE: u32 = 0;

/// A rectangular region where each step may start a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterZone {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Chance per step in percent (0-100)
    pub encounter_rate: u32,
    /// Creatures found here; empty means the store's generator decides
    #[serde(default)]
    pub pool: Vec<Creature>,
}

impl EncounterZone {
    /// Creates a zone without a creature pool.
    pub fn new(x: i32, y: i32, width: u32, height: u32, encounter_rate: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            encounter_rate,
            pool: Vec::new(),
        }
    }

    /// Whether `pos` lies inside the zone.
    ///
    /// The origin is inclusive and origin + extent is exclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::{EncounterZone, Position};
    ///
    /// let zone = EncounterZone::new(2, 2, 10, 10, 10);
    /// assert!(zone.contains(Position::new(2, 2)));
    /// assert!(zone.contains(Position::new(11, 11)));
    /// assert!(!zone.contains(Position::new(12, 5)));
    /// ```
    pub fn contains(&self, pos: Position) -> bool {
        let (x, y) = (pos.x as i64, pos.y as i64);
        x >= self.x as i64
            && x < self.x as i64 + self.width as i64
            && y >= self.y as i64
            && y < self.y as i64 + self.height as i64
    }
}

/// The tile map the player walks on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMap {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub tileset_src: String,
    /// Tile ids indexed `[y][x]`
    pub tiles: Vec<Vec<u32>>,
    /// `true` marks a tile the player cannot enter, indexed `[y][x]`
    pub collision: Vec<Vec<bool>>,
    pub encounter_zones: Vec<EncounterZone>,
}

impl GameMap {
    /// Creates an all-grass map without collisions or zones.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tile_size: config::DEFAULT_TILE_SIZE,
            tileset_src: "/assets/sprites/tileset.png".to_string(),
            tiles: vec![vec![GRASS_TILE; width as usize]; height as usize],
            collision: vec![vec![false; width as usize]; height as usize],
            encounter_zones: Vec::new(),
        }
    }

    /// Adds an encounter zone, builder style.
    pub fn with_zone(mut self, zone: EncounterZone) -> Self {
        self.encounter_zones.push(zone);
        self
    }

    /// Whether a position lies on the map.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Clamps a position onto the map.
    pub fn clamp(&self, pos: Position) -> Position {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    /// Whether the player may stand on `pos`. Off-map tiles are not walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        !self
            .collision
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Marks a tile as blocked or free. Off-map positions are ignored.
    pub fn set_blocked(&mut self, pos: Position, blocked: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        if let Some(cell) = self
            .collision
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = blocked;
        }
    }

    /// Indices of the zones containing `pos`, in map order.
    pub fn zones_at(&self, pos: Position) -> impl Iterator<Item = usize> + '_ {
        self.encounter_zones
            .iter()
            .enumerate()
            .filter(move |(_, zone)| zone.contains(pos))
            .map(|(index, _)| index)
    }

    /// Checks grid dimensions and zone rates.
    pub fn validate(&self) -> TallgrassResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TallgrassError::InvalidConfig(format!(
                "map must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.grid_matches(&self.tiles) {
            return Err(TallgrassError::InvalidConfig(
                "tile grid does not match map dimensions".to_string(),
            ));
        }
        if !self.grid_matches(&self.collision) {
            return Err(TallgrassError::InvalidConfig(
                "collision grid does not match map dimensions".to_string(),
            ));
        }

        for (index, zone) in self.encounter_zones.iter().enumerate() {
            if zone.encounter_rate > 100 {
                return Err(TallgrassError::InvalidConfig(format!(
                    "zone {} has encounter rate {} above 100",
                    index, zone.encounter_rate
                )));
            }
            if zone.width > i32::MAX as u32 || zone.height > i32::MAX as u32 {
                return Err(TallgrassError::InvalidConfig(format!(
                    "zone {} is {}x{}, wider than the grid can address",
                    index, zone.width, zone.height
                )));
            }
            for creature in &zone.pool {
                creature.validate()?;
            }
        }

        Ok(())
    }

    fn grid_matches<T>(&self, grid: &[Vec<T>]) -> bool {
        grid.len() == self.height as usize && grid.iter().all(|row| row.len() == self.width as usize)
    }
}

impl Default for GameMap {
    /// The 20x15 meadow with one patch of tall grass.
    fn default() -> Self {
        Self::new(config::DEFAULT_MAP_WIDTH, config::DEFAULT_MAP_HEIGHT)
            .with_zone(EncounterZone::new(2, 2, 10, 10, 10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_layout() {
        let map = GameMap::default();
        assert_eq!(map.width, 20);
        assert_eq!(map.height, 15);
        assert_eq!(map.tiles.len(), 15);
        assert_eq!(map.tiles[0].len(), 20);
        assert_eq!(map.encounter_zones.len(), 1);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_clamp_to_edges() {
        let map = GameMap::new(5, 4);
        assert_eq!(map.clamp(Position::new(-1, 2)), Position::new(0, 2));
        assert_eq!(map.clamp(Position::new(5, 4)), Position::new(4, 3));
    }

    #[test]
    fn test_collision_lookup() {
        let mut map = GameMap::new(5, 5);
        let rock = Position::new(2, 3);
        assert!(map.is_walkable(rock));
        map.set_blocked(rock, true);
        assert!(!map.is_walkable(rock));
        assert!(!map.is_walkable(Position::new(-1, 0)));
    }

    #[test]
    fn test_zones_at_preserves_order() {
        let map = GameMap::new(10, 10)
            .with_zone(EncounterZone::new(0, 0, 5, 5, 10))
            .with_zone(EncounterZone::new(8, 8, 2, 2, 10))
            .with_zone(EncounterZone::new(2, 2, 3, 3, 50));
        let hits: Vec<usize> = map.zones_at(Position::new(3, 3)).collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_validate_rejects_ragged_grid() {
        let mut map = GameMap::new(4, 4);
        map.collision[2].pop();
        assert!(map.validate().is_err());

        let map = GameMap::new(4, 4).with_zone(EncounterZone::new(0, 0, 1, 1, 101));
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_zone() {
        let wide = u32::MAX;
        let map = GameMap::new(4, 4).with_zone(EncounterZone::new(0, 0, wide, 1, 50));
        assert!(matches!(map.validate(), Err(TallgrassError::InvalidConfig(_))));

        let map = GameMap::new(4, 4).with_zone(EncounterZone::new(0, 0, 1, i32::MAX as u32 + 1, 50));
        assert!(map.validate().is_err());

        let huge = EncounterZone::new(0, 0, i32::MAX as u32, i32::MAX as u32, 50);
        assert!(huge.contains(Position::new(3, 3)));
        let map = GameMap::new(4, 4).with_zone(huge);
        assert!(map.validate().is_ok());
    }
}
