//! # User Interface Elements
//!
//! Window-independent pieces of the interface: health bar bands, tile
//! classification, event messages and the message log.

use crate::{BattleOutcome, GameEvent, GameMap, Position};
use macroquad::prelude::Color;
use std::collections::VecDeque;

/// Colour band of a health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpBand {
    /// Above half health
    Healthy,
    /// Above a fifth
    Wounded,
    /// A fifth or less
    Critical,
}

impl HpBand {
    /// Band for `fraction` of max hp.
    pub fn for_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            HpBand::Healthy
        } else if fraction > 0.2 {
            HpBand::Wounded
        } else {
            HpBand::Critical
        }
    }

    pub fn color(self) -> Color {
        match self {
            HpBand::Healthy => Color::from_rgba(34, 197, 94, 255),
            HpBand::Wounded => Color::from_rgba(234, 179, 8, 255),
            HpBand::Critical => Color::from_rgba(239, 68, 68, 255),
        }
    }
}

/// How a map tile is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    /// Inside at least one encounter zone
    TallGrass,
    Blocked,
    /// Outside the map
    Void,
}

impl TileKind {
    /// Classifies the tile at `pos`.
    pub fn at(map: &GameMap, pos: Position) -> Self {
        if !map.in_bounds(pos) {
            TileKind::Void
        } else if !map.is_walkable(pos) {
            TileKind::Blocked
        } else if map.zones_at(pos).next().is_some() {
            TileKind::TallGrass
        } else {
            TileKind::Grass
        }
    }

    pub fn color(self) -> Color {
        match self {
            TileKind::Grass => Color::from_rgba(124, 252, 0, 255),
            TileKind::TallGrass => Color::from_rgba(34, 139, 34, 255),
            TileKind::Blocked => Color::from_rgba(105, 105, 105, 255),
            TileKind::Void => Color::from_rgba(0, 0, 0, 255),
        }
    }
}

/// Log line for an event, for events the battle message does not already show.
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::EncounterTriggered { species, level, .. } => {
            Some(format!("A wild {} (Lv.{}) jumped out of the grass!", species, level))
        }
        GameEvent::CatchSucceeded { name } => Some(format!("{} joined your party.", name)),
        GameEvent::BattleEnded { outcome, .. } => Some(
            match outcome {
                Some(BattleOutcome::Victory) => "You won the battle.",
                Some(BattleOutcome::Defeat) => "You lost the battle.",
                Some(BattleOutcome::Caught) => "The battle is over.",
                Some(BattleOutcome::Fled) => "You escaped.",
                None => "The battle was called off.",
            }
            .to_string(),
        ),
        GameEvent::RosterHealed { count } => Some(format!("Your {} creatures are fully healed.", count)),
        GameEvent::PauseChanged { paused: true } => Some("Paused".to_string()),
        GameEvent::PauseChanged { paused: false } => Some("Resumed".to_string()),
        _ => None,
    }
}

/// Bounded history of log lines, oldest first.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds a line, dropping the oldest when full.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    /// The last `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.messages.len().saturating_sub(count);
        self.messages.iter().skip(skip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(100)
    }
}
