//! # Tallgrass
//!
//! A top-down exploration game with turn-based creature-collection battles.
//!
//! ## Architecture Overview
//!
//! The game is organised around a single state-owning store:
//!
//! - **Game State**: plain data describing the player, map, active battle and roster
//! - **Game Store**: the only writer of the state; every change goes through an action
//! - **Movement Engine**: grid movement, collision checks and encounter rolls
//! - **Battle Engine**: the turn-based battle state machine
//! - **Scheduler**: a virtual clock driving the timed battle continuations
//! - **Generation**: wild creature generators and the creature dex
//! - **Rendering / Input**: a thin macroquad front end reading store snapshots
//!
//! Randomness and time are both injected, so every outcome can be reproduced in
//! tests without a window or real delays.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Tallgrass game engine.
#[derive(thiserror::Error, Debug)]
pub enum TallgrassError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Creature violates a stat invariant
    #[error("Invalid creature: {0}")]
    InvalidCreature(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request could not be understood
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl TallgrassError {
    /// HTTP-style status code for lookup service replies.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallgrass::TallgrassError;
    ///
    /// assert_eq!(TallgrassError::NotFound("id 3".into()).status_code(), 404);
    /// assert_eq!(TallgrassError::BadRequest("id x".into()).status_code(), 400);
    /// ```
    pub fn status_code(&self) -> u16 {
        match self {
            TallgrassError::NotFound(_) => 404,
            TallgrassError::BadRequest(_) => 400,
            _ => 500,
        }
    }
}

/// Result type used throughout the Tallgrass codebase.
pub type TallgrassResult<T> = Result<T, TallgrassError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default map width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 20;

    /// Default map height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 15;

    /// Default tile edge in pixels
    pub const DEFAULT_TILE_SIZE: u32 = 32;

    /// Percent chance that a thrown ball holds the wild creature
    pub const DEFAULT_CATCH_THRESHOLD: u32 = 30;

    /// Percent chance that running away succeeds
    pub const DEFAULT_FLEE_THRESHOLD: u32 = 80;

    /// How long the walking flag stays set after a step, in milliseconds
    pub const MOVEMENT_ANIMATION_MS: u64 = 200;

    /// Delay before the opponent retaliates, in milliseconds
    pub const OPPONENT_TURN_MS: u64 = 1500;

    /// Delay between a fatal strike and the faint message, in milliseconds
    pub const FAINT_ANNOUNCE_MS: u64 = 1000;

    /// Delay between the faint message and the end of battle, in milliseconds
    pub const END_AFTER_FAINT_MS: u64 = 2000;

    /// Delay between a capture and the end of battle, in milliseconds
    pub const END_AFTER_CATCH_MS: u64 = 2000;

    /// Delay between a successful escape and the end of battle, in milliseconds
    pub const END_AFTER_ESCAPE_MS: u64 = 1000;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;
}
