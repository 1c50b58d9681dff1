//! # Rendering Module
//!
//! Macroquad front end. Reads `&GameState`, never writes it.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
