//! # Random Sources
//!
//! Every random decision in the game (encounter rolls, catch and escape rolls,
//! opponent move choice, wild creature generation) is drawn from a [`Dice`]
//! owned by the store, so outcomes can be seeded or scripted.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the random draws used by the engines.
pub trait Dice {
    /// Uniform value in `[0, 100)`.
    fn percent(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in `[low, high]`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.index((high - low + 1) as usize) as u32
    }
}

/// Reproducible dice backed by a seeded [`StdRng`].
///
/// # Examples
///
/// ```
/// use tallgrass::{Dice, SeededDice};
///
/// let mut a = SeededDice::new(7);
/// let mut b = SeededDice::new(7);
/// assert_eq!(a.index(100), b.index(100));
/// ```
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    /// Creates dice from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn percent(&mut self) -> f64 {
        let roll = self.rng.gen_range(0.0..100.0);
        trace!("percent roll {:.2}", roll);
        roll
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay scripted values, for forcing outcomes in tests and demos.
///
/// Percent and index draws come from separate queues. Once a queue runs dry
/// its last value repeats; a queue that was never filled yields 0.
///
/// # Examples
///
/// ```
/// use tallgrass::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new().with_percents([99.0, 5.0]);
/// assert_eq!(dice.percent(), 99.0);
/// assert_eq!(dice.percent(), 5.0);
/// assert_eq!(dice.percent(), 5.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    percents: VecDeque<f64>,
    indices: VecDeque<usize>,
    last_percent: f64,
    last_index: usize,
}

impl ScriptedDice {
    /// Creates dice with empty scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dice whose every percent draw is `value`.
    pub fn always(value: f64) -> Self {
        Self::new().with_percents([value])
    }

    /// Appends percent draws.
    pub fn with_percents(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.percents.extend(values);
        self
    }

    /// Appends index draws. Values are reduced modulo the requested length.
    pub fn with_indices(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(values);
        self
    }
}

impl Dice for ScriptedDice {
    fn percent(&mut self) -> f64 {
        if let Some(value) = self.percents.pop_front() {
            self.last_percent = value;
        }
        self.last_percent
    }

    fn index(&mut self, len: usize) -> usize {
        if let Some(value) = self.indices.pop_front() {
            self.last_index = value;
        }
        if len == 0 {
            return 0;
        }
        self.last_index % len
    }
}
