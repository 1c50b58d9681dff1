//! # Game Mathematics
//!
//! Level scaling used when the dex rolls a creature.

/// Multiplier applied to base stats for a creature of `level`.
///
/// # Examples
///
/// ```
/// use tallgrass::scale_factor;
///
/// assert_eq!(scale_factor(50), 2.0);
/// ```
pub fn scale_factor(level: u32) -> f64 {
    1.0 + (level as f64 / 100.0) * 2.0
}

/// A base stat scaled to `level`, floored.
pub fn scaled_stat(base: u32, level: u32) -> u32 {
    (base as f64 * scale_factor(level)).floor() as u32
}

/// How many of a species' moves a creature of `level` knows.
///
/// Two moves to begin with, one more at level 10 and another at level 20.
pub fn move_slots(level: u32) -> usize {
    2 + (level / 10).min(2) as usize
}
