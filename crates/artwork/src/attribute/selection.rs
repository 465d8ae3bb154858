//! Random draws against an [`AttributeWeightIntervals`] table.
//!
//! - [rand01]: maps an RNG output into `[0, 1)`.
//! - [AttributeWeightIntervals::draw]: resolves one uniform draw to an attribute.
//! - [pick_uniform]: picks one element of a slice with equal probability.
//!
//! Pass any RNG implementing [rand::RngCore]; a seeded RNG makes the whole selection
//! reproducible.
use rand::RngCore;

use crate::attribute::{Attribute, AttributeWeightIntervals};

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f64 {
    f64::from(rng.next_u32()) / (f64::from(u32::MAX) + 1.0)
}

impl AttributeWeightIntervals {
    /// Draws a uniform value in `[0, 1)` and resolves it.
    pub fn draw(&self, rng: &mut dyn RngCore) -> Option<&Attribute> {
        self.resolve(rand01(rng))
    }
}

/// Picks one element uniformly, or `None` for an empty slice.
pub fn pick_uniform<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = (rand01(rng) * items.len() as f64) as usize;
    items.get(idx.min(items.len() - 1))
}
