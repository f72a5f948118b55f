//! Random sources and the spawn context used to build the node set.
//!
//! All randomness in the crate flows through [`RandomSource`], so tests can
//! swap the real generator for a [`ScriptedRandom`] and predict every node
//! field exactly.
//!
//! Each mobile node consumes eight samples, in this order:
//!
//! | # | field | mapping |
//! |---|-------|---------|
//! | 1 | `position.x` | `u * width` |
//! | 2 | `position.y` | `u * height` |
//! | 3 | `velocity.x` | `(u * 2 - 1) * speed` |
//! | 4 | `velocity.y` | `(u * 2 - 1) * speed` |
//! | 5 | glyph | `floor(u * glyphs.len())` |
//! | 6 | color | `floor(u * palette.len())` |
//! | 7 | opacity | `lerp(opacity, u)` |
//! | 8 | font size | `lerp(font_size, u)` |
//!
//! The anchor node consumes none.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A stream of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for SmallRng {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.gen()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Build the default generator from a seed.
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Replays a fixed sequence of samples, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` so a script can never push a node
/// outside its spawn ranges.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Largest `f32` below one.
    const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

    /// Create a source replaying `values`. An empty script always yields `0.0`.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, Self::BELOW_ONE)
    }
}

/// Helpers for spawning nodes over a rectangular surface.
///
/// Wraps a [`RandomSource`] with the shape-specific sampling the network
/// needs, mirroring how the spawn helpers keep raw RNG calls out of the
/// node construction code.
pub struct SpawnContext<'a, R: RandomSource + ?Sized> {
    /// Surface size nodes are spread over.
    pub bounds: Vec2,
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> SpawnContext<'a, R> {
    /// Create a context spawning into `bounds`.
    pub fn new(bounds: Vec2, rng: &'a mut R) -> Self {
        Self { bounds, rng }
    }

    /// Random sample in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.next_unit()
    }

    /// Random point inside the surface rectangle.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        let x = self.random() * self.bounds.x;
        let y = self.random() * self.bounds.y;
        Vec2::new(x, y)
    }

    /// Random velocity with each component in `[-speed, speed)`.
    pub fn random_velocity(&mut self, speed: f32) -> Vec2 {
        let x = (self.random() * 2.0 - 1.0) * speed;
        let y = (self.random() * 2.0 - 1.0) * speed;
        Vec2::new(x, y)
    }

    /// Random index into a collection of `len` items. `len` must be non-zero.
    pub fn random_index(&mut self, len: usize) -> usize {
        let index = (self.random() * len as f32) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Pick an element uniformly. `None` only for an empty slice.
    pub fn pick<'t, T>(&mut self, items: &'t [T]) -> Option<&'t T> {
        if items.is_empty() {
            return None;
        }
        let index = self.random_index(items.len());
        items.get(index)
    }
}
