//! RNG module - injectable random sources for shape (and color) selection
//!
//! Every new queue entry draws a uniformly random shape. The source is a trait so a
//! session can run on a seeded LCG in play and on a scripted sequence in tests.

use std::collections::VecDeque;

use crate::types::{ShapeKind, SHAPE_COUNT};

/// Something that can pick the next shape and color id
pub trait ShapeSource {
    /// Random value in `[0, bound)`
    fn next_below(&mut self, bound: u32) -> u32;

    /// Uniformly random shape
    fn next_shape(&mut self) -> ShapeKind {
        let idx = self.next_below(SHAPE_COUNT as u32) as usize;
        ShapeKind::ALL[idx % SHAPE_COUNT]
    }

    /// Uniformly random color id
    fn next_color(&mut self) -> u8 {
        self.next_below(SHAPE_COUNT as u32) as u8
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }

    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }

    fn next_color(&mut self) -> u8 {
        (**self).next_color()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (enough to replay the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_range(bound)
    }
}

/// Replays a fixed shape sequence, cycling when exhausted.
///
/// Colors follow the most recently drawn shape. Used to make queue and
/// spawn-conflict scenarios reproducible.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    shapes: VecDeque<ShapeKind>,
    last: Option<ShapeKind>,
}

impl ScriptedSource {
    /// An empty script falls back to `ShapeKind::O`
    pub fn new(shapes: impl IntoIterator<Item = ShapeKind>) -> Self {
        Self {
            shapes: shapes.into_iter().collect(),
            last: None,
        }
    }

    /// Parse a script such as `"ioltsz"`; unknown characters are skipped
    pub fn from_letters(letters: &str) -> Self {
        Self::new(
            letters
                .chars()
                .filter_map(|ch| ShapeKind::from_str(&ch.to_string())),
        )
    }
}

impl ShapeSource for ScriptedSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        let shape = self.next_shape();
        shape.index() as u32 % bound.max(1)
    }

    fn next_shape(&mut self) -> ShapeKind {
        let shape = match self.shapes.pop_front() {
            Some(shape) => {
                self.shapes.push_back(shape);
                shape
            }
            None => ShapeKind::O,
        };
        self.last = Some(shape);
        shape
    }

    fn next_color(&mut self) -> u8 {
        self.last.map_or(0, |shape| shape.index() as u8)
    }
}
