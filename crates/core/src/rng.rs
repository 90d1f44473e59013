//! RNG module - shuffle-bag piece generation
//!
//! Every refill appends one copy of each catalog template, each with a random
//! spawn orientation, in Fisher-Yates shuffled order. A template therefore
//! never waits more than two batches for its next appearance.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::pieces::{Catalog, PieceInstance, PieceTemplate};
use crate::types::Rotation;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of an LCG with a power-of-two modulus
    /// cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state, usable as a seed to replay from here.
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Shuffle-bag piece queue
#[derive(Debug, Clone)]
pub struct PieceQueue {
    templates: Vec<Arc<PieceTemplate>>,
    queue: VecDeque<PieceInstance>,
    low_water_mark: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a queue over `catalog`, filled past the low-water mark.
    pub fn new(catalog: &Catalog, low_water_mark: usize, seed: u32) -> Self {
        let mut queue = Self {
            templates: catalog.templates().to_vec(),
            queue: VecDeque::new(),
            low_water_mark,
            rng: SimpleRng::new(seed),
        };
        while queue.queue.len() <= queue.low_water_mark {
            queue.refill();
        }
        queue
    }

    /// Append one shuffled batch holding every template once.
    pub fn refill(&mut self) {
        let mut batch: Vec<PieceInstance> = self
            .templates
            .iter()
            .map(|template| {
                let rotation = Rotation::from_index(self.rng.next_range(4));
                PieceInstance::new(Arc::clone(template), rotation)
            })
            .collect();
        self.rng.shuffle(&mut batch);
        self.queue.extend(batch);
    }

    /// Remove and return the head of the queue.
    ///
    /// Refills after the pop whenever the remaining length is at or below the
    /// low-water mark, so the queue is never left empty.
    pub fn pop(&mut self) -> PieceInstance {
        // `new` fills past the mark and every pop refills at the mark, and a
        // catalog is never empty, so there is always a head.
        let Some(piece) = self.queue.pop_front() else {
            unreachable!("piece queue drained below its low-water mark");
        };
        if self.queue.len() <= self.low_water_mark {
            self.refill();
        }
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<&PieceInstance> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn low_water_mark(&self) -> usize {
        self.low_water_mark
    }

    /// Queued pieces in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &PieceInstance> {
        self.queue.iter()
    }

    /// Get the current RNG state (for restarting a game with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
