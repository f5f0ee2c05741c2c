//! RNG module - layout queue generation
//!
//! The layout queue holds the next four layout ids. Each draw pops the front
//! id and appends one fresh uniformly random id in `1..=6`. A seeded queue
//! opens with the fixed sequence `[1, 2, 6, 1]` so that the first blocks of
//! every game are reproducible.
//!
//! Randomness comes from a simple LCG so that a whole game is replayable
//! from its seed.

use std::collections::VecDeque;

use crate::layout::LayoutId;
use crate::types::{LAYOUT_COUNT, LAYOUT_QUEUE_LEN, SEEDED_LAYOUTS};

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
        // The low bits of an LCG have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// FIFO of upcoming block layouts
#[derive(Debug, Clone)]
pub struct LayoutQueue {
    pending: VecDeque<LayoutId>,
    rng: SimpleRng,
}

impl LayoutQueue {
    /// Queue opening with the fixed `[1, 2, 6, 1]` sequence
    pub fn seeded(seed: u32) -> Self {
        let pending = SEEDED_LAYOUTS
            .iter()
            .filter_map(|&id| LayoutId::new(id).ok())
            .collect();
        Self {
            pending,
            rng: SimpleRng::new(seed),
        }
    }

    /// Queue filled entirely with random layouts
    pub fn random(seed: u32) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(LAYOUT_QUEUE_LEN),
            rng: SimpleRng::new(seed),
        };
        for _ in 0..LAYOUT_QUEUE_LEN {
            let id = queue.random_layout();
            queue.pending.push_back(id);
        }
        queue
    }

    /// Draw a uniformly random layout without touching the queue order
    ///
    /// Also the fallback for callers holding an invalid raw layout id.
    pub fn random_layout(&mut self) -> LayoutId {
        let id = 1 + self.rng.next_range(LAYOUT_COUNT as u32) as u8;
        // `id` is in 1..=LAYOUT_COUNT by construction.
        LayoutId::new(id).unwrap_or(LayoutId::FIRST)
    }

    /// Pop the next layout and append a fresh random one
    pub fn next(&mut self) -> LayoutId {
        let refill = self.random_layout();
        self.pending.push_back(refill);
        self.pending.pop_front().unwrap_or(refill)
    }

    /// Upcoming layouts, front first
    pub fn peek(&self) -> [LayoutId; LAYOUT_QUEUE_LEN] {
        let mut out = [LayoutId::FIRST; LAYOUT_QUEUE_LEN];
        for (slot, id) in out.iter_mut().zip(self.pending.iter()) {
            *slot = *id;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Current RNG state (restarting from it reproduces the rest of the sequence)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for LayoutQueue {
    fn default() -> Self {
        Self::seeded(1)
    }
}
