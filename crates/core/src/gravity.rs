//! Gravity resolver - delayed drop of tiles left hanging over empty cells
//!
//! Cells are queued per column when a block lands or when destruction opens
//! a gap. A countdown only runs while something is pending; when it fires,
//! every queued tile drops straight down as far as it can (bottom rows
//! first, so the tiles underneath have already settled) and each processed
//! tile is re-scanned for new 2x2 matches.
//!
//! Cells of the falling block are obstacles too. A tile stopped by one stays
//! queued, so it drops the rest of the way if the block moves off.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::collision::{cell_collides, Geometry};
use crate::destruction::{DestructionManager, ExposedRows};
use crate::grid::Grid;
use crate::matcher::check_2x2;
use crate::tile::TileId;
use crate::types::{CellPos, GRID_ROWS, TILE_DROP_WAIT};

#[derive(Debug, Clone, Default)]
pub struct GravityResolver {
    /// Column -> queued rows
    pending: BTreeMap<i8, BTreeSet<i8>>,
    /// Seconds accumulated toward the next drop pass
    timer: f32,
}

impl GravityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one cell for the next drop pass
    pub fn queue(&mut self, pos: CellPos) {
        self.pending.entry(pos.x).or_default().insert(pos.y);
    }

    /// Queue every tile that now hangs over a gap in the reported columns
    pub fn seed(&mut self, exposed: &ExposedRows, grid: &Grid) {
        for (x, _) in exposed.iter() {
            let mut gap_below = false;
            for y in (0..GRID_ROWS as i8).rev() {
                let pos = CellPos::new(x, y);
                if !grid.is_occupied(pos) {
                    gap_below = true;
                } else if gap_below {
                    self.queue(pos);
                }
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queued cells, column by column, bottom row first
    pub fn pending(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.pending
            .iter()
            .flat_map(|(&x, rows)| rows.iter().rev().map(move |&y| CellPos::new(x, y)))
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the countdown and run a drop pass once it fires
    ///
    /// `obstacles` are the cells of the falling block. Returns the tiles
    /// processed by the pass (empty on frames where the countdown is still
    /// running or nothing is queued).
    pub fn update(
        &mut self,
        elapsed: f32,
        grid: &mut Grid,
        geometry: &Geometry,
        destroyers: &mut DestructionManager,
        obstacles: &[CellPos],
    ) -> Vec<TileId> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        if self.timer < TILE_DROP_WAIT {
            self.timer += elapsed;
            return Vec::new();
        }
        self.timer = 0.0;

        let processed = self.drop_pending(grid, geometry, obstacles);
        let mut squares = 0;
        for &id in &processed {
            let cell = grid.tile(id).cell;
            squares += check_2x2(grid, destroyers, geometry, cell);
        }
        debug!(
            "gravity pass: {} tiles processed, {} squares found",
            processed.len(),
            squares
        );
        processed
    }

    /// Drop every queued tile; tiles held up by an obstacle are re-queued
    fn drop_pending(
        &mut self,
        grid: &mut Grid,
        geometry: &Geometry,
        obstacles: &[CellPos],
    ) -> Vec<TileId> {
        let mut processed = Vec::new();
        let pending = std::mem::take(&mut self.pending);

        for (x, rows) in pending {
            // Set once a tile in this column rests on the falling block.
            let mut held = false;
            for y in rows.into_iter().rev() {
                let from = CellPos::new(x, y);
                let Some(id) = grid.try_get(from).and_then(|slot| slot.tile_id()) else {
                    continue;
                };

                let mut to = from;
                while !cell_collides(grid, geometry, to.below(), Some(id))
                    && !obstacles.contains(&to.below())
                {
                    to = to.below();
                }
                if to != from {
                    grid.swap(to, id);
                    trace!("tile ({}, {}) dropped to row {}", x, y, to.y);
                }
                if held || obstacles.contains(&to.below()) {
                    held = true;
                    trace!("tile ({}, {}) held by the falling block", x, to.y);
                    self.queue(to);
                    continue;
                }
                processed.push(id);
            }
        }
        processed
    }

    /// Drop every queued cell and reset the countdown
    pub fn clear(&mut self) {
        self.pending.clear();
        self.timer = 0.0;
    }
}
