//! Render snapshot - read-only view of the engine for drawing
//!
//! The snapshot is plain data: every tile with its colors, cell, pixel
//! top-left and flag corner, plus the wiper line and the upcoming layouts.
//! [`RenderSnapshot`] can be reused across frames through
//! `Engine::snapshot_into`, which only clears and refills its buffers.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::collision::Geometry;
use crate::layout::LayoutId;
use crate::tile::Tile;
use crate::types::{CellPos, Corner, Rgb, LAYOUT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub cell: CellPos,
    /// Pixel top-left corner
    pub pixel: (i32, i32),
    pub flag: Option<Corner>,
}

impl TileView {
    pub fn new(tile: &Tile, geometry: &Geometry) -> Self {
        Self {
            primary: tile.primary,
            secondary: tile.secondary,
            cell: tile.cell,
            pixel: geometry.cell_origin(tile.cell),
            flag: tile.flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Locked tiles in row-major order
    pub locked: Vec<TileView>,
    /// Falling block tiles (empty when no block is active)
    pub active: ArrayVec<TileView, 4>,
    /// Integer pixel x of the wiper line
    pub wiper_x: i32,
    pub next_layouts: [LayoutId; LAYOUT_QUEUE_LEN],
    pub soft_drop: bool,
    pub spawn_blocked: bool,
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            locked: Vec::new(),
            active: ArrayVec::new(),
            wiper_x: 0,
            next_layouts: [LayoutId::FIRST; LAYOUT_QUEUE_LEN],
            soft_drop: false,
            spawn_blocked: false,
        }
    }
}

impl RenderSnapshot {
    /// Reset to the empty state, keeping buffer capacity
    pub fn clear(&mut self) {
        self.locked.clear();
        self.active.clear();
        self.wiper_x = 0;
        self.next_layouts = [LayoutId::FIRST; LAYOUT_QUEUE_LEN];
        self.soft_drop = false;
        self.spawn_blocked = false;
    }

    /// Locked tiles that belong to a matched square
    pub fn flagged(&self) -> impl Iterator<Item = &TileView> + '_ {
        self.locked.iter().filter(|t| t.flag.is_some())
    }
}
