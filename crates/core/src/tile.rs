//! Tile module - a single colored cell
//!
//! A tile carries its two colors, the cell it occupies and its flag state.
//! While falling it is owned by value by the active block; once locked it
//! lives in the grid's arena and is addressed by [`TileId`].

use serde::{Deserialize, Serialize};

use crate::types::{CellPos, Corner, Rgb};

/// Handle of a locked tile inside the grid arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub(crate) u32);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Color used for matching
    pub primary: Rgb,
    /// Lining color
    pub secondary: Rgb,
    pub cell: CellPos,
    /// Corner role inside a matched square, `None` while unflagged
    pub flag: Option<Corner>,
}

impl Tile {
    pub fn new(primary: Rgb, secondary: Rgb, cell: CellPos) -> Self {
        Self {
            primary,
            secondary,
            cell,
            flag: None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }

    /// Mark the tile as part of a matched square
    pub fn flag(&mut self, corner: Corner) {
        self.flag = Some(corner);
    }

    pub fn move_left(&mut self) {
        self.cell = self.cell.left();
    }

    pub fn move_right(&mut self) {
        self.cell = self.cell.right();
    }

    pub fn move_down(&mut self) {
        self.cell = self.cell.below();
    }

    pub fn move_up(&mut self) {
        self.cell = self.cell.above();
    }

    /// Whether two tiles match for clustering purposes
    pub fn same_color(&self, other: &Tile) -> bool {
        self.primary == other.primary
    }
}
