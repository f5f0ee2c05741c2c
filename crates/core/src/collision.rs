//! Collision detection in pixel space
//!
//! All predicates are pure. Boundaries are computed from the fixed tile size
//! (45x45) and visible field size (720x450) relative to the configured pixel
//! offset, so edge behaviour is identical to what a renderer draws.

use serde::{Deserialize, Serialize};

use crate::block::ActiveBlock;
use crate::grid::{Grid, Slot};
use crate::tile::TileId;
use crate::types::{CellPos, FIELD_HEIGHT_PX, FIELD_WIDTH_PX, STAGING_ROWS, TILE_SIZE_PX};

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Strict intersection test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Mapping between grid cells and pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Pixel x of the field's left edge
    pub x_offset: i32,
    /// Pixel y of the field's visible top edge
    pub y_offset: i32,
}

impl Geometry {
    pub const fn new(x_offset: i32, y_offset: i32) -> Self {
        Self { x_offset, y_offset }
    }

    /// Top-left pixel of a cell; staging rows sit above `y_offset`
    pub fn cell_origin(&self, pos: CellPos) -> (i32, i32) {
        (
            self.x_offset + TILE_SIZE_PX * pos.x as i32,
            self.y_offset + TILE_SIZE_PX * (pos.y as i32 - STAGING_ROWS as i32),
        )
    }

    pub fn cell_rect(&self, pos: CellPos) -> Rect {
        let (left, top) = self.cell_origin(pos);
        Rect::new(left, top, TILE_SIZE_PX, TILE_SIZE_PX)
    }

    /// Visible play-field rectangle
    pub fn field(&self) -> Rect {
        Rect::new(self.x_offset, self.y_offset, FIELD_WIDTH_PX, FIELD_HEIGHT_PX)
    }
}

/// Check the active block against the field edges and the locked tiles
///
/// True when the block's left edge is left of the field, its left edge is
/// past the last position a 2-wide block fits, its top is past the last
/// position a 2-tall block fits, or any of its tiles overlaps a locked tile.
pub fn block_collides(block: &ActiveBlock, grid: &Grid, geometry: &Geometry) -> bool {
    let (x, y) = geometry.cell_origin(block.origin());
    let field = geometry.field();

    if x < field.left {
        return true;
    }
    if x > field.right() - 2 * TILE_SIZE_PX {
        return true;
    }
    if y > field.bottom() - 2 * TILE_SIZE_PX {
        return true;
    }

    block
        .tiles()
        .iter()
        .any(|tile| overlaps_locked(grid, geometry, tile.cell, None))
}

/// Check a locked tile against the field bottom and every other locked tile
pub fn tile_collides(grid: &Grid, geometry: &Geometry, id: TileId) -> bool {
    cell_collides(grid, geometry, grid.tile(id).cell, Some(id))
}

/// Would a tile placed at `pos` collide
///
/// `ignore` excludes the tile being moved from the overlap test.
pub fn cell_collides(grid: &Grid, geometry: &Geometry, pos: CellPos, ignore: Option<TileId>) -> bool {
    if geometry.cell_rect(pos).bottom() > geometry.field().bottom() {
        return true;
    }
    overlaps_locked(grid, geometry, pos, ignore)
}

/// Spatial query over the locked tiles covering the rectangle of `pos`
///
/// Cells are grid-aligned, so only the cell itself can overlap.
fn overlaps_locked(grid: &Grid, geometry: &Geometry, pos: CellPos, ignore: Option<TileId>) -> bool {
    match grid.try_get(pos) {
        Some(Slot::Occupied(id)) if Some(id) != ignore => {
            let rect = geometry.cell_rect(pos);
            geometry.cell_rect(grid.tile(id).cell).overlaps(&rect)
        }
        _ => false,
    }
}
