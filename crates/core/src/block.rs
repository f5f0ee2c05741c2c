//! Active block - the falling 2x2 unit
//!
//! The block owns its four tiles by value until it lands. A corner table maps
//! each corner role (TL, TR, BR, BL) to the tile currently playing it, so a
//! rotation is four one-cell tile moves plus a cyclic shift of the table.
//!
//! Movement never checks collisions. Every operation has an exact inverse
//! (`move_left`/`move_right`, `move_down`/`move_up`,
//! `rotate_clockwise`/`rotate_counterclockwise`) which the caller applies
//! when the collision check rejects the new position.

use crate::config::Palette;
use crate::layout::LayoutId;
use crate::tile::Tile;
use crate::types::{CellPos, Corner, SPAWN_COLUMN, SPAWN_ROW};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBlock {
    tiles: [Tile; 4],
    /// Tile index playing each corner role, indexed by `Corner::index`
    corners: [usize; 4],
    /// Cached (min column, min row) of the four tiles
    origin: CellPos,
    layout: LayoutId,
}

impl ActiveBlock {
    /// Build a block at the spawn position above the visible field
    pub fn spawn(layout: LayoutId, palette: &Palette) -> Self {
        Self::at(layout, palette, CellPos::new(SPAWN_COLUMN, SPAWN_ROW))
    }

    /// Build a block with its top-left tile at `origin`
    pub fn at(layout: LayoutId, palette: &Palette, origin: CellPos) -> Self {
        let swatches = layout.swatches();
        let tiles = Corner::ALL.map(|corner| {
            let (dx, dy) = corner.offset();
            let (primary, secondary) = swatches[corner.index()].colors(palette);
            Tile::new(primary, secondary, origin.offset(dx, dy))
        });

        Self {
            tiles,
            corners: [0, 1, 2, 3],
            origin,
            layout,
        }
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn tiles(&self) -> &[Tile; 4] {
        &self.tiles
    }

    /// Tile currently playing `corner`
    pub fn corner_tile(&self, corner: Corner) -> &Tile {
        &self.tiles[self.corners[corner.index()]]
    }

    /// Top-left cell of the block's bounding square
    pub fn origin(&self) -> CellPos {
        self.origin
    }

    pub fn cells(&self) -> [CellPos; 4] {
        self.tiles.map(|t| t.cell)
    }

    /// Hand the tiles over (used when the block lands)
    pub fn into_tiles(self) -> [Tile; 4] {
        self.tiles
    }

    fn refresh_origin(&mut self) {
        let x = self.tiles.iter().map(|t| t.cell.x).min().unwrap_or(self.origin.x);
        let y = self.tiles.iter().map(|t| t.cell.y).min().unwrap_or(self.origin.y);
        self.origin = CellPos::new(x, y);
    }

    pub fn move_left(&mut self) {
        self.tiles.iter_mut().for_each(Tile::move_left);
        self.refresh_origin();
    }

    pub fn move_right(&mut self) {
        self.tiles.iter_mut().for_each(Tile::move_right);
        self.refresh_origin();
    }

    pub fn move_down(&mut self) {
        self.tiles.iter_mut().for_each(Tile::move_down);
        self.refresh_origin();
    }

    pub fn move_up(&mut self) {
        self.tiles.iter_mut().for_each(Tile::move_up);
        self.refresh_origin();
    }

    /// Quarter turn clockwise
    ///
    /// TL moves right, TR down, BR left, BL up; each tile then plays the next
    /// corner clockwise.
    pub fn rotate_clockwise(&mut self) {
        let [tl, tr, br, bl] = self.corners;
        self.tiles[tl].move_right();
        self.tiles[tr].move_down();
        self.tiles[br].move_left();
        self.tiles[bl].move_up();
        self.corners = [bl, tl, tr, br];
    }

    /// Quarter turn counter-clockwise, the exact inverse of `rotate_clockwise`
    pub fn rotate_counterclockwise(&mut self) {
        let [tl, tr, br, bl] = self.corners;
        self.tiles[tl].move_down();
        self.tiles[tr].move_left();
        self.tiles[br].move_up();
        self.tiles[bl].move_right();
        self.corners = [tr, br, bl, tl];
    }
}
