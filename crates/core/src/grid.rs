//! Grid module - occupancy map of locked tiles
//!
//! The grid is a fixed 16x12 array of slots, each either empty or holding the
//! id of a locked tile. Locked tiles themselves live in an arena owned by the
//! grid, so the grid is the single source of truth for everything that has
//! landed.
//!
//! Coordinates: (x, y) where x ranges 0..15 (left to right) and y ranges 0..11
//! (top to bottom). Rows 0 and 1 are staging rows above the visible field.
//!
//! Invariant: every occupied slot at `pos` holds a tile whose `cell == pos`.
//! Every relocation of a locked tile goes through [`Grid::swap`].

use crate::error::EngineError;
use crate::tile::{Tile, TileId};
use crate::types::{CellPos, GRID_COLUMNS, GRID_ROWS, SPAWN_COLUMN, SPAWN_ROW};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_COLUMNS as usize) * (GRID_ROWS as usize);

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(TileId),
}

impl Slot {
    pub fn tile_id(self) -> Option<TileId> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(id) => Some(id),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    /// Flat array of slots, row-major order (y * WIDTH + x)
    slots: [Slot; GRID_SIZE],
    /// Tile arena indexed by `TileId`
    tiles: Vec<Option<Tile>>,
    /// Arena indices available for reuse
    free: Vec<u32>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            slots: [Slot::Empty; GRID_SIZE],
            tiles: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Calculate flat index from a cell position
    #[inline(always)]
    fn index(pos: CellPos) -> Option<usize> {
        if !pos.in_grid() {
            return None;
        }
        Some((pos.y as usize) * (GRID_COLUMNS as usize) + (pos.x as usize))
    }

    #[inline]
    fn index_or_panic(pos: CellPos) -> usize {
        match Self::index(pos) {
            Some(idx) => idx,
            None => panic!("cell ({}, {}) is outside the grid", pos.x, pos.y),
        }
    }

    pub fn width(&self) -> u8 {
        GRID_COLUMNS
    }

    pub fn height(&self) -> u8 {
        GRID_ROWS
    }

    /// Slot at `pos`
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Callers validate positions with
    /// the collision checks first; use [`Grid::try_get`] to probe.
    pub fn get(&self, pos: CellPos) -> Slot {
        self.slots[Self::index_or_panic(pos)]
    }

    /// Slot at `pos`, or `None` if out of bounds
    pub fn try_get(&self, pos: CellPos) -> Option<Slot> {
        Self::index(pos).map(|idx| self.slots[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, pos: CellPos) -> bool {
        matches!(self.try_get(pos), Some(Slot::Occupied(_)))
    }

    /// Locked tile at `pos`, if any
    pub fn tile_at(&self, pos: CellPos) -> Option<&Tile> {
        self.try_get(pos)
            .and_then(Slot::tile_id)
            .map(|id| self.tile(id))
    }

    /// Write a slot directly, returning the tile it evicted
    ///
    /// `Empty` removes the tile at `pos` from the grid. `Occupied(id)` moves
    /// tile `id` to `pos`, vacating its previous cell and evicting any other
    /// tile held there.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid or `id` is stale.
    pub fn set(&mut self, pos: CellPos, slot: Slot) -> Option<Tile> {
        let idx = Self::index_or_panic(pos);
        let current = self.slots[idx];
        let evicted = match current {
            Slot::Occupied(old) if slot != Slot::Occupied(old) => Some(self.remove(old)),
            _ => None,
        };
        if let Slot::Occupied(id) = slot {
            self.swap(pos, id);
        }
        evicted
    }

    /// Take ownership of a tile and lock it at its own cell
    pub fn insert(&mut self, tile: Tile) -> Result<TileId, EngineError> {
        let idx = Self::index(tile.cell).ok_or(EngineError::out_of_bounds(tile.cell))?;
        if !self.slots[idx].is_empty() {
            return Err(EngineError::occupied(tile.cell));
        }

        let id = match self.free.pop() {
            Some(raw) => {
                self.tiles[raw as usize] = Some(tile);
                TileId(raw)
            }
            None => {
                self.tiles.push(Some(tile));
                TileId((self.tiles.len() - 1) as u32)
            }
        };
        self.slots[idx] = Slot::Occupied(id);
        Ok(id)
    }

    /// Move tile `id` to `pos`, emptying the cell it came from
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid or holds a different tile.
    pub fn swap(&mut self, pos: CellPos, id: TileId) {
        let from = self.tile(id).cell;
        if from == pos {
            return;
        }
        let to_idx = Self::index_or_panic(pos);
        assert!(
            self.slots[to_idx].is_empty(),
            "cannot move tile into occupied cell ({}, {})",
            pos.x,
            pos.y
        );

        let from_idx = Self::index_or_panic(from);
        self.slots[from_idx] = Slot::Empty;
        self.slots[to_idx] = Slot::Occupied(id);
        self.tile_mut(id).cell = pos;
    }

    /// Remove a locked tile from the grid and the arena
    pub fn remove(&mut self, id: TileId) -> Tile {
        let tile = match self.tiles.get_mut(id.index()).and_then(Option::take) {
            Some(tile) => tile,
            None => panic!("stale tile id {:?}", id),
        };
        if let Some(idx) = Self::index(tile.cell) {
            if self.slots[idx] == Slot::Occupied(id) {
                self.slots[idx] = Slot::Empty;
            }
        }
        self.free.push(id.0);
        tile
    }

    /// Locked tile by id
    ///
    /// # Panics
    ///
    /// Panics on an id whose tile has been removed.
    pub fn tile(&self, id: TileId) -> &Tile {
        match self.tiles.get(id.index()).and_then(Option::as_ref) {
            Some(tile) => tile,
            None => panic!("stale tile id {:?}", id),
        }
    }

    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        match self.tiles.get_mut(id.index()).and_then(Option::as_mut) {
            Some(tile) => tile,
            None => panic!("stale tile id {:?}", id),
        }
    }

    pub fn contains(&self, id: TileId) -> bool {
        matches!(self.tiles.get(id.index()), Some(Some(_)))
    }

    /// All locked tiles in grid order (row-major)
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.tile_id())
            .map(move |id| (id, self.tile(id)))
    }

    /// Number of locked tiles
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_empty())
    }

    /// Check if any cell of the spawn square is taken
    pub fn is_spawn_blocked(&self) -> bool {
        (0..2).any(|dy| {
            (0..2).any(|dx| self.is_occupied(CellPos::new(SPAWN_COLUMN + dx, SPAWN_ROW + dy)))
        })
    }

    /// Whether every occupied slot points at a live tile whose cell matches
    ///
    /// Cheap enough for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let live = self.tiles.iter().filter(|t| t.is_some()).count();
        let occupied = self.len();
        live == occupied
            && (0..GRID_ROWS as i8).all(|y| {
                (0..GRID_COLUMNS as i8).all(|x| {
                    let pos = CellPos::new(x, y);
                    match self.get(pos) {
                        Slot::Empty => true,
                        Slot::Occupied(id) => self.contains(id) && self.tile(id).cell == pos,
                    }
                })
            })
    }

    /// Remove every locked tile
    pub fn clear(&mut self) {
        self.slots = [Slot::Empty; GRID_SIZE];
        self.tiles.clear();
        self.free.clear();
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    fn red(x: i8, y: i8) -> Tile {
        Tile::new(Rgb::RED, Rgb::WHITE, CellPos::new(x, y))
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(CellPos::new(0, 0)), Some(0));
        assert_eq!(Grid::index(CellPos::new(15, 0)), Some(15));
        assert_eq!(Grid::index(CellPos::new(0, 1)), Some(16));
        assert_eq!(Grid::index(CellPos::new(15, 11)), Some(191));
        assert_eq!(Grid::index(CellPos::new(-1, 0)), None);
        assert_eq!(Grid::index(CellPos::new(16, 0)), None);
        assert_eq!(Grid::index(CellPos::new(0, 12)), None);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut grid = Grid::new();
        let id = grid.insert(red(3, 5)).unwrap();

        assert_eq!(grid.get(CellPos::new(3, 5)), Slot::Occupied(id));
        assert_eq!(grid.tile(id).cell, CellPos::new(3, 5));
        assert_eq!(grid.len(), 1);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_insert_rejects_occupied_and_out_of_bounds() {
        let mut grid = Grid::new();
        grid.insert(red(3, 5)).unwrap();

        assert_eq!(
            grid.insert(red(3, 5)),
            Err(EngineError::CellOccupied { x: 3, y: 5 })
        );
        assert_eq!(
            grid.insert(red(16, 0)),
            Err(EngineError::OutOfBounds { x: 16, y: 0 })
        );
    }

    #[test]
    fn test_swap_moves_tile_and_empties_source() {
        let mut grid = Grid::new();
        let id = grid.insert(red(4, 3)).unwrap();

        grid.swap(CellPos::new(4, 9), id);

        assert_eq!(grid.get(CellPos::new(4, 3)), Slot::Empty);
        assert_eq!(grid.get(CellPos::new(4, 9)), Slot::Occupied(id));
        assert_eq!(grid.tile(id).cell, CellPos::new(4, 9));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_swap_to_own_cell_is_noop() {
        let mut grid = Grid::new();
        let id = grid.insert(red(4, 3)).unwrap();
        grid.swap(CellPos::new(4, 3), id);
        assert_eq!(grid.get(CellPos::new(4, 3)), Slot::Occupied(id));
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn test_swap_into_occupied_panics() {
        let mut grid = Grid::new();
        let a = grid.insert(red(1, 1)).unwrap();
        grid.insert(red(1, 2)).unwrap();
        grid.swap(CellPos::new(1, 2), a);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn test_get_out_of_bounds_fails_fast() {
        let grid = Grid::new();
        grid.get(CellPos::new(0, -1));
    }

    #[test]
    fn test_remove_frees_cell_and_reuses_id() {
        let mut grid = Grid::new();
        let a = grid.insert(red(0, 11)).unwrap();
        let tile = grid.remove(a);

        assert_eq!(tile.cell, CellPos::new(0, 11));
        assert_eq!(grid.get(CellPos::new(0, 11)), Slot::Empty);
        assert!(!grid.contains(a));

        let b = grid.insert(red(5, 5)).unwrap();
        assert_eq!(a, b);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_spawn_blocked() {
        let mut grid = Grid::new();
        assert!(!grid.is_spawn_blocked());
        grid.insert(red(8, 1)).unwrap();
        assert!(grid.is_spawn_blocked());
    }

    #[test]
    fn test_set_empty_removes_tile() {
        let mut grid = Grid::new();
        let id = grid.insert(red(2, 2)).unwrap();

        let evicted = grid.set(CellPos::new(2, 2), Slot::Empty);

        assert_eq!(evicted.map(|t| t.cell), Some(CellPos::new(2, 2)));
        assert!(grid.is_empty());
        assert!(!grid.contains(id));
        assert!(grid.is_consistent());
        assert_eq!(grid.set(CellPos::new(2, 2), Slot::Empty), None);
    }

    #[test]
    fn test_set_occupied_moves_tile() {
        let mut grid = Grid::new();
        let id = grid.insert(red(1, 1)).unwrap();

        assert_eq!(grid.set(CellPos::new(2, 2), Slot::Occupied(id)), None);

        assert_eq!(grid.get(CellPos::new(1, 1)), Slot::Empty);
        assert_eq!(grid.get(CellPos::new(2, 2)), Slot::Occupied(id));
        assert_eq!(grid.len(), 1);
        assert!(grid.is_consistent());

        grid.remove(id);
        assert_eq!(grid.tiles().count(), 0);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_set_occupied_evicts_other_tile() {
        let mut grid = Grid::new();
        let a = grid.insert(red(1, 1)).unwrap();
        let b = grid.insert(Tile::new(Rgb::WHITE, Rgb::RED, CellPos::new(4, 4))).unwrap();

        let evicted = grid.set(CellPos::new(4, 4), Slot::Occupied(a));

        assert_eq!(evicted.map(|t| t.primary), Some(Rgb::WHITE));
        assert!(!grid.contains(b));
        assert_eq!(grid.tile(a).cell, CellPos::new(4, 4));
        assert_eq!(grid.len(), 1);
        assert!(grid.is_consistent());

        // Writing a tile over itself is a no-op.
        assert_eq!(grid.set(CellPos::new(4, 4), Slot::Occupied(a)), None);
        assert!(grid.is_consistent());
    }
}
