//! Destruction manager - wiper-gated removal of matched tiles
//!
//! Matched squares are collected into destroyer sets. A square that shares a
//! tile with existing sets is merged into them (collapsing every set it
//! touches into one), so a large same-color region built from overlapping
//! 2x2 detections ends up as a single set.
//!
//! Each frame every set is tested against the wiper's rectangle and steps a
//! small hysteresis machine:
//!
//! ```text
//!            no overlap               overlap              no overlap
//!   Idle ──────────────▶ Ready ──────────────▶ Killed ──────────────▶ finalized
//!    │ overlap: stay       │ no overlap: stay     │ overlap: stay
//! ```
//!
//! Destruction therefore fires only once the wiper has entered the set after
//! it was primed and then left it again, never on first contact.

use log::debug;

use crate::collision::{Geometry, Rect};
use crate::grid::Grid;
use crate::tile::TileId;
use crate::types::GRID_COLUMNS;
use crate::wiper::Wiper;

/// Sweep state of a destroyer set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepPhase {
    /// Created (or still) under the wiper, not yet primed
    Idle,
    /// Seen clear of the wiper; the next contact kills it
    Ready,
    /// Touched by the wiper after priming; removed once the wiper leaves
    Killed,
}

/// Per-column topmost row emptied by finalized sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExposedRows {
    rows: [Option<i8>; GRID_COLUMNS as usize],
}

impl ExposedRows {
    /// Record an emptied cell, keeping the smallest row per column
    pub fn record(&mut self, x: i8, y: i8) {
        let Some(slot) = self.rows.get_mut(x as usize) else {
            return;
        };
        *slot = Some(match *slot {
            Some(row) => row.min(y),
            None => y,
        });
    }

    pub fn merge(&mut self, other: &ExposedRows) {
        for (x, y) in other.iter() {
            self.record(x, y);
        }
    }

    pub fn get(&self, x: i8) -> Option<i8> {
        self.rows.get(x as usize).copied().flatten()
    }

    /// `(column, row)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(x, row)| row.map(|y| (x as i8, y)))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Option::is_none)
    }
}

/// A merged group of flagged tiles awaiting the wiper
#[derive(Debug, Clone, PartialEq)]
pub struct DestroyerSet {
    tiles: Vec<TileId>,
    /// Rightmost pixel edge of any member
    max_right: i32,
    phase: SweepPhase,
}

impl DestroyerSet {
    fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(4),
            max_right: 0,
            phase: SweepPhase::Idle,
        }
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains(&id)
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn max_right(&self) -> i32 {
        self.max_right
    }

    fn add_tiles(&mut self, ids: &[TileId], grid: &Grid, geometry: &Geometry) {
        for &id in ids {
            if !self.tiles.contains(&id) {
                self.tiles.push(id);
            }
            let right = geometry.cell_rect(grid.tile(id).cell).right();
            self.max_right = self.max_right.max(right);
        }
    }

    fn absorb(&mut self, other: DestroyerSet) {
        for id in other.tiles {
            if !self.tiles.contains(&id) {
                self.tiles.push(id);
            }
        }
        self.max_right = self.max_right.max(other.max_right);
    }

    fn touches(&self, wiper: &Rect, grid: &Grid, geometry: &Geometry) -> bool {
        self.tiles
            .iter()
            .any(|&id| geometry.cell_rect(grid.tile(id).cell).overlaps(wiper))
    }

    /// Remove every member from the grid, reporting the topmost row per
    /// column and the number of tiles removed
    fn finalize(&mut self, grid: &mut Grid) -> (ExposedRows, usize) {
        let mut exposed = ExposedRows::default();
        let mut removed = 0;
        for id in self.tiles.drain(..) {
            if !grid.contains(id) {
                continue;
            }
            let tile = grid.remove(id);
            exposed.record(tile.cell.x, tile.cell.y);
            removed += 1;
        }
        (exposed, removed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DestructionManager {
    sets: Vec<DestroyerSet>,
    /// Tiles removed by finalized sets since creation or the last clear
    destroyed: usize,
}

impl DestructionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a matched group, merging with every set it shares a tile with
    pub fn add(&mut self, group: &[TileId], grid: &Grid, geometry: &Geometry) {
        let hits: Vec<usize> = self
            .sets
            .iter()
            .enumerate()
            .filter(|(_, set)| group.iter().any(|&id| set.contains(id)))
            .map(|(i, _)| i)
            .collect();

        let Some((&target, rest)) = hits.split_first() else {
            let mut set = DestroyerSet::new();
            set.add_tiles(group, grid, geometry);
            debug!("destroyer set created with {} tiles", set.len());
            self.sets.push(set);
            return;
        };

        // Higher indices first so `target` stays valid.
        for &i in rest.iter().rev() {
            let other = self.sets.remove(i);
            self.sets[target].absorb(other);
        }
        self.sets[target].add_tiles(group, grid, geometry);
        debug!(
            "destroyer set merged ({} sets joined), now {} tiles",
            hits.len(),
            self.sets[target].len()
        );
    }

    /// Step every set against the wiper and finalize the ones it has passed
    pub fn update(&mut self, wiper: &Wiper, grid: &mut Grid, geometry: &Geometry) -> ExposedRows {
        let rect = wiper.rect();
        let mut exposed = ExposedRows::default();

        for set in &mut self.sets {
            if set.touches(&rect, grid, geometry) {
                if set.phase == SweepPhase::Ready {
                    set.phase = SweepPhase::Killed;
                }
            } else if set.phase == SweepPhase::Killed {
                let (rows, removed) = set.finalize(grid);
                debug!("destroyer set finalized, {} tiles removed", removed);
                self.destroyed += removed;
                exposed.merge(&rows);
            } else {
                set.phase = SweepPhase::Ready;
            }
        }

        self.sets.retain(|set| !set.is_empty());
        exposed
    }

    pub fn sets(&self) -> &[DestroyerSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Whether any set holds `id`
    pub fn contains(&self, id: TileId) -> bool {
        self.sets.iter().any(|set| set.contains(id))
    }

    /// Whether no tile belongs to two sets
    pub fn is_disjoint(&self) -> bool {
        self.sets.iter().enumerate().all(|(i, a)| {
            self.sets[i + 1..]
                .iter()
                .all(|b| a.tiles.iter().all(|id| !b.contains(*id)))
        })
    }

    /// Total tiles removed by finalized sets
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// Drop every pending set and zero the removal count
    pub fn clear(&mut self) {
        self.sets.clear();
        self.destroyed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;
    use crate::types::{CellPos, Rgb};

    fn square(grid: &mut Grid, x: i8, y: i8) -> Vec<TileId> {
        [(0, 0), (1, 0), (0, 1), (1, 1)]
            .iter()
            .map(|&(dx, dy)| {
                let pos = CellPos::new(x + dx, y + dy);
                if grid.is_occupied(pos) {
                    grid.get(pos).tile_id().unwrap()
                } else {
                    grid.insert(Tile::new(Rgb::RED, Rgb::WHITE, pos)).unwrap()
                }
            })
            .collect()
    }

    fn wiper_at(x: f32) -> Wiper {
        let mut wiper = Wiper::new(0.0, Geometry::default());
        wiper.set_position(x);
        wiper
    }

    #[test]
    fn test_disjoint_groups_create_separate_sets() {
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();

        let a = square(&mut grid, 0, 10);
        let b = square(&mut grid, 5, 10);
        manager.add(&a, &grid, &geometry);
        manager.add(&b, &grid, &geometry);

        assert_eq!(manager.len(), 2);
        assert!(manager.is_disjoint());
    }

    #[test]
    fn test_overlapping_group_merges() {
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();

        let a = square(&mut grid, 3, 5);
        let b = square(&mut grid, 4, 5);
        manager.add(&a, &grid, &geometry);
        manager.add(&b, &grid, &geometry);

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.sets()[0].len(), 6);
        assert_eq!(manager.sets()[0].max_right(), 6 * 45);
    }

    #[test]
    fn test_bridging_group_joins_two_sets() {
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();

        let left = square(&mut grid, 0, 10);
        let right = square(&mut grid, 2, 10);
        manager.add(&left, &grid, &geometry);
        manager.add(&right, &grid, &geometry);
        assert_eq!(manager.len(), 2);

        let bridge = square(&mut grid, 1, 10);
        manager.add(&bridge, &grid, &geometry);

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.sets()[0].len(), 8);
        assert!(manager.is_disjoint());
    }

    #[test]
    fn test_re_adding_same_group_is_idempotent() {
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();

        let a = square(&mut grid, 3, 5);
        manager.add(&a, &grid, &geometry);
        manager.add(&a, &grid, &geometry);

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.sets()[0].len(), 4);
    }

    #[test]
    fn test_two_pass_sweep() {
        // Tiles in columns 3-4 span pixels 135..225.
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();
        let group = square(&mut grid, 3, 5);
        manager.add(&group, &grid, &geometry);

        // Wiper inside the set: not yet primed.
        let exposed = manager.update(&wiper_at(150.0), &mut grid, &geometry);
        assert!(exposed.is_empty());
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Idle);

        // Past the set: primed.
        manager.update(&wiper_at(300.0), &mut grid, &geometry);
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Ready);

        // Wrapped to the left edge: still primed.
        manager.update(&wiper_at(0.0), &mut grid, &geometry);
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Ready);

        // Second contact kills.
        let exposed = manager.update(&wiper_at(150.0), &mut grid, &geometry);
        assert!(exposed.is_empty());
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Killed);
        assert_eq!(grid.len(), 4);
        assert_eq!(manager.destroyed(), 0);

        // Leaving finalizes.
        let exposed = manager.update(&wiper_at(300.0), &mut grid, &geometry);
        assert!(manager.is_empty());
        assert!(grid.is_empty());
        assert_eq!(manager.destroyed(), 4);
        assert_eq!(exposed.get(3), Some(5));
        assert_eq!(exposed.get(4), Some(5));
        assert_eq!(exposed.get(5), None);
    }

    #[test]
    fn test_edge_contact_does_not_count() {
        let geometry = Geometry::default();
        let mut grid = Grid::new();
        let mut manager = DestructionManager::new();
        let group = square(&mut grid, 3, 5);
        manager.add(&group, &grid, &geometry);

        manager.update(&wiper_at(300.0), &mut grid, &geometry);
        // Right edge of the wiper at 135 only touches the set's left edge.
        manager.update(&wiper_at(133.0), &mut grid, &geometry);
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Ready);
        manager.update(&wiper_at(134.0), &mut grid, &geometry);
        assert_eq!(manager.sets()[0].phase(), SweepPhase::Killed);
        // Left edge at 225 is past the set's right edge.
        manager.update(&wiper_at(225.0), &mut grid, &geometry);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_exposed_rows_keep_topmost() {
        let mut rows = ExposedRows::default();
        rows.record(2, 9);
        rows.record(2, 4);
        rows.record(2, 7);
        assert_eq!(rows.get(2), Some(4));

        let mut other = ExposedRows::default();
        other.record(2, 3);
        other.record(5, 10);
        rows.merge(&other);
        assert_eq!(rows.iter().collect::<Vec<_>>(), vec![(2, 3), (5, 10)]);
    }
}
