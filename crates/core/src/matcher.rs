//! Match detector - 2x2 same-color square scan
//!
//! Run once for each tile that has just locked or just finished a gravity
//! drop. The scanned tile must have a same-color tile directly below; the
//! squares to its left and to its right are then tested independently, so a
//! tile can join two squares at once (e.g. inside a 3x2 region).

use arrayvec::ArrayVec;

use crate::collision::Geometry;
use crate::destruction::DestructionManager;
use crate::grid::Grid;
use crate::tile::TileId;
use crate::types::{CellPos, Corner};

/// One matched square: tile ids with the corner each one plays
pub type Square = [(TileId, Corner); 4];

/// Same-colored tile at `pos`, if it is inside the grid and occupied
fn matching(grid: &Grid, pos: CellPos, reference: TileId) -> Option<TileId> {
    let id = grid.try_get(pos)?.tile_id()?;
    grid.tile(id)
        .same_color(grid.tile(reference))
        .then_some(id)
}

/// Find the squares the tile at `pos` completes, without mutating anything
pub fn find_squares(grid: &Grid, pos: CellPos) -> ArrayVec<Square, 2> {
    let mut squares = ArrayVec::new();

    let Some(id) = grid.try_get(pos).and_then(|slot| slot.tile_id()) else {
        return squares;
    };
    let Some(below) = matching(grid, pos.below(), id) else {
        return squares;
    };

    if let (Some(left), Some(below_left)) = (
        matching(grid, pos.left(), id),
        matching(grid, pos.left().below(), id),
    ) {
        squares.push([
            (id, Corner::TopRight),
            (left, Corner::TopLeft),
            (below, Corner::BottomRight),
            (below_left, Corner::BottomLeft),
        ]);
    }

    if let (Some(right), Some(below_right)) = (
        matching(grid, pos.right(), id),
        matching(grid, pos.right().below(), id),
    ) {
        squares.push([
            (id, Corner::TopLeft),
            (right, Corner::TopRight),
            (below, Corner::BottomLeft),
            (below_right, Corner::BottomRight),
        ]);
    }

    squares
}

/// Flag every square completed by the tile at `pos` and hand each one to the
/// destruction manager; returns the number of squares found
pub fn check_2x2(
    grid: &mut Grid,
    destroyers: &mut DestructionManager,
    geometry: &Geometry,
    pos: CellPos,
) -> usize {
    let squares = find_squares(grid, pos);
    let found = squares.len();
    for square in squares {
        for (id, corner) in square {
            grid.tile_mut(id).flag(corner);
        }
        let group = square.map(|(id, _)| id);
        destroyers.add(&group, grid, geometry);
    }
    found
}
