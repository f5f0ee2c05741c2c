//! Engine - per-frame driver tying every component together
//!
//! Callers feed discrete intents (`handle_key_down` / `handle_key_up`) and
//! the elapsed time of each frame (`update`), then read state back through
//! the accessors or a [`RenderSnapshot`]. Given the same config and the same
//! sequence of calls, two engines end in identical states.
//!
//! One `update` runs, in order:
//!
//! 1. spawn a block if none is falling, otherwise advance the fall timer and
//!    move the block down (landing it when the move is rejected)
//! 2. the gravity countdown and drop pass, with match checks
//! 3. the wiper advance
//! 4. the destruction sweep
//! 5. queueing of the tiles exposed by finalized sets
//!
//! The engine never halts itself. When the spawn area is occupied no block
//! appears, but gravity, the wiper and destruction keep running.

use log::{debug, warn};

use crate::block::ActiveBlock;
use crate::collision::{block_collides, Geometry};
use crate::config::EngineConfig;
use crate::destruction::DestructionManager;
use crate::error::EngineError;
use crate::gravity::GravityResolver;
use crate::grid::Grid;
use crate::rng::LayoutQueue;
use crate::snapshot::{RenderSnapshot, TileView};
use crate::tile::{Tile, TileId};
use crate::types::{CellPos, Intent, Rgb, SOFT_DROP_WAIT};
use crate::wiper::Wiper;

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    geometry: Geometry,
    grid: Grid,
    active: Option<ActiveBlock>,
    wiper: Wiper,
    destroyers: DestructionManager,
    gravity: GravityResolver,
    layouts: LayoutQueue,
    /// Seconds accumulated toward the next one-row fall
    fall_timer: f32,
    soft_drop: bool,
    spawn_blocked: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let geometry = Geometry::new(config.x_offset, config.y_offset);
        let layouts = layout_queue(&config);

        Self {
            wiper: Wiper::new(config.wiper_speed, geometry),
            config,
            geometry,
            grid: Grid::new(),
            active: None,
            destroyers: DestructionManager::new(),
            gravity: GravityResolver::new(),
            layouts,
            fall_timer: 0.0,
            soft_drop: false,
            spawn_blocked: false,
        }
    }

    /// Start a fresh round with the same config
    ///
    /// Clears the grid, the destroyer sets and the gravity queue, rewinds the
    /// wiper and restarts the layout queue from the configured seed.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.destroyers.clear();
        self.gravity.clear();
        self.wiper = Wiper::new(self.config.wiper_speed, self.geometry);
        self.layouts = layout_queue(&self.config);
        self.active = None;
        self.fall_timer = 0.0;
        self.soft_drop = false;
        self.spawn_blocked = false;
        debug!("engine reset");
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActiveBlock> {
        self.active.as_ref()
    }

    pub fn wiper(&self) -> &Wiper {
        &self.wiper
    }

    pub fn destroyers(&self) -> &DestructionManager {
        &self.destroyers
    }

    pub fn gravity(&self) -> &GravityResolver {
        &self.gravity
    }

    pub fn layout_queue(&self) -> &LayoutQueue {
        &self.layouts
    }

    /// Whether the last spawn attempt found the spawn area occupied
    pub fn spawn_blocked(&self) -> bool {
        self.spawn_blocked
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    /// Seconds between one-row falls at the moment
    pub fn fall_threshold(&self) -> f32 {
        if self.soft_drop {
            SOFT_DROP_WAIT
        } else {
            self.config.fall_wait
        }
    }

    /// Apply a pressed intent to the falling block
    ///
    /// Moves and rotations that would collide are undone on the spot.
    /// Ignored while no block is falling.
    pub fn handle_key_down(&mut self, intent: Intent) {
        let Some(block) = self.active.as_mut() else {
            return;
        };

        match intent {
            Intent::MoveLeft => {
                block.move_left();
                if block_collides(block, &self.grid, &self.geometry) {
                    block.move_right();
                }
            }
            Intent::MoveRight => {
                block.move_right();
                if block_collides(block, &self.grid, &self.geometry) {
                    block.move_left();
                }
            }
            Intent::RotateCw => {
                block.rotate_clockwise();
                if block_collides(block, &self.grid, &self.geometry) {
                    block.rotate_counterclockwise();
                }
            }
            Intent::RotateCcw => {
                block.rotate_counterclockwise();
                if block_collides(block, &self.grid, &self.geometry) {
                    block.rotate_clockwise();
                }
            }
            Intent::SoftDrop => self.soft_drop = true,
        }
    }

    /// Apply a released intent; only soft drop reacts
    pub fn handle_key_up(&mut self, intent: Intent) {
        if intent == Intent::SoftDrop {
            self.soft_drop = false;
        }
    }

    /// Advance the simulation by `elapsed` seconds
    pub fn update(&mut self, elapsed: f32) {
        match self.active {
            None => self.spawn(),
            Some(_) => self.fall(elapsed),
        }

        let cells = self.active.as_ref().map(ActiveBlock::cells);
        let obstacles: &[CellPos] = match &cells {
            Some(cells) => cells,
            None => &[],
        };
        self.gravity.update(
            elapsed,
            &mut self.grid,
            &self.geometry,
            &mut self.destroyers,
            obstacles,
        );

        self.wiper.update(elapsed);

        let exposed = self
            .destroyers
            .update(&self.wiper, &mut self.grid, &self.geometry);
        if !exposed.is_empty() {
            self.gravity.seed(&exposed, &self.grid);
        }
    }

    fn spawn(&mut self) {
        if self.grid.is_spawn_blocked() {
            if !self.spawn_blocked {
                warn!("spawn area occupied, holding the next block");
            }
            self.spawn_blocked = true;
            return;
        }
        self.spawn_blocked = false;

        let layout = self.layouts.next();
        self.active = Some(ActiveBlock::spawn(layout, &self.config.palette));
        self.fall_timer = 0.0;
        debug!("spawned layout {}", layout.get());
    }

    fn fall(&mut self, elapsed: f32) {
        if self.fall_timer < self.fall_threshold() {
            self.fall_timer += elapsed;
            return;
        }
        self.fall_timer = 0.0;

        let Some(block) = self.active.as_mut() else {
            return;
        };
        block.move_down();
        if block_collides(block, &self.grid, &self.geometry) {
            block.move_up();
            self.land();
        }
    }

    /// Lock the falling block's tiles into the grid
    fn land(&mut self) {
        let Some(block) = self.active.take() else {
            return;
        };
        debug!(
            "block landed at ({}, {})",
            block.origin().x,
            block.origin().y
        );

        for tile in block.into_tiles() {
            let cell = tile.cell;
            match self.grid.insert(tile) {
                Ok(_) => self.gravity.queue(cell),
                Err(err) => warn!("dropping tile on landing: {}", err),
            }
        }
    }

    /// Place a locked tile directly, as if it had just landed
    ///
    /// The tile goes through the next gravity pass and match check.
    pub fn lock_tile(&mut self, pos: CellPos, colors: (Rgb, Rgb)) -> Result<TileId, EngineError> {
        if self
            .active
            .as_ref()
            .is_some_and(|block| block.cells().contains(&pos))
        {
            return Err(EngineError::occupied(pos));
        }

        let (primary, secondary) = colors;
        let id = self.grid.insert(Tile::new(primary, secondary, pos))?;
        self.gravity.queue(pos);
        Ok(id)
    }

    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        out.clear();
        out.locked.extend(
            self.grid
                .tiles()
                .map(|(_, tile)| TileView::new(tile, &self.geometry)),
        );
        if let Some(block) = &self.active {
            for tile in block.tiles() {
                out.active.push(TileView::new(tile, &self.geometry));
            }
        }
        out.wiper_x = self.wiper.left_px();
        out.next_layouts = self.layouts.peek();
        out.soft_drop = self.soft_drop;
        out.spawn_blocked = self.spawn_blocked;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn layout_queue(config: &EngineConfig) -> LayoutQueue {
    if config.seeded_queue {
        LayoutQueue::seeded(config.seed)
    } else {
        LayoutQueue::random(config.seed)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
