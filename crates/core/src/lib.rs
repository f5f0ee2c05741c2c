//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains every rule of the falling-block game: occupancy,
//! block movement, match detection, wiper-gated destruction and cascading
//! gravity. It has no dependency on rendering, windowing or timing sources:
//! callers feed intents and elapsed time, then read state back.
//!
//! # Module Structure
//!
//! - [`layout`]: the six fixed 2x2 color arrangements
//! - [`rng`]: seeded layout queue
//! - [`tile`] / [`grid`]: tiles and the 16x12 occupancy map that owns locked tiles
//! - [`block`]: the falling 2x2 block, movement and rotation
//! - [`collision`]: pixel-space collision predicates
//! - [`matcher`]: 2x2 same-color square detection
//! - [`destruction`]: destroyer sets and the two-pass wiper protocol
//! - [`wiper`]: the sweep line
//! - [`gravity`]: delayed drop of tiles over gaps
//! - [`engine`]: the per-frame driver
//! - [`snapshot`]: read-only render view
//!
//! # Game Rules
//!
//! - **Blocks**: 2x2, spawned at columns 7-8 in the two staging rows, falling
//!   one row every `fall_wait` seconds (0.08 s while soft drop is held)
//! - **Matching**: any 2x2 square of one primary color is flagged; squares
//!   sharing tiles merge into one destroyer set
//! - **Destruction**: a set is removed only after the wiper has crossed it on
//!   a full pass that started clear of it
//! - **Gravity**: tiles over emptied cells drop 0.05 s later and are
//!   re-checked for matches
//!
//! # Example
//!
//! ```
//! use lumines_core::{Engine, EngineConfig};
//! use lumines_types::Intent;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.update(1.0 / 60.0); // spawns the first block
//!
//! engine.handle_key_down(Intent::MoveLeft);
//! engine.handle_key_down(Intent::RotateCw);
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.active.len(), 4);
//! ```

pub mod block;
pub mod collision;
pub mod config;
pub mod destruction;
pub mod engine;
pub mod error;
pub mod gravity;
pub mod grid;
pub mod layout;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod tile;
pub mod wiper;

pub use lumines_types as types;

// Re-export commonly used types for convenience
pub use block::ActiveBlock;
pub use collision::{block_collides, tile_collides, Geometry, Rect};
pub use config::{EngineConfig, Palette};
pub use destruction::{DestroyerSet, DestructionManager, ExposedRows, SweepPhase};
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use gravity::GravityResolver;
pub use grid::{Grid, Slot};
pub use layout::{LayoutId, Swatch};
pub use matcher::check_2x2;
pub use rng::{LayoutQueue, SimpleRng};
pub use snapshot::{RenderSnapshot, TileView};
pub use tile::{Tile, TileId};
pub use wiper::Wiper;
