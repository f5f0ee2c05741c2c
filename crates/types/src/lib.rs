//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small conversions, making
//! them usable by the rules engine, input mapping and any external renderer.
//!
//! # Grid Dimensions
//!
//! The logical grid is 16 columns by 12 rows. The top two rows are staging
//! rows that sit above the visible play-field; new blocks spawn there.
//!
//! - **Width**: 16 columns (indexed 0-15)
//! - **Height**: 12 rows (indexed 0-11), rows 0-1 hidden
//! - **Spawn position**: (7, 0) for the top-left tile of a new block
//!
//! # Pixel Geometry
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_SIZE_PX` | 45 | Width and height of one tile |
//! | `FIELD_WIDTH_PX` | 720 | Visible play-field width (16 tiles) |
//! | `FIELD_HEIGHT_PX` | 450 | Visible play-field height (10 tiles) |
//! | `WIPER_WIDTH_PX` | 2 | Width of the sweep line |
//! | `WIPER_WRAP_PX` | 719 | Offset past which the wiper wraps to the left edge |
//!
//! # Timing Constants
//!
//! Timing values are in seconds, matching the elapsed time fed to
//! `Engine::update`:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_WAIT` | 1.5 | Time between one-row falls of the active block |
//! | `SOFT_DROP_WAIT` | 0.08 | Fall threshold while soft drop is held |
//! | `TILE_DROP_WAIT` | 0.05 | Delay before a batch of gravity drops is applied |
//! | `DEFAULT_WIPER_SPEED` | 125.0 | Wiper speed in pixels per second |
//!
//! # Examples
//!
//! ```
//! use lumines_types::{CellPos, Corner, Intent, GRID_COLUMNS, GRID_ROWS};
//!
//! let pos = CellPos::new(3, 5);
//! assert_eq!(pos.below(), CellPos::new(3, 6));
//!
//! assert_eq!(Corner::TopLeft.rotate_cw(), Corner::TopRight);
//! assert_eq!(Intent::from_str("rotateCw"), Some(Intent::RotateCw));
//!
//! assert_eq!(GRID_COLUMNS, 16);
//! assert_eq!(GRID_ROWS, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (16 columns)
pub const GRID_COLUMNS: u8 = 16;

/// Grid height in cells, staging rows included (12 rows)
pub const GRID_ROWS: u8 = 12;

/// Rows above the visible play-field used to stage new blocks
pub const STAGING_ROWS: u8 = 2;

/// Tile edge length in pixels
pub const TILE_SIZE_PX: i32 = 45;

/// Visible play-field width in pixels
pub const FIELD_WIDTH_PX: i32 = 720;

/// Visible play-field height in pixels
pub const FIELD_HEIGHT_PX: i32 = 450;

/// Sweep line width in pixels
pub const WIPER_WIDTH_PX: i32 = 2;

/// Offset (relative to the field's left edge) past which the wiper wraps
pub const WIPER_WRAP_PX: f32 = 719.0;

/// Column of the top-left tile of a freshly spawned block
pub const SPAWN_COLUMN: i8 = 7;

/// Row of the top-left tile of a freshly spawned block
pub const SPAWN_ROW: i8 = 0;

/// Default time between one-row falls (seconds)
pub const DEFAULT_FALL_WAIT: f32 = 1.5;

/// Fall threshold while soft drop is held (seconds)
pub const SOFT_DROP_WAIT: f32 = 0.08;

/// Delay before pending gravity drops are applied (seconds)
pub const TILE_DROP_WAIT: f32 = 0.05;

/// Default wiper speed (pixels per second)
pub const DEFAULT_WIPER_SPEED: f32 = 125.0;

/// Number of distinct block layouts
pub const LAYOUT_COUNT: u8 = 6;

/// Number of upcoming layouts held by the layout queue
pub const LAYOUT_QUEUE_LEN: usize = 4;

/// Fixed opening sequence of the seeded layout queue
pub const SEEDED_LAYOUTS: [u8; LAYOUT_QUEUE_LEN] = [1, 2, 6, 1];


/// A cell address in the logical grid
///
/// `x` is the column (0 = left), `y` the row (0 = top staging row). Signed so
/// that neighbour arithmetic at the edges produces out-of-grid positions
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i8,
    pub y: i8,
}

impl CellPos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn left(self) -> Self {
        self.offset(-1, 0)
    }

    pub fn right(self) -> Self {
        self.offset(1, 0)
    }

    pub fn above(self) -> Self {
        self.offset(0, -1)
    }

    pub fn below(self) -> Self {
        self.offset(0, 1)
    }

    /// Check whether the position lies inside the 16x12 grid domain
    pub fn in_grid(self) -> bool {
        self.x >= 0 && self.x < GRID_COLUMNS as i8 && self.y >= 0 && self.y < GRID_ROWS as i8
    }
}

/// Corner role of a tile inside a 2x2 square
///
/// Used both for the active block (which tile sits in which corner) and for
/// the flag state of a matched tile. Index order follows the clockwise
/// cycle: TopLeft(0) → TopRight(1) → BottomRight(2) → BottomLeft(3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in clockwise index order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    /// Corner for an index, taken modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The corner this one becomes after a clockwise quarter turn
    ///
    /// ```
    /// use lumines_types::Corner;
    ///
    /// assert_eq!(Corner::TopLeft.rotate_cw(), Corner::TopRight);
    /// assert_eq!(Corner::BottomLeft.rotate_cw(), Corner::TopLeft);
    /// ```
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The corner this one becomes after a counter-clockwise quarter turn
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Offset of this corner from the top-left of its square
    pub fn offset(self) -> (i8, i8) {
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (1, 0),
            Corner::BottomRight => (1, 1),
            Corner::BottomLeft => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomRight => "bottom_right",
            Corner::BottomLeft => "bottom_left",
        }
    }
}

/// Player intents accepted by the engine
///
/// Key-down and key-up are delivered separately; only `SoftDrop` reacts to
/// key-up (it restores the normal fall speed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move the active block one column left
    MoveLeft,
    /// Move the active block one column right
    MoveRight,
    /// Hold to fall at the soft-drop speed
    SoftDrop,
    /// Rotate the active block a quarter turn clockwise
    RotateCw,
    /// Rotate the active block a quarter turn counter-clockwise
    RotateCcw,
}

impl Intent {
    /// Parse intent from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use lumines_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("SOFTDROP"), Some(Intent::SoftDrop));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
        }
    }
}

/// An opaque RGB color
///
/// The engine only compares colors for equality; rendering is up to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
