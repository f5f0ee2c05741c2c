//! Layout catalog - the six 2x2 color arrangements a block can spawn with
//!
//! Each layout lists its tiles in corner order (top-left, top-right,
//! bottom-right, bottom-left). A `Base` tile uses the palette's primary color
//! as its own primary; an `Inverse` tile swaps the two.
//!
//! ```text
//! id  TL TR BR BL
//!  1   B  B  B  B
//!  2   B  B  B  I
//!  3   B  B  I  I
//!  4   I  B  I  I
//!  5   I  I  I  I
//!  6   B  I  B  I
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Palette;
use crate::error::EngineError;
use crate::types::{Rgb, LAYOUT_COUNT};

/// Which way round a tile takes the palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    /// (primary, secondary)
    Base,
    /// (secondary, primary)
    Inverse,
}

impl Swatch {
    /// Resolve to a `(primary, secondary)` color pair
    pub fn colors(self, palette: &Palette) -> (Rgb, Rgb) {
        match self {
            Swatch::Base => (palette.primary, palette.secondary),
            Swatch::Inverse => (palette.secondary, palette.primary),
        }
    }
}

use Swatch::{Base as B, Inverse as I};

const LAYOUTS: [[Swatch; 4]; LAYOUT_COUNT as usize] = [
    [B, B, B, B],
    [B, B, B, I],
    [B, B, I, I],
    [I, B, I, I],
    [I, I, I, I],
    [B, I, B, I],
];

/// A validated layout id in `1..=6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LayoutId(u8);

impl LayoutId {
    /// The all-base layout
    pub const FIRST: LayoutId = LayoutId(1);

    /// Validate a raw layout id
    ///
    /// Ids outside `1..=6` fail with [`EngineError::InvalidLayout`]; the caller
    /// picks the fallback (typically [`LayoutQueue::random_layout`]).
    ///
    /// [`LayoutQueue::random_layout`]: crate::LayoutQueue::random_layout
    ///
    /// ```
    /// use lumines_core::{EngineError, LayoutId};
    ///
    /// assert_eq!(LayoutId::new(6).unwrap().get(), 6);
    /// assert_eq!(LayoutId::new(0), Err(EngineError::InvalidLayout(0)));
    /// assert_eq!(LayoutId::new(7), Err(EngineError::InvalidLayout(7)));
    /// ```
    pub fn new(id: u8) -> Result<Self, EngineError> {
        if (1..=LAYOUT_COUNT).contains(&id) {
            Ok(Self(id))
        } else {
            Err(EngineError::InvalidLayout(id))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Tile swatches in corner order TL, TR, BR, BL
    pub fn swatches(self) -> [Swatch; 4] {
        LAYOUTS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for LayoutId {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LayoutId> for u8 {
    fn from(value: LayoutId) -> Self {
        value.0
    }
}
