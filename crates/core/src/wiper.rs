//! Wiper - the sweep line that gates destruction
//!
//! A 2 px wide, field-tall vertical line moving right at a constant speed and
//! jumping back to the left edge once it passes `x_offset + 719`. It owns
//! nothing but its position.

use crate::collision::{Geometry, Rect};
use crate::types::{FIELD_HEIGHT_PX, WIPER_WIDTH_PX, WIPER_WRAP_PX};

#[derive(Debug, Clone, PartialEq)]
pub struct Wiper {
    /// Pixels per second
    speed: f32,
    geometry: Geometry,
    /// Absolute pixel x of the line's left edge
    left: f32,
}

impl Wiper {
    /// Wiper at the field's left edge
    pub fn new(speed: f32, geometry: Geometry) -> Self {
        Self {
            speed,
            geometry,
            left: geometry.x_offset as f32,
        }
    }

    /// Advance by `speed * elapsed`, wrapping past the right edge
    pub fn update(&mut self, elapsed: f32) {
        self.left += self.speed * elapsed;
        if self.left > WIPER_WRAP_PX + self.geometry.x_offset as f32 {
            self.left = self.geometry.x_offset as f32;
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Exact (fractional) position
    pub fn position(&self) -> f32 {
        self.left
    }

    /// Place the line at an absolute pixel x
    pub fn set_position(&mut self, left: f32) {
        self.left = left;
    }

    /// Integer pixel x used for overlap tests and drawing
    pub fn left_px(&self) -> i32 {
        self.left as i32
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left_px(),
            self.geometry.y_offset,
            WIPER_WIDTH_PX,
            FIELD_HEIGHT_PX,
        )
    }
}
