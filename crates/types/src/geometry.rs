//! Rectangles and sizes in millimeters.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns the same rectangle moved to sit `gap` to the right of `self`.
    pub fn beside(&self, gap: f64) -> Self {
        Self {
            x: self.right() + gap,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Shrinks the size by the given edge insets, never going below zero.
    pub fn inset(&self, horizontal: f64, vertical: f64) -> Self {
        Self {
            width: (self.width - horizontal).max(0.0),
            height: (self.height - vertical).max(0.0),
        }
    }
}
