//! Pixel sizes and the holder's logical extent.

use core::fmt;

/// Integer size in pixels, as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Untransformed extent of the holder, kept in floating point so that
/// dividing a desktop size by the scale and multiplying it back reproduces
/// the same pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalSize {
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl LogicalSize {
    /// Logical extent that covers `size` once `scale` is applied.
    pub fn unscaled(size: Size, scale: f64) -> Self {
        Self {
            width: f64::from(size.width) / scale,
            height: f64::from(size.height) / scale,
        }
    }

    /// Pixel size after applying `scale`, rounded to the nearest pixel.
    pub fn scaled(self, scale: f64) -> Size {
        Size {
            width: round_px(self.width * scale),
            height: round_px(self.height * scale),
        }
    }
}

impl From<Size> for LogicalSize {
    fn from(size: Size) -> Self {
        Self::unscaled(size, 1.0)
    }
}

fn round_px(v: f64) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v.round() as u32
    }
}
