// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::sync::Arc;

use crate::color::Rgb;
use crate::error::SurfaceError;

mod console;
#[cfg(test)]
pub mod mock;
mod strip;

pub use console::Console;
pub use strip::Strip;

/// Brightness used when a pixel is set without an explicit brightness.
pub const FULL_BRIGHTNESS: f64 = 1.0;

/// A surface that can be shared between a controller and animation workers.
pub type SharedSurface = Arc<dyn PixelSurface>;

/// The state of a single pixel in a surface buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub color: Rgb,
    pub brightness: f64,
}

impl Pixel {
    pub const OFF: Pixel = Pixel {
        color: Rgb::BLACK,
        brightness: FULL_BRIGHTNESS,
    };

    /// The color this pixel actually emits once brightness is applied.
    pub fn emitted(&self) -> Rgb {
        self.color.scaled(self.brightness)
    }

    pub fn is_off(&self) -> bool {
        self.emitted() == Rgb::BLACK
    }
}

/// A buffered, addressable LED strip. Writes are buffered until `show` flushes them to the
/// physical device. Surfaces are shared across threads, so every operation takes `&self`.
pub trait PixelSurface: Send + Sync {
    /// The number of addressable pixels.
    fn pixel_count(&self) -> usize;

    /// Resets every buffered pixel to off.
    fn clear(&self) -> Result<(), SurfaceError>;

    /// Sets the buffered color of one pixel. A brightness of `None` means full brightness.
    fn set_pixel(
        &self,
        index: usize,
        color: Rgb,
        brightness: Option<f64>,
    ) -> Result<(), SurfaceError>;

    /// Flushes the buffered pixels to the strip.
    fn show(&self) -> Result<(), SurfaceError>;

    /// Clears and flushes the strip.
    fn blank(&self) -> Result<(), SurfaceError> {
        self.clear()?;
        self.show()
    }
}
