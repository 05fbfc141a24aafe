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
use parking_lot::Mutex;

use crate::color::Rgb;
use crate::error::SurfaceError;

use super::{Pixel, PixelSurface, FULL_BRIGHTNESS};

/// An in-memory strip. Keeps a pending buffer that `set_pixel` and `clear` write to and a
/// shown buffer that `show` copies the pending buffer into.
pub struct Strip {
    pending: Mutex<Vec<Pixel>>,
    shown: Mutex<Vec<Pixel>>,
}

impl Strip {
    /// Creates a new strip with all pixels off.
    pub fn new(pixel_count: usize) -> Strip {
        Strip {
            pending: Mutex::new(vec![Pixel::OFF; pixel_count]),
            shown: Mutex::new(vec![Pixel::OFF; pixel_count]),
        }
    }

    /// A copy of the pixels as they were last flushed.
    pub fn shown(&self) -> Vec<Pixel> {
        self.shown.lock().clone()
    }

    /// A copy of the pixels that would be flushed by the next `show`.
    pub fn pending(&self) -> Vec<Pixel> {
        self.pending.lock().clone()
    }

    /// Returns true if every shown pixel is off.
    pub fn is_dark(&self) -> bool {
        self.shown.lock().iter().all(Pixel::is_off)
    }
}

impl PixelSurface for Strip {
    fn pixel_count(&self) -> usize {
        self.pending.lock().len()
    }

    fn clear(&self) -> Result<(), SurfaceError> {
        self.pending
            .lock()
            .iter_mut()
            .for_each(|pixel| *pixel = Pixel::OFF);
        Ok(())
    }

    fn set_pixel(
        &self,
        index: usize,
        color: Rgb,
        brightness: Option<f64>,
    ) -> Result<(), SurfaceError> {
        let mut pending = self.pending.lock();
        let count = pending.len();
        let pixel = pending
            .get_mut(index)
            .ok_or(SurfaceError::OutOfRange { index, count })?;
        *pixel = Pixel {
            color,
            brightness: brightness.unwrap_or(FULL_BRIGHTNESS).clamp(0.0, 1.0),
        };
        Ok(())
    }

    fn show(&self) -> Result<(), SurfaceError> {
        let pending = self.pending.lock();
        self.shown.lock().clone_from(&pending);
        Ok(())
    }
}
