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
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::color::Rgb;
use crate::error::SurfaceError;

use super::{PixelSurface, Strip};

/// A call made against the mock surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    SetPixel {
        index: usize,
        color: Rgb,
        brightness: Option<f64>,
    },
    Show,
}

/// A mock surface. Records every call and keeps the resulting pixel state.
pub struct Recorder {
    strip: Strip,
    calls: Mutex<Vec<Call>>,
    should_fail: AtomicBool,
}

impl Recorder {
    pub fn new(pixel_count: usize) -> Recorder {
        Recorder {
            strip: Strip::new(pixel_count),
            calls: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent pixel write fail as if the device went away.
    pub fn fail(&self) {
        self.should_fail.store(true, Ordering::SeqCst);
    }

    /// A copy of every call made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The number of `show` calls made so far.
    pub fn show_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| **call == Call::Show)
            .count()
    }

    pub fn is_dark(&self) -> bool {
        self.strip.is_dark()
    }

    /// Forgets every recorded call.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

impl PixelSurface for Recorder {
    fn pixel_count(&self) -> usize {
        self.strip.pixel_count()
    }

    fn clear(&self) -> Result<(), SurfaceError> {
        self.record(Call::Clear);
        self.strip.clear()
    }

    fn set_pixel(
        &self,
        index: usize,
        color: Rgb,
        brightness: Option<f64>,
    ) -> Result<(), SurfaceError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SurfaceError::Unavailable("mock surface failure".into()));
        }
        self.record(Call::SetPixel {
            index,
            color,
            brightness,
        });
        self.strip.set_pixel(index, color, brightness)
    }

    fn show(&self) -> Result<(), SurfaceError> {
        self.record(Call::Show);
        self.strip.show()
    }
}
