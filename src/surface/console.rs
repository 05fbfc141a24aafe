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
use std::{
    fmt::Write as _,
    io::{self, Write},
};

use parking_lot::Mutex;

use crate::color::Rgb;
use crate::error::SurfaceError;

use super::{Pixel, PixelSurface, Strip};

/// A surface that draws the strip on a terminal using 24 bit ANSI colors. Each `show`
/// redraws the same line.
pub struct Console {
    strip: Strip,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Creates a console surface that draws to stdout.
    pub fn new(pixel_count: usize) -> Console {
        Console::with_writer(pixel_count, Box::new(io::stdout()))
    }

    /// Creates a console surface that draws to the given writer.
    pub fn with_writer(pixel_count: usize, out: Box<dyn Write + Send>) -> Console {
        Console {
            strip: Strip::new(pixel_count),
            out: Mutex::new(out),
        }
    }

    /// Renders the given pixels as a single terminal line.
    pub fn render(pixels: &[Pixel]) -> String {
        let mut line = String::from("\r");
        for pixel in pixels {
            let Rgb { r, g, b } = pixel.emitted();
            // Writing to a String can't fail.
            let _ = write!(line, "\x1b[38;2;{};{};{}m\u{25cf} ", r, g, b);
        }
        line.push_str("\x1b[0m");
        line
    }
}

impl PixelSurface for Console {
    fn pixel_count(&self) -> usize {
        self.strip.pixel_count()
    }

    fn clear(&self) -> Result<(), SurfaceError> {
        self.strip.clear()
    }

    fn set_pixel(
        &self,
        index: usize,
        color: Rgb,
        brightness: Option<f64>,
    ) -> Result<(), SurfaceError> {
        self.strip.set_pixel(index, color, brightness)
    }

    fn show(&self) -> Result<(), SurfaceError> {
        self.strip.show()?;
        let line = Console::render(&self.strip.shown());
        let mut out = self.out.lock();
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
