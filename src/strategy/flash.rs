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
use std::{thread, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;

use crate::{color::Rgb, config, error::AnimationError, palette::ColorPalette};

use super::{brightness_levels, Animation, Frame};

const SATURATION: f64 = 1.0;

/// Timings of the random group flash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashSettings {
    pub max_brightness: f64,
    pub step: f64,
    pub step_interval: Duration,
    pub flash_pause: Duration,
    pub seed: Option<u64>,
}

impl Default for FlashSettings {
    fn default() -> Self {
        FlashSettings {
            max_brightness: config::flash::DEFAULT_MAX_BRIGHTNESS,
            step: config::flash::DEFAULT_STEP,
            step_interval: config::flash::DEFAULT_STEP_INTERVAL,
            flash_pause: config::flash::DEFAULT_FLASH_PAUSE,
            seed: None,
        }
    }
}

impl TryFrom<&config::Flash> for FlashSettings {
    type Error = config::ConfigError;

    fn try_from(config: &config::Flash) -> Result<Self, Self::Error> {
        Ok(FlashSettings {
            max_brightness: config.max_brightness()?,
            step: config.step()?,
            step_interval: config.step_interval()?,
            flash_pause: config.flash_pause()?,
            seed: config.seed(),
        })
    }
}

/// Picks the pixel to flash next. A pick whose hue matches the previous flash is rejected so
/// the same color never flashes twice in a row.
#[derive(Debug, Clone)]
pub struct GroupPicker {
    rng: StdRng,
    last_hue: Option<u16>,
}

impl GroupPicker {
    pub fn new(seed: Option<u64>) -> GroupPicker {
        GroupPicker {
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
            last_hue: None,
        }
    }

    /// Draws a random pixel. Returns it with its hue, or `None` if its hue is the one that
    /// flashed last.
    pub fn pick(&mut self, palette: &dyn ColorPalette) -> Option<(usize, u16)> {
        if palette.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..palette.len());
        let hue = palette.hue(index)?;
        if self.last_hue == Some(hue) {
            return None;
        }
        Some((index, hue))
    }

    /// Records that a flash of the given hue completed.
    pub fn complete(&mut self, hue: u16) {
        self.last_hue = Some(hue);
    }

    pub fn last_hue(&self) -> Option<u16> {
        self.last_hue
    }
}

/// The pixel that flashes along with `index`: the next one if it has the same hue,
/// otherwise the previous one, wrapping at the start of the strip.
pub fn companion(palette: &dyn ColorPalette, index: usize) -> usize {
    let count = palette.len();
    let next = index + 1;
    if next < count && palette.hue(next) == palette.hue(index) {
        next
    } else {
        (index + count - 1) % count
    }
}

/// Flashes a random same-colored pair of pixels at a time.
#[derive(Debug, Clone)]
pub struct RandomGroupFlash {
    settings: FlashSettings,
    levels: Vec<f64>,
    picker: GroupPicker,
}

impl RandomGroupFlash {
    pub fn new(settings: FlashSettings) -> RandomGroupFlash {
        RandomGroupFlash {
            levels: brightness_levels(settings.max_brightness, settings.step),
            picker: GroupPicker::new(settings.seed),
            settings,
        }
    }

    /// Ramps the pixel and its companion up and back down in the given hue.
    fn flash(&self, frame: &Frame<'_>, index: usize, hue: u16) -> Result<(), AnimationError> {
        let partner = companion(frame.palette, index);
        trace!(pixel = index, partner, hue, "Flashing.");

        let ramp = self
            .levels
            .iter()
            .chain(self.levels.iter().rev())
            .copied();
        for brightness in ramp {
            let color = Rgb::from_hsv(hue, SATURATION, brightness);
            frame.surface.set_pixel(index, color, None)?;
            frame.surface.set_pixel(partner, color, None)?;
            frame.surface.show()?;
            frame.pause(self.settings.step_interval);
        }
        Ok(())
    }
}

impl Default for RandomGroupFlash {
    fn default() -> Self {
        RandomGroupFlash::new(FlashSettings::default())
    }
}

impl Animation for RandomGroupFlash {
    fn name(&self) -> &'static str {
        "RandomGroupFlash"
    }

    fn apply(&mut self, frame: &Frame<'_>) -> Result<(), AnimationError> {
        while frame.running() {
            let Some((index, hue)) = self.picker.pick(frame.palette) else {
                thread::yield_now();
                continue;
            };
            self.flash(frame, index, hue)?;
            self.picker.complete(hue);
            frame.pause(self.settings.flash_pause);
        }
        Ok(())
    }
}
