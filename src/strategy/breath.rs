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
use std::time::Duration;

use crate::{color::Rgb, config, error::AnimationError};

use super::{brightness_levels, Animation, Frame};

const SATURATION: f64 = 1.0;

/// Timings of the fading breath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathSettings {
    pub max_brightness: f64,
    pub step: f64,
    pub level_interval: Duration,
    pub ramp_pause: Duration,
}

impl Default for BreathSettings {
    fn default() -> Self {
        BreathSettings {
            max_brightness: config::breath::DEFAULT_MAX_BRIGHTNESS,
            step: config::breath::DEFAULT_STEP,
            level_interval: config::breath::DEFAULT_LEVEL_INTERVAL,
            ramp_pause: config::breath::DEFAULT_RAMP_PAUSE,
        }
    }
}

impl TryFrom<&config::Breath> for BreathSettings {
    type Error = config::ConfigError;

    fn try_from(config: &config::Breath) -> Result<Self, Self::Error> {
        Ok(BreathSettings {
            max_brightness: config.max_brightness()?,
            step: config.step()?,
            level_interval: config.level_interval()?,
            ramp_pause: config.ramp_pause()?,
        })
    }
}

/// The whole strip breathes in and out in sync, each pixel in its own palette hue.
#[derive(Debug, Clone)]
pub struct FadingBreath {
    settings: BreathSettings,
    levels: Vec<f64>,
}

impl FadingBreath {
    pub fn new(settings: BreathSettings) -> FadingBreath {
        FadingBreath {
            levels: brightness_levels(settings.max_brightness, settings.step),
            settings,
        }
    }

    /// The brightness levels of the up ramp and of the down ramp.
    fn ramps(&self) -> (impl Iterator<Item = f64> + '_, impl Iterator<Item = f64> + '_) {
        (
            self.levels.iter().copied(),
            self.levels.iter().rev().copied(),
        )
    }

    /// Sets every pixel, last to first, to its hue at the given brightness.
    fn draw_level(&self, frame: &Frame<'_>, brightness: f64) -> Result<(), AnimationError> {
        for index in (0..frame.pixel_count()).rev() {
            let color = Rgb::from_hsv(frame.hue(index)?, SATURATION, brightness);
            frame.surface.set_pixel(index, color, None)?;
            frame.surface.show()?;
        }
        frame.pause(self.settings.level_interval);
        Ok(())
    }
}

impl Default for FadingBreath {
    fn default() -> Self {
        FadingBreath::new(BreathSettings::default())
    }
}

impl Animation for FadingBreath {
    fn name(&self) -> &'static str {
        "FadingBreath"
    }

    fn apply(&mut self, frame: &Frame<'_>) -> Result<(), AnimationError> {
        while frame.running() {
            let (up, down) = self.ramps();
            for brightness in up {
                self.draw_level(frame, brightness)?;
            }
            frame.pause(self.settings.ramp_pause);
            for brightness in down {
                self.draw_level(frame, brightness)?;
            }
            frame.pause(self.settings.ramp_pause);
        }
        Ok(())
    }
}
