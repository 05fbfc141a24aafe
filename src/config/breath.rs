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

use serde::Deserialize;

use super::ConfigError;

pub const DEFAULT_MAX_BRIGHTNESS: f64 = 0.4;
pub const DEFAULT_STEP: f64 = 0.02;
pub const DEFAULT_LEVEL_INTERVAL: Duration = Duration::from_millis(40);
pub const DEFAULT_RAMP_PAUSE: Duration = Duration::from_millis(75);

/// A YAML representation of the fading breath configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Breath {
    /// The brightness at the top of the ramp.
    max_brightness: Option<f64>,

    /// The brightness change between two levels.
    step: Option<f64>,

    /// How long each brightness level is held.
    level_interval: Option<String>,

    /// The pause at the top and at the bottom of the ramp.
    ramp_pause: Option<String>,
}

impl Breath {
    /// Gets the maximum brightness.
    pub fn max_brightness(&self) -> Result<f64, ConfigError> {
        super::brightness(
            "breath.max_brightness",
            self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS),
        )
    }

    /// Gets the brightness step.
    pub fn step(&self) -> Result<f64, ConfigError> {
        super::step(
            "breath.step",
            self.step.unwrap_or(DEFAULT_STEP),
            self.max_brightness()?,
        )
    }

    /// Gets the time each level is held.
    pub fn level_interval(&self) -> Result<Duration, ConfigError> {
        super::duration(
            "breath.level_interval",
            &self.level_interval,
            DEFAULT_LEVEL_INTERVAL,
        )
    }

    /// Gets the pause between ramps.
    pub fn ramp_pause(&self) -> Result<Duration, ConfigError> {
        super::duration("breath.ramp_pause", &self.ramp_pause, DEFAULT_RAMP_PAUSE)
    }
}
