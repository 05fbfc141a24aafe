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
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(40);
pub const DEFAULT_FLASH_PAUSE: Duration = Duration::from_secs(1);

/// A YAML representation of the random group flash configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Flash {
    /// The brightness at the top of a flash.
    max_brightness: Option<f64>,

    /// The brightness change between two steps of a flash.
    step: Option<f64>,

    /// How long each step of a flash is held.
    step_interval: Option<String>,

    /// The pause after each flash.
    flash_pause: Option<String>,

    /// Seeds the pixel picker. Unseeded pickers draw from system entropy.
    seed: Option<u64>,
}

impl Flash {
    /// Gets the maximum brightness.
    pub fn max_brightness(&self) -> Result<f64, ConfigError> {
        super::brightness(
            "flash.max_brightness",
            self.max_brightness.unwrap_or(DEFAULT_MAX_BRIGHTNESS),
        )
    }

    /// Gets the brightness step.
    pub fn step(&self) -> Result<f64, ConfigError> {
        super::step(
            "flash.step",
            self.step.unwrap_or(DEFAULT_STEP),
            self.max_brightness()?,
        )
    }

    /// Gets the time each step is held.
    pub fn step_interval(&self) -> Result<Duration, ConfigError> {
        super::duration(
            "flash.step_interval",
            &self.step_interval,
            DEFAULT_STEP_INTERVAL,
        )
    }

    /// Gets the pause after each flash.
    pub fn flash_pause(&self) -> Result<Duration, ConfigError> {
        super::duration("flash.flash_pause", &self.flash_pause, DEFAULT_FLASH_PAUSE)
    }

    /// Gets the picker seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
