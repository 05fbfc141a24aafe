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

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(75);
pub const DEFAULT_SWEEP_PAUSE: Duration = Duration::from_millis(100);
pub const DEFAULT_BRIGHTNESS: f64 = 0.05;

/// A YAML representation of the color chase configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Chase {
    /// How long each position of the chase stays lit.
    frame_interval: Option<String>,

    /// The pause after a full sweep of the strip.
    sweep_pause: Option<String>,

    /// The brightness of the lit pixels.
    brightness: Option<f64>,
}

impl Chase {
    /// Gets the frame interval.
    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        super::duration(
            "chase.frame_interval",
            &self.frame_interval,
            DEFAULT_FRAME_INTERVAL,
        )
    }

    /// Gets the pause between sweeps.
    pub fn sweep_pause(&self) -> Result<Duration, ConfigError> {
        super::duration("chase.sweep_pause", &self.sweep_pause, DEFAULT_SWEEP_PAUSE)
    }

    /// Gets the pixel brightness.
    pub fn brightness(&self) -> Result<f64, ConfigError> {
        super::brightness(
            "chase.brightness",
            self.brightness.unwrap_or(DEFAULT_BRIGHTNESS),
        )
    }
}
