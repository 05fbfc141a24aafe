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

pub const DEFAULT_DEACTIVATE_TIMEOUT: Duration = Duration::from_secs(10);

/// A YAML representation of the strategy lifecycle configuration.
#[derive(Deserialize, Clone, Default)]
pub struct Lifecycle {
    /// How long deactivate and terminate wait for a running animation to wind down.
    deactivate_timeout: Option<String>,
}

impl Lifecycle {
    /// Gets the deactivation timeout.
    pub fn deactivate_timeout(&self) -> Result<Duration, ConfigError> {
        super::duration(
            "lifecycle.deactivate_timeout",
            &self.deactivate_timeout,
            DEFAULT_DEACTIVATE_TIMEOUT,
        )
    }
}
