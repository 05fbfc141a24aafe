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
use std::{path::Path, time::Duration};

use config::{Config, File, FileFormat};
use duration_string::DurationString;
use serde::Deserialize;

pub mod breath;
pub mod chase;
mod error;
pub mod flash;
pub mod lifecycle;

pub use breath::Breath;
pub use chase::Chase;
pub use error::ConfigError;
pub use flash::Flash;
pub use lifecycle::{Lifecycle, DEFAULT_DEACTIVATE_TIMEOUT};

/// A YAML representation of the animation configuration. Every section is optional and
/// falls back to the built-in timings.
#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct Animations {
    lifecycle: Lifecycle,
    chase: Chase,
    breath: Breath,
    flash: Flash,
}

impl Animations {
    /// Gets the lifecycle configuration.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Gets the color chase configuration.
    pub fn chase(&self) -> &Chase {
        &self.chase
    }

    /// Gets the fading breath configuration.
    pub fn breath(&self) -> &Breath {
        &self.breath
    }

    /// Gets the random group flash configuration.
    pub fn flash(&self) -> &Flash {
        &self.flash
    }
}

/// Loads the animation configuration from the given YAML file.
pub fn load(path: &Path) -> Result<Animations, ConfigError> {
    Ok(Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml))
        .build()?
        .try_deserialize()?)
}

/// Parses an animation configuration from a YAML string.
pub fn parse(yaml: &str) -> Result<Animations, ConfigError> {
    Ok(Config::builder()
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()?
        .try_deserialize()?)
}

/// Parses an optional duration string, falling back to the given default.
fn duration(
    field: &'static str,
    value: &Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        Some(value) => Ok(DurationString::from_string(value.clone())
            .map_err(|source| ConfigError::Duration { field, source })?
            .into()),
        None => Ok(default),
    }
}

/// Checks that a brightness value lies within (0, 1].
fn brightness(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not within (0, 1]", value),
        })
    }
}

/// Checks that a ramp step is positive and no larger than the ramp's cap.
fn step(field: &'static str, value: f64, max: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value <= max {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not within (0, {}]", value, max),
        })
    }
}

#[cfg(test)]
mod test {
    use std::{io::Write, time::Duration};

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let animations = parse("{}").unwrap();

        assert_eq!(
            animations.lifecycle().deactivate_timeout().unwrap(),
            DEFAULT_DEACTIVATE_TIMEOUT
        );
        assert_eq!(
            animations.chase().frame_interval().unwrap(),
            Duration::from_millis(75)
        );
        assert_eq!(animations.breath().max_brightness().unwrap(), 0.4);
        assert_eq!(animations.flash().seed(), None);
    }

    #[test]
    fn test_full_config() {
        let animations = parse(
            r#"
            lifecycle:
              deactivate_timeout: 2s
            chase:
              frame_interval: 10ms
              sweep_pause: 20ms
              brightness: 0.5
            breath:
              max_brightness: 0.8
              step: 0.1
              level_interval: 5ms
              ramp_pause: 15ms
            flash:
              max_brightness: 1.0
              step: 0.25
              step_interval: 1ms
              flash_pause: 500ms
              seed: 42
            "#,
        )
        .unwrap();

        assert_eq!(
            animations.lifecycle().deactivate_timeout().unwrap(),
            Duration::from_secs(2)
        );
        assert_eq!(
            animations.chase().frame_interval().unwrap(),
            Duration::from_millis(10)
        );
        assert_eq!(
            animations.chase().sweep_pause().unwrap(),
            Duration::from_millis(20)
        );
        assert_eq!(animations.chase().brightness().unwrap(), 0.5);
        assert_eq!(animations.breath().max_brightness().unwrap(), 0.8);
        assert_eq!(animations.breath().step().unwrap(), 0.1);
        assert_eq!(
            animations.breath().level_interval().unwrap(),
            Duration::from_millis(5)
        );
        assert_eq!(
            animations.breath().ramp_pause().unwrap(),
            Duration::from_millis(15)
        );
        assert_eq!(animations.flash().max_brightness().unwrap(), 1.0);
        assert_eq!(animations.flash().step().unwrap(), 0.25);
        assert_eq!(
            animations.flash().step_interval().unwrap(),
            Duration::from_millis(1)
        );
        assert_eq!(
            animations.flash().flash_pause().unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(animations.flash().seed(), Some(42));
    }

    #[test]
    fn test_invalid_duration() {
        let animations = parse("chase:\n  frame_interval: soon\n").unwrap();
        assert!(matches!(
            animations.chase().frame_interval(),
            Err(ConfigError::Duration {
                field: "chase.frame_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let animations = parse("breath:\n  max_brightness: 1.5\n").unwrap();
        assert!(matches!(
            animations.breath().max_brightness(),
            Err(ConfigError::Invalid { .. })
        ));

        let animations = parse("flash:\n  max_brightness: 0.2\n  step: 0.3\n").unwrap();
        assert!(matches!(
            animations.flash().step(),
            Err(ConfigError::Invalid { .. })
        ));

        let animations = parse("chase:\n  brightness: 0\n").unwrap();
        assert!(matches!(
            animations.chase().brightness(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "chase:\n  sweep_pause: 1s").unwrap();

        let animations = load(file.path()).unwrap();
        assert_eq!(
            animations.chase().sweep_pause().unwrap(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
