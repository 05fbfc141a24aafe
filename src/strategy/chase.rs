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

use crate::{config, error::AnimationError};

use super::{Animation, Frame};

/// Timings of the color chase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseSettings {
    pub frame_interval: Duration,
    pub sweep_pause: Duration,
    pub brightness: f64,
}

impl Default for ChaseSettings {
    fn default() -> Self {
        ChaseSettings {
            frame_interval: config::chase::DEFAULT_FRAME_INTERVAL,
            sweep_pause: config::chase::DEFAULT_SWEEP_PAUSE,
            brightness: config::chase::DEFAULT_BRIGHTNESS,
        }
    }
}

impl TryFrom<&config::Chase> for ChaseSettings {
    type Error = config::ConfigError;

    fn try_from(config: &config::Chase) -> Result<Self, Self::Error> {
        Ok(ChaseSettings {
            frame_interval: config.frame_interval()?,
            sweep_pause: config.sweep_pause()?,
            brightness: config.brightness()?,
        })
    }
}

/// A dim two pixel comet that runs down the strip in palette colors.
#[derive(Debug, Clone, Default)]
pub struct FullColorChase {
    settings: ChaseSettings,
}

impl FullColorChase {
    pub fn new(settings: ChaseSettings) -> FullColorChase {
        FullColorChase { settings }
    }

    /// Lights the pixel at `position` and its successor, wrapping at the end of the strip.
    fn draw(&self, frame: &Frame<'_>, position: usize) -> Result<(), AnimationError> {
        let count = frame.pixel_count();
        frame.surface.clear()?;
        for index in [position, (position + 1) % count] {
            frame
                .surface
                .set_pixel(index, frame.rgb(index)?, Some(self.settings.brightness))?;
        }
        frame.surface.show()?;
        Ok(())
    }
}

impl Animation for FullColorChase {
    fn name(&self) -> &'static str {
        "FullColorChase"
    }

    fn apply(&mut self, frame: &Frame<'_>) -> Result<(), AnimationError> {
        while frame.running() {
            for position in (0..frame.pixel_count()).rev() {
                self.draw(frame, position)?;
                frame.pause(self.settings.frame_interval);
            }
            frame.pause(self.settings.sweep_pause);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        pacer::test::StopAfter,
        palette::{ColorPalette, ASSISTANT, PIXEL_COUNT},
        strategy::RunFlag,
        surface::mock::{Call, Recorder},
    };

    use super::*;

    /// Runs a single sweep of the chase against a recorder.
    fn one_sweep(settings: ChaseSettings) -> (Recorder, Vec<Duration>) {
        let surface = Recorder::new(PIXEL_COUNT);
        let running = RunFlag::default();
        running.raise();
        // One pause per position plus the pause after the sweep.
        let pacer = StopAfter::new(PIXEL_COUNT + 1, running.clone());

        let frame = Frame::new(&surface, &ASSISTANT, pacer.as_ref(), &running);
        FullColorChase::new(settings)
            .apply(&frame)
            .expect("chase failed");

        let pauses = pacer.pauses();
        (surface, pauses)
    }

    #[test]
    fn test_sweep_lights_adjacent_pairs() {
        let (surface, _) = one_sweep(ChaseSettings::default());
        let calls = surface.calls();

        // clear, two pixels, show per position.
        assert_eq!(calls.len(), PIXEL_COUNT * 4);
        for (frame, chunk) in calls.chunks(4).enumerate() {
            let position = PIXEL_COUNT - 1 - frame;
            let next = (position + 1) % PIXEL_COUNT;
            assert_eq!(chunk[0], Call::Clear);
            assert_eq!(
                chunk[1],
                Call::SetPixel {
                    index: position,
                    color: ASSISTANT.rgb(position).unwrap(),
                    brightness: Some(config::chase::DEFAULT_BRIGHTNESS),
                }
            );
            assert_eq!(
                chunk[2],
                Call::SetPixel {
                    index: next,
                    color: ASSISTANT.rgb(next).unwrap(),
                    brightness: Some(config::chase::DEFAULT_BRIGHTNESS),
                }
            );
            assert_eq!(chunk[3], Call::Show);
        }
    }

    #[test]
    fn test_sweep_wraps_to_first_pixel() {
        let (surface, _) = one_sweep(ChaseSettings::default());
        let shown = surface.calls();

        // The first frame lights the last pixel and wraps around to pixel 0.
        assert!(matches!(
            shown[1],
            Call::SetPixel {
                index: 7,
                ..
            }
        ));
        assert!(matches!(
            shown[2],
            Call::SetPixel {
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_sweep_timing() {
        let settings = ChaseSettings {
            frame_interval: Duration::from_millis(3),
            sweep_pause: Duration::from_millis(7),
            brightness: 0.1,
        };
        let (_, pauses) = one_sweep(settings);

        let mut expected = vec![Duration::from_millis(3); PIXEL_COUNT];
        expected.push(Duration::from_millis(7));
        assert_eq!(pauses, expected);
    }

    #[test]
    fn test_not_running_renders_nothing() {
        let surface = Recorder::new(PIXEL_COUNT);
        let running = RunFlag::default();
        let pacer = StopAfter::new(1, running.clone());
        let frame = Frame::new(&surface, &ASSISTANT, pacer.as_ref(), &running);

        FullColorChase::default().apply(&frame).expect("chase failed");
        assert_eq!(surface.call_count(), 0);
    }

    #[test]
    fn test_surface_failure_propagates() {
        let surface = Recorder::new(PIXEL_COUNT);
        surface.fail();
        let running = RunFlag::default();
        running.raise();
        let pacer = StopAfter::new(100, running.clone());
        let frame = Frame::new(&surface, &ASSISTANT, pacer.as_ref(), &running);

        assert!(matches!(
            FullColorChase::default().apply(&frame),
            Err(AnimationError::Surface(_))
        ));
    }

    #[test]
    fn test_settings_from_config() {
        let animations = config::parse("chase:\n  frame_interval: 5ms\n").unwrap();
        let settings = ChaseSettings::try_from(animations.chase()).unwrap();
        assert_eq!(settings.frame_interval, Duration::from_millis(5));
        assert_eq!(settings.sweep_pause, config::chase::DEFAULT_SWEEP_PAUSE);
    }
}
