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
use std::{io, time::Duration};

/// Failures reported by a pixel surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("LED strip unavailable: {0}")]
    Unavailable(String),

    #[error("pixel {index} out of range for a strip of {count} pixels")]
    OutOfRange { index: usize, count: usize },

    #[error("LED strip I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures raised while an animation renders frames.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("palette has no entry for pixel {0}")]
    MissingColor(usize),
}

/// Failures of the strategy lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The strategy was terminated and can't be used again.
    #[error("strategy already terminated")]
    Terminated,

    /// The animation failed and the worker exited with it.
    #[error("animation worker failed: {0}")]
    WorkerFailed(#[source] AnimationError),

    /// The worker went away without reporting, most likely by panicking.
    #[error("animation worker exited unexpectedly")]
    WorkerExited,

    #[error("animation worker did not finish within {0:?}")]
    Timeout(Duration),

    #[error("unable to spawn animation worker: {0}")]
    Spawn(#[source] io::Error),

    #[error("palette has {palette} colors but the strip has {pixels} pixels")]
    PaletteMismatch { palette: usize, pixels: usize },

    #[error("unable to blank the strip: {0}")]
    Surface(#[from] SurfaceError),
}
