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

//! Animation strategies. A strategy binds an animation to an assistant event and drives it
//! on a dedicated worker thread that is spawned on first activation and parked between
//! episodes.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, error, span, warn, Level, Span};

use crate::{
    color::Rgb,
    config,
    error::{AnimationError, StrategyError},
    pacer::{Pacer, ThreadPacer},
    palette::{self, ColorPalette},
    surface::{PixelSurface, SharedSurface},
};

mod breath;
mod chase;
mod flash;

pub use breath::{BreathSettings, FadingBreath};
pub use chase::{ChaseSettings, FullColorChase};
pub use flash::{FlashSettings, GroupPicker, RandomGroupFlash};

/// The outcome of one `apply` call, handed back to the controller as the done signal.
type Outcome = Result<(), AnimationError>;

/// A cooperative cancellation flag shared between a controller and its worker. Animations
/// check it between frames.
#[derive(Debug, Clone, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn lower(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything an animation needs to render frames.
pub struct Frame<'a> {
    pub surface: &'a dyn PixelSurface,
    pub palette: &'a dyn ColorPalette,
    pub pacer: &'a dyn Pacer,
    running: &'a RunFlag,
}

impl<'a> Frame<'a> {
    pub fn new(
        surface: &'a dyn PixelSurface,
        palette: &'a dyn ColorPalette,
        pacer: &'a dyn Pacer,
        running: &'a RunFlag,
    ) -> Frame<'a> {
        Frame {
            surface,
            palette,
            pacer,
            running,
        }
    }

    /// Returns true while the animation should keep rendering.
    pub fn running(&self) -> bool {
        self.running.is_raised()
    }

    pub fn pause(&self, duration: Duration) {
        self.pacer.pause(duration)
    }

    /// The number of pixels the animation drives.
    pub fn pixel_count(&self) -> usize {
        self.surface.pixel_count()
    }

    pub fn rgb(&self, index: usize) -> Result<Rgb, AnimationError> {
        self.palette
            .rgb(index)
            .ok_or(AnimationError::MissingColor(index))
    }

    pub fn hue(&self, index: usize) -> Result<u16, AnimationError> {
        self.palette
            .hue(index)
            .ok_or(AnimationError::MissingColor(index))
    }
}

/// A pixel animation. `apply` renders frames until the run flag is lowered, checking it only
/// between full cycles, and then returns.
pub trait Animation: Send + 'static {
    /// The name of the animation, used for diagnostics.
    fn name(&self) -> &'static str;

    fn apply(&mut self, frame: &Frame<'_>) -> Result<(), AnimationError>;
}

/// Brightness levels from zero up to, but excluding, `max` in increments of `step`.
pub fn brightness_levels(max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max <= 0.0 {
        return vec![0.0];
    }
    // Guard against float error turning e.g. 0.4 / 0.02 into 20.000000000000004.
    let count = ((max / step) - 1e-9).ceil().max(1.0) as usize;
    (0..count).map(|i| i as f64 * step).collect()
}

/// The controller-side state of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, no worker yet.
    Idle,
    /// The worker exists and waits to be woken.
    Armed,
    /// The worker is inside `apply`.
    Animating,
    /// The worker died or stopped responding. A fresh strategy is required.
    Failed,
    /// Terminated for good.
    Terminated,
}

/// Options shared by every strategy regardless of its animation.
#[derive(Clone)]
pub struct Options {
    pub palette: Arc<dyn ColorPalette>,
    pub pacer: Arc<dyn Pacer>,
    /// How long deactivate and terminate wait for the worker to finish its episode.
    pub deactivate_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            palette: Arc::new(palette::ASSISTANT.clone()),
            pacer: Arc::new(ThreadPacer),
            deactivate_timeout: config::DEFAULT_DEACTIVATE_TIMEOUT,
        }
    }
}

impl TryFrom<&config::Lifecycle> for Options {
    type Error = config::ConfigError;

    fn try_from(config: &config::Lifecycle) -> Result<Self, Self::Error> {
        Ok(Options {
            deactivate_timeout: config.deactivate_timeout()?,
            ..Default::default()
        })
    }
}

/// The controller's handle to a spawned worker.
struct Worker {
    wake: Sender<()>,
    done: Receiver<Outcome>,
    handle: JoinHandle<()>,
}

/// The controller surface of a strategy, so that an event source can hold strategies with
/// different animations side by side.
pub trait Lifecycle<E>: fmt::Display + Send {
    fn activate(&mut self) -> Result<(), StrategyError>;
    fn deactivate(&mut self) -> Result<(), StrategyError>;
    fn terminate(&mut self) -> Result<(), StrategyError>;
    fn is_eligible(&self, event: &E) -> bool;
    fn name(&self) -> &'static str;
}

/// Runs an animation on a dedicated worker in response to activate/deactivate calls.
pub struct Strategy<A: Animation, E> {
    binding: Option<E>,
    name: &'static str,
    state: State,
    animation: Option<A>,
    surface: SharedSurface,
    options: Options,
    running: RunFlag,
    stop: Arc<AtomicBool>,
    worker: Option<Worker>,
    span: Span,
}

impl<A: Animation, E: PartialEq + fmt::Debug> Strategy<A, E> {
    /// Creates a new strategy bound to the given event with the default options.
    pub fn new(
        binding: impl Into<Option<E>>,
        animation: A,
        surface: SharedSurface,
    ) -> Result<Strategy<A, E>, StrategyError> {
        Self::with_options(binding, animation, surface, Options::default())
    }

    /// Creates a new strategy bound to the given event.
    pub fn with_options(
        binding: impl Into<Option<E>>,
        animation: A,
        surface: SharedSurface,
        options: Options,
    ) -> Result<Strategy<A, E>, StrategyError> {
        let binding = binding.into();
        let (palette, pixels) = (options.palette.len(), surface.pixel_count());
        if palette != pixels {
            return Err(StrategyError::PaletteMismatch { palette, pixels });
        }

        let name = animation.name();
        let span = span!(Level::INFO, "strategy", kind = name, event = ?binding);
        span.in_scope(|| debug!("Created."));

        Ok(Strategy {
            binding,
            name,
            state: State::Idle,
            animation: Some(animation),
            surface,
            options,
            running: RunFlag::default(),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
            span,
        })
    }

    /// Returns true if this strategy is bound to the given event. A strategy created without
    /// a binding is never eligible.
    pub fn is_eligible(&self, event: &E) -> bool {
        self.binding.as_ref() == Some(event)
    }
}

impl<A: Animation, E> Strategy<A, E> {
    /// Starts or resumes the animation. Spawns the worker on first use. Doesn't block.
    pub fn activate(&mut self) -> Result<(), StrategyError> {
        let span = self.span.clone();
        let _enter = span.enter();

        match self.state {
            State::Terminated => return Err(StrategyError::Terminated),
            State::Failed => return Err(StrategyError::WorkerExited),
            State::Animating => {
                if let Some(err) = self.check_worker() {
                    return Err(err);
                }
                // The worker is already running, so there's nothing to wake.
                self.running.raise();
                debug!("Already animating.");
                return Ok(());
            }
            State::Idle => {
                if let Err(e) = self.spawn() {
                    self.state = State::Failed;
                    error!(err = %e, "Unable to start worker.");
                    return Err(e);
                }
            }
            State::Armed => {}
        }

        debug!("Activating.");
        self.running.raise();
        let woken = match &self.worker {
            Some(worker) if !worker.handle.is_finished() => match worker.wake.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => true,
                Err(TrySendError::Disconnected(())) => false,
            },
            _ => false,
        };
        if !woken {
            self.running.lower();
            self.state = State::Failed;
            error!("Worker is gone.");
            return Err(StrategyError::WorkerExited);
        }

        self.state = State::Animating;
        debug!("Activated.");
        Ok(())
    }

    /// Stops the animation and blanks the strip. Blocks until the worker has left `apply`
    /// or the deactivation timeout expires. Does nothing if the strategy isn't animating.
    pub fn deactivate(&mut self) -> Result<(), StrategyError> {
        let span = self.span.clone();
        let _enter = span.enter();

        match self.state {
            State::Terminated => return Err(StrategyError::Terminated),
            State::Failed => return Err(StrategyError::WorkerExited),
            State::Idle | State::Armed => {
                debug!("Not animating.");
                return Ok(());
            }
            State::Animating => {}
        }

        debug!("Deactivating.");
        self.running.lower();
        let timeout = self.options.deactivate_timeout;
        let received = match &self.worker {
            Some(worker) => worker.done.recv_timeout(timeout),
            None => Err(RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.state = State::Failed;
                if let Err(blank_err) = self.surface.blank() {
                    warn!(err = %blank_err, "Unable to blank the strip.");
                }
                return Err(StrategyError::WorkerFailed(e));
            }
            Err(RecvTimeoutError::Timeout) => {
                self.state = State::Failed;
                warn!(timeout = ?timeout, "Worker did not finish in time.");
                return Err(StrategyError::Timeout(timeout));
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.state = State::Failed;
                error!("Worker exited without finishing.");
                return Err(StrategyError::WorkerExited);
            }
        }

        self.state = State::Armed;
        self.surface.blank()?;
        debug!("Deactivated.");
        Ok(())
    }

    /// Stops the worker for good and joins it. Calling this more than once is fine.
    pub fn terminate(&mut self) -> Result<(), StrategyError> {
        let span = self.span.clone();
        let _enter = span.enter();

        if self.state == State::Terminated {
            debug!("Already terminated.");
            return Ok(());
        }

        debug!("Terminating.");
        self.stop.store(true, Ordering::SeqCst);
        self.running.lower();
        self.state = State::Terminated;

        let Some(worker) = self.worker.take() else {
            debug!("Terminated.");
            return Ok(());
        };

        // Unblock a worker that's waiting to be woken. A full slot or a gone worker are fine.
        let _ = worker.wake.try_send(());

        if !worker.handle.is_finished() {
            let timeout = self.options.deactivate_timeout;
            if let Err(RecvTimeoutError::Timeout) = worker.done.recv_timeout(timeout) {
                if !worker.handle.is_finished() {
                    warn!(timeout = ?timeout, "Worker did not stop in time, detaching it.");
                    return Err(StrategyError::Timeout(timeout));
                }
            }
        }

        if worker.handle.join().is_err() {
            warn!("Worker panicked.");
        }
        debug!("Terminated.");
        Ok(())
    }

    /// Gets the current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true if the worker has been spawned and hasn't exited.
    pub fn is_worker_alive(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// The name of the animation this strategy runs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the error to report if the worker died mid-episode, marking the strategy failed.
    fn check_worker(&mut self) -> Option<StrategyError> {
        let worker = self.worker.as_ref()?;
        if !worker.handle.is_finished() {
            return None;
        }

        self.running.lower();
        self.state = State::Failed;
        error!("Worker is gone.");
        Some(match worker.done.try_recv() {
            Ok(Err(e)) => StrategyError::WorkerFailed(e),
            _ => StrategyError::WorkerExited,
        })
    }

    fn spawn(&mut self) -> Result<(), StrategyError> {
        let Some(animation) = self.animation.take() else {
            return Err(StrategyError::WorkerExited);
        };
        debug!("Starting worker.");

        let (wake_tx, wake_rx) = bounded::<()>(1);
        let (done_tx, done_rx) = bounded::<Outcome>(1);
        let surface = self.surface.clone();
        let palette = self.options.palette.clone();
        let pacer = self.options.pacer.clone();
        let running = self.running.clone();
        let stop = self.stop.clone();
        let span = self.span.clone();

        let handle = thread::Builder::new()
            .name(format!("{}-worker", self.name))
            .spawn(move || {
                let _enter = span.enter();
                let frame = Frame::new(
                    surface.as_ref(),
                    palette.as_ref(),
                    pacer.as_ref(),
                    &running,
                );
                work(animation, &frame, &stop, wake_rx, done_tx);
            })
            .map_err(StrategyError::Spawn)?;

        self.worker = Some(Worker {
            wake: wake_tx,
            done: done_rx,
            handle,
        });
        self.state = State::Armed;
        Ok(())
    }
}

/// The worker loop. Every wake runs one full `apply` and answers with one done. A failed
/// animation or a stop request ends the worker.
fn work<A: Animation>(
    mut animation: A,
    frame: &Frame<'_>,
    stop: &AtomicBool,
    wake: Receiver<()>,
    done: Sender<Outcome>,
) {
    debug!("Worker armed.");
    while wake.recv().is_ok() {
        if stop.load(Ordering::SeqCst) {
            break;
        }

        debug!("Animating.");
        let outcome = animation.apply(frame);
        let failed = outcome.is_err();
        if let Err(e) = &outcome {
            error!(err = %e, "Animation failed.");
        }
        if done.send(outcome).is_err() || failed || stop.load(Ordering::SeqCst) {
            break;
        }
    }
    debug!("Worker exited.");
}

impl<A: Animation, E> fmt::Display for Strategy<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strategy {}", self.name)
    }
}

impl<A: Animation, E> Drop for Strategy<A, E> {
    fn drop(&mut self) {
        if let Err(e) = self.terminate() {
            warn!(err = %e, "Error terminating strategy.");
        }
    }
}

impl<A, E> Lifecycle<E> for Strategy<A, E>
where
    A: Animation,
    E: PartialEq + fmt::Debug + Send,
{
    fn activate(&mut self) -> Result<(), StrategyError> {
        Strategy::activate(self)
    }

    fn deactivate(&mut self) -> Result<(), StrategyError> {
        Strategy::deactivate(self)
    }

    fn terminate(&mut self) -> Result<(), StrategyError> {
        Strategy::terminate(self)
    }

    fn is_eligible(&self, event: &E) -> bool {
        Strategy::is_eligible(self, event)
    }

    fn name(&self) -> &'static str {
        Strategy::name(self)
    }
}
