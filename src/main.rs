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
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blinkt_assist::config::{self, Animations};
use blinkt_assist::event::AssistantEvent;
use blinkt_assist::palette::{self, PIXEL_COUNT};
use blinkt_assist::strategy::{
    BreathSettings, ChaseSettings, FadingBreath, FlashSettings, FullColorChase, Lifecycle,
    Options, RandomGroupFlash, Strategy,
};
use blinkt_assist::surface::{Console, SharedSurface};
use clap::{crate_version, Parser, Subcommand, ValueEnum};
use duration_string::DurationString;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How long the showcase waits between strategies.
const SHOWCASE_REST: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "Voice assistant lifecycle animations for LED strips."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the assistant palette.
    Palette {},
    /// Runs a single animation on the terminal.
    Demo {
        /// The animation to run.
        kind: Kind,
        /// How long to run the animation for.
        #[arg(short, long, default_value = "10s")]
        duration: String,
        /// The event the strategy is bound to.
        #[arg(short, long, value_enum, default_value_t = AssistantEvent::StartFinished)]
        event: AssistantEvent,
        /// The path to the animation config.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Runs every animation in turn, then the chase again.
    Showcase {
        /// How long each animation runs for.
        #[arg(short, long, default_value = "10s")]
        duration: String,
        /// The path to the animation config.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Chase,
    Breath,
    Flash,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Palette {} => {
            println!("Palette (pixels: {}):", PIXEL_COUNT);
            print!("{}", palette::ASSISTANT);
        }
        Commands::Demo {
            kind,
            duration,
            event,
            config,
        } => {
            let duration: Duration = DurationString::from_string(duration)?.into();
            let animations = load(config)?;
            let surface: SharedSurface = Arc::new(Console::new(PIXEL_COUNT));

            let mut strategy = build(kind, event, &animations, surface)?;
            info!(
                strategy = %strategy,
                eligible = strategy.is_eligible(&event),
                "Running demo."
            );
            episode(strategy.as_mut(), duration)?;
            strategy.terminate()?;
        }
        Commands::Showcase { duration, config } => {
            let duration: Duration = DurationString::from_string(duration)?.into();
            let animations = load(config)?;
            let surface: SharedSurface = Arc::new(Console::new(PIXEL_COUNT));
            let event = AssistantEvent::StartFinished;

            let mut strategies = Vec::new();
            for kind in [Kind::Chase, Kind::Flash, Kind::Breath] {
                strategies.push(build(kind, event, &animations, surface.clone())?);
            }

            for strategy in strategies.iter_mut() {
                episode(strategy.as_mut(), duration)?;
                thread::sleep(SHOWCASE_REST);
            }
            // The chase again, to show that a worker carries over between episodes.
            episode(strategies[0].as_mut(), duration)?;

            for strategy in strategies.iter_mut() {
                strategy.terminate()?;
            }
        }
    }

    Ok(())
}

/// Loads the animation config if a path was given.
fn load(path: Option<PathBuf>) -> Result<Animations, config::ConfigError> {
    match path {
        Some(path) => config::load(&path),
        None => Ok(Animations::default()),
    }
}

/// Builds a strategy of the given kind on the surface.
fn build(
    kind: Kind,
    event: AssistantEvent,
    animations: &Animations,
    surface: SharedSurface,
) -> Result<Box<dyn Lifecycle<AssistantEvent>>, Box<dyn Error>> {
    let options = Options::try_from(animations.lifecycle())?;
    Ok(match kind {
        Kind::Chase => Box::new(Strategy::with_options(
            event,
            FullColorChase::new(ChaseSettings::try_from(animations.chase())?),
            surface,
            options,
        )?),
        Kind::Breath => Box::new(Strategy::with_options(
            event,
            FadingBreath::new(BreathSettings::try_from(animations.breath())?),
            surface,
            options,
        )?),
        Kind::Flash => Box::new(Strategy::with_options(
            event,
            RandomGroupFlash::new(FlashSettings::try_from(animations.flash())?),
            surface,
            options,
        )?),
    })
}

/// Animates for the given duration and then blanks the strip.
fn episode(
    strategy: &mut dyn Lifecycle<AssistantEvent>,
    duration: Duration,
) -> Result<(), Box<dyn Error>> {
    info!(strategy = %strategy, duration = ?duration, "Activating.");
    strategy.activate()?;
    thread::sleep(duration);
    strategy.deactivate()?;
    println!();
    Ok(())
}
