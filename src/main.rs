//! Lava Run entry point
//!
//! Headless driver: plays a level pack with scripted input and prints text
//! frames to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use lava_run::driver::RunSummary;
use lava_run::input::{InputSource, ScriptedInput};
use lava_run::render::TextRenderer;
use lava_run::{FrameClock, Game, GameProgress, Settings, levels};

#[derive(Parser, Debug)]
#[command(name = "lava-run", version, about = "Play Lava Run levels headlessly")]
struct Cli {
    /// Plan file with levels separated by blank lines (defaults to the built-in pack)
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Input script, e.g. "R*30,RJ*5,.*10"
    #[arg(long, default_value = "")]
    script: String,

    /// Stop after this many frames
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Print every Nth frame (0 prints only the final one)
    #[arg(long, default_value_t = 0)]
    print_every: u32,

    /// Seed for collectible wobble phases (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the whole level instead of the scrolling viewport window
    #[arg(long)]
    whole_level: bool,

    /// Pace frames against the wall clock instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Print the final simulation state as JSON
    #[arg(long)]
    dump_state: bool,

    /// Write the effective settings to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    settings.validate()?;
    if let Some(path) = &cli.write_settings {
        settings.save(path)?;
        return Ok(());
    }

    let pack = match &cli.levels {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read level file {}", path.display()))?;
            levels::load_pack(&text, settings.seed)
                .with_context(|| format!("bad level file {}", path.display()))?
        }
        None => levels::builtin(settings.seed).context("built-in levels are broken")?,
    };
    log::info!("Lava Run starting with {} levels", pack.len());

    let mut game = Game::with_end_delay(pack, settings.end_delay)?;
    let mut input = ScriptedInput::parse(&cli.script).context("invalid --script")?;
    let mut text = if cli.whole_level {
        TextRenderer::new(io::stdout().lock(), cli.print_every)
    } else {
        TextRenderer::with_viewport(io::stdout().lock(), cli.print_every, settings.viewport())
    };

    let summary = if cli.realtime {
        run_realtime(&mut game, &mut input, &mut text, &settings, cli.frames)?
    } else {
        game.run_headless(&mut input, &mut text, settings.frame_step(), cli.frames)?
    };

    if let Some(state) = game.state() {
        text.write_frame(state)?;
        if cli.dump_state {
            let json = serde_json::to_string_pretty(state).context("serializing state")?;
            let mut out = text.into_inner();
            writeln!(out, "{json}").context("writing state")?;
        }
    }

    println!(
        "cleared {}/{} levels in {} frames, attempts {:?}{}",
        summary.levels_cleared,
        game.level_count(),
        summary.frames,
        summary.attempts,
        if summary.complete { " - you've won!" } else { "" }
    );
    Ok(())
}

/// Same loop as `Game::run_headless`, but each step is measured with a
/// `FrameClock` and the loop sleeps for one frame between steps.
fn run_realtime(
    game: &mut Game,
    input: &mut dyn InputSource,
    sink: &mut TextRenderer<io::StdoutLock<'static>>,
    settings: &Settings,
    max_frames: u64,
) -> Result<RunSummary> {
    let mut clock = FrameClock::new(settings.max_frame_step);
    let frame_time = Duration::from_secs_f32(settings.frame_step());
    let start = Instant::now();
    let mut frames = 0;

    while frames < max_frames {
        let Some(dt) = clock.tick(start.elapsed().as_secs_f64()) else {
            thread::sleep(frame_time);
            continue;
        };
        let snapshot = input.poll();
        frames += 1;
        if game.frame(dt, &snapshot, sink)? == GameProgress::Complete {
            break;
        }
        thread::sleep(frame_time);
    }

    Ok(RunSummary {
        frames,
        levels_cleared: game.level_index(),
        attempts: game.attempts().to_vec(),
        complete: game.is_complete(),
    })
}
