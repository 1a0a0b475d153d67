//! Headless Pong: runs the match loop without a window.
//!
//! Usage:
//!   cargo run -p pong_cli -- --mode single --dump-scenes -
//!   RUST_LOG=debug cargo run -p pong_cli -- --config pong.json --realtime
//!   cargo run -p pong_cli -- --keys match.tape --dump-scenes scenes.jsonl

mod app;
mod input;
mod render;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use game_core::{Config, ManualClock, Mode, Simulation, SystemClock};
use tracing_subscriber::filter::EnvFilter;

use app::{App, Pace, RunSummary};
use input::{InputSource, ScriptedInput, TapeInput};
use render::{JsonLinesRenderer, LogRenderer, Tee};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Multi,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => Mode::SinglePlayer,
            ModeArg::Multi => Mode::MultiPlayer,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pong")]
#[command(about = "Play a scripted match of Pong without a window")]
struct Args {
    /// JSON config file; missing fields use the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mode key the scripted player presses on the title screen
    #[arg(long, value_enum, default_value = "single")]
    mode: ModeArg,

    /// Stop after this many rendered frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Write every scene as a JSON line to this file, or `-` for stdout
    #[arg(long)]
    dump_scenes: Option<PathBuf>,

    /// Pace frames against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Keep looping after the match is decided
    #[arg(long)]
    keep_open: bool,

    /// Replay keys from a tape file, or `-` for stdin, instead of the
    /// scripted player. One line per tick; `+key` presses, `key` holds.
    #[arg(long)]
    keys: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.keep_open && args.keys.is_none() && args.max_frames.is_none() {
        anyhow::bail!("--keep-open needs --max-frames to ever stop");
    }

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => Config::new(),
    };
    tracing::info!(mode = ?args.mode, realtime = args.realtime, "starting");

    let scenes = match &args.dump_scenes {
        Some(path) => Some(JsonLinesRenderer::new(open_output(path)?)),
        None => None,
    };
    let renderer = Tee(LogRenderer::new(), scenes);
    let input: Box<dyn InputSource> = match &args.keys {
        Some(path) => Box::new(TapeInput::new(open_input(path)?)),
        None => Box::new(ScriptedInput::new(args.mode.into(), !args.keep_open)),
    };
    let sim = Simulation::new(config);

    let summary = if args.realtime {
        run(sim, SystemClock::new(), input, renderer, args.max_frames)?
    } else {
        run(sim, ManualClock::new(), input, renderer, args.max_frames)?
    };

    tracing::info!(
        frames = summary.frames,
        ticks = summary.ticks,
        phase = ?summary.phase,
        score = %summary.score,
        closed = summary.closed,
        "done"
    );
    Ok(())
}

type CliRenderer = Tee<LogRenderer, Option<JsonLinesRenderer<Box<dyn Write>>>>;

fn run<C: Pace>(
    sim: Simulation,
    clock: C,
    input: Box<dyn InputSource>,
    renderer: CliRenderer,
    max_frames: Option<u64>,
) -> Result<RunSummary> {
    let mut app = App::new(sim, clock, input, renderer).with_max_frames(max_frames);
    let summary = app.run()?;
    tracing::debug!(sim_ms = app.simulation().time.now_ms, "simulated time");

    if let Some(scenes) = app.into_renderer().1 {
        scenes
            .into_inner()
            .flush()
            .context("failed to flush scene dump")?;
    }
    Ok(summary)
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file =
        File::open(path).with_context(|| format!("failed to open key tape: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create scene dump: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
