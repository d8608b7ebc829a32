//! Gap Glider entry point
//!
//! Native builds run a headless session at a fixed frame rate with a
//! simple autopilot and log how the run went. Drawing is left to hosts
//! that embed the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use gap_glider::sim::{Command, GameState};
use gap_glider::{ConfigError, Session, Tuning};

/// Headless Gap Glider runner
#[derive(Debug, Parser)]
#[command(name = "gap-glider", version, about)]
struct Cli {
    /// RNG seed for pipe gaps
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Viewport width in pixels
    #[arg(long, default_value_t = 450.0)]
    width: f32,
    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,
    /// Simulated wall-clock seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Frames per second driving the tick
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Disable the autopilot (the bird just falls)
    #[arg(long)]
    no_autopilot: bool,
    /// Print the final frame as JSON
    #[arg(long)]
    dump: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// Jump when the bird sinks below the centre of the next opening
fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.is_game_over() {
        return true;
    }
    let bird = &state.bird;
    let target = state
        .pipes
        .next_ahead_of(bird.pos.x)
        .map(|pair| pair.gap_center())
        .unwrap_or(state.field.height / 2.0);
    let bird_center = bird.pos.y + bird.size.y / 2.0;
    bird.vel_y >= 0.0 && bird_center > target + bird.size.y
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if cli.fps == 0 {
        return Err(ConfigError::InvalidTuning("fps must be positive".into()));
    }

    let mut session = Session::from_viewport(cli.width, cli.height, tuning, cli.seed)?;
    let dt = 1.0 / cli.fps as f32;
    let frames = (cli.seconds.max(0.0) * cli.fps as f32).round() as u64;

    let mut runs = 1u32;
    let mut best = 0.0f32;
    for _ in 0..frames {
        let state = session.state();
        best = best.max(state.score());
        if state.is_game_over() {
            if cli.no_autopilot {
                break;
            }
            runs += 1;
        }
        if !cli.no_autopilot && autopilot_wants_jump(state) {
            session.push(Command::Jump);
        }
        session.frame(dt);
    }
    best = best.max(session.state().score());

    let frame = session.frame_snapshot();
    log::info!(
        "Finished after {:.1}s: {runs} run(s), best score {best}, final score {}{}",
        session.now_ms() / 1000.0,
        frame.score_label(),
        frame.banner().map(|b| format!(" ({b})")).unwrap_or_default()
    );

    if cli.dump {
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize frame: {e}"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::info!("Gap Glider (native, headless) starting...");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
