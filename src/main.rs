//! Tunnel Shooter headless runner
//!
//! Plays the simulation on autopilot at a fixed frame rate and logs how the
//! runs went. Set `RUST_LOG=debug` to watch spawns and hits.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use tunnel_shooter::consts::{FPS, MAX_FRAME_DT};
use tunnel_shooter::sim::{FrameView, GameState, RunPhase, autopilot_input, tick};
use tunnel_shooter::{ConfigError, GameConfig};

/// Parsed command-line arguments
#[derive(Debug, Default)]
struct CliArgs {
    seed: Option<u64>,
    frames: Option<u64>,
    config: Option<PathBuf>,
    /// Print the final frame as JSON on stdout
    dump: bool,
    show_help: bool,
}

impl CliArgs {
    fn parse() -> Self {
        let mut args = Self::default();
        let mut iter = env::args().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => args.seed = Some(seed),
                    None => {
                        eprintln!("--seed requires an unsigned integer");
                        args.show_help = true;
                    }
                },
                "--frames" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(frames) => args.frames = Some(frames),
                    None => {
                        eprintln!("--frames requires an unsigned integer");
                        args.show_help = true;
                    }
                },
                "--config" => match iter.next() {
                    Some(path) => args.config = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config requires a path");
                        args.show_help = true;
                    }
                },
                "--dump" => args.dump = true,
                "--help" | "-h" => args.show_help = true,
                _ => {
                    eprintln!("Unknown argument: {arg}");
                    args.show_help = true;
                }
            }
        }

        args
    }

    fn print_help() {
        eprintln!(
            "Usage:\n  tunnel-shooter [--seed <n>] [--frames <n>] [--config <file.json>] [--dump]\n\n\
             Flags:\n\
             \x20 --seed <n>       Run seed (default: from the clock)\n\
             \x20 --frames <n>     Frames to simulate (default: two minutes)\n\
             \x20 --config <file>  Screen and sprite geometry as JSON\n\
             \x20 --dump           Print the last frame as JSON\n\
             \x20 -h, --help       Show this help\n"
        );
    }
}

/// Tally of what happened over the whole session
#[derive(Debug, Default)]
struct Summary {
    runs: u32,
    wins: u32,
    deaths: u32,
    best_score: u64,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), ConfigError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => {
            let config = GameConfig::default();
            config.validate()?;
            config
        }
    };

    let seed = args.seed.unwrap_or_else(clock_seed);
    let frames = args.frames.unwrap_or(u64::from(FPS) * 120);
    let dt = (1.0 / FPS as f32).min(MAX_FRAME_DT);
    log::info!("Tunnel Shooter starting: seed {seed}, {frames} frames");

    let mut state = GameState::new(config, seed);
    let mut summary = Summary {
        runs: 1,
        ..Default::default()
    };
    let mut last_phase = state.phase;

    for _ in 0..frames {
        let input = autopilot_input(&state);
        tick(&mut state, &input, dt);

        if state.phase != last_phase {
            match state.phase {
                RunPhase::Won => summary.wins += 1,
                RunPhase::GameOver => summary.deaths += 1,
                RunPhase::Transition { level: 1, .. } if last_phase.is_terminal() => {
                    summary.runs += 1
                }
                _ => {}
            }
        }
        summary.best_score = summary.best_score.max(state.score);
        last_phase = state.phase;
    }

    log::info!(
        "done: {} run(s), {} win(s), {} death(s), best score {}",
        summary.runs,
        summary.wins,
        summary.deaths,
        summary.best_score
    );

    if args.dump {
        match FrameView::capture(&state).to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("could not serialize frame: {e}"),
        }
    }

    Ok(())
}
