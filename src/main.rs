//! Star Shooter headless runner
//!
//! Drives the simulation with the built-in autopilot at a fixed frame delta
//! and reports how the run went.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;

use star_shooter::SimConfig;
use star_shooter::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Parser)]
#[command(version, about = "Run the star-shooter simulation headless with the demo pilot")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON config; missing fields use defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    seconds: f32,
    final_phase: String,
    stage: u32,
    score: u64,
    best_score: u64,
    lives: u32,
    continues_used: u32,
    bosses_defeated: u32,
    mid_bosses_defeated: u32,
    bombs_used: u32,
    extends: u32,
}

fn load_config(path: Option<&Path>) -> SimConfig {
    let Some(path) = path else {
        return SimConfig::default();
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| SimConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("config {} rejected ({}), using defaults", path.display(), e);
            SimConfig::default()
        }
    }
}

fn run(cli: &Cli, config: SimConfig) -> RunSummary {
    let mut state = GameState::new(config, cli.seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let dt = cli.dt.max(1e-4);
    let frames = (cli.seconds.max(0.0) / dt).ceil() as u64;

    let mut summary = RunSummary {
        seed: cli.seed,
        ..Default::default()
    };

    for _ in 0..frames {
        tick(&mut state, &input, dt);
        summary.frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::BossDefeated { mid_boss: true } => summary.mid_bosses_defeated += 1,
                GameEvent::BossDefeated { mid_boss: false } => summary.bosses_defeated += 1,
                GameEvent::BombDetonated => summary.bombs_used += 1,
                GameEvent::ExtraLife { .. } => summary.extends += 1,
                _ => {}
            }
        }
        summary.best_score = summary.best_score.max(state.run.score);

        match state.run.phase {
            GamePhase::StageClear => {
                state.advance_stage();
            }
            GamePhase::GameOver => {
                if state.continue_run() {
                    summary.continues_used += 1;
                } else {
                    break;
                }
            }
            GamePhase::Victory => break,
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    summary.seconds = summary.frames as f32 * dt;
    summary.final_phase = format!("{:?}", state.run.phase);
    summary.stage = state.run.stage;
    summary.score = state.run.score;
    summary.lives = state.run.lives;
    summary
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    log::info!("Star Shooter (headless) starting, seed {}", cli.seed);

    let summary = run(&cli, config);
    log::info!(
        "run ended: {} at stage {} after {:.1}s",
        summary.final_phase,
        summary.stage,
        summary.seconds
    );

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("seed          {}", summary.seed);
        println!("result        {} (stage {})", summary.final_phase, summary.stage);
        println!("time          {:.1}s over {} frames", summary.seconds, summary.frames);
        println!("score         {} (best {})", summary.score, summary.best_score);
        println!("lives         {}", summary.lives);
        println!("continues     {}", summary.continues_used);
        println!(
            "bosses        {} stage, {} mid",
            summary.bosses_defeated, summary.mid_bosses_defeated
        );
        println!("bombs         {}", summary.bombs_used);
        println!("extends       {}", summary.extends);
    }
}
