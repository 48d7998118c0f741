//! Condensate headless runner
//!
//! Loads a run config from JSON, spawns atoms and drives the simulation,
//! logging progress as molecules form.
//!
//! Usage: `condensate-runner [run.json]`
//!
//! Log verbosity follows `RUST_LOG` (default `info`; `debug` shows every merge).

mod config;

use condensate::prelude::*;
use config::{RunConfig, RunnerError};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn run(config: RunConfig) -> Result<(), RunnerError> {
    let mut group = ParticleGroup::new(config.simulation)?;
    group.spawn_random_atoms(config.atom_count);
    log::info!(
        "spawned {} atoms, running {} ticks",
        config.atom_count,
        config.ticks
    );

    let mut merges = 0;
    let mut bounces = 0;
    for tick in 1..=config.ticks {
        group.update();
        let stats = group.last_tick();
        merges += stats.merges;
        bounces += stats.bounces;

        if config.report_every > 0 && tick % config.report_every == 0 {
            log::info!(
                "tick {}: {} bodies, {} merges, {} bounces so far",
                tick,
                group.len(),
                merges,
                bounces
            );
        }
    }

    let molecules: Vec<BodyView> = group
        .bodies()
        .filter(|b| b.kind == BodyKind::Molecule)
        .collect();
    let largest = molecules.iter().map(|m| m.child_count).max().unwrap_or(0);
    log::info!(
        "done: {} bodies ({} molecules, {} loose atoms), largest molecule has {} atoms",
        group.len(),
        molecules.len(),
        group.len() - molecules.len(),
        largest
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = if args.len() > 1 {
        let path = PathBuf::from(&args[1]);
        match RunConfig::load(&path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("failed to load config from {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        log::info!("no config file specified, using defaults");
        RunConfig::default()
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
