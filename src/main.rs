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
use clap::{crate_version, Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use soundpacks::audio::{Decoder, SymphoniaDecoder};
use soundpacks::builtin::{register_built_in, DirectoryBuiltInSource};
use soundpacks::config::Settings;
use soundpacks::loader::PackLoader;
use soundpacks::registry::{PackCycler, PackRegistry};

/// The decoder thread count used by the commands that don't read a config file.
const DEFAULT_DECODE_THREADS: usize = 2;

/// The tick interval used by the commands that don't read a config file.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A sound pack loader."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Loads a single pack directory and reports what was found.
    Verify {
        /// The path to the pack directory.
        path: String,
    },
    /// Loads every pack in the given directory and lists them.
    List {
        /// The path to the custom packs directory.
        path: String,
    },
    /// Start registers the built-in packs and loads every custom pack.
    Start {
        /// The path to the settings file.
        config_path: String,
    },
    /// Cycle starts up like start, then steps through the registered packs.
    Cycle {
        /// The path to the settings file.
        config_path: String,
        /// The number of packs to step. Negative numbers step backwards.
        #[arg(allow_hyphen_values = true)]
        steps: i32,
    },
}

/// Ticks the loader into the registry until every load has finished.
fn run_loads<D: Decoder>(
    loader: &mut PackLoader<D>,
    registry: &mut PackRegistry,
    tick_interval: Duration,
) {
    while !loader.is_idle() {
        loader.tick_into(registry);
        thread::sleep(tick_interval);
    }
}

/// Builds the registry the way the host does at startup: built-in packs first, then
/// every custom pack.
fn start(settings: &Settings) -> Result<PackRegistry, Box<dyn Error>> {
    let mut registry = PackRegistry::new();
    registry.subscribe(|event| {
        info!(
            old = %event.old,
            new = %event.new,
            volume = event.new.volume_modifier(),
            "Rebinding audio to new pack"
        );
    });

    match settings.built_in_directory() {
        Some(directory) => {
            let source = DirectoryBuiltInSource::new(&directory, settings.built_in_packs());
            register_built_in(&mut registry, &source, settings.default_pack())?;
        }
        None => warn!("No built-in directory configured, skipping built-in packs"),
    }

    let packs_directory = settings.packs_directory();
    if !packs_directory.is_dir() {
        warn!(directory = ?packs_directory, "Custom packs directory not found");
        return Ok(registry);
    }

    let mut loader = PackLoader::new(SymphoniaDecoder::new(settings.decode_threads())?);
    loader.load_all(&packs_directory)?;
    run_loads(&mut loader, &mut registry, settings.tick_interval()?);

    info!(
        packs = registry.len(),
        custom = registry.custom_packs().count(),
        "All packs loaded"
    );
    Ok(registry)
}

fn print_registry(registry: &PackRegistry) {
    let current = registry.current();
    println!("Packs (count: {}):", registry.len());
    for pack in registry.packs() {
        let marker = if std::sync::Arc::ptr_eq(pack, &current) {
            "*"
        } else {
            "-"
        };
        println!(
            "{} {} (volume: {}, memory: {} KiB)",
            marker,
            pack,
            pack.volume_modifier(),
            pack.memory_size() / 1024
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify { path } => {
            let directory = PathBuf::from(&path);
            let mut loader = PackLoader::new(SymphoniaDecoder::new(DEFAULT_DECODE_THREADS)?);
            let handle = loader.load_pack(&directory)?;

            let mut outcomes = Vec::new();
            while !loader.is_idle() {
                outcomes.extend(loader.tick());
                thread::sleep(DEFAULT_TICK_INTERVAL);
            }

            for outcome in outcomes {
                if outcome.handle != handle {
                    continue;
                }
                let pack = outcome.result?;
                println!("{} (volume: {})", pack, pack.volume_modifier());
                for (pitch, sample) in pack.notes() {
                    println!(
                        "- {}: {} ({} channels, {} Hz, {:.3}s)",
                        pitch,
                        sample.name(),
                        sample.channel_count(),
                        sample.sample_rate(),
                        sample.duration().as_secs_f64()
                    );
                }
            }
        }
        Commands::List { path } => {
            let mut registry = PackRegistry::new();
            let mut loader = PackLoader::new(SymphoniaDecoder::new(DEFAULT_DECODE_THREADS)?);
            let handles = loader.load_all(Path::new(&path))?;

            if handles.is_empty() {
                println!("No packs found in {}.", path);
                return Ok(());
            }

            run_loads(&mut loader, &mut registry, DEFAULT_TICK_INTERVAL);
            print_registry(&registry);
        }
        Commands::Start { config_path } => {
            let settings = Settings::deserialize(Path::new(&config_path))?;
            let registry = start(&settings)?;
            print_registry(&registry);
        }
        Commands::Cycle { config_path, steps } => {
            let settings = Settings::deserialize(Path::new(&config_path))?;
            let mut registry = start(&settings)?;
            let mut cycler = PackCycler::synced(&registry);

            for _ in 0..steps.unsigned_abs() {
                let pack = if steps > 0 {
                    cycler.forward(&mut registry)
                } else {
                    cycler.backward(&mut registry)
                };
                match pack {
                    Some(pack) => println!("{}: {}", cycler.position(), pack),
                    None => {
                        println!("No packs registered.");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
