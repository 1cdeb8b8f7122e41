//! Ghost Racer headless runner
//!
//! Drives the simulation with a simple autopilot and reports how far it got.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use ghost_racer::consts::ROAD_CENTER;
use ghost_racer::sim::{Racer, SeededRng};
use ghost_racer::tuning::TUNING_FILE;
use ghost_racer::{HeadlessHost, Host, Key, TickStatus, Tuning, TuningError, World, tick};

/// Run Ghost Racer without a window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the run
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Ticks to simulate before stopping
    #[arg(short, long, default_value_t = 3000)]
    ticks: u64,

    /// Starting level
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Starting lives
    #[arg(long, default_value_t = 3)]
    lives: u32,

    /// Asset directory (tuning.json is read from here)
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// A present but broken tuning file is fatal here
fn load_tuning(assets: &Path) -> Result<Tuning, TuningError> {
    let path = assets.join(TUNING_FILE);
    if path.exists() {
        Tuning::load(&path)
    } else {
        log::info!("No tuning at {}, using defaults", path.display());
        Ok(Tuning::default())
    }
}

/// Keeps near the middle of the road and sprays every so often
struct Autopilot {
    fire_every: u64,
    cruise_speed: f64,
}

impl Autopilot {
    fn key(&self, tick: u64, racer: &Racer) -> Option<Key> {
        if racer.sprays > 0 && tick % self.fire_every == 0 {
            return Some(Key::Fire);
        }

        let x = racer.body.pos.x;
        let target = if x < ROAD_CENTER - 16.0 {
            82
        } else if x > ROAD_CENTER + 16.0 {
            98
        } else {
            90
        };

        let heading = racer.body.heading;
        if heading < target {
            Some(Key::Left)
        } else if heading > target {
            Some(Key::Right)
        } else if racer.body.vel.y < self.cruise_speed {
            Some(Key::Up)
        } else {
            None
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match load_tuning(&args.assets) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let mut world = World::new(&args.assets, tuning);
    let mut host = HeadlessHost::new(SeededRng::new(args.seed))
        .with_level(args.level)
        .with_lives(args.lives);
    let autopilot = Autopilot {
        fire_every: 40,
        cruise_speed: 2.0,
    };

    log::info!(
        "Ghost Racer starting: seed {}, level {}, {} lives",
        args.seed,
        args.level,
        args.lives
    );

    let mut ticks_run = 0;
    let mut sounds: BTreeMap<&'static str, usize> = BTreeMap::new();
    for t in 0..args.ticks {
        // keys aren't polled while the racer is bumping an edge
        if host.pending_keys() == 0 {
            if let Some(key) = autopilot.key(t, world.racer()) {
                host.push_key(key);
            }
        }

        host.begin_frame();
        let status = tick(&mut world, &mut host);
        ticks_run = t + 1;
        for sound in host.sounds() {
            *sounds.entry(sound.as_str()).or_default() += 1;
        }
        host.clear_sounds();

        match status {
            TickStatus::Continue => {
                world.render(&mut host);
                if t % 500 == 0 {
                    log::debug!("{}", host.status_text());
                }
            }
            TickStatus::PlayerDied => {
                if host.lives() == 0 {
                    log::info!("Game over");
                    break;
                }
                world.init();
            }
            TickStatus::LevelFinished => {
                host.advance_level();
                log::info!("Advancing to level {}", host.level());
                world.init();
            }
        }
    }

    log::info!(
        "Ran {} ticks with seed {}: level {}, score {}, lives {}",
        ticks_run,
        host.rng_mut().seed(),
        host.level(),
        host.score(),
        host.lives()
    );
    for (name, count) in &sounds {
        log::debug!("  {name}: {count}");
    }
}
