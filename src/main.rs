//! Dual entry point
//!
//! The browser build is driven through the `wasm` module's bindings. Natively
//! this runs a headless attract-mode session and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;
    use dual::autopilot::autopilot_input;
    use dual::consts::FRAME_MS;
    use dual::persistence::{JsonFileStore, STORAGE_KEY};
    use dual::sim::GameEvent;
    use dual::{Session, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "dual")]
    #[command(about = "Headless Dual session steered by the autopilot")]
    pub struct Cli {
        /// Session seed
        #[arg(long, default_value_t = 0xD0A1)]
        seed: u64,
        /// Frames to simulate at 60 Hz
        #[arg(long, default_value_t = 18_000)]
        frames: u64,
        /// Tuning JSON; missing fields take their defaults
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Best score / best level file
        #[arg(long, default_value_os_t = PathBuf::from(format!("{STORAGE_KEY}.json")))]
        bests: PathBuf,
    }

    fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("invalid tuning {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = load_tuning(cli.tuning.as_deref())?;

        log::info!("Dual (headless) starting: seed {:#x}, {} frames", cli.seed, cli.frames);
        let mut session = Session::new(
            cli.seed,
            tuning,
            Settings::default(),
            JsonFileStore::new(&cli.bests),
        );

        let mut deaths = 0u32;
        let mut best_run = 0u64;
        for _ in 0..cli.frames {
            let input = autopilot_input(session.state());
            for event in session.step_with(&input, FRAME_MS) {
                match event {
                    GameEvent::Death { score, lane } => {
                        deaths += 1;
                        best_run = best_run.max(score);
                        let run = session.state().run;
                        log::info!("Run {run} ended on {lane:?} wall with {score}");
                    }
                    GameEvent::LevelUp { level, theme } => {
                        log::info!("Level {} ({theme})", level + 1)
                    }
                    _ => {}
                }
            }
        }

        let snap = session.snapshot();
        best_run = best_run.max(snap.score);
        println!(
            "frames={} runs={} deaths={} best_run={} best_ever={} best_level={}",
            cli.frames,
            snap.run + 1,
            deaths,
            best_run,
            session.bests().score.max(snap.hi_score),
            session.bests().level
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the library's `wasm` module
}
