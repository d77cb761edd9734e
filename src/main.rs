//! Chicken Climb entry point
//!
//! Native builds run headless autopilot sessions: load tuning, play a few
//! runs at a fixed 60 Hz step, and settle the results into a profile file.
//! The web build has no runner of its own; the page embeds the library.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use chicken_climb::audio::{CueDispatcher, LogSink};
    use chicken_climb::consts::FRAME_DT;
    use chicken_climb::persistence::{
        JsonFileStore, MemoryStore, ProfileRepository, ProfileStore, PurchaseOutcome,
    };
    use chicken_climb::settings::{VolumeKind, parse_volume};
    use chicken_climb::sim::{GameStatus, steer};
    use chicken_climb::{PlayerSkin, Session, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "chicken-climb")]
    #[command(about = "Headless autopilot runs of the Chicken Climb simulation")]
    struct Cli {
        /// JSON tuning file (missing fields use defaults)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Profile file to load and settle results into (in-memory if omitted)
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Buy (if needed) and wear a skin: classic, blue, red, knight
        #[arg(long, value_parser = parse_skin)]
        skin: Option<PlayerSkin>,
        /// Volume override, e.g. `--volume music=40 --volume sfx=0`
        #[arg(long, value_parser = parse_volume_arg)]
        volume: Vec<(VolumeKind, i32)>,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        runs: u32,
        /// Frame cap per run
        #[arg(long, default_value_t = 36_000)]
        max_frames: u32,
        #[arg(long, default_value_t = 360.0)]
        width: f32,
        #[arg(long, default_value_t = 640.0)]
        height: f32,
    }

    fn parse_skin(s: &str) -> Result<PlayerSkin, String> {
        PlayerSkin::from_str(s).ok_or_else(|| {
            let names: Vec<&str> = PlayerSkin::ALL.iter().map(|skin| skin.as_str()).collect();
            format!("unknown skin '{}' (expected one of {})", s, names.join(", "))
        })
    }

    fn parse_volume_arg(s: &str) -> Result<(VolumeKind, i32), String> {
        parse_volume(s)
            .ok_or_else(|| format!("expected music=<0-100> or effects=<0-100>, got '{s}'"))
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Tuning::from_json(&json)
            .with_context(|| format!("loading tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let tuning = load_tuning(cli.tuning.as_ref())?;

        let store: Box<dyn ProfileStore> = match &cli.profile {
            Some(path) => {
                let store = JsonFileStore::new(path);
                log::info!("Using profile {}", store.path().display());
                Box::new(store)
            }
            None => Box::new(MemoryStore::new()),
        };
        let repo = ProfileRepository::open(store);
        let mut session = Session::with_profile(tuning, cli.seed, repo);

        let Some(repo) = session.profile() else {
            anyhow::bail!("session has no profile");
        };
        let mut cues = CueDispatcher::new(LogSink, repo.profile().audio);
        if let Some(repo) = session.profile_mut() {
            for (kind, percent) in &cli.volume {
                repo.set_volume(*kind, *percent);
                let level = repo.profile().audio.volume(*kind);
                log::info!("{} volume set to {}", kind.as_str(), level);
            }
            cues.set_settings(repo.profile().audio);
        }

        if let Some(skin) = cli.skin {
            match session.buy_skin(skin) {
                Some(PurchaseOutcome::InsufficientFunds) => println!(
                    "cannot afford {} ({} eggs), keeping {}",
                    skin.as_str(),
                    skin.price(),
                    session.skin().as_str()
                ),
                Some(_) => println!("wearing {}", skin.title()),
                None => session.apply_skin(skin),
            }
        }

        for run in 1..=cli.runs {
            if !session.start_game(cli.width, cli.height) {
                anyhow::bail!("invalid world size {}x{}", cli.width, cli.height);
            }

            let mut frames = 0;
            while session.status() == GameStatus::Playing && frames < cli.max_frames {
                let tilt = steer(session.world(), session.tuning());
                session.update_tilt(tilt);
                session.update_frame(FRAME_DT);
                let events = session.drain_events();
                cues.dispatch(&events);
                frames += 1;
            }

            let world = session.world();
            println!(
                "run {}: score {} | eggs {} | {} frames | {:?}",
                run, world.score, world.currency_earned, frames, world.status
            );
        }

        println!("best score {} as {}", session.best_score(), session.skin().as_str());
        if let Some(repo) = session.profile_mut() {
            repo.flush().context("saving profile")?;
            println!("balance {}", repo.profile().currency);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Chicken Climb (native) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Nothing to run; the page owns the loop
}
