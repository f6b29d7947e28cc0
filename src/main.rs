//! Orbital Pong entry point
//!
//! The native build runs a headless demo: the autopilot plays a session for
//! a fixed stretch of simulated time and the final frame is printed as JSON.
//!
//! Usage: `orbital-pong [settings.json] [--seconds N] [--seed N] [--quality low|medium|high] [--dump-settings]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Orbital Pong (native, headless) starting...");

    let options = native::Options::parse();
    let mut settings = native::load_settings(options.settings_path.as_deref());
    if let Some(quality) = options.quality {
        settings.quality = quality;
    }

    if options.dump_settings {
        match settings.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize settings: {e}"),
        }
        return;
    }

    native::run(options.seed, options.seconds, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `tick` themselves; nothing to do here
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use orbital_pong::{QualityPreset, Settings};
    use orbital_pong::consts::SIM_DT;
    use orbital_pong::render::FrameSnapshot;
    use orbital_pong::sim::{FixedTimestep, GameEvent, GameSession, TickInput, tick};

    use clap::Parser;

    /// Headless Orbital Pong: the autopilot plays and the final HUD is printed
    #[derive(Debug, Parser)]
    #[command(name = "orbital-pong")]
    #[command(about = "Run a headless Orbital Pong demo", long_about = None)]
    pub struct Options {
        /// Settings JSON file (defaults when absent)
        pub settings_path: Option<String>,

        /// Simulated seconds to play
        #[arg(long, default_value_t = 60.0, value_parser = parse_seconds)]
        pub seconds: f32,

        /// Session RNG seed
        #[arg(long, default_value_t = 0x0b17_a1)]
        pub seed: u64,

        /// Graphics quality preset: low, medium or high
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,

        /// Print the effective settings as JSON and exit
        #[arg(long)]
        pub dump_settings: bool,
    }

    fn parse_seconds(value: &str) -> Result<f32, String> {
        match value.parse::<f32>() {
            Ok(secs) if secs > 0.0 && secs.is_finite() => Ok(secs),
            _ => Err(format!("expected a positive number of seconds, got {value:?}")),
        }
    }

    fn parse_quality(value: &str) -> Result<QualityPreset, String> {
        QualityPreset::from_str(value).ok_or_else(|| format!("expected low, medium or high, got {value:?}"))
    }

    /// Settings from a JSON file, or defaults if there is none or it is bad
    pub fn load_settings(path: Option<&str>) -> Settings {
        let Some(path) = path else {
            return Settings::default();
        };

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {path}: {e}, using defaults");
                return Settings::default();
            }
        };

        match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {path}: {e}, using defaults");
                Settings::default()
            }
        }
    }

    pub fn run(seed: u64, seconds: f32, settings: Settings) {
        let mut session = GameSession::new(seed, settings);
        let mut clock = FixedTimestep::new();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        // Host frames at a slightly uneven rate, like a real display
        let frames = (seconds / SIM_DT).ceil() as u64;
        for frame in 0..frames {
            let frame_dt = if frame % 2 == 0 { SIM_DT * 0.9 } else { SIM_DT * 1.1 };
            for _ in 0..clock.advance(frame_dt) {
                tick(&mut session, &input);
                report(&session);
            }
            if session.is_game_over() {
                break;
            }
        }
        log::trace!("Leftover tick fraction {:.2}", clock.alpha());

        log::info!(
            "Finished after {} ticks: level {}, score {}, high score {}",
            session.time_ticks,
            session.level,
            session.score,
            session.high_score
        );

        match serde_json::to_string_pretty(&FrameSnapshot::capture(&session).hud) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final frame: {e}"),
        }
    }

    fn report(session: &GameSession) {
        for event in session.events() {
            match event {
                GameEvent::LevelUp { .. } | GameEvent::GameOver { .. } | GameEvent::LifeLost { .. } => {
                    log::info!("[tick {}] {:?}", session.time_ticks, event)
                }
                _ => log::trace!("[tick {}] {:?}", session.time_ticks, event),
            }
        }
    }

}
