//! Fish Catch entry point
//!
//! The game itself runs in the browser. Natively this binary plays a
//! headless demo session with the autopilot and logs how it went.
//!
//! Usage: `fish-catch [settings.json] [max_frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fish Catch (native) starting headless demo...");

    if let Err(err) = headless::run(std::env::args().skip(1).collect()) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use fish_catch::sim::{Autopilot, Hud, Simulation};
    use fish_catch::{Settings, SimError};

    /// One frame at 60 Hz in the game's time unit
    const FRAME_DT: f32 = 1.0;
    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

    pub fn run(args: Vec<String>) -> Result<(), SimError> {
        let settings = match args.first() {
            Some(path) => Settings::load(Path::new(path))?,
            None => Settings::default(),
        };
        let max_frames = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_FRAMES);

        let mut sim = Simulation::new(settings)?;
        let pilot = Autopilot::new();
        let mut last_hud: Hud = sim.hud();
        log::info!("{} | {}", last_hud.score_text(), last_hud.missed_text());

        while sim.ticks() < max_frames && !sim.is_over() {
            let keys = pilot.steer(&sim);
            sim.tick(FRAME_DT, &keys)?;
            // The render layer would consume these; the demo just discards them
            sim.drain_render_changes();

            let hud = sim.hud();
            if hud != last_hud {
                log::info!("{} | {}", hud.score_text(), hud.missed_text());
                last_hud = hud;
            }
        }

        let hud = sim.hud();
        match &hud.message {
            Some(message) => log::info!("{} (after {} frames)", message, sim.ticks()),
            None => log::info!("Frame cap reached after {} frames", sim.ticks()),
        }
        println!(
            "{}  {}  difficulty increases: {}",
            hud.score_text(),
            hud.missed_text(),
            sim.fishery().difficulty().increases_applied
        );
        Ok(())
    }
}
