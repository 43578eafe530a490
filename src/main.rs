//! Road Crossing entry point
//!
//! Runs a scripted headless session: the binary plays the host, driving the
//! spawner clock, per-frame ticks, key events and rendering.
//!
//! Usage: `road-crossing [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;
    use std::process::ExitCode;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use road_crossing::assets::AssetId;
    use road_crossing::input::Key;
    use road_crossing::render::{Playground, Sprite};
    use road_crossing::sim::Rect;
    use road_crossing::{Game, GameEvent, Settings};

    /// 60 frames per second
    const FRAME_TIME: Duration = Duration::from_micros(16_667);
    const SESSION_FRAMES: u32 = 60 * 30;

    /// Key script: (frame, raw key name, pressed)
    const SCRIPT: &[(u32, &str, bool)] = &[
        (90, "ArrowUp", true),
        (150, "ArrowLeft", true),
        (180, "ArrowRight", true),
        (200, "ArrowLeft", false),
        (240, "ArrowRight", false),
        (400, "ArrowUp", false),
        (420, "ArrowDown", true),
        (600, "ArrowDown", false),
        (700, "space", true),
    ];

    /// Resolves every preloaded image and counts draw calls
    #[derive(Default)]
    struct CountingPlayground {
        loaded: HashSet<AssetId>,
        frames: u32,
        draws: u64,
    }

    impl Playground for CountingPlayground {
        type Image = AssetId;

        fn load_image(&mut self, asset: AssetId) {
            log::debug!("Loading image {}", asset);
            self.loaded.insert(asset);
        }

        fn image(&self, sprite: &Sprite) -> Option<AssetId> {
            let asset = sprite.asset();
            self.loaded.contains(&asset).then_some(asset)
        }

        fn clear(&mut self, _color: &str) {
            self.frames += 1;
        }

        fn draw_image(&mut self, _image: &AssetId, _dest: Rect) {
            self.draws += 1;
        }
    }

    pub fn run() -> ExitCode {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) => match Settings::load(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            },
            None => Settings::default(),
        };

        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            });

        let mut game = match Game::new(&settings, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return ExitCode::FAILURE;
            }
        };
        log::info!("Road Crossing (headless) starting with seed {}", seed);

        match settings.to_json() {
            Ok(json) => log::debug!("Effective settings: {}", json),
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }

        let mut playground = CountingPlayground::default();
        game.preload(&mut playground);
        game.on_ready();

        let mut spawned = 0u32;
        let mut despawned = 0u32;
        let mut collisions = 0u32;
        let mut skipped_draws = 0usize;

        for frame in 0..SESSION_FRAMES {
            for &(_, name, pressed) in SCRIPT.iter().filter(|(f, _, _)| *f == frame) {
                match Key::from_str(name) {
                    Some(key) if pressed => game.key_down(key),
                    Some(key) => game.key_up(key),
                    None => log::debug!("Ignoring unmapped key '{}'", name),
                }
            }

            let mut events = game.advance_clock(FRAME_TIME);
            events.extend(game.step());
            for event in events {
                match event {
                    GameEvent::CarSpawned { .. } => spawned += 1,
                    GameEvent::CarDespawned { .. } => despawned += 1,
                    GameEvent::Collision { car_id, kind } => {
                        collisions += 1;
                        log::info!(
                            "Frame {}: hit by car {} ({})",
                            frame,
                            car_id,
                            kind.slug()
                        );
                    }
                }
            }

            skipped_draws += game.render(&mut playground);
        }

        game.stop();
        let player = &game.state().player;
        log::info!(
            "Session over: {} ticks, {} cars spawned, {} left the road, {} live, {} collision ticks",
            game.state().time_ticks,
            spawned,
            despawned,
            game.state().cars.len(),
            collisions
        );
        log::info!(
            "Player ended at ({:.1}, {:.1}); {} frames, {} draws, {} skipped",
            player.pos.x,
            player.pos.y,
            playground.frames,
            playground.draws,
            skipped_draws
        );

        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly
}
