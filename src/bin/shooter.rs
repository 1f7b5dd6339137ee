use std::thread;
use std::time::Duration;

use anyhow::Context;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use maze_raycaster::GameConfig;
use maze_raycaster::audio_manager::AudioManager;
use maze_raycaster::core::process_events::process_events;
use maze_raycaster::remote::stub::WanderService;
use maze_raycaster::remote::updater::PositionUpdater;
use maze_raycaster::shooter::{ENEMY_HALF, PLAYER_HALF, PROJECTILE_HALF, ShooterState};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cfg = GameConfig::load().context("loading configuration")?;
    let (mut window, raylib_thread) = raylib::init()
        .size(cfg.screen_width as i32, cfg.screen_height as i32)
        .title("Top-down Shooter")
        .build();

    let mut rng = rand::thread_rng();
    let mut state = ShooterState::new(&cfg);
    state.spawn_wave(&mut rng);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let mut updater = PositionUpdater::spawn(
        runtime.handle(),
        WanderService::default(),
        Duration::from_millis(cfg.update_interval_ms),
        state.position_request(),
    );
    let audio = AudioManager::new().map(|mut a| {
        a.load_shot(&cfg.shot_sound);
        a
    });

    info!("Entering frame loop");
    while !window.window_should_close() {
        let dt = window.get_frame_time();

        if !state.is_over() {
            for action in process_events(&window) {
                if state.apply(action) {
                    if let Some(a) = &audio {
                        a.play_shot();
                    }
                }
            }
            if let Some(resp) = updater.poll() {
                if let Err(e) = state.replace_enemies(resp.generation, resp.enemies) {
                    // The enemy set changed while the request was in flight.
                    warn!("Discarding position update: {}", e);
                }
            }
            state.update(dt, &mut rng);
            updater.publish(state.position_request());
        }

        let loading = updater.in_flight();
        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::new(16, 16, 24, 255));

            for e in &state.enemies {
                let s = (ENEMY_HALF * 2.0) as i32;
                d.draw_rectangle((e.pos.x - ENEMY_HALF) as i32, (e.pos.y - ENEMY_HALF) as i32, s, s, Color::RED);
            }
            for p in &state.projectiles {
                d.draw_circle(p.pos.x as i32, p.pos.y as i32, PROJECTILE_HALF, Color::YELLOW);
            }
            let ship = state.player.pos;
            let nose = state.player.facing();
            d.draw_circle(ship.x as i32, ship.y as i32, PLAYER_HALF, Color::SKYBLUE);
            d.draw_line(
                ship.x as i32,
                ship.y as i32,
                (ship.x + nose.x * PLAYER_HALF * 1.6) as i32,
                (ship.y + nose.y * PLAYER_HALF * 1.6) as i32,
                Color::WHITE,
            );

            let hud_y = cfg.screen_height as i32 - 30;
            d.draw_text(&format!("Health: {}%", state.player.health.max(0)), 10, hud_y, 20, Color::WHITE);
            d.draw_text(&format!("Ammo: {}", state.player.ammo), 180, hud_y, 20, Color::WHITE);
            d.draw_text(&format!("Score: {}  Wave: {}", state.score, state.wave), 330, hud_y, 20, Color::WHITE);
            if loading {
                d.draw_text("Loading...", cfg.screen_width as i32 - 120, 10, 20, Color::YELLOW);
            }
            if state.is_over() {
                d.draw_text("GAME OVER", cfg.screen_width as i32 / 2 - 90, cfg.screen_height as i32 / 2 - 20, 40, Color::RED);
            }
        }

        thread::sleep(Duration::from_millis(16));
    }

    updater.shutdown();
    info!(score = state.score, "Session ended");
    Ok(())
}
