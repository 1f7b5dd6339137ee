// main.rs
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use raylib::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use maze_raycaster::GameConfig;
use maze_raycaster::audio_manager::AudioManager;
use maze_raycaster::core::maze::Maze;
use maze_raycaster::core::process_events::process_events;
use maze_raycaster::core::state::GameState;
use maze_raycaster::remote::stub::WanderService;
use maze_raycaster::remote::updater::PositionUpdater;
use maze_raycaster::render::framebuffer::Framebuffer;
use maze_raycaster::render::render3d::Renderer;
use maze_raycaster::render::textures::{TextureKey, TextureManager};

/// Keeps the window open with the load error until the user closes it.
fn show_fatal(window: &mut RaylibHandle, thread: &RaylibThread, message: &str) {
    while !window.window_should_close() {
        let mut d = window.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        d.draw_text("Failed to load game resources. Please restart.", 20, 20, 20, Color::RED);
        d.draw_text(message, 20, 50, 10, Color::LIGHTGRAY);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cfg = GameConfig::load().context("loading configuration")?;
    let maze = match &cfg.map_path {
        Some(path) => Maze::load(path).with_context(|| format!("loading map {}", path))?,
        None => Maze::default_level(),
    };

    let (mut window, raylib_thread) = raylib::init()
        .size(cfg.screen_width as i32, cfg.screen_height as i32)
        .title("Maze Raycaster")
        .build();

    let texman = match TextureManager::load(&[
        (TextureKey::Wall, cfg.wall_texture.as_str()),
        (TextureKey::Enemy, cfg.enemy_texture.as_str()),
    ]) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load textures: {}", e);
            show_fatal(&mut window, &raylib_thread, &e.to_string());
            return Err(e.into());
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let mut state = GameState::new(maze, &cfg);
    let renderer = Renderer::new(&cfg);
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

    let mut framebuffer = Framebuffer::new(cfg.screen_width, cfg.screen_height);
    let blank = Image::gen_image_color(cfg.screen_width as i32, cfg.screen_height as i32, Color::BLACK);
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| anyhow!("creating screen texture: {:?}", e))?;

    info!("Entering frame loop");
    while !window.window_should_close() {
        for action in process_events(&window) {
            if state.apply(action) {
                if let Some(a) = &audio {
                    a.play_shot();
                }
            }
        }

        if let Some(resp) = updater.poll() {
            if let Err(e) = state.replace_enemies(resp.enemies) {
                warn!("Discarding position update: {}", e);
            }
        }
        updater.publish(state.position_request());

        renderer.render_frame(&mut framebuffer, &state, &texman);
        framebuffer.upload_to_texture(&mut screen);

        let fps_now = window.get_fps();
        let loading = updater.in_flight();
        let hud_y = cfg.screen_height as i32 - 30;
        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);
            d.draw_texture(&screen, 0, 0, Color::WHITE);

            d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
            d.draw_text(&format!("Health: {}%", state.player.health), 10, hud_y, 20, Color::WHITE);
            d.draw_text(&format!("Ammo: {}", state.player.ammo), 200, hud_y, 20, Color::WHITE);
            if loading {
                d.draw_text("Loading...", cfg.screen_width as i32 - 120, 10, 20, Color::YELLOW);
            }
        }

        // ~60 FPS (16 ms)
        thread::sleep(Duration::from_millis(16));
    }

    updater.shutdown();
    info!("Session ended");
    Ok(())
}
