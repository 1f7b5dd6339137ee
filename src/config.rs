use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::GameResult;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Runtime settings. Every field has a default so the config file is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub tile_size: f32,
    pub fov_degrees: f32,
    /// Maximum ray travel, in tiles.
    pub max_depth: f32,
    pub ray_step: f32,
    pub wall_projection: f32,
    pub sprite_scale: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub start_ammo: u32,
    pub start_health: i32,
    /// Spawn point in tile units.
    pub player_start: (f32, f32),
    pub enemy_starts: Vec<(f32, f32)>,
    pub update_interval_ms: u64,
    pub wall_texture: String,
    pub enemy_texture: String,
    pub shot_sound: String,
    pub map_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 400,
            tile_size: 64.0,
            fov_degrees: 60.0,
            max_depth: 8.0,
            ray_step: 1.0,
            wall_projection: 277.0,
            sprite_scale: 32.0,
            move_speed: 5.0,
            rotate_speed: 0.1,
            start_ammo: 50,
            start_health: 100,
            player_start: (1.5, 1.5),
            enemy_starts: vec![(3.5, 3.5)],
            update_interval_ms: 1000,
            wall_texture: "assets/wall_texture.png".to_string(),
            enemy_texture: "assets/enemy_texture.png".to_string(),
            shot_sound: "assets/shot.wav".to_string(),
            map_path: None,
        }
    }
}

impl GameConfig {
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Loads `config/default.toml` (if present) and `RAYCASTER__*` overrides.
    pub fn load() -> GameResult<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> GameResult<Self> {
        info!("Loading configuration from {}", path);
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("RAYCASTER").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<GameConfig>());

        match settings {
            Ok(cfg) => {
                info!(?cfg, "Configuration loaded");
                Ok(cfg)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = GameConfig::load_from("does/not/exist.toml").unwrap();
        assert_eq!(cfg.screen_width, 640);
        assert_eq!(cfg.tile_size, 64.0);
        assert_eq!(cfg.enemy_starts.len(), 1);
    }

    #[test]
    fn fov_is_converted_to_radians() {
        let cfg = GameConfig::default();
        assert!((cfg.fov() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }
}
