//! CPU texture store. Images are decoded once before the first frame and
//! sampled per pixel by the renderer.
use std::collections::HashMap;

use raylib::prelude::*;
use tracing::{error, info};

use crate::error::{GameError, GameResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Wall,
    Enemy,
}

/// Immutable pixel grid, sampled without touching the GPU.
#[derive(Clone, Debug)]
pub struct Pixmap {
    pub w: u32,
    pub h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    pub fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    /// Single-color pixmap, handy for tests and placeholders.
    pub fn solid(w: u32, h: u32, color: Color) -> Self {
        Self::new(w, h, vec![color; (w * h) as usize])
    }

    /// Coordinates wrap around the image.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }
}

pub struct TextureManager {
    maps: HashMap<TextureKey, Pixmap>,
}

impl TextureManager {
    /// Loads every listed image. The first failure aborts the whole load so
    /// callers see a single outcome.
    pub fn load(sources: &[(TextureKey, &str)]) -> GameResult<Self> {
        let mut maps = HashMap::new();
        for &(key, path) in sources {
            let img = Image::load_image(path).map_err(|e| {
                error!(?key, path, "Texture failed to load");
                GameError::AssetLoad {
                    path: path.to_string(),
                    reason: format!("{:?}", e),
                }
            })?;
            let w = img.width().max(0) as u32;
            let h = img.height().max(0) as u32;
            if w == 0 || h == 0 {
                return Err(GameError::AssetLoad {
                    path: path.to_string(),
                    reason: "image is empty".into(),
                });
            }
            let data = img.get_image_data().to_vec();
            info!(?key, path, w, h, "Texture loaded");
            maps.insert(key, Pixmap::new(w, h, data));
        }
        Ok(Self { maps })
    }

    pub fn from_pixmaps(maps: impl IntoIterator<Item = (TextureKey, Pixmap)>) -> Self {
        Self { maps: maps.into_iter().collect() }
    }

    pub fn get(&self, key: TextureKey) -> Option<&Pixmap> {
        self.maps.get(&key)
    }

    /// Samples a texel; unknown keys sample as white.
    pub fn get_pixel_color(&self, key: TextureKey, tx: u32, ty: u32) -> Color {
        self.maps.get(&key).map_or(Color::WHITE, |pm| pm.sample(tx, ty))
    }

    pub fn image_size(&self, key: TextureKey) -> Option<(u32, u32)> {
        self.maps.get(&key).map(|p| (p.w, p.h))
    }
}
