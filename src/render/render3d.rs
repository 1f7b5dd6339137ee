//! Column renderer: one ray per screen column, textured wall slices, then
//! enemy billboards on top.
use crate::config::GameConfig;
use crate::core::state::GameState;
use crate::render::casters::RayCaster;
use crate::render::framebuffer::Framebuffer;
use crate::render::sprites::{draw_sprite, project_sprite};
use crate::render::textures::{TextureKey, TextureManager};

pub struct Renderer {
    pub caster: RayCaster,
    pub fov: f32,
    pub sprite_scale: f32,
}

impl Renderer {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            caster: RayCaster::new(cfg.tile_size, cfg.ray_step, cfg.max_depth, cfg.wall_projection),
            fov: cfg.fov(),
            sprite_scale: cfg.sprite_scale,
        }
    }

    /// Ray offset for screen column `column` of `width`.
    #[inline]
    pub fn column_offset(&self, column: u32, width: u32) -> f32 {
        (column as f32 / width as f32 - 0.5) * self.fov
    }

    pub fn render_frame(&self, fb: &mut Framebuffer, state: &GameState, texman: &TextureManager) {
        fb.clear();
        self.render_walls(fb, state, texman);
        for enemy in &state.enemies {
            if let Some(proj) = project_sprite(
                &state.player,
                enemy.pos,
                self.fov,
                fb.width as f32,
                fb.height as f32,
                self.sprite_scale,
            ) {
                draw_sprite(fb, texman, TextureKey::Enemy, &proj);
            }
        }
    }

    fn render_walls(&self, fb: &mut Framebuffer, state: &GameState, texman: &TextureManager) {
        let Some(wall) = texman.get(TextureKey::Wall) else {
            return;
        };
        let h = fb.height as f32;
        for column in 0..fb.width {
            let offset = self.column_offset(column, fb.width);
            let Some(hit) = self.caster.cast_ray(&state.maze, state.player.pos, state.player.a, offset) else {
                continue;
            };
            let tex_x = self.caster.texture_offset(&hit, wall.w);
            let top = (h - hit.wall_height) / 2.0;
            let y0 = top.max(0.0) as i32;
            let y1 = (top + hit.wall_height).min(h).ceil() as i32;
            for y in y0..y1 {
                let v = (y as f32 - top) / hit.wall_height;
                let tex_y = ((v * wall.h as f32) as u32).min(wall.h - 1);
                fb.set_pixel(column as i32, y, wall.sample(tex_x, tex_y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::Maze;
    use crate::render::textures::Pixmap;
    use raylib::prelude::*;

    fn textures() -> TextureManager {
        TextureManager::from_pixmaps([
            (TextureKey::Wall, Pixmap::solid(64, 64, Color::RED)),
            (TextureKey::Enemy, Pixmap::solid(8, 8, Color::GREEN)),
        ])
    }

    fn setup() -> (Renderer, GameState) {
        let cfg = GameConfig::default();
        let mut state = GameState::new(Maze::default_level(), &cfg);
        state.enemies.clear();
        (Renderer::new(&cfg), state)
    }

    #[test]
    fn column_offsets_span_the_fov() {
        let (r, _) = setup();
        assert!((r.column_offset(0, 640) + r.fov / 2.0).abs() < 1e-6);
        assert!(r.column_offset(320, 640).abs() < 1e-6);
        assert!(r.column_offset(639, 640) < r.fov / 2.0);
    }

    #[test]
    fn wall_slice_is_vertically_centered() {
        let (r, state) = setup();
        let mut fb = Framebuffer::new(64, 100);
        r.render_frame(&mut fb, &state, &textures());
        let center = fb.width / 2;
        assert_eq!(fb.get_pixel(center, 50), Color::RED);
        // The east wall is 352 units away: a ~50 px slice leaves both ends clear.
        let hit = r
            .caster
            .cast_ray(&state.maze, state.player.pos, state.player.a, r.column_offset(center, 64))
            .unwrap();
        assert!(hit.wall_height < 98.0);
        assert_eq!(fb.get_pixel(center, 0), Color::BLACK);
        assert_eq!(fb.get_pixel(center, 99), Color::BLACK);
    }

    #[test]
    fn columns_without_a_hit_keep_the_background() {
        let cfg = GameConfig::default();
        let r = Renderer::new(&cfg);
        let maze = Maze::from_rows(&vec![[0u8; 24]; 24]).unwrap();
        let mut state = GameState::new(maze, &cfg);
        state.enemies.clear();
        // 512 units of reach from the middle of a 1536-unit open map.
        state.player.pos = Vector2::new(768.0, 768.0);
        for column in [0, 32, 63] {
            let offset = r.column_offset(column, 64);
            assert!(r.caster.cast_ray(&state.maze, state.player.pos, state.player.a, offset).is_none());
        }

        let mut fb = Framebuffer::new(64, 100);
        r.render_frame(&mut fb, &state, &textures());
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn enemies_draw_over_walls() {
        let (r, mut state) = setup();
        let p = state.player.pos;
        state.enemies.push(crate::core::enemy::Enemy::new(p.x + 40.0, p.y));
        let mut fb = Framebuffer::new(64, 100);
        r.render_frame(&mut fb, &state, &textures());
        assert_eq!(fb.get_pixel(32, 50), Color::GREEN);
    }
}
