//! Billboard projection for enemies.
//!
//! Sprites are not culled against the field of view and not depth-tested
//! against walls: anything off to the side simply projects off-screen, and
//! every sprite is painted after the wall pass.
use std::f32::consts::{PI, TAU};

use raylib::prelude::*;

use crate::core::player::Player;
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::{TextureKey, TextureManager};

/// Wraps an angle into `[-PI, PI]`.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    let mut a = a.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Left edge on screen.
    pub screen_x: f32,
    /// Top edge on screen.
    pub screen_y: f32,
    pub size: f32,
    pub distance: f32,
}

/// Apparent sprite size at `distance`: `screen_h / distance * scale`.
#[inline]
pub fn sprite_size(distance: f32, screen_h: f32, scale: f32) -> f32 {
    (screen_h / distance) * scale
}

/// Projects a world point onto the screen. `None` only when the sprite sits
/// exactly on the viewer.
pub fn project_sprite(
    viewer: &Player,
    world: Vector2,
    fov: f32,
    screen_w: f32,
    screen_h: f32,
    scale: f32,
) -> Option<SpriteProjection> {
    let dx = world.x - viewer.pos.x;
    let dy = world.y - viewer.pos.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= f32::EPSILON {
        return None;
    }
    let angle = normalize_angle(dy.atan2(dx) - viewer.a);
    let size = sprite_size(distance, screen_h, scale);
    Some(SpriteProjection {
        screen_x: (angle / fov + 0.5) * screen_w - size / 2.0,
        screen_y: screen_h / 2.0 - size / 2.0,
        size,
        distance,
    })
}

/// Scaled blit of the sprite texture; nearly transparent texels are skipped.
pub fn draw_sprite(fb: &mut Framebuffer, texman: &TextureManager, key: TextureKey, proj: &SpriteProjection) {
    let Some((tex_w, tex_h)) = texman.image_size(key) else {
        return;
    };
    if proj.size < 1.0 {
        return;
    }
    let start_x = proj.screen_x.max(0.0) as i32;
    let end_x = (proj.screen_x + proj.size).min(fb.width as f32) as i32;
    let start_y = proj.screen_y.max(0.0) as i32;
    let end_y = (proj.screen_y + proj.size).min(fb.height as f32) as i32;

    for sx in start_x..end_x {
        let u = (sx as f32 - proj.screen_x) / proj.size;
        let tx = ((u * tex_w as f32) as u32).min(tex_w - 1);
        for sy in start_y..end_y {
            let v = (sy as f32 - proj.screen_y) / proj.size;
            let ty = ((v * tex_h as f32) as u32).min(tex_h - 1);
            let color = texman.get_pixel_color(key, tx, ty);
            if color.a < 8 {
                continue;
            }
            fb.set_pixel(sx, sy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::textures::Pixmap;

    const FOV: f32 = std::f32::consts::FRAC_PI_3;

    fn viewer() -> Player {
        Player::new(100.0, 100.0, 0.0, 100, 0)
    }

    #[test]
    fn sprite_straight_ahead_is_centered() {
        let p = project_sprite(&viewer(), Vector2::new(164.0, 100.0), FOV, 640.0, 400.0, 32.0).unwrap();
        assert!((p.size - 200.0).abs() < 1e-3);
        assert!((p.screen_x + p.size / 2.0 - 320.0).abs() < 1e-3);
        assert!((p.screen_y + p.size / 2.0 - 200.0).abs() < 1e-3);
    }

    #[test]
    fn size_decreases_with_distance() {
        let mut prev = f32::INFINITY;
        for d in 1..500 {
            let s = sprite_size(d as f32, 400.0, 32.0);
            assert!(s < prev);
            prev = s;
        }
    }

    #[test]
    fn sprite_outside_fov_projects_off_screen() {
        let p = project_sprite(&viewer(), Vector2::new(100.0, 300.0), FOV, 640.0, 400.0, 32.0).unwrap();
        assert!(p.screen_x > 640.0);
    }

    #[test]
    fn heading_wraps_before_projection() {
        let mut v = viewer();
        v.a = 4.0 * PI;
        let p = project_sprite(&v, Vector2::new(164.0, 100.0), FOV, 640.0, 400.0, 32.0).unwrap();
        assert!((p.screen_x + p.size / 2.0 - 320.0).abs() < 1e-2);
    }

    #[test]
    fn coincident_sprite_is_skipped() {
        assert!(project_sprite(&viewer(), Vector2::new(100.0, 100.0), FOV, 640.0, 400.0, 32.0).is_none());
    }

    #[test]
    fn transparent_texels_are_not_drawn() {
        let tm = TextureManager::from_pixmaps([(TextureKey::Enemy, Pixmap::solid(4, 4, Color::new(0, 0, 0, 0)))]);
        let mut fb = Framebuffer::new(10, 10);
        fb.set_background_color(Color::BLUE);
        fb.clear();
        let proj = SpriteProjection { screen_x: 0.0, screen_y: 0.0, size: 10.0, distance: 1.0 };
        draw_sprite(&mut fb, &tm, TextureKey::Enemy, &proj);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLUE));
    }
}
