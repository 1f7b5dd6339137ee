//! Ray marching against the grid map.
//!
//! The ray advances by a constant step along its unit direction, not by
//! grid-boundary increments, so distance resolution is bounded by the step.
use raylib::prelude::*;

use crate::core::maze::Maze;

/// Tolerance for deciding that a hit lies on a cell's top edge.
pub const EDGE_EPSILON: f32 = 1e-5;

/// Smallest distance used for projection, avoids dividing by zero when the
/// origin already sits inside a wall.
const MIN_DISTANCE: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersect {
    /// Euclidean distance from the origin to the hit point.
    pub distance: f32,
    /// Projected on-screen wall height.
    pub wall_height: f32,
    pub map_x: i64,
    pub map_y: i64,
    pub hit: Vector2,
}

#[derive(Copy, Clone, Debug)]
pub struct RayCaster {
    pub tile_size: f32,
    pub step: f32,
    /// Maximum number of marching steps before giving up.
    pub max_steps: u32,
    pub projection: f32,
}

impl RayCaster {
    /// `max_depth` is in tiles.
    pub fn new(tile_size: f32, step: f32, max_depth: f32, projection: f32) -> Self {
        let step = step.max(f32::EPSILON);
        Self {
            tile_size,
            step,
            max_steps: (max_depth * tile_size / step).ceil() as u32,
            projection,
        }
    }

    /// Height of a wall slice at `distance`: `tile / distance * projection`.
    #[inline]
    pub fn projected_height(&self, distance: f32) -> f32 {
        (self.tile_size / distance.max(MIN_DISTANCE)) * self.projection
    }

    /// Marches from `origin` along `heading + offset`. `None` means the
    /// ray travelled the full depth without entering a wall.
    pub fn cast_ray(&self, maze: &Maze, origin: Vector2, heading: f32, offset: f32) -> Option<Intersect> {
        let a = heading + offset;
        let dx = a.cos() * self.step;
        let dy = a.sin() * self.step;
        let mut x = origin.x;
        let mut y = origin.y;

        for _ in 0..=self.max_steps {
            let i = (x / self.tile_size).floor() as i64;
            let j = (y / self.tile_size).floor() as i64;

            if maze.is_wall(i, j) {
                let distance = ((x - origin.x).powi(2) + (y - origin.y).powi(2)).sqrt();
                return Some(Intersect {
                    distance,
                    wall_height: self.projected_height(distance),
                    map_x: i,
                    map_y: j,
                    hit: Vector2::new(x, y),
                });
            }

            x += dx;
            y += dy;
        }
        None
    }

    /// Horizontal texel for a hit. A hit on the cell's top edge samples along
    /// X, anything else along Y.
    pub fn texture_offset(&self, hit: &Intersect, texture_width: u32) -> u32 {
        let wall_y = hit.map_y as f32 * self.tile_size;
        let along = if (wall_y - hit.hit.y).abs() < EDGE_EPSILON {
            hit.hit.x
        } else {
            hit.hit.y
        };
        let frac = (along / self.tile_size).rem_euclid(1.0);
        let tx = (frac * texture_width as f32).floor() as u32;
        tx.min(texture_width.saturating_sub(1))
    }
}
