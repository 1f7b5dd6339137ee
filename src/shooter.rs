//! Top-down shooter: ship, projectiles and enemy waves in a bounded arena.
//! All collisions are axis-aligned box overlaps.
use raylib::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::enemy::{Enemy, Point};
use crate::core::player::Player;
use crate::core::process_events::Action;
use crate::error::{GameError, GameResult};
use crate::remote::PositionRequest;

pub const PLAYER_HALF: f32 = 12.0;
pub const ENEMY_HALF: f32 = 14.0;
pub const PROJECTILE_HALF: f32 = 3.0;
pub const PROJECTILE_SPEED: f32 = 420.0;
pub const PROJECTILE_TTL: f32 = 2.0;
pub const FIRE_COOLDOWN: f32 = 0.2;
pub const MAX_PROJECTILES: usize = 16;
pub const CONTACT_DAMAGE: i32 = 10;
pub const WAVE_SIZE: usize = 4;
const SPAWN_CLEARANCE: f32 = 150.0;
const SPAWN_ATTEMPTS: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    pub fn around(center: Vector2, half: f32) -> Self {
        Self {
            min: Vector2::new(center.x - half, center.y - half),
            max: Vector2::new(center.x + half, center.y + half),
        }
    }

    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vector2,
    pub vel: Vector2,
    pub ttl: f32,
}

pub struct ShooterState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub arena: Vector2,
    pub score: u32,
    pub wave: u32,
    /// Bumped whenever the enemy set changes.
    pub generation: u64,
    cooldown: f32,
    move_speed: f32,
    rotate_speed: f32,
    start_ammo: u32,
}

impl ShooterState {
    pub fn new(cfg: &GameConfig) -> Self {
        let arena = Vector2::new(cfg.screen_width as f32, cfg.screen_height as f32);
        Self {
            player: Player::new(arena.x / 2.0, arena.y / 2.0, 0.0, cfg.start_health, cfg.start_ammo),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            arena,
            score: 0,
            wave: 0,
            generation: 0,
            cooldown: 0.0,
            move_speed: cfg.move_speed,
            rotate_speed: cfg.rotate_speed,
            start_ammo: cfg.start_ammo,
        }
    }

    pub fn is_over(&self) -> bool {
        self.player.health <= 0
    }

    /// Applies one input action. Returns true when a projectile was spawned.
    pub fn apply(&mut self, action: Action) -> bool {
        let arena = self.arena;
        let out_of_bounds = |x: f32, y: f32| {
            x < PLAYER_HALF || y < PLAYER_HALF || x > arena.x - PLAYER_HALF || y > arena.y - PLAYER_HALF
        };
        match action {
            Action::Forward => {
                self.player.advance(self.move_speed, out_of_bounds);
            }
            Action::Backward => {
                self.player.advance(-self.move_speed, out_of_bounds);
            }
            Action::TurnLeft => self.player.rotate(-self.rotate_speed),
            Action::TurnRight => self.player.rotate(self.rotate_speed),
            Action::Fire => return self.fire(),
        }
        false
    }

    /// Spawns a projectile when the cooldown has elapsed, the live cap is
    /// not reached and ammo remains.
    pub fn fire(&mut self) -> bool {
        if self.cooldown > 0.0 || self.projectiles.len() >= MAX_PROJECTILES {
            return false;
        }
        if !self.player.try_fire() {
            return false;
        }
        let dir = self.player.facing();
        self.projectiles.push(Projectile {
            pos: self.player.pos,
            vel: Vector2::new(dir.x * PROJECTILE_SPEED, dir.y * PROJECTILE_SPEED),
            ttl: PROJECTILE_TTL,
        });
        self.cooldown = FIRE_COOLDOWN;
        true
    }

    /// Advances projectiles, resolves collisions and starts a new wave once
    /// the arena is clear.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        for p in &mut self.projectiles {
            p.pos.x += p.vel.x * dt;
            p.pos.y += p.vel.y * dt;
            p.ttl -= dt;
        }
        let arena = self.arena;
        self.projectiles.retain(|p| {
            p.ttl > 0.0 && p.pos.x >= 0.0 && p.pos.y >= 0.0 && p.pos.x <= arena.x && p.pos.y <= arena.y
        });

        let mut i = 0;
        while i < self.projectiles.len() {
            let shot = Aabb::around(self.projectiles[i].pos, PROJECTILE_HALF);
            match self
                .enemies
                .iter()
                .position(|e| Aabb::around(e.pos, ENEMY_HALF).overlaps(&shot))
            {
                Some(hit) => {
                    self.enemies.remove(hit);
                    self.projectiles.remove(i);
                    self.score += 1;
                    self.generation += 1;
                }
                None => i += 1,
            }
        }

        let ship = Aabb::around(self.player.pos, PLAYER_HALF);
        let before = self.enemies.len();
        self.enemies.retain(|e| !Aabb::around(e.pos, ENEMY_HALF).overlaps(&ship));
        let rammed = before - self.enemies.len();
        if rammed > 0 {
            self.generation += 1;
            self.player.health -= CONTACT_DAMAGE * rammed as i32;
            debug!(rammed, health = self.player.health, "Player hit");
        }

        if self.enemies.is_empty() && !self.is_over() {
            self.spawn_wave(rng);
        }
    }

    pub fn spawn_wave<R: Rng>(&mut self, rng: &mut R) {
        self.wave += 1;
        self.generation += 1;
        self.player.ammo = self.start_ammo;
        while self.enemies.len() < WAVE_SIZE {
            let pos = self.spawn_point(rng);
            self.enemies.push(Enemy::new(pos.x, pos.y));
        }
        info!(wave = self.wave, "Wave spawned");
    }

    /// Random point at least `SPAWN_CLEARANCE` from the player. After
    /// `SPAWN_ATTEMPTS` misses the farthest candidate is used instead.
    fn spawn_point<R: Rng>(&self, rng: &mut R) -> Vector2 {
        let mut best = Vector2::new(
            clamp_to_arena(self.arena.x / 2.0, self.arena.x),
            clamp_to_arena(self.arena.y / 2.0, self.arena.y),
        );
        let mut best_dist = f32::MIN;
        for _ in 0..SPAWN_ATTEMPTS {
            let candidate = Vector2::new(sample_axis(rng, self.arena.x), sample_axis(rng, self.arena.y));
            let dx = candidate.x - self.player.pos.x;
            let dy = candidate.y - self.player.pos.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= SPAWN_CLEARANCE {
                return candidate;
            }
            if dist > best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        debug!(dist = best_dist, "No spawn point clears the player, using farthest");
        best
    }

    pub fn enemy_points(&self) -> Vec<Point> {
        self.enemies.iter().map(|e| e.pos.into()).collect()
    }

    pub fn position_request(&self) -> PositionRequest {
        PositionRequest {
            generation: self.generation,
            player: self.player.pos.into(),
            enemies: self.enemy_points(),
        }
    }

    /// Wholesale replacement from the position service. Positions are
    /// clamped to the arena. A response requested for an earlier enemy set
    /// is rejected even when the count happens to match.
    pub fn replace_enemies(&mut self, generation: u64, positions: Vec<Point>) -> GameResult<()> {
        if generation != self.generation {
            return Err(GameError::StaleResponse {
                current: self.generation,
                got: generation,
            });
        }
        if positions.len() != self.enemies.len() {
            return Err(GameError::EnemyCountMismatch {
                expected: self.enemies.len(),
                got: positions.len(),
            });
        }
        let arena = self.arena;
        self.enemies = positions
            .into_iter()
            .map(|p| Enemy::new(clamp_to_arena(p.x, arena.x), clamp_to_arena(p.y, arena.y)))
            .collect();
        Ok(())
    }
}

/// Keeps an enemy centre `ENEMY_HALF` inside `[0, extent]`, or centred when
/// the arena is too narrow for that.
fn clamp_to_arena(v: f32, extent: f32) -> f32 {
    if extent > 2.0 * ENEMY_HALF {
        v.clamp(ENEMY_HALF, extent - ENEMY_HALF)
    } else {
        extent / 2.0
    }
}

fn sample_axis<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 2.0 * ENEMY_HALF {
        rng.gen_range(ENEMY_HALF..extent - ENEMY_HALF)
    } else {
        extent / 2.0
    }
}
