use raylib::prelude::*;

pub struct Player {
    pub pos: Vector2,
    pub a: f32, // heading (radians)
    pub health: i32,
    pub ammo: u32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32, health: i32, ammo: u32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: angle,
            health,
            ammo,
        }
    }

    /// Unit vector along the current heading.
    #[inline]
    pub fn facing(&self) -> Vector2 {
        Vector2::new(self.a.cos(), self.a.sin())
    }

    /// Moves `distance` along the heading unless `blocked` rejects the destination.
    pub fn advance<F>(&mut self, distance: f32, blocked: F) -> bool
    where
        F: Fn(f32, f32) -> bool,
    {
        let nx = self.pos.x + self.a.cos() * distance;
        let ny = self.pos.y + self.a.sin() * distance;
        if blocked(nx, ny) {
            return false;
        }
        self.pos = Vector2::new(nx, ny);
        true
    }

    pub fn rotate(&mut self, delta: f32) {
        self.a += delta;
    }

    /// Spends one round. Returns false when the magazine is empty.
    pub fn try_fire(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }
}
