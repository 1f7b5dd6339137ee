//! Enemy positions and their wire representation.
use raylib::prelude::*;
use serde::{Deserialize, Serialize};

/// Position record exchanged with the position service.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// An enemy is a position only; the position service owns its movement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vector2,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vector2::new(x, y) }
    }
}

impl From<Point> for Enemy {
    fn from(p: Point) -> Self {
        Self { pos: p.into() }
    }
}
