use glam::Vec2;
use serde::Serialize;

use crate::Aabb;

/// Which end of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Player 1
    Left,
    /// Player 2
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing away from this side's goal
    pub fn serve_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2, // top-left corner
    pub size: Vec2,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, size: Vec2) -> Self {
        Self { side, pos, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, self.size)
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2, // centre
    pub size: Vec2,
    pub vel: Vec2, // units per millisecond
}

impl Ball {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    /// Place the ball `gap` units clear of `paddle`'s face, vertically
    /// centred at `center_y`, heading away from it at base speed.
    pub fn serve_from(&mut self, paddle: &Paddle, center_y: f32, gap: f32, speed: f32) {
        let half = self.size.x / 2.0;
        let x = match paddle.side {
            Side::Left => paddle.bounds().right() + gap + half,
            Side::Right => paddle.bounds().left() - gap - half,
        };
        self.pos = Vec2::new(x, center_y);
        self.vel = Vec2::new(paddle.side.serve_sign() * speed, speed);
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: i8, // -1 = up, 0 = stop, 1 = down
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pilot {
    #[default]
    Human,
    Bot,
}
