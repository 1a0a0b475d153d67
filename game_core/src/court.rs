use glam::Vec2;
use serde::Serialize;

use crate::{Aabb, Config};

/// The play area and its four boundary zones. Built once, never moved.
///
/// The walls overhang the court horizontally and the goals sit just outside
/// it, so the ball has fully left the screen before a point is scored.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Court {
    pub width: f32,
    pub height: f32,
    pub top: Aabb,
    pub bottom: Aabb,
    pub left_goal: Aabb,
    pub right_goal: Aabb,
    /// Zero-width line at mid court, drawn only
    pub divider: Aabb,
}

impl Court {
    pub fn new(config: &Config) -> Self {
        let (w, h, b) = (config.court_width, config.court_height, config.border_size);
        Self {
            width: w,
            height: h,
            top: Aabb::from_origin_size(Vec2::new(-2.0 * b, 0.0), Vec2::new(w + 4.0 * b, b)),
            bottom: Aabb::from_origin_size(Vec2::new(-2.0 * b, h - b), Vec2::new(w + 4.0 * b, b)),
            left_goal: Aabb::from_origin_size(Vec2::new(-3.0 * b, 0.0), Vec2::new(b, h)),
            right_goal: Aabb::from_origin_size(Vec2::new(w + 2.0 * b, 0.0), Vec2::new(b, h)),
            divider: Aabb::from_origin_size(Vec2::new(w / 2.0, 0.0), Vec2::new(0.0, h)),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Zones in draw order: left goal, right goal, top, bottom
    pub fn zones(&self) -> [Aabb; 4] {
        [self.left_goal, self.right_goal, self.top, self.bottom]
    }
}
