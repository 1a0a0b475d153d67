use glam::Vec2;
use serde::Serialize;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with its top-left corner at `origin`
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }
}

/// Overlap test; boxes that only share an edge count as overlapping.
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Restrict `x` to `[lo, hi]`. When `lo > hi` the upper bound wins.
///
/// Unlike `f32::clamp` this never panics on an inverted range.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let right = rect(10.0, 0.0, 5.0, 5.0);
        let below = rect(0.0, 10.0, 5.0, 5.0);
        assert!(intersects(&a, &right));
        assert!(intersects(&a, &below));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &rect(10.5, 0.0, 5.0, 5.0)));
        assert!(!intersects(&a, &rect(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 2.0, 2.0);
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn test_zero_width_box_intersects_when_crossing() {
        let divider = rect(320.0, 0.0, 0.0, 480.0);
        assert!(divider.intersects(&rect(310.0, 100.0, 16.0, 16.0)));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_clamp_inverted_range_returns_upper_bound() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_box_accessors() {
        let a = Aabb::from_center_size(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(a.left(), 8.0);
        assert_eq!(a.right(), 12.0);
        assert_eq!(a.top(), 17.0);
        assert_eq!(a.bottom(), 23.0);
        assert_eq!(a.center(), Vec2::new(10.0, 20.0));
        assert_eq!(a.size(), Vec2::new(4.0, 6.0));
    }
}
