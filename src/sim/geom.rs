//! Axis-aligned box geometry
//!
//! Screen space: x grows to the right, y grows downward. A box is stored as
//! its top-left corner plus its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True if the two boxes share interior area (touching edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open point test: left/top edges inside, right/bottom edges outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&rect(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contains_point_half_open() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_point(Vec2::ZERO));
        assert!(a.contains_point(Vec2::new(9.9, 9.9)));
        assert!(!a.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!a.contains_point(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_from_center() {
        let a = Rect::from_center(Vec2::new(110.0, 360.0), Vec2::new(52.0, 35.0));
        assert_eq!(a.center(), Vec2::new(110.0, 360.0));
        assert_eq!(a.top(), 342.5);
        assert_eq!(a.bottom(), 377.5);
    }
}
