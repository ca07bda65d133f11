//! Physical bodies placed in the play field
//!
//! Everything is an axis-aligned rectangle except the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sdf::{sd_box, sd_circle};
use crate::maze::Rect;

/// What a body is, used to interpret collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    /// Interior maze wall (falls when the maze is solved)
    Wall,
    /// Outer border of the play field
    Boundary,
    Goal,
    Ball,
}

/// Collision shape, relative to the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { half: Vec2 },
    Circle { radius: f32 },
}

/// A body in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub label: BodyLabel,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Static bodies never move and are not affected by gravity
    pub is_static: bool,
}

impl Body {
    /// Static rectangle
    pub fn rect(id: u32, label: BodyLabel, rect: Rect) -> Self {
        Self {
            id,
            label,
            shape: Shape::Rect {
                half: rect.half_extents(),
            },
            pos: rect.center,
            vel: Vec2::ZERO,
            is_static: true,
        }
    }

    /// Dynamic circle
    pub fn circle(id: u32, label: BodyLabel, center: Vec2, radius: f32) -> Self {
        Self {
            id,
            label,
            shape: Shape::Circle { radius },
            pos: center,
            vel: Vec2::ZERO,
            is_static: false,
        }
    }

    /// Signed distance from `p` to this body's surface
    pub fn sdf(&self, p: Vec2) -> f32 {
        match self.shape {
            Shape::Rect { half } => sd_box(p, self.pos, half),
            Shape::Circle { radius } => sd_circle(p, self.pos, radius),
        }
    }

    /// Current bounds as a rectangle
    pub fn bounds(&self) -> Rect {
        let half = match self.shape {
            Shape::Rect { half } => half,
            Shape::Circle { radius } => Vec2::splat(radius),
        };
        Rect {
            center: self.pos,
            size: half * 2.0,
        }
    }

    /// Radius of a circle body, `None` for rectangles
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
        if is_static {
            self.vel = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_body_from_layout_rect() {
        let body = Body::rect(3, BodyLabel::Wall, Rect::new(50.0, 20.0, 100.0, 10.0));
        assert!(body.is_static);
        assert_eq!(body.pos, Vec2::new(50.0, 20.0));
        assert_eq!(body.bounds(), Rect::new(50.0, 20.0, 100.0, 10.0));
        assert!(body.radius().is_none());
        assert!(body.sdf(Vec2::new(50.0, 20.0)) < 0.0);
        assert!((body.sdf(Vec2::new(50.0, 35.0)) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_body() {
        let body = Body::circle(1, BodyLabel::Ball, Vec2::new(5.0, 5.0), 2.0);
        assert!(!body.is_static);
        assert_eq!(body.radius(), Some(2.0));
        assert_eq!(body.bounds().min(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_set_static_stops_motion() {
        let mut body = Body::rect(0, BodyLabel::Wall, Rect::new(0.0, 0.0, 1.0, 1.0));
        body.set_static(false);
        body.vel = Vec2::new(0.0, 10.0);
        body.set_static(true);
        assert_eq!(body.vel, Vec2::ZERO);
    }
}
