//! Collision detection and response for the ball
//!
//! The ball is the only moving body that collides. Walls, the boundary and the goal
//! are treated as immovable while static.

use glam::Vec2;

use super::body::{Body, BodyLabel};
use super::sdf::{check_sdf_collision, reflect};

/// Distance within which the ball counts as touching a surface
pub const CONTACT_SLOP: f32 = 0.5;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward ball center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check the ball against any other body
pub fn ball_body_collision(ball_pos: Vec2, ball_radius: f32, body: &Body) -> CollisionResult {
    let sdf = check_sdf_collision(ball_pos, ball_radius, |p| body.sdf(p));
    if !sdf.hit || sdf.normal == Vec2::ZERO {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: sdf.normal,
        penetration: sdf.penetration,
    }
}

/// Whether the ball is touching `body` (overlapping or within `CONTACT_SLOP`)
pub fn ball_touches(ball_pos: Vec2, ball_radius: f32, body: &Body) -> bool {
    body.sdf(ball_pos) <= ball_radius + CONTACT_SLOP
}

/// Remove the velocity component driving into a surface
///
/// `restitution` blends between sliding along the surface (0) and a mirror bounce (1).
/// Velocity already leaving the surface is returned unchanged.
pub fn resolve_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    let slide = velocity - approach * normal;
    let bounced = reflect(velocity, normal);
    slide.lerp(bounced, restitution)
}

/// True when the pair is the ball and the goal, in either order
pub fn is_ball_goal_pair(a: BodyLabel, b: BodyLabel) -> bool {
    const WIN_PAIR: [BodyLabel; 2] = [BodyLabel::Ball, BodyLabel::Goal];
    a != b && WIN_PAIR.contains(&a) && WIN_PAIR.contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Rect;

    fn wall() -> Body {
        // Horizontal wall spanning x 0..100, y 45..55
        Body::rect(0, BodyLabel::Wall, Rect::new(50.0, 50.0, 100.0, 10.0))
    }

    #[test]
    fn test_ball_hits_wall_from_above() {
        let result = ball_body_collision(Vec2::new(50.0, 38.0), 8.0, &wall());
        assert!(result.hit);
        assert!((result.normal - Vec2::new(0.0, -1.0)).length() < 1e-3);
        assert!((result.penetration - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ball_clear_of_wall() {
        let result = ball_body_collision(Vec2::new(50.0, 20.0), 8.0, &wall());
        assert!(!result.hit);
        assert!(!ball_touches(Vec2::new(50.0, 20.0), 8.0, &wall()));
        // Resting exactly on the surface still counts as touching
        assert!(ball_touches(Vec2::new(50.0, 37.0), 8.0, &wall()));
    }

    #[test]
    fn test_resolve_velocity_slides() {
        let v = resolve_velocity(Vec2::new(3.0, 4.0), Vec2::new(0.0, -1.0), 0.0);
        assert!((v - Vec2::new(3.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_resolve_velocity_bounces() {
        let v = resolve_velocity(Vec2::new(3.0, 4.0), Vec2::new(0.0, -1.0), 1.0);
        assert!((v - Vec2::new(3.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn test_resolve_velocity_ignores_separating() {
        let v = Vec2::new(1.0, -2.0);
        assert_eq!(resolve_velocity(v, Vec2::new(0.0, -1.0), 0.0), v);
    }

    #[test]
    fn test_ball_goal_pair_any_order() {
        assert!(is_ball_goal_pair(BodyLabel::Ball, BodyLabel::Goal));
        assert!(is_ball_goal_pair(BodyLabel::Goal, BodyLabel::Ball));
        assert!(!is_ball_goal_pair(BodyLabel::Ball, BodyLabel::Wall));
        assert!(!is_ball_goal_pair(BodyLabel::Goal, BodyLabel::Goal));
        assert!(!is_ball_goal_pair(BodyLabel::Ball, BodyLabel::Ball));
    }
}
