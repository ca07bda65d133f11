//! SDF-based collision detection
//!
//! Uses signed distance fields for collision detection and response.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box given by center and half extents
///
/// Negative inside, zero on the surface, positive outside.
#[inline]
pub fn sd_box(p: Vec2, center: Vec2, half: Vec2) -> f32 {
    let d = (p - center).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Compute SDF gradient (surface normal) using central differences
pub fn sdf_gradient<F>(p: Vec2, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let eps = 0.5;
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}

/// Result of SDF collision check
#[derive(Debug, Clone)]
pub struct SdfCollision {
    pub hit: bool,
    pub distance: f32,
    pub normal: Vec2,
    pub penetration: f32,
}

impl SdfCollision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: f32::MAX,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between ball and an SDF shape
pub fn check_sdf_collision<F>(ball_pos: Vec2, ball_radius: f32, sdf: F) -> SdfCollision
where
    F: Fn(Vec2) -> f32,
{
    let dist = sdf(ball_pos);

    if dist < ball_radius {
        let normal = sdf_gradient(ball_pos, &sdf);
        SdfCollision {
            hit: true,
            distance: dist,
            normal,
            penetration: ball_radius - dist,
        }
    } else {
        SdfCollision::miss()
    }
}

/// Reflect velocity off a surface with given normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_box_outside_inside_surface() {
        let c = Vec2::new(10.0, 10.0);
        let half = Vec2::new(5.0, 2.0);
        // Right of the box
        assert!((sd_box(Vec2::new(20.0, 10.0), c, half) - 5.0).abs() < 1e-5);
        // On the top face
        assert!(sd_box(Vec2::new(10.0, 8.0), c, half).abs() < 1e-5);
        // Inside, nearest face is top/bottom (2 away)
        assert!((sd_box(c, c, half) + 2.0).abs() < 1e-5);
        // Diagonal from a corner
        let d = sd_box(Vec2::new(18.0, 16.0), c, half);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_gradient_points_out_of_face() {
        let c = Vec2::ZERO;
        let half = Vec2::new(50.0, 5.0);
        let n = sdf_gradient(Vec2::new(3.0, -12.0), |p| sd_box(p, c, half));
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-3);
    }

    #[test]
    fn test_circle_collision() {
        let hit = check_sdf_collision(Vec2::new(12.0, 0.0), 5.0, |p| {
            sd_circle(p, Vec2::ZERO, 10.0)
        });
        assert!(hit.hit);
        assert!((hit.penetration - 3.0).abs() < 1e-4);
        assert!((hit.normal - Vec2::X).length() < 1e-3);

        let miss = check_sdf_collision(Vec2::new(30.0, 0.0), 5.0, |p| {
            sd_circle(p, Vec2::ZERO, 10.0)
        });
        assert!(!miss.hit);
    }

    #[test]
    fn test_reflect() {
        let v = reflect(Vec2::new(3.0, -4.0), Vec2::Y);
        assert!((v - Vec2::new(3.0, 4.0)).length() < 1e-5);
    }
}
