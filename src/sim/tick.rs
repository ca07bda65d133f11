//! Fixed timestep simulation tick
//!
//! Advances the ball, resolves it against static bodies, tracks contacts and fires
//! the win trigger. Deliberately simple: only the ball collides, and falling walls
//! just come to rest on the floor line.

use glam::Vec2;

use super::body::{BodyLabel, Shape};
use super::collision::{ball_body_collision, ball_touches, is_ball_goal_pair, resolve_velocity};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::maze::Direction;

/// Maximum ball speed; bounds how many sub-moves a tick can take
pub const BALL_MAX_SPEED: f32 = 1200.0;

/// Key presses for a single tick (deterministic), counted per direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: u32,
    pub right: u32,
    pub down: u32,
    pub left: u32,
}

impl TickInput {
    /// A single press in one direction
    pub fn pressed(direction: Direction) -> Self {
        let mut input = Self::default();
        input.press(direction);
        input
    }

    /// Record one more key press
    pub fn press(&mut self, direction: Direction) {
        let count = match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        };
        *count = count.saturating_add(1);
    }

    /// Velocity change requested by the pressed keys, one impulse per press
    pub fn impulse(&self) -> Vec2 {
        let x = self.right as f32 - self.left as f32;
        let y = self.down as f32 - self.up as f32;
        Vec2::new(x, y) * KEY_IMPULSE
    }

    pub fn any(&self) -> bool {
        self.up > 0 || self.right > 0 || self.down > 0 || self.left > 0
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Key presses add to the current velocity
    if input.any() {
        let ball = state.ball_mut();
        ball.vel += input.impulse();
    }

    integrate(state, dt);
    let touching = move_ball(state, dt);
    settle_falling_walls(state);
    report_contacts(state, touching);
}

/// Gravity and drag for every dynamic body; motion for all but the ball
fn integrate(state: &mut GameState, dt: f32) {
    let gravity = state.gravity;
    for body in state.bodies.iter_mut().filter(|b| !b.is_static) {
        body.vel += gravity * dt;
        body.vel *= 1.0 - AIR_FRICTION;
        if body.label == BodyLabel::Ball {
            body.vel = body.vel.clamp_length_max(BALL_MAX_SPEED);
        } else {
            body.pos += body.vel * dt;
        }
    }
}

/// Move the ball in sub-moves no longer than `Layout::max_ball_step`, pushing it out of
/// static bodies after each one; returns ids it touched, sorted
fn move_ball(state: &mut GameState, dt: f32) -> Vec<u32> {
    let ball_index = state.ball_index();
    let mut ball = state.bodies[ball_index];
    let Some(radius) = ball.radius() else {
        return Vec::new();
    };

    // The centre never crosses the midline of a wall it has not yet touched
    let max_step = state.layout.max_ball_step();
    let travel = ball.vel.length() * dt;
    let steps = (travel / max_step).ceil().max(1.0) as u32;
    let sub_dt = dt / steps as f32;

    let mut touching = Vec::new();
    for _ in 0..steps {
        ball.pos += ball.vel * sub_dt;

        for (i, body) in state.bodies.iter().enumerate() {
            if i == ball_index || !body.is_static {
                continue;
            }

            let hit = ball_body_collision(ball.pos, radius, body);
            if hit.hit {
                ball.pos += hit.normal * hit.penetration;
                ball.vel = resolve_velocity(ball.vel, hit.normal, RESTITUTION);
                touching.push(body.id);
            }
        }
    }

    // Resting contacts at the final position
    for (i, body) in state.bodies.iter().enumerate() {
        if i != ball_index && body.is_static && ball_touches(ball.pos, radius, body) {
            touching.push(body.id);
        }
    }

    state.bodies[ball_index] = ball;
    touching.sort_unstable();
    touching.dedup();
    touching
}

/// Falling walls stop on top of the bottom boundary
fn settle_falling_walls(state: &mut GameState) {
    let floor = state.layout.height - state.layout.thickness / 2.0;
    for body in state
        .bodies
        .iter_mut()
        .filter(|b| !b.is_static && b.label == BodyLabel::Wall)
    {
        let Shape::Rect { half } = body.shape else {
            continue;
        };
        if body.pos.y + half.y > floor {
            body.pos.y = floor - half.y;
            body.vel = Vec2::ZERO;
        }
    }
}

/// Emit collision-start events for new contacts and check for the win
fn report_contacts(state: &mut GameState, touching: Vec<u32>) {
    let mut won = false;
    for &id in &touching {
        if state.contacts.binary_search(&id).is_ok() {
            continue;
        }
        let Some(other) = state.body(id).map(|b| b.label) else {
            continue;
        };
        state.events.push(GameEvent::CollisionStart {
            a: BodyLabel::Ball,
            b: other,
        });
        if is_ball_goal_pair(BodyLabel::Ball, other) {
            won = true;
        }
    }
    state.contacts = touching;

    if won {
        state.trigger_win();
    }
}
