//! Deterministic simulation module
//!
//! Gameplay lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (used once, to carve the maze)
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod sdf;
pub mod state;
pub mod tick;

pub use body::{Body, BodyLabel, Shape};
pub use collision::{CollisionResult, ball_body_collision, is_ball_goal_pair};
pub use sdf::{check_sdf_collision, reflect, sd_box, sd_circle};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
