//! Maze Ball - roll a ball through a randomly carved maze
//!
//! Core modules:
//! - `maze`: Deterministic maze generation and wall layout
//! - `sim`: Fixed-timestep simulation (ball, walls, goal, win trigger)
//! - `settings`: Presets and persisted preferences
//! - `error`: Error types

pub mod error;
pub mod maze;
pub mod settings;
pub mod sim;

pub use error::{MazeError, Result};
pub use maze::{Layout, Maze, MazeGenerator, Traversal};
pub use settings::{MazePreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Velocity change per key press (5 px per 60 Hz step)
    pub const KEY_IMPULSE: f32 = 5.0 * 60.0;
    /// Fraction of velocity lost to drag each step
    pub const AIR_FRICTION: f32 = 0.01;
    /// Downward acceleration once the maze is solved (pixels/s²)
    pub const WIN_GRAVITY: f32 = 1000.0;
    /// Bounciness of the ball against walls (0 = slide along)
    pub const RESTITUTION: f32 = 0.0;

    /// Goal side length relative to a cell
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius is the smaller cell side divided by this
    pub const BALL_RADIUS_DIVISOR: f32 = 4.0;
    /// Ball sub-moves are at most this share of radius plus half a wall
    pub const BALL_STEP_FRACTION: f32 = 0.5;
}
