//! Game state and core simulation types
//!
//! Everything needed to replay a run deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyLabel};
use crate::error::Result;
use crate::maze::{Layout, Maze};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is loose in the maze
    Playing,
    /// Ball reached the goal; walls are falling
    Won,
}

/// Things the host may want to react to (sounds, DOM updates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball started touching another body this tick
    CollisionStart { a: BodyLabel, b: BodyLabel },
    /// The maze was solved
    Won,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Carved maze
    pub maze: Maze,
    /// Pixel geometry derived from the maze
    pub layout: Layout,
    /// All bodies: boundary, goal, ball, then walls (sorted by id)
    pub bodies: Vec<Body>,
    /// World gravity (zero until the maze is solved)
    pub gravity: Vec2,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ids of bodies the ball touched last tick
    #[serde(default)]
    pub contacts: Vec<u32>,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Index of the ball in `bodies`
    ball_index: usize,
    /// Index of the goal in `bodies`
    goal_index: usize,
}

impl GameState {
    /// Create a new game over a `width × height` play field
    ///
    /// Uses `settings.seed` when set, otherwise `seed`.
    pub fn new(settings: &Settings, width: f32, height: f32, seed: u64) -> Result<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or(seed);
        // The RNG is only used to carve the maze; the seed alone reproduces it
        let mut rng = Pcg32::seed_from_u64(seed);

        let maze = Maze::generate(
            settings.cells_vertical,
            settings.cells_horizontal,
            &mut rng,
            settings.traversal,
        )?;
        let layout = Layout::new(&maze, width, height, settings.wall_thickness)?;

        let mut bodies = Vec::with_capacity(layout.walls.len() + 6);
        for rect in layout.boundary {
            bodies.push(Body::rect(bodies.len() as u32, BodyLabel::Boundary, rect));
        }
        let goal_index = bodies.len();
        bodies.push(Body::rect(goal_index as u32, BodyLabel::Goal, layout.goal));
        let ball_index = bodies.len();
        bodies.push(Body::circle(
            ball_index as u32,
            BodyLabel::Ball,
            layout.ball_spawn,
            layout.ball_radius,
        ));
        for wall in &layout.walls {
            bodies.push(Body::rect(bodies.len() as u32, BodyLabel::Wall, wall.rect));
        }

        log::info!(
            "Game ready: seed {}, {} bodies ({} walls)",
            seed,
            bodies.len(),
            layout.walls.len()
        );

        Ok(Self {
            seed,
            maze,
            layout,
            bodies,
            gravity: Vec2::ZERO,
            phase: GamePhase::Playing,
            time_ticks: 0,
            contacts: Vec::new(),
            events: Vec::new(),
            ball_index,
            goal_index,
        })
    }

    pub fn ball(&self) -> &Body {
        &self.bodies[self.ball_index]
    }

    pub fn ball_mut(&mut self) -> &mut Body {
        &mut self.bodies[self.ball_index]
    }

    pub(crate) fn ball_index(&self) -> usize {
        self.ball_index
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn goal(&self) -> &Body {
        &self.bodies[self.goal_index]
    }

    /// Interior wall bodies
    pub fn walls(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.label == BodyLabel::Wall)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Turn on gravity and let the walls fall
    pub(crate) fn trigger_win(&mut self) {
        if self.phase == GamePhase::Won {
            return;
        }
        self.phase = GamePhase::Won;
        self.gravity = Vec2::new(0.0, crate::consts::WIN_GRAVITY);
        for body in self.bodies.iter_mut().filter(|b| b.label == BodyLabel::Wall) {
            body.set_static(false);
        }
        self.events.push(GameEvent::Won);
        log::info!("Maze solved after {} ticks", self.time_ticks);
    }
}
