//! Wall layout geometry
//!
//! Converts a carved maze into the axis-aligned rectangles the simulation collides
//! against. Rectangles are described by center and full size, in pixels, with the
//! origin at the top-left of the play area and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Maze;
use super::grid::WallMatrix;
use crate::consts::{BALL_RADIUS_DIVISOR, BALL_STEP_FRACTION, GOAL_SCALE};
use crate::error::{MazeError, Result};

/// Axis-aligned rectangle (center + full extent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }
}

/// Direction a wall segment runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Lies along a cell's bottom edge
    Horizontal,
    /// Lies along a cell's right edge
    Vertical,
}

/// One closed wall between two cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub orientation: Orientation,
    /// Entry in the wall matrix this segment came from
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

/// Emit a rectangle for every closed wall
///
/// Horizontal walls come first, then vertical walls, each in row-major order.
/// Pure: the same matrices always give the same sequence.
pub fn emit_walls(
    verticals: &WallMatrix,
    horizontals: &WallMatrix,
    unit_width: f32,
    unit_height: f32,
    thickness: f32,
) -> Vec<WallSegment> {
    let closed = |m: &WallMatrix| m.iter().filter(|e| !e.2).count();
    let mut segments = Vec::with_capacity(closed(verticals) + closed(horizontals));

    for (row, col, open) in horizontals.iter() {
        if open {
            continue;
        }
        segments.push(WallSegment {
            orientation: Orientation::Horizontal,
            row,
            col,
            rect: Rect::new(
                col as f32 * unit_width + unit_width / 2.0,
                row as f32 * unit_height + unit_height,
                unit_width,
                thickness,
            ),
        });
    }

    for (row, col, open) in verticals.iter() {
        if open {
            continue;
        }
        segments.push(WallSegment {
            orientation: Orientation::Vertical,
            row,
            col,
            rect: Rect::new(
                col as f32 * unit_width + unit_width,
                row as f32 * unit_height + unit_height / 2.0,
                thickness,
                unit_height,
            ),
        });
    }

    segments
}

/// Everything the play field needs, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub unit_width: f32,
    pub unit_height: f32,
    pub thickness: f32,
    /// Interior walls from `emit_walls`
    pub walls: Vec<WallSegment>,
    /// Top, bottom, left, right
    pub boundary: [Rect; 4],
    /// Always the bottom-right cell
    pub goal: Rect,
    /// Always the center of the top-left cell
    pub ball_spawn: Vec2,
    pub ball_radius: f32,
}

impl Layout {
    /// Lay out `maze` over a `width × height` area
    pub fn new(maze: &Maze, width: f32, height: f32, thickness: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(MazeError::InvalidSettings(format!(
                "play area must be positive, got {width}x{height}"
            )));
        }
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(MazeError::InvalidSettings(format!(
                "wall thickness must be non-negative, got {thickness}"
            )));
        }

        let unit_width = width / maze.cols() as f32;
        let unit_height = height / maze.rows() as f32;

        let walls = emit_walls(
            maze.verticals(),
            maze.horizontals(),
            unit_width,
            unit_height,
            thickness,
        );

        log::debug!(
            "Layout {}x{}: unit {:.1}x{:.1}, {} wall segments",
            width,
            height,
            unit_width,
            unit_height,
            walls.len()
        );

        Ok(Self {
            width,
            height,
            unit_width,
            unit_height,
            thickness,
            walls,
            boundary: boundary(width, height, thickness),
            goal: goal(width, height, unit_width, unit_height),
            ball_spawn: Vec2::new(unit_width / 2.0, unit_height / 2.0),
            ball_radius: unit_width.min(unit_height) / BALL_RADIUS_DIVISOR,
        })
    }

    /// Longest single move of the ball that cannot carry its centre past a wall's midline
    #[inline]
    pub fn max_ball_step(&self) -> f32 {
        (self.ball_radius + self.thickness / 2.0) * BALL_STEP_FRACTION
    }
}

/// Four static rectangles tracing the outer edge of the play area
pub fn boundary(width: f32, height: f32, thickness: f32) -> [Rect; 4] {
    [
        Rect::new(width / 2.0, 0.0, width, thickness),
        Rect::new(width / 2.0, height, width, thickness),
        Rect::new(0.0, height / 2.0, thickness, height),
        Rect::new(width, height / 2.0, thickness, height),
    ]
}

/// Goal square in the bottom-right cell, scaled down from the cell size
pub fn goal(width: f32, height: f32, unit_width: f32, unit_height: f32) -> Rect {
    Rect::new(
        width - unit_width / 2.0,
        height - unit_height / 2.0,
        unit_width * GOAL_SCALE,
        unit_height * GOAL_SCALE,
    )
}
