//! World space positions derived from a finished maze grid, and the pacing of the walls'
//! drop-in.
//!
//! Grid cell `(row, column)` is placed at world `x = column`, `z = row`; `y` is the spawn height.

use std::cmp;
use std::time::Duration;

use crate::cells::{CellState, GridCoordinate};
use crate::grid::OccupancyGrid;


#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position3 {
    pub fn new(x: f32, y: f32, z: f32) -> Position3 {
        Position3 { x, y, z }
    }

    /// The world position of a grid cell lifted to `height`.
    pub fn at_cell(coord: GridCoordinate, height: f32) -> Position3 {
        Position3::new(coord.column as f32, height, coord.row as f32)
    }

    /// Euclidean distance from the world origin.
    pub fn distance_from_origin(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Everything that has to be placed in the world for one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnLayout {
    /// One floor tile per grid cell, row-major.
    pub floor_positions: Vec<Position3>,
    /// One wall per wall cell, nearest the origin first.
    pub wall_positions: Vec<Position3>,
    pub goal_position: Option<Position3>,
}

/// Lay out the floor, wall and goal positions for a grid.
pub fn build_spawn_positions(grid: &OccupancyGrid,
                             wall_height: f32,
                             floor_height: f32)
                             -> SpawnLayout {

    let mut floor_positions = Vec::with_capacity(grid.size());
    let mut wall_positions = Vec::with_capacity(grid.count_walls());
    let mut goal_position = None;

    for (coord, state) in grid.iter() {
        floor_positions.push(Position3::at_cell(coord, floor_height));
        match state {
            CellState::Wall => wall_positions.push(Position3::at_cell(coord, wall_height)),
            CellState::Goal => goal_position = Some(Position3::at_cell(coord, floor_height)),
            CellState::Path => {}
        }
    }

    sort_by_distance_from_origin(&mut wall_positions);

    SpawnLayout {
        floor_positions,
        wall_positions,
        goal_position,
    }
}

/// Stable sort, equally distant positions keep their relative order.
pub fn sort_by_distance_from_origin(positions: &mut [Position3]) {
    positions.sort_by(|a, b| a.distance_from_origin().total_cmp(&b.distance_from_origin()));
}

/// Where the player drops in: above the seed cell.
pub fn player_spawn_position(seed: GridCoordinate, height: f32) -> Position3 {
    Position3::at_cell(seed, height)
}

/// Cursor over a wall list that hands out the walls due to spawn as time passes.
///
/// The first wall is due immediately, every following wall one `interval` after the previous.
#[derive(Debug, Clone)]
pub struct StagedSpawner<'a> {
    positions: &'a [Position3],
    interval: Duration,
    elapsed: Duration,
    spawned: usize,
}

impl<'a> StagedSpawner<'a> {
    pub fn new(positions: &'a [Position3], interval: Duration) -> StagedSpawner<'a> {
        StagedSpawner {
            positions,
            interval,
            elapsed: Duration::from_secs(0),
            spawned: 0,
        }
    }

    /// Move the clock forward and return the walls that became due, in list order.
    pub fn advance(&mut self, delta: Duration) -> &'a [Position3] {
        self.elapsed += delta;
        let due = self.due_count();
        let positions: &'a [Position3] = self.positions;
        let batch = &positions[self.spawned..due];
        self.spawned = due;
        batch
    }

    #[inline]
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.positions.len() - self.spawned
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn due_count(&self) -> usize {
        let total = self.positions.len();
        let interval_nanos = self.interval.as_nanos();
        if interval_nanos == 0 {
            return total;
        }
        let intervals_passed = self.elapsed.as_nanos() / interval_nanos;
        cmp::min(intervals_passed.saturating_add(1), total as u128) as usize
    }
}
