use std::time::Duration;

use crate::config::MazeConfig;
use crate::spawning::Position3;

/// A spawned wall dropping from its spawn height onto the floor.
///
/// Driven by an external clock through `step`, there is no per-frame hook.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingWall {
    position: Position3,
    speed: f32,
    acceleration: f32,
    rest_height: f32,
    falling: bool,
}

impl FallingWall {
    pub fn new(position: Position3, initial_speed: f32, acceleration: f32, rest_height: f32) -> FallingWall {
        FallingWall {
            position,
            speed: initial_speed,
            acceleration,
            rest_height,
            falling: true,
        }
    }

    pub fn from_config(position: Position3, config: &MazeConfig) -> FallingWall {
        FallingWall::new(position,
                         config.wall_initial_fall_speed,
                         config.wall_fall_acceleration,
                         config.floor_spawn_height)
    }

    /// Advance the fall by `dt`. Returns true while the wall is still falling.
    pub fn step(&mut self, dt: Duration) -> bool {
        if !self.falling {
            return false;
        }

        let seconds = dt.as_secs_f32();
        self.position.y += self.speed * seconds;
        self.speed += self.acceleration * seconds;

        if self.position.y <= self.rest_height {
            self.position.y = self.rest_height;
            self.speed = 0.0;
            self.falling = false;
        }
        self.falling
    }

    /// Does the wall ever come to rest with its current speed and acceleration.
    ///
    /// Upward acceleration can still land a wall moving down fast enough: it stops descending
    /// after `speed² / (2 * acceleration)`, which `step` only ever overshoots.
    pub fn will_land(&self) -> bool {
        if !self.falling || self.position.y <= self.rest_height || self.acceleration < 0.0 {
            return true;
        }
        if self.speed >= 0.0 {
            return false;
        }
        if self.acceleration == 0.0 {
            return true;
        }
        let drop = self.position.y - self.rest_height;
        self.speed * self.speed / (2.0 * self.acceleration) >= drop
    }

    #[inline]
    pub fn position(&self) -> Position3 {
        self.position
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.falling
    }
}
