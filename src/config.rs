use std::time::Duration;

/// Flat maze and drop-in settings, passed by reference to whatever needs them.
///
/// Nothing is validated here; even dimensions are bumped to odd when a maze is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    /// Cells between lattice decision points. Only 2 gives a fully connected maze.
    pub jump_distance: usize,
    pub wall_spawn_height: f32,
    pub floor_spawn_height: f32,
    pub player_spawn_height: f32,
    /// Vertical speed a wall starts falling with, negative is downwards.
    pub wall_initial_fall_speed: f32,
    /// Change in a falling wall's vertical speed per second.
    pub wall_fall_acceleration: f32,
    /// Delay between two consecutive walls starting to drop in.
    pub wall_spawn_interval: Duration,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: 21,
            height: 21,
            jump_distance: 2,
            wall_spawn_height: 100.0,
            floor_spawn_height: 0.0,
            player_spawn_height: 150.0,
            wall_initial_fall_speed: -2.0,
            wall_fall_acceleration: -5.0,
            wall_spawn_interval: Duration::from_millis(10),
        }
    }
}

impl MazeConfig {
    pub fn builder() -> MazeConfigBuilder {
        MazeConfigBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MazeConfigBuilder {
    config: MazeConfig,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder::default()
    }

    pub fn width(mut self, width: usize) -> MazeConfigBuilder {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: usize) -> MazeConfigBuilder {
        self.config.height = height;
        self
    }

    pub fn jump_distance(mut self, jump_distance: usize) -> MazeConfigBuilder {
        self.config.jump_distance = jump_distance;
        self
    }

    pub fn wall_spawn_height(mut self, height: f32) -> MazeConfigBuilder {
        self.config.wall_spawn_height = height;
        self
    }

    pub fn floor_spawn_height(mut self, height: f32) -> MazeConfigBuilder {
        self.config.floor_spawn_height = height;
        self
    }

    pub fn player_spawn_height(mut self, height: f32) -> MazeConfigBuilder {
        self.config.player_spawn_height = height;
        self
    }

    pub fn wall_initial_fall_speed(mut self, speed: f32) -> MazeConfigBuilder {
        self.config.wall_initial_fall_speed = speed;
        self
    }

    pub fn wall_fall_acceleration(mut self, acceleration: f32) -> MazeConfigBuilder {
        self.config.wall_fall_acceleration = acceleration;
        self
    }

    pub fn wall_spawn_interval(mut self, interval: Duration) -> MazeConfigBuilder {
        self.config.wall_spawn_interval = interval;
        self
    }

    pub fn build(self) -> MazeConfig {
        self.config
    }
}
