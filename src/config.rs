/// Gameplay constants.
///
/// Units are world pixels and frames: speeds are applied once per frame,
/// spawn periods are wall-clock durations independent of the frame rate.
use std::time::Duration;

use anyhow::ensure;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub board_width: f32,
    pub board_height: f32,

    pub player_width: f32,
    pub player_height: f32,

    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Horizontal pipe speed (negative = leftward).
    pub pipe_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    pub gravity: f32,
    /// Velocity assigned on jump (negative = upward).
    pub jump_velocity: f32,
    /// Velocity added once per fast-fall key press.
    pub fast_fall_boost: f32,

    pub pipe_interval: Duration,
    pub enemy_interval: Duration,
    pub fire_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 360.0,
            board_height: 640.0,
            player_width: 34.0,
            player_height: 24.0,
            pipe_width: 64.0,
            pipe_height: 512.0,
            pipe_speed: -2.0,
            enemy_width: 40.0,
            enemy_height: 40.0,
            enemy_speed: -3.0,
            bullet_width: 10.0,
            bullet_height: 4.0,
            bullet_speed: 5.0,
            gravity: 0.4,
            jump_velocity: -6.0,
            fast_fall_boost: 1.5,
            pipe_interval: Duration::from_millis(1500),
            enemy_interval: Duration::from_millis(3000),
            fire_interval: Duration::from_millis(300),
        }
    }
}

impl GameConfig {
    /// Player spawn point: one eighth across, vertically centred.
    pub fn player_spawn(&self) -> (f32, f32) {
        (self.board_width / 8.0, self.board_height / 2.0)
    }

    /// Vertical gap between the top and bottom pipe of a pair.
    pub fn opening_space(&self) -> f32 {
        self.board_height / 3.0
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.board_width > 0.0 && self.board_height > 0.0,
            "board must have a positive size, got {}x{}",
            self.board_width,
            self.board_height
        );
        for (name, period) in [
            ("pipe interval", self.pipe_interval),
            ("enemy interval", self.enemy_interval),
            ("fire interval", self.fire_interval),
        ] {
            ensure!(!period.is_zero(), "{name} must be greater than zero");
        }
        ensure!(
            self.enemy_height <= self.board_height,
            "enemies ({}) taller than the board ({})",
            self.enemy_height,
            self.board_height
        );
        Ok(())
    }
}
