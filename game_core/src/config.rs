use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::Deserialize;

use crate::{Court, ConfigError, Params, Side};

/// Game configuration
///
/// Every field falls back to the matching [`Params`] constant when it is
/// missing from a JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub court_width: f32,
    pub court_height: f32,
    pub border_size: f32,
    pub margin: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_start_offset: f32,
    pub paddle_epsilon: f32,
    pub move_distance: f32,
    pub human_divisor: f32,
    pub bot_divisor: f32,
    pub ball_size: f32,
    pub ball_base_speed: f32,
    pub ball_speed_growth: f32,
    pub deflection_damping: f32,
    pub serve_gap: f32,
    pub win_score: u32,
    pub win_margin: u32,
    pub target_fps: u32,
    pub max_frameskip: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            court_width: Params::COURT_WIDTH,
            court_height: Params::COURT_HEIGHT,
            border_size: Params::BORDER_SIZE,
            margin: Params::MARGIN,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_start_offset: Params::PADDLE_START_OFFSET,
            paddle_epsilon: Params::PADDLE_EPSILON,
            move_distance: Params::MOVE_DISTANCE,
            human_divisor: Params::HUMAN_DIVISOR,
            bot_divisor: Params::BOT_DIVISOR,
            ball_size: Params::BALL_SIZE,
            ball_base_speed: Params::BALL_BASE_SPEED,
            ball_speed_growth: Params::BALL_SPEED_GROWTH,
            deflection_damping: Params::DEFLECTION_DAMPING,
            serve_gap: Params::SERVE_GAP,
            win_score: Params::WIN_SCORE,
            win_margin: Params::WIN_MARGIN,
            target_fps: Params::FRAMES_PER_SECOND,
            max_frameskip: Params::MAX_FRAMESKIP,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("border_size", self.border_size),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("ball_base_speed", self.ball_base_speed),
            ("ball_speed_growth", self.ball_speed_growth),
            ("deflection_damping", self.deflection_damping),
            ("human_divisor", self.human_divisor),
            ("bot_divisor", self.bot_divisor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("paddle_epsilon", self.paddle_epsilon),
            ("move_distance", self.move_distance),
            ("serve_gap", self.serve_gap),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }

        let court = Court::new(self);
        let (lo, hi) = self.paddle_band(&court);
        if lo > hi {
            return Err(ConfigError::invalid(
                "paddle_height",
                format!("paddle does not fit between the walls (band {lo}..{hi})"),
            ));
        }
        if self.paddle_x(Side::Left) + self.paddle_width >= self.paddle_x(Side::Right) {
            return Err(ConfigError::invalid(
                "margin",
                format!(
                    "paddles overlap or swap sides (left x {}, right x {})",
                    self.paddle_x(Side::Left),
                    self.paddle_x(Side::Right)
                ),
            ));
        }
        let gap = self.court_height - 2.0 * self.border_size;
        if self.ball_size >= gap {
            return Err(ConfigError::invalid(
                "ball_size",
                format!("ball does not fit between the walls ({gap} units)"),
            ));
        }
        if self.win_score == 0 {
            return Err(ConfigError::invalid("win_score", "must be at least 1"));
        }
        if self.win_margin == 0 {
            return Err(ConfigError::invalid(
                "win_margin",
                "must be at least 1 or a tie would count as a win",
            ));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::invalid("target_fps", "must be at least 1"));
        }
        if self.max_frameskip == 0 {
            return Err(ConfigError::invalid("max_frameskip", "must be at least 1"));
        }
        Ok(())
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    pub fn ball_extent(&self) -> Vec2 {
        Vec2::splat(self.ball_size)
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.margin - self.border_size,
            Side::Right => self.court_width - self.margin,
        }
    }

    /// Starting top-left corner of a paddle
    pub fn paddle_spawn(&self, side: Side) -> Vec2 {
        Vec2::new(
            self.paddle_x(side),
            self.court_height / 2.0 - self.paddle_start_offset,
        )
    }

    /// Legal range for a paddle's top edge
    pub fn paddle_band(&self, court: &Court) -> (f32, f32) {
        (
            court.top.bottom() + self.paddle_epsilon,
            court.bottom.top() - self.paddle_height - self.paddle_epsilon,
        )
    }

    /// Update budget of one rendered frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}
