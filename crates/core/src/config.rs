//! Game configuration
//!
//! Static for a session. Defaults match the constants in the types crate; a
//! front-end may load overrides from JSON, where every field is optional.
//!
//! ```
//! use bonus_tetris_core::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "board_width": 12 }"#).unwrap();
//! assert_eq!(config.board_width, 12);
//! assert_eq!(config.board_height, 20);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Piece pacing, all in game seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub initial_step_delay: f32,
    pub min_step_delay: f32,
    pub move_delay: f32,
    pub lock_delay: f32,
    pub acceleration_interval: f32,
    pub acceleration_factor: f32,
    /// Fixed step length used by the session, in real seconds
    pub tick: f32,
    pub max_steps_per_frame: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_step_delay: INITIAL_STEP_DELAY_SECS,
            min_step_delay: MIN_STEP_DELAY_SECS,
            move_delay: MOVE_DELAY_SECS,
            lock_delay: LOCK_DELAY_SECS,
            acceleration_interval: ACCELERATION_INTERVAL_SECS,
            acceleration_factor: ACCELERATION_FACTOR,
            tick: TICK_SECS,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
        }
    }
}

/// Bonus piece odds, rewards and slow motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    pub probability: f32,
    pub line_clear_points: u32,
    pub column_clear_points: u32,
    pub bomb_points: u32,
    pub slow_motion_points: u32,
    pub slow_motion_factor: f32,
    /// Game seconds, so the slowdown lasts `duration / factor` on the wall clock
    pub slow_motion_duration: f32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            probability: BONUS_PROBABILITY,
            line_clear_points: LINE_CLEAR_BONUS_POINTS,
            column_clear_points: COLUMN_CLEAR_BONUS_POINTS,
            bomb_points: BOMB_BONUS_POINTS,
            slow_motion_points: SLOW_MOTION_BONUS_POINTS,
            slow_motion_factor: SLOW_MOTION_FACTOR,
            slow_motion_duration: SLOW_MOTION_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub spawn_origin: Cell,
    /// A lock with any cell at or above `y_max - game_over_margin` ends the game
    pub game_over_margin: i32,
    pub line_scores: [u32; 5],
    pub timing: TimingConfig,
    pub bonus: BonusConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_origin: SPAWN_ORIGIN,
            game_over_margin: GAME_OVER_MARGIN,
            line_scores: LINE_SCORES,
            timing: TimingConfig::default(),
            bonus: BonusConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.board_width, self.board_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < 4 || self.board_height < 4 {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if !self.bounds().contains(self.spawn_origin) {
            return Err(ConfigError::SpawnOutOfBounds(self.spawn_origin));
        }
        if self.game_over_margin < 0 {
            return Err(ConfigError::NegativeMargin(self.game_over_margin));
        }
        if self.line_scores.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::LineScoresDecreasing);
        }

        let t = &self.timing;
        let positive = [
            ("initial_step_delay", t.initial_step_delay),
            ("min_step_delay", t.min_step_delay),
            ("move_delay", t.move_delay),
            ("lock_delay", t.lock_delay),
            ("acceleration_interval", t.acceleration_interval),
            ("tick", t.tick),
            ("slow_motion_factor", self.bonus.slow_motion_factor),
            ("slow_motion_duration", self.bonus.slow_motion_duration),
        ];
        // NaN fails the comparison as well
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::NonPositive(*name));
        }
        if t.max_steps_per_frame == 0 {
            return Err(ConfigError::NonPositive("max_steps_per_frame"));
        }
        if !(t.acceleration_factor > 0.0 && t.acceleration_factor <= 1.0) {
            return Err(ConfigError::InvalidAccelerationFactor(t.acceleration_factor));
        }
        if !(0.0..=1.0).contains(&self.bonus.probability) {
            return Err(ConfigError::InvalidProbability(self.bonus.probability));
        }

        Ok(())
    }
}
