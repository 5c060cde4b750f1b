use serde::{Deserialize, Serialize};

use super::body::SnakeBody;
use super::scoring::SpeedTable;
use super::types::{Cell, Direction, FieldSize};
use crate::config::Validate;

pub const MAX_FIELD_SIDE: usize = 1000;

/// Everything a session needs to start a round. Missing YAML keys fall back
/// to the classic 20x20 game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub start_x: i32,
    pub start_y: i32,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub base_speed: u32,
    pub food_reward: u32,
    pub score_thresholds: Vec<u32>,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
            start_x: 8,
            start_y: 5,
            initial_length: 5,
            initial_direction: Direction::Right,
            base_speed: 4,
            food_reward: 50,
            score_thresholds: vec![150, 300, 500, 750, 1100, 1500, 2000, 2500],
        }
    }
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn start_cell(&self) -> Cell {
        Cell::new(self.start_x, self.start_y)
    }

    pub fn speed_table(&self) -> SpeedTable {
        SpeedTable::new(self.base_speed, self.score_thresholds.clone())
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width == 0 || self.field_width > MAX_FIELD_SIDE {
            return Err(format!(
                "field_width must be between 1 and {}, got {}",
                MAX_FIELD_SIDE, self.field_width
            ));
        }
        if self.field_height == 0 || self.field_height > MAX_FIELD_SIDE {
            return Err(format!(
                "field_height must be between 1 and {}, got {}",
                MAX_FIELD_SIDE, self.field_height
            ));
        }
        if self.initial_length >= self.field_size().cell_count() {
            return Err(format!(
                "initial_length {} leaves no room for food on a {} field",
                self.initial_length,
                self.field_size()
            ));
        }
        if !self.field_size().contains(self.start_cell()) {
            return Err(format!(
                "start cell {} lies outside the {} field",
                self.start_cell(),
                self.field_size()
            ));
        }
        SnakeBody::new(
            self.start_cell(),
            self.initial_length,
            self.initial_direction,
            self.field_size(),
        )
        .map_err(|e| e.to_string())?;
        if self.base_speed == 0 {
            return Err("base_speed must be greater than 0".to_string());
        }
        if self.food_reward == 0 {
            return Err("food_reward must be greater than 0".to_string());
        }
        // a board filled entirely with food rewards must still fit the score
        let max_score = u64::from(self.food_reward) * self.field_size().cell_count() as u64;
        if max_score > u64::from(u32::MAX) {
            return Err(format!(
                "food_reward {} overflows the score on a {} field",
                self.food_reward,
                self.field_size()
            ));
        }
        if self
            .base_speed
            .checked_add(self.score_thresholds.len() as u32)
            .is_none()
        {
            return Err(format!("base_speed {} is too large", self.base_speed));
        }
        if self.score_thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err("score_thresholds must be strictly ascending".to_string());
        }
        Ok(())
    }
}
