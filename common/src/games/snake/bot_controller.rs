use std::fmt;
use std::str::FromStr;

use super::session::GameSession;
use super::types::{Cell, Direction};
use crate::games::SessionRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotType {
    Greedy,
    Random,
}

impl FromStr for BotType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "greedy" => Ok(BotType::Greedy),
            "random" => Ok(BotType::Random),
            other => Err(format!("Unknown bot type '{}', expected greedy or random", other)),
        }
    }
}

impl fmt::Display for BotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotType::Greedy => f.write_str("greedy"),
            BotType::Random => f.write_str("random"),
        }
    }
}

pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_type: BotType,
        session: &GameSession,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if session.is_terminal() {
            return None;
        }

        match bot_type {
            BotType::Greedy => Self::greedy_move(session)
                .or_else(|| Self::random_safe_move(session, rng)),
            BotType::Random => Self::random_safe_move(session, rng),
        }
    }

    fn greedy_move(session: &GameSession) -> Option<Direction> {
        let food = session.food()?;
        let head = session.head();

        Self::safe_directions(session)
            .into_iter()
            .min_by_key(|direction| {
                head.step(*direction)
                    .map_or(u32::MAX, |cell| cell.manhattan_distance(food))
            })
    }

    fn random_safe_move(session: &GameSession, rng: &mut SessionRng) -> Option<Direction> {
        let safe_directions = Self::safe_directions(session);
        match rng.random_index(safe_directions.len()) {
            Some(index) => Some(safe_directions[index]),
            None => Some(session.direction()),
        }
    }

    fn safe_directions(session: &GameSession) -> Vec<Direction> {
        let current = session.direction();
        let head = session.head();
        Direction::ALL
            .into_iter()
            .filter(|direction| !direction.is_opposite(&current))
            .filter(|direction| {
                head.step(*direction)
                    .is_some_and(|cell| Self::is_safe_position(cell, session))
            })
            .collect()
    }

    /// The tail moves away on a plain step, so it counts as free.
    fn is_safe_position(cell: Cell, session: &GameSession) -> bool {
        let snake = session.snake();
        session.field_size().contains(cell) && (!snake.occupies(cell) || cell == snake.tail())
    }
}
