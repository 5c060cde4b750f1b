use std::fmt;

use super::types::{Cell, FieldSize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnakeError {
    EmptySnake,
    CellOutOfBounds { cell: Cell, field: FieldSize },
    InvalidSettings(String),
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::EmptySnake => write!(f, "Snake length must be at least 1"),
            SnakeError::CellOutOfBounds { cell, field } => {
                write!(f, "Snake cell {} lies outside the {} field", cell, field)
            }
            SnakeError::InvalidSettings(message) => write!(f, "Invalid settings: {}", message),
        }
    }
}

impl std::error::Error for SnakeError {}
