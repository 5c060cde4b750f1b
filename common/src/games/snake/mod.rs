mod body;
mod bot_controller;
mod error;
mod scoring;
mod session;
mod settings;
mod types;

pub use body::SnakeBody;
pub use bot_controller::{BotController, BotType};
pub use error::SnakeError;
pub use scoring::{Progress, SpeedTable};
pub use session::{GameSession, SessionState, TickOutcome};
pub use settings::{MAX_FIELD_SIDE, SnakeSettings};
pub use types::{Cell, DeathReason, Direction, FieldSize};
