//! Grid simulation core for a single-player snake game.
//!
//! Everything in [`games::snake`] is pure and synchronous: callers own the
//! timer and the input devices and only tell a [`games::snake::GameSession`]
//! to advance one tick or change heading.

pub mod config;
pub mod games;
pub mod logger;
pub mod replay;
pub mod version;
