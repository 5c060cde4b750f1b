use std::collections::HashSet;
use std::time::Duration;

use super::body::SnakeBody;
use super::error::SnakeError;
use super::scoring::{Progress, SpeedTable};
use super::settings::SnakeSettings;
use super::types::{Cell, DeathReason, Direction, FieldSize};
use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    GameOver(DeathReason),
    BoardFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Moved,
    Ate { progress: Progress },
    Died(DeathReason),
    BoardFull,
}

/// One player's game: the snake, its food and the score, advanced one tick
/// at a time by whoever owns the clock.
#[derive(Clone, Debug)]
pub struct GameSession {
    settings: SnakeSettings,
    initial_snake: SnakeBody,
    speed_table: SpeedTable,
    snake: SnakeBody,
    food: Option<Cell>,
    progress: Progress,
    state: SessionState,
    ticks: u64,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Result<Self, SnakeError> {
        settings.validate().map_err(SnakeError::InvalidSettings)?;

        let initial_snake = SnakeBody::new(
            settings.start_cell(),
            settings.initial_length,
            settings.initial_direction,
            settings.field_size(),
        )?;
        let speed_table = settings.speed_table();
        let progress = Progress::initial(&speed_table);

        let mut session = Self {
            settings,
            snake: initial_snake.clone(),
            initial_snake,
            speed_table,
            food: None,
            progress,
            state: SessionState::Active,
            ticks: 0,
            rng,
        };
        session.place_food();
        Ok(session)
    }

    pub fn with_seed(settings: SnakeSettings, seed: u64) -> Result<Self, SnakeError> {
        Self::new(settings, SessionRng::new(seed))
    }

    /// Drops the current round and starts a fresh one. The random source
    /// keeps running, so the next round gets different food.
    pub fn reset(&mut self) {
        self.snake = self.initial_snake.clone();
        self.progress = Progress::initial(&self.speed_table);
        self.state = SessionState::Active;
        self.ticks = 0;
        self.food = None;
        self.place_food();
        log!(
            "New round: snake at {} heading {}, food at {:?}",
            self.snake.head(),
            self.snake.direction(),
            self.food
        );
    }

    /// Puts food on a uniformly chosen free cell. With no free cell left the
    /// round ends as [`SessionState::BoardFull`] and `false` is returned.
    pub fn place_food(&mut self) -> bool {
        let occupied: HashSet<Cell> = self.snake.cells().collect();
        let free: Vec<Cell> = self
            .settings
            .field_size()
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();

        match self.rng.random_index(free.len()) {
            Some(index) => {
                self.food = Some(free[index]);
                true
            }
            None => {
                self.food = None;
                if self.state == SessionState::Active {
                    self.state = SessionState::BoardFull;
                }
                false
            }
        }
    }

    /// Advances the round by one step: move, eat when the head reached the
    /// food, then check whether the snake survived.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_terminal() {
            return TickOutcome::Ignored;
        }

        self.ticks += 1;
        self.snake.move_forward();

        let mut ate = false;
        if self.food == Some(self.snake.head()) {
            self.snake.eat();
            self.progress = self
                .progress
                .rewarded(self.settings.food_reward, &self.speed_table);
            ate = true;
            log!(
                "Ate food at {}. Score: {}, speed: {}",
                self.snake.head(),
                self.progress.score,
                self.progress.speed
            );
            self.place_food();
        }

        if let Some(reason) = self.snake.death_reason() {
            self.state = SessionState::GameOver(reason);
            log!(
                "Game over after {} ticks: snake {} at {}. Final score: {}",
                self.ticks,
                reason,
                self.snake.head(),
                self.progress.score
            );
            return TickOutcome::Died(reason);
        }

        if self.state == SessionState::BoardFull {
            log!(
                "Board full after {} ticks. Final score: {}",
                self.ticks,
                self.progress.score
            );
            return TickOutcome::BoardFull;
        }

        if ate {
            TickOutcome::Ate {
                progress: self.progress,
            }
        } else {
            TickOutcome::Moved
        }
    }

    /// Returns whether the heading changed.
    pub fn handle_direction_input(&mut self, direction: Direction) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.snake.set_direction(direction)
    }

    pub fn handle_restart_input(&mut self) -> bool {
        if !self.is_terminal() {
            return false;
        }
        self.reset();
        true
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.snake.cells()
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn speed(&self) -> u32 {
        self.progress.speed
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        !matches!(self.state, SessionState::GameOver(_))
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver(_))
    }

    pub fn is_terminal(&self) -> bool {
        self.state != SessionState::Active
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.progress.speed))
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn field_size(&self) -> FieldSize {
        self.settings.field_size()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: SnakeBody) {
        self.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_session() -> GameSession {
        GameSession::new(SnakeSettings::default(), SessionRng::new(42)).unwrap()
    }

    fn cells(session: &GameSession) -> Vec<(i32, i32)> {
        session.cells().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_new_session_is_active_with_food() {
        let session = create_session();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(cells(&session), vec![(8, 5), (7, 5), (6, 5), (5, 5), (4, 5)]);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 4);
        let food = session.food().unwrap();
        assert!(session.field_size().contains(food));
        assert!(!session.snake().occupies(food));
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = SnakeSettings {
            start_x: 1,
            ..SnakeSettings::default()
        };
        let result = GameSession::new(settings, SessionRng::new(1));
        assert!(matches!(result, Err(SnakeError::InvalidSettings(_))));
    }

    #[test]
    fn test_tick_moves_snake() {
        let mut session = create_session();
        session.set_food(Some(Cell::new(0, 19)));
        assert_eq!(session.tick(), TickOutcome::Moved);
        assert_eq!(cells(&session), vec![(9, 5), (8, 5), (7, 5), (6, 5), (5, 5)]);
        assert_eq!(session.ticks(), 1);
        assert!(session.is_alive());
    }

    #[test]
    fn test_tick_eats_food_and_scores() {
        let mut session = create_session();
        session.set_food(Some(Cell::new(9, 5)));
        let outcome = session.tick();
        assert_eq!(
            outcome,
            TickOutcome::Ate {
                progress: Progress { score: 50, speed: 4 }
            }
        );
        assert_eq!(cells(&session), vec![(10, 5), (9, 5), (8, 5), (7, 5), (6, 5), (5, 5)]);
        let food = session.food().unwrap();
        assert!(!session.snake().occupies(food));
    }

    #[test]
    fn test_speed_increases_at_threshold() {
        let mut session = create_session();
        for x in [9, 11, 13] {
            session.set_food(Some(Cell::new(x, 5)));
            assert!(matches!(session.tick(), TickOutcome::Ate { .. }));
        }
        assert_eq!(session.score(), 150);
        assert_eq!(session.speed(), 5);
        assert_eq!(session.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_wall_hit_ends_round() {
        let mut session = create_session();
        session.set_food(Some(Cell::new(0, 19)));
        let mut outcome = TickOutcome::Moved;
        for _ in 0..20 {
            outcome = session.tick();
            if outcome != TickOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Died(DeathReason::WallCollision));
        assert_eq!(session.head(), Cell::new(19, 5));
        assert!(session.is_game_over());
        assert!(!session.is_alive());
        assert_eq!(session.ticks(), 12);
    }

    #[test]
    fn test_terminal_state_ignores_input() {
        let mut session = create_session();
        session.set_snake(
            SnakeBody::new(Cell::new(19, 5), 5, Direction::Right, session.field_size()).unwrap(),
        );
        session.set_food(Some(Cell::new(0, 0)));
        assert_eq!(session.tick(), TickOutcome::Died(DeathReason::WallCollision));

        let frozen = cells(&session);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.handle_direction_input(Direction::Up));
        assert_eq!(cells(&session), frozen);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut session = create_session();
        assert!(!session.handle_restart_input());

        session.set_snake(
            SnakeBody::new(Cell::new(19, 5), 5, Direction::Right, session.field_size()).unwrap(),
        );
        session.set_food(Some(Cell::new(0, 0)));
        session.tick();
        assert!(session.is_game_over());

        assert!(session.handle_restart_input());
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 4);
        assert_eq!(session.ticks(), 0);
        assert_eq!(cells(&session), vec![(8, 5), (7, 5), (6, 5), (5, 5), (4, 5)]);
        assert!(session.food().is_some());
    }

    #[test]
    fn test_direction_input_rejects_reversal() {
        let mut session = create_session();
        assert!(!session.handle_direction_input(Direction::Left));
        assert_eq!(session.direction(), Direction::Right);
        assert!(session.handle_direction_input(Direction::Up));
        assert_eq!(session.direction(), Direction::Up);
    }

    #[test]
    fn test_self_collision_ends_round() {
        let mut session = create_session();
        session.set_food(Some(Cell::new(0, 19)));
        session.set_snake(
            SnakeBody::from_cells(
                [
                    Cell::new(5, 5),
                    Cell::new(6, 5),
                    Cell::new(6, 6),
                    Cell::new(5, 6),
                    Cell::new(4, 6),
                    Cell::new(3, 6),
                ],
                Direction::Left,
                session.field_size(),
            )
            .unwrap(),
        );
        assert!(session.handle_direction_input(Direction::Down));
        assert_eq!(session.tick(), TickOutcome::Died(DeathReason::SelfCollision));
    }

    #[test]
    fn test_board_full_is_terminal_win() {
        let settings = SnakeSettings {
            field_width: 3,
            field_height: 2,
            start_x: 0,
            start_y: 0,
            initial_length: 1,
            ..SnakeSettings::default()
        };
        let mut session = GameSession::new(settings, SessionRng::new(3)).unwrap();
        // a ring with a single gap at (1,0), the tail sits right behind it
        session.set_snake(
            SnakeBody::from_cells(
                [
                    Cell::new(0, 0),
                    Cell::new(0, 1),
                    Cell::new(1, 1),
                    Cell::new(2, 1),
                    Cell::new(2, 0),
                ],
                Direction::Right,
                session.field_size(),
            )
            .unwrap(),
        );
        session.set_food(Some(Cell::new(1, 0)));

        assert_eq!(session.tick(), TickOutcome::BoardFull);
        assert_eq!(session.state(), SessionState::BoardFull);
        assert_eq!(session.food(), None);
        assert_eq!(session.snake().len(), 6);
        assert!(session.is_alive());
        assert_eq!(session.score(), 50);

        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(!session.handle_direction_input(Direction::Down));
        assert!(session.handle_restart_input());
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.snake().len(), 1);
    }

    #[test]
    fn test_eating_into_wall_ends_round() {
        let settings = SnakeSettings {
            field_width: 2,
            field_height: 1,
            start_x: 0,
            start_y: 0,
            initial_length: 1,
            ..SnakeSettings::default()
        };
        let mut session = GameSession::new(settings, SessionRng::new(3)).unwrap();
        assert_eq!(session.food(), Some(Cell::new(1, 0)));
        // the growth step after eating at (1,0) runs into the right wall
        assert_eq!(session.tick(), TickOutcome::Died(DeathReason::WallCollision));
        assert!(session.is_game_over());
        assert_eq!(session.score(), 50);
    }

    #[test]
    fn test_score_only_grows_by_reward() {
        let mut session = create_session();
        let mut last_score = 0;
        let mut last_speed = session.speed();
        for _ in 0..500 {
            if session.is_terminal() {
                session.handle_restart_input();
                last_score = 0;
                last_speed = session.speed();
            }
            if let Some(food) = session.food() {
                let head = session.head();
                let wanted = if food.x > head.x {
                    Direction::Right
                } else if food.x < head.x {
                    Direction::Left
                } else if food.y > head.y {
                    Direction::Down
                } else {
                    Direction::Up
                };
                session.handle_direction_input(wanted);
            }
            session.tick();
            let score = session.score();
            assert!(score == last_score || score == last_score + 50);
            assert!(session.speed() >= last_speed);
            if let Some(food) = session.food() {
                assert!(!session.snake().occupies(food));
            }
            last_score = score;
            last_speed = session.speed();
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameSession::with_seed(SnakeSettings::default(), 11).unwrap();
        let b = GameSession::with_seed(SnakeSettings::default(), 11).unwrap();
        assert_eq!(a.food(), b.food());
        assert_eq!(a.seed(), 11);
    }
}
