use super::recorder::{Replay, ReplayInput};
use crate::games::snake::{GameSession, SnakeError, TickOutcome};

pub struct ReplayPlayer {
    replay: Replay,
    session: GameSession,
    current_tick: u64,
    current_input_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Result<Self, SnakeError> {
        let session = GameSession::with_seed(replay.settings.clone(), replay.seed)?;
        Ok(Self {
            replay,
            session,
            current_tick: 0,
            current_input_index: 0,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.replay.total_ticks
    }

    /// Applies the inputs recorded for the current tick, then advances the
    /// session once. `None` after the last recorded tick.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.is_finished() {
            return None;
        }
        self.apply_inputs_up_to(self.current_tick);
        self.current_tick += 1;
        Some(self.session.tick())
    }

    pub fn run(mut self) -> GameSession {
        while self.step().is_some() {}
        self.apply_inputs_up_to(u64::MAX);
        self.session
    }

    fn apply_inputs_up_to(&mut self, tick: u64) {
        while let Some(recorded) = self.replay.inputs.get(self.current_input_index) {
            if recorded.tick > tick {
                break;
            }
            match recorded.input {
                ReplayInput::Turn(direction) => {
                    self.session.handle_direction_input(direction);
                }
                ReplayInput::Restart => {
                    self.session.handle_restart_input();
                }
            }
            self.current_input_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Direction, SnakeSettings};
    use crate::replay::ReplayRecorder;

    #[test]
    fn test_step_applies_turns_before_tick() {
        let mut recorder = ReplayRecorder::new(42, SnakeSettings::default());
        recorder.record(1, ReplayInput::Turn(Direction::Down));
        let mut player = ReplayPlayer::new(recorder.finalize(3)).unwrap();

        player.step();
        assert_eq!(player.session().direction(), Direction::Right);
        assert_eq!(player.session().head().y, 5);
        player.step();
        assert_eq!(player.session().direction(), Direction::Down);
        assert_eq!(player.current_tick(), 2);
        player.step();
        assert!(player.is_finished());
        assert_eq!(player.step(), None);
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let settings = SnakeSettings {
            base_speed: 0,
            ..SnakeSettings::default()
        };
        let replay = ReplayRecorder::new(1, settings).finalize(10);
        assert!(ReplayPlayer::new(replay).is_err());
    }
}
