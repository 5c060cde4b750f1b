use std::path::PathBuf;

use clap::Parser;
use snake_common::config::ConfigManager;
use snake_common::games::SessionRng;
use snake_common::games::snake::{
    BotController, BotType, GameSession, SessionState, SnakeSettings, TickOutcome,
};
use snake_common::replay::{ReplayInput, ReplayRecorder, save_replay};
use snake_common::{log, logger};

#[derive(Parser)]
#[command(name = "snake_simulator", about = "Plays snake rounds headlessly with a bot driver")]
struct Args {
    /// YAML settings file; defaults are used when it does not exist
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound on ticks across all rounds
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    #[arg(long, default_value_t = BotType::Greedy)]
    bot: BotType,

    /// Rounds to play before stopping
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    #[arg(long)]
    replay_out: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,
}

struct RoundSummary {
    score: u32,
    speed: u32,
    ticks: u64,
    state: SessionState,
}

fn summarize(session: &GameSession) -> RoundSummary {
    RoundSummary {
        score: session.score(),
        speed: session.speed(),
        ticks: session.ticks(),
        state: session.state(),
    }
}

fn load_settings(args: &Args) -> Result<SnakeSettings, String> {
    match &args.config {
        Some(path) => ConfigManager::<_, SnakeSettings>::from_yaml_file(path.clone()).get_config(),
        None => Ok(SnakeSettings::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Simulator".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = load_settings(&args)?;
    let game_rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let seed = game_rng.seed();
    let mut bot_rng = SessionRng::new(seed.wrapping_add(1));

    log!(
        "Starting {} round(s) on a {} field with the {} bot, seed {}",
        args.rounds,
        settings.field_size(),
        args.bot,
        seed
    );

    let mut session = GameSession::new(settings.clone(), game_rng)?;
    let mut recorder = ReplayRecorder::new(seed, settings);
    let mut summaries = Vec::new();
    let mut last_speed = session.speed();
    let mut tick = 0u64;

    while tick < args.ticks {
        if session.is_terminal() {
            summaries.push(summarize(&session));
            if summaries.len() as u32 >= args.rounds {
                break;
            }
            session.handle_restart_input();
            recorder.record(tick, ReplayInput::Restart);
            last_speed = session.speed();
        }

        if let Some(direction) = BotController::calculate_move(args.bot, &session, &mut bot_rng) {
            if direction != session.direction() && session.handle_direction_input(direction) {
                recorder.record(tick, ReplayInput::Turn(direction));
            }
        }

        if let TickOutcome::Ate { progress } = session.tick() {
            if progress.speed != last_speed {
                log!(
                    "Speed now {} (tick interval {:?}, next level at {:?})",
                    progress.speed,
                    session.tick_interval(),
                    session.settings().speed_table().next_threshold(progress.score)
                );
                last_speed = progress.speed;
            }
        }
        tick += 1;
    }

    if !session.is_terminal() {
        log!("Tick limit {} reached with the round still running", args.ticks);
    }
    if !session.is_terminal() || (summaries.len() as u32) < args.rounds {
        summaries.push(summarize(&session));
    }

    for (index, summary) in summaries.iter().enumerate() {
        log!(
            "Round {}: {:?}, score {}, speed {}, {} ticks",
            index + 1,
            summary.state,
            summary.score,
            summary.speed,
            summary.ticks
        );
    }
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    log!("Best score: {}", best);

    if let Some(path) = args.replay_out {
        let replay = recorder.finalize(tick);
        save_replay(&path, &replay)?;
        log!("Replay with {} inputs saved to: {}", replay.inputs.len(), path.display());
    }

    Ok(())
}
