//! Headless match runner
//!
//! Plays full matches with every seat on autopilot and reports who wins.

use clap::{Parser, ValueEnum};
use verita_falso::core::{Difficulty, GameRng, MatchConfig, Team, TeamMap};
use verita_falso::rules::play_out;
use verita_falso::{MatchBuilder, Reducer};

/// Actions allowed per match before it is counted as unfinished.
const MAX_STEPS: usize = 100_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Level {
    Easy,
    Normal,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Normal => Difficulty::Normal,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Headless VERITA vs FALSO simulator
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Play AI-only matches and report win rates")]
struct Args {
    /// Base seed; each match forks its own seed from it
    #[arg(long)]
    seed: Option<u64>,

    /// AI difficulty
    #[arg(long, value_enum, default_value_t = Level::Normal)]
    difficulty: Level,

    /// Number of matches to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Print every match log
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let difficulty = Difficulty::from(args.difficulty);
    let reducer = Reducer::new();

    tracing::info!(base_seed, %difficulty, games = args.games, "starting simulation");

    // Each match gets its own stream forked from the base seed.
    let mut seeds = GameRng::new(base_seed);
    let mut wins: TeamMap<u32> = TeamMap::default();
    let mut unfinished = 0u32;
    let mut total_rounds = 0u64;

    for i in 0..args.games {
        let seed = seeds.fork().seed();
        let config = MatchConfig::new().with_seed(seed).with_difficulty(difficulty);
        let (state, mut rng) = MatchBuilder::from_config(config).build();
        let done = play_out(&reducer, &state, &mut rng, MAX_STEPS)?;

        if args.verbose {
            println!("=== match {} (seed {}) ===", i, seed);
            for line in done.log.lines() {
                println!("{}", line);
            }
        }

        match done.winner {
            Some(team) => {
                wins[team] += 1;
                total_rounds += u64::from(done.round);
            }
            None => {
                tracing::warn!(seed, "match hit the step cap");
                unfinished += 1;
            }
        }
    }

    let finished = args.games - unfinished;
    println!("difficulty: {}", difficulty);
    println!("base seed:  {}", base_seed);
    for team in Team::ALL {
        println!("{:<7} wins: {}", team.to_string(), wins[team]);
    }
    println!("unfinished:   {}", unfinished);
    if finished > 0 {
        println!("avg rounds:   {:.2}", total_rounds as f64 / f64::from(finished));
    }
    Ok(())
}
