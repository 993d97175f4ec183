use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use twenty48_core::*;

/// Plays games with uniformly random moves and reports how they went.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Seed of the first game, game N is seeded with seed + N
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u64,

    /// JSON file holding a game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final board of every game
    #[arg(long)]
    boards: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Default)]
struct Summary {
    games: u64,
    wins: u64,
    losses: u64,
    total_score: Score,
    largest_tile: Tile,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config.normalized())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = load_config(cli.config.as_ref())?;
    log::info!("Playing {} games with {:?}", cli.games, config);

    let mut store = MemoryStore::default();
    let mut summary = Summary::default();

    for n in 0..cli.games {
        let seed = cli.seed.wrapping_add(n);
        let mut chooser = SeededRandom::new(!seed);
        let mut game = Game::new(config, SeededRandom::new(seed), &mut store);

        let mut moves = 0u64;
        while !game.is_finished() {
            let available = game.available_moves();
            // a dead board is only marked lost once a move is attempted
            let direction = match available.len() {
                0 => Direction::Left,
                len => available[((chooser.next_float() * len as f64) as usize).min(len - 1)],
            };
            game.make_move(direction);
            moves += 1;
        }

        let status = game.status();
        let score = game.score();
        let max_tile = game.board().max_tile();
        log::info!(
            "Game {} (seed {}): {} after {} moves, score {}, largest tile {}",
            n,
            seed,
            status.as_str(),
            moves,
            score,
            max_tile
        );
        if cli.boards {
            println!("{}", game.board());
        }

        summary.games += 1;
        summary.total_score += score;
        summary.largest_tile = summary.largest_tile.max(max_tile);
        match status {
            GameStatus::Won => summary.wins += 1,
            GameStatus::Lost => summary.losses += 1,
            _ => {}
        }
    }

    let average = summary.total_score.checked_div(summary.games).unwrap_or(0);
    println!("games:         {}", summary.games);
    println!("wins:          {}", summary.wins);
    println!("losses:        {}", summary.losses);
    println!("average score: {}", average);
    println!("best score:    {}", store.highscore());
    println!("largest tile:  {}", summary.largest_tile);
    Ok(())
}
