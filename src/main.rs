use std::io;

use clap::Parser;
use rankfile::chess::core::Player;
use rankfile::chess::game::Game;
use rankfile::search::Depth;
use rankfile::Engine;

const MAX_DEPTH: i64 = 64;

/// Chess rules engine reading commands from stdin, one per line: `position
/// startpos|<fen>`, `move <san>` or just `<san>`, `side w|b|none`, `go`,
/// `selfplay [plies]`, `perft <depth>`, `divide <depth>`, `moves`, `fen`,
/// `d`, `resign`, `quit`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Initial position in FEN.
    #[arg(long)]
    fen: Option<String>,
    /// Search depth in plies for computer moves.
    #[arg(
        long,
        default_value_t = rankfile::engine::DEFAULT_DEPTH,
        value_parser = clap::value_parser!(u8).range(1..=MAX_DEPTH)
    )]
    depth: Depth,
    /// The side the computer plays: 'w' or 'b'.
    #[arg(long, value_parser = parse_player)]
    computer: Option<Player>,
    /// Seed for choosing among equally good computer moves.
    #[arg(long)]
    seed: Option<u64>,
    /// Print perft statistics for every depth up to N and exit.
    #[arg(long, value_name = "N")]
    perft: Option<Depth>,
}

fn parse_player(input: &str) -> anyhow::Result<Player> {
    Player::try_from(input)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    rankfile::print_engine_info();

    let mut game = match &config.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    if let Some(depth) = config.perft {
        for (depth, result) in (1..).zip(game.test_gen_moves(depth)?) {
            println!("perft {depth}: {result}");
        }
        return Ok(());
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = Engine::new(&mut input, &mut output)
        .with_game(game)
        .with_depth(config.depth)
        .with_computer(config.computer);
    if let Some(seed) = config.seed {
        engine = engine.with_seed(seed);
    }
    engine.run()
}
