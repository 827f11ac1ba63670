//! Othello-Minimax: play Othello against a negamax engine.
//!
//! ## Usage
//!
//! - `othello` - Show a demo game between two engines
//! - `othello play` - Play against the engine on the console
//! - `othello match` - Measure the win rate of one strategy against another
//! - `othello selfplay` - Print self-play training samples as JSON lines

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use othello_minimax::board::Player;
use othello_minimax::console::{ConsoleStrategy, render};
use othello_minimax::constants::{DEFAULT_DEPTH, MATCH_GAMES, SELFPLAY_DEPTH};
use othello_minimax::game::{Game, GameState, win_rate};
use othello_minimax::selfplay::SelfPlay;
use othello_minimax::strategy::{Matchup, MinimaxStrategy, RandomStrategy, Strategy};

/// Othello-Minimax: an Othello engine with a negamax player
#[derive(Parser)]
#[command(name = "othello")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on the console
    Play {
        /// Engine search depth
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Side played by the human
        #[arg(long, value_enum, default_value_t = Side::Black)]
        color: Side,
        /// Seed for the engine's tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Win rate of the black strategy against the white one
    Match {
        /// Black strategy: `random` or `minimax:<depth>`
        #[arg(long, default_value = "minimax:1")]
        black: StrategyKind,
        /// White strategy: `random` or `minimax:<depth>`
        #[arg(long, default_value = "random")]
        white: StrategyKind,
        /// Number of games
        #[arg(long, default_value_t = MATCH_GAMES)]
        games: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print self-play training samples as JSON lines
    Selfplay {
        /// Number of samples
        #[arg(long, default_value_t = 100)]
        samples: usize,
        /// Search depth of the self-playing engine
        #[arg(long, default_value_t = SELFPLAY_DEPTH)]
        depth: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Engine against engine, printed move by move
    Demo {
        #[arg(long, default_value_t = 2)]
        depth: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::Black => Player::Black,
            Side::White => Player::White,
        }
    }
}

/// A strategy named on the command line.
#[derive(Clone, Copy, Debug)]
enum StrategyKind {
    Random,
    Minimax(u32),
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None if s == "random" => Ok(StrategyKind::Random),
            None if s == "minimax" => Ok(StrategyKind::Minimax(DEFAULT_DEPTH)),
            Some(("minimax", depth)) => Ok(StrategyKind::Minimax(
                depth.parse().with_context(|| format!("invalid depth '{depth}'"))?,
            )),
            _ => bail!("unknown strategy '{s}', expected `random` or `minimax:<depth>`"),
        }
    }
}

impl StrategyKind {
    fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match (self, seed) {
            (StrategyKind::Random, Some(s)) => Box::new(RandomStrategy::with_seed(s)),
            (StrategyKind::Random, None) => Box::new(RandomStrategy::new()),
            (StrategyKind::Minimax(d), Some(s)) => Box::new(MinimaxStrategy::new(d).with_seed(s)),
            (StrategyKind::Minimax(d), None) => Box::new(MinimaxStrategy::new(d)),
        }
    }
}

fn minimax(depth: u32, seed: Option<u64>) -> MinimaxStrategy {
    let engine = MinimaxStrategy::new(depth);
    match seed {
        Some(s) => engine.with_seed(s),
        None => engine,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).context("initialising logger")?;

    match cli.command {
        Some(Commands::Play { depth, color, seed }) => run_play(depth, color.into(), seed),
        Some(Commands::Match {
            black,
            white,
            games,
            seed,
        }) => run_match(black, white, games, seed),
        Some(Commands::Selfplay {
            samples,
            depth,
            seed,
        }) => run_selfplay(samples, depth, seed),
        Some(Commands::Demo { depth, seed }) => run_demo(depth, seed),
        None => run_demo(2, None),
    }
}

fn run_play(depth: u32, human: Player, seed: Option<u64>) -> Result<()> {
    let console = ConsoleStrategy::new(io::stdin().lock(), io::stdout());
    let engine = minimax(depth, seed);
    info!("human plays {human}, engine depth {}", engine.depth());

    let result = match human {
        Player::Black => Game::new().play_out(&mut Matchup::new(console, engine))?,
        Player::White => Game::new().play_out(&mut Matchup::new(engine, console))?,
    };

    println!("\n{}", render(&result.board, &[], None));
    match result.winner {
        Some(p) if p == human => println!("You win!"),
        Some(_) => println!("The engine wins."),
        None => println!("Draw."),
    }
    Ok(())
}

fn run_match(black: StrategyKind, white: StrategyKind, games: usize, seed: Option<u64>) -> Result<()> {
    let white_seed = seed.map(|s| s.wrapping_add(1));
    let rate = win_rate(black.build(seed), white.build(white_seed), games)?;
    println!("black {black:?} vs white {white:?} over {games} games");
    println!("Winrate: {:.1}%", rate * 100.0);
    Ok(())
}

fn run_selfplay(samples: usize, depth: u32, seed: Option<u64>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut generator = SelfPlay::new(minimax(depth, seed));

    for sample in generator.by_ref().take(samples) {
        serde_json::to_writer(&mut out, &sample?)?;
        writeln!(out)?;
    }
    info!("{samples} samples from {} games", generator.games_played());
    Ok(())
}

fn run_demo(depth: u32, seed: Option<u64>) -> Result<()> {
    println!("Othello-Minimax: negamax engine demo (depth {depth})\n");

    let mut engine = minimax(depth, seed);
    let mut game = Game::new();
    while let GameState::AwaitingMove(player) = game.state() {
        game.advance(&mut engine)?;
        if let Some(turn) = game.history().last() {
            println!("{player} plays {}", turn.coord);
            println!("{}", render(game.board(), &[], Some(turn.coord)));
        }
    }

    let result = game.result().context("game should be over")?;
    let (black, white) = result.score();
    match result.winner {
        Some(p) => println!("{p} wins {black}-{white}"),
        None => println!("draw {black}-{white}"),
    }
    Ok(())
}
