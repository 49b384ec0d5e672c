//! Command-line interface for the boardgame binary.

use std::path::PathBuf;

use boardgame::{Board, Difficulty, GameKind, Move, PieceKind, Pos};
use clap::{Parser, Subcommand};

/// Connect four and chess against a seedable AI opponent
#[derive(Parser, Debug)]
#[command(name = "boardgame")]
#[command(about = "Connect four and chess against a seedable AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(short, long, default_value = "boardgame.toml")]
    pub config: PathBuf,

    /// Game to play: connect4 or chess
    #[arg(short, long)]
    pub game: Option<GameKind>,

    /// AI difficulty: easy, medium, hard, expert (or 1-4)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Seed for the AI's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Debug logging for the engine
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play against the AI on stdin/stdout
    Play {
        /// Let the AI make the first move
        #[arg(long)]
        ai_first: bool,
    },

    /// Let the AI play both sides
    Selfplay {
        /// Difficulty for the first side (defaults to the configured one)
        #[arg(long)]
        white: Option<Difficulty>,

        /// Difficulty for the second side (defaults to the configured one)
        #[arg(long)]
        black: Option<Difficulty>,

        /// Stop after this many plies
        #[arg(long, default_value = "200")]
        max_plies: usize,
    },
}

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Move(Move),
    /// Connect-four column (0-based)
    Column(u8),
    Undo,
    UndoPair,
    Reset,
    /// Highlight the legal destinations of a square or column
    Moves(Pos),
    Help,
    Quit,
}

/// Parse a line of player input for the given board.
///
/// Connect four takes 1-based column numbers. Chess takes coordinate moves
/// such as `e2e4`, `e2 e4` or `e7e8n`.
pub fn parse_input(board: &Board, line: &str) -> Option<Input> {
    let line = line.trim().to_ascii_lowercase();
    let mut words = line.split_whitespace();
    let first = words.next()?;
    match first {
        "undo" => return Some(Input::Undo),
        "undo2" => return Some(Input::UndoPair),
        "reset" => return Some(Input::Reset),
        "help" | "?" => return Some(Input::Help),
        "quit" | "exit" | "q" => return Some(Input::Quit),
        "moves" => {
            let target = words.next()?;
            return match board.kind() {
                GameKind::ConnectFour => {
                    parse_column(board, target).map(|col| Input::Moves(Pos::new(0, col)))
                }
                GameKind::Chess => Pos::from_algebraic(target).map(Input::Moves),
            };
        }
        _ => {}
    }

    match board.kind() {
        GameKind::ConnectFour => parse_column(board, first).map(Input::Column),
        GameKind::Chess => {
            let text: String = line.split_whitespace().collect();
            parse_chess_move(&text).map(Input::Move)
        }
    }
}

fn parse_column(board: &Board, text: &str) -> Option<u8> {
    let col: u8 = text.parse().ok()?;
    (1..=board.cols()).contains(&col).then(|| col - 1)
}

/// Parse `e2e4` or `e7e8q`
pub fn parse_chess_move(text: &str) -> Option<Move> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let from = Pos::from_algebraic(&text[0..2])?;
    let to = Pos::from_algebraic(&text[2..4])?;
    let promotion = match text.chars().nth(4) {
        Some(letter) => Some(PieceKind::from_letter(letter)?),
        None => None,
    };
    Some(Move { from: Some(from), to, promotion })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chess_input() {
        let board = Board::new(GameKind::Chess);
        let e2 = Pos::from_algebraic("e2").unwrap();
        let e4 = Pos::from_algebraic("e4").unwrap();
        assert_eq!(parse_input(&board, "e2e4"), Some(Input::Move(Move::step(e2, e4))));
        assert_eq!(parse_input(&board, " E2 e4 "), Some(Input::Move(Move::step(e2, e4))));
        assert_eq!(parse_input(&board, "moves e2"), Some(Input::Moves(e2)));
        assert_eq!(parse_input(&board, "e9e4"), None);
        assert_eq!(
            parse_chess_move("a7a8n"),
            Some(Move::promote(
                Pos::from_algebraic("a7").unwrap(),
                Pos::from_algebraic("a8").unwrap(),
                PieceKind::Knight
            ))
        );
        assert_eq!(parse_chess_move("a7a8x"), None);
    }

    #[test]
    fn test_parse_connect_input() {
        let board = Board::new(GameKind::ConnectFour);
        assert_eq!(parse_input(&board, "4"), Some(Input::Column(3)));
        assert_eq!(parse_input(&board, "0"), None);
        assert_eq!(parse_input(&board, "8"), None);
        assert_eq!(parse_input(&board, "moves 1"), Some(Input::Moves(Pos::new(0, 0))));
    }

    #[test]
    fn test_parse_commands() {
        let board = Board::new(GameKind::ConnectFour);
        assert_eq!(parse_input(&board, "undo"), Some(Input::Undo));
        assert_eq!(parse_input(&board, "undo2"), Some(Input::UndoPair));
        assert_eq!(parse_input(&board, "reset"), Some(Input::Reset));
        assert_eq!(parse_input(&board, "quit"), Some(Input::Quit));
        assert_eq!(parse_input(&board, ""), None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "boardgame",
            "--game",
            "chess",
            "--difficulty",
            "expert",
            "--seed",
            "9",
            "selfplay",
            "--max-plies",
            "10",
        ]);
        assert_eq!(cli.game, Some(GameKind::Chess));
        assert_eq!(cli.difficulty, Some(Difficulty::Expert));
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(
            cli.command,
            Some(Command::Selfplay { max_plies: 10, .. })
        ));
    }
}
