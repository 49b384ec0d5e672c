//! Board game engine CLI
//!
//! Play connect four or chess against the AI on the terminal, or watch the
//! AI play itself.

mod cli;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use boardgame::{
    AppConfig, Board, Difficulty, EngineError, Game, GameKind, Pos, ScoreStore, Side, Status,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{parse_input, Cli, Command, Input};

const HELP: &str = "\
commands:
  <move>       connect four: column number (1..N); chess: e2e4, e7e8q
  moves <sq>   legal destinations of a square (chess) or column (connect four)
  undo         take back one move
  undo2        take back your move and the AI's reply
  reset        start over
  quit         leave";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,boardgame=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(kind) = cli.game {
        config.game.kind = kind;
    }
    if let Some(difficulty) = cli.difficulty {
        config.ai.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        config.ai.seed = cli.seed;
    }
    config.validate()?;
    info!(kind = %config.game.kind, difficulty = %config.ai.difficulty, "starting");

    let mut scores = config
        .scores
        .path
        .as_deref()
        .map(ScoreStore::load)
        .transpose()
        .context("loading score file")?;

    let mut game = Game::from_config(&config)?;
    match cli.command.unwrap_or(Command::Play { ai_first: false }) {
        Command::Play { ai_first } => play(&mut game, &config, ai_first, scores.as_mut()),
        Command::Selfplay {
            white,
            black,
            max_plies,
        } => {
            let white = white.unwrap_or(config.ai.difficulty);
            let black = black.unwrap_or(config.ai.difficulty);
            selfplay(&mut game, white, black, max_plies, scores.as_mut())
        }
    }
}

/// Human against the AI on stdin/stdout
fn play(
    game: &mut Game,
    config: &AppConfig,
    ai_first: bool,
    mut scores: Option<&mut ScoreStore>,
) -> Result<()> {
    let difficulty = config.ai.difficulty;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{} vs AI ({difficulty}). Type 'help' for commands.", game.kind());
    if ai_first {
        ai_turn(game, difficulty, scores.as_deref_mut())?;
    }

    loop {
        println!("\n{}", render(game.board(), &[]));
        let status = game.status();
        if status.is_terminal() {
            println!("game over ({status}); 'undo', 'reset' or 'quit'");
        } else {
            println!("{status}, {} to move", game.turn());
        }
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let Some(input) = parse_input(game.board(), &line) else {
            println!("could not read '{}'; type 'help'", line.trim());
            continue;
        };

        let submitted = match input {
            Input::Quit => return Ok(()),
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Reset => {
                game.reset();
                if ai_first {
                    ai_turn(game, difficulty, scores.as_deref_mut())?;
                }
                continue;
            }
            Input::Undo => {
                report(game.undo().map(|_| ()));
                continue;
            }
            Input::UndoPair => {
                report(game.undo_pair().map(|_| ()));
                continue;
            }
            Input::Moves(pos) => {
                let targets = game.legal_moves_for(pos);
                println!("{}", render(game.board(), &targets));
                continue;
            }
            Input::Column(col) => game.drop_in(col),
            Input::Move(mv) => game.submit(mv),
        };

        match submitted {
            Ok(status) if status.is_terminal() => finish(game, status, scores.as_deref_mut())?,
            Ok(_) => ai_turn(game, difficulty, scores.as_deref_mut())?,
            Err(err) => println!("{err}"),
        }
    }
}

/// Let the AI move if the game is still open
fn ai_turn(game: &mut Game, difficulty: Difficulty, scores: Option<&mut ScoreStore>) -> Result<()> {
    match game.play_ai_move(difficulty) {
        Ok((result, status)) => {
            println!(
                "AI plays {} ({:?}, {} nodes, {}ms)",
                describe(game.kind(), result.best_move.from, result.best_move.to),
                result.search_type,
                result.nodes,
                result.time_ms
            );
            if status.is_terminal() {
                finish(game, status, scores)?;
            }
            Ok(())
        }
        Err(EngineError::GameOver) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// AI against AI
fn selfplay(
    game: &mut Game,
    white: Difficulty,
    black: Difficulty,
    max_plies: usize,
    scores: Option<&mut ScoreStore>,
) -> Result<()> {
    println!("{} selfplay: white {white}, black {black}", game.kind());
    for ply in 1..=max_plies {
        let difficulty = match game.turn() {
            Side::White => white,
            Side::Black => black,
        };
        let (result, status) = game.play_ai_move(difficulty)?;
        println!(
            "{ply:>3}. {} ({:?})",
            describe(game.kind(), result.best_move.from, result.best_move.to),
            result.search_type
        );
        if status.is_terminal() {
            println!("\n{}", render(game.board(), &[]));
            return finish(game, status, scores);
        }
    }
    println!("\n{}", render(game.board(), &[]));
    warn!(max_plies, "selfplay stopped before the game ended");
    println!("stopped after {max_plies} plies");
    Ok(())
}

/// Announce the outcome and bank it in the score file
fn finish(game: &Game, status: Status, scores: Option<&mut ScoreStore>) -> Result<()> {
    println!("\n{}", render(game.board(), &[]));
    println!("game over: {status}");
    if let Some(line) = game.winning_line() {
        let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
        println!("winning line: {}", cells.join(" "));
    }
    if let Some(store) = scores {
        store.record(game.kind(), status);
        store.save().context("saving scores")?;
        let totals = store.get(game.kind());
        println!(
            "score: white {} / black {} / draws {}",
            totals.white, totals.black, totals.draws
        );
    }
    Ok(())
}

fn report(result: Result<(), EngineError>) {
    if let Err(err) = result {
        println!("{err}");
    }
}

fn describe(kind: GameKind, from: Option<Pos>, to: Pos) -> String {
    match (kind, from) {
        (GameKind::ConnectFour, _) | (_, None) => format!("column {}", to.col + 1),
        (GameKind::Chess, Some(from)) => format!("{}{}", from.to_algebraic(), to.to_algebraic()),
    }
}

/// Board with coordinates. Marked empty cells show `*`, marked occupied
/// cells (captures) show `x`.
fn render(board: &Board, marks: &[Pos]) -> String {
    let mut out = String::new();
    for row in 0..board.rows() {
        if board.kind() == GameKind::Chess {
            out.push_str(&format!("{} ", board.rows() - row));
        }
        for col in 0..board.cols() {
            let pos = Pos::new(row, col);
            let cell = board.piece_at(pos);
            let glyph = match (marks.contains(&pos), cell.is_empty()) {
                (true, true) => '*',
                (true, false) => 'x',
                (false, _) => cell.glyph(),
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    match board.kind() {
        GameKind::Chess => out.push_str("  a b c d e f g h"),
        GameKind::ConnectFour => {
            let labels: Vec<String> = (1..=board.cols()).map(|c| (c % 10).to_string()).collect();
            out.push_str(&labels.join(" "));
        }
    }
    out
}
