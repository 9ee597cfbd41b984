//! Play command - interactive session against an engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_engine(), play_session()
//! - Level 3: handle_input(), report()
//! - Level 4: input parsing

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use hive_core::{BoardState, Color};
use hive_engine::{EngineConfig, EngineConnection, EngineSession, Event, SessionError, Transport};

use crate::settings::Settings;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Starting board text or `*alias` (defaults to the settings board)
    pub text: Option<String>,

    /// Optional bugs in play, e.g. `lmp`
    #[arg(long)]
    pub variant: Option<String>,

    /// Engine address as host:port
    #[arg(long)]
    pub engine: Option<String>,

    /// Side played by the engine
    #[arg(long)]
    pub ai: Option<Color>,

    /// Side to move first
    #[arg(long)]
    pub next: Option<Color>,
}

/// One line typed at the prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move { from: String, to: String },
    Pass,
    Center,
    Board,
    Moves,
    Quit,
    Empty,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, settings: &Settings) -> Result<()> {
    let config = configure_engine(&args, settings);
    let variant = settings.variant(args.variant.as_deref())?;
    let board = settings.board_state(variant, args.text.as_deref())?;
    let next = args.next.unwrap_or(settings.next);
    let ai = args.ai.or(settings.ai);

    tracing::info!("Connecting to engine at {}", config.address);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(play_session(config, board, next, ai))
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_engine(args: &PlayArgs, settings: &Settings) -> EngineConfig {
    match &args.engine {
        Some(address) => settings.engine.clone().with_address(address.clone()),
        None => settings.engine.clone(),
    }
}

async fn play_session(
    config: EngineConfig,
    board: BoardState,
    next: Color,
    ai: Option<Color>,
) -> Result<()> {
    let mut conn = EngineConnection::connect(&config, board)
        .await
        .with_context(|| format!("Failed to connect to engine at {}", config.address))?;

    conn.session_mut().start(next, ai)?;
    report(&conn.settle().await?, conn.session());

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(input) => {
                if handle_input(conn.session_mut(), &input)? {
                    report(&conn.settle().await?, conn.session());
                } else if input == Input::Board {
                    print_board(conn.session());
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    conn.session_mut().disconnect();
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Issue the commands for `input`; true if anything was sent
///
/// Illegal moves are reported and leave the session as it was.
fn handle_input<T: Transport>(session: &mut EngineSession<T>, input: &Input) -> Result<bool> {
    let result = match input {
        Input::Move { from, to } => session.request_move(from, to),
        Input::Pass => session.pass(),
        Input::Center => session.center(),
        Input::Moves => {
            println!("{}", session.legal_moves().join(" "));
            return Ok(false);
        }
        Input::Board | Input::Quit | Input::Empty => return Ok(false),
    };
    match result {
        Ok(()) => Ok(true),
        Err(SessionError::IllegalMove(mv)) => {
            eprintln!("illegal move: {mv}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn report<T: Transport>(events: &[Event], session: &EngineSession<T>) {
    for event in events {
        match event {
            Event::BoardUpdated { .. } => print_board(session),
            Event::MovesUpdated(count) => println!("{count} legal moves"),
            Event::Acknowledged(command) => tracing::debug!(%command, "acknowledged"),
            Event::Failed(e) => eprintln!("engine: {e}"),
        }
    }
}

fn print_board<T: Transport>(session: &EngineSession<T>) {
    println!(":{} {}", session.next_to_move().letter(), session.board().text(false));
}

// ============================================================================
// LEVEL 4 - INPUT PARSING
// ============================================================================

pub fn parse_input(line: &str) -> Result<Input> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let input = match words.as_slice() {
        [] => Input::Empty,
        ["quit"] | ["exit"] => Input::Quit,
        ["pass"] => Input::Pass,
        ["center"] => Input::Center,
        ["board"] => Input::Board,
        ["moves"] => Input::Moves,
        [from, to] => Input::Move {
            from: from.to_string(),
            to: to.to_string(),
        },
        _ => anyhow::bail!("expected `<from> <to>`, pass, center, board, moves or quit"),
    };
    Ok(input)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hive_core::Variant;
    use hive_engine::TransportError;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Transport for Recorder {
        fn send(&mut self, line: &str) -> Result<(), TransportError> {
            self.0.push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  ").unwrap(), Input::Empty);
        assert_eq!(parse_input("quit").unwrap(), Input::Quit);
        assert_eq!(
            parse_input("@wQ +0+0").unwrap(),
            Input::Move {
                from: "@wQ".to_string(),
                to: "+0+0".to_string()
            }
        );
        assert!(parse_input("a b c").is_err());
    }

    #[test]
    fn test_illegal_input_sends_nothing() {
        let mut session = EngineSession::new(Recorder::default(), BoardState::new(Variant::default()));
        let input = parse_input("@wQ +0+0").unwrap();
        assert!(!handle_input(&mut session, &input).unwrap());
        assert!(session.transport().0.is_empty());
    }

    #[test]
    fn test_center_input_is_sent() {
        let mut session = EngineSession::new(Recorder::default(), BoardState::new(Variant::default()));
        assert!(handle_input(&mut session, &Input::Center).unwrap());
        assert_eq!(session.transport().0, vec!["center\n"]);
    }

    #[test]
    fn test_engine_flag_overrides_settings() {
        let args = PlayArgs {
            text: None,
            variant: None,
            engine: Some("127.0.0.1:9999".to_string()),
            ai: None,
            next: None,
        };
        let config = configure_engine(&args, &Settings::default());
        assert_eq!(config.address, "127.0.0.1:9999");
        assert_eq!(config.connect_timeout_ms, 5000);
    }
}
