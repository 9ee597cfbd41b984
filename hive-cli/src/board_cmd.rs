//! Board command - parse, edit and transform a board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: apply_moves(), apply_transforms()
//! - Level 3: (delegated to hive-core BoardState)
//! - Level 4: argument types

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hive_core::{BoardState, Rotation};

use crate::settings::Settings;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Board text or `*alias` (defaults to the settings board)
    pub text: Option<String>,

    /// Optional bugs in play, e.g. `lmp`
    #[arg(long)]
    pub variant: Option<String>,

    /// Move the top piece of FROM onto TO (repeatable)
    #[arg(long = "move", num_args = 2, value_names = ["FROM", "TO"])]
    pub moves: Vec<String>,

    /// Whole-board transforms, applied in order after the moves
    #[arg(long = "apply", value_enum)]
    pub transforms: Vec<Transform>,

    /// Also print the off-board pools
    #[arg(long)]
    pub full: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Transform {
    Center,
    Flip,
    RotateLeft,
    RotateRight,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: BoardArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.as_deref())?;
    let mut board = settings.board_state(variant, args.text.as_deref())?;

    apply_moves(&mut board, &args.moves)?;
    apply_transforms(&mut board, &args.transforms);

    println!("{}", board.text(args.full));
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply `[from, to, from, to, ...]` in order
fn apply_moves(board: &mut BoardState, moves: &[String]) -> Result<()> {
    for pair in moves.chunks(2) {
        let [from, to] = pair else {
            anyhow::bail!("--move takes a FROM and a TO");
        };
        let piece = board
            .apply_move(from, to)
            .with_context(|| format!("Cannot move {from} to {to}"))?;
        tracing::debug!(piece = %piece, from = %from, to = %to, "moved");
    }
    Ok(())
}

fn apply_transforms(board: &mut BoardState, transforms: &[Transform]) {
    for transform in transforms {
        match transform {
            Transform::Center => board.center(),
            Transform::Flip => board.flip(),
            Transform::RotateLeft => board.rotate(Rotation::Left),
            Transform::RotateRight => board.rotate(Rotation::Right),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hive_core::Variant;

    fn board(text: &str) -> BoardState {
        let mut board = BoardState::new(Variant::default());
        board.parse(text).unwrap();
        board
    }

    #[test]
    fn test_moves_then_transforms() {
        let mut b = board("wQ+0+0");
        let moves = ["@bQ", "+1+0"].map(String::from);
        apply_moves(&mut b, &moves).unwrap();
        apply_transforms(&mut b, &[Transform::RotateLeft]);
        assert_eq!(b.text(false), "wQ+0+0 bQ+1-1");
    }

    #[test]
    fn test_bad_move_is_reported() {
        let mut b = board("wQ+0+0");
        let moves = ["+5+5", "+0+1"].map(String::from);
        assert!(apply_moves(&mut b, &moves).is_err());
        assert_eq!(b.text(false), "wQ+0+0");
    }

    #[test]
    fn test_center_twice_is_stable() {
        let mut b = board("bQ+2+2 wQ+4+4");
        apply_transforms(&mut b, &[Transform::Center, Transform::Center]);
        assert_eq!(b.text(false), "wQ+1+1 bQ-1-1");
    }
}
