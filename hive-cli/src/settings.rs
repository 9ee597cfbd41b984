//! Settings file shared by all commands
//!
//! Every field is optional in the JSON; missing ones take the defaults of
//! the browser editor. Command-line flags override file values.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hive_core::{BoardState, Color, Variant};
use hive_engine::EngineConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side played by the engine, if any
    pub ai: Option<Color>,
    pub board: String,
    pub next: Color,
    /// Optional bugs in play, e.g. `"lm"`
    pub variant: String,
    pub size: f64,
    /// Write the piece names under every stack
    pub label: bool,
    /// Tile outlines and labels; a center mark when off
    pub grid: bool,
    pub engine: EngineConfig,
    /// Named boards usable as `*name`
    pub aliases: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai: None,
            board: String::new(),
            next: Color::White,
            variant: String::new(),
            size: 40.0,
            label: false,
            grid: true,
            engine: EngineConfig::default(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Variant from `flag`, falling back to the file value
    pub fn variant(&self, flag: Option<&str>) -> Result<Variant> {
        let text = flag.unwrap_or(&self.variant);
        text.parse()
            .with_context(|| format!("Invalid variant: {text:?}"))
    }

    /// Board for `text` (or the settings board) with the alias table loaded
    pub fn board_state(&self, variant: Variant, text: Option<&str>) -> Result<BoardState> {
        let mut board = BoardState::new(variant);
        for (name, alias) in &self.aliases {
            board.register_alias(name.clone(), alias.clone());
        }
        let text = text.unwrap_or(&self.board);
        board
            .parse(text)
            .with_context(|| format!("Invalid board: {text:?}"))?;
        Ok(board)
    }
}
