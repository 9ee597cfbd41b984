//! Board state: stacks of pieces on axial positions and off-board pools
//!
//! The board text format is the interchange format with the engine and for
//! saved boards:
//!
//! ```text
//! wQ+0+0 bS1bQ+1+0 wA2wA3@wA
//! ```
//!
//! Each token lists a stack top first followed by its location; pools are
//! only written in full mode.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::BoardError;
use crate::notation::{self, Names};
use crate::occupancy::{Location, Occupancy};
use crate::pieces::{Pool, Variant};
use crate::position::{AxialPosition, Rotation};

/// Classification of a free-edit drag and drop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMove {
    /// Dropped where it was picked up
    Null,
    Legal,
    Illegal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    variant: Variant,
    /// Every piece name in play, sorted
    roster: Vec<String>,
    occupancy: Occupancy,
    aliases: FxHashMap<String, String>,
}

impl BoardState {
    /// New board with every piece off-board
    pub fn new(variant: Variant) -> Self {
        let mut board = Self {
            variant,
            roster: variant.roster(),
            occupancy: Occupancy::default(),
            aliases: FxHashMap::default(),
        };
        board.reset();
        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// All piece names, sorted
    pub fn pieces(&self) -> &[String] {
        &self.roster
    }

    pub fn position_of(&self, piece: &str) -> Option<Location> {
        self.occupancy.location_of(piece)
    }

    /// Stack at `location`, top first
    pub fn stack(&self, location: &Location) -> &[String] {
        self.occupancy.stack(location)
    }

    pub fn top(&self, location: &Location) -> Option<&str> {
        self.stack(location).first().map(String::as_str)
    }

    /// Occupied on-board positions, unordered
    pub fn occupied(&self) -> impl Iterator<Item = AxialPosition> + '_ {
        self.occupancy.stacks().filter_map(|(loc, _)| match loc {
            Location::Board(pos) => Some(*pos),
            Location::Pool(_) => None,
        })
    }

    pub fn register_alias(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.aliases.insert(name.into(), text.into());
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Return every piece to its pool
    pub fn reset(&mut self) {
        self.occupancy.clear();
        for piece in &self.roster {
            if let Some(pool) = Pool::of_piece(piece) {
                self.occupancy.insert(piece.clone(), Location::Pool(pool));
            }
        }
    }

    /// Set the stack at `location` to `pieces`, top first
    ///
    /// The named pieces leave wherever they were. Previous occupants of an
    /// on-board stack that are not named go back to their pools. A pool only
    /// accepts its own pieces and stays sorted.
    pub fn place<S: AsRef<str>>(&mut self, location: Location, pieces: &[S]) -> Result<(), BoardError> {
        self.check_location(&location)?;
        for piece in pieces {
            let piece = piece.as_ref();
            let pool = self.pool_of(piece)?;
            if matches!(location, Location::Pool(target) if target != pool) {
                return Err(BoardError::ForeignPool {
                    piece: piece.to_string(),
                    pool: location.to_string(),
                });
            }
        }

        if location.is_pool() {
            for piece in pieces {
                self.occupancy.insert(piece.as_ref().to_string(), location);
            }
            return Ok(());
        }

        let displaced = self.occupancy.take_stack(&location);
        for piece in pieces.iter().rev() {
            self.occupancy.insert(piece.as_ref().to_string(), location);
        }
        for piece in displaced {
            if self.occupancy.location_of(&piece).is_none() {
                if let Some(pool) = Pool::of_piece(&piece) {
                    self.occupancy.insert(piece, Location::Pool(pool));
                }
            }
        }
        Ok(())
    }

    /// Move the top piece of `from` onto `to`, returning its name
    pub fn move_piece(&mut self, from: &Location, to: &Location) -> Result<String, BoardError> {
        self.check_location(to)?;
        let piece = self
            .top(from)
            .ok_or_else(|| BoardError::EmptySource(from.to_string()))?
            .to_string();
        if let Location::Pool(target) = to {
            if Pool::of_piece(&piece) != Some(*target) {
                return Err(BoardError::ForeignPool {
                    piece,
                    pool: to.to_string(),
                });
            }
        }
        self.occupancy.pop_top(from);
        self.occupancy.insert(piece.clone(), *to);
        Ok(piece)
    }

    /// [`move_piece`](Self::move_piece) on location strings
    pub fn apply_move(&mut self, from: &str, to: &str) -> Result<String, BoardError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.move_piece(&from, &to)
    }

    /// Replace the board with the one described by `text`
    ///
    /// Parsing starts from a reset board. On error the board is unchanged.
    pub fn parse(&mut self, text: &str) -> Result<(), BoardError> {
        let text = self.expand_alias(text)?.to_string();
        let mut scratch = self.clone();
        scratch.reset();

        let mut targeted = FxHashSet::default();
        for token in notation::scan(&text)? {
            let location = scratch.resolve(token.location)?;
            if !targeted.insert(location) {
                return Err(BoardError::DuplicatePosition(location.to_string()));
            }
            match token.names {
                Names::Pieces(pieces) => scratch.place(location, &pieces)?,
                Names::Top(requested) => {
                    if !location.is_pool() {
                        return Err(BoardError::Parse {
                            token: format!("{}{}", requested, token.location),
                        });
                    }
                    let available = scratch.stack(&location).len();
                    if requested > available {
                        return Err(BoardError::PoolUnderflow {
                            pool: location.to_string(),
                            requested,
                            available,
                        });
                    }
                }
            }
        }

        *self = scratch;
        Ok(())
    }

    /// Board text, one token per non-empty stack sorted by location text
    pub fn text(&self, include_off_board: bool) -> String {
        let mut tokens: Vec<(String, String)> = self
            .occupancy
            .stacks()
            .filter(|(loc, stack)| !stack.is_empty() && (include_off_board || !loc.is_pool()))
            .map(|(loc, stack)| (loc.to_string(), stack.concat()))
            .collect();
        tokens.sort();
        tokens
            .into_iter()
            .map(|(loc, names)| names + &loc)
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ========================================================================
    // WHOLE-BOARD TRANSFORMS
    // ========================================================================

    /// Shift the board so that the rounded centroid of its stacks is the origin
    pub fn center(&mut self) {
        let (count, sum_c, sum_r) = self
            .occupied()
            .fold((0i64, 0i64, 0i64), |(n, c, r), pos| {
                (n + 1, c + i64::from(pos.col), r + i64::from(pos.row))
            });
        if count == 0 {
            return;
        }
        let dc = round_half_up(sum_c, count);
        let dr = round_half_up(sum_r, count);
        if dc == 0 && dr == 0 {
            return;
        }
        self.transform(|pos| pos.shift(-dc, -dr));
    }

    /// Flip the board around its horizontal axis
    pub fn flip(&mut self) {
        self.transform(|pos| pos.flip());
    }

    pub fn rotate(&mut self, direction: Rotation) {
        self.transform(|pos| pos.rotate(direction));
    }

    fn transform<F>(&mut self, f: F)
    where
        F: Fn(AxialPosition) -> AxialPosition,
    {
        self.occupancy.remap(|loc| match loc {
            Location::Board(pos) => Location::Board(f(pos)),
            pool => pool,
        });
    }

    // ========================================================================
    // EDIT MODE
    // ========================================================================

    /// Sanity check for a drag and drop while editing freely
    ///
    /// Pieces may go anywhere on the board but only back into their own pool,
    /// and never pool to pool.
    pub fn check_edit_move(&self, from: &Location, to: &Location) -> EditMove {
        if from == to {
            return EditMove::Null;
        }
        let Some(piece) = self.top(from) else {
            return EditMove::Illegal;
        };
        match to {
            Location::Board(_) => EditMove::Legal,
            Location::Pool(_) if from.is_pool() => EditMove::Illegal,
            Location::Pool(pool) if Pool::of_piece(piece) == Some(*pool) => EditMove::Legal,
            Location::Pool(_) => EditMove::Illegal,
        }
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Parse a location and check that it exists on this board
    pub fn resolve(&self, text: &str) -> Result<Location, BoardError> {
        let location = if text.starts_with('@') {
            text.parse()
                .map_err(|_| BoardError::UnknownPosition(text.to_string()))?
        } else {
            text.parse()?
        };
        self.check_location(&location)?;
        Ok(location)
    }

    fn check_location(&self, location: &Location) -> Result<(), BoardError> {
        match location {
            Location::Pool(pool) if !self.variant.includes(pool.bug) => {
                Err(BoardError::UnknownPosition(location.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn pool_of(&self, piece: &str) -> Result<Pool, BoardError> {
        if self.roster.binary_search_by(|p| p.as_str().cmp(piece)).is_err() {
            return Err(BoardError::UnknownPiece(piece.to_string()));
        }
        Pool::of_piece(piece).ok_or_else(|| BoardError::UnknownPiece(piece.to_string()))
    }

    fn expand_alias<'a>(&'a self, text: &'a str) -> Result<&'a str, BoardError> {
        match text.trim_start().strip_prefix('*') {
            Some(name) => {
                let name = name.trim();
                self.alias(name)
                    .ok_or_else(|| BoardError::UnknownAlias(name.to_string()))
            }
            None => Ok(text),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl fmt::Display for BoardState {
    /// On-board stacks only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(false))
    }
}

/// `Math.round`-style rounding of `sum / count`: halves go up
fn round_half_up(sum: i64, count: i64) -> i32 {
    (sum as f64 / count as f64 + 0.5).floor() as i32
}
