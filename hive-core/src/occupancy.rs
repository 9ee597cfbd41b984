//! Bidirectional piece <-> location index
//!
//! Both directions live in one type and every mutator updates them together:
//! a piece is listed in exactly one stack, at the location its index entry
//! names, and no empty stack is kept.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::pieces::Pool;
use crate::position::AxialPosition;

/// Where a stack sits: on the board or in an off-board pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Board(AxialPosition),
    Pool(Pool),
}

impl Location {
    pub fn is_pool(&self) -> bool {
        matches!(self, Location::Pool(_))
    }
}

impl From<AxialPosition> for Location {
    fn from(pos: AxialPosition) -> Self {
        Location::Board(pos)
    }
}

impl From<Pool> for Location {
    fn from(pool: Pool) -> Self {
        Location::Pool(pool)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Board(pos) => pos.fmt(f),
            Location::Pool(pool) => pool.fmt(f),
        }
    }
}

impl FromStr for Location {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('@') {
            s.parse().map(Location::Pool)
        } else {
            s.parse().map(Location::Board)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Stacks, top piece first; pools stay sorted
    stacks: FxHashMap<Location, Vec<String>>,
    index: FxHashMap<String, Location>,
}

impl Occupancy {
    pub fn clear(&mut self) {
        self.stacks.clear();
        self.index.clear();
    }

    pub fn stack(&self, location: &Location) -> &[String] {
        self.stacks.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn location_of(&self, piece: &str) -> Option<Location> {
        self.index.get(piece).copied()
    }

    /// Every non-empty stack, in no particular order
    pub fn stacks(&self) -> impl Iterator<Item = (&Location, &[String])> {
        self.stacks.iter().map(|(loc, stack)| (loc, stack.as_slice()))
    }

    /// Put `piece` on top of `location` (sorted in, for pools)
    pub fn insert(&mut self, piece: String, location: Location) {
        self.detach(&piece);
        let stack = self.stacks.entry(location).or_default();
        match location {
            Location::Pool(_) => {
                let at = stack.binary_search(&piece).unwrap_or_else(|i| i);
                stack.insert(at, piece.clone());
            }
            Location::Board(_) => stack.insert(0, piece.clone()),
        }
        self.index.insert(piece, location);
    }

    /// Remove and return the top piece of `location`
    pub fn pop_top(&mut self, location: &Location) -> Option<String> {
        let stack = self.stacks.get_mut(location)?;
        if stack.is_empty() {
            return None;
        }
        let piece = stack.remove(0);
        if stack.is_empty() {
            self.stacks.remove(location);
        }
        self.index.remove(&piece);
        Some(piece)
    }

    /// Remove a whole stack; its pieces are no longer indexed
    ///
    /// Callers must re-insert every returned piece before handing the
    /// occupancy back out.
    pub(crate) fn take_stack(&mut self, location: &Location) -> Vec<String> {
        let stack = self.stacks.remove(location).unwrap_or_default();
        for piece in &stack {
            self.index.remove(piece);
        }
        stack
    }

    /// Move every stack through `f`, which must be injective
    pub fn remap<F>(&mut self, f: F)
    where
        F: Fn(Location) -> Location,
    {
        let stacks = std::mem::take(&mut self.stacks);
        self.index.clear();
        for (location, pieces) in stacks {
            let target = f(location);
            for piece in &pieces {
                self.index.insert(piece.clone(), target);
            }
            self.stacks.insert(target, pieces);
        }
    }

    fn detach(&mut self, piece: &str) -> Option<Location> {
        let location = self.index.remove(piece)?;
        if let Some(stack) = self.stacks.get_mut(&location) {
            stack.retain(|p| p != piece);
            if stack.is_empty() {
                self.stacks.remove(&location);
            }
        }
        Some(location)
    }
}
