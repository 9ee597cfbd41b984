//! Bug definitions, piece names and off-board pools

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-letter code used in piece names and wire markers
    pub fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

impl FromStr for Color {
    type Err = FormatError;

    /// Accepts `white`/`black` as well as `w`/`b`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(FormatError::Color(s.to_string())),
        }
    }
}

/// Bug type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bug {
    Queen,
    Beetle,
    Spider,
    Ant,
    Grasshopper,
    Ladybug,
    Mosquito,
    Pillbug,
}

impl Bug {
    /// Base game bugs, in off-board display order
    pub const BASE: [Bug; 5] = [Bug::Queen, Bug::Beetle, Bug::Spider, Bug::Ant, Bug::Grasshopper];

    /// Expansion bugs, enabled per [`Variant`]
    pub const OPTIONAL: [Bug; 3] = [Bug::Ladybug, Bug::Mosquito, Bug::Pillbug];

    /// Upper-case letter used in piece names and pool keys
    pub fn letter(self) -> char {
        match self {
            Bug::Queen => 'Q',
            Bug::Beetle => 'B',
            Bug::Spider => 'S',
            Bug::Ant => 'A',
            Bug::Grasshopper => 'G',
            Bug::Ladybug => 'L',
            Bug::Mosquito => 'M',
            Bug::Pillbug => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'Q' => Some(Bug::Queen),
            'B' => Some(Bug::Beetle),
            'S' => Some(Bug::Spider),
            'A' => Some(Bug::Ant),
            'G' => Some(Bug::Grasshopper),
            'L' => Some(Bug::Ladybug),
            'M' => Some(Bug::Mosquito),
            'P' => Some(Bug::Pillbug),
            _ => None,
        }
    }

    /// Pieces of this bug per color; single pieces carry no instance digit
    pub fn count(self) -> u8 {
        match self {
            Bug::Queen | Bug::Ladybug | Bug::Mosquito | Bug::Pillbug => 1,
            Bug::Beetle | Bug::Spider => 2,
            Bug::Ant | Bug::Grasshopper => 3,
        }
    }
}

/// Which optional bugs are in play, written over `l`, `m`, `p`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub ladybug: bool,
    pub mosquito: bool,
    pub pillbug: bool,
}

impl Variant {
    /// Every expansion bug
    pub const FULL: Variant = Variant {
        ladybug: true,
        mosquito: true,
        pillbug: true,
    };

    pub fn includes(&self, bug: Bug) -> bool {
        match bug {
            Bug::Ladybug => self.ladybug,
            Bug::Mosquito => self.mosquito,
            Bug::Pillbug => self.pillbug,
            _ => true,
        }
    }

    /// Bugs in play, base bugs first
    pub fn bugs(&self) -> Vec<Bug> {
        Bug::BASE
            .iter()
            .chain(Bug::OPTIONAL.iter())
            .copied()
            .filter(|&bug| self.includes(bug))
            .collect()
    }

    /// All piece names in play, sorted
    pub fn roster(&self) -> Vec<String> {
        let mut names: Vec<String> = Color::ALL
            .iter()
            .flat_map(|&color| self.bugs().into_iter().flat_map(move |bug| piece_names(color, bug)))
            .collect();
        names.sort();
        names
    }

    /// Pools in play
    pub fn pools(&self) -> Vec<Pool> {
        Color::ALL
            .iter()
            .flat_map(|&color| self.bugs().into_iter().map(move |bug| Pool::new(color, bug)))
            .collect()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, letter) in [(self.ladybug, 'l'), (self.mosquito, 'm'), (self.pillbug, 'p')] {
            if on {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Variant {
    type Err = FormatError;

    /// Letters may come in any order but each at most once
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut variant = Variant::default();
        for c in s.chars() {
            let slot = match c {
                'l' => &mut variant.ladybug,
                'm' => &mut variant.mosquito,
                'p' => &mut variant.pillbug,
                _ => return Err(FormatError::Variant(s.to_string())),
            };
            if *slot {
                return Err(FormatError::Variant(s.to_string()));
            }
            *slot = true;
        }
        Ok(variant)
    }
}

/// Names of every piece of one bug for one color, e.g. `wA1 wA2 wA3` or `bQ`
pub fn piece_names(color: Color, bug: Bug) -> Vec<String> {
    let prefix = format!("{}{}", color.letter(), bug.letter());
    match bug.count() {
        1 => vec![prefix],
        n => (1..=n).map(|i| format!("{}{}", prefix, i)).collect(),
    }
}

/// Color and bug encoded in a piece name (`wQ`, `bS1`, ...)
pub fn parse_piece_name(name: &str) -> Option<(Color, Bug)> {
    let mut chars = name.chars();
    let color = Color::from_letter(chars.next()?)?;
    let bug = Bug::from_letter(chars.next()?)?;
    match chars.as_str() {
        "" => Some((color, bug)),
        rest if rest.len() == 1 && matches!(rest.as_bytes()[0], b'1'..=b'9') => Some((color, bug)),
        _ => None,
    }
}

/// Off-board pool of one (color, bug), keyed `@{color}{BUG}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pool {
    pub color: Color,
    pub bug: Bug,
}

impl Pool {
    pub const fn new(color: Color, bug: Bug) -> Self {
        Self { color, bug }
    }

    /// The pool a piece name belongs to
    pub fn of_piece(name: &str) -> Option<Pool> {
        parse_piece_name(name).map(|(color, bug)| Pool::new(color, bug))
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}{}", self.color.letter(), self.bug.letter())
    }
}

impl FromStr for Pool {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FormatError::Position(s.to_string());
        let mut chars = s.chars();
        if chars.next() != Some('@') {
            return Err(bad());
        }
        let color = chars.next().and_then(Color::from_letter).ok_or_else(bad)?;
        let bug = chars.next().and_then(Bug::from_letter).ok_or_else(bad)?;
        if chars.next().is_some() {
            return Err(bad());
        }
        Ok(Pool::new(color, bug))
    }
}
