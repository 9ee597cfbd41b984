//! Axial board positions
//!
//! A position is `(col, row)`, two of the three cube coordinates; the third is
//! always `-(col + row)` and is never stored.
//!
//! Parsed positions keep every cube coordinate within [`AxialPosition::LIMIT`]
//! of the origin. Flips and rotations only permute and negate cube
//! coordinates, so transformed positions stay within the same bound.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Axial hex coordinates (col aka x, row aka z, with x + y + z = 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialPosition {
    pub col: i32,
    pub row: i32,
}

/// Rotation sense for 60 degree turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Left,
    Right,
}

impl AxialPosition {
    pub const ORIGIN: AxialPosition = AxialPosition::new(0, 0);

    /// Largest absolute cube coordinate accepted from text
    pub const LIMIT: i32 = 1 << 20;

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The implicit third cube coordinate
    pub fn cube_y(&self) -> i32 {
        -(self.col + self.row)
    }

    pub fn shift(&self, dc: i32, dr: i32) -> AxialPosition {
        AxialPosition::new(self.col + dc, self.row + dr)
    }

    /// Reflect across the horizontal axis: (x, y, z) -> (-y, -x, -z)
    pub fn flip(&self) -> AxialPosition {
        AxialPosition::new(self.col + self.row, -self.row)
    }

    /// Rotate 60 degrees
    ///
    /// left: (x, y, z) -> (-y, -z, -x)
    /// right: (x, y, z) -> (-z, -x, -y)
    pub fn rotate(&self, direction: Rotation) -> AxialPosition {
        match direction {
            Rotation::Left => AxialPosition::new(self.col + self.row, -self.col),
            Rotation::Right => AxialPosition::new(-self.row, self.col + self.row),
        }
    }
}

impl fmt::Display for AxialPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}{:+}", self.col, self.row)
    }
}

impl FromStr for AxialPosition {
    type Err = FormatError;

    /// Parse `{+|-}col{+|-}row`, e.g. `+1-2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FormatError::Position(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() < 4 || !is_sign(bytes[0]) {
            return Err(bad());
        }
        let split = bytes[1..]
            .iter()
            .position(|&b| is_sign(b))
            .map(|i| i + 1)
            .ok_or_else(bad)?;
        let (col, row) = s.split_at(split);
        let position = AxialPosition::new(
            parse_signed(col).ok_or_else(bad)?,
            parse_signed(row).ok_or_else(bad)?,
        );
        if !position.within_limit() {
            return Err(bad());
        }
        Ok(position)
    }
}

impl AxialPosition {
    fn within_limit(&self) -> bool {
        let limit = i64::from(Self::LIMIT);
        let (col, row) = (i64::from(self.col), i64::from(self.row));
        col.abs() <= limit && row.abs() <= limit && (col + row).abs() <= limit
    }
}

fn is_sign(b: u8) -> bool {
    b == b'+' || b == b'-'
}

/// An explicit sign followed by at least one ASCII digit
fn parse_signed(s: &str) -> Option<i32> {
    let digits = &s[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Left => f.write_str("left"),
            Rotation::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Rotation {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Rotation::Left),
            "right" => Ok(Rotation::Right),
            _ => Err(FormatError::Direction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let p: AxialPosition = "+1-2".parse().unwrap();
        assert_eq!(p, AxialPosition::new(1, -2));
        assert_eq!(p.to_string(), "+1-2");
        assert_eq!(AxialPosition::ORIGIN.to_string(), "+0+0");
        assert_eq!("-10+03".parse::<AxialPosition>().unwrap(), AxialPosition::new(-10, 3));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "+1", "1+2", "+1+", "++1", "+1+2x", "+1,+2", " +1+2", "+a+2", "+1+2+3"] {
            assert_eq!(
                bad.parse::<AxialPosition>(),
                Err(FormatError::Position(bad.to_string())),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_parse_bounds_coordinates() {
        let edge: AxialPosition = "+1048576-1048576".parse().unwrap();
        assert_eq!(edge, AxialPosition::new(AxialPosition::LIMIT, -AxialPosition::LIMIT));
        assert!("-1048576+0".parse::<AxialPosition>().is_ok());
        for bad in [
            "+1048577+0",
            "+0-1048577",
            "+1048576+1",
            "-1048576-1",
            "+2147483647+1",
            "+99999999999+0",
        ] {
            assert_eq!(
                bad.parse::<AxialPosition>(),
                Err(FormatError::Position(bad.to_string())),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_transforms_stay_in_bounds() {
        for text in ["+1048576+0", "+0-1048576", "-1048576+1048576", "+524288+524288"] {
            let p: AxialPosition = text.parse().unwrap();
            let mut q = p.flip();
            for _ in 0..6 {
                q = q.rotate(Rotation::Left);
                assert_eq!(q.to_string().parse::<AxialPosition>(), Ok(q));
            }
            assert_eq!(q.flip(), p);
        }
    }

    #[test]
    fn test_transforms() {
        let p = AxialPosition::new(2, -1);
        assert_eq!(p.shift(-2, 1), AxialPosition::ORIGIN);
        assert_eq!(p.flip(), AxialPosition::new(1, 1));
        assert_eq!(p.rotate(Rotation::Left), AxialPosition::new(1, -2));
        assert_eq!(p.rotate(Rotation::Right), AxialPosition::new(1, 1));
    }

    #[test]
    fn test_six_rotations_are_identity() {
        let p = AxialPosition::new(3, -5);
        let mut q = p;
        for _ in 0..6 {
            q = q.rotate(Rotation::Right);
            assert_eq!(q.col + q.row + q.cube_y(), 0);
        }
        assert_eq!(q, p);
    }

    #[test]
    fn test_rotation_parse() {
        assert_eq!("left".parse::<Rotation>().unwrap(), Rotation::Left);
        assert!("up".parse::<Rotation>().is_err());
    }
}
