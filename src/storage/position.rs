//! Screen coordinates and their text form
//!
//! A position is written as `(h, v)` with a literal `", "` between the two
//! coordinates. The same form is used in record files and in log output.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseError;

const START: char = '(';
const END: char = ')';
const SEPARATOR: &str = ", ";

/// A 2D integer coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub horizontal: i32,
    pub vertical: i32,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0, 0);

    pub const fn new(horizontal: i32, vertical: i32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Component-wise sum, or `None` on overflow
    pub fn checked_add(self, other: Position) -> Option<Position> {
        Some(Position::new(
            self.horizontal.checked_add(other.horizontal)?,
            self.vertical.checked_add(other.vertical)?,
        ))
    }

    /// Component-wise difference, or `None` on overflow
    pub fn checked_sub(self, other: Position) -> Option<Position> {
        Some(Position::new(
            self.horizontal.checked_sub(other.horizontal)?,
            self.vertical.checked_sub(other.vertical)?,
        ))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(
            self.horizontal + other.horizontal,
            self.vertical + other.vertical,
        )
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(
            self.horizontal - other.horizontal,
            self.vertical - other.vertical,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            START, self.horizontal, SEPARATOR, self.vertical, END
        )
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Position(text.to_string());

        let inner = text
            .trim()
            .strip_prefix(START)
            .and_then(|rest| rest.strip_suffix(END))
            .ok_or_else(malformed)?;
        let (horizontal, vertical) = inner.split_once(SEPARATOR).ok_or_else(malformed)?;

        let horizontal = horizontal.trim().parse().map_err(|_| malformed())?;
        let vertical = vertical.trim().parse().map_err(|_| malformed())?;

        Ok(Position::new(horizontal, vertical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1, 2).to_string(), "(1, 2)");
        assert_eq!(Position::new(-15, 0).to_string(), "(-15, 0)");
    }

    #[test]
    fn test_parse() {
        assert_eq!("(1, 2)".parse::<Position>(), Ok(Position::new(1, 2)));
        assert_eq!(
            "(-300, -4)".parse::<Position>(),
            Ok(Position::new(-300, -4))
        );
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!("  (7, 8)\r".parse::<Position>(), Ok(Position::new(7, 8)));
    }

    #[test]
    fn test_parse_malformed() {
        for text in ["", "1, 2", "(1,2)", "(1, 2", "(a, 2)", "(1, 2, 3)", "PositionRelativity.WINDOW"] {
            assert_eq!(
                text.parse::<Position>(),
                Err(ParseError::Position(text.to_string())),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_round_trip_boundaries() {
        let values = [i32::MIN, -1920, -1, 0, 1, 1080, i32::MAX];
        for horizontal in values {
            for vertical in values {
                let position = Position::new(horizontal, vertical);
                assert_eq!(position.to_string().parse::<Position>(), Ok(position));
            }
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("(2147483648, 0)".parse::<Position>().is_err());
        assert!("(0, -2147483649)".parse::<Position>().is_err());
    }

    #[test]
    fn test_add() {
        let result = Position::new(1, 2) + Position::new(14, 200);
        assert_eq!(result, Position::new(15, 202));
    }

    #[test]
    fn test_sub() {
        let result = Position::new(1, 2) - Position::new(239, 175);
        assert_eq!(result, Position::new(1 - 239, 2 - 175));
    }

    #[test]
    fn test_checked_overflow() {
        let max = Position::new(i32::MAX, 0);
        assert_eq!(max.checked_add(Position::new(1, 0)), None);
        assert_eq!(Position::new(0, i32::MIN).checked_sub(Position::new(0, 1)), None);
        assert_eq!(
            max.checked_sub(Position::new(1, -1)),
            Some(Position::new(i32::MAX - 1, 1))
        );
    }

    #[test]
    fn test_sub_inverts_add() {
        let a = Position::new(10, -20);
        let b = Position::new(-3, 45);
        assert_eq!((a + b) - b, a);
    }
}
