//! Reference frames for stored positions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ParseError, Result, StoreError};
use super::Position;

/// Prefix of the relativity line in a record file
pub const RELATIVITY_TAG: &str = "PositionRelativity.";

/// What a stored position is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Relativity {
    /// Upper left corner of the main screen
    #[default]
    #[serde(rename = "ABSOLUTE")]
    Absolute,
    /// Upper left corner of the active window
    #[serde(rename = "WINDOW")]
    Window,
    /// The stored reference point
    #[serde(rename = "MOUSE")]
    MousePoint,
}

/// Supplies the origins of the non-absolute frames
///
/// Origins are only requested for the frame actually being converted, so an
/// absolute conversion never touches the host.
pub trait FrameSource {
    fn window_origin(&self) -> Result<Position>;
    fn reference_point(&self) -> Result<Position>;
}

impl Relativity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "ABSOLUTE",
            Self::Window => "WINDOW",
            Self::MousePoint => "MOUSE",
        }
    }

    /// Origin of this frame in absolute coordinates
    pub fn origin(self, frames: &dyn FrameSource) -> Result<Position> {
        match self {
            Self::Absolute => Ok(Position::ORIGIN),
            Self::Window => frames.window_origin(),
            Self::MousePoint => frames.reference_point(),
        }
    }

    pub fn to_absolute(self, position: Position, frames: &dyn FrameSource) -> Result<Position> {
        let origin = self.origin(frames)?;
        position
            .checked_add(origin)
            .ok_or(StoreError::OutOfRange { position, origin })
    }

    pub fn from_absolute(self, position: Position, frames: &dyn FrameSource) -> Result<Position> {
        let origin = self.origin(frames)?;
        position
            .checked_sub(origin)
            .ok_or(StoreError::OutOfRange { position, origin })
    }

    /// Parse a record file line, or `None` if it is not a relativity line
    pub fn parse_line(line: &str) -> Option<std::result::Result<Self, ParseError>> {
        line.strip_prefix(RELATIVITY_TAG).map(str::parse)
    }

    /// The record file line for this relativity, without a trailing newline
    pub fn encode(self) -> String {
        format!("{}{}", RELATIVITY_TAG, self.as_str())
    }
}

impl fmt::Display for Relativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relativity {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ABSOLUTE" => Ok(Self::Absolute),
            "WINDOW" => Ok(Self::Window),
            "MOUSE" => Ok(Self::MousePoint),
            other => Err(ParseError::Relativity(other.to_string())),
        }
    }
}
