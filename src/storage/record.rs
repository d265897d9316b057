//! Stored records and the record file format
//!
//! ```text
//! app:<string>                    (optional)
//! title:<string>                  (optional)
//! mouse position mode:<string>    (optional)
//! (<h>, <v>)
//! PositionRelativity.<ABSOLUTE|WINDOW|MOUSE>
//! ```
//!
//! Records are written in that order, but lines are accepted in any order.

use std::fs;
use std::path::Path;

use super::context::{Context, ContextField};
use super::error::{ParseError, Result, StoreError};
use super::{Position, Relativity};

/// One stored position with the context it applies to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub position: Option<Position>,
    pub context: Context,
    pub relativity: Relativity,
}

/// Classification of a single record file line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLine {
    Context(ContextField),
    Relativity(Relativity),
    Position(Position),
    Blank,
}

impl RecordLine {
    /// Context fields are tried first, then the relativity tag, then a position
    pub fn parse(line: &str) -> std::result::Result<Self, ParseError> {
        if let Some(field) = ContextField::parse(line) {
            return Ok(Self::Context(field));
        }
        if let Some(relativity) = Relativity::parse_line(line) {
            return relativity.map(Self::Relativity);
        }
        if line.is_empty() {
            return Ok(Self::Blank);
        }
        line.parse().map(Self::Position)
    }
}

impl Record {
    pub fn new(position: Position, context: Context, relativity: Relativity) -> Self {
        Self {
            position: Some(position),
            context,
            relativity,
        }
    }

    pub fn encode(&self) -> String {
        let mut text = self.context.encode();
        if let Some(position) = self.position {
            text.push_str(&position.to_string());
            text.push('\n');
        }
        text.push_str(&self.relativity.encode());
        text
    }

    pub fn decode(text: &str) -> std::result::Result<Self, ParseError> {
        let mut record = Record::default();
        for line in text.lines() {
            match RecordLine::parse(line.trim_end_matches(['\r', '\n']))? {
                RecordLine::Context(field) => record.context.apply(field),
                RecordLine::Relativity(relativity) => record.relativity = relativity,
                RecordLine::Position(position) => record.position = Some(position),
                RecordLine::Blank => {}
            }
        }
        Ok(record)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| StoreError::io("read record", path, e))?;
        Ok(Self::decode(&text)?)
    }

    /// Overwrite the file at `path` with this record
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.encode()).map_err(|e| StoreError::io("write record", path, e))
    }
}
