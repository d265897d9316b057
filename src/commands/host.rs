//! Command line host adapter
//!
//! The CLI has no window system access of its own. The caller describes the
//! environment with flags, and cursor moves are printed on stdout as the
//! absolute target for a wrapper script to perform.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::host::{ActiveWindow, Host, HostError};
use crate::storage::Position;

/// Host environment described on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct HostArgs {
    /// Current cursor position, as X,Y
    #[arg(long, global = true, value_parser = parse_position_arg, allow_hyphen_values = true)]
    pub cursor: Option<Position>,

    /// Name of the active application
    #[arg(long, global = true)]
    pub app: Option<String>,

    /// Title of the active window
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Upper left corner of the active window, as X,Y
    #[arg(long, global = true, value_parser = parse_position_arg, allow_hyphen_values = true)]
    pub window: Option<Position>,
}

/// Host backed by command line flags
#[derive(Debug, Clone)]
pub struct CliHost {
    args: HostArgs,
}

impl CliHost {
    pub fn new(args: HostArgs) -> Self {
        Self { args }
    }
}

impl Host for CliHost {
    fn cursor_position(&self) -> Result<Position, HostError> {
        self.args
            .cursor
            .ok_or_else(|| HostError("cursor position unknown, pass --cursor X,Y".to_string()))
    }

    fn move_cursor(&self, to: Position) -> Result<(), HostError> {
        println!("{}", to);
        Ok(())
    }

    fn active_window(&self) -> Result<ActiveWindow, HostError> {
        if self.args.window.is_none() {
            debug!("active window origin unknown, pass --window X,Y for window relative positions");
        }
        Ok(ActiveWindow {
            title: self.args.title.clone().unwrap_or_default(),
            app: self.args.app.clone().unwrap_or_default(),
            top_left: self.args.window,
        })
    }

    fn notify(&self, message: &str) {
        eprintln!("{} {}", "Note:".yellow(), message);
    }
}

/// Parse `X,Y` or the stored `(X, Y)` form
pub fn parse_position_arg(s: &str) -> Result<Position, String> {
    if let Ok(position) = s.parse::<Position>() {
        return Ok(position);
    }

    let (horizontal, vertical) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let horizontal = horizontal
        .trim()
        .parse()
        .map_err(|e| format!("invalid X coordinate {horizontal:?}: {e}"))?;
    let vertical = vertical
        .trim()
        .parse()
        .map_err(|e| format!("invalid Y coordinate {vertical:?}: {e}"))?;
    Ok(Position::new(horizontal, vertical))
}
