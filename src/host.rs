//! Host environment boundary
//!
//! The storage engine never talks to the windowing system directly. Cursor
//! queries, cursor moves, active window inspection and user notifications all
//! go through the [`Host`] trait, implemented by whatever front end drives the
//! store.

use thiserror::Error;

use crate::storage::Position;

/// The window that currently has focus
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveWindow {
    /// Full window title
    pub title: String,
    /// Name of the owning application
    pub app: String,
    /// Upper left corner of the window in screen coordinates, if known
    pub top_left: Option<Position>,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// Services the host environment provides to the store
pub trait Host {
    /// Current absolute cursor position
    fn cursor_position(&self) -> Result<Position, HostError>;

    /// Move the cursor to an absolute position
    fn move_cursor(&self, to: Position) -> Result<(), HostError>;

    /// Describe the active window
    fn active_window(&self) -> Result<ActiveWindow, HostError>;

    /// Show a message to the user
    fn notify(&self, message: &str);
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// In-memory host that records cursor moves and notifications
    pub struct FakeHost {
        pub cursor: Cell<Position>,
        pub window: RefCell<ActiveWindow>,
        pub moves: RefCell<Vec<Position>>,
        pub notifications: RefCell<Vec<String>>,
    }

    impl FakeHost {
        pub fn new(cursor: Position, window: ActiveWindow) -> Self {
            Self {
                cursor: Cell::new(cursor),
                window: RefCell::new(window),
                moves: RefCell::new(Vec::new()),
                notifications: RefCell::new(Vec::new()),
            }
        }

        pub fn in_app(app: &str, title: &str, top_left: Position) -> Self {
            Self::new(
                Position::ORIGIN,
                ActiveWindow {
                    title: title.to_string(),
                    app: app.to_string(),
                    top_left: Some(top_left),
                },
            )
        }
    }

    impl Host for FakeHost {
        fn cursor_position(&self) -> Result<Position, HostError> {
            Ok(self.cursor.get())
        }

        fn move_cursor(&self, to: Position) -> Result<(), HostError> {
            self.cursor.set(to);
            self.moves.borrow_mut().push(to);
            Ok(())
        }

        fn active_window(&self) -> Result<ActiveWindow, HostError> {
            Ok(self.window.borrow().clone())
        }

        fn notify(&self, message: &str) {
            self.notifications.borrow_mut().push(message.to_string());
        }
    }
}
